pub mod models;
pub mod dto;
pub mod handlers;
pub mod service;

// Re-export commonly used types
pub use models::{JobFilter, JobUpdateRequest, NewJob};
pub use service::JobService;
