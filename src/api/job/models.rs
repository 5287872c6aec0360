use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Payload for creating a job
#[derive(Deserialize, Serialize, Debug, Clone, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: String,

    #[validate(range(min = 0, message = "Salary must be zero or greater"))]
    pub salary: Option<i32>,

    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<String>,

    #[validate(length(
        min = 1,
        max = 25,
        message = "Company handle must be between 1 and 25 characters"
    ))]
    pub company_handle: String,
}

/// Partial update accepted over HTTP
///
/// `companyHandle` is deliberately absent: a job never moves between
/// companies through the API, so the key is rejected as unknown.
#[derive(Deserialize, Serialize, Debug, Clone, Default, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdateRequest {
    #[validate(length(min = 1, message = "Title must not be empty"))]
    pub title: Option<String>,

    #[validate(range(min = 0, message = "Salary must be zero or greater"))]
    pub salary: Option<i32>,

    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<String>,
}

/// Search criteria for listing jobs, taken from the query string
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    /// Case-insensitive substring of the title
    pub title: Option<String>,

    #[validate(range(min = 0, message = "minSalary must be zero or greater"))]
    pub min_salary: Option<i32>,

    /// `true` keeps only jobs with equity above zero. `false` does not filter.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    /// True when no criterion would narrow the result set
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.has_equity != Some(true)
    }
}

/// Equity is a decimal string in [0, 1]: "0", "0.5", "1", "1.000"
fn validate_equity(equity: &str) -> Result<(), ValidationError> {
    if is_equity_fraction(equity) {
        Ok(())
    } else {
        Err(ValidationError::new("equity").with_message(Cow::Borrowed(
            "Equity must be a decimal string between 0 and 1",
        )))
    }
}

fn is_equity_fraction(text: &str) -> bool {
    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (text, None),
    };

    match (whole, fraction) {
        ("0", None) | ("1", None) => true,
        ("0", Some(digits)) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        ("1", Some(digits)) => !digits.is_empty() && digits.bytes().all(|b| b == b'0'),
        _ => false,
    }
}
