//! Dynamic SQL fragments for job queries.
//!
//! Clauses are built over a fixed set of known columns. User-supplied values
//! always go through `push_bind`, so they reach Postgres as positional
//! parameters and never as statement text.

use sqlx::{Postgres, QueryBuilder};

use crate::api::job::{JobFilter, JobUpdateRequest};

/// Columns returned for every job query, in `JobRow` order
pub const JOB_COLUMNS: &str = "id, title, salary, equity::TEXT AS equity, company_handle";

/// Set of fields a partial update may carry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobUpdate {
    pub title: Option<String>,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: Option<String>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.salary.is_none()
            && self.equity.is_none()
            && self.company_handle.is_none()
    }

    /// Present fields, always in column order
    pub fn changes(&self) -> Vec<JobChange<'_>> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(JobChange::Title(title));
        }
        if let Some(salary) = self.salary {
            changes.push(JobChange::Salary(salary));
        }
        if let Some(equity) = &self.equity {
            changes.push(JobChange::Equity(equity));
        }
        if let Some(handle) = &self.company_handle {
            changes.push(JobChange::CompanyHandle(handle));
        }
        changes
    }
}

impl From<JobUpdateRequest> for JobUpdate {
    fn from(request: JobUpdateRequest) -> Self {
        JobUpdate {
            title: request.title,
            salary: request.salary,
            equity: request.equity,
            company_handle: None,
        }
    }
}

/// One updatable column together with its new value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobChange<'a> {
    Title(&'a str),
    Salary(i32),
    Equity(&'a str),
    CompanyHandle(&'a str),
}

impl JobChange<'_> {
    pub fn column(&self) -> &'static str {
        match self {
            JobChange::Title(_) => "title",
            JobChange::Salary(_) => "salary",
            JobChange::Equity(_) => "equity",
            JobChange::CompanyHandle(_) => "company_handle",
        }
    }

    fn push_value(&self, builder: &mut QueryBuilder<'_, Postgres>) {
        match *self {
            JobChange::Title(title) => {
                builder.push_bind(title.to_string());
            }
            JobChange::Salary(salary) => {
                builder.push_bind(salary);
            }
            JobChange::Equity(equity) => {
                builder.push_bind(equity.to_string()).push("::NUMERIC");
            }
            JobChange::CompanyHandle(handle) => {
                builder.push_bind(handle.to_string());
            }
        }
    }
}

/// Append ` SET col = $n, ...` for every present field.
///
/// Callers reject empty updates first; an empty `SET` is not valid SQL.
pub fn push_set_clause(builder: &mut QueryBuilder<'_, Postgres>, update: &JobUpdate) {
    builder.push(" SET ");
    for (i, change) in update.changes().iter().enumerate() {
        if i > 0 {
            builder.push(", ");
        }
        builder.push(change.column()).push(" = ");
        change.push_value(builder);
    }
}

/// Append ` WHERE ... AND ...` for every criterion that narrows results.
///
/// Nothing is appended for an empty filter, and `hasEquity: false` adds no
/// predicate.
pub fn push_where_clause(builder: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    let mut keyword = " WHERE ";

    if let Some(title) = &filter.title {
        builder
            .push(keyword)
            .push("title ILIKE ")
            .push_bind(title_pattern(title))
            .push(" ESCAPE '\\'");
        keyword = " AND ";
    }

    if let Some(min_salary) = filter.min_salary {
        builder.push(keyword).push("salary >= ").push_bind(min_salary);
        keyword = " AND ";
    }

    if filter.has_equity == Some(true) {
        builder.push(keyword).push("equity > 0");
    }
}

/// `%text%` with LIKE metacharacters escaped, so the match is literal
pub fn title_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
