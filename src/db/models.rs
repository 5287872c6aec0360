use serde::Serialize;
use sqlx::FromRow;

/// Database representation of a job with all fields
///
/// `equity` is selected as `equity::TEXT` so the decimal keeps the exact
/// textual form Postgres stores (e.g. "0.98").
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRow {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_handle() {
        let row = JobRow {
            id: 3,
            title: "j1".to_string(),
            salary: Some(100000),
            equity: Some("0.98".to_string()),
            company_handle: "c1".to_string(),
        };

        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 3,
                "title": "j1",
                "salary": 100000,
                "equity": "0.98",
                "companyHandle": "c1"
            })
        );
    }
}
