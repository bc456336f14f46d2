//! Listing query parameters
//!
//! Extracted from URL query strings on the invoices listing. All parameters
//! have sensible defaults.
//!
//! ```rust,ignore
//! // GET /dashboard/invoices?query=lee&page=2
//! pub async fn list(Query(params): Query<ListQuery>) -> ... {
//!     // params.query == "lee", params.page() == 2
//! }
//! ```

use serde::Deserialize;

/// Free-text search plus 1-based page number.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListQuery {
    /// Free-text filter matched against customer name/email and invoice
    /// status, amount and date
    pub query: String,

    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

impl ListQuery {
    /// Get the page number, ensuring a minimum of 1
    pub fn page(&self) -> usize {
        self.page.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ListQuery::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.query, "");
    }

    #[test]
    fn test_page_zero_is_clamped_to_one() {
        let params = ListQuery {
            query: String::new(),
            page: 0,
        };
        assert_eq!(params.page(), 1);
    }

    #[test]
    fn test_deserializes_from_query_string() {
        let params: ListQuery = serde_json::from_value(serde_json::json!({
            "query": "lee",
            "page": 3
        }))
        .unwrap();
        assert_eq!(params.query, "lee");
        assert_eq!(params.page(), 3);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let params: ListQuery = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.query, "");
    }
}
