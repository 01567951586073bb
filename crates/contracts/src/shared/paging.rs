use serde::{Deserialize, Serialize};

/// Paging fields merged with a view's filter fields into one flat request.
///
/// Serializes as `{"page": 1, "limit": 20, ...filters}`, the shape every
/// list endpoint of the pay API accepts (as a query string or a JSON body).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageRequest<F> {
    pub page: u32,
    pub limit: u32,
    #[serde(flatten)]
    pub filters: F,
}

impl<F> PageRequest<F> {
    pub fn new(page: u32, limit: u32, filters: F) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            filters,
        }
    }
}

/// Standard list envelope returned by the pay API.
///
/// Every field is defaulted: a response missing `items` or `total` decodes
/// to an empty page rather than failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
}

impl<T> Default for PagedResponse<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page: 0,
            limit: 0,
            total: 0,
        }
    }
}

/// Skips empty strings in optional filter fields when serializing.
pub fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Filters {
        short_name: Option<String>,
    }

    #[test]
    fn test_page_request_flattens_filters() {
        let req = PageRequest::new(2, 20, Filters { short_name: Some("ABC".into()) });
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({"page": 2, "limit": 20, "shortName": "ABC"}));
    }

    #[test]
    fn test_page_request_clamps_to_positive() {
        let req = PageRequest::new(0, 0, ());
        assert_eq!((req.page, req.limit), (1, 1));
    }

    #[test]
    fn test_paged_response_missing_fields_default() {
        let resp: PagedResponse<u32> = serde_json::from_str("{}").unwrap();
        assert!(resp.items.is_empty());
        assert_eq!(resp.total, 0);

        let resp: PagedResponse<u32> =
            serde_json::from_str(r#"{"items":[1,2,3],"total":25,"page":1,"limit":10}"#).unwrap();
        assert_eq!(resp.items, vec![1, 2, 3]);
        assert_eq!(resp.total, 25);
    }

    #[test]
    fn test_is_blank() {
        assert!(is_blank(&None));
        assert!(is_blank(&Some("   ".into())));
        assert!(!is_blank(&Some("x".into())));
    }
}
