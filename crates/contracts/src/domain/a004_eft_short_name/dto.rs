use serde::{Deserialize, Serialize};

use crate::shared::paging::is_blank;

/// Link state of an EFT short name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EftShortNameState {
    Linked,
    Unlinked,
    Pending,
    Summary,
    #[serde(other)]
    Unknown,
}

impl EftShortNameState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linked => "LINKED",
            Self::Unlinked => "UNLINKED",
            Self::Pending => "PENDING",
            Self::Summary => "SUMMARY",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EftShortNameType {
    Eft,
    Wire,
    #[serde(other)]
    Unknown,
}

/// EFT short name row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EftShortNameDto {
    pub id: i64,
    pub short_name: String,
    #[serde(default)]
    pub short_name_type: Option<EftShortNameType>,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_branch: Option<String>,
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub cas_supplier_number: Option<String>,
    #[serde(default)]
    pub deposit_amount: Option<f64>,
    #[serde(default)]
    pub deposit_date: Option<String>,
}

/// Query parameters for `GET /eft-shortnames`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EftShortNameFilter {
    #[serde(default, skip_serializing_if = "is_blank")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name_type: Option<EftShortNameType>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub account_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub account_branch: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub deposit_start_date: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub deposit_end_date: Option<String>,
    /// Tab selector, not a user-entered filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<EftShortNameState>,
}

/// List envelope of `GET /eft-shortnames`; `stateTotal` counts rows in the
/// requested state regardless of the other filters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EftShortNameListResponse {
    #[serde(default)]
    pub items: Vec<EftShortNameDto>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub state_total: u64,
}

/// Counts shown on the linked/unlinked tabs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EftShortNameTabCounts {
    pub linked: u64,
    pub unlinked: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_response_reads_state_total() {
        let resp: EftShortNameListResponse = serde_json::from_value(json!({
            "items": [{"id": 1, "shortName": "ABC"}],
            "total": 25,
            "stateTotal": 4
        }))
        .unwrap();
        assert_eq!(resp.items.len(), 1);
        assert_eq!(resp.items[0].short_name, "ABC");
        assert_eq!(resp.total, 25);
        assert_eq!(resp.state_total, 4);
    }
}
