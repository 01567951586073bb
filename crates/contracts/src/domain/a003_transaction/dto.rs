use serde::{Deserialize, Serialize};

use crate::domain::a001_routing_slip::dto::DateFilter;
use crate::shared::paging::is_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLineItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub gst: f64,
    #[serde(default)]
    pub pst: f64,
}

/// Account transaction (invoice) row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    pub id: i64,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub created_name: Option<String>,
    #[serde(default)]
    pub business_identifier: Option<String>,
    #[serde(default)]
    pub folio_number: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub status_code: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub paid: f64,
    #[serde(default)]
    pub refund: f64,
    #[serde(default)]
    pub line_items: Vec<TransactionLineItem>,
}

/// Body of `POST /accounts/{id}/payments/queries`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    #[serde(default, skip_serializing_if = "DateFilter::is_empty")]
    pub date_filter: DateFilter,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub folio_number: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub business_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub created_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub invoice_number: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub status_code: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub line_item: Option<String>,
}

/// Paging half of the transactions query; sent as a query string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPaging {
    pub page: u32,
    pub limit: u32,
}

/// Everything needed for one transactions page request
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionQuery {
    pub account_id: i64,
    pub paging: TransactionPaging,
    pub filter: TransactionFilter,
}
