use serde::{Deserialize, Serialize};

use crate::shared::paging::is_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    PendingApproval,
    Approved,
    Declined,
    #[serde(other)]
    Unknown,
}

/// Refund request row shown in the refunds table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequestDto {
    pub refund_id: i64,
    #[serde(default)]
    pub invoice_id: Option<i64>,
    pub refund_status: RefundStatus,
    #[serde(default)]
    pub refund_amount: f64,
    #[serde(default)]
    pub transaction_amount: f64,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub requested_by: Option<String>,
    #[serde(default)]
    pub requested_date: Option<String>,
    #[serde(default)]
    pub decline_reason: Option<String>,
}

/// Query parameters for `GET /refunds`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequestFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_status: Option<RefundStatus>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub requested_by: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub requested_start_date: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub requested_end_date: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub transaction_amount: Option<String>,
}
