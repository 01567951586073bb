use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::paging::is_blank;

/// Lifecycle status of a routing slip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoutingSlipStatus {
    Active,
    Complete,
    Bounced,
    Nsf,
    Linked,
    Hold,
    Void,
    Correction,
    RefundRequested,
    RefundAuthorized,
    RefundProcessed,
    RefundUploaded,
    RefundRejected,
    WriteOffRequested,
    WriteOffAuthorized,
    WriteOffCompleted,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingSlipPayment {
    #[serde(default)]
    pub cheque_receipt_number: Option<String>,
    #[serde(default)]
    pub paid_amount: f64,
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    #[serde(default)]
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingSlipAccount {
    #[serde(default)]
    pub account_name: Option<String>,
}

/// Routing slip row as returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingSlipDto {
    pub id: i64,
    pub number: String,
    pub status: RoutingSlipStatus,
    #[serde(default)]
    pub routing_slip_date: Option<NaiveDate>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub remaining_amount: f64,
    #[serde(default)]
    pub payment_account: Option<RoutingSlipAccount>,
    #[serde(default)]
    pub payments: Vec<RoutingSlipPayment>,
    #[serde(default)]
    pub created_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl DateFilter {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

/// Search criteria for `POST /fas/routing-slips/queries`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingSlipFilter {
    #[serde(default, skip_serializing_if = "is_blank")]
    pub routing_slip_number: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub receipt_number: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub account_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub initiator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RoutingSlipStatus>,
    #[serde(default, skip_serializing_if = "DateFilter::is_empty")]
    pub date_filter: DateFilter,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub cheque_receipt_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_amount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_status_does_not_fail_decode() {
        let dto: RoutingSlipDto = serde_json::from_value(json!({
            "id": 7,
            "number": "123456789",
            "status": "SOMETHING_NEW"
        }))
        .unwrap();
        assert_eq!(dto.status, RoutingSlipStatus::Unknown);
        assert!(dto.payments.is_empty());
    }

    #[test]
    fn test_empty_filter_serializes_to_empty_object() {
        let filter = RoutingSlipFilter {
            account_name: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&filter).unwrap(), json!({}));
    }

    #[test]
    fn test_filter_wire_names() {
        let filter = RoutingSlipFilter {
            routing_slip_number: Some("123".into()),
            status: Some(RoutingSlipStatus::RefundRequested),
            date_filter: DateFilter {
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
                end_date: None,
            },
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "routingSlipNumber": "123",
                "status": "REFUND_REQUESTED",
                "dateFilter": {"startDate": "2024-01-01"}
            })
        );
    }
}
