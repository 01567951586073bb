pub mod a001_routing_slip;
pub mod a002_refund_request;
pub mod a003_transaction;
pub mod a004_eft_short_name;
