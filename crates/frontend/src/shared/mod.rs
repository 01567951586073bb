pub mod api_error;
pub mod api_utils;
pub mod date_utils;
pub mod request_dedup;
pub mod state;
pub mod table_loader;
pub mod table_state;
