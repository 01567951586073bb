pub mod api;
pub mod tab_counts;
pub mod ui;
