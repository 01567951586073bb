pub mod table_settings_store;
