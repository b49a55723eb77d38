pub mod auth;
pub mod connector;
pub mod http_client;
pub mod spreadsheet_manager;
pub mod spreadsheet_read;
pub mod string_rows;
