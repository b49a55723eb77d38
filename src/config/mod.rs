pub mod app_config;
pub mod log_config;
pub mod qr_config;
pub mod server_config;
pub mod sheets_config;
