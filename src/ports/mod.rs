pub mod order_repository;
pub mod qr_renderer;
pub mod spreadsheet;
