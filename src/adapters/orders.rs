pub mod spreadsheet_order_repository;
