pub mod http;
pub mod orders;
pub mod qr;
pub mod sheets;
