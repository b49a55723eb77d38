pub mod confirmation_qr;
