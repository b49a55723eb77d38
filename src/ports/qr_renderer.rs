use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrRenderError {
    #[error("Failed to encode QR code: {0}")]
    Encode(String),
    #[error("Failed to write QR code PNG: {0}")]
    Png(String),
}

/// Turns a payload into a PNG image of its QR code.
pub trait QrRenderer: Send + Sync {
    fn render_png(&self, payload: &str) -> error_stack::Result<Vec<u8>, QrRenderError>;
}
