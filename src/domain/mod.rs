pub mod confirmation_link;
pub mod credentials;
pub mod order;
pub mod sheets;

// Re-export commonly used types
pub use confirmation_link::*;
pub use order::*;
