pub mod app_state;
pub mod error;
pub mod handlers;
pub mod router;

pub use app_state::AppState;
pub use router::router;
