use thiserror::Error;

use crate::domain::order::Order;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderRepositoryError {
    #[error("{0}")]
    Authentication(String),
    #[error("Google Sheets error: {0}")]
    Repository(String),
    #[error("Spreadsheet request timed out after {0}s")]
    Timeout(u64),
    #[error("Order not found")]
    NotFound(String),
}

#[async_trait::async_trait]
pub trait OrderRepository: Send + Sync {
    /// Every order currently in the sheet. A sheet without data rows yields an
    /// empty list, not an error.
    async fn list_orders(&self) -> error_stack::Result<Vec<Order>, OrderRepositoryError>;

    /// The order whose `order_id` equals `order_id` exactly.
    async fn get_order(&self, order_id: &str)
        -> error_stack::Result<Order, OrderRepositoryError>;
}
