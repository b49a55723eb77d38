use std::{fmt::Debug, sync::Arc, time::Duration};

use error_stack::{report, Report};
use tracing::instrument;

use crate::domain::order::{orders_from_rows, Order};
use crate::domain::sheets::a1_notation::A1Notation;
use crate::ports::order_repository::{OrderRepository, OrderRepositoryError};
use crate::ports::spreadsheet::SpreadsheetConnector;

/// Orders backed by a fixed range of one sheet tab, re-read on every call.
pub struct SpreadsheetOrderRepository {
    connector: Arc<dyn SpreadsheetConnector>,
    range: A1Notation,
    request_timeout: Duration,
}

impl Debug for SpreadsheetOrderRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadsheetOrderRepository")
            .field("range", &self.range)
            .field("request_timeout", &self.request_timeout)
            .finish_non_exhaustive()
    }
}

impl SpreadsheetOrderRepository {
    pub fn new(
        connector: Arc<dyn SpreadsheetConnector>,
        range: A1Notation,
        request_timeout: Duration,
    ) -> Self {
        Self {
            connector,
            range,
            request_timeout,
        }
    }

    async fn fetch_rows(&self) -> error_stack::Result<Vec<Vec<String>>, OrderRepositoryError> {
        let reader = self
            .connector
            .connect()
            .await
            .map_err(|report| wrap(report, OrderRepositoryError::Authentication))?;

        reader
            .read_rows(&self.range)
            .await
            .map_err(|report| wrap(report, OrderRepositoryError::Repository))
    }
}

/// Keeps the lower report as the cause while surfacing its message in the new context.
fn wrap<C>(
    report: Report<C>,
    context: impl FnOnce(String) -> OrderRepositoryError,
) -> Report<OrderRepositoryError>
where
    C: error_stack::Context,
{
    let message = report.current_context().to_string();
    report.change_context(context(message))
}

#[async_trait::async_trait]
impl OrderRepository for SpreadsheetOrderRepository {
    #[instrument(skip(self), fields(range = %self.range))]
    async fn list_orders(&self) -> error_stack::Result<Vec<Order>, OrderRepositoryError> {
        let rows = tokio::time::timeout(self.request_timeout, self.fetch_rows())
            .await
            .map_err(|_| report!(OrderRepositoryError::Timeout(self.request_timeout.as_secs())))??;

        let orders = orders_from_rows(&rows);
        tracing::debug!(orders = orders.len(), "orders loaded");

        Ok(orders)
    }

    #[instrument(skip(self), fields(range = %self.range))]
    async fn get_order(
        &self,
        order_id: &str,
    ) -> error_stack::Result<Order, OrderRepositoryError> {
        self.list_orders()
            .await?
            .into_iter()
            .find(|order| order.order_id() == Some(order_id))
            .ok_or_else(|| report!(OrderRepositoryError::NotFound(order_id.to_owned())))
    }
}
