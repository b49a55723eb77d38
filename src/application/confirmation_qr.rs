use error_stack::{report, ResultExt};
use thiserror::Error;
use tracing::instrument;

use crate::domain::confirmation_link::{ConfirmationLink, SchemePolicy};
use crate::ports::order_repository::{OrderRepository, OrderRepositoryError};
use crate::ports::qr_renderer::QrRenderer;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationQrError {
    #[error("order_id query parameter is required")]
    MissingOrderId,
    #[error("Host header is required to build the confirmation link")]
    MissingHost,
    #[error("Order {0} not found")]
    OrderNotFound(String),
    #[error("Order {0} has no customer_type")]
    MissingCustomerType(String),
    #[error("{0}")]
    Lookup(String),
    #[error("{0}")]
    Render(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationQr {
    pub link: ConfirmationLink,
    pub png: Vec<u8>,
}

/// Looks the order up, links it to its `<customer_type>.html` page on `host` and
/// renders that link as a QR code. Input is validated before the sheet is touched.
#[instrument(skip(orders, renderer, policy))]
pub async fn generate_confirmation_qr(
    orders: &dyn OrderRepository,
    renderer: &dyn QrRenderer,
    order_id: Option<&str>,
    host: Option<&str>,
    policy: SchemePolicy,
) -> error_stack::Result<ConfirmationQr, ConfirmationQrError> {
    let order_id = order_id
        .filter(|order_id| !order_id.is_empty())
        .ok_or_else(|| report!(ConfirmationQrError::MissingOrderId))?;
    let host = host
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .ok_or_else(|| report!(ConfirmationQrError::MissingHost))?;

    let order = orders.get_order(order_id).await.map_err(|report| {
        let context = match report.current_context() {
            OrderRepositoryError::NotFound(id) => ConfirmationQrError::OrderNotFound(id.clone()),
            other => ConfirmationQrError::Lookup(other.to_string()),
        };
        report.change_context(context)
    })?;

    let customer_type = order
        .customer_type()
        .ok_or_else(|| report!(ConfirmationQrError::MissingCustomerType(order_id.to_owned())))?;

    let scheme = policy.scheme_for(host);
    let link = ConfirmationLink::build(scheme, host, customer_type, order_id);
    tracing::debug!(%link, "confirmation link built");

    let png = renderer
        .render_png(link.as_str())
        .map_err(|report| {
            let message = report.current_context().to_string();
            report.change_context(ConfirmationQrError::Render(message))
        })
        .attach_printable_lazy(|| format!("Payload: {}", link))?;

    Ok(ConfirmationQr { link, png })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::confirmation_link::Scheme;
    use crate::domain::order::Order;
    use crate::ports::qr_renderer::QrRenderError;

    /// Stands in for the PNG renderer: the "image" is the payload itself.
    struct PayloadRenderer;

    impl QrRenderer for PayloadRenderer {
        fn render_png(&self, payload: &str) -> error_stack::Result<Vec<u8>, QrRenderError> {
            Ok(payload.as_bytes().to_vec())
        }
    }

    struct FailingRenderer;

    impl QrRenderer for FailingRenderer {
        fn render_png(&self, _payload: &str) -> error_stack::Result<Vec<u8>, QrRenderError> {
            Err(report!(QrRenderError::Encode("data too long".to_string())))
        }
    }

    #[derive(Default)]
    struct InMemoryOrders {
        orders: Vec<Order>,
        fail_with: Option<OrderRepositoryError>,
        calls: AtomicUsize,
    }

    impl InMemoryOrders {
        fn with_rows(rows: &[&[&str]]) -> Self {
            let header = ["order_id", "customer_type"];
            Self {
                orders: rows.iter().map(|row| Order::from_row(&header, *row)).collect(),
                ..Default::default()
            }
        }
    }

    #[async_trait::async_trait]
    impl OrderRepository for InMemoryOrders {
        async fn list_orders(&self) -> error_stack::Result<Vec<Order>, OrderRepositoryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.fail_with {
                Some(error) => Err(report!(error.clone())),
                None => Ok(self.orders.clone()),
            }
        }

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

    #[tokio::test]
    async fn test_local_host_gets_http_link() {
        let orders = InMemoryOrders::with_rows(&[&["A1", "retail"]]);

        let confirmation = generate_confirmation_qr(
            &orders,
            &PayloadRenderer,
            Some("A1"),
            Some("localhost:3000"),
            SchemePolicy::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            confirmation.link.as_str(),
            "http://localhost:3000/retail.html?order_id=A1"
        );
        assert_eq!(confirmation.png, confirmation.link.as_str().as_bytes());
    }

    #[tokio::test]
    async fn test_public_host_gets_https_link() {
        let orders = InMemoryOrders::with_rows(&[&["B2", "wholesale"]]);

        let confirmation = generate_confirmation_qr(
            &orders,
            &PayloadRenderer,
            Some("B2"),
            Some("orders.example.com"),
            SchemePolicy::default(),
        )
        .await
        .unwrap();

        assert_eq!(
            confirmation.link.as_str(),
            "https://orders.example.com/wholesale.html?order_id=B2"
        );
    }

    #[tokio::test]
    async fn test_configured_scheme_wins() {
        let orders = InMemoryOrders::with_rows(&[&["B2", "wholesale"]]);

        let confirmation = generate_confirmation_qr(
            &orders,
            &PayloadRenderer,
            Some("B2"),
            Some("localhost:3000"),
            SchemePolicy::Fixed(Scheme::Https),
        )
        .await
        .unwrap();

        assert!(confirmation.link.as_str().starts_with("https://localhost:3000/"));
    }

    #[tokio::test]
    async fn test_missing_or_empty_order_id_skips_lookup() {
        let orders = InMemoryOrders::with_rows(&[&["A1", "retail"]]);

        for order_id in [None, Some("")] {
            let error = generate_confirmation_qr(
                &orders,
                &PayloadRenderer,
                order_id,
                Some("localhost:3000"),
                SchemePolicy::default(),
            )
            .await
            .unwrap_err();
            assert_eq!(error.current_context(), &ConfirmationQrError::MissingOrderId);
        }
        assert_eq!(orders.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_host_skips_lookup() {
        let orders = InMemoryOrders::with_rows(&[&["A1", "retail"]]);

        let error = generate_confirmation_qr(
            &orders,
            &PayloadRenderer,
            Some("A1"),
            None,
            SchemePolicy::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(error.current_context(), &ConfirmationQrError::MissingHost);
        assert_eq!(orders.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_order() {
        let orders = InMemoryOrders::with_rows(&[&["A1", "retail"]]);

        let error = generate_confirmation_qr(
            &orders,
            &PayloadRenderer,
            Some("ZZZ"),
            Some("localhost:3000"),
            SchemePolicy::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(
            error.current_context(),
            &ConfirmationQrError::OrderNotFound("ZZZ".to_string())
        );
    }

    #[tokio::test]
    async fn test_order_without_customer_type() {
        let orders = InMemoryOrders::with_rows(&[&["A1"]]);

        let error = generate_confirmation_qr(
            &orders,
            &PayloadRenderer,
            Some("A1"),
            Some("localhost:3000"),
            SchemePolicy::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(
            error.current_context(),
            &ConfirmationQrError::MissingCustomerType("A1".to_string())
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_carries_message() {
        let orders = InMemoryOrders {
            fail_with: Some(OrderRepositoryError::Repository(
                "The caller does not have permission".to_string(),
            )),
            ..Default::default()
        };

        let error = generate_confirmation_qr(
            &orders,
            &PayloadRenderer,
            Some("A1"),
            Some("localhost:3000"),
            SchemePolicy::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(
            error.current_context(),
            &ConfirmationQrError::Lookup(
                "Google Sheets error: The caller does not have permission".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_render_failure_is_reported() {
        let orders = InMemoryOrders::with_rows(&[&["A1", "retail"]]);

        let error = generate_confirmation_qr(
            &orders,
            &FailingRenderer,
            Some("A1"),
            Some("localhost:3000"),
            SchemePolicy::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(
            error.current_context(),
            &ConfirmationQrError::Render("Failed to encode QR code: data too long".to_string())
        );
    }
}
