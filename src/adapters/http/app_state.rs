use std::sync::Arc;

use crate::domain::confirmation_link::SchemePolicy;
use crate::ports::order_repository::OrderRepository;
use crate::ports::qr_renderer::QrRenderer;

#[derive(Clone)]
pub struct AppState {
    pub orders: Arc<dyn OrderRepository>,
    pub qr_renderer: Arc<dyn QrRenderer>,
    pub scheme_policy: SchemePolicy,
}

impl AppState {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        qr_renderer: Arc<dyn QrRenderer>,
        scheme_policy: SchemePolicy,
    ) -> Self {
        Self {
            orders,
            qr_renderer,
            scheme_policy,
        }
    }
}
