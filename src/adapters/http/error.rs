use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use error_stack::Report;
use serde_json::json;

use crate::application::confirmation_qr::ConfirmationQrError;
use crate::ports::order_repository::OrderRepositoryError;

/// Failure of a JSON route, rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError(pub Report<OrderRepositoryError>);

impl From<Report<OrderRepositoryError>> for ApiError {
    fn from(report: Report<OrderRepositoryError>) -> Self {
        Self(report)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.current_context() {
            OrderRepositoryError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        }

        let body = json!({ "error": self.0.current_context().to_string() });
        (status, Json(body)).into_response()
    }
}

/// Failure of the QR route, rendered as plain text.
#[derive(Debug)]
pub struct QrError(pub Report<ConfirmationQrError>);

impl From<Report<ConfirmationQrError>> for QrError {
    fn from(report: Report<ConfirmationQrError>) -> Self {
        Self(report)
    }
}

impl QrError {
    pub fn status(&self) -> StatusCode {
        match self.0.current_context() {
            ConfirmationQrError::MissingOrderId | ConfirmationQrError::MissingHost => {
                StatusCode::BAD_REQUEST
            }
            ConfirmationQrError::OrderNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self.0.current_context() {
            ConfirmationQrError::MissingOrderId => "Error: Please provide an order_id.".to_string(),
            ConfirmationQrError::MissingHost => "Error: Missing Host header.".to_string(),
            ConfirmationQrError::OrderNotFound(_) => "Error: Order ID not found.".to_string(),
            other => format!("Error: {}", other),
        }
    }
}

impl IntoResponse for QrError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        }

        (status, self.message()).into_response()
    }
}
