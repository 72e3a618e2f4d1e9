use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested (barber, date, time) slot cannot take a new
    /// appointment: past, blocked, or already booked.
    #[error("the requested slot is not available")]
    SlotUnavailable,

    #[error("{0} not found")]
    NotFound(&'static str),

    /// A supplied client/barber/service id does not resolve in its
    /// directory.
    #[error("unknown {kind} id '{id}'")]
    InvalidReference { kind: &'static str, id: String },

    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: &'static str,
    },

    /// Stock bookkeeping failed after the appointment was committed.
    /// Logged by the caller, never surfaced as a booking failure.
    #[error("could not decrement stock for product '{0}'")]
    StockDecrement(String),

    #[error("storage error")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::SlotUnavailable => "slot_unavailable",
            ApiError::NotFound(_) => "not_found",
            ApiError::InvalidReference { .. } => "invalid_reference",
            ApiError::Validation { .. } => "invalid_input",
            ApiError::StockDecrement(_) => "stock_decrement_failed",
            ApiError::Storage(_) => "storage_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::SlotUnavailable => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidReference { .. } | ApiError::Validation { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::StockDecrement(_) | ApiError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Storage(err) = self {
            log::error!("storage error: {err}");
        }
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }))
    }
}
