use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::core::error::SimError;
use crate::state::SimulationState;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("server io error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Error body returned to HTTP clients. Always carries the (unchanged) state.
#[derive(Debug)]
pub struct HttpApiError {
    status: StatusCode,
    message: String,
    state: SimulationState,
}

impl HttpApiError {
    pub fn invalid_update(message: impl Into<String>, state: SimulationState) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            state,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for HttpApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "status": "error",
            "message": self.message,
            "new_state": self.state,
        });
        (self.status, Json(body)).into_response()
    }
}
