//! HTTP surface over the simulation service

pub mod error;
pub mod routes;
pub mod state;

use std::net::SocketAddr;

use axum::extract::Request;
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;

pub use error::{HttpApiError, ServerError};
pub use state::AppState;

use crate::simulation::Simulation;

/// Bind `addr` and serve until the process exits
pub async fn serve(addr: SocketAddr, sim: Simulation) -> Result<(), ServerError> {
    let app = router(AppState::new(sim));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/api/state", get(routes::get_state))
        .route("/api/locations", get(routes::get_locations))
        .route("/api/market-report", get(routes::get_market_report))
        .route("/api/update", post(routes::update_state))
        .route("/api/reset", post(routes::reset_state))
        .route("/api/events", post(routes::trigger_event))
        .route("/api/ai-chat", post(routes::ai_chat))
        .route("/api/advance-day", post(routes::advance_day))
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

fn apply_cors_headers(headers: &mut axum::http::HeaderMap) {
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static("GET,POST,OPTIONS"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static("*"),
    );
}
