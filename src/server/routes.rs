//! HTTP handlers
//!
//! Bodies are read as raw bytes and parsed leniently: malformed JSON is
//! treated as an empty request instead of a 4xx rejection.

use axum::body::Bytes;
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::{EventCategory, LocationCatalog, MarketCatalog};
use crate::command::{Intent, OutcomeKind};
use crate::core::error::SimError;
use crate::core::types::Day;
use crate::server::error::HttpApiError;
use crate::server::state::AppState;
use crate::simulation::{DayReport, EventOutcome};
use crate::state::SimulationState;

const INDEX_HTML: &str = include_str!("../../static/simulation.html");

#[derive(Debug, Default, Deserialize)]
pub(crate) struct EventRequest {
    location: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ChatRequest {
    prompt: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateResponse {
    status: &'static str,
    new_state: SimulationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct MarketReportResponse {
    report: String,
    markets: MarketCatalog,
}

#[derive(Debug, Serialize)]
pub(crate) struct EventResponse {
    status: &'static str,
    /// Description of what happened
    event: Option<String>,
    #[serde(flatten)]
    outcome: Option<EventOutcome>,
    state: SimulationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatResponse {
    response: String,
    intent: Intent,
    outcome: OutcomeKind,
    state: SimulationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AdvanceDayResponse {
    new_day: Day,
    report: DayReport,
    state: SimulationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

/// Parse a body, falling back to the default value on any error
fn lenient_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    if body.is_empty() {
        return T::default();
    }
    match serde_json::from_slice(body) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!("Ignoring malformed request body: {}", err);
            T::default()
        }
    }
}

pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(crate) async fn get_state(State(app): State<AppState>) -> Json<SimulationState> {
    let sim = app.sim.lock().await;
    Json(sim.state().clone())
}

pub(crate) async fn get_locations(State(app): State<AppState>) -> Json<LocationCatalog> {
    let sim = app.sim.lock().await;
    Json(sim.catalogs().locations.clone())
}

pub(crate) async fn get_market_report(
    State(app): State<AppState>,
) -> Json<MarketReportResponse> {
    let sim = app.sim.lock().await;
    Json(MarketReportResponse {
        report: sim.market_report(),
        markets: sim.catalogs().markets.clone(),
    })
}

pub(crate) async fn update_state(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Json<UpdateResponse>, HttpApiError> {
    let partial: Value = lenient_body(&body);
    let mut sim = app.sim.lock().await;

    match sim.update(&partial).map(|_| ()) {
        Ok(()) => Ok(Json(UpdateResponse {
            status: "ok",
            new_state: sim.state().clone(),
            warning: sim.persistence_warning().map(str::to_string),
        })),
        Err(SimError::InvalidUpdate(message)) => {
            Err(HttpApiError::invalid_update(message, sim.state().clone()))
        }
        Err(other) => Err(HttpApiError::invalid_update(
            other.to_string(),
            sim.state().clone(),
        )),
    }
}

pub(crate) async fn reset_state(State(app): State<AppState>) -> Json<UpdateResponse> {
    let mut sim = app.sim.lock().await;
    let new_state = sim.reset().clone();
    Json(UpdateResponse {
        status: "ok",
        new_state,
        warning: sim.persistence_warning().map(str::to_string),
    })
}

pub(crate) async fn trigger_event(
    State(app): State<AppState>,
    body: Bytes,
) -> Json<EventResponse> {
    let request: EventRequest = lenient_body(&body);
    let category = EventCategory::from_request(request.kind.as_deref());

    let mut sim = app.sim.lock().await;
    let outcome = sim.trigger_event(request.location.as_deref(), category);
    Json(EventResponse {
        status: if outcome.is_some() { "ok" } else { "no_events" },
        event: outcome.as_ref().map(|o| o.description.clone()),
        outcome,
        state: sim.state().clone(),
        warning: sim.persistence_warning().map(str::to_string),
    })
}

pub(crate) async fn ai_chat(State(app): State<AppState>, body: Bytes) -> Json<ChatResponse> {
    let request: ChatRequest = lenient_body(&body);
    let prompt = request.prompt.unwrap_or_default();

    let mut sim = app.sim.lock().await;
    let outcome = sim.chat(&prompt);
    let warning = if outcome.mutated() {
        sim.persistence_warning().map(str::to_string)
    } else {
        None
    };
    Json(ChatResponse {
        response: outcome.response,
        intent: outcome.intent,
        outcome: outcome.kind,
        state: sim.state().clone(),
        warning,
    })
}

pub(crate) async fn advance_day(State(app): State<AppState>) -> Json<AdvanceDayResponse> {
    let mut sim = app.sim.lock().await;
    let report = sim.advance_day();
    Json(AdvanceDayResponse {
        new_day: report.new_day,
        report,
        state: sim.state().clone(),
        warning: sim.persistence_warning().map(str::to_string),
    })
}
