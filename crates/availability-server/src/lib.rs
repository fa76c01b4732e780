//! HTTP front end for availability-engine.
//!
//! Endpoints:
//! - POST /availability-check       - Resolve the common slot for a JSON array of ranges
//! - GET  /is_holiday?cc=..&date=.. - `"Holiday"` or `"Not holiday"`
//! - GET  /health                   - Liveness probe
//!
//! Every failure is answered with an `{"errors": ...}` body; see [`ApiError`].

pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use availability_engine::schema::{INVALID_INPUT, MISSING_FIELD};
use availability_engine::{
    CountryCode, EngineError, FormattedSlot, SlotResolver, ValidationErrors,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Map, Value};

pub use config::ServerConfig;
pub use error::ApiError;

const INVALID_DATE: &str = "Not a valid date.";

/// Application state shared across handlers.
pub struct AppState {
    pub resolver: SlotResolver,
}

impl AppState {
    pub fn new(resolver: SlotResolver) -> Self {
        Self { resolver }
    }
}

/// Build the service router around `resolver`.
pub fn create_router(resolver: SlotResolver) -> Router {
    let state = Arc::new(AppState::new(resolver));

    Router::new()
        .route("/availability-check", post(availability_check_handler))
        .route("/is_holiday", get(is_holiday_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Resolve the slot shared by every range in the body.
///
/// The body is read raw so that a missing or malformed JSON document gets the
/// same 422 envelope as a schema failure.
async fn availability_check_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<FormattedSlot>, ApiError> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|_| EngineError::from(ValidationErrors::schema(INVALID_INPUT)))?;
    let slot = state.resolver.resolve_json(&body).await?;
    Ok(Json(slot))
}

#[derive(Debug, Deserialize)]
struct HolidayQuery {
    cc: Option<String>,
    date: Option<String>,
}

async fn is_holiday_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HolidayQuery>,
) -> Result<Json<&'static str>, ApiError> {
    let (country, date) = parse_holiday_query(&query)?;
    let holiday = state.resolver.is_holiday(date, country).await?;
    Ok(Json(if holiday { "Holiday" } else { "Not holiday" }))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn parse_holiday_query(query: &HolidayQuery) -> Result<(CountryCode, NaiveDate), ApiError> {
    let mut problems = Map::new();

    let country = match query.cc.as_deref() {
        None => {
            problems.insert("cc".to_string(), json!([MISSING_FIELD]));
            None
        }
        Some(code) => match code.parse::<CountryCode>() {
            Ok(country) => Some(country),
            Err(e) => {
                problems.insert("cc".to_string(), json!([e.to_string()]));
                None
            }
        },
    };

    let date = match query.date.as_deref() {
        None => {
            problems.insert("date".to_string(), json!([MISSING_FIELD]));
            None
        }
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                problems.insert("date".to_string(), json!([INVALID_DATE]));
                None
            }
        },
    };

    match (country, date) {
        (Some(country), Some(date)) => Ok((country, date)),
        _ => Err(ApiError::InvalidQuery(Value::Object(problems))),
    }
}
