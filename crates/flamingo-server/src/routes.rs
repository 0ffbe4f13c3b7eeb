//! Router and request handlers.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use flamingo_weather::{find_city, group_by_day, Coordinates, ScoredPeriod};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::error::{panic_response, ApiError};
use crate::render::{self, CUSTOM_LOCATION};
use crate::state::AppState;

/// Body of `POST /`
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequest {
    pub location: String,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FragmentResponse {
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct PeriodsResponse {
    pub periods: Vec<ScoredPeriod>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index).post(forecast_fragment).fallback(not_found))
        .route("/forecast/{lat}/{lon}", get(forecast_json).fallback(not_found))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render::index_page())
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}

/// Resolve a request to a display name and coordinates without touching the network.
pub fn resolve_location(request: &ForecastRequest) -> Result<(String, Coordinates), ApiError> {
    if request.location.trim() == CUSTOM_LOCATION {
        let (Some(latitude), Some(longitude)) = (request.latitude, request.longitude) else {
            return Err(ApiError::BadRequest(
                "latitude and longitude are required for a custom location".to_string(),
            ));
        };
        let coords = Coordinates::new(latitude, longitude)?;
        return Ok((format!("{:.4}, {:.4}", latitude, longitude), coords));
    }

    let city = find_city(&request.location)
        .ok_or_else(|| ApiError::InvalidLocation(request.location.clone()))?;
    Ok((city.name.to_string(), city.coordinates()))
}

async fn scored_periods(state: &AppState, coords: Coordinates) -> Result<Vec<ScoredPeriod>, ApiError> {
    let periods = state.client.fetch_periods(coords).await?;
    Ok(periods.into_iter().map(ScoredPeriod::from).collect())
}

async fn forecast_fragment(
    State(state): State<AppState>,
    body: Result<Json<ForecastRequest>, JsonRejection>,
) -> Result<Json<FragmentResponse>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let (name, coords) = resolve_location(&request)?;
    tracing::info!("Forecast requested for {} ({})", name, coords);

    let days = group_by_day(scored_periods(&state, coords).await?);
    let html = render::forecast_fragment(&name, &days, &state.criteria);

    Ok(Json(FragmentResponse { html }))
}

async fn forecast_json(
    State(state): State<AppState>,
    path: Result<Path<(f64, f64)>, PathRejection>,
) -> Result<Json<PeriodsResponse>, ApiError> {
    let Path((lat, lon)) = path.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let coords = Coordinates::new(lat, lon)?;

    let periods = scored_periods(&state, coords).await?;
    Ok(Json(PeriodsResponse { periods }))
}
