use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    config::{CinemaConfig, ConfigError},
    models::CinemaSummary,
    AppState,
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/cinema", get(get_cinema).post(setup_cinema))
}

// GET /api/cinema
async fn get_cinema(State(state): State<Arc<AppState>>) -> Json<CinemaSummary> {
    Json(state.booking.summary().await)
}

// POST /api/cinema - новый сеанс вместо текущего
#[derive(Debug, Deserialize)]
struct SetupCinemaRequest {
    pub title: String,
    pub rows: usize,
    pub seats_per_row: usize,
}

async fn setup_cinema(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SetupCinemaRequest>,
) -> Result<Json<CinemaSummary>, (StatusCode, String)> {
    let cinema = CinemaConfig {
        title: req.title.trim().to_string(),
        rows: req.rows,
        seats_per_row: req.seats_per_row,
    };

    state
        .booking
        .setup(cinema)
        .await
        .map(Json)
        .map_err(config_error_response)
}

fn config_error_response(e: ConfigError) -> (StatusCode, String) {
    let status = match &e {
        ConfigError::OutOfBounds { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ConfigError::Empty(_) | ConfigError::Invalid { .. } => StatusCode::BAD_REQUEST,
    };
    (status, e.to_string())
}
