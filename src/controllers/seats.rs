use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{error_response, insufficient_response, SeatSelectionRequest};
use crate::{services::Placement, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/seats", get(get_seats))
        .route("/seats/allocate", post(allocate_seats))
        .route("/seating-map", get(get_seating_map))
}

/* ---------- SEATS ---------- */

// GET /api/seats
async fn get_seats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.booking.seat_rows().await))
}

// GET /api/seating-map?highlight=BK0001
#[derive(Debug, Deserialize)]
struct SeatingMapQuery {
    highlight: Option<String>,
}

async fn get_seating_map(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SeatingMapQuery>,
) -> String {
    state.booking.seating_map(params.highlight.as_deref()).await
}

// POST /api/seats/allocate - только предпросмотр, места не занимаются
#[derive(Debug, Serialize)]
struct AllocationResponse {
    seats: Vec<String>,
    seating_map: String,
}

async fn allocate_seats(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeatSelectionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let request = req.into_seat_request()?;

    match state.booking.preview(&request).await.map_err(error_response)? {
        Placement::Placed((seats, seating_map)) => {
            Ok((StatusCode::OK, Json(AllocationResponse { seats, seating_map })))
        }
        Placement::InsufficientCapacity { available } => Err(insufficient_response(available)),
    }
}
