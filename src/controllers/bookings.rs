use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{error_response, insufficient_response, SeatSelectionRequest};
use crate::{services::Placement, AppState};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", get(get_bookings))
        .route("/bookings", post(create_booking))
        .route("/bookings/cancel", patch(cancel_booking))
        .route("/bookings/{booking_id}", get(get_booking))
}

pub fn reset_route() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reset", post(reset_cinema))
}

/* ---------- BOOKINGS ---------- */

// POST /api/bookings
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SeatSelectionRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let request = req.into_seat_request()?;

    match state.booking.book(&request).await.map_err(error_response)? {
        Placement::Placed(booking) => Ok((StatusCode::CREATED, Json(booking))),
        Placement::InsufficientCapacity { available } => Err(insufficient_response(available)),
    }
}

// GET /api/bookings
async fn get_bookings(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.booking.bookings().await))
}

// GET /api/bookings/{booking_id}
async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .booking
        .booking(&booking_id)
        .await
        .map(|booking| (StatusCode::OK, Json(booking)))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Booking id {} not found", booking_id)))
}

// PATCH /api/bookings/cancel
#[derive(Debug, Deserialize)]
struct CancelBookingRequest { pub booking_id: String }

async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CancelBookingRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    if req.booking_id.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "booking_id must not be empty".to_string()));
    }

    if state.booking.cancel(req.booking_id.trim()).await {
        Ok((StatusCode::OK, Json(serde_json::json!({"message": "Booking cancelled", "booking_id": req.booking_id.trim()}))))
    } else {
        Err((StatusCode::NOT_FOUND, format!("Booking id {} not found", req.booking_id.trim())))
    }
}

// POST /api/reset - зал возвращается к состоянию из конфигурации
async fn reset_cinema(
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    tracing::warn!("🔴 RESET: dropping all bookings");
    let dropped = state.booking.reset().await;

    let response = serde_json::json!({
        "status": "success",
        "bookings_deleted": dropped,
    });

    tracing::warn!("🟢 RESET: done");
    (StatusCode::OK, Json(response))
}
