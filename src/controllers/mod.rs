pub mod bookings;
pub mod cinema;
pub mod seats;

use axum::{http::StatusCode, Router};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::SeatingError;
use crate::services::SeatRequest;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(cinema::routes())
        .merge(seats::routes())
        .merge(bookings::routes())
        .merge(bookings::reset_route())
}

/* ---------- helpers ---------- */

pub(crate) fn error_response(e: SeatingError) -> (StatusCode, String) {
    let status = match &e {
        SeatingError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        SeatingError::OutOfRange(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SeatingError::SeatUnavailable { .. } | SeatingError::DuplicateBooking(_) => StatusCode::CONFLICT,
    };
    (status, e.to_string())
}

pub(crate) fn insufficient_response(available: usize) -> (StatusCode, String) {
    (
        StatusCode::CONFLICT,
        format!("Sorry, there are only {} seats available", available),
    )
}

// Тело запроса на подбор/бронь: либо количество (+ стартовая позиция), либо список мест
#[derive(Debug, Deserialize)]
pub struct SeatSelectionRequest {
    pub tickets: Option<i64>,
    pub start: Option<String>,
    pub seats: Option<Vec<String>>,
}

impl SeatSelectionRequest {
    pub fn into_seat_request(self) -> Result<SeatRequest, (StatusCode, String)> {
        if let Some(seats) = self.seats {
            if self.start.is_some() {
                return Err((StatusCode::BAD_REQUEST, "use either seats or start, not both".to_string()));
            }
            if let Some(t) = self.tickets {
                if t != seats.len() as i64 {
                    return Err((StatusCode::BAD_REQUEST, "tickets must match the number of seats".to_string()));
                }
            }
            return Ok(SeatRequest::Explicit { seats });
        }

        let tickets = match self.tickets {
            Some(t) if t > 0 => t as usize,
            Some(_) => return Err((StatusCode::BAD_REQUEST, "Number of tickets must be positive".to_string())),
            None => return Err((StatusCode::BAD_REQUEST, "tickets is required".to_string())),
        };

        Ok(match self.start {
            Some(start) => SeatRequest::FromPosition { tickets, start },
            None => SeatRequest::Auto { tickets },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(tickets: Option<i64>, start: Option<&str>, seats: Option<&[&str]>) -> SeatSelectionRequest {
        SeatSelectionRequest {
            tickets,
            start: start.map(str::to_string),
            seats: seats.map(|s| s.iter().map(|l| l.to_string()).collect()),
        }
    }

    #[test]
    fn selection_maps_to_seat_request() {
        assert_eq!(
            request(Some(3), None, None).into_seat_request().unwrap(),
            SeatRequest::Auto { tickets: 3 }
        );
        assert_eq!(
            request(Some(2), Some("B3"), None).into_seat_request().unwrap(),
            SeatRequest::FromPosition { tickets: 2, start: "B3".to_string() }
        );
        assert_eq!(
            request(None, None, Some(&["A1", "A2"][..])).into_seat_request().unwrap(),
            SeatRequest::Explicit { seats: vec!["A1".to_string(), "A2".to_string()] }
        );
    }

    #[test]
    fn selection_rejects_bad_input() {
        for bad in [
            request(Some(0), None, None),
            request(Some(-1), None, None),
            request(None, None, None),
            request(Some(3), None, Some(&["A1"][..])),
            request(None, Some("A1"), Some(&["A1"][..])),
        ] {
            let (status, _) = bad.into_seat_request().unwrap_err();
            assert_eq!(status, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn errors_map_to_statuses() {
        let cases = [
            (SeatingError::InvalidArgument("x".into()), StatusCode::BAD_REQUEST),
            (SeatingError::OutOfRange("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (SeatingError::SeatUnavailable { label: "A1".into() }, StatusCode::CONFLICT),
            (SeatingError::DuplicateBooking("BK0001".into()), StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(error_response(err).0, status);
        }
    }
}
