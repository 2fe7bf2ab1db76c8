use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CinemaSummary {
    pub title: String,
    pub rows: usize,
    pub seats_per_row: usize,
    pub total_seats: usize,
    pub available_seats: usize,
    pub bookings: usize,
    // например "A-H"
    pub row_range: String,
}
