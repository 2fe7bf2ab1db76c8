use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SeatStatus {
    Free,
    Booked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatView {
    pub label: String,
    pub number: usize,
    pub status: SeatStatus,
    pub booking_id: Option<String>,
}

// Ряд в том порядке, в котором его видит зритель: буква + места слева направо
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowView {
    pub letter: char,
    pub seats: Vec<SeatView>,
}
