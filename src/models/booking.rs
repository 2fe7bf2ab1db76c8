use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingView {
    pub id: String,
    pub seats: Vec<String>,
    pub count: usize,
}

impl BookingView {
    pub fn new(id: impl Into<String>, seats: Vec<String>) -> Self {
        Self {
            id: id.into(),
            count: seats.len(),
            seats,
        }
    }
}
