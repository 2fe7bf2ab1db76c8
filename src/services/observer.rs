use tracing::{debug, info, warn};

use crate::engine::{Coordinate, SeatingObserver};

/// Пробрасывает события движка в `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SeatingObserver for TracingObserver {
    fn booked(&self, booking_id: &str, seats: &[Coordinate]) {
        info!("🎟️ Booking {} confirmed for {} seats", booking_id, seats.len());
        debug!("Booking {} seats: {:?}", booking_id, seats);
    }

    fn cancelled(&self, booking_id: &str, released: usize) {
        info!("Booking {} cancelled, {} seats released", booking_id, released);
    }

    fn insufficient_capacity(&self, requested: usize, available: usize) {
        warn!("Requested {} seats but only {} available", requested, available);
    }

    fn booking_rejected(&self, booking_id: &str, reason: &str) {
        warn!("Booking {} rejected: {}", booking_id, reason);
    }
}
