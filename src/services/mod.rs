pub mod booking;
pub mod observer;

pub use booking::{BookingService, Placement, SeatRequest};
pub use observer::TracingObserver;
