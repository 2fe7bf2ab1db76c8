pub mod booking;
pub mod cinema;
pub mod seat;

pub use booking::BookingView;
pub use cinema::CinemaSummary;
pub use seat::{RowView, SeatStatus, SeatView};
