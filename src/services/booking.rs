//! booking.rs
//!
//! Сервисный слой над `SeatingEngine` для HTTP-обработчиков.
//!
//! Движок лежит за одним `tokio::sync::Mutex`: подбор мест и бронь выполняются
//! под одной блокировкой, поэтому между ними никто не успевает занять те же места.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    config::{CinemaConfig, ConfigError},
    engine::{Cell, Coordinate, SeatingEngine, SeatingObserver},
    error::{SeatingError, SeatingResult},
    models::{BookingView, CinemaSummary, RowView, SeatStatus, SeatView},
    render::{self, Highlight},
};

/// Как клиент хочет получить места.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeatRequest {
    /// Подбор по умолчанию: дальний ряд, от центра.
    Auto { tickets: usize },
    /// От позиции вида `B3` вправо, с переливом к экрану.
    FromPosition { tickets: usize, start: String },
    /// Конкретные места, уже выбранные клиентом (например, после предпросмотра).
    Explicit { seats: Vec<String> },
}

/// Итог подбора: места нашлись или их не хватает.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement<T> {
    Placed(T),
    InsufficientCapacity { available: usize },
}

pub struct BookingService {
    engine: Mutex<SeatingEngine>,
    observer: Arc<dyn SeatingObserver>,
}

impl BookingService {
    pub fn new(cinema: CinemaConfig, observer: Arc<dyn SeatingObserver>) -> Self {
        let engine = build_engine(&cinema, observer.clone());
        Self {
            engine: Mutex::new(engine),
            observer,
        }
    }

    pub async fn summary(&self) -> CinemaSummary {
        summarize(&*self.engine.lock().await)
    }

    /// Новый сеанс: другой фильм и/или размер зала. Старые брони пропадают.
    pub async fn setup(&self, cinema: CinemaConfig) -> Result<CinemaSummary, ConfigError> {
        cinema.validate()?;

        let mut engine = self.engine.lock().await;
        let dropped = engine.booking_count();
        *engine = build_engine(&cinema, self.observer.clone());
        info!(
            "Cinema '{}' set up with {} rows x {} seats, {} bookings dropped",
            cinema.title, cinema.rows, cinema.seats_per_row, dropped
        );
        Ok(summarize(&engine))
    }

    pub async fn seat_rows(&self) -> Vec<RowView> {
        let engine = self.engine.lock().await;
        engine
            .seat_rows()
            .enumerate()
            .filter_map(|(row, cells)| {
                let letter = engine.row_letter(row).ok()?;
                let seats = cells
                    .iter()
                    .enumerate()
                    .map(|(col, cell)| SeatView {
                        label: format!("{}{}", letter, col + 1),
                        number: col + 1,
                        status: match cell {
                            Cell::Empty => SeatStatus::Free,
                            Cell::Occupied(_) => SeatStatus::Booked,
                        },
                        booking_id: cell.booking_id().map(str::to_string),
                    })
                    .collect();
                Some(RowView { letter, seats })
            })
            .collect()
    }

    pub async fn seating_map(&self, highlight: Option<&str>) -> String {
        let engine = self.engine.lock().await;
        let highlight = highlight.map_or(Highlight::None, Highlight::Booking);
        render::seating_map(&engine, highlight)
    }

    /// Предпросмотр: подбирает места, ничего не занимая.
    pub async fn preview(&self, request: &SeatRequest) -> SeatingResult<Placement<(Vec<String>, String)>> {
        let engine = self.engine.lock().await;
        let Some(seats) = resolve(&engine, request)? else {
            return Ok(insufficient(&engine));
        };

        // те же проверки мест, что и в `book`
        engine.validate_seats(&seats)?;

        let map = render::seating_map(&engine, Highlight::Pending(&seats));
        Ok(Placement::Placed((labels(&engine, &seats), map)))
    }

    /// Подбор + бронь одной транзакцией.
    pub async fn book(&self, request: &SeatRequest) -> SeatingResult<Placement<BookingView>> {
        let mut engine = self.engine.lock().await;
        let Some(seats) = resolve(&engine, request)? else {
            return Ok(insufficient(&engine));
        };

        let booking_id = engine.next_booking_id();
        let booking_id = engine.book(seats, booking_id)?;

        let seats = engine.booking(&booking_id).unwrap_or_default();
        let view = BookingView::new(booking_id, labels(&engine, seats));
        Ok(Placement::Placed(view))
    }

    pub async fn bookings(&self) -> Vec<BookingView> {
        let engine = self.engine.lock().await;
        engine
            .bookings()
            .map(|b| BookingView::new(b.id, labels(&engine, &b.seats)))
            .collect()
    }

    pub async fn booking(&self, booking_id: &str) -> Option<BookingView> {
        let engine = self.engine.lock().await;
        engine
            .booking(booking_id)
            .map(|seats| BookingView::new(booking_id, labels(&engine, seats)))
    }

    pub async fn cancel(&self, booking_id: &str) -> bool {
        self.engine.lock().await.cancel(booking_id)
    }

    /// Очищает текущий сеанс: тот же фильм и зал, без броней.
    pub async fn reset(&self) -> usize {
        let mut engine = self.engine.lock().await;
        let dropped = engine.booking_count();
        let current = CinemaConfig {
            title: engine.title().to_string(),
            rows: engine.rows(),
            seats_per_row: engine.seats_per_row(),
        };
        *engine = build_engine(&current, self.observer.clone());
        info!("Cinema '{}' reset, {} bookings dropped", current.title, dropped);
        dropped
    }
}

fn summarize(engine: &SeatingEngine) -> CinemaSummary {
    let last = engine.row_letter(0).unwrap_or('A');
    CinemaSummary {
        title: engine.title().to_string(),
        rows: engine.rows(),
        seats_per_row: engine.seats_per_row(),
        total_seats: engine.total_seats(),
        available_seats: engine.available_seats(),
        bookings: engine.booking_count(),
        row_range: format!("A-{}", last),
    }
}

fn build_engine(cinema: &CinemaConfig, observer: Arc<dyn SeatingObserver>) -> SeatingEngine {
    SeatingEngine::create(cinema.title.clone(), cinema.rows, cinema.seats_per_row)
        .with_observer(observer)
}

fn resolve(engine: &SeatingEngine, request: &SeatRequest) -> SeatingResult<Option<Vec<Coordinate>>> {
    match request {
        SeatRequest::Auto { tickets } => engine.allocate_default(*tickets),
        SeatRequest::FromPosition { tickets, start } => {
            let at = engine.parse_seat_label(start)?;
            engine.allocate_from_position(*tickets, at.row, at.col)
        }
        SeatRequest::Explicit { seats } => {
            if seats.is_empty() {
                return Err(SeatingError::InvalidArgument(
                    "at least one seat must be selected".to_string(),
                ));
            }
            seats
                .iter()
                .map(|label| engine.parse_seat_label(label))
                .collect::<SeatingResult<Vec<_>>>()
                .map(Some)
        }
    }
}

fn insufficient<T>(engine: &SeatingEngine) -> Placement<T> {
    Placement::InsufficientCapacity {
        available: engine.available_seats(),
    }
}

fn labels(engine: &SeatingEngine, seats: &[Coordinate]) -> Vec<String> {
    seats
        .iter()
        .filter_map(|&at| engine.seat_label(at).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::NoopObserver;

    fn service(rows: usize, seats_per_row: usize) -> BookingService {
        let cinema = CinemaConfig {
            title: "Oppenheimer".to_string(),
            rows,
            seats_per_row,
        };
        BookingService::new(cinema, Arc::new(NoopObserver))
    }

    fn placed<T>(placement: Placement<T>) -> T {
        match placement {
            Placement::Placed(value) => value,
            Placement::InsufficientCapacity { available } => {
                panic!("expected seats, only {} available", available)
            }
        }
    }

    #[tokio::test]
    async fn auto_booking_takes_back_row_center() {
        let svc = service(8, 10);
        let booking = placed(svc.book(&SeatRequest::Auto { tickets: 4 }).await.unwrap());

        assert_eq!(booking.id, "BK0001");
        assert_eq!(booking.seats, vec!["A5", "A6", "A4", "A7"]);
        assert_eq!(svc.summary().await.available_seats, 76);
    }

    #[tokio::test]
    async fn preview_does_not_hold_seats() {
        let svc = service(3, 5);
        let request = SeatRequest::FromPosition { tickets: 2, start: "b4".to_string() };

        let (seats, map) = placed(svc.preview(&request).await.unwrap());
        assert_eq!(seats, vec!["B4", "B5"]);
        assert!(map.contains("B .   .   .   o   o"));
        assert_eq!(svc.summary().await.available_seats, 15);

        let booking = placed(svc.book(&request).await.unwrap());
        assert_eq!(booking.seats, seats);
    }

    #[tokio::test]
    async fn explicit_seats_are_revalidated() {
        let svc = service(3, 5);
        let first = SeatRequest::Explicit { seats: vec!["A1".to_string(), "A2".to_string()] };
        placed(svc.book(&first).await.unwrap());

        let clash = SeatRequest::Explicit { seats: vec!["A3".to_string(), "A2".to_string()] };
        assert_eq!(
            svc.book(&clash).await.unwrap_err(),
            SeatingError::SeatUnavailable { label: "A2".to_string() }
        );
        assert_eq!(
            svc.preview(&clash).await.unwrap_err(),
            SeatingError::SeatUnavailable { label: "A2".to_string() }
        );
        assert_eq!(svc.summary().await.available_seats, 13);
    }

    #[tokio::test]
    async fn preview_rejects_repeated_seats_like_book() {
        let svc = service(3, 5);
        let repeated = SeatRequest::Explicit { seats: vec!["A1".to_string(), "a1".to_string()] };

        let expected = SeatingError::SeatUnavailable { label: "A1".to_string() };
        assert_eq!(svc.preview(&repeated).await.unwrap_err(), expected);
        assert_eq!(svc.book(&repeated).await.unwrap_err(), expected);
        assert_eq!(svc.summary().await.available_seats, 15);
    }

    #[tokio::test]
    async fn setup_replaces_the_session() {
        let svc = service(2, 3);
        placed(svc.book(&SeatRequest::Auto { tickets: 2 }).await.unwrap());

        let summary = svc
            .setup(CinemaConfig { title: "Dunkirk".to_string(), rows: 4, seats_per_row: 6 })
            .await
            .unwrap();
        assert_eq!(summary.title, "Dunkirk");
        assert_eq!((summary.total_seats, summary.available_seats, summary.bookings), (24, 24, 0));
        assert_eq!(summary.row_range, "A-D");

        // сброс оставляет новый сеанс, а не исходный
        placed(svc.book(&SeatRequest::Auto { tickets: 1 }).await.unwrap());
        assert_eq!(svc.reset().await, 1);
        assert_eq!(svc.summary().await.title, "Dunkirk");
        assert_eq!(svc.summary().await.total_seats, 24);
    }

    #[tokio::test]
    async fn setup_rejects_bad_session_and_keeps_state() {
        let svc = service(2, 3);
        placed(svc.book(&SeatRequest::Auto { tickets: 2 }).await.unwrap());

        let blank = CinemaConfig { title: " ".to_string(), rows: 4, seats_per_row: 6 };
        assert!(matches!(svc.setup(blank).await, Err(ConfigError::Empty(_))));
        let huge = CinemaConfig { title: "Tenet".to_string(), rows: 27, seats_per_row: 6 };
        assert!(matches!(svc.setup(huge).await, Err(ConfigError::OutOfBounds { .. })));

        let summary = svc.summary().await;
        assert_eq!((summary.title.as_str(), summary.bookings), ("Oppenheimer", 1));
    }

    #[tokio::test]
    async fn insufficient_capacity_reports_available() {
        let svc = service(2, 2);
        assert_eq!(
            svc.book(&SeatRequest::Auto { tickets: 5 }).await.unwrap(),
            Placement::InsufficientCapacity { available: 4 }
        );
    }

    #[tokio::test]
    async fn cancel_and_reset() {
        let svc = service(2, 3);
        let booking = placed(svc.book(&SeatRequest::Auto { tickets: 2 }).await.unwrap());
        placed(svc.book(&SeatRequest::Auto { tickets: 1 }).await.unwrap());

        assert!(svc.booking(&booking.id).await.is_some());
        assert!(svc.cancel(&booking.id).await);
        assert!(!svc.cancel(&booking.id).await);
        assert!(svc.booking(&booking.id).await.is_none());
        assert_eq!(svc.bookings().await.len(), 1);

        assert_eq!(svc.reset().await, 1);
        let summary = svc.summary().await;
        assert_eq!((summary.available_seats, summary.bookings), (6, 0));

        let again = placed(svc.book(&SeatRequest::Auto { tickets: 1 }).await.unwrap());
        assert_eq!(again.id, "BK0001");
    }

    #[tokio::test]
    async fn seat_rows_report_status() {
        let svc = service(2, 3);
        placed(svc.book(&SeatRequest::Explicit { seats: vec!["A2".to_string()] }).await.unwrap());

        let rows = svc.seat_rows().await;
        assert_eq!(rows.iter().map(|r| r.letter).collect::<Vec<_>>(), vec!['B', 'A']);
        let a2 = &rows[1].seats[1];
        assert_eq!(a2.label, "A2");
        assert_eq!(a2.status, SeatStatus::Booked);
        assert_eq!(a2.booking_id.as_deref(), Some("BK0001"));
    }
}
