//! engine
//!
//! Ядро зала: сетка мест, перевод рядов в буквы и обратно, подбор мест
//! (см. `allocation`), бронирование и отмена.
//!
//! Движок синхронный и однопоточный. Подбор мест не меняет состояние, поэтому
//! между `allocate_*` и `book` владелец обязан не допускать чужих изменений
//! (HTTP-слой держит один мьютекс на всю связку).

pub mod allocation;
pub mod grid;
pub mod observer;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

pub use grid::{Cell, Coordinate};
pub use observer::{NoopObserver, SeatingObserver};

use crate::error::{SeatingError, SeatingResult};
use grid::Grid;

pub const MAX_ROWS: usize = 26;
pub const MAX_SEATS_PER_ROW: usize = 50;
pub const BOOKING_ID_PREFIX: &str = "BK";

/// Бронь: идентификатор и упорядоченный список мест.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: String,
    pub seats: Vec<Coordinate>,
}

pub struct SeatingEngine {
    title: String,
    grid: Grid,
    available_seats: usize,
    booking_counter: u64,
    bookings: HashMap<String, Vec<Coordinate>>,
    // порядок создания броней
    booking_order: Vec<String>,
    observer: Arc<dyn SeatingObserver>,
}

impl std::fmt::Debug for SeatingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeatingEngine")
            .field("title", &self.title)
            .field("rows", &self.rows())
            .field("seats_per_row", &self.seats_per_row())
            .field("available_seats", &self.available_seats)
            .field("bookings", &self.booking_order.len())
            .finish()
    }
}

impl SeatingEngine {
    /// Создаёт пустой зал. Размеры зажимаются в `[1, 26]` рядов и `[1, 50]` мест.
    pub fn create(title: impl Into<String>, rows: usize, seats_per_row: usize) -> Self {
        let rows = rows.clamp(1, MAX_ROWS);
        let seats_per_row = seats_per_row.clamp(1, MAX_SEATS_PER_ROW);

        Self {
            title: title.into(),
            grid: Grid::new(rows, seats_per_row),
            available_seats: rows * seats_per_row,
            booking_counter: 0,
            bookings: HashMap::new(),
            booking_order: Vec::new(),
            observer: Arc::new(NoopObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn SeatingObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn seats_per_row(&self) -> usize {
        self.grid.seats_per_row()
    }

    pub fn total_seats(&self) -> usize {
        self.rows() * self.seats_per_row()
    }

    pub fn available_seats(&self) -> usize {
        self.available_seats
    }

    /* ---------- ряды и метки ---------- */

    /// Буква ряда: `'A'` — ближайший к экрану ряд, то есть наибольший индекс.
    pub fn row_letter(&self, row: usize) -> SeatingResult<char> {
        if row >= self.rows() {
            return Err(SeatingError::OutOfRange(format!(
                "row index {} (grid has {} rows)",
                row,
                self.rows()
            )));
        }
        let offset = (self.rows() - row - 1) as u8;
        Ok(char::from(b'A' + offset))
    }

    /// Индекс ряда по букве, регистр не важен.
    pub fn row_index(&self, letter: char) -> SeatingResult<usize> {
        if !letter.is_ascii_alphabetic() {
            return Err(SeatingError::InvalidArgument(format!(
                "'{}' is not a row letter",
                letter
            )));
        }
        let offset = (letter.to_ascii_uppercase() as u8 - b'A') as usize;
        if offset >= self.rows() {
            return Err(SeatingError::OutOfRange(format!(
                "row {} (last row is {})",
                letter.to_ascii_uppercase(),
                char::from(b'A' + (self.rows() - 1) as u8)
            )));
        }
        Ok(self.rows() - offset - 1)
    }

    /// Метка вида `B5`: буква ряда и номер места с единицы.
    pub fn seat_label(&self, at: Coordinate) -> SeatingResult<String> {
        self.check_bounds(at.row, at.col)?;
        Ok(format!("{}{}", self.row_letter(at.row)?, at.col + 1))
    }

    /// Разбирает метку вида `B5` (или `b5`) в координату.
    pub fn parse_seat_label(&self, label: &str) -> SeatingResult<Coordinate> {
        let label = label.trim();
        let mut chars = label.chars();
        let letter = chars
            .next()
            .ok_or_else(|| SeatingError::InvalidArgument("empty seat position".to_string()))?;

        let digits = chars.as_str();
        let malformed = || {
            SeatingError::InvalidArgument(format!(
                "seat position '{}' must look like A1, B5",
                label
            ))
        };
        // `usize::from_str` пропускает ведущий `+`
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }
        let number: usize = digits.parse().map_err(|_| malformed())?;

        let row = self.row_index(letter)?;
        if number == 0 || number > self.seats_per_row() {
            return Err(SeatingError::OutOfRange(format!(
                "seat number {} (row has {} seats)",
                number,
                self.seats_per_row()
            )));
        }
        Ok(Coordinate::new(row, number - 1))
    }

    /* ---------- занятость ---------- */

    /// `false` для занятых мест и для координат вне зала.
    pub fn is_available(&self, row: usize, col: usize) -> bool {
        self.grid.is_empty(row, col)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.get(row, col)
    }

    /// Ряды сетки по возрастанию индекса, для отрисовки.
    pub fn seat_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.iter_rows()
    }

    pub fn snapshot(&self) -> Vec<Vec<Cell>> {
        self.seat_rows().map(<[Cell]>::to_vec).collect()
    }

    pub(crate) fn check_bounds(&self, row: usize, col: usize) -> SeatingResult<()> {
        if self.grid.contains(row, col) {
            Ok(())
        } else {
            Err(SeatingError::OutOfRange(format!(
                "seat ({}, {}) outside {}x{} grid",
                row,
                col,
                self.rows(),
                self.seats_per_row()
            )))
        }
    }

    /* ---------- брони ---------- */

    pub fn next_booking_id(&mut self) -> String {
        self.booking_counter += 1;
        format!("{}{:04}", BOOKING_ID_PREFIX, self.booking_counter)
    }

    /// Занимает места под бронь. Все проверки выполняются до изменения сетки,
    /// так что при ошибке состояние не меняется.
    pub fn book(
        &mut self,
        seats: Vec<Coordinate>,
        booking_id: impl Into<String>,
    ) -> SeatingResult<String> {
        let booking_id = booking_id.into();

        if let Err(e) = self.validate_booking(&seats, &booking_id) {
            self.observer.booking_rejected(&booking_id, &e.to_string());
            return Err(e);
        }

        let cell = Cell::Occupied(booking_id.clone());
        for &at in &seats {
            self.grid.set(at, cell.clone());
        }
        self.available_seats -= seats.len();
        self.observer.booked(&booking_id, &seats);

        self.bookings.insert(booking_id.clone(), seats);
        self.booking_order.push(booking_id.clone());
        Ok(booking_id)
    }

    fn validate_booking(&self, seats: &[Coordinate], booking_id: &str) -> SeatingResult<()> {
        if seats.is_empty() {
            return Err(SeatingError::InvalidArgument(
                "a booking needs at least one seat".to_string(),
            ));
        }
        if booking_id.is_empty() {
            return Err(SeatingError::InvalidArgument(
                "booking id must not be empty".to_string(),
            ));
        }
        if self.bookings.contains_key(booking_id) {
            return Err(SeatingError::DuplicateBooking(booking_id.to_string()));
        }
        self.validate_seats(seats)
    }

    /// Места в пределах зала, свободны и не повторяются.
    pub(crate) fn validate_seats(&self, seats: &[Coordinate]) -> SeatingResult<()> {
        let mut seen = HashSet::with_capacity(seats.len());
        for &at in seats {
            self.check_bounds(at.row, at.col)?;
            if !self.is_available(at.row, at.col) || !seen.insert(at) {
                return Err(SeatingError::SeatUnavailable {
                    label: self.seat_label(at)?,
                });
            }
        }
        Ok(())
    }

    /// Снимает бронь целиком. `false`, если такой брони нет.
    pub fn cancel(&mut self, booking_id: &str) -> bool {
        let Some(seats) = self.bookings.remove(booking_id) else {
            return false;
        };

        for &at in &seats {
            self.grid.set(at, Cell::Empty);
        }
        self.available_seats += seats.len();
        self.booking_order.retain(|id| id != booking_id);
        self.observer.cancelled(booking_id, seats.len());
        true
    }

    pub fn booking(&self, booking_id: &str) -> Option<&[Coordinate]> {
        self.bookings.get(booking_id).map(Vec::as_slice)
    }

    /// Активные брони в порядке создания.
    pub fn bookings(&self) -> impl Iterator<Item = Booking> + '_ {
        self.booking_order.iter().filter_map(|id| {
            self.bookings.get(id).map(|seats| Booking {
                id: id.clone(),
                seats: seats.clone(),
            })
        })
    }

    pub fn booking_count(&self) -> usize {
        self.booking_order.len()
    }
}
