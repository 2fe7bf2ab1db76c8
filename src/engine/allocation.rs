//! Подбор мест.
//!
//! Две стратегии поверх одного примитива `allocate_from_middle`:
//! 1.  **По умолчанию**: от самого дальнего ряда (наибольший индекс) к нулевому,
//!     в каждом ряду — от центра к краям.
//! 2.  **От позиции**: сначала стартовый ряд слева направо от выбранного места,
//!     затем остаток в рядах `start_row - 1 ..= 0`, каждый от центра.
//!
//! Ни один метод здесь не меняет состояние зала. Нехватка мест — это `Ok(None)`.

use super::{Coordinate, SeatingEngine};
use crate::error::{SeatingError, SeatingResult};

/// Опорное место ряда: центр, а при чётной ширине — левое из двух центральных.
pub(crate) fn center_column(seats_per_row: usize) -> usize {
    let mid = seats_per_row / 2;
    if seats_per_row % 2 == 0 {
        mid.saturating_sub(1)
    } else {
        mid
    }
}

impl SeatingEngine {
    /// Берёт до `remaining` свободных мест в ряду `row`, расходясь от центра.
    ///
    /// На каждом шаге смещения сначала проверяется место справа, потом слева.
    /// Возвращает взятые места и их количество; ряд вне зала даёт пустой результат.
    pub fn allocate_from_middle(&self, row: usize, remaining: usize) -> (Vec<Coordinate>, usize) {
        let width = self.seats_per_row();
        let mut taken = Vec::with_capacity(remaining.min(width));
        if row >= self.rows() {
            return (taken, 0);
        }

        let mid = center_column(width);
        let mut offset = 0;

        while taken.len() < remaining && (offset <= mid || mid + offset < width) {
            let right = mid + offset;
            if right < width && self.is_available(row, right) {
                taken.push(Coordinate::new(row, right));
            }

            // на нулевом смещении левое место совпадает с правым
            if taken.len() < remaining && offset > 0 && offset <= mid {
                let left = mid - offset;
                if self.is_available(row, left) {
                    taken.push(Coordinate::new(row, left));
                }
            }

            offset += 1;
        }

        let count = taken.len();
        (taken, count)
    }

    /// Места по умолчанию: дальний ряд первым, внутри ряда — от центра.
    pub fn allocate_default(&self, num_tickets: usize) -> SeatingResult<Option<Vec<Coordinate>>> {
        ensure_positive(num_tickets)?;

        if num_tickets > self.available_seats() {
            self.observer
                .insufficient_capacity(num_tickets, self.available_seats());
            return Ok(None);
        }

        let mut seats = Vec::with_capacity(num_tickets);
        for row in (0..self.rows()).rev() {
            if seats.len() == num_tickets {
                break;
            }
            let (row_seats, _) = self.allocate_from_middle(row, num_tickets - seats.len());
            seats.extend(row_seats);
        }

        // При верном счётчике свободных мест сюда не попадаем.
        debug_assert_eq!(
            seats.len(),
            num_tickets,
            "available_seats={} does not match the empty cells in the grid",
            self.available_seats()
        );
        if seats.len() < num_tickets {
            self.observer
                .insufficient_capacity(num_tickets, self.available_seats());
            return Ok(None);
        }

        Ok(Some(seats))
    }

    /// Места от выбранной позиции с переливом в ряды ближе к нулевому индексу.
    pub fn allocate_from_position(
        &self,
        num_tickets: usize,
        start_row: usize,
        start_col: usize,
    ) -> SeatingResult<Option<Vec<Coordinate>>> {
        ensure_positive(num_tickets)?;
        self.check_bounds(start_row, start_col)?;

        if num_tickets > self.available_seats() {
            self.observer
                .insufficient_capacity(num_tickets, self.available_seats());
            return Ok(None);
        }

        let mut seats = Vec::with_capacity(num_tickets);

        // 1) стартовый ряд, слева направо
        for col in start_col..self.seats_per_row() {
            if seats.len() == num_tickets {
                break;
            }
            if self.is_available(start_row, col) {
                seats.push(Coordinate::new(start_row, col));
            }
        }

        // 2) перелив: ряды ниже по индексу, каждый от центра
        for row in (0..start_row).rev() {
            if seats.len() == num_tickets {
                break;
            }
            let (row_seats, _) = self.allocate_from_middle(row, num_tickets - seats.len());
            seats.extend(row_seats);
        }

        if seats.len() < num_tickets {
            self.observer
                .insufficient_capacity(num_tickets, self.available_seats());
            return Ok(None);
        }

        Ok(Some(seats))
    }
}

fn ensure_positive(num_tickets: usize) -> SeatingResult<()> {
    if num_tickets == 0 {
        return Err(SeatingError::InvalidArgument(
            "number of tickets must be positive".to_string(),
        ));
    }
    Ok(())
}
