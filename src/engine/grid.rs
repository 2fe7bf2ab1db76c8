use serde::{Deserialize, Serialize};

/// Координата места в сетке (0-based).
///
/// `row == 0` — самый дальний от экрана ряд, рост индекса приближает к экрану.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// Состояние одной ячейки зала.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(String),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn booking_id(&self) -> Option<&str> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(id) => Some(id),
        }
    }
}

/// Прямоугольная сетка `rows × seats_per_row`, хранится построчно в одном векторе.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    rows: usize,
    seats_per_row: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub(crate) fn new(rows: usize, seats_per_row: usize) -> Self {
        Self {
            rows,
            seats_per_row,
            cells: vec![Cell::Empty; rows * seats_per_row],
        }
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn seats_per_row(&self) -> usize {
        self.seats_per_row
    }

    pub(crate) fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.seats_per_row
    }

    pub(crate) fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        if !self.contains(row, col) {
            return None;
        }
        self.cells.get(row * self.seats_per_row + col)
    }

    /// Свободна ли ячейка; за пределами сетки всегда `false`.
    pub(crate) fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_empty)
    }

    pub(crate) fn set(&mut self, at: Coordinate, cell: Cell) {
        if self.contains(at.row, at.col) {
            let idx = at.row * self.seats_per_row + at.col;
            self.cells[idx] = cell;
        }
    }

    pub(crate) fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.seats_per_row)
    }
}
