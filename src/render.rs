//! Текстовая схема зала для терминала и `GET /api/seating-map`.
//!
//! ```text
//!    S C R E E N
//! --------------------
//! C .   .   #   #   .
//! B .   o   o   .   .
//! A .   .   .   .   .
//!   1   2   3   4   5
//! ```

use std::collections::HashSet;

use crate::engine::{Cell, Coordinate, SeatingEngine};

const SCREEN: &str = "S C R E E N";
const FREE: char = '.';
const BOOKED: char = '#';
const SELECTED: char = 'o';

/// Что подсвечивать на схеме.
#[derive(Debug, Clone, Copy, Default)]
pub enum Highlight<'a> {
    #[default]
    None,
    /// Места существующей брони.
    Booking(&'a str),
    /// Подобранные, но ещё не забронированные места.
    Pending(&'a [Coordinate]),
}

pub fn seating_map(engine: &SeatingEngine, highlight: Highlight<'_>) -> String {
    let width = engine.seats_per_row() * 4;
    let padding = width.saturating_sub(SCREEN.len()) / 2;
    let pending: HashSet<Coordinate> = match highlight {
        Highlight::Pending(seats) => seats.iter().copied().collect(),
        _ => HashSet::new(),
    };

    let mut out = String::new();
    out.push_str(&" ".repeat(padding));
    out.push_str(SCREEN);
    out.push('\n');
    out.push_str(&"-".repeat(width));
    out.push('\n');

    for (row, cells) in engine.seat_rows().enumerate() {
        let letter = engine.row_letter(row).unwrap_or('?');
        out.push(letter);
        out.push(' ');

        for (col, cell) in cells.iter().enumerate() {
            let glyph = glyph(cell, &highlight, pending.contains(&Coordinate::new(row, col)));
            out.push(glyph);
            if col + 1 < cells.len() {
                out.push_str("   ");
            }
        }
        out.push('\n');
    }

    out.push_str("  ");
    let footer: Vec<String> = (1..=engine.seats_per_row())
        .map(|n| format!("{:<3}", n))
        .collect();
    out.push_str(footer.join(" ").trim_end());
    out.push('\n');
    out
}

fn glyph(cell: &Cell, highlight: &Highlight<'_>, pending: bool) -> char {
    match (cell, highlight) {
        (Cell::Occupied(id), Highlight::Booking(current)) if id == current => SELECTED,
        (Cell::Occupied(_), _) => BOOKED,
        (Cell::Empty, _) if pending => SELECTED,
        (Cell::Empty, _) => FREE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_screen_rows_and_footer() {
        let mut cinema = SeatingEngine::create("Friends", 3, 5);
        cinema
            .book(vec![Coordinate::new(0, 2), Coordinate::new(0, 3)], "BK0001")
            .unwrap();
        cinema.book(vec![Coordinate::new(1, 1)], "BK0002").unwrap();

        let map = seating_map(&cinema, Highlight::Booking("BK0002"));
        let lines: Vec<&str> = map.lines().collect();

        assert_eq!(lines[0], "    S C R E E N");
        assert_eq!(lines[1], "-".repeat(20));
        assert_eq!(lines[2], "C .   .   #   #   .");
        assert_eq!(lines[3], "B .   o   .   .   .");
        assert_eq!(lines[4], "A .   .   .   .   .");
        assert_eq!(lines[5], "  1   2   3   4   5");
    }

    #[test]
    fn pending_seats_are_highlighted() {
        let cinema = SeatingEngine::create("Friends", 1, 3);
        let pending = cinema.allocate_default(2).unwrap().unwrap();

        let map = seating_map(&cinema, Highlight::Pending(&pending));
        assert!(map.contains("A .   o   o"));
    }

    #[test]
    fn wide_footer_keeps_two_digit_columns() {
        let cinema = SeatingEngine::create("Dunkirk", 2, 20);
        let map = seating_map(&cinema, Highlight::None);
        let footer = map.lines().last().unwrap();
        assert!(footer.starts_with("  1   2"));
        assert!(footer.contains("9   10  11"));
        assert!(footer.ends_with("20"));
    }

    #[test]
    fn narrow_hall_has_no_screen_padding() {
        let cinema = SeatingEngine::create("Dunkirk", 1, 2);
        let map = seating_map(&cinema, Highlight::None);
        let lines: Vec<&str> = map.lines().collect();
        assert_eq!(lines[0], "S C R E E N");
        assert_eq!(lines[1], "--------");
        assert_eq!(lines[2], "A .   .");
    }
}
