use thiserror::Error;

/// Ошибки ядра рассадки.
///
/// Нехватка мест сюда не входит: аллокаторы возвращают `Ok(None)`,
/// а отмена несуществующей брони — `false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeatingError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("out of range: {0}")]
    OutOfRange(String),

    #[error("seat {label} is not available")]
    SeatUnavailable { label: String },

    #[error("booking id {0} is already in use")]
    DuplicateBooking(String),
}

pub type SeatingResult<T> = Result<T, SeatingError>;
