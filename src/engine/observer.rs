use super::grid::Coordinate;

/// Точка подключения диагностики к ядру.
///
/// Ядро не пишет логи само: всё, что стоит отметить, уходит в наблюдателя,
/// которого передаёт владелец движка.
pub trait SeatingObserver: Send + Sync {
    fn booked(&self, _booking_id: &str, _seats: &[Coordinate]) {}

    fn cancelled(&self, _booking_id: &str, _released: usize) {}

    fn insufficient_capacity(&self, _requested: usize, _available: usize) {}

    fn booking_rejected(&self, _booking_id: &str, _reason: &str) {}
}

/// Наблюдатель по умолчанию — ничего не делает.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl SeatingObserver for NoopObserver {}
