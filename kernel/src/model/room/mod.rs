use crate::model::id::{HotelId, RoomId};
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: RoomId,
    pub hotel_id: HotelId,
    pub room_number: String,
    pub room_type: Option<String>,
    pub price_per_night: Decimal,
    pub is_available: bool,
}

impl Room {
    // 予約可能な状態にしたスナップショットを返す
    pub fn mark_available(&self) -> AppResult<Room> {
        if self.is_available {
            return Err(AppError::Conflict(
                "La habitación ya está disponible".into(),
            ));
        }
        Ok(self.with_availability(true))
    }

    // 予約不可の状態にしたスナップショットを返す
    pub fn mark_unavailable(&self) -> AppResult<Room> {
        if !self.is_available {
            return Err(AppError::Conflict(
                "La habitación no está disponible".into(),
            ));
        }
        Ok(self.with_availability(false))
    }

    pub fn price_for_nights(&self, nights: i64) -> Decimal {
        self.price_per_night * Decimal::from(nights)
    }

    fn with_availability(&self, is_available: bool) -> Room {
        Room {
            is_available,
            ..self.clone()
        }
    }
}
