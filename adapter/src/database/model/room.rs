use kernel::model::{
    id::{HotelId, RoomId},
    room::Room,
};
use rust_decimal::Decimal;

#[derive(sqlx::FromRow)]
pub struct RoomRow {
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub room_number: String,
    pub room_type: Option<String>,
    pub price_per_night: Decimal,
    pub is_available: bool,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            room_id,
            hotel_id,
            room_number,
            room_type,
            price_per_night,
            is_available,
        } = value;
        Room {
            id: room_id,
            hotel_id,
            room_number,
            room_type,
            price_per_night,
            is_available,
        }
    }
}
