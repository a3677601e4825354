use kernel::model::{
    id::{HotelId, RoomId},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_available() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateRoomRequest {
    pub hotel_id: HotelId,
    pub room_number: String,
    pub room_type: Option<String>,
    pub price_per_night: Decimal,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            hotel_id,
            room_number,
            room_type,
            price_per_night,
            is_available,
        } = value;
        CreateRoom::new(hotel_id, room_number, room_type, price_per_night, is_available)
    }
}

pub type UpdateRoomRequest = CreateRoomRequest;

impl CreateRoomRequest {
    pub fn into_update(self, room_id: RoomId) -> UpdateRoom {
        UpdateRoom::new(
            room_id,
            self.hotel_id,
            self.room_number,
            self.room_type,
            self.price_per_night,
            self.is_available,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: RoomId,
    pub hotel_id: HotelId,
    pub room_number: String,
    pub room_type: Option<String>,
    pub price_per_night: Decimal,
    pub is_available: bool,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
            id,
            hotel_id,
            room_number,
            room_type,
            price_per_night,
            is_available,
        } = value;
        Self {
            id,
            hotel_id,
            room_number,
            room_type,
            price_per_night,
            is_available,
        }
    }
}
