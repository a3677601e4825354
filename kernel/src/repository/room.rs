use crate::model::{
    id::{HotelId, RoomId},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Room>>;
    // ホテルに属する部屋を取得する
    async fn find_by_hotel(&self, hotel_id: HotelId) -> AppResult<Vec<Room>>;
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
    async fn exists_by_id(&self, room_id: RoomId) -> AppResult<bool>;
    // ホテル内で部屋番号が使われているか。excluding の ID は対象外
    async fn exists_by_hotel_and_number(
        &self,
        hotel_id: HotelId,
        room_number: &str,
        excluding: Option<RoomId>,
    ) -> AppResult<bool>;
    async fn create(&self, event: CreateRoom) -> AppResult<Room>;
    async fn update(&self, event: UpdateRoom) -> AppResult<Room>;
    async fn update_availability(&self, room_id: RoomId, is_available: bool) -> AppResult<()>;
    async fn delete(&self, room_id: RoomId) -> AppResult<()>;
}
