use crate::model::{
    hotel::{
        event::{CreateHotel, UpdateHotel},
        Hotel,
    },
    id::HotelId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait HotelRepository: Send + Sync {
    // すべてのホテルを取得する
    async fn find_all(&self) -> AppResult<Vec<Hotel>>;
    async fn find_by_id(&self, hotel_id: HotelId) -> AppResult<Option<Hotel>>;
    async fn exists_by_id(&self, hotel_id: HotelId) -> AppResult<bool>;
    // 名前と住所の組み合わせが使われているか。excluding の ID は対象外
    async fn exists_by_name_and_address(
        &self,
        name: &str,
        address: &str,
        excluding: Option<HotelId>,
    ) -> AppResult<bool>;
    async fn exists_by_email(&self, email: &str, excluding: Option<HotelId>) -> AppResult<bool>;
    async fn create(&self, event: CreateHotel) -> AppResult<Hotel>;
    async fn update(&self, event: UpdateHotel) -> AppResult<Hotel>;
    async fn delete(&self, hotel_id: HotelId) -> AppResult<()>;
}
