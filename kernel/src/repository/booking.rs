use crate::model::{
    availability::StayPeriod,
    booking::{event::BookingDraft, Booking, BookingStatus},
    id::{BookingId, RoomId},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Booking>>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    // 予約コードと DNI の両方が一致する予約を取得する
    async fn find_by_code_and_dni(
        &self,
        booking_code: &str,
        guest_dni: &str,
    ) -> AppResult<Option<Booking>>;
    async fn exists_by_id(&self, booking_id: BookingId) -> AppResult<bool>;
    async fn exists_by_booking_code(&self, booking_code: &str) -> AppResult<bool>;
    // いずれかの部屋で [check_in, check_out) と重なる予約があるか
    async fn exists_conflicting_booking(
        &self,
        room_ids: &[RoomId],
        check_in: NaiveDate,
        check_out: NaiveDate,
        excluded_statuses: &[BookingStatus],
    ) -> AppResult<bool>;
    // キャンセル以外で期間 [start, end] にかかる部屋の滞在を取得する
    async fn find_active_stays(
        &self,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<StayPeriod>>;
    async fn create(&self, draft: BookingDraft) -> AppResult<Booking>;
    // from の状態のときだけ to へ更新する
    async fn update_status(
        &self,
        booking_id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<()>;
    async fn delete(&self, booking_id: BookingId) -> AppResult<()>;
}
