use crate::model::booking::Booking;
use async_trait::async_trait;
use shared::error::AppResult;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BookingEvent {
    Created,
    Cancelled,
    Confirmed,
    Completed,
}

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    // 予約の状態変化を宿泊者とホテルへ通知する
    async fn notify(&self, event: BookingEvent, booking: &Booking) -> AppResult<()>;
}
