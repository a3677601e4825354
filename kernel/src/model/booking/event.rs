use crate::model::{
    id::RoomId,
    room::Room,
};
use chrono::{DateTime, Local, NaiveDate, Utc};
use derive_new::new;
use rust_decimal::Decimal;

// 外部から届いた予約リクエスト
#[derive(Debug, Clone, new)]
pub struct CreateBooking {
    pub guest_name: String,
    pub guest_dni: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub details: Vec<CreateBookingDetail>,
    pub requested_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, new)]
pub struct CreateBookingDetail {
    pub room_id: RoomId,
    pub guests: i32,
}

// 予約コードを発行し部屋を解決した、検証と保存を待つ予約
#[derive(Debug, Clone)]
pub struct BookingDraft {
    pub booking_code: String,
    pub guest_name: String,
    pub guest_dni: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub booking_date: DateTime<Utc>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub details: Vec<BookingDraftDetail>,
}

#[derive(Debug, Clone)]
pub struct BookingDraftDetail {
    pub room: Room,
    pub guests: i32,
}

impl BookingDraft {
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn room_ids(&self) -> Vec<RoomId> {
        self.details.iter().map(|d| d.room.id).collect()
    }

    // 料金は予約時点の1泊料金 × 泊数で確定する
    pub fn price_at_booking(&self, detail: &BookingDraftDetail) -> Decimal {
        detail.room.price_for_nights(self.nights())
    }
}
