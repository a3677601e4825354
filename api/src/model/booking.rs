use chrono::{DateTime, Local, NaiveDate, Utc};
use garde::Validate;
use kernel::model::{
    booking::{
        event::{CreateBooking, CreateBookingDetail},
        Booking, BookingDetail, BookingStatus,
    },
    id::{BookingId, RoomId},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub guest_name: String,
    pub guest_dni: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub details: Vec<BookingDetailRequest>,
}

#[derive(Debug, Deserialize)]
pub struct BookingDetailRequest {
    pub room_id: RoomId,
    pub guests: i32,
}

impl CreateBookingRequest {
    pub fn into_event(self, requested_at: DateTime<Local>) -> CreateBooking {
        let CreateBookingRequest {
            guest_name,
            guest_dni,
            guest_email,
            guest_phone,
            check_in,
            check_out,
            details,
        } = self;
        CreateBooking::new(
            guest_name,
            guest_dni,
            guest_email,
            guest_phone,
            check_in,
            check_out,
            details
                .into_iter()
                .map(|d| CreateBookingDetail::new(d.room_id, d.guests))
                .collect(),
            requested_at,
        )
    }
}

// 宿泊者本人の照会・キャンセルで使う
#[derive(Debug, Deserialize, Validate)]
pub struct BookingLookupQuery {
    #[garde(length(min = 1))]
    pub dni: String,
}

#[derive(Debug, Serialize)]
pub struct BookingDetailResponse {
    pub room_id: RoomId,
    pub guests: i32,
    pub price_at_booking: Decimal,
}

impl From<BookingDetail> for BookingDetailResponse {
    fn from(value: BookingDetail) -> Self {
        let BookingDetail {
            room_id,
            guests,
            price_at_booking,
        } = value;
        Self {
            room_id,
            guests,
            price_at_booking,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: BookingId,
    pub booking_code: String,
    pub guest_name: String,
    pub guest_dni: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub booking_date: DateTime<Utc>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    pub total: Decimal,
    pub details: Vec<BookingDetailResponse>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let total = value.total();
        let Booking {
            id,
            booking_code,
            guest_name,
            guest_dni,
            guest_email,
            guest_phone,
            booking_date,
            check_in,
            check_out,
            status,
            details,
        } = value;
        Self {
            id,
            booking_code,
            guest_name,
            guest_dni,
            guest_email,
            guest_phone,
            booking_date,
            check_in,
            check_out,
            status,
            total,
            details: details.into_iter().map(Into::into).collect(),
        }
    }
}
