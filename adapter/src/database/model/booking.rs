use std::{collections::HashMap, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    availability::StayPeriod,
    booking::{Booking, BookingDetail, BookingStatus},
    id::{BookingId, RoomId},
};
use rust_decimal::Decimal;
use shared::error::AppError;

#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub booking_code: String,
    pub guest_name: String,
    pub guest_dni: String,
    pub guest_email: String,
    pub guest_phone: Option<String>,
    pub booking_date: DateTime<Utc>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: String,
}

#[derive(sqlx::FromRow)]
pub struct BookingDetailRow {
    pub booking_id: BookingId,
    pub room_id: RoomId,
    pub guests: i32,
    pub price_at_booking: Decimal,
}

#[derive(sqlx::FromRow)]
pub struct StayRow {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl From<StayRow> for StayPeriod {
    fn from(value: StayRow) -> Self {
        StayPeriod::new(value.check_in, value.check_out)
    }
}

impl From<BookingDetailRow> for BookingDetail {
    fn from(value: BookingDetailRow) -> Self {
        BookingDetail {
            room_id: value.room_id,
            guests: value.guests,
            price_at_booking: value.price_at_booking,
        }
    }
}

impl BookingRow {
    pub fn into_booking(self, details: Vec<BookingDetail>) -> Result<Booking, AppError> {
        let BookingRow {
            booking_id,
            booking_code,
            guest_name,
            guest_dni,
            guest_email,
            guest_phone,
            booking_date,
            check_in,
            check_out,
            status,
        } = self;
        let status = BookingStatus::from_str(&status).map_err(|_| {
            AppError::ConversionEntityError(format!(
                "unknown booking status '{status}' for booking {booking_id}"
            ))
        })?;
        Ok(Booking {
            id: booking_id,
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
        })
    }
}

// 予約ごとに明細をまとめて集約を組み立てる。明細の並び順は保持する
pub fn assemble(
    rows: Vec<BookingRow>,
    detail_rows: Vec<BookingDetailRow>,
) -> Result<Vec<Booking>, AppError> {
    let mut details: HashMap<BookingId, Vec<BookingDetail>> = HashMap::new();
    for row in detail_rows {
        details.entry(row.booking_id).or_default().push(row.into());
    }
    rows.into_iter()
        .map(|row| {
            let own = details.remove(&row.booking_id).unwrap_or_default();
            row.into_booking(own)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, status: &str) -> BookingRow {
        BookingRow {
            booking_id: BookingId::new(id),
            booking_code: format!("NKS-AAAAA{id}250601"),
            guest_name: "Pedro Vera".into(),
            guest_dni: "2222222222".into(),
            guest_email: "pedro@example.com".into(),
            guest_phone: None,
            booking_date: DateTime::<Utc>::from_timestamp(1_748_772_000, 0).unwrap(),
            check_in: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            status: status.into(),
        }
    }

    fn detail(booking_id: i64, room_id: i64, cents: i64) -> BookingDetailRow {
        BookingDetailRow {
            booking_id: BookingId::new(booking_id),
            room_id: RoomId::new(room_id),
            guests: 2,
            price_at_booking: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn details_are_grouped_by_booking() {
        let bookings = assemble(
            vec![row(1, "PENDING"), row(2, "CONFIRMED"), row(3, "CANCELLED")],
            vec![detail(1, 10, 10000), detail(2, 11, 5000), detail(1, 12, 2500)],
        )
        .unwrap();

        assert_eq!(bookings.len(), 3);
        assert_eq!(
            bookings[0].details.iter().map(|d| d.room_id).collect::<Vec<_>>(),
            vec![RoomId::new(10), RoomId::new(12)]
        );
        assert_eq!(bookings[0].total(), Decimal::new(12500, 2));
        assert_eq!(bookings[1].status, BookingStatus::Confirmed);
        assert!(bookings[2].details.is_empty());
    }

    #[test]
    fn unknown_status_is_a_conversion_error() {
        let result = assemble(vec![row(1, "ARCHIVED")], vec![]);
        assert!(matches!(result, Err(AppError::ConversionEntityError(_))));
    }
}
