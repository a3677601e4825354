use crate::model::id::{BookingId, RoomId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use shared::error::AppResult;

pub mod code;
pub mod dni;
pub mod event;
pub mod status;
pub mod validation;

pub use status::{BookingAction, BookingStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
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
    pub details: Vec<BookingDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDetail {
    pub room_id: RoomId,
    pub guests: i32,
    pub price_at_booking: Decimal,
}

impl Booking {
    // 明細の料金の合計。保存はせず常に計算する
    pub fn total(&self) -> Decimal {
        self.details.iter().map(|d| d.price_at_booking).sum()
    }

    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    pub fn cancel(&self) -> AppResult<Booking> {
        self.apply(BookingAction::Cancel)
    }

    pub fn confirm(&self) -> AppResult<Booking> {
        self.apply(BookingAction::Confirm)
    }

    pub fn complete(&self) -> AppResult<Booking> {
        self.apply(BookingAction::Complete)
    }

    // ステータスだけを変えた新しいスナップショットを返す
    pub fn apply(&self, action: BookingAction) -> AppResult<Booking> {
        let status = self.status.transition(action)?;
        Ok(Booking {
            status,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::AppError;
    use std::str::FromStr;

    fn booking(status: BookingStatus) -> Booking {
        Booking {
            id: BookingId::new(12),
            booking_code: "NKS-AB12CD250601".into(),
            guest_name: "María Pérez".into(),
            guest_dni: "2222222222".into(),
            guest_email: "maria@example.com".into(),
            guest_phone: Some("0991234567".into()),
            booking_date: DateTime::parse_from_rfc3339("2025-06-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            check_in: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 6, 7).unwrap(),
            status,
            details: vec![
                BookingDetail {
                    room_id: RoomId::new(1),
                    guests: 2,
                    price_at_booking: Decimal::from_str("180.00").unwrap(),
                },
                BookingDetail {
                    room_id: RoomId::new(2),
                    guests: 1,
                    price_at_booking: Decimal::from_str("120.50").unwrap(),
                },
            ],
        }
    }

    #[test]
    fn total_is_the_sum_of_detail_prices() {
        let booking = booking(BookingStatus::Pending);
        assert_eq!(booking.total(), Decimal::from_str("300.50").unwrap());
        assert_eq!(booking.nights(), 4);
    }

    #[test]
    fn confirm_keeps_identity_and_guest_fields() {
        let pending = booking(BookingStatus::Pending);
        let confirmed = pending.confirm().unwrap();

        assert_eq!(confirmed.status, BookingStatus::Confirmed);
        assert_eq!(confirmed.id, pending.id);
        assert_eq!(confirmed.guest_name, pending.guest_name);
        assert_eq!(confirmed.details, pending.details);
        assert_eq!(pending.status, BookingStatus::Pending);
    }

    #[test]
    fn confirm_on_cancelled_booking_is_a_conflict() {
        let result = booking(BookingStatus::Cancelled).confirm();
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[test]
    fn full_lifecycle() {
        let completed = booking(BookingStatus::Pending)
            .confirm()
            .and_then(|b| b.complete())
            .unwrap();
        assert_eq!(completed.status, BookingStatus::Completed);
        assert!(completed.cancel().is_err());
    }
}
