use super::{code::BOOKING_CODE_LEN, dni::is_valid_ecuadorian_dni, event::BookingDraft};
use crate::model::validation::{char_len, is_blank, is_valid_email, MAX_EMAIL_LEN};
use chrono::NaiveDate;
use shared::error::{AppError, AppResult};

pub const MIN_GUEST_NAME_LEN: usize = 2;
pub const MAX_GUEST_NAME_LEN: usize = 100;
pub const MIN_PHONE_LEN: usize = 9;
pub const MAX_PHONE_LEN: usize = 15;
pub const MIN_PHONE_DIGITS: usize = 9;
pub const MIN_GUESTS_PER_ROOM: i32 = 1;
pub const MAX_GUESTS_PER_ROOM: i32 = 10;
pub const MAX_STAY_NIGHTS: i64 = 30;

fn invalid<T>(message: &str) -> AppResult<T> {
    Err(AppError::ValidationError(message.into()))
}

impl BookingDraft {
    // 項目、明細、日付の順に検証し、最初の違反だけを返す
    pub fn validate(&self, today: NaiveDate) -> AppResult<()> {
        self.validate_fields()?;
        self.validate_details()?;
        validate_stay(self.check_in, self.check_out, today)
    }

    // 保存済みの状態に依存する検証。重複する予約を先に、利用不可の部屋を後に見る
    pub fn ensure_bookable(&self, has_conflict: bool) -> AppResult<()> {
        if has_conflict {
            return Err(overlap_conflict(self.check_in, self.check_out));
        }
        match self.details.iter().find(|d| !d.room.is_available) {
            Some(detail) => Err(AppError::Conflict(format!(
                "La habitación {} no está disponible",
                detail.room.room_number
            ))),
            None => Ok(()),
        }
    }

    fn validate_fields(&self) -> AppResult<()> {
        if is_blank(&self.booking_code) {
            return invalid("El código de reserva es requerido");
        }
        if char_len(&self.booking_code) > BOOKING_CODE_LEN {
            return invalid("El código de reserva no puede tener más de 16 caracteres");
        }

        if is_blank(&self.guest_name) {
            return invalid("El nombre del huésped es requerido");
        }
        let name_len = char_len(&self.guest_name);
        if name_len < MIN_GUEST_NAME_LEN {
            return invalid("El nombre del huésped debe tener al menos 2 caracteres");
        }
        if name_len > MAX_GUEST_NAME_LEN {
            return invalid("El nombre del huésped no puede tener más de 100 caracteres");
        }

        if is_blank(&self.guest_dni) {
            return invalid("El DNI del huésped es requerido");
        }
        if !is_valid_ecuadorian_dni(&self.guest_dni) {
            return invalid("La cédula debe ser valida");
        }

        if is_blank(&self.guest_email) {
            return invalid("El email del huésped es requerido");
        }
        if !is_valid_email(&self.guest_email) {
            return invalid("El formato del email es inválido");
        }
        if char_len(&self.guest_email) > MAX_EMAIL_LEN {
            return invalid("El email no puede tener más de 100 caracteres");
        }

        match self.guest_phone.as_deref() {
            Some(phone) if !is_blank(phone) => validate_phone(phone),
            _ => Ok(()),
        }
    }

    fn validate_details(&self) -> AppResult<()> {
        if self.details.is_empty() {
            return invalid("La reserva debe tener al menos una habitación");
        }
        for detail in &self.details {
            if detail.guests < MIN_GUESTS_PER_ROOM {
                return invalid("El número de huéspedes debe ser mayor a 0");
            }
            if detail.guests > MAX_GUESTS_PER_ROOM {
                return invalid("El número de huéspedes no puede ser mayor a 10 por habitación");
            }
        }
        Ok(())
    }
}

fn validate_phone(phone: &str) -> AppResult<()> {
    let len = char_len(phone);
    if !(MIN_PHONE_LEN..=MAX_PHONE_LEN).contains(&len) {
        return invalid("El teléfono debe ser valido");
    }
    let allowed = |c: char| c.is_ascii_digit() || c == '+' || c == '-' || c.is_ascii_whitespace();
    if !phone.chars().all(allowed) {
        return invalid("El teléfono debe ser valido");
    }
    if phone.chars().filter(|c| c.is_ascii_digit()).count() < MIN_PHONE_DIGITS {
        return invalid("El teléfono debe contener al menos 9 dígitos");
    }
    Ok(())
}

// チェックインは今日以降、チェックアウトはチェックインより後、最大30泊
pub fn validate_stay(check_in: NaiveDate, check_out: NaiveDate, today: NaiveDate) -> AppResult<()> {
    if check_in < today {
        return invalid("La fecha de check-in no puede ser en el pasado");
    }
    if check_out <= check_in {
        return invalid("La fecha de check-out debe ser posterior a la fecha de check-in");
    }
    // 30泊までは許可し、31泊以上を拒否する
    if (check_out - check_in).num_days() > MAX_STAY_NIGHTS {
        return invalid("La estadía no puede ser mayor a 30 días");
    }
    Ok(())
}

pub fn overlap_conflict(check_in: NaiveDate, check_out: NaiveDate) -> AppError {
    AppError::Conflict(format!(
        "Una o más habitaciones no están disponibles para las fechas seleccionadas. \
         Ya existe una reserva que se solapa con el período {check_in} - {check_out}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        booking::event::BookingDraftDetail,
        id::{HotelId, RoomId},
        room::Room,
    };
    use chrono::{Duration, TimeZone, Utc};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn room(room_number: &str, is_available: bool) -> Room {
        Room {
            id: RoomId::new(1),
            hotel_id: HotelId::new(1),
            room_number: room_number.into(),
            room_type: None,
            price_per_night: Decimal::new(4500, 2),
            is_available,
        }
    }

    fn draft() -> BookingDraft {
        BookingDraft {
            booking_code: "NKS-AB12CD250601".into(),
            guest_name: "Ana Torres".into(),
            guest_dni: "0102030400".into(),
            guest_email: "ana@example.com".into(),
            guest_phone: Some("+593 991234567".into()),
            booking_date: Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap(),
            check_in: today() + Duration::days(2),
            check_out: today() + Duration::days(5),
            details: vec![BookingDraftDetail {
                room: room("101", true),
                guests: 2,
            }],
        }
    }

    fn message(result: AppResult<()>) -> String {
        match result {
            Err(AppError::ValidationError(message)) => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_a_valid_draft() {
        assert!(draft().validate(today()).is_ok());
    }

    #[rstest]
    #[case(BookingDraft { booking_code: " ".into(), ..draft() }, "El código de reserva es requerido")]
    #[case(BookingDraft { booking_code: "NKS-AB12CD2506011".into(), ..draft() }, "El código de reserva no puede tener más de 16 caracteres")]
    #[case(BookingDraft { guest_name: "".into(), ..draft() }, "El nombre del huésped es requerido")]
    #[case(BookingDraft { guest_name: "A".into(), ..draft() }, "El nombre del huésped debe tener al menos 2 caracteres")]
    #[case(BookingDraft { guest_name: "n".repeat(101), ..draft() }, "El nombre del huésped no puede tener más de 100 caracteres")]
    #[case(BookingDraft { guest_dni: "".into(), ..draft() }, "El DNI del huésped es requerido")]
    #[case(BookingDraft { guest_dni: "1234567890".into(), ..draft() }, "La cédula debe ser valida")]
    #[case(BookingDraft { guest_email: "".into(), ..draft() }, "El email del huésped es requerido")]
    #[case(BookingDraft { guest_email: "ana@example".into(), ..draft() }, "El formato del email es inválido")]
    #[case(BookingDraft { guest_email: format!("{}@example.com", "a".repeat(89)), ..draft() }, "El email no puede tener más de 100 caracteres")]
    #[case(BookingDraft { guest_phone: Some("09912345".into()), ..draft() }, "El teléfono debe ser valido")]
    #[case(BookingDraft { guest_phone: Some("0991234567890123".into()), ..draft() }, "El teléfono debe ser valido")]
    #[case(BookingDraft { guest_phone: Some("099123456a".into()), ..draft() }, "El teléfono debe ser valido")]
    #[case(BookingDraft { guest_phone: Some("099\u{00A0}123\u{00A0}4567".into()), ..draft() }, "El teléfono debe ser valido")]
    #[case(BookingDraft { guest_phone: Some("+593 - - 12".into()), ..draft() }, "El teléfono debe contener al menos 9 dígitos")]
    #[case(BookingDraft { details: vec![], ..draft() }, "La reserva debe tener al menos una habitación")]
    #[case(BookingDraft { details: vec![BookingDraftDetail { room: room("101", true), guests: 0 }], ..draft() }, "El número de huéspedes debe ser mayor a 0")]
    #[case(BookingDraft { details: vec![BookingDraftDetail { room: room("101", true), guests: 11 }], ..draft() }, "El número de huéspedes no puede ser mayor a 10 por habitación")]
    fn rejects_invalid_fields(#[case] draft: BookingDraft, #[case] expected: &str) {
        assert_eq!(message(draft.validate(today())), expected);
    }

    #[rstest]
    #[case(1, false)]
    #[case(2, true)]
    #[case(100, true)]
    #[case(101, false)]
    fn guest_name_length_boundaries(#[case] len: usize, #[case] accepted: bool) {
        let draft = BookingDraft {
            guest_name: "n".repeat(len),
            ..draft()
        };
        assert_eq!(draft.validate(today()).is_ok(), accepted);
    }

    #[rstest]
    #[case(Some(""))]
    #[case(Some("   "))]
    #[case(None)]
    fn blank_or_missing_phone_is_skipped(#[case] phone: Option<&str>) {
        let draft = BookingDraft {
            guest_phone: phone.map(Into::into),
            ..draft()
        };
        assert!(draft.validate(today()).is_ok());
    }

    #[test]
    fn field_rules_run_before_date_rules() {
        let draft = BookingDraft {
            guest_name: "".into(),
            check_in: today() - Duration::days(1),
            ..draft()
        };
        assert_eq!(message(draft.validate(today())), "El nombre del huésped es requerido");
    }

    #[test]
    fn check_in_yesterday_is_rejected() {
        assert_eq!(
            message(validate_stay(
                today() - Duration::days(1),
                today() + Duration::days(1),
                today()
            )),
            "La fecha de check-in no puede ser en el pasado"
        );
    }

    #[test]
    fn check_in_today_is_accepted() {
        assert!(validate_stay(today(), today() + Duration::days(1), today()).is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    fn check_out_must_follow_check_in(#[case] nights: i64) {
        let check_in = today() + Duration::days(3);
        assert_eq!(
            message(validate_stay(check_in, check_in + Duration::days(nights), today())),
            "La fecha de check-out debe ser posterior a la fecha de check-in"
        );
    }

    #[rstest]
    #[case(30, true)]
    #[case(31, false)]
    fn stay_length_boundary(#[case] nights: i64, #[case] accepted: bool) {
        let result = validate_stay(today(), today() + Duration::days(nights), today());
        if accepted {
            assert!(result.is_ok());
        } else {
            assert_eq!(message(result), "La estadía no puede ser mayor a 30 días");
        }
    }

    #[test]
    fn overlap_is_reported_with_the_requested_period() {
        let draft = draft();
        match draft.ensure_bookable(true) {
            Err(AppError::Conflict(message)) => assert_eq!(
                message,
                "Una o más habitaciones no están disponibles para las fechas seleccionadas. \
                 Ya existe una reserva que se solapa con el período 2025-06-03 - 2025-06-06"
            ),
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn unavailable_room_is_named() {
        let draft = BookingDraft {
            details: vec![
                BookingDraftDetail { room: room("101", true), guests: 1 },
                BookingDraftDetail { room: room("202", false), guests: 1 },
            ],
            ..draft()
        };
        assert!(matches!(
            draft.ensure_bookable(false),
            Err(AppError::Conflict(m)) if m == "La habitación 202 no está disponible"
        ));
    }

    #[test]
    fn overlap_takes_precedence_over_room_flag() {
        let draft = BookingDraft {
            details: vec![BookingDraftDetail { room: room("202", false), guests: 1 }],
            ..draft()
        };
        assert!(matches!(
            draft.ensure_bookable(true),
            Err(AppError::Conflict(m)) if m.starts_with("Una o más habitaciones")
        ));
        assert!(self::draft().ensure_bookable(false).is_ok());
    }
}
