use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use strum::{AsRefStr, Display, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum BookingAction {
    Cancel,
    Confirm,
    Complete,
}

impl BookingStatus {
    pub fn target(action: BookingAction) -> BookingStatus {
        match action {
            BookingAction::Cancel => BookingStatus::Cancelled,
            BookingAction::Confirm => BookingStatus::Confirmed,
            BookingAction::Complete => BookingStatus::Completed,
        }
    }

    // 遷移できない組み合わせはケースごとに別のメッセージで Conflict を返す
    pub fn transition(self, action: BookingAction) -> AppResult<BookingStatus> {
        use BookingAction::*;
        use BookingStatus::*;

        let rejection = match (action, self) {
            (Cancel, Pending | Confirmed) => None,
            (Cancel, Cancelled) => Some("La reserva ya está cancelada"),
            (Cancel, Completed) => Some("No se puede cancelar una reserva completada"),

            (Confirm, Pending) => None,
            (Confirm, Confirmed) => Some("La reserva ya está confirmada"),
            (Confirm, Cancelled) => Some("No se puede confirmar una reserva cancelada"),
            (Confirm, Completed) => Some("No se puede confirmar una reserva completada"),

            (Complete, Confirmed) => None,
            (Complete, Completed) => Some("La reserva ya está completada"),
            (Complete, Pending) => Some("No se puede completar una reserva no confirmada"),
            (Complete, Cancelled) => Some("No se puede completar una reserva cancelada"),
        };

        match rejection {
            None => Ok(Self::target(action)),
            Some(message) => Err(AppError::Conflict(message.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(BookingStatus::Pending, BookingAction::Cancel, BookingStatus::Cancelled)]
    #[case(BookingStatus::Confirmed, BookingAction::Cancel, BookingStatus::Cancelled)]
    #[case(BookingStatus::Pending, BookingAction::Confirm, BookingStatus::Confirmed)]
    #[case(BookingStatus::Confirmed, BookingAction::Complete, BookingStatus::Completed)]
    fn allowed_transitions(
        #[case] from: BookingStatus,
        #[case] action: BookingAction,
        #[case] expected: BookingStatus,
    ) {
        assert_eq!(from.transition(action).unwrap(), expected);
    }

    #[rstest]
    #[case(BookingStatus::Cancelled, BookingAction::Cancel, "La reserva ya está cancelada")]
    #[case(BookingStatus::Completed, BookingAction::Cancel, "No se puede cancelar una reserva completada")]
    #[case(BookingStatus::Confirmed, BookingAction::Confirm, "La reserva ya está confirmada")]
    #[case(BookingStatus::Cancelled, BookingAction::Confirm, "No se puede confirmar una reserva cancelada")]
    #[case(BookingStatus::Completed, BookingAction::Confirm, "No se puede confirmar una reserva completada")]
    #[case(BookingStatus::Completed, BookingAction::Complete, "La reserva ya está completada")]
    #[case(BookingStatus::Pending, BookingAction::Complete, "No se puede completar una reserva no confirmada")]
    #[case(BookingStatus::Cancelled, BookingAction::Complete, "No se puede completar una reserva cancelada")]
    fn forbidden_transitions(
        #[case] from: BookingStatus,
        #[case] action: BookingAction,
        #[case] expected: &str,
    ) {
        match from.transition(action) {
            Err(AppError::Conflict(message)) => assert_eq!(message, expected),
            other => panic!("expected a conflict, got {other:?}"),
        }
    }

    #[test]
    fn status_text_matches_stored_values() {
        assert_eq!(BookingStatus::Cancelled.as_ref(), "CANCELLED");
        assert_eq!(
            BookingStatus::from_str("CONFIRMED").unwrap(),
            BookingStatus::Confirmed
        );
        assert!(BookingStatus::from_str("UNKNOWN").is_err());
        assert_eq!(BookingStatus::default(), BookingStatus::Pending);
        assert_eq!(
            serde_json::to_string(&BookingStatus::Completed).unwrap(),
            "\"COMPLETED\""
        );
    }
}
