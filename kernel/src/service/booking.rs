use std::sync::Arc;

use crate::{
    model::{
        booking::{
            code::{BookingCodeGenerator, MAX_CODE_ATTEMPTS},
            event::{BookingDraft, BookingDraftDetail, CreateBooking},
            Booking, BookingAction, BookingStatus,
        },
        id::BookingId,
        validation::is_blank,
    },
    repository::{booking::BookingRepository, room::RoomRepository},
};
use chrono::{NaiveDate, Utc};
use shared::error::{AppError, AppResult};

pub struct BookingService {
    booking_repository: Arc<dyn BookingRepository>,
    room_repository: Arc<dyn RoomRepository>,
    code_generator: BookingCodeGenerator,
}

impl BookingService {
    pub fn new(
        booking_repository: Arc<dyn BookingRepository>,
        room_repository: Arc<dyn RoomRepository>,
        code_generator: BookingCodeGenerator,
    ) -> Self {
        Self {
            booking_repository,
            room_repository,
            code_generator,
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<Booking>> {
        self.booking_repository.find_all().await
    }

    pub async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Booking> {
        self.booking_repository
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("Reserva con id {booking_id} no encontrada"))
            })
    }

    pub async fn find_by_code_and_dni(&self, booking_code: &str, guest_dni: &str) -> AppResult<Booking> {
        self.booking_repository
            .find_by_code_and_dni(booking_code, guest_dni)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound("Reserva no encontrada o datos incorrectos".into())
            })
    }

    // 未使用の候補が出るまで引き直し、MAX_CODE_ATTEMPTS 回で諦める
    pub async fn generate_unique_booking_code(&self, issued_on: NaiveDate) -> AppResult<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = self.code_generator.candidate(issued_on);
            if !self.booking_repository.exists_by_booking_code(&code).await? {
                return Ok(code);
            }
            tracing::debug!(%code, "booking code already taken");
        }
        Err(AppError::BookingCodeExhausted(MAX_CODE_ATTEMPTS))
    }

    pub async fn validate(&self, draft: &BookingDraft, today: NaiveDate) -> AppResult<()> {
        draft.validate(today)?;
        let has_conflict = self
            .booking_repository
            .exists_conflicting_booking(
                &draft.room_ids(),
                draft.check_in,
                draft.check_out,
                &[BookingStatus::Cancelled],
            )
            .await?;
        draft.ensure_bookable(has_conflict)
    }

    pub async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        let today = event.requested_at.date_naive();
        let booking_code = self.generate_unique_booking_code(today).await?;

        let mut details = Vec::with_capacity(event.details.len());
        for detail in &event.details {
            let room = self
                .room_repository
                .find_by_id(detail.room_id)
                .await?
                .ok_or_else(|| {
                    AppError::EntityNotFound(format!(
                        "Habitación con id {} no encontrada",
                        detail.room_id
                    ))
                })?;
            details.push(BookingDraftDetail {
                room,
                guests: detail.guests,
            });
        }

        let draft = BookingDraft {
            booking_code,
            guest_name: event.guest_name,
            guest_dni: event.guest_dni,
            guest_email: event.guest_email,
            // 空白だけの電話番号は未入力として保存する
            guest_phone: event.guest_phone.filter(|phone| !is_blank(phone)),
            booking_date: event.requested_at.with_timezone(&Utc),
            check_in: event.check_in,
            check_out: event.check_out,
            details,
        };
        if let Err(e) = self.validate(&draft, today).await {
            tracing::warn!(booking_code = %draft.booking_code, error = %e, "booking rejected");
            return Err(e);
        }

        let booking = self.booking_repository.create(draft).await?;
        tracing::info!(
            booking_id = %booking.id,
            booking_code = %booking.booking_code,
            "booking created"
        );
        Ok(booking)
    }

    pub async fn cancel(&self, booking_code: &str, guest_dni: &str) -> AppResult<Booking> {
        self.transition(booking_code, guest_dni, BookingAction::Cancel)
            .await
    }

    pub async fn confirm(&self, booking_code: &str, guest_dni: &str) -> AppResult<Booking> {
        self.transition(booking_code, guest_dni, BookingAction::Confirm)
            .await
    }

    pub async fn complete(&self, booking_code: &str, guest_dni: &str) -> AppResult<Booking> {
        self.transition(booking_code, guest_dni, BookingAction::Complete)
            .await
    }

    pub async fn delete(&self, booking_id: BookingId) -> AppResult<()> {
        if !self.booking_repository.exists_by_id(booking_id).await? {
            return Err(AppError::EntityNotFound(format!(
                "Reserva con id {booking_id} no encontrada"
            )));
        }
        self.booking_repository.delete(booking_id).await?;
        tracing::info!(%booking_id, "booking deleted");
        Ok(())
    }

    async fn transition(
        &self,
        booking_code: &str,
        guest_dni: &str,
        action: BookingAction,
    ) -> AppResult<Booking> {
        let current = self.find_by_code_and_dni(booking_code, guest_dni).await?;
        let next = current.apply(action)?;

        self.booking_repository
            .update_status(current.id, current.status, next.status)
            .await?;
        tracing::info!(
            booking_id = %next.id,
            from = %current.status,
            to = %next.status,
            %action,
            "booking status changed"
        );
        Ok(next)
    }
}
