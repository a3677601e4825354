use crate::database::{model::hotel::HotelContactRow, ConnectionPool};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use derive_new::new;
use kernel::{
    model::booking::Booking,
    notification::{BookingEvent, BookingNotifier},
};
use reqwest::Client;
use shared::{
    config::MailConfig,
    error::{AppError, AppResult},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl MailMessage {
    // RFC 822 形式に組み立てる。件名は非 ASCII を含むので RFC 2047 でエンコードする
    pub fn to_rfc822(&self, from: &str) -> String {
        let subject = general_purpose::STANDARD.encode(self.subject.as_bytes());
        format!(
            "From: {from}\r\nTo: {}\r\nSubject: =?UTF-8?B?{subject}?=\r\nMIME-Version: 1.0\r\nContent-Type: text/plain; charset=UTF-8\r\n\r\n{}",
            self.to, self.body
        )
    }

    pub fn encode_raw(&self, from: &str) -> String {
        general_purpose::URL_SAFE_NO_PAD.encode(self.to_rfc822(from).as_bytes())
    }
}

// 予約イベントごとに宿泊者とホテル宛てのメッセージを組み立てる
pub fn compose(event: BookingEvent, booking: &Booking, hotel: &HotelContactRow) -> Vec<MailMessage> {
    let (guest_subject, hotel_subject, headline) = match event {
        BookingEvent::Created => (
            "Confirmación de Reserva - NakanoStay",
            "Nueva Reserva Recibida - NakanoStay",
            "Su reserva ha sido registrada",
        ),
        BookingEvent::Cancelled => (
            "Reserva Cancelada - NakanoStay",
            "Reserva Cancelada - NakanoStay",
            "La reserva ha sido cancelada",
        ),
        BookingEvent::Confirmed => (
            "Reserva Confirmada - NakanoStay",
            "Reserva Confirmada - NakanoStay",
            "La reserva ha sido confirmada",
        ),
        BookingEvent::Completed => (
            "Reserva Completada - NakanoStay",
            "Reserva Completada - NakanoStay",
            "La reserva ha sido completada",
        ),
    };

    let summary = summary(booking, hotel);
    vec![
        MailMessage {
            to: booking.guest_email.clone(),
            subject: guest_subject.into(),
            body: format!("Hola {},\n\n{headline}.\n\n{summary}", booking.guest_name),
        },
        MailMessage {
            to: hotel.email.clone(),
            subject: hotel_subject.into(),
            body: format!(
                "{headline}.\n\nHuésped: {} ({})\nDNI: {}\nTeléfono: {}\n\n{summary}",
                booking.guest_name,
                booking.guest_email,
                booking.guest_dni,
                booking.guest_phone.as_deref().unwrap_or("-"),
            ),
        },
    ]
}

fn summary(booking: &Booking, hotel: &HotelContactRow) -> String {
    let total_guests: i32 = booking.details.iter().map(|d| d.guests).sum();
    format!(
        "Código de reserva: {}\nHotel: {}\nCheck-in: {}\nCheck-out: {}\nNoches: {}\nHabitaciones: {}\nHuéspedes: {}\nTotal: {}\nEstado: {}",
        booking.booking_code,
        hotel.name,
        booking.check_in,
        booking.check_out,
        booking.nights(),
        booking.details.len(),
        total_guests,
        booking.total(),
        booking.status,
    )
}

#[derive(new)]
pub struct MailNotifier {
    db: ConnectionPool,
    client: Client,
    config: MailConfig,
}

#[async_trait]
impl BookingNotifier for MailNotifier {
    async fn notify(&self, event: BookingEvent, booking: &Booking) -> AppResult<()> {
        tracing::info!(booking_code = %booking.booking_code, %event, "sending booking notification");

        let hotel = self.find_hotel_contact(booking).await?;
        for message in compose(event, booking, &hotel) {
            self.deliver(&message).await.inspect_err(|e| {
                tracing::error!(
                    booking_code = %booking.booking_code,
                    to = %message.to,
                    error = %e,
                    "failed to send booking notification"
                )
            })?;
        }
        Ok(())
    }
}

impl MailNotifier {
    pub fn from_config(db: ConnectionPool, config: MailConfig) -> Self {
        Self::new(db, Client::new(), config)
    }

    // 最初の明細の部屋が属するホテルを宛先にする
    async fn find_hotel_contact(&self, booking: &Booking) -> AppResult<HotelContactRow> {
        let detail = booking.details.first().ok_or_else(|| {
            AppError::ExternalServiceError("La reserva no tiene detalles de habitaciones".into())
        })?;

        let row: Option<HotelContactRow> = sqlx::query_as(
            r#"
                SELECT h.name, h.email
                FROM rooms AS r
                INNER JOIN hotels AS h ON h.hotel_id = r.hotel_id
                WHERE r.room_id = $1
            "#,
        )
        .bind(detail.room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.ok_or_else(|| {
            AppError::ExternalServiceError("No se pudo obtener información del hotel".into())
        })
    }

    async fn deliver(&self, message: &MailMessage) -> AppResult<()> {
        let Some(url) = self.config.api_url.as_deref() else {
            tracing::info!(to = %message.to, subject = %message.subject, "mail API not configured, message not sent");
            tracing::debug!(body = %message.body);
            return Ok(());
        };

        let mut request = self
            .client
            .post(url)
            .json(&serde_json::json!({ "raw": message.encode_raw(&self.config.from) }));
        if let Some(token) = self.config.access_token.as_deref() {
            request = request.bearer_auth(token);
        }

        let res = request
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("mail request failed: {e}")))?;
        if !res.status().is_success() {
            let status = res.status();
            let detail = res.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "mail API responded with {status}: {detail}"
            )));
        }

        tracing::info!(to = %message.to, subject = %message.subject, "mail sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use kernel::model::{
        booking::{BookingDetail, BookingStatus},
        id::{BookingId, RoomId},
    };
    use rust_decimal::Decimal;

    fn booking() -> Booking {
        Booking {
            id: BookingId::new(4),
            booking_code: "NKS-ZX81QP250601".into(),
            guest_name: "Carla Mena".into(),
            guest_dni: "2222222222".into(),
            guest_email: "carla@example.com".into(),
            guest_phone: None,
            booking_date: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            check_in: NaiveDate::from_ymd_opt(2025, 6, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2025, 6, 12).unwrap(),
            status: BookingStatus::Pending,
            details: vec![
                BookingDetail {
                    room_id: RoomId::new(1),
                    guests: 2,
                    price_at_booking: Decimal::new(9000, 2),
                },
                BookingDetail {
                    room_id: RoomId::new(2),
                    guests: 1,
                    price_at_booking: Decimal::new(6000, 2),
                },
            ],
        }
    }

    fn hotel() -> HotelContactRow {
        HotelContactRow {
            name: "Nakano Stay Quito".into(),
            email: "quito@nakanostay.com".into(),
        }
    }

    #[test]
    fn created_event_mails_guest_and_hotel() {
        let messages = compose(BookingEvent::Created, &booking(), &hotel());

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].to, "carla@example.com");
        assert_eq!(messages[0].subject, "Confirmación de Reserva - NakanoStay");
        assert_eq!(messages[1].to, "quito@nakanostay.com");
        assert_eq!(messages[1].subject, "Nueva Reserva Recibida - NakanoStay");
        assert!(messages[0].body.contains("NKS-ZX81QP250601"));
        assert!(messages[0].body.contains("Total: 150.00"));
        assert!(messages[0].body.contains("Huéspedes: 3"));
    }

    #[test]
    fn status_events_use_their_own_subject() {
        for (event, subject) in [
            (BookingEvent::Cancelled, "Reserva Cancelada - NakanoStay"),
            (BookingEvent::Confirmed, "Reserva Confirmada - NakanoStay"),
            (BookingEvent::Completed, "Reserva Completada - NakanoStay"),
        ] {
            let messages = compose(event, &booking(), &hotel());
            assert!(messages.iter().all(|m| m.subject == subject));
        }
    }

    #[test]
    fn raw_message_round_trips_through_base64url() {
        let message = MailMessage {
            to: "carla@example.com".into(),
            subject: "Reserva Cancelada - NakanoStay".into(),
            body: "¿Hola?".into(),
        };
        let raw = message.encode_raw("noreply@nakanostay.com");
        assert!(!raw.contains('+') && !raw.contains('/') && !raw.contains('='));

        let decoded = String::from_utf8(general_purpose::URL_SAFE_NO_PAD.decode(raw).unwrap()).unwrap();
        assert!(decoded.starts_with("From: noreply@nakanostay.com\r\nTo: carla@example.com\r\n"));
        assert!(decoded.ends_with("\r\n\r\n¿Hola?"));
    }
}
