use crate::database::{
    model::booking::{assemble, BookingDetailRow, BookingRow, StayRow},
    ConnectionPool,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_new::new;
use kernel::model::{
    availability::StayPeriod,
    booking::{
        event::BookingDraft, validation::overlap_conflict, Booking, BookingDetail, BookingStatus,
    },
    id::{BookingId, RoomId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};

const SELECT_BOOKINGS: &str = r#"
    SELECT booking_id, booking_code, guest_name, guest_dni, guest_email, guest_phone,
           booking_date, check_in, check_out, status
    FROM bookings
"#;

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        let rows: Vec<BookingRow> = sqlx::query_as(&format!("{SELECT_BOOKINGS} ORDER BY booking_id"))
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        self.with_details(rows).await
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let row: Option<BookingRow> =
            sqlx::query_as(&format!("{SELECT_BOOKINGS} WHERE booking_id = $1"))
                .bind(booking_id)
                .fetch_optional(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;

        Ok(self.with_details(row.into_iter().collect()).await?.pop())
    }

    async fn find_by_code_and_dni(
        &self,
        booking_code: &str,
        guest_dni: &str,
    ) -> AppResult<Option<Booking>> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "{SELECT_BOOKINGS} WHERE booking_code = $1 AND guest_dni = $2"
        ))
        .bind(booking_code)
        .bind(guest_dni)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(self.with_details(row.into_iter().collect()).await?.pop())
    }

    async fn exists_by_id(&self, booking_id: BookingId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE booking_id = $1)",
        )
        .bind(booking_id)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn exists_by_booking_code(&self, booking_code: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM bookings WHERE booking_code = $1)",
        )
        .bind(booking_code)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn exists_conflicting_booking(
        &self,
        room_ids: &[RoomId],
        check_in: NaiveDate,
        check_out: NaiveDate,
        excluded_statuses: &[BookingStatus],
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(CONFLICT_QUERY)
            .bind(raw_ids(room_ids))
            .bind(check_in)
            .bind(check_out)
            .bind(status_names(excluded_statuses))
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }

    async fn find_active_stays(
        &self,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<StayPeriod>> {
        // チェックアウト日が期間の開始日と同じ予約も拾う。占有日の計算で除外される
        let rows: Vec<StayRow> = sqlx::query_as(
            r#"
                SELECT DISTINCT b.booking_id, b.check_in, b.check_out
                FROM bookings AS b
                INNER JOIN booking_details AS bd ON bd.booking_id = b.booking_id
                WHERE bd.room_id = $1
                  AND b.status <> $4
                  AND NOT (b.check_out < $2 OR b.check_in > $3)
                ORDER BY b.check_in
            "#,
        )
        .bind(room_id)
        .bind(start)
        .bind(end)
        .bind(BookingStatus::Cancelled.as_ref())
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(StayPeriod::from).collect())
    }

    async fn create(&self, draft: BookingDraft) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        // 検証後から書き込みまでの間に入った予約と重なっていないかを再確認する
        let has_conflict = sqlx::query_scalar::<_, bool>(CONFLICT_QUERY)
            .bind(raw_ids(&draft.room_ids()))
            .bind(draft.check_in)
            .bind(draft.check_out)
            .bind(status_names(&[BookingStatus::Cancelled]))
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_serialization_error(e, &draft))?;
        if has_conflict {
            return Err(overlap_conflict(draft.check_in, draft.check_out));
        }

        let status = BookingStatus::default();
        let booking_id: BookingId = sqlx::query_scalar(
            r#"
                INSERT INTO bookings
                (booking_code, guest_name, guest_dni, guest_email, guest_phone,
                 booking_date, check_in, check_out, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                RETURNING booking_id
            "#,
        )
        .bind(&draft.booking_code)
        .bind(&draft.guest_name)
        .bind(&draft.guest_dni)
        .bind(&draft.guest_email)
        .bind(&draft.guest_phone)
        .bind(draft.booking_date)
        .bind(draft.check_in)
        .bind(draft.check_out)
        .bind(status.as_ref())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_serialization_error(e, &draft))?;

        let mut details = Vec::with_capacity(draft.details.len());
        for detail in &draft.details {
            let price_at_booking = draft.price_at_booking(detail);
            let res = sqlx::query(
                r#"
                    INSERT INTO booking_details (booking_id, room_id, guests, price_at_booking)
                    VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(booking_id)
            .bind(detail.room.id)
            .bind(detail.guests)
            .bind(price_at_booking)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_serialization_error(e, &draft))?;

            if res.rows_affected() < 1 {
                return Err(AppError::NoRowsAffectedError(
                    "No booking detail record has been created".into(),
                ));
            }
            details.push(BookingDetail {
                room_id: detail.room.id,
                guests: detail.guests,
                price_at_booking,
            });
        }

        tx.commit()
            .await
            .map_err(|e| map_serialization_error(e, &draft))?;

        Ok(Booking {
            id: booking_id,
            booking_code: draft.booking_code,
            guest_name: draft.guest_name,
            guest_dni: draft.guest_dni,
            guest_email: draft.guest_email,
            guest_phone: draft.guest_phone,
            booking_date: draft.booking_date,
            check_in: draft.check_in,
            check_out: draft.check_out,
            status,
            details,
        })
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> AppResult<()> {
        // 読み取った時点の状態のままである場合にだけ更新する
        let res = sqlx::query(
            r#"
                UPDATE bookings
                SET status = $3
                WHERE booking_id = $1 AND status = $2
            "#,
        )
        .bind(booking_id)
        .bind(from.as_ref())
        .bind(to.as_ref())
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::Conflict(
                "La reserva fue modificada por otra operación, intente nuevamente".into(),
            ));
        }
        Ok(())
    }

    async fn delete(&self, booking_id: BookingId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(booking_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No booking record has been deleted".into(),
            ));
        }
        Ok(())
    }
}

const CONFLICT_QUERY: &str = r#"
    SELECT EXISTS (
        SELECT 1
        FROM bookings AS b
        INNER JOIN booking_details AS bd ON bd.booking_id = b.booking_id
        WHERE bd.room_id = ANY($1)
          AND b.status <> ALL($4)
          AND b.check_in < $3
          AND b.check_out > $2
    )
"#;

impl BookingRepositoryImpl {
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }

    // 予約ごとの明細をまとめて取得し、集約に組み立てる
    async fn with_details(&self, rows: Vec<BookingRow>) -> AppResult<Vec<Booking>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let booking_ids: Vec<i64> = rows.iter().map(|r| r.booking_id.raw()).collect();

        let detail_rows: Vec<BookingDetailRow> = sqlx::query_as(
            r#"
                SELECT booking_id, room_id, guests, price_at_booking
                FROM booking_details
                WHERE booking_id = ANY($1)
                ORDER BY booking_detail_id
            "#,
        )
        .bind(booking_ids)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        assemble(rows, detail_rows)
    }
}

fn raw_ids(room_ids: &[RoomId]) -> Vec<i64> {
    room_ids.iter().map(|id| id.raw()).collect()
}

fn status_names(statuses: &[BookingStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_ref().to_owned()).collect()
}

// 同時に作成された予約との競合 (40001) と予約コードの重複は Conflict にする
fn map_serialization_error(e: sqlx::Error, draft: &BookingDraft) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.code().as_deref() == Some("40001") => {
            overlap_conflict(draft.check_in, draft.check_out)
        }
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(format!(
            "El código de reserva {} ya está en uso",
            draft.booking_code
        )),
        _ => AppError::SpecificOperationError(e),
    }
}
