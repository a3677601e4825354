use crate::database::{map_delete_error, map_write_error, model::room::RoomRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{HotelId, RoomId},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use kernel::repository::room::RoomRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RoomRepository for RoomRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(
            r#"
                SELECT room_id, hotel_id, room_number, room_type, price_per_night, is_available
                FROM rooms
                ORDER BY room_id
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn find_by_hotel(&self, hotel_id: HotelId) -> AppResult<Vec<Room>> {
        let rows: Vec<RoomRow> = sqlx::query_as(
            r#"
                SELECT room_id, hotel_id, room_number, room_type, price_per_night, is_available
                FROM rooms
                WHERE hotel_id = $1
                ORDER BY room_number
            "#,
        )
        .bind(hotel_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Room::from).collect())
    }

    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>> {
        let row: Option<RoomRow> = sqlx::query_as(
            r#"
                SELECT room_id, hotel_id, room_number, room_type, price_per_night, is_available
                FROM rooms
                WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Room::from))
    }

    async fn exists_by_id(&self, room_id: RoomId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM rooms WHERE room_id = $1)")
            .bind(room_id)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }

    async fn exists_by_hotel_and_number(
        &self,
        hotel_id: HotelId,
        room_number: &str,
        excluding: Option<RoomId>,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM rooms
                    WHERE hotel_id = $1
                      AND room_number = $2
                      AND ($3::BIGINT IS NULL OR room_id <> $3)
                )
            "#,
        )
        .bind(hotel_id)
        .bind(room_number)
        .bind(excluding)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn create(&self, event: CreateRoom) -> AppResult<Room> {
        let row: RoomRow = sqlx::query_as(
            r#"
                INSERT INTO rooms (hotel_id, room_number, room_type, price_per_night, is_available)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING room_id, hotel_id, room_number, room_type, price_per_night, is_available
            "#,
        )
        .bind(event.hotel_id)
        .bind(&event.room_number)
        .bind(&event.room_type)
        .bind(event.price_per_night)
        .bind(event.is_available)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| map_write_error(e, || duplicate_room(&event.room_number)))?;

        Ok(row.into())
    }

    async fn update(&self, event: UpdateRoom) -> AppResult<Room> {
        let row: Option<RoomRow> = sqlx::query_as(
            r#"
                UPDATE rooms
                SET hotel_id = $2, room_number = $3, room_type = $4,
                    price_per_night = $5, is_available = $6,
                    updated_at = CURRENT_TIMESTAMP(3)
                WHERE room_id = $1
                RETURNING room_id, hotel_id, room_number, room_type, price_per_night, is_available
            "#,
        )
        .bind(event.room_id)
        .bind(event.hotel_id)
        .bind(&event.room_number)
        .bind(&event.room_type)
        .bind(event.price_per_night)
        .bind(event.is_available)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(|e| map_write_error(e, || duplicate_room(&event.room_number)))?;

        row.map(Room::from).ok_or_else(|| {
            AppError::EntityNotFound(format!(
                "Habitación con id {} no encontrada",
                event.room_id
            ))
        })
    }

    async fn update_availability(&self, room_id: RoomId, is_available: bool) -> AppResult<()> {
        let res = sqlx::query(
            r#"
                UPDATE rooms
                SET is_available = $2, updated_at = CURRENT_TIMESTAMP(3)
                WHERE room_id = $1
            "#,
        )
        .bind(room_id)
        .bind(is_available)
        .execute(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No room record has been updated".into(),
            ));
        }
        Ok(())
    }

    async fn delete(&self, room_id: RoomId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM rooms WHERE room_id = $1")
            .bind(room_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(|e| {
                map_delete_error(e, || {
                    format!("La habitación con id {room_id} tiene reservas asociadas")
                })
            })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No room record has been deleted".into(),
            ));
        }
        Ok(())
    }
}

fn duplicate_room(room_number: &str) -> String {
    format!("Ya existe una habitación con el número '{room_number}' en este hotel")
}
