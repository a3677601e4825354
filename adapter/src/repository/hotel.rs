use crate::database::{map_delete_error, map_write_error, model::hotel::HotelRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    hotel::{
        event::{CreateHotel, UpdateHotel},
        Hotel,
    },
    id::HotelId,
};
use kernel::repository::hotel::HotelRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct HotelRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl HotelRepository for HotelRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Hotel>> {
        let rows: Vec<HotelRow> = sqlx::query_as(
            r#"
                SELECT hotel_id, name, address, city, stars, email
                FROM hotels
                ORDER BY hotel_id
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Hotel::from).collect())
    }

    async fn find_by_id(&self, hotel_id: HotelId) -> AppResult<Option<Hotel>> {
        let row: Option<HotelRow> = sqlx::query_as(
            r#"
                SELECT hotel_id, name, address, city, stars, email
                FROM hotels
                WHERE hotel_id = $1
            "#,
        )
        .bind(hotel_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Hotel::from))
    }

    async fn exists_by_id(&self, hotel_id: HotelId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM hotels WHERE hotel_id = $1)")
            .bind(hotel_id)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }

    async fn exists_by_name_and_address(
        &self,
        name: &str,
        address: &str,
        excluding: Option<HotelId>,
    ) -> AppResult<bool> {
        // excluding が NULL のときは全件が対象になる
        sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM hotels
                    WHERE name = $1
                      AND address = $2
                      AND ($3::BIGINT IS NULL OR hotel_id <> $3)
                )
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(excluding)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn exists_by_email(&self, email: &str, excluding: Option<HotelId>) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM hotels
                    WHERE email = $1
                      AND ($2::BIGINT IS NULL OR hotel_id <> $2)
                )
            "#,
        )
        .bind(email)
        .bind(excluding)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn create(&self, event: CreateHotel) -> AppResult<Hotel> {
        let row: HotelRow = sqlx::query_as(
            r#"
                INSERT INTO hotels (name, address, city, stars, email)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING hotel_id, name, address, city, stars, email
            "#,
        )
        .bind(&event.name)
        .bind(&event.address)
        .bind(&event.city)
        .bind(event.stars)
        .bind(&event.email)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| map_write_error(e, || duplicate_hotel(&event.email)))?;

        Ok(row.into())
    }

    async fn update(&self, event: UpdateHotel) -> AppResult<Hotel> {
        let row: Option<HotelRow> = sqlx::query_as(
            r#"
                UPDATE hotels
                SET name = $2, address = $3, city = $4, stars = $5, email = $6,
                    updated_at = CURRENT_TIMESTAMP(3)
                WHERE hotel_id = $1
                RETURNING hotel_id, name, address, city, stars, email
            "#,
        )
        .bind(event.hotel_id)
        .bind(&event.name)
        .bind(&event.address)
        .bind(&event.city)
        .bind(event.stars)
        .bind(&event.email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(|e| map_write_error(e, || duplicate_hotel(&event.email)))?;

        row.map(Hotel::from).ok_or_else(|| {
            AppError::EntityNotFound(format!("Hotel con id {} no encontrado", event.hotel_id))
        })
    }

    async fn delete(&self, hotel_id: HotelId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM hotels WHERE hotel_id = $1")
            .bind(hotel_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(|e| {
                map_delete_error(e, || {
                    format!("El hotel con id {hotel_id} tiene reservas asociadas")
                })
            })?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No hotel record has been deleted".into(),
            ));
        }
        Ok(())
    }
}

// 事前チェックをすり抜けた同時登録は一意制約で検出される
fn duplicate_hotel(email: &str) -> String {
    format!("Ya existe un hotel registrado con el email '{email}'")
}
