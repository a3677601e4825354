use std::sync::Arc;

use crate::{
    model::{
        availability::{validate_window, RoomAvailability},
        id::{HotelId, RoomId},
        room::{
            event::{CreateRoom, UpdateRoom},
            Room,
        },
    },
    repository::{booking::BookingRepository, hotel::HotelRepository, room::RoomRepository},
};
use chrono::NaiveDate;
use derive_new::new;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct RoomService {
    room_repository: Arc<dyn RoomRepository>,
    hotel_repository: Arc<dyn HotelRepository>,
    booking_repository: Arc<dyn BookingRepository>,
}

fn room_not_found(room_id: RoomId) -> AppError {
    AppError::EntityNotFound(format!("Habitación con id {room_id} no encontrada"))
}

impl RoomService {
    pub async fn find_all(&self) -> AppResult<Vec<Room>> {
        self.room_repository.find_all().await
    }

    pub async fn find_by_hotel(&self, hotel_id: HotelId) -> AppResult<Vec<Room>> {
        self.room_repository.find_by_hotel(hotel_id).await
    }

    pub async fn find_by_id(&self, room_id: RoomId) -> AppResult<Room> {
        self.room_repository
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| room_not_found(room_id))
    }

    pub async fn create(&self, event: CreateRoom) -> AppResult<Room> {
        event.validate()?;
        self.ensure_hotel_exists(event.hotel_id).await?;
        if self
            .room_repository
            .exists_by_hotel_and_number(event.hotel_id, &event.room_number, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Ya existe una habitación con el número '{}' en este hotel",
                event.room_number
            )));
        }

        let room = self.room_repository.create(event).await?;
        tracing::info!(room_id = %room.id, hotel_id = %room.hotel_id, "room created");
        Ok(room)
    }

    pub async fn update(&self, event: UpdateRoom) -> AppResult<Room> {
        if !self.room_repository.exists_by_id(event.room_id).await? {
            return Err(room_not_found(event.room_id));
        }
        event.validate()?;
        self.ensure_hotel_exists(event.hotel_id).await?;
        if self
            .room_repository
            .exists_by_hotel_and_number(event.hotel_id, &event.room_number, Some(event.room_id))
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Ya existe otra habitación con el número '{}' en este hotel",
                event.room_number
            )));
        }

        self.room_repository.update(event).await
    }

    pub async fn mark_available(&self, room_id: RoomId) -> AppResult<Room> {
        let room = self.find_by_id(room_id).await?.mark_available()?;
        self.room_repository
            .update_availability(room.id, room.is_available)
            .await?;
        tracing::info!(%room_id, "room marked available");
        Ok(room)
    }

    pub async fn mark_unavailable(&self, room_id: RoomId) -> AppResult<Room> {
        let room = self.find_by_id(room_id).await?.mark_unavailable()?;
        self.room_repository
            .update_availability(room.id, room.is_available)
            .await?;
        tracing::info!(%room_id, "room marked unavailable");
        Ok(room)
    }

    pub async fn delete(&self, room_id: RoomId) -> AppResult<()> {
        if !self.room_repository.exists_by_id(room_id).await? {
            return Err(room_not_found(room_id));
        }
        self.room_repository.delete(room_id).await
    }

    pub async fn availability(
        &self,
        room_id: RoomId,
        start: NaiveDate,
        end: NaiveDate,
        today: NaiveDate,
    ) -> AppResult<RoomAvailability> {
        let room = self.find_by_id(room_id).await?;
        validate_window(start, end, today)?;

        let stays = self
            .booking_repository
            .find_active_stays(room.id, start, end)
            .await?;
        Ok(RoomAvailability::calculate(room.id, start, end, &stays))
    }

    async fn ensure_hotel_exists(&self, hotel_id: HotelId) -> AppResult<()> {
        if self.hotel_repository.exists_by_id(hotel_id).await? {
            Ok(())
        } else {
            Err(AppError::EntityNotFound(format!(
                "Hotel con id {hotel_id} no encontrado"
            )))
        }
    }
}
