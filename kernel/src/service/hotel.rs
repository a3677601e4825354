use std::sync::Arc;

use crate::{
    model::{
        hotel::{
            event::{CreateHotel, UpdateHotel},
            Hotel,
        },
        id::HotelId,
    },
    repository::hotel::HotelRepository,
};
use derive_new::new;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct HotelService {
    hotel_repository: Arc<dyn HotelRepository>,
}

fn hotel_not_found(hotel_id: HotelId) -> AppError {
    AppError::EntityNotFound(format!("Hotel con id {hotel_id} no encontrado"))
}

impl HotelService {
    pub async fn find_all(&self) -> AppResult<Vec<Hotel>> {
        self.hotel_repository.find_all().await
    }

    pub async fn find_by_id(&self, hotel_id: HotelId) -> AppResult<Hotel> {
        self.hotel_repository
            .find_by_id(hotel_id)
            .await?
            .ok_or_else(|| hotel_not_found(hotel_id))
    }

    pub async fn create(&self, event: CreateHotel) -> AppResult<Hotel> {
        event.validate()?;
        self.ensure_unique(&event.name, &event.address, &event.email, None)
            .await?;

        let hotel = self.hotel_repository.create(event).await?;
        tracing::info!(hotel_id = %hotel.id, "hotel created");
        Ok(hotel)
    }

    pub async fn update(&self, event: UpdateHotel) -> AppResult<Hotel> {
        if !self.hotel_repository.exists_by_id(event.hotel_id).await? {
            return Err(hotel_not_found(event.hotel_id));
        }
        event.validate()?;
        self.ensure_unique(
            &event.name,
            &event.address,
            &event.email,
            Some(event.hotel_id),
        )
        .await?;

        self.hotel_repository.update(event).await
    }

    pub async fn delete(&self, hotel_id: HotelId) -> AppResult<()> {
        if !self.hotel_repository.exists_by_id(hotel_id).await? {
            return Err(hotel_not_found(hotel_id));
        }
        self.hotel_repository.delete(hotel_id).await?;
        tracing::info!(%hotel_id, "hotel deleted");
        Ok(())
    }

    async fn ensure_unique(
        &self,
        name: &str,
        address: &str,
        email: &str,
        excluding: Option<HotelId>,
    ) -> AppResult<()> {
        let other = if excluding.is_some() { "otro hotel" } else { "un hotel" };

        if self
            .hotel_repository
            .exists_by_name_and_address(name, address, excluding)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Ya existe {other} con el nombre '{name}' en la dirección '{address}'"
            )));
        }
        if self
            .hotel_repository
            .exists_by_email(email, excluding)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Ya existe {other} registrado con el email '{email}'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::hotel::MockHotelRepository;

    fn create_event() -> CreateHotel {
        CreateHotel::new(
            "Nakano Stay Cuenca".into(),
            "Calle Larga 7-45".into(),
            Some("Cuenca".into()),
            Some(3),
            "cuenca@nakanostay.com".into(),
        )
    }

    fn stored(id: i64) -> Hotel {
        Hotel {
            id: HotelId::new(id),
            name: "Nakano Stay Cuenca".into(),
            address: "Calle Larga 7-45".into(),
            city: Some("Cuenca".into()),
            stars: Some(3),
            email: "cuenca@nakanostay.com".into(),
        }
    }

    #[tokio::test]
    async fn create_checks_uniqueness_then_persists() {
        let mut repo = MockHotelRepository::new();
        repo.expect_exists_by_name_and_address()
            .withf(|name, address, excluding| {
                name == "Nakano Stay Cuenca" && address == "Calle Larga 7-45" && excluding.is_none()
            })
            .returning(|_, _, _| Ok(false));
        repo.expect_exists_by_email().returning(|_, _| Ok(false));
        repo.expect_create().times(1).returning(|_| Ok(stored(1)));

        let service = HotelService::new(Arc::new(repo));
        let hotel = service.create(create_event()).await.unwrap();
        assert_eq!(hotel.id, HotelId::new(1));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_name_and_address() {
        let mut repo = MockHotelRepository::new();
        repo.expect_exists_by_name_and_address()
            .returning(|_, _, _| Ok(true));
        repo.expect_create().never();

        let service = HotelService::new(Arc::new(repo));
        let err = service.create(create_event()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(m) if m == "Ya existe un hotel con el nombre 'Nakano Stay Cuenca' en la dirección 'Calle Larga 7-45'"
        ));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let mut repo = MockHotelRepository::new();
        repo.expect_exists_by_name_and_address()
            .returning(|_, _, _| Ok(false));
        repo.expect_exists_by_email().returning(|_, _| Ok(true));

        let service = HotelService::new(Arc::new(repo));
        let err = service.create(create_event()).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(m) if m == "Ya existe un hotel registrado con el email 'cuenca@nakanostay.com'"
        ));
    }

    #[tokio::test]
    async fn invalid_hotel_never_reaches_the_repository() {
        let repo = MockHotelRepository::new();
        let service = HotelService::new(Arc::new(repo));

        let event = CreateHotel {
            stars: Some(7),
            ..create_event()
        };
        assert!(matches!(
            service.create(event).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn update_excludes_itself_from_uniqueness() {
        let mut repo = MockHotelRepository::new();
        repo.expect_exists_by_id().returning(|_| Ok(true));
        repo.expect_exists_by_name_and_address()
            .withf(|_, _, excluding| *excluding == Some(HotelId::new(4)))
            .returning(|_, _, _| Ok(false));
        repo.expect_exists_by_email()
            .withf(|_, excluding| *excluding == Some(HotelId::new(4)))
            .returning(|_, _| Ok(true));

        let service = HotelService::new(Arc::new(repo));
        let event = UpdateHotel::new(
            HotelId::new(4),
            "Nakano Stay Cuenca".into(),
            "Calle Larga 7-45".into(),
            None,
            None,
            "cuenca@nakanostay.com".into(),
        );
        assert!(matches!(
            service.update(event).await,
            Err(AppError::Conflict(m)) if m == "Ya existe otro hotel registrado con el email 'cuenca@nakanostay.com'"
        ));
    }

    #[tokio::test]
    async fn missing_hotel_is_not_found() {
        let mut repo = MockHotelRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_exists_by_id().returning(|_| Ok(false));
        repo.expect_delete().never();

        let service = HotelService::new(Arc::new(repo));
        assert!(matches!(
            service.find_by_id(HotelId::new(9)).await,
            Err(AppError::EntityNotFound(m)) if m == "Hotel con id 9 no encontrado"
        ));
        assert!(matches!(
            service.delete(HotelId::new(9)).await,
            Err(AppError::EntityNotFound(_))
        ));
    }
}
