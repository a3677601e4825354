use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    mail::MailNotifier,
    repository::{
        booking::BookingRepositoryImpl, health::HealthCheckRepositoryImpl,
        hotel::HotelRepositoryImpl, room::RoomRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::{
    model::booking::code::BookingCodeGenerator,
    notification::BookingNotifier,
    repository::{
        booking::BookingRepository, health::HealthCheckRepository, hotel::HotelRepository,
        room::RoomRepository, user::UserRepository,
    },
    service::{
        booking::BookingService, hotel::HotelService, room::RoomService, user::UserService,
    },
};
use shared::config::{AppConfig, AuthConfig};

// テストではモックに差し替える
pub struct RegistryParts {
    pub health_check_repository: Arc<dyn HealthCheckRepository>,
    pub hotel_repository: Arc<dyn HotelRepository>,
    pub room_repository: Arc<dyn RoomRepository>,
    pub booking_repository: Arc<dyn BookingRepository>,
    pub user_repository: Arc<dyn UserRepository>,
    pub booking_notifier: Arc<dyn BookingNotifier>,
    pub code_generator: BookingCodeGenerator,
    pub auth: AuthConfig,
}

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    hotel_service: Arc<HotelService>,
    room_service: Arc<RoomService>,
    booking_service: Arc<BookingService>,
    user_service: Arc<UserService>,
    booking_notifier: Arc<dyn BookingNotifier>,
    auth: Arc<AuthConfig>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, app_config: AppConfig) -> Self {
        Self::from_parts(RegistryParts {
            health_check_repository: Arc::new(HealthCheckRepositoryImpl::new(pool.clone())),
            hotel_repository: Arc::new(HotelRepositoryImpl::new(pool.clone())),
            room_repository: Arc::new(RoomRepositoryImpl::new(pool.clone())),
            booking_repository: Arc::new(BookingRepositoryImpl::new(pool.clone())),
            user_repository: Arc::new(UserRepositoryImpl::new(pool.clone())),
            booking_notifier: Arc::new(MailNotifier::from_config(pool, app_config.mail)),
            code_generator: BookingCodeGenerator::from_entropy(),
            auth: app_config.auth,
        })
    }

    pub fn from_parts(parts: RegistryParts) -> Self {
        let RegistryParts {
            health_check_repository,
            hotel_repository,
            room_repository,
            booking_repository,
            user_repository,
            booking_notifier,
            code_generator,
            auth,
        } = parts;

        let hotel_service = Arc::new(HotelService::new(hotel_repository.clone()));
        let room_service = Arc::new(RoomService::new(
            room_repository.clone(),
            hotel_repository,
            booking_repository.clone(),
        ));
        let booking_service = Arc::new(BookingService::new(
            booking_repository,
            room_repository,
            code_generator,
        ));
        let user_service = Arc::new(UserService::new(user_repository));
        Self {
            health_check_repository,
            hotel_service,
            room_service,
            booking_service,
            user_service,
            booking_notifier,
            auth: Arc::new(auth),
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn hotel_service(&self) -> Arc<HotelService> {
        self.hotel_service.clone()
    }

    pub fn room_service(&self) -> Arc<RoomService> {
        self.room_service.clone()
    }

    pub fn booking_service(&self) -> Arc<BookingService> {
        self.booking_service.clone()
    }

    pub fn user_service(&self) -> Arc<UserService> {
        self.user_service.clone()
    }

    pub fn booking_notifier(&self) -> Arc<dyn BookingNotifier> {
        self.booking_notifier.clone()
    }

    pub fn auth_config(&self) -> &AuthConfig {
        &self.auth
    }
}
