use std::sync::Arc;

use crate::{
    model::{
        id::UserId,
        user::{event::CreateUser, User},
        validation::is_blank,
    },
    repository::user::UserRepository,
};
use derive_new::new;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

fn user_not_found(user_id: UserId) -> AppError {
    AppError::EntityNotFound(format!("Usuario con id {user_id} no encontrado"))
}

impl UserService {
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        self.user_repository.find_all().await
    }

    pub async fn find_by_id(&self, user_id: UserId) -> AppResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| user_not_found(user_id))
    }

    pub async fn create(&self, event: CreateUser) -> AppResult<User> {
        let event = CreateUser {
            phone: event.phone.filter(|phone| !is_blank(phone)),
            ..event
        };
        event.validate()?;

        if self.user_repository.exists_by_dni(&event.dni).await? {
            return Err(AppError::Conflict(format!(
                "Ya existe un usuario registrado con el DNI '{}'",
                event.dni
            )));
        }
        if self.user_repository.exists_by_email(&event.email).await? {
            return Err(AppError::Conflict(format!(
                "Ya existe un usuario registrado con el email '{}'",
                event.email
            )));
        }

        let user = self.user_repository.create(event).await?;
        tracing::info!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn delete(&self, user_id: UserId) -> AppResult<()> {
        if !self.user_repository.exists_by_id(user_id).await? {
            return Err(user_not_found(user_id));
        }
        self.user_repository.delete(user_id).await?;
        tracing::info!(%user_id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::user::MockUserRepository;

    fn create_event() -> CreateUser {
        CreateUser::new(
            "Akimi Lázaro".into(),
            "2222222222".into(),
            "alazaro@example.com".into(),
            Some("0998877665".into()),
        )
    }

    fn stored(id: i64, event: CreateUser) -> User {
        User {
            id: UserId::new(id),
            name: event.name,
            dni: event.dni,
            email: event.email,
            phone: event.phone,
        }
    }

    #[tokio::test]
    async fn find_all_returns_every_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_all().returning(|| {
            Ok(vec![
                stored(1, create_event()),
                stored(
                    2,
                    CreateUser::new(
                        "Jeremy Marín".into(),
                        "0102030400".into(),
                        "jmarin@example.com".into(),
                        None,
                    ),
                ),
            ])
        });

        let users = UserService::new(Arc::new(repo)).find_all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, "Akimi Lázaro");
        assert_eq!(users[1].name, "Jeremy Marín");
    }

    #[tokio::test]
    async fn create_checks_dni_then_email_then_persists() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_dni()
            .withf(|dni| dni == "2222222222")
            .returning(|_| Ok(false));
        repo.expect_exists_by_email()
            .withf(|email| email == "alazaro@example.com")
            .returning(|_| Ok(false));
        repo.expect_create()
            .times(1)
            .returning(|event| Ok(stored(5, event)));

        let user = UserService::new(Arc::new(repo))
            .create(create_event())
            .await
            .unwrap();
        assert_eq!(user.id, UserId::new(5));
        assert_eq!(user.phone.as_deref(), Some("0998877665"));
    }

    #[tokio::test]
    async fn blank_phone_is_stored_as_missing() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_dni().returning(|_| Ok(false));
        repo.expect_exists_by_email().returning(|_| Ok(false));
        repo.expect_create()
            .withf(|event| event.phone.is_none())
            .times(1)
            .returning(|event| Ok(stored(6, event)));

        let event = CreateUser {
            phone: Some(" ".repeat(25)),
            ..create_event()
        };
        let user = UserService::new(Arc::new(repo)).create(event).await.unwrap();
        assert_eq!(user.phone, None);
    }

    #[tokio::test]
    async fn create_rejects_duplicate_dni() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_dni().returning(|_| Ok(true));
        repo.expect_exists_by_email().never();
        repo.expect_create().never();

        let err = UserService::new(Arc::new(repo))
            .create(create_event())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(m) if m == "Ya existe un usuario registrado con el DNI '2222222222'"
        ));
    }

    #[tokio::test]
    async fn create_rejects_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_dni().returning(|_| Ok(false));
        repo.expect_exists_by_email().returning(|_| Ok(true));
        repo.expect_create().never();

        let err = UserService::new(Arc::new(repo))
            .create(create_event())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(m) if m == "Ya existe un usuario registrado con el email 'alazaro@example.com'"
        ));
    }

    #[tokio::test]
    async fn invalid_user_never_reaches_the_repository() {
        let repo = MockUserRepository::new();
        let event = CreateUser {
            dni: "01020304001".into(),
            ..create_event()
        };
        assert!(matches!(
            UserService::new(Arc::new(repo)).create(event).await,
            Err(AppError::ValidationError(m)) if m == "El DNI no puede tener más de 10 caracteres"
        ));
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_exists_by_id().returning(|_| Ok(false));
        repo.expect_delete().never();

        let service = UserService::new(Arc::new(repo));
        assert!(matches!(
            service.find_by_id(UserId::new(42)).await,
            Err(AppError::EntityNotFound(m)) if m == "Usuario con id 42 no encontrado"
        ));
        assert!(matches!(
            service.delete(UserId::new(77)).await,
            Err(AppError::EntityNotFound(m)) if m == "Usuario con id 77 no encontrado"
        ));
    }

    #[tokio::test]
    async fn delete_removes_existing_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_exists_by_id().returning(|_| Ok(true));
        repo.expect_delete()
            .withf(|id| *id == UserId::new(10))
            .times(1)
            .returning(|_| Ok(()));

        assert!(UserService::new(Arc::new(repo))
            .delete(UserId::new(10))
            .await
            .is_ok());
    }
}
