use crate::database::{map_write_error, model::user::UserRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{event::CreateUser, User},
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<User>> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r#"
                SELECT user_id, name, dni, email, phone
                FROM users
                ORDER BY user_id
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT user_id, name, dni, email, phone
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(User::from))
    }

    async fn exists_by_id(&self, user_id: UserId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE user_id = $1)")
            .bind(user_id)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }

    async fn exists_by_dni(&self, dni: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE dni = $1)")
            .bind(dni)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }

    async fn exists_by_email(&self, email: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let row: UserRow = sqlx::query_as(
            r#"
                INSERT INTO users (name, dni, email, phone)
                VALUES ($1, $2, $3, $4)
                RETURNING user_id, name, dni, email, phone
            "#,
        )
        .bind(&event.name)
        .bind(&event.dni)
        .bind(&event.email)
        .bind(&event.phone)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!(
                    "Ya existe un usuario registrado con el DNI '{}' o el email '{}'",
                    event.dni, event.email
                )
            })
        })?;

        Ok(row.into())
    }

    async fn delete(&self, user_id: UserId) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM users WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been deleted".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(dni: &str, email: &str) -> CreateUser {
        CreateUser::new(
            "Anghelo Montiel".into(),
            dni.into(),
            email.into(),
            Some("0999999999".into()),
        )
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_register_and_delete_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo
            .create(event("0102030400", "amontiel@example.com"))
            .await?;
        assert!(repo.exists_by_dni("0102030400").await?);
        assert!(repo.exists_by_email("amontiel@example.com").await?);
        assert!(!repo.exists_by_dni("2222222222").await?);

        let found = repo.find_by_id(created.id).await?;
        assert_eq!(found, Some(created.clone()));
        assert_eq!(repo.find_all().await?, vec![created.clone()]);

        repo.delete(created.id).await?;
        assert!(!repo.exists_by_id(created.id).await?);
        assert!(matches!(
            repo.delete(created.id).await,
            Err(AppError::NoRowsAffectedError(_))
        ));
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_dni_is_a_conflict(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        repo.create(event("0102030400", "first@example.com")).await?;
        let res = repo.create(event("0102030400", "second@example.com")).await;
        assert!(matches!(res, Err(AppError::Conflict(_))));
        Ok(())
    }
}
