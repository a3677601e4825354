use crate::model::{
    id::UserId,
    user::{event::CreateUser, User},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<User>>;
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<User>>;
    async fn exists_by_id(&self, user_id: UserId) -> AppResult<bool>;
    async fn exists_by_dni(&self, dni: &str) -> AppResult<bool>;
    async fn exists_by_email(&self, email: &str) -> AppResult<bool>;
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn delete(&self, user_id: UserId) -> AppResult<()>;
}
