use kernel::model::{
    id::UserId,
    user::{event::CreateUser, User},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub dni: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            name,
            dni,
            email,
            phone,
        } = value;
        CreateUser::new(name, dni, email, phone)
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub dni: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            dni,
            email,
            phone,
        } = value;
        Self {
            id,
            name,
            dni,
            email,
            phone,
        }
    }
}
