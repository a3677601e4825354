use crate::model::id::UserId;

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub dni: String,
    pub email: String,
    pub phone: Option<String>,
}
