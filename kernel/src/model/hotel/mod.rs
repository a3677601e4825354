use crate::model::id::HotelId;

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotel {
    pub id: HotelId,
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub stars: Option<i32>,
    pub email: String,
}
