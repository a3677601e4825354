use kernel::model::{
    hotel::{
        event::{CreateHotel, UpdateHotel},
        Hotel,
    },
    id::HotelId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateHotelRequest {
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub stars: Option<i32>,
    pub email: String,
}

impl From<CreateHotelRequest> for CreateHotel {
    fn from(value: CreateHotelRequest) -> Self {
        let CreateHotelRequest {
            name,
            address,
            city,
            stars,
            email,
        } = value;
        CreateHotel::new(name, address, city, stars, email)
    }
}

pub type UpdateHotelRequest = CreateHotelRequest;

impl CreateHotelRequest {
    pub fn into_update(self, hotel_id: HotelId) -> UpdateHotel {
        UpdateHotel::new(
            hotel_id,
            self.name,
            self.address,
            self.city,
            self.stars,
            self.email,
        )
    }
}

#[derive(Debug, Serialize)]
pub struct HotelResponse {
    pub id: HotelId,
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub stars: Option<i32>,
}

impl From<Hotel> for HotelResponse {
    fn from(value: Hotel) -> Self {
        let Hotel {
            id,
            name,
            address,
            city,
            stars,
            ..
        } = value;
        Self {
            id,
            name,
            address,
            city,
            stars,
        }
    }
}
