use crate::model::{
    id::HotelId,
    validation::{char_len, is_blank, is_valid_email, MAX_EMAIL_LEN},
};
use derive_new::new;
use shared::error::{AppError, AppResult};

const MAX_NAME_LEN: usize = 100;
const MAX_CITY_LEN: usize = 100;
const MAX_STARS: i32 = 5;

#[derive(Debug, Clone, new)]
pub struct CreateHotel {
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub stars: Option<i32>,
    pub email: String,
}

#[derive(Debug, Clone, new)]
pub struct UpdateHotel {
    pub hotel_id: HotelId,
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub stars: Option<i32>,
    pub email: String,
}

impl CreateHotel {
    pub fn validate(&self) -> AppResult<()> {
        validate_hotel(
            &self.name,
            &self.address,
            self.city.as_deref(),
            self.stars,
            &self.email,
        )
    }
}

impl UpdateHotel {
    pub fn validate(&self) -> AppResult<()> {
        validate_hotel(
            &self.name,
            &self.address,
            self.city.as_deref(),
            self.stars,
            &self.email,
        )
    }
}

// 最初に違反した項目のメッセージだけを返す
fn validate_hotel(
    name: &str,
    address: &str,
    city: Option<&str>,
    stars: Option<i32>,
    email: &str,
) -> AppResult<()> {
    let fail = |message: &str| Err(AppError::ValidationError(message.into()));

    if is_blank(name) {
        return fail("El nombre del hotel es requerido");
    }
    if char_len(name) > MAX_NAME_LEN {
        return fail("El nombre del hotel no puede tener más de 100 caracteres");
    }
    if is_blank(address) {
        return fail("La dirección del hotel es requerida");
    }
    if is_blank(email) {
        return fail("El email del hotel es requerido");
    }
    if !is_valid_email(email) {
        return fail("El formato del email es inválido");
    }
    if char_len(email) > MAX_EMAIL_LEN {
        return fail("El email no puede tener más de 100 caracteres");
    }
    if city.is_some_and(|city| char_len(city) > MAX_CITY_LEN) {
        return fail("La ciudad no puede tener más de 100 caracteres");
    }
    match stars {
        Some(stars) if stars < 0 => fail("Las estrellas del hotel no pueden ser negativas"),
        Some(stars) if stars > MAX_STARS => fail("Las estrellas del hotel no pueden ser más de 5"),
        _ => Ok(()),
    }
}
