use crate::model::{
    id::{HotelId, RoomId},
    validation::{char_len, is_blank},
};
use derive_new::new;
use rust_decimal::Decimal;
use shared::error::{AppError, AppResult};

const MAX_ROOM_NUMBER_LEN: usize = 10;
const MAX_ROOM_TYPE_LEN: usize = 50;
const MAX_PRICE_SCALE: u32 = 2;
const MAX_PRICE_DIGITS: usize = 10;

#[derive(Debug, Clone, new)]
pub struct CreateRoom {
    pub hotel_id: HotelId,
    pub room_number: String,
    pub room_type: Option<String>,
    pub price_per_night: Decimal,
    pub is_available: bool,
}

#[derive(Debug, Clone, new)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub hotel_id: HotelId,
    pub room_number: String,
    pub room_type: Option<String>,
    pub price_per_night: Decimal,
    pub is_available: bool,
}

impl CreateRoom {
    pub fn validate(&self) -> AppResult<()> {
        validate_room(
            &self.room_number,
            self.room_type.as_deref(),
            self.price_per_night,
        )
    }
}

impl UpdateRoom {
    pub fn validate(&self) -> AppResult<()> {
        validate_room(
            &self.room_number,
            self.room_type.as_deref(),
            self.price_per_night,
        )
    }
}

fn validate_room(room_number: &str, room_type: Option<&str>, price: Decimal) -> AppResult<()> {
    let fail = |message: &str| Err(AppError::ValidationError(message.into()));

    if is_blank(room_number) {
        return fail("El número de habitación es requerido");
    }
    if char_len(room_number) > MAX_ROOM_NUMBER_LEN {
        return fail("El número de habitación no puede tener más de 10 caracteres");
    }
    if let Some(room_type) = room_type {
        if is_blank(room_type) {
            return fail("El tipo de habitación no puede estar vacío");
        }
        if char_len(room_type) > MAX_ROOM_TYPE_LEN {
            return fail("El tipo de habitación no puede tener más de 50 caracteres");
        }
    }
    if price < Decimal::ZERO {
        return fail("El precio por noche no puede ser negativo");
    }
    if price.scale() > MAX_PRICE_SCALE {
        return fail("El precio por noche no puede tener más de 2 decimales");
    }
    if total_digits(price) > MAX_PRICE_DIGITS {
        return fail("El precio por noche es demasiado grande");
    }
    Ok(())
}

fn total_digits(price: Decimal) -> usize {
    price.mantissa().unsigned_abs().to_string().len()
}
