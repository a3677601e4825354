use kernel::model::{hotel::Hotel, id::HotelId};

#[derive(sqlx::FromRow)]
pub struct HotelRow {
    pub hotel_id: HotelId,
    pub name: String,
    pub address: String,
    pub city: Option<String>,
    pub stars: Option<i32>,
    pub email: String,
}

impl From<HotelRow> for Hotel {
    fn from(value: HotelRow) -> Self {
        let HotelRow {
            hotel_id,
            name,
            address,
            city,
            stars,
            email,
        } = value;
        Hotel {
            id: hotel_id,
            name,
            address,
            city,
            stars,
            email,
        }
    }
}

// 通知メールの宛先に使うホテルの連絡先
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HotelContactRow {
    pub name: String,
    pub email: String,
}
