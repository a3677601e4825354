use axum::{
    routing::{delete, get},
    Router,
};
use registry::AppRegistry;

use crate::handler::hotel::{
    delete_hotel, register_hotel, show_hotel, show_hotel_list, update_hotel,
};

pub fn build_hotel_routers() -> Router<AppRegistry> {
    let hotels_routers = Router::new()
        .route("/", get(show_hotel_list).post(register_hotel))
        .route("/:hotel_id", get(show_hotel).put(update_hotel))
        .route("/delete/:hotel_id", delete(delete_hotel));

    Router::new().nest("/hotels", hotels_routers)
}
