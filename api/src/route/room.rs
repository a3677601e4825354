use axum::{
    routing::{delete, get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::room::{
    delete_room, mark_room_available, mark_room_unavailable, register_room, show_room,
    show_room_availability, show_room_list, show_rooms_by_hotel, update_room,
};

pub fn build_room_routers() -> Router<AppRegistry> {
    let rooms_routers = Router::new()
        .route("/", get(show_room_list).post(register_room))
        .route("/:room_id", get(show_room).put(update_room))
        .route("/hotel/:hotel_id", get(show_rooms_by_hotel))
        .route("/:room_id/availability", get(show_room_availability))
        .route("/:room_id/available", put(mark_room_available))
        .route("/:room_id/unavailable", put(mark_room_unavailable))
        .route("/delete/:room_id", delete(delete_room));

    Router::new().nest("/rooms", rooms_routers)
}
