use axum::{
    routing::{delete, get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    cancel_booking, complete_booking, confirm_booking, create_booking, delete_booking,
    show_booking, show_booking_by_code, show_booking_list,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/", get(show_booking_list).post(create_booking))
        .route("/:booking_id", get(show_booking))
        .route("/code/:booking_code", get(show_booking_by_code))
        .route("/code/:booking_code/cancel", put(cancel_booking))
        .route("/code/:booking_code/confirm", put(confirm_booking))
        .route("/code/:booking_code/complete", put(complete_booking))
        .route("/delete/:booking_id", delete(delete_booking));

    Router::new().nest("/bookings", bookings_routers)
}
