use axum::{
    routing::{delete, get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{book_event, cancel_booking, show_booking_list};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let bookings_routers = Router::new()
        .route("/", post(book_event))
        .route("/", get(show_booking_list))
        .route("/:booking_id", delete(cancel_booking));

    Router::new().nest("/bookings", bookings_routers)
}
