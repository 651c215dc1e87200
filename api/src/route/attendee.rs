use axum::{
    routing::{delete, get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::attendee::{
    delete_attendee, register_attendee, show_attendee, show_attendee_list, update_attendee,
};

pub fn build_attendee_routers() -> Router<AppRegistry> {
    let attendees_routers = Router::new()
        .route("/", post(register_attendee))
        .route("/", get(show_attendee_list))
        .route("/:attendee_id", get(show_attendee))
        .route("/:attendee_id", put(update_attendee))
        .route("/:attendee_id", delete(delete_attendee));

    Router::new().nest("/attendees", attendees_routers)
}
