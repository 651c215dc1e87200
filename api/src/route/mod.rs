use axum::Router;
use registry::AppRegistry;

pub mod attendee;
pub mod auth;
pub mod booking;
pub mod event;
pub mod health;
pub mod user;

pub fn routes() -> Router<AppRegistry> {
    Router::new()
        .merge(health::build_health_check_routers())
        .merge(auth::build_auth_routers())
        .merge(user::build_user_routers())
        .merge(attendee::build_attendee_routers())
        .merge(event::build_event_routers())
        .merge(booking::build_booking_routers())
}
