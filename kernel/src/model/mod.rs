pub mod attendee;
pub mod auth;
pub mod booking;
pub mod event;
pub mod id;
pub mod list;
pub mod user;
