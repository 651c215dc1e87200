use crate::model::id::{AttendeeId, BookingId, EventId, UserId};
use chrono::{DateTime, NaiveDate, Utc};

pub mod admission;
pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: BookingId,
    pub created_at: DateTime<Utc>,
    pub event: BookingEvent,
    pub attendee: BookingAttendee,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingEvent {
    pub event_id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub location: String,
    pub capacity: Option<i32>,
    pub owned_by: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingAttendee {
    pub attendee_id: AttendeeId,
    pub name: String,
    pub email: String,
}
