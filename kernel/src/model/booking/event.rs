use crate::model::id::{AttendeeId, BookingId, EventId};
use derive_new::new;

#[derive(new, Debug, Clone, Copy)]
pub struct CreateBooking {
    pub event_id: EventId,
    pub attendee_id: AttendeeId,
}

#[derive(new, Debug, Clone, Copy)]
pub struct DeleteBooking {
    pub booking_id: BookingId,
}
