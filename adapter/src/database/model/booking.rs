use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    booking::{Booking, BookingAttendee, BookingEvent},
    id::{AttendeeId, BookingId, EventId, UserId},
};

// 予約の一覧を取得する際に使う型
// events, attendees と INNER JOIN した結果を受ける
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub created_at: DateTime<Utc>,
    pub event_id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub location: String,
    pub capacity: Option<i32>,
    pub owned_by: UserId,
    pub attendee_id: AttendeeId,
    pub attendee_name: String,
    pub attendee_email: String,
}

impl From<BookingRow> for Booking {
    fn from(value: BookingRow) -> Self {
        let BookingRow {
            booking_id,
            created_at,
            event_id,
            title,
            description,
            date,
            location,
            capacity,
            owned_by,
            attendee_id,
            attendee_name,
            attendee_email,
        } = value;
        Booking {
            booking_id,
            created_at,
            event: BookingEvent {
                event_id,
                title,
                description,
                date,
                location,
                capacity,
                owned_by,
            },
            attendee: BookingAttendee {
                attendee_id,
                name: attendee_name,
                email: attendee_email,
            },
        }
    }
}

// 予約可否の判定に使う集計結果
#[derive(sqlx::FromRow)]
pub struct SeatCountRow {
    pub live_bookings: i64,
    pub already_booked: bool,
}
