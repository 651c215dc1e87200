use chrono::{DateTime, NaiveDate, Utc};
use garde::Validate;
use kernel::model::{
    booking::{event::CreateBooking, Booking, BookingAttendee, BookingEvent},
    id::{AttendeeId, BookingId, EventId, UserId},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, FieldErrors};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[garde(required)]
    pub event_id: Option<String>,
    #[garde(required)]
    pub attendee_id: Option<String>,
}

impl TryFrom<CreateBookingRequest> for CreateBooking {
    type Error = AppError;

    fn try_from(value: CreateBookingRequest) -> Result<Self, Self::Error> {
        let mut errors = value
            .validate()
            .err()
            .map(FieldErrors::from)
            .unwrap_or_default();

        // 形式として不正な ID は存在しない ID と同じ扱いにする
        let event_id = value.event_id.as_deref().and_then(|id| {
            id.parse::<EventId>()
                .map_err(|_| errors.add("event_id", "The selected event id is invalid."))
                .ok()
        });
        let attendee_id = value.attendee_id.as_deref().and_then(|id| {
            id.parse::<AttendeeId>()
                .map_err(|_| errors.add("attendee_id", "The selected attendee id is invalid."))
                .ok()
        });

        match (event_id, attendee_id) {
            (Some(event_id), Some(attendee_id)) if errors.is_empty() => {
                Ok(CreateBooking::new(event_id, attendee_id))
            }
            _ => Err(errors.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: BookingId,
    pub event_id: EventId,
    pub attendee_id: AttendeeId,
    pub created_at: DateTime<Utc>,
    pub event: BookingEventResponse,
    pub attendee: BookingAttendeeResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            created_at,
            event,
            attendee,
        } = value;
        Self {
            id: booking_id,
            event_id: event.event_id,
            attendee_id: attendee.attendee_id,
            created_at,
            event: event.into(),
            attendee: attendee.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingEventResponse {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub location: String,
    pub capacity: Option<i32>,
    pub user_id: UserId,
}

impl From<BookingEvent> for BookingEventResponse {
    fn from(value: BookingEvent) -> Self {
        let BookingEvent {
            event_id,
            title,
            description,
            date,
            location,
            capacity,
            owned_by,
        } = value;
        Self {
            id: event_id,
            title,
            description,
            date,
            location,
            capacity,
            user_id: owned_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookingAttendeeResponse {
    pub id: AttendeeId,
    pub name: String,
    pub email: String,
}

impl From<BookingAttendee> for BookingAttendeeResponse {
    fn from(value: BookingAttendee) -> Self {
        let BookingAttendee {
            attendee_id,
            name,
            email,
        } = value;
        Self {
            id: attendee_id,
            name,
            email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_ids_are_reported_per_field() {
        let req = CreateBookingRequest {
            event_id: Some("not-a-uuid".into()),
            attendee_id: Some(AttendeeId::new().to_string()),
        };
        let Err(AppError::ValidationFailed(errors)) = CreateBooking::try_from(req) else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.get("event_id"),
            Some(&["The selected event id is invalid.".to_string()][..])
        );
        assert!(errors.get("attendee_id").is_none());
    }

    #[test]
    fn missing_ids_are_required() {
        let req = CreateBookingRequest {
            event_id: None,
            attendee_id: None,
        };
        let Err(AppError::ValidationFailed(errors)) = CreateBooking::try_from(req) else {
            panic!("expected validation failure");
        };
        assert!(errors.get("event_id").is_some());
        assert!(errors.get("attendee_id").is_some());
    }
}
