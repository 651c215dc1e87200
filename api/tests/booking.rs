mod helper;

use axum::http::{Method, StatusCode};
use chrono::{TimeZone, Utc};
use helper::{body_json, request, send, Mocks};
use kernel::model::{
    booking::{Booking, BookingAttendee, BookingEvent},
    id::{AttendeeId, BookingId, EventId, UserId},
};
use shared::error::{AppError, FieldErrors};

fn booking(event_id: EventId, attendee_id: AttendeeId) -> Booking {
    Booking {
        booking_id: BookingId::new(),
        created_at: Utc.with_ymd_and_hms(2025, 7, 2, 12, 0, 0).unwrap(),
        event: BookingEvent {
            event_id,
            title: "Tech Conf".into(),
            description: None,
            date: chrono::NaiveDate::from_ymd_opt(2025, 7, 25).unwrap(),
            location: "India".into(),
            capacity: Some(1),
            owned_by: UserId::new(),
        },
        attendee: BookingAttendee {
            attendee_id,
            name: "Alice".into(),
            email: "alice@example.com".into(),
        },
    }
}

fn booking_request(event_id: EventId, attendee_id: AttendeeId) -> serde_json::Value {
    serde_json::json!({
        "event_id": event_id.to_string(),
        "attendee_id": attendee_id.to_string()
    })
}

#[tokio::test]
async fn book_event_embeds_event_and_attendee() {
    let (event_id, attendee_id) = (EventId::new(), AttendeeId::new());
    let mut mocks = Mocks::default();
    mocks
        .booking
        .expect_create()
        .withf(move |b| b.event_id == event_id && b.attendee_id == attendee_id)
        .returning(|b| Ok(booking(b.event_id, b.attendee_id)));

    let res = send(
        mocks.into_app(),
        request(
            Method::POST,
            "/bookings",
            Some(booking_request(event_id, attendee_id)),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = body_json(res).await;
    assert_eq!(body["event_id"], event_id.to_string());
    assert_eq!(body["attendee_id"], attendee_id.to_string());
    assert_eq!(body["event"]["title"], "Tech Conf");
    assert_eq!(body["attendee"]["email"], "alice@example.com");
}

#[tokio::test]
async fn admission_rejections_are_409() {
    let cases = [
        (AppError::EventFull, "Event is fully booked."),
        (
            AppError::DuplicateBooking,
            "Attendee has already booked this event.",
        ),
    ];

    for (rejection, message) in cases {
        let mut mocks = Mocks::default();
        let mut rejection = Some(rejection);
        mocks
            .booking
            .expect_create()
            .times(1)
            .returning(move |_| Err(rejection.take().unwrap()));

        let res = send(
            mocks.into_app(),
            request(
                Method::POST,
                "/bookings",
                Some(booking_request(EventId::new(), AttendeeId::new())),
            ),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(res).await["message"], message);
    }
}

#[tokio::test]
async fn unknown_references_are_422() {
    let mut mocks = Mocks::default();
    mocks.booking.expect_create().returning(|_| {
        let mut errors = FieldErrors::default();
        errors.add("event_id", "The selected event id is invalid.");
        errors.add("attendee_id", "The selected attendee id is invalid.");
        Err(errors.into())
    });

    let res = send(
        mocks.into_app(),
        request(
            Method::POST,
            "/bookings",
            Some(booking_request(EventId::new(), AttendeeId::new())),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(res).await;
    assert_eq!(body["errors"]["event_id"][0], "The selected event id is invalid.");
    assert_eq!(
        body["errors"]["attendee_id"][0],
        "The selected attendee id is invalid."
    );
}

#[tokio::test]
async fn malformed_ids_never_reach_the_store() {
    let res = send(
        Mocks::default().into_app(),
        request(
            Method::POST,
            "/bookings",
            Some(serde_json::json!({ "event_id": "42", "attendee_id": "abc" })),
        ),
    )
    .await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(res).await;
    assert!(body["errors"]["event_id"].is_array());
    assert!(body["errors"]["attendee_id"].is_array());
}

#[tokio::test]
async fn list_and_cancel_bookings() {
    let existing = booking(EventId::new(), AttendeeId::new());
    let booking_id = existing.booking_id;
    let mut mocks = Mocks::default();
    mocks
        .booking
        .expect_find_all()
        .returning(move || Ok(vec![existing.clone()]));
    mocks
        .booking
        .expect_delete()
        .withf(move |d| d.booking_id == booking_id)
        .returning(|_| Ok(()));
    let app = mocks.into_app();

    let res = send(app.clone(), request(Method::GET, "/bookings", None)).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body[0]["id"], booking_id.to_string());

    let uri = format!("/bookings/{booking_id}");
    let res = send(app, request(Method::DELETE, &uri, None)).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn malformed_path_id_is_json_400() {
    let res = send(
        Mocks::default().into_app(),
        request(Method::DELETE, "/bookings/not-a-uuid", None),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        res.headers()[axum::http::header::CONTENT_TYPE],
        "application/json"
    );
    assert!(body_json(res).await["message"].is_string());
}
