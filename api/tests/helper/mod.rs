#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, Response},
    Router,
};
use chrono::{NaiveDate, TimeZone, Utc};
use http_body_util::BodyExt;
use kernel::{
    model::{
        attendee::Attendee,
        event::Event,
        id::{AttendeeId, EventId, UserId},
        user::{EventOwner, User},
    },
    repository::{
        attendee::MockAttendeeRepository, auth::MockAuthRepository,
        booking::MockBookingRepository, event::MockEventRepository,
        health::MockHealthCheckRepository, user::MockUserRepository,
    },
};
use registry::{AppRegistry, Repositories};
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";

#[derive(Default)]
pub struct Mocks {
    pub health: MockHealthCheckRepository,
    pub user: MockUserRepository,
    pub auth: MockAuthRepository,
    pub attendee: MockAttendeeRepository,
    pub event: MockEventRepository,
    pub booking: MockBookingRepository,
}

impl Mocks {
    /// `TOKEN` を持つリクエストを `user` として認証させる
    pub fn authorize(&mut self, user: User) {
        let user_id = user.user_id;
        self.auth
            .expect_fetch_user_id_from_token()
            .withf(|token| token.0 == TOKEN)
            .returning(move |_| Ok(Some(user_id)));
        self.user
            .expect_find_current_user()
            .withf(move |id| *id == user_id)
            .returning(move |_| Ok(Some(user.clone())));
    }

    pub fn into_app(self) -> Router {
        let registry = AppRegistry::from_repositories(Repositories {
            health_check: Arc::new(self.health),
            user: Arc::new(self.user),
            auth: Arc::new(self.auth),
            attendee: Arc::new(self.attendee),
            event: Arc::new(self.event),
            booking: Arc::new(self.booking),
        });
        api::route::routes().with_state(registry)
    }
}

pub fn user(name: &str) -> User {
    User {
        user_id: UserId::new(),
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
    }
}

pub fn attendee(name: &str, email: &str) -> Attendee {
    let at = Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap();
    Attendee {
        attendee_id: AttendeeId::new(),
        name: name.into(),
        email: email.into(),
        created_at: at,
        updated_at: at,
    }
}

pub fn event(title: &str, date: &str, capacity: Option<i32>, owner: &User) -> Event {
    let at = Utc.with_ymd_and_hms(2025, 7, 1, 9, 0, 0).unwrap();
    Event {
        event_id: EventId::new(),
        title: title.into(),
        description: None,
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        location: "India".into(),
        capacity,
        owner: EventOwner {
            owner_id: owner.user_id,
            owner_name: owner.name.clone(),
        },
        created_at: at,
        updated_at: at,
    }
}

pub fn request(method: Method, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn authorized(mut req: Request<Body>) -> Request<Body> {
    req.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {TOKEN}").parse().unwrap(),
    );
    req
}

pub async fn send(app: Router, req: Request<Body>) -> Response<Body> {
    app.oneshot(req).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
