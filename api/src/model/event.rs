use chrono::{DateTime, NaiveDate, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    event::{
        event::{CreateEvent, UpdateEvent},
        Event, EventListOptions, DEFAULT_PAGE_SIZE,
    },
    id::{EventId, UserId},
    list::PaginatedList,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, FieldErrors};

use super::{double_option, present, user::EventOwnerResponse, validation_errors};

const DATE_FORMAT: &str = "%Y-%m-%d";
const INVALID_DATE: &str = "not a valid date (expected YYYY-MM-DD)";
const PAGE_OUT_OF_RANGE: &str = "The page is out of range.";

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[garde(required, length(chars, min = 1, max = 255))]
    pub title: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(required)]
    pub date: Option<String>,
    #[garde(required, length(chars, min = 1, max = 100))]
    pub location: Option<String>,
    #[garde(required, range(min = 1))]
    pub capacity: Option<i32>,
}

#[derive(new)]
pub struct CreateEventRequestWithOwner(UserId, CreateEventRequest);

impl TryFrom<CreateEventRequestWithOwner> for CreateEvent {
    type Error = AppError;

    fn try_from(value: CreateEventRequestWithOwner) -> Result<Self, Self::Error> {
        let CreateEventRequestWithOwner(owned_by, req) = value;
        let mut errors = validation_errors(&req);
        let date = req
            .date
            .as_deref()
            .and_then(|d| parse_date("date", d, &mut errors));
        if !errors.is_empty() {
            return Err(errors.into());
        }

        match (req.title, date, req.location) {
            (Some(title), Some(date), Some(location)) => Ok(Self {
                title,
                description: req.description,
                date,
                location,
                capacity: req.capacity,
                owned_by,
            }),
            _ => Err(AppError::UnprocessableEntity(
                "required field is missing".into(),
            )),
        }
    }
}

// 送られたフィールドのみ検証・更新する
#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub title: Option<Option<String>>,
    // キーなし → 変更しない、null → 削除
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub capacity: Option<Option<i32>>,
}

#[derive(Debug, Validate)]
struct EventChanges {
    #[garde(length(chars, min = 1, max = 255))]
    title: Option<String>,
    #[garde(length(chars, min = 1, max = 100))]
    location: Option<String>,
    #[garde(range(min = 1))]
    capacity: Option<i32>,
}

#[derive(new)]
pub struct UpdateEventRequestWithIds(EventId, UserId, UpdateEventRequest);

impl TryFrom<UpdateEventRequestWithIds> for UpdateEvent {
    type Error = AppError;

    fn try_from(value: UpdateEventRequestWithIds) -> Result<Self, Self::Error> {
        let UpdateEventRequestWithIds(event_id, requested_user, req) = value;
        let mut errors = FieldErrors::default();
        let changes = EventChanges {
            title: present("title", req.title, &mut errors),
            location: present("location", req.location, &mut errors),
            capacity: present("capacity", req.capacity, &mut errors),
        };
        let date = present("date", req.date, &mut errors)
            .and_then(|d| parse_date("date", &d, &mut errors));
        errors.merge(validation_errors(&changes));
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let EventChanges {
            title,
            location,
            capacity,
        } = changes;
        Ok(Self {
            event_id,
            title,
            description: req.description,
            date,
            location,
            capacity,
            requested_user,
        })
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct EventListQuery {
    #[garde(skip)]
    pub search: Option<String>,
    #[garde(skip)]
    pub date: Option<String>,
    #[garde(range(min = 1, max = 100))]
    pub limit: Option<i64>,
    #[garde(range(min = 1))]
    pub page: Option<i64>,
}

impl TryFrom<EventListQuery> for EventListOptions {
    type Error = AppError;

    fn try_from(value: EventListQuery) -> Result<Self, Self::Error> {
        let mut errors = validation_errors(&value);
        let date = value
            .date
            .as_deref()
            .filter(|d| !d.is_empty())
            .and_then(|d| parse_date("date", d, &mut errors));
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let options = Self {
            search: value.search.filter(|s| !s.is_empty()),
            date,
            limit: value.limit.unwrap_or(DEFAULT_PAGE_SIZE),
            page: value.page.unwrap_or(1),
        };
        if options.offset().is_none() {
            return Err(AppError::invalid_field("page", PAGE_OUT_OF_RANGE));
        }
        Ok(options)
    }
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub location: String,
    pub capacity: Option<i32>,
    pub owner: EventOwnerResponse,
    pub created_at: DateTime<Utc>,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let Event {
            event_id,
            title,
            description,
            date,
            location,
            capacity,
            owner,
            created_at,
            ..
        } = value;
        Self {
            id: event_id,
            title,
            description,
            date,
            location,
            capacity,
            owner: owner.into(),
            created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedEventResponse {
    pub total: i64,
    pub limit: i64,
    pub page: i64,
    pub last_page: i64,
    pub items: Vec<EventResponse>,
}

impl From<PaginatedList<Event>> for PaginatedEventResponse {
    fn from(value: PaginatedList<Event>) -> Self {
        let last_page = value.last_page();
        let PaginatedList {
            total,
            limit,
            page,
            items,
        } = value;
        Self {
            total,
            limit,
            page,
            last_page,
            items: items.into_iter().map(EventResponse::from).collect(),
        }
    }
}

fn parse_date(field: &str, value: &str, errors: &mut FieldErrors) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, INVALID_DATE);
            None
        }
    }
}
