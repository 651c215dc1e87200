use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    event::Event,
    id::{EventId, UserId},
    user::EventOwner,
};

// users テーブルと JOIN して所有者名も取得する
#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub location: String,
    pub capacity: Option<i32>,
    pub owned_by: UserId,
    pub owner_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventRow> for Event {
    fn from(value: EventRow) -> Self {
        let EventRow {
            event_id,
            title,
            description,
            date,
            location,
            capacity,
            owned_by,
            owner_name,
            created_at,
            updated_at,
        } = value;
        Event {
            event_id,
            title,
            description,
            date,
            location,
            capacity,
            owner: EventOwner {
                owner_id: owned_by,
                owner_name,
            },
            created_at,
            updated_at,
        }
    }
}
