use crate::model::id::{EventId, UserId};
use chrono::NaiveDate;

#[derive(Debug)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub location: String,
    pub capacity: Option<i32>,
    pub owned_by: UserId,
}

#[derive(Debug)]
pub struct UpdateEvent {
    pub event_id: EventId,
    pub title: Option<String>,
    // Some(None) は説明文の削除
    pub description: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    pub capacity: Option<i32>,
    pub requested_user: UserId,
}

#[derive(Debug)]
pub struct DeleteEvent {
    pub event_id: EventId,
    pub requested_user: UserId,
}
