use crate::model::{id::EventId, user::EventOwner};
use chrono::{DateTime, NaiveDate, Utc};

pub mod event;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub event_id: EventId,
    pub title: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub location: String,
    /// None は定員なし
    pub capacity: Option<i32>,
    pub owner: EventOwner,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 一覧の絞り込み条件。`search` と `date` を両方指定した場合は AND
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventListOptions {
    pub search: Option<String>,
    pub date: Option<NaiveDate>,
    pub limit: i64,
    pub page: i64,
}

impl EventListOptions {
    // ページ番号が大きすぎて i64 に収まらない場合は None
    pub fn offset(&self) -> Option<i64> {
        (self.page.max(1) - 1).checked_mul(self.limit)
    }
}

impl Default for EventListOptions {
    fn default() -> Self {
        Self {
            search: None,
            date: None,
            limit: DEFAULT_PAGE_SIZE,
            page: 1,
        }
    }
}
