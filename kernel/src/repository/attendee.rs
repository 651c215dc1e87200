use crate::model::{
    attendee::{
        event::{CreateAttendee, DeleteAttendee, UpdateAttendee},
        Attendee,
    },
    id::AttendeeId,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait AttendeeRepository: Send + Sync {
    async fn create(&self, event: CreateAttendee) -> AppResult<Attendee>;
    async fn find_all(&self) -> AppResult<Vec<Attendee>>;
    async fn find_by_id(&self, attendee_id: AttendeeId) -> AppResult<Option<Attendee>>;
    async fn update(&self, event: UpdateAttendee) -> AppResult<Attendee>;
    // 参加者の予約もあわせて削除される
    async fn delete(&self, event: DeleteAttendee) -> AppResult<()>;
}
