use crate::model::booking::{
    event::{CreateBooking, DeleteBooking},
    Booking,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// 同じイベントへの他の予約と排他的に、受け付け判定と登録を行う。
    ///
    /// 存在しないイベント・参加者の ID は `ValidationFailed`、
    /// 受け付け不可は `DuplicateBooking` / `EventFull` を返す。
    async fn create(&self, event: CreateBooking) -> AppResult<Booking>;
    async fn find_all(&self) -> AppResult<Vec<Booking>>;
    async fn delete(&self, event: DeleteBooking) -> AppResult<()>;
}
