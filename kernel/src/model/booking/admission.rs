//! 予約の受け付け可否の判定。
//!
//! ストア側はイベント行のロックを保持したまま [`SeatLedger`] を組み立て、
//! もう一席確保できるかをここで判定する。
//! 判定順は固定で、既に予約済みの参加者は満席であっても二重予約として扱う。

use derive_new::new;
use shared::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    DuplicateBooking,
    EventFull,
}

impl From<Rejection> for AppError {
    fn from(value: Rejection) -> Self {
        match value {
            Rejection::DuplicateBooking => AppError::DuplicateBooking,
            Rejection::EventFull => AppError::EventFull,
        }
    }
}

/// 受け付けトランザクション内で見たイベントの座席状況
#[derive(new, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLedger {
    /// None（または 0 以下）は定員なし
    pub capacity: Option<i32>,
    pub live_bookings: i64,
    pub already_booked: bool,
}

impl SeatLedger {
    pub fn admit(&self) -> Result<(), Rejection> {
        if self.already_booked {
            return Err(Rejection::DuplicateBooking);
        }
        match self.remaining() {
            Some(0) => Err(Rejection::EventFull),
            _ => Ok(()),
        }
    }

    /// 残席数。定員なしの場合は None
    pub fn remaining(&self) -> Option<i64> {
        self.capacity
            .filter(|c| *c > 0)
            .map(|c| (i64::from(c) - self.live_bookings).max(0))
    }
}

// 既存の予約数を下回る定員への変更は認めない
pub fn capacity_covers(capacity: i32, live_bookings: i64) -> bool {
    i64::from(capacity) >= live_bookings
}
