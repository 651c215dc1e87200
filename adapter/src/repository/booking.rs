use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::{
        admission::SeatLedger,
        event::{CreateBooking, DeleteBooking},
        Booking,
    },
    id::{AttendeeId, BookingId, EventId},
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult, FieldErrors};

use super::{is_foreign_key_violation, is_unique_violation};
use crate::database::{
    model::booking::{BookingRow, SeatCountRow},
    ConnectionPool,
};

const SELECT_BOOKING: &str = r#"
    SELECT
        b.booking_id,
        b.created_at,
        e.event_id,
        e.title,
        e.description,
        e.date,
        e.location,
        e.capacity,
        e.user_id AS owned_by,
        a.attendee_id,
        a.name AS attendee_name,
        a.email AS attendee_email
    FROM bookings AS b
    INNER JOIN events AS e ON b.event_id = e.event_id
    INNER JOIN attendees AS a ON b.attendee_id = a.attendee_id
"#;

const INVALID_ATTENDEE: &str = "The selected attendee id is invalid.";

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        // 事前のチェックとして、以下を調べる。
        // - 指定のイベント ID をもつイベントが存在するか（存在すれば行ロックを取る）
        // - 指定の参加者 ID をもつ参加者が存在するか（存在すれば FOR KEY SHARE で削除を待たせる）
        //
        // イベント行のロックは commit まで保持されるため、
        // 同じイベントへの予約処理はここで直列化される
        let capacity = {
            let mut errors = FieldErrors::default();

            let capacity = self.lock_event(&mut tx, event.event_id).await?;
            if capacity.is_none() {
                errors.add("event_id", "The selected event id is invalid.");
            }
            if !self.attendee_exists(&mut tx, event.attendee_id).await? {
                errors.add("attendee_id", INVALID_ATTENDEE);
            }
            if !errors.is_empty() {
                return Err(errors.into());
            }

            capacity.flatten()
        };

        // ロックを保持したまま現在の予約状況を集計し、予約可否を判定する
        let seats = sqlx::query_as::<_, SeatCountRow>(
            r#"
                SELECT
                    COUNT(*) AS live_bookings,
                    COUNT(*) FILTER (WHERE attendee_id = $2) > 0 AS already_booked
                FROM bookings
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .bind(event.attendee_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        SeatLedger::new(capacity, seats.live_bookings, seats.already_booked)
            .admit()
            .map_err(|rejection| {
                tracing::info!(
                    event_id = %event.event_id,
                    attendee_id = %event.attendee_id,
                    ?rejection,
                    "booking rejected"
                );
                AppError::from(rejection)
            })?;

        // 二重予約の最終的な判定はテーブルの一意制約に任せる
        let booking_id = BookingId::new();
        sqlx::query(
            r#"
                INSERT INTO bookings (booking_id, event_id, attendee_id)
                VALUES ($1, $2, $3)
            "#,
        )
        .bind(booking_id)
        .bind(event.event_id)
        .bind(event.attendee_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::DuplicateBooking
            } else if is_foreign_key_violation(&e) {
                AppError::invalid_field("attendee_id", INVALID_ATTENDEE)
            } else {
                AppError::SpecificOperationError(e)
            }
        })?;

        let row = sqlx::query_as::<_, BookingRow>(&format!(
            "{SELECT_BOOKING} WHERE b.booking_id = $1"
        ))
        .bind(booking_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            booking_id = %booking_id,
            event_id = %event.event_id,
            attendee_id = %event.attendee_id,
            "booking created"
        );

        Ok(row.into())
    }

    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        sqlx::query_as::<_, BookingRow>(&format!("{SELECT_BOOKING} ORDER BY b.created_at ASC"))
            .fetch_all(self.db.inner_ref())
            .await
            .map(|rows| rows.into_iter().map(Booking::from).collect())
            .map_err(AppError::SpecificOperationError)
    }

    async fn delete(&self, event: DeleteBooking) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(event.booking_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Booking not found".into()));
        }

        Ok(())
    }
}

impl BookingRepositoryImpl {
    // イベント行を FOR UPDATE でロックし、定員を返す
    // イベントが存在しなければ None、定員なしなら Some(None)
    async fn lock_event(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event_id: EventId,
    ) -> AppResult<Option<Option<i32>>> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT capacity FROM events WHERE event_id = $1 FOR UPDATE",
        )
        .bind(event_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)
    }

    async fn attendee_exists(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        attendee_id: AttendeeId,
    ) -> AppResult<bool> {
        sqlx::query_scalar::<_, AttendeeId>(
            "SELECT attendee_id FROM attendees WHERE attendee_id = $1 FOR KEY SHARE",
        )
        .bind(attendee_id)
        .fetch_optional(&mut **tx)
        .await
        .map(|row| row.is_some())
        .map_err(AppError::SpecificOperationError)
    }
}
