use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    booking::admission::capacity_covers,
    event::{
        event::{CreateEvent, DeleteEvent, UpdateEvent},
        Event, EventListOptions,
    },
    id::{EventId, UserId},
    list::PaginatedList,
};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::event::EventRow, ConnectionPool};

// 一覧・詳細で共通の SELECT 句
const SELECT_EVENT: &str = r#"
    SELECT
        e.event_id,
        e.title,
        e.description,
        e.date,
        e.location,
        e.capacity,
        e.user_id AS owned_by,
        u.name AS owner_name,
        e.created_at,
        e.updated_at
    FROM events AS e
    INNER JOIN users AS u ON e.user_id = u.user_id
"#;

// $1: タイトルの部分一致パターン, $2: 開催日
const LIST_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR e.title ILIKE $1)
      AND ($2::date IS NULL OR e.date = $2)
"#;

const PAGE_OUT_OF_RANGE: &str = "The page is out of range.";
const CAPACITY_BELOW_BOOKINGS: &str =
    "The capacity may not be less than the number of existing bookings.";

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    async fn create(&self, event: CreateEvent) -> AppResult<Event> {
        sqlx::query_as::<_, EventRow>(
            r#"
                WITH inserted AS (
                    INSERT INTO events
                    (event_id, title, description, date, location, capacity, user_id)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    RETURNING *
                )
                SELECT
                    i.event_id,
                    i.title,
                    i.description,
                    i.date,
                    i.location,
                    i.capacity,
                    i.user_id AS owned_by,
                    u.name AS owner_name,
                    i.created_at,
                    i.updated_at
                FROM inserted AS i
                INNER JOIN users AS u ON i.user_id = u.user_id
            "#,
        )
        .bind(EventId::new())
        .bind(event.title)
        .bind(event.description)
        .bind(event.date)
        .bind(event.location)
        .bind(event.capacity)
        .bind(event.owned_by)
        .fetch_one(self.db.inner_ref())
        .await
        .map(Event::from)
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_all(&self, options: EventListOptions) -> AppResult<PaginatedList<Event>> {
        let pattern = options.search.as_deref().map(like_pattern);
        let offset = options
            .offset()
            .ok_or_else(|| AppError::invalid_field("page", PAGE_OUT_OF_RANGE))?;
        let EventListOptions {
            date, limit, page, ..
        } = options;

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM events AS e {LIST_FILTER}"
        ))
        .bind(pattern.as_deref())
        .bind(date)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        let items = sqlx::query_as::<_, EventRow>(&format!(
            "{SELECT_EVENT} {LIST_FILTER} ORDER BY e.date ASC, e.created_at ASC LIMIT $3 OFFSET $4"
        ))
        .bind(pattern.as_deref())
        .bind(date)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .into_iter()
        .map(Event::from)
        .collect();

        Ok(PaginatedList {
            total,
            limit,
            page,
            items,
        })
    }

    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, EventRow>(&format!("{SELECT_EVENT} WHERE e.event_id = $1"))
            .bind(event_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map(|row| row.map(Event::from))
            .map_err(AppError::SpecificOperationError)
    }

    async fn update(&self, event: UpdateEvent) -> AppResult<Event> {
        let mut tx = self.db.begin().await?;

        self.ensure_owner(&mut tx, event.event_id, event.requested_user)
            .await?;

        // ensure_owner が取ったイベント行のロック下で予約数を数える
        if let Some(capacity) = event.capacity {
            let live_bookings: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE event_id = $1")
                    .bind(event.event_id)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(AppError::SpecificOperationError)?;
            if !capacity_covers(capacity, live_bookings) {
                return Err(AppError::invalid_field(
                    "capacity",
                    CAPACITY_BELOW_BOOKINGS,
                ));
            }
        }

        // description は null での削除を許すため、更新有無のフラグを別に渡す
        let (set_description, description) = match event.description {
            Some(d) => (true, d),
            None => (false, None),
        };

        let res = sqlx::query(
            r#"
                UPDATE events
                SET
                    title = COALESCE($2, title),
                    description = CASE WHEN $3 THEN $4 ELSE description END,
                    date = COALESCE($5, date),
                    location = COALESCE($6, location),
                    capacity = COALESCE($7, capacity)
                WHERE event_id = $1
            "#,
        )
        .bind(event.event_id)
        .bind(event.title)
        .bind(set_description)
        .bind(description)
        .bind(event.date)
        .bind(event.location)
        .bind(event.capacity)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been updated".into(),
            ));
        }

        let row = sqlx::query_as::<_, EventRow>(&format!("{SELECT_EVENT} WHERE e.event_id = $1"))
            .bind(event.event_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(row.into())
    }

    async fn delete(&self, event: DeleteEvent) -> AppResult<()> {
        let mut tx = self.db.begin().await?;

        self.ensure_owner(&mut tx, event.event_id, event.requested_user)
            .await?;

        // bookings は外部キーの ON DELETE CASCADE で削除される
        let res = sqlx::query("DELETE FROM events WHERE event_id = $1")
            .bind(event.event_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No event record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(())
    }
}

impl EventRepositoryImpl {
    // イベント行をロックしたうえで、存在と所有者を確認する
    async fn ensure_owner(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event_id: EventId,
        requested_user: UserId,
    ) -> AppResult<()> {
        let owner: Option<UserId> =
            sqlx::query_scalar("SELECT user_id FROM events WHERE event_id = $1 FOR UPDATE")
                .bind(event_id)
                .fetch_optional(&mut **tx)
                .await
                .map_err(AppError::SpecificOperationError)?;

        match owner {
            None => Err(AppError::EntityNotFound("Event not found".into())),
            Some(owner) if owner != requested_user => Err(AppError::ForbiddenOperation),
            Some(_) => Ok(()),
        }
    }
}

// ILIKE 用に % と _ をエスケープし、部分一致のパターンにする
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
