use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    attendee::{
        event::{CreateAttendee, DeleteAttendee, UpdateAttendee},
        Attendee,
    },
    id::AttendeeId,
};
use kernel::repository::attendee::AttendeeRepository;
use shared::error::{AppError, AppResult};

use super::is_unique_violation;
use crate::database::{model::attendee::AttendeeRow, ConnectionPool};

const EMAIL_TAKEN: &str = "The email has already been taken.";

#[derive(new)]
pub struct AttendeeRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AttendeeRepository for AttendeeRepositoryImpl {
    async fn create(&self, event: CreateAttendee) -> AppResult<Attendee> {
        let mut tx = self.db.begin().await?;

        self.ensure_email_available(&mut tx, &event.email, None)
            .await?;

        let attendee = sqlx::query_as::<_, AttendeeRow>(
            r#"
                INSERT INTO attendees (attendee_id, name, email)
                VALUES ($1, $2, $3)
                RETURNING attendee_id, name, email, created_at, updated_at
            "#,
        )
        .bind(AttendeeId::new())
        .bind(&event.name)
        .bind(&event.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_email_conflict)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(attendee.into())
    }

    async fn find_all(&self) -> AppResult<Vec<Attendee>> {
        sqlx::query_as::<_, AttendeeRow>(
            r#"
                SELECT attendee_id, name, email, created_at, updated_at
                FROM attendees
                ORDER BY created_at ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map(|rows| rows.into_iter().map(Attendee::from).collect())
        .map_err(AppError::SpecificOperationError)
    }

    async fn find_by_id(&self, attendee_id: AttendeeId) -> AppResult<Option<Attendee>> {
        sqlx::query_as::<_, AttendeeRow>(
            r#"
                SELECT attendee_id, name, email, created_at, updated_at
                FROM attendees
                WHERE attendee_id = $1
            "#,
        )
        .bind(attendee_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Attendee::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn update(&self, event: UpdateAttendee) -> AppResult<Attendee> {
        let mut tx = self.db.begin().await?;

        // 存在確認を先に行い、存在しない場合は 404 とする
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM attendees WHERE attendee_id = $1)")
                .bind(event.attendee_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if !exists {
            return Err(AppError::EntityNotFound("Attendee not found".into()));
        }

        if let Some(email) = event.email.as_deref() {
            self.ensure_email_available(&mut tx, email, Some(event.attendee_id))
                .await?;
        }

        let attendee = sqlx::query_as::<_, AttendeeRow>(
            r#"
                UPDATE attendees
                SET
                    name = COALESCE($2, name),
                    email = COALESCE($3, email)
                WHERE attendee_id = $1
                RETURNING attendee_id, name, email, created_at, updated_at
            "#,
        )
        .bind(event.attendee_id)
        .bind(event.name)
        .bind(event.email)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_email_conflict)?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(attendee.into())
    }

    async fn delete(&self, event: DeleteAttendee) -> AppResult<()> {
        // bookings は外部キーの ON DELETE CASCADE で削除される
        let res = sqlx::query("DELETE FROM attendees WHERE attendee_id = $1")
            .bind(event.attendee_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::EntityNotFound("Attendee not found".into()));
        }

        Ok(())
    }
}

impl AttendeeRepositoryImpl {
    // 他の参加者が同じメールアドレスを使っていないか確認する
    // 更新時は自分自身のレコードを除外する
    async fn ensure_email_available(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        email: &str,
        exclude: Option<AttendeeId>,
    ) -> AppResult<()> {
        let taken: bool = sqlx::query_scalar(
            r#"
                SELECT EXISTS (
                    SELECT 1 FROM attendees
                    WHERE email = $1
                      AND ($2::uuid IS NULL OR attendee_id <> $2)
                )
            "#,
        )
        .bind(email)
        .bind(exclude)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if taken {
            return Err(AppError::invalid_field("email", EMAIL_TAKEN));
        }
        Ok(())
    }
}

fn map_email_conflict(e: sqlx::Error) -> AppError {
    if is_unique_violation(&e) {
        AppError::invalid_field("email", EMAIL_TAKEN)
    } else {
        AppError::SpecificOperationError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, email: &str) -> CreateAttendee {
        CreateAttendee {
            name: name.into(),
            email: email.into(),
        }
    }

    fn is_email_error(res: &AppResult<Attendee>) -> bool {
        matches!(res, Err(AppError::ValidationFailed(e)) if e.get("email").is_some())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_register_attendee(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = AttendeeRepositoryImpl::new(ConnectionPool::new(pool));

        let created = repo.create(create("Alice", "alice@example.com")).await?;
        let res = repo.find_all().await?;
        assert_eq!(res.len(), 1);

        let found = repo.find_by_id(created.attendee_id).await?;
        assert_eq!(found, Some(created));
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_email_uniqueness(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = AttendeeRepositoryImpl::new(ConnectionPool::new(pool));

        let a = repo.create(create("Alice", "alice@example.com")).await?;
        let b = repo.create(create("Bob", "bob@example.com")).await?;

        // 同じメールアドレスでの新規登録は失敗する
        let res = repo.create(create("Alice 2", "alice@example.com")).await;
        assert!(is_email_error(&res));

        // 他人のメールアドレスへの変更は失敗する
        let res = repo
            .update(UpdateAttendee {
                attendee_id: a.attendee_id,
                name: None,
                email: Some(b.email.clone()),
            })
            .await;
        assert!(is_email_error(&res));

        // 自分自身のメールアドレスのままの更新は成功する
        let updated = repo
            .update(UpdateAttendee {
                attendee_id: a.attendee_id,
                name: Some("Alice Updated".into()),
                email: Some(a.email.clone()),
            })
            .await?;
        assert_eq!(updated.name, "Alice Updated");
        assert_eq!(updated.email, "alice@example.com");
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_and_delete_missing(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = AttendeeRepositoryImpl::new(ConnectionPool::new(pool));
        let missing = AttendeeId::new();

        let res = repo
            .update(UpdateAttendee {
                attendee_id: missing,
                name: Some("Nobody".into()),
                email: None,
            })
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        let res = repo
            .delete(DeleteAttendee {
                attendee_id: missing,
            })
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        Ok(())
    }
}
