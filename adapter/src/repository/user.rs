use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{event::CreateUser, User},
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use super::is_unique_violation;
use crate::{
    database::{model::user::UserRow, ConnectionPool},
    password::hash_password,
};

const EMAIL_TAKEN: &str = "The email has already been taken.";

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT user_id, name, email
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(User::from))
    }

    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE email = $1)")
                .bind(&event.email)
                .fetch_one(self.db.inner_ref())
                .await
                .map_err(AppError::SpecificOperationError)?;
        if exists {
            return Err(AppError::invalid_field("email", EMAIL_TAKEN));
        }

        let password_hash = hash_password(&event.password)?;
        let user_id = UserId::new();

        // 事前チェック後に同じメールアドレスで登録された場合は一意制約で弾く
        sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (user_id, name, email, password_hash)
                VALUES ($1, $2, $3, $4)
                RETURNING user_id, name, email
            "#,
        )
        .bind(user_id)
        .bind(&event.name)
        .bind(&event.email)
        .bind(password_hash)
        .fetch_one(self.db.inner_ref())
        .await
        .map(User::from)
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::invalid_field("email", EMAIL_TAKEN)
            } else {
                AppError::SpecificOperationError(e)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_user(email: &str) -> CreateUser {
        CreateUser {
            name: "Organizer".into(),
            email: email.into(),
            password: "password123".into(),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_register_user(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));

        let user = repo.create(create_user("organizer@example.com")).await?;
        assert_eq!(user.name, "Organizer");

        let found = repo.find_current_user(user.user_id).await?;
        assert_eq!(found, Some(user));

        let res = repo.create(create_user("organizer@example.com")).await;
        assert!(matches!(res, Err(AppError::ValidationFailed(ref e)) if e.get("email").is_some()));
        Ok(())
    }
}
