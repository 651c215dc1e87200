pub mod attendee;
pub mod auth;
pub mod booking;
pub mod event;
pub mod health;
pub mod user;

// 一意制約違反（SQLSTATE 23505）かどうか
fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

// 外部キー制約違反（SQLSTATE 23503）かどうか
fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_foreign_key_violation())
}
