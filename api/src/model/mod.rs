use garde::Validate;
use serde::{Deserialize, Deserializer};
use shared::error::FieldErrors;

pub mod attendee;
pub mod auth;
pub mod booking;
pub mod event;
pub mod message;
pub mod user;

// garde の検証結果をフィールドごとのエラーに変換する。問題がなければ空
fn validation_errors<T: Validate<Context = ()>>(req: &T) -> FieldErrors {
    req.validate().err().map(FieldErrors::from).unwrap_or_default()
}

// キーなし → None、null → Some(None) として区別する
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

// 部分更新で送られたフィールドは null を許さない
fn present<T>(field: &str, value: Option<Option<T>>, errors: &mut FieldErrors) -> Option<T> {
    match value {
        Some(None) => {
            errors.add(field, format!("The {field} field is required."));
            None
        }
        Some(value) => value,
        None => None,
    }
}
