use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    attendee::{
        event::{CreateAttendee, UpdateAttendee},
        Attendee,
    },
    id::AttendeeId,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, FieldErrors};

use super::{double_option, present, validation_errors};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAttendeeRequest {
    #[garde(required, length(chars, min = 1, max = 255))]
    pub name: Option<String>,
    #[garde(required, email)]
    pub email: Option<String>,
}

impl TryFrom<CreateAttendeeRequest> for CreateAttendee {
    type Error = AppError;

    fn try_from(value: CreateAttendeeRequest) -> Result<Self, Self::Error> {
        value.validate()?;
        match value {
            CreateAttendeeRequest {
                name: Some(name),
                email: Some(email),
            } => Ok(Self { name, email }),
            _ => Err(AppError::UnprocessableEntity(
                "required field is missing".into(),
            )),
        }
    }
}

// 送られたフィールドのみ検証・更新する
#[derive(Debug, Deserialize)]
pub struct UpdateAttendeeRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
}

#[derive(Debug, Validate)]
struct AttendeeChanges {
    #[garde(length(chars, min = 1, max = 255))]
    name: Option<String>,
    #[garde(email)]
    email: Option<String>,
}

#[derive(new)]
pub struct UpdateAttendeeRequestWithId(AttendeeId, UpdateAttendeeRequest);

impl TryFrom<UpdateAttendeeRequestWithId> for UpdateAttendee {
    type Error = AppError;

    fn try_from(value: UpdateAttendeeRequestWithId) -> Result<Self, Self::Error> {
        let UpdateAttendeeRequestWithId(attendee_id, req) = value;
        let mut errors = FieldErrors::default();
        let changes = AttendeeChanges {
            name: present("name", req.name, &mut errors),
            email: present("email", req.email, &mut errors),
        };
        errors.merge(validation_errors(&changes));
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let AttendeeChanges { name, email } = changes;
        Ok(Self {
            attendee_id,
            name,
            email,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct AttendeeResponse {
    pub id: AttendeeId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Attendee> for AttendeeResponse {
    fn from(value: Attendee) -> Self {
        let Attendee {
            attendee_id,
            name,
            email,
            created_at,
            updated_at,
        } = value;
        Self {
            id: attendee_id,
            name,
            email,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(body: serde_json::Value) -> Result<UpdateAttendee, AppError> {
        let req: UpdateAttendeeRequest = serde_json::from_value(body).unwrap();
        UpdateAttendee::try_from(UpdateAttendeeRequestWithId::new(AttendeeId::new(), req))
    }

    #[test]
    fn update_keeps_absent_fields_unchanged() {
        let changes = update(serde_json::json!({ "name": "Alicia" })).unwrap();
        assert_eq!(changes.name.as_deref(), Some("Alicia"));
        assert!(changes.email.is_none());
    }

    #[test]
    fn update_rejects_explicit_null() {
        let Err(AppError::ValidationFailed(errors)) =
            update(serde_json::json!({ "name": null, "email": "alice@example.com" }))
        else {
            panic!("expected validation failure");
        };
        assert_eq!(
            errors.get("name"),
            Some(&["The name field is required.".to_string()][..])
        );
        assert!(errors.get("email").is_none());
    }

    #[test]
    fn update_validates_sent_values() {
        let res = update(serde_json::json!({ "email": "not-an-email" }));
        assert!(matches!(res, Err(AppError::ValidationFailed(e)) if e.get("email").is_some()));
    }
}
