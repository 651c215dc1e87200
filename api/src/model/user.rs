use garde::Validate;
use kernel::model::{
    id::UserId,
    user::{event::CreateUser, EventOwner, User},
};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            name,
            email,
        } = value;
        Self {
            id: user_id,
            name,
            email,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[garde(required, length(chars, min = 1, max = 255))]
    pub name: Option<String>,
    #[garde(required, email)]
    pub email: Option<String>,
    #[garde(required, length(min = 8))]
    pub password: Option<String>,
}

impl TryFrom<CreateUserRequest> for CreateUser {
    type Error = AppError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        value.validate()?;
        let CreateUserRequest {
            name: Some(name),
            email: Some(email),
            password: Some(password),
        } = value
        else {
            return Err(AppError::UnprocessableEntity(
                "required field is missing".into(),
            ));
        };
        Ok(Self {
            name,
            email,
            password,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct EventOwnerResponse {
    pub id: UserId,
    pub name: String,
}

impl From<EventOwner> for EventOwnerResponse {
    fn from(value: EventOwner) -> Self {
        let EventOwner {
            owner_id,
            owner_name,
        } = value;
        Self {
            id: owner_id,
            name: owner_name,
        }
    }
}
