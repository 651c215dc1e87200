use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use garde::Validate;
use kernel::model::auth::event::CreateToken;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        auth::{AccessTokenResponse, LoginRequest},
        message::MessageResponse,
        user::{CreateUserRequest, UserResponse},
    },
};

pub async fn register(
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateUserRequest>, AppError>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = registry.user_repository().create(req.try_into()?).await?;
    tracing::info!(user_id = %user.user_id, "user registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<Json<AccessTokenResponse>> {
    req.validate()?;
    let (Some(email), Some(password)) = (req.email, req.password) else {
        return Err(AppError::UnauthenticatedError);
    };

    let user_id = registry
        .auth_repository()
        .verify_user(&email, &password)
        .await?;
    let access_token = registry
        .auth_repository()
        .create_token(CreateToken::new(user_id))
        .await?;

    Ok(Json(AccessTokenResponse::new(user_id, access_token)))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}
