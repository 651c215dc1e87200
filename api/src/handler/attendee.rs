use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use kernel::model::{attendee::event::DeleteAttendee, id::AttendeeId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::{
    attendee::{
        AttendeeResponse, CreateAttendeeRequest, UpdateAttendeeRequest,
        UpdateAttendeeRequestWithId,
    },
    message::MessageResponse,
};

pub async fn register_attendee(
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateAttendeeRequest>, AppError>,
) -> AppResult<(StatusCode, Json<AttendeeResponse>)> {
    registry
        .attendee_repository()
        .create(req.try_into()?)
        .await
        .map(|attendee| (StatusCode::CREATED, Json(attendee.into())))
}

pub async fn show_attendee_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<AttendeeResponse>>> {
    registry
        .attendee_repository()
        .find_all()
        .await
        .map(|v| v.into_iter().map(AttendeeResponse::from).collect())
        .map(Json)
}

pub async fn show_attendee(
    WithRejection(Path(attendee_id), _): WithRejection<Path<AttendeeId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AttendeeResponse>> {
    registry
        .attendee_repository()
        .find_by_id(attendee_id)
        .await
        .and_then(|attendee| match attendee {
            Some(attendee) => Ok(Json(attendee.into())),
            None => Err(AppError::EntityNotFound("Attendee not found".into())),
        })
}

pub async fn update_attendee(
    WithRejection(Path(attendee_id), _): WithRejection<Path<AttendeeId>, AppError>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateAttendeeRequest>, AppError>,
) -> AppResult<Json<AttendeeResponse>> {
    let update_attendee = UpdateAttendeeRequestWithId::new(attendee_id, req);
    registry
        .attendee_repository()
        .update(update_attendee.try_into()?)
        .await
        .map(AttendeeResponse::from)
        .map(Json)
}

pub async fn delete_attendee(
    WithRejection(Path(attendee_id), _): WithRejection<Path<AttendeeId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    registry
        .attendee_repository()
        .delete(DeleteAttendee { attendee_id })
        .await
        .map(|_| Json(MessageResponse::new("Attendee deleted successfully")))
}
