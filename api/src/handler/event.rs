use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use kernel::model::{event::event::DeleteEvent, id::EventId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::{
        event::{
            CreateEventRequest, CreateEventRequestWithOwner, EventListQuery, EventResponse,
            PaginatedEventResponse, UpdateEventRequest, UpdateEventRequestWithIds,
        },
        message::MessageResponse,
    },
};

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateEventRequest>, AppError>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    let create_event = CreateEventRequestWithOwner::new(user.id(), req);
    let event = registry
        .event_repository()
        .create(create_event.try_into()?)
        .await?;
    tracing::info!(event_id = %event.event_id, owner = %user.id(), "event created");
    Ok((StatusCode::CREATED, Json(event.into())))
}

pub async fn show_event_list(
    _user: AuthorizedUser,
    WithRejection(Query(query), _): WithRejection<Query<EventListQuery>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedEventResponse>> {
    registry
        .event_repository()
        .find_all(query.try_into()?)
        .await
        .map(PaginatedEventResponse::from)
        .map(Json)
}

pub async fn show_event(
    _user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .event_repository()
        .find_by_id(event_id)
        .await
        .and_then(|event| match event {
            Some(event) => Ok(Json(event.into())),
            None => Err(AppError::EntityNotFound("Event not found".into())),
        })
}

pub async fn update_event(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateEventRequest>, AppError>,
) -> AppResult<Json<EventResponse>> {
    let update_event = UpdateEventRequestWithIds::new(event_id, user.id(), req);
    registry
        .event_repository()
        .update(update_event.try_into()?)
        .await
        .map(EventResponse::from)
        .map(Json)
}

pub async fn delete_event(
    user: AuthorizedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<EventId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    let delete_event = DeleteEvent {
        event_id,
        requested_user: user.id(),
    };
    registry
        .event_repository()
        .delete(delete_event)
        .await
        .map(|_| Json(MessageResponse::new("Event deleted successfully")))
}
