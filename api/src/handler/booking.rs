use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use kernel::model::{booking::event::DeleteBooking, id::BookingId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::{
    booking::{BookingResponse, CreateBookingRequest},
    message::MessageResponse,
};

pub async fn book_event(
    State(registry): State<AppRegistry>,
    WithRejection(Json(req), _): WithRejection<Json<CreateBookingRequest>, AppError>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    registry
        .booking_repository()
        .create(req.try_into()?)
        .await
        .map(|booking| (StatusCode::CREATED, Json(booking.into())))
}

pub async fn show_booking_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    registry
        .booking_repository()
        .find_all()
        .await
        .map(|v| v.into_iter().map(BookingResponse::from).collect())
        .map(Json)
}

pub async fn cancel_booking(
    WithRejection(Path(booking_id), _): WithRejection<Path<BookingId>, AppError>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<MessageResponse>> {
    registry
        .booking_repository()
        .delete(DeleteBooking::new(booking_id))
        .await
        .map(|_| Json(MessageResponse::new("Booking cancelled successfully")))
}
