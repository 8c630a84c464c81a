use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use rota_core::boarding::BoardingSchedule;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/trips/{trip_id}/boarding",
            get(list_schedules).put(upsert_schedule),
        )
        .route("/v1/boarding/{id}", delete(delete_schedule))
}

#[derive(Debug, Deserialize)]
pub struct BoardingPayload {
    pub location: String,
    pub departure_time: Option<String>,
    pub return_time: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub guide: Option<String>,
}

async fn list_schedules(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<BoardingSchedule>>, AppError> {
    let schedules = state
        .boarding
        .list_by_trip(trip_id)
        .await
        .map_err(AppError::store)?;
    Ok(Json(schedules))
}

/// Merge keyed on (trip, location): repeated saves for the same location
/// update the existing record instead of duplicating it.
async fn upsert_schedule(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(payload): Json<BoardingPayload>,
) -> Result<Json<BoardingSchedule>, AppError> {
    if payload.location.trim().is_empty() {
        return Err(AppError::ValidationError("Location is required".into()));
    }

    let mut schedule = BoardingSchedule::new(trip_id, payload.location.trim().to_string());
    schedule.departure_time = payload.departure_time;
    schedule.return_time = payload.return_time;
    schedule.address = payload.address;
    schedule.image_url = payload.image_url;
    schedule.guide = payload.guide;

    let id = state
        .boarding
        .upsert(&schedule)
        .await
        .map_err(AppError::store)?;
    schedule.id = id;
    Ok(Json(schedule))
}

async fn delete_schedule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.boarding.delete(id).await.map_err(AppError::store)?;
    Ok(StatusCode::NO_CONTENT)
}
