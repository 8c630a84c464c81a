use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use rota_seating::{BatchReport, SeatChange, SeatManager, SeatingError};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/trips/{trip_id}/passengers/{passenger_id}/seat-options",
            get(seat_options),
        )
        .route("/v1/trips/{trip_id}/seats", post(save_seats))
}

#[derive(Debug, Serialize)]
pub struct SeatOptionsResponse {
    /// `null` is the leading "unassigned" option.
    pub options: Vec<Option<i32>>,
}

async fn seat_options(
    State(state): State<AppState>,
    Path((trip_id, passenger_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<SeatOptionsResponse>, AppError> {
    let manager = SeatManager::new(state.trips.clone(), state.passengers.clone());
    let options = manager
        .options_for(trip_id, passenger_id)
        .await
        .map_err(|e| match e {
            SeatingError::TripNotFound(id) => {
                AppError::NotFoundError(format!("Trip not found: {}", id))
            }
            SeatingError::Store(msg) => AppError::StoreError(msg),
        })?;

    Ok(Json(SeatOptionsResponse {
        options: options.iter().map(|o| o.number()).collect(),
    }))
}

/// Best-effort batch save: every change is attempted, failures are reported
/// per passenger, earlier successes stand. A change whose seat another
/// passenger already holds is one of those failures. 200 when everything
/// landed, 207 on partial failure.
async fn save_seats(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
    Json(changes): Json<Vec<SeatChange>>,
) -> Result<(StatusCode, Json<BatchReport>), AppError> {
    let manager = SeatManager::new(state.trips.clone(), state.passengers.clone());
    let report = manager
        .save_assignments(trip_id, &changes)
        .await
        .map_err(|e| match e {
            SeatingError::TripNotFound(id) => {
                AppError::NotFoundError(format!("Trip not found: {}", id))
            }
            SeatingError::Store(msg) => AppError::StoreError(msg),
        })?;

    if !report.all_succeeded() {
        tracing::warn!(
            %trip_id,
            failed = report.failures().len(),
            total = report.outcomes.len(),
            "batch seat save finished with failures"
        );
    }

    let status = if report.all_succeeded() {
        StatusCode::OK
    } else {
        StatusCode::MULTI_STATUS
    };
    Ok((status, Json(report)))
}
