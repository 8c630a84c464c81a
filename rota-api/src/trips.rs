use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use rota_core::trip::{Trip, TripExpenses};
use rota_shared::dates::parse_display_date_strict;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/trips", get(list_trips).post(create_trip))
        .route(
            "/v1/trips/{id}",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
}

/// Form dates arrive as "DD/MM/YYYY"; API clients may also send the storage
/// format directly.
pub(crate) fn parse_date_field(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    parse_display_date_strict(value)
        .or_else(|| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok())
        .ok_or_else(|| AppError::ValidationError(format!("Invalid date for {}: {}", field, value)))
}

#[derive(Debug, Deserialize)]
pub struct TripPayload {
    pub destination: String,
    pub departure_date: String,
    pub return_date: String,
    pub seat_capacity: i32,
    pub price: f64,
    #[serde(default)]
    pub expenses: TripExpenses,
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub destination: Option<String>,
}

async fn list_trips(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Trip>>, AppError> {
    let trips = state
        .trips
        .list(query.destination.as_deref())
        .await
        .map_err(AppError::store)?;
    Ok(Json(trips))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Trip>, AppError> {
    let trip = state
        .trips
        .get(id)
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFoundError(format!("Trip not found: {}", id)))?;
    Ok(Json(trip))
}

async fn create_trip(
    State(state): State<AppState>,
    Json(payload): Json<TripPayload>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    if payload.destination.trim().is_empty() {
        return Err(AppError::ValidationError("Destination is required".into()));
    }
    let departure = parse_date_field("departure_date", &payload.departure_date)?;
    let return_date = parse_date_field("return_date", &payload.return_date)?;

    let mut trip = Trip::new(
        payload.destination,
        departure,
        return_date,
        payload.seat_capacity,
        payload.price,
    );
    trip.expenses = payload.expenses;

    state.trips.create(&trip).await.map_err(AppError::store)?;
    tracing::info!(trip_id = %trip.id, destination = %trip.destination, "trip created");
    Ok((StatusCode::CREATED, Json(trip)))
}

async fn update_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TripPayload>,
) -> Result<Json<Trip>, AppError> {
    let mut trip = state
        .trips
        .get(id)
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFoundError(format!("Trip not found: {}", id)))?;

    trip.destination = payload.destination;
    trip.departure_date = parse_date_field("departure_date", &payload.departure_date)?;
    trip.return_date = parse_date_field("return_date", &payload.return_date)?;
    trip.seat_capacity = payload.seat_capacity.max(0);
    trip.price = payload.price;
    trip.expenses = payload.expenses;
    trip.touch();

    state.trips.update(&trip).await.map_err(AppError::store)?;
    Ok(Json(trip))
}

/// Deletes the trip only. Passenger records stay; removing them is a
/// separate operator action.
async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.trips.delete(id).await.map_err(AppError::store)?;
    Ok(StatusCode::NO_CONTENT)
}
