use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rota_core::passenger::{Installment, Passenger};
use rota_ledger::passenger_rollup;
use rota_shared::document::{is_valid_document, strip_document};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/trips/{trip_id}/passengers", get(list_by_trip))
        .route("/v1/passengers", post(create_passenger))
        .route("/v1/passengers/search", get(search_passengers))
        .route(
            "/v1/passengers/{id}",
            get(get_passenger)
                .put(update_passenger)
                .delete(delete_passenger),
        )
}

#[derive(Debug, Deserialize)]
pub struct PassengerPayload {
    pub trip_id: Uuid,
    pub name: String,
    pub document: String,
    pub seat: Option<i32>,
    pub referrer_document: Option<String>,
    pub price: f64,
    pub signal_amount: Option<f64>,
    pub signal_date: Option<NaiveDate>,
    #[serde(default)]
    pub installments: Vec<Installment>,
    pub promo_discount: Option<f64>,
    pub referral_discount: Option<f64>,
    #[serde(default)]
    pub referral_discount_eligible: bool,
    pub commission: Option<f64>,
}

/// Passenger plus its derived figures, as the dashboard lists them.
#[derive(Debug, Serialize)]
pub struct PassengerResponse {
    #[serde(flatten)]
    pub passenger: Passenger,
    pub total_paid: f64,
    pub balance_display: String,
}

impl From<Passenger> for PassengerResponse {
    fn from(passenger: Passenger) -> Self {
        let rollup = passenger_rollup(&passenger);
        Self {
            passenger,
            total_paid: rollup.total_paid,
            balance_display: rollup.balance_display(),
        }
    }
}

fn apply_payload(passenger: &mut Passenger, payload: PassengerPayload) -> Result<(), AppError> {
    let document = strip_document(&payload.document);
    if !is_valid_document(&document) {
        return Err(AppError::ValidationError(format!(
            "Document must have 11 digits: {}",
            payload.document
        )));
    }

    passenger.trip_id = payload.trip_id;
    passenger.name = payload.name;
    passenger.document = document;
    passenger.seat = payload.seat;
    passenger.referrer_document = payload
        .referrer_document
        .map(|d| strip_document(&d))
        .filter(|d| !d.is_empty());
    passenger.price = payload.price;
    passenger.signal_amount = payload.signal_amount;
    passenger.signal_date = payload.signal_date;
    passenger.installments = Vec::new();
    for installment in payload.installments {
        passenger.set_installment(installment);
    }
    passenger.promo_discount = payload.promo_discount;
    passenger.referral_discount = payload.referral_discount;
    passenger.referral_discount_eligible = payload.referral_discount_eligible;
    passenger.commission = payload.commission;
    // The stored balance is always derived, never accepted from the client.
    passenger.balance = Some(passenger_rollup(passenger).balance);
    passenger.touch();
    Ok(())
}

async fn list_by_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<Vec<PassengerResponse>>, AppError> {
    let passengers = state
        .passengers
        .list_by_trip(trip_id)
        .await
        .map_err(AppError::store)?;
    Ok(Json(
        passengers.into_iter().map(PassengerResponse::from).collect(),
    ))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// Search by name or document. The dashboard waits out its debounce window
/// (see `/v1/ui/rules`) before calling this.
async fn search_passengers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<PassengerResponse>>, AppError> {
    let passengers = state
        .passengers
        .search(query.q.trim())
        .await
        .map_err(AppError::store)?;
    Ok(Json(
        passengers.into_iter().map(PassengerResponse::from).collect(),
    ))
}

async fn get_passenger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PassengerResponse>, AppError> {
    let passenger = state
        .passengers
        .get(id)
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFoundError(format!("Passenger not found: {}", id)))?;
    Ok(Json(PassengerResponse::from(passenger)))
}

async fn create_passenger(
    State(state): State<AppState>,
    Json(payload): Json<PassengerPayload>,
) -> Result<(StatusCode, Json<PassengerResponse>), AppError> {
    let mut passenger = Passenger::new(payload.trip_id, String::new(), String::new(), 0.0);
    apply_payload(&mut passenger, payload)?;

    state
        .passengers
        .create(&passenger)
        .await
        .map_err(AppError::store)?;
    tracing::info!(passenger_id = %passenger.id, trip_id = %passenger.trip_id, "passenger registered");
    Ok((StatusCode::CREATED, Json(PassengerResponse::from(passenger))))
}

async fn update_passenger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PassengerPayload>,
) -> Result<Json<PassengerResponse>, AppError> {
    let mut passenger = state
        .passengers
        .get(id)
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFoundError(format!("Passenger not found: {}", id)))?;

    apply_payload(&mut passenger, payload)?;
    state
        .passengers
        .update(&passenger)
        .await
        .map_err(AppError::store)?;
    Ok(Json(PassengerResponse::from(passenger)))
}

async fn delete_passenger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.passengers.delete(id).await.map_err(AppError::store)?;
    Ok(StatusCode::NO_CONTENT)
}
