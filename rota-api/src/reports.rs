use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use rota_core::trip::Trip;
use rota_ledger::{
    build_referral_index, build_voucher, passenger_rollup, trip_expense_summary, trip_rollup,
    ExpenseSummary, ReferrerEntry, TripRollup,
};
use rota_seating::{seat_map, SeatMapEntry};
use rota_shared::document::format_document;
use rota_shared::money::format_currency;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/trips/{trip_id}/report", get(trip_report))
        .route("/v1/reports/referrals", get(referral_report))
        .route(
            "/v1/trips/{trip_id}/passengers/{passenger_id}/voucher",
            get(passenger_voucher),
        )
}

/// One passenger line of the trip financial report, pre-formatted for
/// display.
#[derive(Debug, Serialize)]
pub struct PassengerReportLine {
    pub passenger_id: Uuid,
    pub name: String,
    pub document: String,
    pub seat: Option<i32>,
    pub price: String,
    pub total_paid: String,
    pub promo_discount: String,
    pub referral_discount: String,
    pub balance: String,
}

#[derive(Debug, Serialize)]
pub struct TripReportResponse {
    pub trip: Trip,
    pub passengers: Vec<PassengerReportLine>,
    pub totals: TripRollup,
    pub expenses: ExpenseSummary,
    pub seat_map: Vec<SeatMapEntry>,
}

async fn trip_report(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<Json<TripReportResponse>, AppError> {
    let trip = state
        .trips
        .get(trip_id)
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFoundError(format!("Trip not found: {}", trip_id)))?;

    let passengers = state
        .passengers
        .list_by_trip(trip_id)
        .await
        .map_err(AppError::store)?;

    let lines = passengers
        .iter()
        .map(|p| {
            let rollup = passenger_rollup(p);
            PassengerReportLine {
                passenger_id: p.id,
                name: p.name.clone(),
                document: format_document(&p.document),
                seat: p.seat,
                price: format_currency(p.price),
                total_paid: format_currency(rollup.total_paid),
                promo_discount: format_currency(rollup.promo_discount),
                referral_discount: format_currency(rollup.referral_discount),
                balance: rollup.balance_display(),
            }
        })
        .collect();

    Ok(Json(TripReportResponse {
        totals: trip_rollup(&passengers),
        expenses: trip_expense_summary(&trip.expenses),
        seat_map: seat_map(trip.seat_capacity, &passengers),
        passengers: lines,
        trip,
    }))
}

/// Referral commission report: referrer → trip → referred passengers.
///
/// Referrer names resolve against the passenger population and may
/// legitimately miss; the index renders those with a placeholder.
async fn referral_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReferrerEntry>>, AppError> {
    let referred = state
        .passengers
        .list_with_commission()
        .await
        .map_err(AppError::store)?;

    let trips: HashMap<Uuid, Trip> = state
        .trips
        .list(None)
        .await
        .map_err(AppError::store)?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let referrer_names = resolve_referrer_names(&state, &referred).await?;

    Ok(Json(build_referral_index(&referred, &trips, &referrer_names)))
}

/// Resolve referrer names against the passenger population. A referrer that
/// never traveled is simply absent from the result; the index renders those
/// with its placeholder.
pub(crate) async fn resolve_referrer_names(
    state: &AppState,
    referred: &[rota_core::passenger::Passenger],
) -> Result<HashMap<String, String>, AppError> {
    let mut names: HashMap<String, String> = HashMap::new();
    for document in referred
        .iter()
        .filter_map(|p| p.referrer_document.clone())
        .collect::<std::collections::HashSet<_>>()
    {
        let matches = state
            .passengers
            .search(&document)
            .await
            .map_err(AppError::store)?;
        if let Some(referrer) = matches.iter().find(|p| p.document == document) {
            names.insert(document, referrer.name.clone());
        }
    }
    Ok(names)
}

#[derive(Debug, Deserialize)]
pub struct VoucherQuery {
    /// Boarding location to print on the voucher; defaults to the trip's
    /// first schedule.
    pub location: Option<String>,
}

async fn passenger_voucher(
    State(state): State<AppState>,
    Path((trip_id, passenger_id)): Path<(Uuid, Uuid)>,
    Query(query): Query<VoucherQuery>,
) -> Result<Json<Value>, AppError> {
    let trip = state
        .trips
        .get(trip_id)
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFoundError(format!("Trip not found: {}", trip_id)))?;

    let passenger = state
        .passengers
        .get(passenger_id)
        .await
        .map_err(AppError::store)?
        .filter(|p| p.trip_id == trip_id)
        .ok_or_else(|| {
            AppError::NotFoundError(format!("Passenger not found: {}", passenger_id))
        })?;

    let schedules = state
        .boarding
        .list_by_trip(trip_id)
        .await
        .map_err(AppError::store)?;
    let schedule = match &query.location {
        Some(location) => schedules.iter().find(|s| &s.location == location),
        None => schedules.first(),
    };

    let voucher = build_voucher(&trip, &passenger, schedule);
    Ok(Json(voucher.to_record()))
}
