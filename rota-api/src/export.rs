use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use rota_core::export::{write_csv, Column};
use rota_ledger::{build_referral_index, passenger_rollup};
use rota_shared::dates::to_display_date;
use rota_shared::document::format_document;
use rota_shared::money::{format_bool, format_currency, format_currency_opt};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/trips/{trip_id}/export/passengers", get(export_passengers))
        .route("/v1/suppliers/export", get(export_suppliers))
        .route("/v1/reports/referrals/export", get(export_referrals))
}

fn csv_response(csv: String) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        csv,
    )
}

/// Passenger list of a trip, one row per passenger, values pre-formatted.
/// A trip with no passengers exports a header-only file.
async fn export_passengers(
    State(state): State<AppState>,
    Path(trip_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let passengers = state
        .passengers
        .list_by_trip(trip_id)
        .await
        .map_err(AppError::store)?;

    let columns = vec![
        Column::new("name", "Nome"),
        Column::new("document", "Documento"),
        Column::new("seat", "Poltrona"),
        Column::new("price", "Preço"),
        Column::new("signal_date", "Data do Sinal"),
        Column::new("total_paid", "Total Pago"),
        Column::new("promo_discount", "Desconto"),
        Column::new("balance", "Saldo"),
    ];

    let rows: Vec<Value> = passengers
        .iter()
        .map(|p| {
            let rollup = passenger_rollup(p);
            json!({
                "name": p.name,
                "document": format_document(&p.document),
                "seat": p.seat.map(|s| s.to_string()).unwrap_or_default(),
                "price": format_currency(p.price),
                "signal_date": p
                    .signal_date
                    .map(|d| to_display_date(&d.format("%Y-%m-%d").to_string()))
                    .unwrap_or_default(),
                "total_paid": format_currency(rollup.total_paid),
                "promo_discount": format_currency_opt(p.promo_discount),
                "balance": rollup.balance_display(),
            })
        })
        .collect();

    Ok(csv_response(write_csv(&columns, &rows)?))
}

async fn export_suppliers(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let suppliers = state
        .suppliers
        .list(false)
        .await
        .map_err(AppError::store)?;

    let columns = vec![
        Column::new("name", "Nome"),
        Column::new("city", "Cidade"),
        Column::new("phone", "Telefone"),
        Column::new("lodging", "Hospedagem"),
        Column::new("lodging_type", "Tipo de Hospedagem"),
        Column::new("excursions", "Passeios"),
        Column::new("tickets", "Ingressos"),
        Column::new("active", "Ativo"),
    ];

    let rows: Vec<Value> = suppliers
        .iter()
        .map(|s| {
            json!({
                "name": s.name,
                "city": s.city.clone().unwrap_or_default(),
                "phone": s.phone.clone().unwrap_or_default(),
                "lodging": format_bool(s.services.lodging),
                "lodging_type": s.lodging_type.clone().unwrap_or_default(),
                "excursions": format_bool(s.services.excursions),
                "tickets": format_bool(s.services.tickets),
                "active": format_bool(s.active),
            })
        })
        .collect();

    Ok(csv_response(write_csv(&columns, &rows)?))
}

/// Referral commissions flattened to one row per referred passenger.
async fn export_referrals(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let referred = state
        .passengers
        .list_with_commission()
        .await
        .map_err(AppError::store)?;

    let trips = state
        .trips
        .list(None)
        .await
        .map_err(AppError::store)?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    let referrer_names = crate::reports::resolve_referrer_names(&state, &referred).await?;
    let index = build_referral_index(&referred, &trips, &referrer_names);

    let columns = vec![
        Column::new("referrer", "Indicador"),
        Column::new("referrer_document", "Documento do Indicador"),
        Column::new("destination", "Destino"),
        Column::new("departure", "Partida"),
        Column::new("passenger", "Passageiro"),
        Column::new("commission", "Comissão"),
    ];

    let mut rows: Vec<Value> = Vec::new();
    for entry in &index {
        for trip in &entry.trips {
            for passenger in &trip.passengers {
                rows.push(json!({
                    "referrer": entry.name,
                    "referrer_document": format_document(&entry.document),
                    "destination": trip.destination,
                    "departure": to_display_date(&trip.departure_date.format("%Y-%m-%d").to_string()),
                    "passenger": passenger.name,
                    "commission": format_currency(passenger.commission),
                }));
            }
        }
    }

    Ok(csv_response(write_csv(&columns, &rows)?))
}
