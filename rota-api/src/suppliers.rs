use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rota_core::supplier::{ServiceFlags, Supplier};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/suppliers", get(list_suppliers).post(create_supplier))
        .route(
            "/v1/suppliers/{id}",
            get(get_supplier).put(update_supplier).delete(delete_supplier),
        )
}

#[derive(Debug, Deserialize)]
pub struct SupplierPayload {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    #[serde(default)]
    pub services: ServiceFlags,
    pub lodging_type: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub active_only: bool,
}

fn apply_payload(supplier: &mut Supplier, payload: SupplierPayload) -> Result<(), AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::ValidationError("Name is required".into()));
    }
    supplier.name = payload.name;
    supplier.phone = payload.phone;
    supplier.email = payload.email;
    supplier.city = payload.city;
    supplier.services = payload.services;
    supplier.lodging_type = payload.lodging_type;
    supplier.active = payload.active;
    supplier.touch();
    Ok(())
}

async fn list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    let suppliers = state
        .suppliers
        .list(query.active_only)
        .await
        .map_err(AppError::store)?;
    Ok(Json(suppliers))
}

async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Supplier>, AppError> {
    let supplier = state
        .suppliers
        .get(id)
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFoundError(format!("Supplier not found: {}", id)))?;
    Ok(Json(supplier))
}

async fn create_supplier(
    State(state): State<AppState>,
    Json(payload): Json<SupplierPayload>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    let mut supplier = Supplier::new(String::new());
    apply_payload(&mut supplier, payload)?;

    state
        .suppliers
        .create(&supplier)
        .await
        .map_err(AppError::store)?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplierPayload>,
) -> Result<Json<Supplier>, AppError> {
    let mut supplier = state
        .suppliers
        .get(id)
        .await
        .map_err(AppError::store)?
        .ok_or_else(|| AppError::NotFoundError(format!("Supplier not found: {}", id)))?;

    apply_payload(&mut supplier, payload)?;
    state
        .suppliers
        .update(&supplier)
        .await
        .map_err(AppError::store)?;
    Ok(Json(supplier))
}

async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.suppliers.delete(id).await.map_err(AppError::store)?;
    Ok(StatusCode::NO_CONTENT)
}
