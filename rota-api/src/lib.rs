use axum::{extract::State, http::Method, response::IntoResponse, routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod boarding;
pub mod error;
pub mod export;
pub mod passengers;
pub mod reports;
pub mod seating;
pub mod state;
pub mod suppliers;
pub mod trips;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/v1/ui/rules", get(ui_rules))
        .merge(trips::routes())
        .merge(passengers::routes())
        .merge(suppliers::routes())
        .merge(boarding::routes())
        .merge(seating::routes())
        .merge(reports::routes())
        .merge(export::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Knobs the dashboard reads at startup, e.g. the search-box quiet period.
async fn ui_rules(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "search_debounce_ms": state.ui_rules.search_debounce_ms,
    }))
}
