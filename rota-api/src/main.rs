use std::net::SocketAddr;
use std::sync::Arc;

use rota_api::{app, AppState};
use rota_store::boarding_repo::PgBoardingScheduleRepository;
use rota_store::passenger_repo::PgPassengerRepository;
use rota_store::supplier_repo::PgSupplierRepository;
use rota_store::trip_repo::PgTripRepository;
use rota_store::DbClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rota_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = rota_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Rota API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let app_state = AppState {
        trips: Arc::new(PgTripRepository::new(db.pool.clone())),
        passengers: Arc::new(PgPassengerRepository::new(db.pool.clone())),
        suppliers: Arc::new(PgSupplierRepository::new(db.pool.clone())),
        boarding: Arc::new(PgBoardingScheduleRepository::new(db.pool.clone())),
        ui_rules: config.ui_rules.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
