pub mod app_config;
pub mod boarding_repo;
pub mod database;
pub mod memory;
pub mod passenger_repo;
pub mod supplier_repo;
pub mod trip_repo;

pub use database::DbClient;
