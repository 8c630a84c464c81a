use std::sync::Arc;

use rota_core::repository::{
    BoardingScheduleRepository, PassengerRepository, SupplierRepository, TripRepository,
};
use rota_store::app_config::UiRules;

#[derive(Clone)]
pub struct AppState {
    pub trips: Arc<dyn TripRepository>,
    pub passengers: Arc<dyn PassengerRepository>,
    pub suppliers: Arc<dyn SupplierRepository>,
    pub boarding: Arc<dyn BoardingScheduleRepository>,
    pub ui_rules: UiRules,
}
