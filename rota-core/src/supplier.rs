use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Standalone catalog entry for a service supplier. No relation to trips or
/// passengers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub city: Option<String>,
    pub services: ServiceFlags,
    /// Free text: hotel, pousada, resort...
    pub lodging_type: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Which services this supplier offers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceFlags {
    pub charter_bus: bool,
    pub charter_van: bool,
    pub charter_car: bool,
    pub lodging: bool,
    pub guides: bool,
    pub excursions: bool,
    pub tickets: bool,
    pub parking: bool,
    pub gifts: bool,
}

impl Supplier {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            phone: None,
            email: None,
            city: None,
            services: ServiceFlags::default(),
            lodging_type: None,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
