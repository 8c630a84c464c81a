use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-trip, per-location boarding record: where and when the group boards on
/// each leg, plus the responsible guide.
///
/// At most one record exists per (trip, location); writes go through the
/// repository's upsert keyed on that pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardingSchedule {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub location: String,
    /// Form fields, kept as entered ("06:30").
    pub departure_time: Option<String>,
    pub return_time: Option<String>,
    pub address: Option<String>,
    /// Shared map/landmark image shown on vouchers.
    pub image_url: Option<String>,
    pub guide: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BoardingSchedule {
    pub fn new(trip_id: Uuid, location: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            trip_id,
            location,
            departure_time: None,
            return_time: None,
            address: None,
            image_url: None,
            guide: None,
            created_at: now,
            updated_at: now,
        }
    }
}
