use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rota_core::passenger::{Installment, Passenger};
use rota_core::repository::{PassengerRepository, RepoResult};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgPassengerRepository {
    pool: PgPool,
}

impl PgPassengerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    id: Uuid,
    trip_id: Uuid,
    name: String,
    document: String,
    seat: Option<i32>,
    referrer_document: Option<String>,
    price: f64,
    signal_amount: Option<f64>,
    signal_date: Option<NaiveDate>,
    installments: Value,
    promo_discount: Option<f64>,
    referral_discount: Option<f64>,
    referral_discount_eligible: Value,
    commission: Option<f64>,
    balance: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Legacy rows hold the eligibility flag as a boolean or as the strings
/// "true"/"false". Coercion rule: boolean passes through, the string "true"
/// is true, everything else is false.
fn coerce_eligibility(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s == "true",
        _ => false,
    }
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        let installments: Vec<Installment> =
            serde_json::from_value(row.installments).unwrap_or_default();
        let referral_discount_eligible = coerce_eligibility(&row.referral_discount_eligible);
        Passenger {
            id: row.id,
            trip_id: row.trip_id,
            name: row.name,
            document: row.document,
            seat: row.seat,
            referrer_document: row.referrer_document,
            price: row.price,
            signal_amount: row.signal_amount,
            signal_date: row.signal_date,
            installments,
            promo_discount: row.promo_discount,
            referral_discount: row.referral_discount,
            referral_discount_eligible,
            commission: row.commission,
            balance: row.balance,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PASSENGER_COLUMNS: &str = "id, trip_id, name, document, seat, referrer_document, price, \
     signal_amount, signal_date, installments, promo_discount, referral_discount, \
     referral_discount_eligible, commission, balance, created_at, updated_at";

#[async_trait]
impl PassengerRepository for PgPassengerRepository {
    async fn create(&self, passenger: &Passenger) -> RepoResult<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO passengers (id, trip_id, name, document, seat, referrer_document, price,
                signal_amount, signal_date, installments, promo_discount, referral_discount,
                referral_discount_eligible, commission, balance, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(passenger.id)
        .bind(passenger.trip_id)
        .bind(&passenger.name)
        .bind(&passenger.document)
        .bind(passenger.seat)
        .bind(&passenger.referrer_document)
        .bind(passenger.price)
        .bind(passenger.signal_amount)
        .bind(passenger.signal_date)
        .bind(serde_json::to_value(&passenger.installments)?)
        .bind(passenger.promo_discount)
        .bind(passenger.referral_discount)
        .bind(Value::Bool(passenger.referral_discount_eligible))
        .bind(passenger.commission)
        .bind(passenger.balance)
        .bind(passenger.created_at)
        .bind(passenger.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(passenger.id)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Passenger>> {
        let row: Option<PassengerRow> = sqlx::query_as(&format!(
            "SELECT {} FROM passengers WHERE id = $1",
            PASSENGER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Passenger::from))
    }

    async fn list_by_trip(&self, trip_id: Uuid) -> RepoResult<Vec<Passenger>> {
        let rows: Vec<PassengerRow> = sqlx::query_as(&format!(
            "SELECT {} FROM passengers WHERE trip_id = $1 ORDER BY created_at",
            PASSENGER_COLUMNS
        ))
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Passenger::from).collect())
    }

    async fn search(&self, term: &str) -> RepoResult<Vec<Passenger>> {
        let pattern = format!("%{}%", term);
        let rows: Vec<PassengerRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM passengers
            WHERE name ILIKE $1 OR document LIKE $1
            ORDER BY name
            "#,
            PASSENGER_COLUMNS
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Passenger::from).collect())
    }

    async fn update(&self, passenger: &Passenger) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE passengers
            SET trip_id = $1, name = $2, document = $3, seat = $4, referrer_document = $5,
                price = $6, signal_amount = $7, signal_date = $8, installments = $9,
                promo_discount = $10, referral_discount = $11, referral_discount_eligible = $12,
                commission = $13, balance = $14, updated_at = NOW()
            WHERE id = $15
            "#,
        )
        .bind(passenger.trip_id)
        .bind(&passenger.name)
        .bind(&passenger.document)
        .bind(passenger.seat)
        .bind(&passenger.referrer_document)
        .bind(passenger.price)
        .bind(passenger.signal_amount)
        .bind(passenger.signal_date)
        .bind(serde_json::to_value(&passenger.installments)?)
        .bind(passenger.promo_discount)
        .bind(passenger.referral_discount)
        .bind(Value::Bool(passenger.referral_discount_eligible))
        .bind(passenger.commission)
        .bind(passenger.balance)
        .bind(passenger.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(format!("passenger not found: {}", passenger.id).into());
        }
        Ok(())
    }

    async fn update_seat(&self, id: Uuid, seat: Option<i32>) -> RepoResult<()> {
        let result = sqlx::query("UPDATE passengers SET seat = $1, updated_at = NOW() WHERE id = $2")
            .bind(seat)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(format!("passenger not found: {}", id).into());
        }
        Ok(())
    }

    async fn list_with_commission(&self) -> RepoResult<Vec<Passenger>> {
        let rows: Vec<PassengerRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM passengers
            WHERE referrer_document IS NOT NULL AND commission > 0
            ORDER BY created_at
            "#,
            PASSENGER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Passenger::from).collect())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM passengers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_eligibility_coercion() {
        assert!(coerce_eligibility(&json!(true)));
        assert!(!coerce_eligibility(&json!(false)));
        assert!(coerce_eligibility(&json!("true")));
        assert!(!coerce_eligibility(&json!("false")));
        assert!(!coerce_eligibility(&json!("TRUE")));
        assert!(!coerce_eligibility(&json!(1)));
        assert!(!coerce_eligibility(&Value::Null));
    }
}
