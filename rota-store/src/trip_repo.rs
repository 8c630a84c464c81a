use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rota_core::repository::{RepoResult, TripRepository};
use rota_core::trip::{Trip, TripExpenses};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgTripRepository {
    pool: PgPool,
}

impl PgTripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TripRow {
    id: Uuid,
    destination: String,
    departure_date: NaiveDate,
    return_date: NaiveDate,
    seat_capacity: i32,
    price: f64,
    expenses: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<TripRow> for Trip {
    fn from(row: TripRow) -> Self {
        // Malformed legacy expense blobs degrade to an empty form.
        let expenses: TripExpenses = serde_json::from_value(row.expenses).unwrap_or_default();
        Trip {
            id: row.id,
            destination: row.destination,
            departure_date: row.departure_date,
            return_date: row.return_date,
            seat_capacity: row.seat_capacity,
            price: row.price,
            expenses,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const TRIP_COLUMNS: &str = "id, destination, departure_date, return_date, seat_capacity, price, expenses, created_at, updated_at";

#[async_trait]
impl TripRepository for PgTripRepository {
    async fn create(&self, trip: &Trip) -> RepoResult<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO trips (id, destination, departure_date, return_date, seat_capacity, price, expenses, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(trip.id)
        .bind(&trip.destination)
        .bind(trip.departure_date)
        .bind(trip.return_date)
        .bind(trip.seat_capacity)
        .bind(trip.price)
        .bind(serde_json::to_value(&trip.expenses)?)
        .bind(trip.created_at)
        .bind(trip.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(trip.id)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Trip>> {
        let row: Option<TripRow> =
            sqlx::query_as(&format!("SELECT {} FROM trips WHERE id = $1", TRIP_COLUMNS))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(Trip::from))
    }

    async fn list(&self, destination: Option<&str>) -> RepoResult<Vec<Trip>> {
        let rows: Vec<TripRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM trips
            WHERE ($1::text IS NULL OR destination ILIKE $1)
            ORDER BY departure_date DESC
            "#,
            TRIP_COLUMNS
        ))
        .bind(destination.map(|d| format!("%{}%", d)))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Trip::from).collect())
    }

    async fn update(&self, trip: &Trip) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE trips
            SET destination = $1, departure_date = $2, return_date = $3,
                seat_capacity = $4, price = $5, expenses = $6, updated_at = NOW()
            WHERE id = $7
            "#,
        )
        .bind(&trip.destination)
        .bind(trip.departure_date)
        .bind(trip.return_date)
        .bind(trip.seat_capacity)
        .bind(trip.price)
        .bind(serde_json::to_value(&trip.expenses)?)
        .bind(trip.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(format!("trip not found: {}", trip.id).into());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
