use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rota_core::boarding::BoardingSchedule;
use rota_core::repository::{BoardingScheduleRepository, RepoResult};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgBoardingScheduleRepository {
    pool: PgPool,
}

impl PgBoardingScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BoardingRow {
    id: Uuid,
    trip_id: Uuid,
    location: String,
    departure_time: Option<String>,
    return_time: Option<String>,
    address: Option<String>,
    image_url: Option<String>,
    guide: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BoardingRow> for BoardingSchedule {
    fn from(row: BoardingRow) -> Self {
        BoardingSchedule {
            id: row.id,
            trip_id: row.trip_id,
            location: row.location,
            departure_time: row.departure_time,
            return_time: row.return_time,
            address: row.address,
            image_url: row.image_url,
            guide: row.guide,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl BoardingScheduleRepository for PgBoardingScheduleRepository {
    async fn list_by_trip(&self, trip_id: Uuid) -> RepoResult<Vec<BoardingSchedule>> {
        let rows: Vec<BoardingRow> = sqlx::query_as(
            r#"
            SELECT id, trip_id, location, departure_time, return_time, address, image_url, guide, created_at, updated_at
            FROM boarding_schedules WHERE trip_id = $1 ORDER BY location
            "#,
        )
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(BoardingSchedule::from).collect())
    }

    async fn upsert(&self, schedule: &BoardingSchedule) -> RepoResult<Uuid> {
        // One record per (trip, location); the unique key carries the merge.
        let (id,): (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO boarding_schedules
                (id, trip_id, location, departure_time, return_time, address, image_url, guide, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (trip_id, location) DO UPDATE
            SET departure_time = EXCLUDED.departure_time,
                return_time = EXCLUDED.return_time,
                address = EXCLUDED.address,
                image_url = EXCLUDED.image_url,
                guide = EXCLUDED.guide,
                updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(schedule.id)
        .bind(schedule.trip_id)
        .bind(&schedule.location)
        .bind(&schedule.departure_time)
        .bind(&schedule.return_time)
        .bind(&schedule.address)
        .bind(&schedule.image_url)
        .bind(&schedule.guide)
        .bind(schedule.created_at)
        .bind(schedule.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM boarding_schedules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
