use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rota_core::repository::{RepoResult, SupplierRepository};
use rota_core::supplier::{ServiceFlags, Supplier};
use sqlx::PgPool;
use uuid::Uuid;

pub struct PgSupplierRepository {
    pool: PgPool,
}

impl PgSupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SupplierRow {
    id: Uuid,
    name: String,
    phone: Option<String>,
    email: Option<String>,
    city: Option<String>,
    services: serde_json::Value,
    lodging_type: Option<String>,
    active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        let services: ServiceFlags = serde_json::from_value(row.services).unwrap_or_default();
        Supplier {
            id: row.id,
            name: row.name,
            phone: row.phone,
            email: row.email,
            city: row.city,
            services,
            lodging_type: row.lodging_type,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SUPPLIER_COLUMNS: &str =
    "id, name, phone, email, city, services, lodging_type, active, created_at, updated_at";

#[async_trait]
impl SupplierRepository for PgSupplierRepository {
    async fn create(&self, supplier: &Supplier) -> RepoResult<Uuid> {
        sqlx::query(
            r#"
            INSERT INTO suppliers (id, name, phone, email, city, services, lodging_type, active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.city)
        .bind(serde_json::to_value(supplier.services)?)
        .bind(&supplier.lodging_type)
        .bind(supplier.active)
        .bind(supplier.created_at)
        .bind(supplier.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(supplier.id)
    }

    async fn get(&self, id: Uuid) -> RepoResult<Option<Supplier>> {
        let row: Option<SupplierRow> = sqlx::query_as(&format!(
            "SELECT {} FROM suppliers WHERE id = $1",
            SUPPLIER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Supplier::from))
    }

    async fn list(&self, active_only: bool) -> RepoResult<Vec<Supplier>> {
        let rows: Vec<SupplierRow> = sqlx::query_as(&format!(
            r#"
            SELECT {} FROM suppliers
            WHERE ($1 = FALSE OR active = TRUE)
            ORDER BY name
            "#,
            SUPPLIER_COLUMNS
        ))
        .bind(active_only)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Supplier::from).collect())
    }

    async fn update(&self, supplier: &Supplier) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE suppliers
            SET name = $1, phone = $2, email = $3, city = $4, services = $5,
                lodging_type = $6, active = $7, updated_at = NOW()
            WHERE id = $8
            "#,
        )
        .bind(&supplier.name)
        .bind(&supplier.phone)
        .bind(&supplier.email)
        .bind(&supplier.city)
        .bind(serde_json::to_value(supplier.services)?)
        .bind(&supplier.lodging_type)
        .bind(supplier.active)
        .bind(supplier.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(format!("supplier not found: {}", supplier.id).into());
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> RepoResult<()> {
        sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
