//! PostgreSQL record store for portal-service.

use crate::models::{RawCustomer, RawEquipment, RawRecord, ServiceDocumentRow};
use crate::services::error::PortalError;
use crate::services::metrics::DB_QUERY_DURATION;
use crate::services::store::RecordStore;
use async_trait::async_trait;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "portal-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    async fn fetch_header(&self, token: &str) -> Result<Option<ServiceDocumentRow>, PortalError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_service_document"])
            .start_timer();

        let row = sqlx::query_as::<_, ServiceDocumentRow>(
            r#"
            SELECT id, service_date, service_type, customer_id
            FROM service_documents
            WHERE sharing_token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(row)
    }

    async fn fetch_customer(&self, customer_id: Uuid) -> Result<Option<RawCustomer>, PortalError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_customer"])
            .start_timer();

        let customer = sqlx::query_as::<_, RawCustomer>(
            r#"
            SELECT name, address, phone, email
            FROM all_customers
            WHERE id = $1
            "#,
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(customer)
    }

    async fn fetch_equipment(&self, document_id: Uuid) -> Result<Vec<RawEquipment>, PortalError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_equipment"])
            .start_timer();

        let equipment = sqlx::query_as::<_, RawEquipment>(
            r#"
            SELECT id, equipment_type, model, serial_number, installation_date, warranty_expires
            FROM equipment
            WHERE service_document_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(document_id)
        .fetch_all(&self.pool)
        .await?;

        timer.observe_duration();
        Ok(equipment)
    }
}

#[async_trait]
impl RecordStore for Database {
    #[instrument(skip_all)]
    async fn find_by_sharing_token(&self, token: &str) -> Result<Option<RawRecord>, PortalError> {
        let Some(header) = self.fetch_header(token).await? else {
            return Ok(None);
        };

        let customer = match header.customer_id {
            Some(customer_id) => self.fetch_customer(customer_id).await?,
            None => None,
        };
        let equipment = self.fetch_equipment(header.id).await?;

        tracing::debug!(
            document_id = %header.id,
            equipment_rows = equipment.len(),
            "Loaded service document"
        );

        Ok(Some(RawRecord::from_parts(header, customer, equipment)))
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), PortalError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["health_check"])
            .start_timer();

        sqlx::query("SELECT 1").execute(&self.pool).await?;

        timer.observe_duration();
        Ok(())
    }
}
