use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    Statement,
};
use serde::Serialize;
use tracing::info;

use crate::entities::prelude::*;
use crate::seed::SeedBatch;

pub mod migrator;
pub mod repositories;

pub use repositories::user::{CreatedUser, DEFAULT_TEST_EMAIL, DEFAULT_TEST_PASSWORD};

/// Row counts for the core tables, serialized verbatim into `/api/status`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TableCounts {
    pub user_count: u64,
    pub bundle_count: u64,
    pub experience_count: u64,
    pub booking_count: u64,
    pub review_count: u64,
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Read-only counts for the core tables. No side effects.
    pub async fn table_counts(&self) -> Result<TableCounts> {
        Ok(TableCounts {
            user_count: Users::find().count(&self.conn).await?,
            bundle_count: Bundles::find().count(&self.conn).await?,
            experience_count: Experiences::find().count(&self.conn).await?,
            booking_count: Bookings::find().count(&self.conn).await?,
            review_count: Reviews::find().count(&self.conn).await?,
        })
    }

    /// Drop the entire schema and replay the migration set, including the
    /// baseline fixture rows. Irreversible, all-or-nothing.
    pub async fn reset(&self) -> Result<()> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::fresh(&self.conn)
            .await
            .context("Schema reset failed")?;

        info!("Database schema dropped and reinitialized");
        Ok(())
    }

    /// Atomically replace all seeded data with a freshly generated batch.
    pub async fn reseed(&self, batch: &SeedBatch) -> Result<()> {
        self.seed_repo().reseed(batch).await
    }

    pub async fn create_test_user(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<CreatedUser> {
        self.user_repo().create_test_user(email, password).await
    }

    fn seed_repo(&self) -> repositories::seed::SeedRepository {
        repositories::seed::SeedRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }
}
