use sqlx::{pool::PoolConnection, postgres::PgPoolOptions, Pool, Postgres, Transaction};
use std::time::Duration;
use tracing::info;

use crate::models::{Artist, NewArtist, NewShow, NewVenue, Show, Venue};
use crate::services::submission::{Store, StoreTransaction};

#[derive(Clone)]
pub struct Database {
    pub pool: Pool<Postgres>,
    pub track_modifications: bool,
}

impl Database {
    pub async fn new(database_url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        let pool = Self::pool_options(pool_size).connect(database_url).await?;

        Ok(Database { pool, track_modifications: false })
    }

    /// Pool that dials the server only when a connection is first needed.
    pub fn connect_lazy(database_url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        let pool = Self::pool_options(pool_size).connect_lazy(database_url)?;

        Ok(Database { pool, track_modifications: false })
    }

    pub fn with_track_modifications(mut self, enabled: bool) -> Self {
        self.track_modifications = enabled;
        self
    }

    fn pool_options(pool_size: u32) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(5))
    }

    /// One connection for the lifetime of a request; it goes back to the
    /// pool when dropped, whichever way the request ends.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>, sqlx::Error> {
        self.pool.acquire().await
    }

    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        info!("Running database migrations...");
        sqlx::migrate!("./src/migrations")
            .run(&self.pool)
            .await?;
        info!("Migrations completed");
        Ok(())
    }
}

/// A write transaction on a pooled connection. Dropping it without
/// `commit` rolls back and releases the connection.
pub struct PgTransaction {
    tx: Transaction<'static, Postgres>,
}

impl Store for Database {
    type Tx = PgTransaction;

    async fn begin(&self) -> Result<PgTransaction, sqlx::Error> {
        let tx = self.pool.begin().await?;
        Ok(PgTransaction { tx })
    }

    fn tracks_modifications(&self) -> bool {
        self.track_modifications
    }
}

impl StoreTransaction for PgTransaction {
    async fn insert_venue(&mut self, venue: &NewVenue) -> Result<i32, sqlx::Error> {
        Venue::insert(venue, &mut self.tx).await
    }

    async fn insert_artist(&mut self, artist: &NewArtist) -> Result<i32, sqlx::Error> {
        Artist::insert(artist, &mut self.tx).await
    }

    async fn insert_show(&mut self, show: &NewShow) -> Result<i32, sqlx::Error> {
        Show::insert(show, &mut self.tx).await
    }

    async fn commit(self) -> Result<(), sqlx::Error> {
        self.tx.commit().await
    }

    async fn rollback(self) -> Result<(), sqlx::Error> {
        self.tx.rollback().await
    }
}
