use crate::config::Config;
use crate::db::models::{Breed, NewBreed};
use crate::db::repository::BreedRepository;
use crate::db::schema::POSTGRES_INIT;
use crate::error::BallotError;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::{Pool, Postgres};
use std::str::FromStr;
use tracing::info;

pub type PgPool = Pool<Postgres>;

const BREED_COLUMNS: &str = "id, breed, subbreed, votes, image";

/// Open the pool described by `cfg`.
///
/// With `LOCAL` set the connection is plaintext; otherwise TLS is required but
/// the server certificate is not verified.
pub async fn connect(cfg: &Config) -> Result<PgPool, BallotError> {
    let ssl_mode = if cfg.local {
        PgSslMode::Disable
    } else {
        PgSslMode::Require
    };
    let connect_opts = PgConnectOptions::from_str(&cfg.database_url)?.ssl_mode(ssl_mode);
    let pool = PgPoolOptions::new()
        .max_connections(cfg.db_max_connections)
        .connect_with(connect_opts)
        .await?;
    info!(local = cfg.local, "connected to breed store");
    Ok(pool)
}

#[derive(Clone)]
pub struct BreedStore {
    pool: PgPool,
}

impl BreedStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the table if it is missing.
    pub async fn init_schema(&self) -> Result<(), BallotError> {
        // sqlx::query runs one statement at a time
        for stmt in POSTGRES_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl BreedRepository for BreedStore {
    async fn count(&self) -> Result<i64, BallotError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM breeds")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    async fn insert(&self, row: NewBreed) -> Result<Breed, BallotError> {
        let sql = format!(
            "INSERT INTO breeds (breed, subbreed, votes, image) VALUES ($1, $2, $3, $4) RETURNING {BREED_COLUMNS}"
        );
        let breed = sqlx::query_as::<_, Breed>(&sql)
            .bind(row.breed)
            .bind(row.subbreed)
            .bind(row.votes)
            .bind(row.image)
            .fetch_one(&self.pool)
            .await?;
        Ok(breed)
    }

    async fn list_all(&self) -> Result<Vec<Breed>, BallotError> {
        let sql = format!("SELECT {BREED_COLUMNS} FROM breeds ORDER BY id");
        let rows = sqlx::query_as::<_, Breed>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn top_by_votes(&self, limit: i64) -> Result<Vec<Breed>, BallotError> {
        let sql = format!("SELECT {BREED_COLUMNS} FROM breeds ORDER BY votes DESC LIMIT $1");
        let rows = sqlx::query_as::<_, Breed>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn random(&self, limit: i64) -> Result<Vec<Breed>, BallotError> {
        let sql = format!("SELECT {BREED_COLUMNS} FROM breeds ORDER BY random() LIMIT $1");
        let rows = sqlx::query_as::<_, Breed>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn increment_votes(&self, id: i32) -> Result<Option<Breed>, BallotError> {
        let sql =
            format!("UPDATE breeds SET votes = votes + 1 WHERE id = $1 RETURNING {BREED_COLUMNS}");
        let row = sqlx::query_as::<_, Breed>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
