//! PostgreSQL item store

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::StoreError;
use crate::models::{Item, NewItem};
use crate::store::ItemStore;

// Casts let the table use any integer width for `id` and NUMERIC or
// DOUBLE PRECISION for `price`.
const LIST_ITEMS: &str = "SELECT id::BIGINT, name, price::FLOAT8 FROM items ORDER BY id ASC";

const INSERT_ITEM: &str = r#"
    INSERT INTO items (name, price)
    VALUES ($1, $2)
    RETURNING id::BIGINT
"#;

const UPDATE_ITEM: &str = r#"
    UPDATE items
    SET name = $1, price = $2
    WHERE id = $3
"#;

/// Item store backed by a Postgres connection pool.
#[derive(Debug, Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    /// Connects to `database_url`, failing if no connection can be opened.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        tracing::info!("Connected to PostgreSQL");
        Ok(Self::from_pool(pool))
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let rows: Vec<(i64, String, f64)> = sqlx::query_as(LIST_ITEMS)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name, price)| Item { id, name, price })
            .collect())
    }

    async fn insert(&self, item: &NewItem) -> Result<i64, StoreError> {
        let (id,): (i64,) = sqlx::query_as(INSERT_ITEM)
            .bind(&item.name)
            .bind(item.price)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    async fn update(&self, item: &Item) -> Result<u64, StoreError> {
        let result = sqlx::query(UPDATE_ITEM)
            .bind(&item.name)
            .bind(item.price)
            .bind(item.id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}
