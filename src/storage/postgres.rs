//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresOrderStore`, an [`OrderStore`] over the single `orders`
//! table.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! order-desk = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Connections
//!
//! There is no pool. Every operation opens one `PgConnection` from the
//! configured connection string and owns it for the rest of the call; the
//! connection is dropped (and the socket closed) on every exit path, success
//! or error, before control returns to the caller.

use crate::config::DatabaseConfig;
use crate::core::error::{PersistenceError, Result};
use crate::core::order::{NewOrder, Order};
use crate::core::store::OrderStore;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{Connection, PgConnection};
use std::num::NonZeroU32;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// SQL
// ---------------------------------------------------------------------------

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS orders (
  order_id SERIAL PRIMARY KEY,
  customer_id TEXT NOT NULL CHECK (customer_id <> ''),
  order_date DATE NOT NULL,
  ship_date DATE CHECK (ship_date IS NULL OR ship_date >= order_date),
  status TEXT NOT NULL
    CHECK (status IN ('pending', 'processing', 'shipped', 'delivered', 'cancelled')),
  channel TEXT NOT NULL
    CHECK (channel IN ('website', 'social', 'marketplace', 'partner')),
  total_amount_usd NUMERIC(12,2) NOT NULL CHECK (total_amount_usd > 0),
  discount_pct NUMERIC(5,2) NOT NULL DEFAULT 0 CHECK (discount_pct BETWEEN 0 AND 100),
  payment_method TEXT NOT NULL
    CHECK (payment_method IN ('card', 'cash', 'bank_transfer', 'e-wallet')),
  region TEXT NOT NULL DEFAULT '',
  created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
)";

const CREATE_INDEX_SQL: &str =
    "CREATE INDEX IF NOT EXISTS orders_created_at_idx ON orders (created_at DESC)";

const INSERT_SQL: &str = "
INSERT INTO orders (
  customer_id, order_date, ship_date, status, channel,
  total_amount_usd, discount_pct, payment_method, region
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
RETURNING order_id";

const SELECT_LATEST_SQL: &str = "
SELECT order_id, customer_id, order_date, ship_date, status, channel,
       total_amount_usd, discount_pct, payment_method, region, created_at
FROM orders
ORDER BY created_at DESC
LIMIT $1";

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// One `orders` row as the driver sees it
///
/// Nullable where tables created by older deployments allowed NULL.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: i32,
    customer_id: String,
    order_date: NaiveDate,
    ship_date: Option<NaiveDate>,
    status: Option<String>,
    channel: Option<String>,
    total_amount_usd: Option<Decimal>,
    discount_pct: Option<Decimal>,
    payment_method: Option<String>,
    region: Option<String>,
    created_at: DateTime<Utc>,
}

fn required<T>(value: Option<T>, column: &str, order_id: i32) -> Result<T, PersistenceError> {
    value.ok_or_else(|| PersistenceError::Decode {
        message: format!("order {} has NULL {}", order_id, column),
    })
}

fn member<T: std::str::FromStr>(value: Option<String>, column: &str, order_id: i32) -> Result<T, PersistenceError> {
    let text = required(value, column, order_id)?;
    text.parse().map_err(|_| PersistenceError::Decode {
        message: format!("order {} has unknown {} '{}'", order_id, column, text),
    })
}

impl TryFrom<OrderRow> for Order {
    type Error = PersistenceError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let id = row.order_id;
        Ok(Order {
            order_id: i64::from(id),
            customer_id: row.customer_id,
            order_date: row.order_date,
            ship_date: row.ship_date,
            status: member(row.status, "status", id)?,
            channel: member(row.channel, "channel", id)?,
            total_amount_usd: required(row.total_amount_usd, "total_amount_usd", id)?,
            discount_pct: row.discount_pct.unwrap_or(Decimal::ZERO),
            payment_method: member(row.payment_method, "payment_method", id)?,
            region: row.region.unwrap_or_default(),
            created_at: row.created_at,
        })
    }
}

fn statement_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> PersistenceError {
    move |e| PersistenceError::Statement {
        operation,
        message: e.to_string(),
    }
}

// ---------------------------------------------------------------------------
// PostgresOrderStore
// ---------------------------------------------------------------------------

/// Order store backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use order_desk::config::{DatabaseConfig, YamlSecretStore};
/// use order_desk::storage::PostgresOrderStore;
///
/// let secrets = YamlSecretStore::from_yaml_file("secrets.yaml")?;
/// let config = Arc::new(DatabaseConfig::resolve(&secrets));
/// let store = PostgresOrderStore::new(config);
/// store.ensure_schema().await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresOrderStore {
    config: Arc<DatabaseConfig>,
}

impl PostgresOrderStore {
    pub fn new(config: Arc<DatabaseConfig>) -> Self {
        Self { config }
    }

    /// Open a connection scoped to the caller
    ///
    /// Fails with a configuration error before any network access when no
    /// connection string was resolved.
    async fn connect(&self) -> Result<PgConnection> {
        let url = self.config.connection_string()?;
        let conn = PgConnection::connect(url)
            .await
            .map_err(|e| PersistenceError::Connection {
                message: e.to_string(),
            })?;
        Ok(conn)
    }
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    async fn ensure_schema(&self) -> Result<()> {
        let mut conn = self.connect().await?;

        sqlx::query(CREATE_TABLE_SQL)
            .execute(&mut conn)
            .await
            .map_err(statement_error("create orders table"))?;

        sqlx::query(CREATE_INDEX_SQL)
            .execute(&mut conn)
            .await
            .map_err(statement_error("create orders index"))?;

        Ok(())
    }

    async fn insert(&self, order: &NewOrder) -> Result<i64> {
        let mut conn = self.connect().await?;

        let order_id: i32 = sqlx::query_scalar(INSERT_SQL)
            .bind(&order.customer_id)
            .bind(order.order_date)
            .bind(order.ship_date)
            .bind(order.status.as_str())
            .bind(order.channel.as_str())
            .bind(order.total_amount_usd)
            .bind(order.discount_pct)
            .bind(order.payment_method.as_str())
            .bind(&order.region)
            .fetch_one(&mut conn)
            .await
            .map_err(statement_error("insert order"))?;

        Ok(i64::from(order_id))
    }

    async fn fetch_latest(&self, limit: NonZeroU32) -> Result<Vec<Order>> {
        let mut conn = self.connect().await?;

        let rows: Vec<OrderRow> = sqlx::query_as(SELECT_LATEST_SQL)
            .bind(i64::from(limit.get()))
            .fetch_all(&mut conn)
            .await
            .map_err(statement_error("fetch latest orders"))?;

        let orders = rows
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(orders)
    }
}
