//! In-memory implementation of OrderStore for testing and development

use crate::core::error::{PersistenceError, Result};
use crate::core::order::{NewOrder, Order};
use crate::core::store::OrderStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::num::NonZeroU32;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct Table {
    created: bool,
    rows: Vec<Order>,
    last_id: i64,
}

/// In-memory order store
///
/// Behaves like the database table: the schema must be ensured before rows
/// can be written or read, ids count up from 1, and `created_at` never goes
/// backwards. Uses RwLock for thread-safe access; clones share the same rows.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    table: Arc<RwLock<Table>>,
}

impl InMemoryOrderStore {
    /// Create a new in-memory order store with no table yet
    pub fn new() -> Self {
        Self::default()
    }

    fn missing_table(operation: &'static str) -> PersistenceError {
        PersistenceError::Statement {
            operation,
            message: "relation \"orders\" does not exist".to_string(),
        }
    }
}

fn lock_error(e: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::Unavailable {
        message: format!("Failed to acquire lock: {}", e),
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn ensure_schema(&self) -> Result<()> {
        let mut table = self.table.write().map_err(lock_error)?;
        table.created = true;
        Ok(())
    }

    async fn insert(&self, order: &NewOrder) -> Result<i64> {
        let mut table = self.table.write().map_err(lock_error)?;
        if !table.created {
            return Err(Self::missing_table("insert order").into());
        }

        let now = Utc::now();
        let created_at: DateTime<Utc> = table
            .rows
            .last()
            .map_or(now, |last| last.created_at.max(now));

        table.last_id += 1;
        let order_id = table.last_id;
        table.rows.push(Order::from_new(order_id, created_at, order));

        Ok(order_id)
    }

    async fn fetch_latest(&self, limit: NonZeroU32) -> Result<Vec<Order>> {
        let table = self.table.read().map_err(lock_error)?;
        if !table.created {
            return Err(Self::missing_table("fetch latest orders").into());
        }

        // Rows are kept in insertion order, which is created_at order
        Ok(table
            .rows
            .iter()
            .rev()
            .take(limit.get() as usize)
            .cloned()
            .collect())
    }
}
