//! Order repository contract

use crate::core::error::Result;
use crate::core::order::{NewOrder, Order};
use async_trait::async_trait;
use std::num::NonZeroU32;

/// Row cap for the latest-orders view
pub const LATEST_ORDERS_CAP: NonZeroU32 = match NonZeroU32::new(200) {
    Some(n) => n,
    None => unreachable!(),
};

/// Storage service for orders
///
/// Implementations own the three data operations. Orders are append-only:
/// there is no update or delete.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Create the orders table if it does not exist
    ///
    /// Safe to call any number of times; only the first successful call has
    /// an effect.
    async fn ensure_schema(&self) -> Result<()>;

    /// Persist a validated order and return its newly assigned `order_id`
    ///
    /// Ids are strictly increasing and never reused. On error nothing was
    /// written.
    async fn insert(&self, order: &NewOrder) -> Result<i64>;

    /// Up to `limit` most recently created orders, newest first
    ///
    /// An empty store yields an empty vector.
    async fn fetch_latest(&self, limit: NonZeroU32) -> Result<Vec<Order>>;
}
