//! # Order Desk
//!
//! A small order-entry service: a form submits e-commerce orders, the core
//! normalizes and validates them, a single PostgreSQL table stores them, and
//! a dashboard reads back the latest rows plus daily order-count and revenue
//! series.
//!
//! ## Features
//!
//! - **Canonical records**: whitespace collapsed, `customer_id` uppercased,
//!   `region` title-cased, enumerated fields lowercased, money at two decimals
//! - **Typed failures**: configuration, validation (always a full list) and
//!   persistence errors are separate kinds
//! - **Idempotent schema**: `ensure_schema` is safe to run on every start
//! - **Scoped connections**: one connection per repository call, released on
//!   every exit path
//! - **Daily aggregates**: pure grouping of fetched rows by `order_date`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_desk::prelude::*;
//! use std::sync::Arc;
//!
//! let entry = OrderEntry::new(Arc::new(InMemoryOrderStore::new()));
//! entry.ensure_schema().await?;
//!
//! let order_id = entry
//!     .submit(RawOrder {
//!         customer_id: Some(" c 102 3 ".to_string()),
//!         total_amount_usd: Some(Decimal::new(1999, 2)),
//!         region: Some("phnom   penh".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let latest = entry.latest(LATEST_ORDERS_CAP).await?;
//! let days = daily_aggregate(&latest);
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ConfigError, DailyRecord, DailySeries, DailyTotals, FormOptions, LATEST_ORDERS_CAP,
        NewOrder, Order, OrderDeskError, OrderEntry, OrderStatus, OrderStore, PaymentMethod,
        PersistenceError, RawOrder, SalesChannel, ValidationError, daily_aggregate, prepare,
    };

    // === Storage ===
    pub use crate::storage::InMemoryOrderStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresOrderStore;

    // === Config ===
    pub use crate::config::{
        DatabaseConfig, EmptySecretStore, SecretStore, ServerConfig, YamlSecretStore,
    };

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router};

    // === External dependencies ===
    pub use chrono::NaiveDate;
    pub use rust_decimal::Decimal;
}
