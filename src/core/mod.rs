//! Core module: the order model, entry workflow, reporting and error types

pub mod error;
pub mod normalize;
pub mod order;
pub mod report;
pub mod store;
pub mod workflow;

pub use error::{ConfigError, OrderDeskError, PersistenceError, Result, ValidationError};
pub use order::{FormOptions, NewOrder, Order, OrderStatus, PaymentMethod, RawOrder, SalesChannel};
pub use report::{DailyRecord, DailySeries, DailyTotals, daily_aggregate};
pub use store::{LATEST_ORDERS_CAP, OrderStore};
pub use workflow::{OrderEntry, prepare};
