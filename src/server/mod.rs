//! HTTP surface for the order desk
//!
//! Stands in for the presentation layer: a form posts to `/orders`, the
//! dashboard reads `/orders` and `/orders/daily`.

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
pub use router::build_router;
