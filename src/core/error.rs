//! Typed error handling for the order desk
//!
//! Callers branch on the kind of failure rather than on message text:
//!
//! - [`ConfigError`]: the connection string (or another setting) could not be
//!   resolved. Fatal, raised before any database access.
//! - [`ValidationError`]: a business rule rejected the submitted input. Always
//!   reported as a list; the user corrects the form and resubmits.
//! - [`PersistenceError`]: the database was unreachable or rejected a
//!   statement. Never retried by the core.
//!
//! # Example
//!
//! ```rust,ignore
//! match entry.submit(raw).await {
//!     Ok(order_id) => println!("Order saved (order_id = {order_id})"),
//!     Err(OrderDeskError::Validation(errors)) => {
//!         for e in errors {
//!             eprintln!("{e}");
//!         }
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// Result alias used across the crate
pub type Result<T, E = OrderDeskError> = std::result::Result<T, E>;

/// The main error type of the order desk
#[derive(Debug)]
pub enum OrderDeskError {
    /// Configuration could not be resolved
    Config(ConfigError),

    /// One or more business-rule violations, in evaluation order
    Validation(Vec<ValidationError>),

    /// The store failed to read or write
    Persistence(PersistenceError),
}

impl fmt::Display for OrderDeskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDeskError::Config(e) => write!(f, "{}", e),
            OrderDeskError::Validation(errors) => {
                let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
                write!(f, "{}", messages.join(" "))
            }
            OrderDeskError::Persistence(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for OrderDeskError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OrderDeskError::Config(e) => Some(e),
            OrderDeskError::Validation(errors) => errors
                .first()
                .map(|e| e as &(dyn std::error::Error + 'static)),
            OrderDeskError::Persistence(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl OrderDeskError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderDeskError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            OrderDeskError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            OrderDeskError::Persistence(e) => e.status_code(),
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderDeskError::Config(_) => "CONFIG_ERROR",
            OrderDeskError::Validation(_) => "VALIDATION_ERROR",
            OrderDeskError::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }

    /// Validation messages, empty for any other kind
    pub fn validation_messages(&self) -> Vec<String> {
        match self {
            OrderDeskError::Validation(errors) => errors.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }

    /// Convert to an error response
    ///
    /// Persistence failures carry a generic notice with the short diagnostic
    /// appended, never the driver's full error chain.
    pub fn to_response(&self) -> ErrorResponse {
        let message = match self {
            OrderDeskError::Persistence(e) => {
                format!("The order could not be saved or loaded. ({})", e.diagnostic())
            }
            other => other.to_string(),
        };

        ErrorResponse {
            code: self.error_code().to_string(),
            message,
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            OrderDeskError::Validation(_) => {
                Some(serde_json::json!({ "errors": self.validation_messages() }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for OrderDeskError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors raised while resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Neither the environment nor the secret store holds the connection string
    #[error("{key} is not set.")]
    MissingConnectionString { key: String },

    /// The secret store file exists but could not be read or parsed
    #[error("Failed to load secrets from '{path}': {message}")]
    SecretStore { path: String, message: String },

    /// A setting holds a value that cannot be used
    #[error("Invalid value for {key}: {message}")]
    InvalidSetting { key: String, message: String },
}

impl From<ConfigError> for OrderDeskError {
    fn from(err: ConfigError) -> Self {
        OrderDeskError::Config(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single business-rule violation on submitted input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `ship_date` precedes `order_date`; reported alone
    #[error("Ship date cannot be earlier than Order date.")]
    ShipDateBeforeOrderDate,

    #[error("customer_id is required.")]
    CustomerIdRequired,

    #[error("total_amount_usd must be greater than 0.")]
    AmountNotPositive,

    /// Above what a `NUMERIC(12,2)` column holds
    #[error("total_amount_usd must be less than 10000000000.")]
    AmountTooLarge,

    #[error("discount_pct must be between 0 and 100.")]
    DiscountOutOfRange,

    /// An enumerated field holds a value outside its closed set
    #[error("{field} must be one of: {allowed}.")]
    NotInSet {
        field: &'static str,
        allowed: String,
    },
}

impl ValidationError {
    /// Name of the input field the violation refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::ShipDateBeforeOrderDate => "ship_date",
            ValidationError::CustomerIdRequired => "customer_id",
            ValidationError::AmountNotPositive | ValidationError::AmountTooLarge => {
                "total_amount_usd"
            }
            ValidationError::DiscountOutOfRange => "discount_pct",
            ValidationError::NotInSet { field, .. } => *field,
        }
    }
}

impl From<Vec<ValidationError>> for OrderDeskError {
    fn from(errors: Vec<ValidationError>) -> Self {
        OrderDeskError::Validation(errors)
    }
}

// =============================================================================
// Persistence Errors
// =============================================================================

/// Errors raised by an order store
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// No connection could be established
    #[error("Failed to connect to the database: {message}")]
    Connection { message: String },

    /// A statement was rejected (constraint violation, lost connection, ...)
    #[error("Failed to {operation}: {message}")]
    Statement {
        operation: &'static str,
        message: String,
    },

    /// A stored row could not be mapped back to an order
    #[error("Failed to decode order row: {message}")]
    Decode { message: String },

    /// Shared in-process state is unusable
    #[error("Order store is unavailable: {message}")]
    Unavailable { message: String },
}

impl PersistenceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PersistenceError::Connection { .. } | PersistenceError::Unavailable { .. } => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            PersistenceError::Statement { .. } | PersistenceError::Decode { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short diagnostic safe to show to an end user
    pub fn diagnostic(&self) -> &'static str {
        match self {
            PersistenceError::Connection { .. } => "database unreachable",
            PersistenceError::Statement { .. } => "database rejected the request",
            PersistenceError::Decode { .. } => "stored data is malformed",
            PersistenceError::Unavailable { .. } => "store unavailable",
        }
    }
}

impl From<PersistenceError> for OrderDeskError {
    fn from(err: PersistenceError) -> Self {
        OrderDeskError::Persistence(err)
    }
}
