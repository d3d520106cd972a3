//! Order record shapes
//!
//! Three shapes flow through the system:
//!
//! - [`RawOrder`]: form input exactly as received, every field optional
//! - [`NewOrder`]: the normalized, validated nine user-supplied columns
//! - [`Order`]: a stored row, including `order_id` and `created_at`

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declare a closed set of lowercase text values as an enum
///
/// Generates `ALL`, `as_str`, `allowed`, `Display`, `FromStr` and
/// serde support using the literal spellings.
macro_rules! closed_set {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal, {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every member, in form display order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }

            /// Comma-separated member list, as shown in validation messages
            pub fn allowed() -> String {
                Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = crate::core::error::ValidationError;

            /// Exact match on the stored spelling; callers lowercase first
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    _ => Err(crate::core::error::ValidationError::NotInSet {
                        field: $field,
                        allowed: Self::allowed(),
                    }),
                }
            }
        }
    };
}

closed_set!(
    /// Fulfilment state of an order
    OrderStatus, "status", {
        Pending => "pending",
        Processing => "processing",
        Shipped => "shipped",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
);

closed_set!(
    /// Sales channel the order came through
    SalesChannel, "channel", {
        Website => "website",
        Social => "social",
        Marketplace => "marketplace",
        Partner => "partner",
    }
);

closed_set!(
    PaymentMethod, "payment_method", {
        Card => "card",
        Cash => "cash",
        BankTransfer => "bank_transfer",
        EWallet => "e-wallet",
    }
);

/// Form input as submitted, before normalization
///
/// Every field is optional so a partially filled form never fails to
/// deserialize; the workflow decides what a missing value means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOrder {
    pub customer_id: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub ship_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub channel: Option<String>,
    pub total_amount_usd: Option<Decimal>,
    pub discount_pct: Option<Decimal>,
    pub payment_method: Option<String>,
    pub region: Option<String>,
}

/// A normalized record that passed every business rule
///
/// Built only by [`crate::core::workflow::prepare`]; stores accept nothing else.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub customer_id: String,
    pub order_date: NaiveDate,
    pub ship_date: Option<NaiveDate>,
    pub status: OrderStatus,
    pub channel: SalesChannel,
    pub total_amount_usd: Decimal,
    pub discount_pct: Decimal,
    pub payment_method: PaymentMethod,
    pub region: String,
    // Keeps construction inside this crate
    #[serde(skip)]
    pub(crate) _sealed: (),
}

/// A stored order row, newest-first when read back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: i64,
    pub customer_id: String,
    pub order_date: NaiveDate,
    pub ship_date: Option<NaiveDate>,
    pub status: OrderStatus,
    pub channel: SalesChannel,
    pub total_amount_usd: Decimal,
    pub discount_pct: Decimal,
    pub payment_method: PaymentMethod,
    pub region: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Attach store-assigned columns to a validated record
    pub fn from_new(order_id: i64, created_at: DateTime<Utc>, new: &NewOrder) -> Self {
        Self {
            order_id,
            customer_id: new.customer_id.clone(),
            order_date: new.order_date,
            ship_date: new.ship_date,
            status: new.status,
            channel: new.channel,
            total_amount_usd: new.total_amount_usd,
            discount_pct: new.discount_pct,
            payment_method: new.payment_method,
            region: new.region.clone(),
            created_at,
        }
    }

    /// True when the nine user-supplied columns equal the submitted record
    pub fn matches(&self, new: &NewOrder) -> bool {
        self.customer_id == new.customer_id
            && self.order_date == new.order_date
            && self.ship_date == new.ship_date
            && self.status == new.status
            && self.channel == new.channel
            && self.total_amount_usd == new.total_amount_usd
            && self.discount_pct == new.discount_pct
            && self.payment_method == new.payment_method
            && self.region == new.region
    }
}

/// Closed sets offered by the entry form
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub status: Vec<&'static str>,
    pub channel: Vec<&'static str>,
    pub payment_method: Vec<&'static str>,
}

impl FormOptions {
    pub fn new() -> Self {
        Self {
            status: OrderStatus::ALL.iter().map(|v| v.as_str()).collect(),
            channel: SalesChannel::ALL.iter().map(|v| v.as_str()).collect(),
            payment_method: PaymentMethod::ALL.iter().map(|v| v.as_str()).collect(),
        }
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ValidationError;

    #[test]
    fn test_payment_method_keeps_stored_spelling() {
        assert_eq!(PaymentMethod::BankTransfer.as_str(), "bank_transfer");
        assert_eq!(PaymentMethod::EWallet.as_str(), "e-wallet");
        assert_eq!("e-wallet".parse::<PaymentMethod>(), Ok(PaymentMethod::EWallet));
    }

    #[test]
    fn test_unknown_value_reports_allowed_set() {
        let err = "teleport".parse::<SalesChannel>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotInSet {
                field: "channel",
                allowed: "website, social, marketplace, partner".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("Pending".parse::<OrderStatus>().is_err());
        assert_eq!("pending".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
    }

    #[test]
    fn test_enum_serializes_lowercase() {
        let json = serde_json::to_value(PaymentMethod::BankTransfer).unwrap();
        assert_eq!(json, serde_json::json!("bank_transfer"));
        let back: OrderStatus = serde_json::from_value(serde_json::json!("cancelled")).unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn test_raw_order_accepts_partial_json() {
        let raw: RawOrder = serde_json::from_value(serde_json::json!({
            "customer_id": "c1",
            "total_amount_usd": 12.5
        }))
        .unwrap();
        assert_eq!(raw.customer_id.as_deref(), Some("c1"));
        assert_eq!(raw.total_amount_usd, Some(Decimal::new(125, 1)));
        assert!(raw.order_date.is_none());
        assert!(raw.status.is_none());
    }

    #[test]
    fn test_form_options_lists_every_member() {
        let options = FormOptions::new();
        assert_eq!(options.status.len(), 5);
        assert_eq!(options.channel.len(), 4);
        assert_eq!(options.payment_method, vec!["card", "cash", "bank_transfer", "e-wallet"]);
    }
}
