//! Order entry workflow
//!
//! Raw form input goes through three stages:
//!
//! 1. **Normalize**: clean free text, uppercase `customer_id`, title-case
//!    `region`, lowercase enumerated fields, fix money to two decimals
//! 2. **Validate**: the ship-date ordering rule fails fast; every other rule
//!    is evaluated and all violations are returned together
//! 3. **Persist**: only a fully valid record reaches the [`OrderStore`]
//!
//! Stages 1 and 2 are [`prepare`], a pure function. Nothing touches the store
//! until it succeeds.

use crate::core::error::{OrderDeskError, Result, ValidationError};
use crate::core::normalize;
use crate::core::order::{NewOrder, Order, OrderStatus, PaymentMethod, RawOrder, SalesChannel};
use crate::core::store::OrderStore;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Exclusive upper bound of `total_amount_usd`, the limit of `NUMERIC(12,2)`
pub const AMOUNT_LIMIT_USD: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);

/// Normalize and validate raw input into a record ready for insertion
///
/// `today` is used when `order_date` is missing.
pub fn prepare(raw: RawOrder, today: NaiveDate) -> std::result::Result<NewOrder, Vec<ValidationError>> {
    let customer_id = normalize::customer_id(raw.customer_id.as_deref().unwrap_or_default());
    let region = normalize::region(raw.region.as_deref().unwrap_or_default());
    let order_date = raw.order_date.unwrap_or(today);
    let ship_date = raw.ship_date;
    let total_amount_usd = normalize::money(raw.total_amount_usd.unwrap_or(Decimal::ZERO));
    let discount_pct = normalize::money(raw.discount_pct.unwrap_or(Decimal::ZERO));

    if ship_date.is_some_and(|ship| ship < order_date) {
        return Err(vec![ValidationError::ShipDateBeforeOrderDate]);
    }

    let mut errors = Vec::new();

    if customer_id.is_empty() {
        errors.push(ValidationError::CustomerIdRequired);
    }
    if total_amount_usd <= Decimal::ZERO {
        errors.push(ValidationError::AmountNotPositive);
    } else if total_amount_usd >= AMOUNT_LIMIT_USD {
        errors.push(ValidationError::AmountTooLarge);
    }
    if discount_pct < Decimal::ZERO || discount_pct > Decimal::ONE_HUNDRED {
        errors.push(ValidationError::DiscountOutOfRange);
    }

    let status = parse_member(raw.status.as_deref(), OrderStatus::Pending, &mut errors);
    let channel = parse_member(raw.channel.as_deref(), SalesChannel::Website, &mut errors);
    let payment_method = parse_member(raw.payment_method.as_deref(), PaymentMethod::Card, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewOrder {
        customer_id,
        order_date,
        ship_date,
        status,
        channel,
        total_amount_usd,
        discount_pct,
        payment_method,
        region,
        _sealed: (),
    })
}

/// Lowercase and look up an enumerated value; blank input takes `default`
fn parse_member<T>(value: Option<&str>, default: T, errors: &mut Vec<ValidationError>) -> T
where
    T: FromStr<Err = ValidationError>,
{
    let normalized = normalize::enumerated(value.unwrap_or_default());
    if normalized.is_empty() {
        return default;
    }

    match normalized.parse() {
        Ok(member) => member,
        Err(e) => {
            errors.push(e);
            default
        }
    }
}

/// Entry point the presentation layer calls to submit and list orders
///
/// # Example
///
/// ```rust,ignore
/// let entry = OrderEntry::new(Arc::new(InMemoryOrderStore::new()));
/// entry.ensure_schema().await?;
///
/// let order_id = entry.submit(raw).await?;
/// let latest = entry.latest(LATEST_ORDERS_CAP).await?;
/// ```
pub struct OrderEntry {
    store: Arc<dyn OrderStore>,
    schema_ready: OnceCell<()>,
}

impl OrderEntry {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            store,
            schema_ready: OnceCell::new(),
        }
    }

    /// Ensure the table exists, at most once per `OrderEntry`
    ///
    /// A failed attempt is not cached; the next call tries again.
    pub async fn ensure_schema(&self) -> Result<()> {
        self.schema_ready
            .get_or_try_init(|| async {
                self.store.ensure_schema().await?;
                tracing::info!("Order schema ready");
                Ok::<(), OrderDeskError>(())
            })
            .await?;
        Ok(())
    }

    /// Validate and persist a submission dated against the local calendar
    pub async fn submit(&self, raw: RawOrder) -> Result<i64> {
        self.submit_on(raw, Local::now().date_naive()).await
    }

    /// Same as [`submit`](Self::submit) with an explicit "today"
    pub async fn submit_on(&self, raw: RawOrder, today: NaiveDate) -> Result<i64> {
        let order = prepare(raw, today).map_err(|errors| {
            tracing::debug!(count = errors.len(), "Order rejected by validation");
            OrderDeskError::Validation(errors)
        })?;

        self.ensure_schema().await?;

        let order_id = self.store.insert(&order).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to save order");
        })?;

        tracing::info!(order_id, customer_id = %order.customer_id, "Order saved");
        Ok(order_id)
    }

    /// Most recent orders, newest first
    pub async fn latest(&self, limit: NonZeroU32) -> Result<Vec<Order>> {
        self.store.fetch_latest(limit).await
    }
}
