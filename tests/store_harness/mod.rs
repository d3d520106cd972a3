//! Shared test harness for order store testing
//!
//! Provides builders for raw and validated orders and the
//! `order_store_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//! use store_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod order_store_tests;

use chrono::NaiveDate;
use order_desk::core::{NewOrder, RawOrder, prepare};
use rust_decimal::Decimal;

pub fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid calendar date")
}

/// Whole-dollar amount
pub fn usd(whole: i64) -> Decimal {
    Decimal::new(whole, 0)
}

/// A fully filled form, as the entry page would post it
pub fn raw_order(customer_id: &str, order_date: NaiveDate, amount: Decimal) -> RawOrder {
    RawOrder {
        customer_id: Some(customer_id.to_string()),
        order_date: Some(order_date),
        ship_date: None,
        status: Some("processing".to_string()),
        channel: Some("marketplace".to_string()),
        total_amount_usd: Some(amount),
        discount_pct: Some(Decimal::new(125, 1)),
        payment_method: Some("bank_transfer".to_string()),
        region: Some("phnom   penh".to_string()),
    }
}

/// A validated record ready for `OrderStore::insert`
pub fn new_order(customer_id: &str, order_date: NaiveDate, amount: Decimal) -> NewOrder {
    prepare(raw_order(customer_id, order_date, amount), order_date)
        .expect("harness orders are valid")
}
