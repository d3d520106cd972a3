//! Daily aggregates for the dashboard charts
//!
//! Works on rows that were already fetched; never touches a store.

use crate::core::order::Order;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Anything that can be bucketed by calendar day
///
/// Returning `None` from either accessor drops the row from aggregation.
pub trait DailyRecord {
    fn order_date(&self) -> Option<NaiveDate>;
    fn amount(&self) -> Option<Decimal>;
}

impl DailyRecord for Order {
    fn order_date(&self) -> Option<NaiveDate> {
        Some(self.order_date)
    }

    fn amount(&self) -> Option<Decimal> {
        Some(self.total_amount_usd)
    }
}

/// Untyped rows (`field -> value` maps), as a display layer may hold them
///
/// `order_date` must be a `YYYY-MM-DD` string; `total_amount_usd` may be a
/// number or a numeric string.
impl DailyRecord for Value {
    fn order_date(&self) -> Option<NaiveDate> {
        let text = self.get("order_date")?.as_str()?;
        NaiveDate::parse_from_str(text.get(..10).unwrap_or(text), "%Y-%m-%d").ok()
    }

    fn amount(&self) -> Option<Decimal> {
        match self.get("total_amount_usd")? {
            Value::String(s) => Decimal::from_str(s).ok(),
            Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
            _ => None,
        }
    }
}

/// Orders and revenue for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub order_count: u64,
    pub revenue: Decimal,
}

/// Group records by `order_date`, ascending by date
///
/// Rows without a usable date or amount are skipped with a warning.
pub fn daily_aggregate<R: DailyRecord>(records: &[R]) -> Vec<DailyTotals> {
    let mut days: BTreeMap<NaiveDate, (u64, Decimal)> = BTreeMap::new();
    let mut skipped = 0usize;
    let mut overflowed = 0usize;

    for record in records {
        let (Some(date), Some(amount)) = (record.order_date(), record.amount()) else {
            skipped += 1;
            continue;
        };
        let entry = days.entry(date).or_insert((0, Decimal::ZERO));
        match entry.1.checked_add(amount) {
            Some(revenue) => {
                entry.0 += 1;
                entry.1 = revenue;
            }
            None => overflowed += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Skipped rows with unparseable order_date or amount");
    }
    if overflowed > 0 {
        tracing::warn!(overflowed, "Skipped rows whose amount overflows the daily revenue");
    }

    days.into_iter()
        .map(|(date, (order_count, revenue))| DailyTotals {
            date,
            order_count,
            revenue,
        })
        .collect()
}

/// One point of a chart series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point<V> {
    pub date: NaiveDate,
    pub value: V,
}

/// The two time series drawn on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeries {
    pub revenue: Vec<Point<Decimal>>,
    pub order_count: Vec<Point<u64>>,
}

impl From<&[DailyTotals]> for DailySeries {
    fn from(days: &[DailyTotals]) -> Self {
        Self {
            revenue: days
                .iter()
                .map(|d| Point {
                    date: d.date,
                    value: d.revenue,
                })
                .collect(),
            order_count: days
                .iter()
                .map(|d| Point {
                    date: d.date,
                    value: d.order_count,
                })
                .collect(),
        }
    }
}
