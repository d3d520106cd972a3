//! Macro-generated test suite for `OrderStore` contract validation.
//!
//! The `order_store_tests!` macro generates a test module that validates any
//! `OrderStore` implementation against the repository contract: idempotent
//! schema creation, id assignment, newest-first reads and the row cap.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod store_harness;
//!
//! use store_harness::*;
//! use order_desk::storage::InMemoryOrderStore;
//!
//! order_store_tests!(InMemoryOrderStore::new());
//! ```
//!
//! # Generated Tests
//!
//! - `test_ensure_schema_is_idempotent` — repeat calls succeed and keep rows
//! - `test_fetch_latest_on_empty_table` — empty vector, not an error
//! - `test_insert_returns_increasing_ids` — ids strictly increase
//! - `test_insert_then_fetch_round_trip` — all nine user columns survive
//! - `test_fetch_latest_newest_first` — t3, t2, t1
//! - `test_fetch_latest_respects_limit` — at most `limit` rows
//! - `test_optional_ship_date_round_trip` — NULL and a date both survive

/// Generate a full `OrderStore` conformance test suite.
///
/// `$factory` must evaluate to an `OrderStore` whose `orders` table does not
/// exist yet. It is re-evaluated for each test to ensure isolation.
#[macro_export]
macro_rules! order_store_tests {
    ($factory:expr) => {
        mod order_store_contract_tests {
            use super::*;
            use order_desk::core::OrderStore;
            use rust_decimal::Decimal;
            use std::num::NonZeroU32;
            use std::time::Duration;

            fn limit(n: u32) -> NonZeroU32 {
                NonZeroU32::new(n).unwrap()
            }

            // ==================================================================
            // Schema
            // ==================================================================

            #[tokio::test]
            async fn test_ensure_schema_is_idempotent() {
                let store = $factory;

                store.ensure_schema().await.unwrap();
                let id = store
                    .insert(&new_order("c1", day(2024, 1, 1), usd(10)))
                    .await
                    .unwrap();

                for _ in 0..3 {
                    store.ensure_schema().await.unwrap();
                }

                let rows = store.fetch_latest(limit(10)).await.unwrap();
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].order_id, id);
            }

            #[tokio::test]
            async fn test_fetch_latest_on_empty_table() {
                let store = $factory;
                store.ensure_schema().await.unwrap();

                let rows = store.fetch_latest(limit(50)).await.unwrap();
                assert!(rows.is_empty());
            }

            // ==================================================================
            // Insert
            // ==================================================================

            #[tokio::test]
            async fn test_insert_returns_increasing_ids() {
                let store = $factory;
                store.ensure_schema().await.unwrap();

                let mut last = 0;
                for i in 0..5 {
                    let id = store
                        .insert(&new_order(&format!("c{}", i), day(2024, 1, 1), usd(10)))
                        .await
                        .unwrap();
                    assert!(id > last, "id {} not greater than {}", id, last);
                    last = id;
                }
            }

            #[tokio::test]
            async fn test_insert_then_fetch_round_trip() {
                let store = $factory;
                store.ensure_schema().await.unwrap();

                let order = new_order(" c 102 3 ", day(2024, 2, 29), Decimal::new(12345, 2));
                let id = store.insert(&order).await.unwrap();

                let rows = store.fetch_latest(limit(1)).await.unwrap();
                assert_eq!(rows.len(), 1);
                let stored = &rows[0];
                assert_eq!(stored.order_id, id);
                assert!(
                    stored.matches(&order),
                    "stored {:?} != submitted {:?}",
                    stored,
                    order
                );
                assert_eq!(stored.customer_id, "C 102 3");
                assert_eq!(stored.region, "Phnom Penh");
                assert_eq!(stored.total_amount_usd.to_string(), "123.45");
                assert_eq!(stored.discount_pct.to_string(), "12.50");
            }

            // ==================================================================
            // Fetch latest
            // ==================================================================

            #[tokio::test]
            async fn test_fetch_latest_newest_first() {
                let store = $factory;
                store.ensure_schema().await.unwrap();

                let mut ids = Vec::new();
                for name in ["first", "second", "third"] {
                    ids.push(
                        store
                            .insert(&new_order(name, day(2024, 1, 1), usd(1)))
                            .await
                            .unwrap(),
                    );
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }

                let rows = store.fetch_latest(limit(3)).await.unwrap();
                let got: Vec<i64> = rows.iter().map(|o| o.order_id).collect();
                assert_eq!(got, vec![ids[2], ids[1], ids[0]]);
                assert_eq!(rows[0].customer_id, "THIRD");
                assert!(rows.windows(2).all(|w| w[0].created_at >= w[1].created_at));
            }

            #[tokio::test]
            async fn test_fetch_latest_respects_limit() {
                let store = $factory;
                store.ensure_schema().await.unwrap();

                for i in 0..4 {
                    store
                        .insert(&new_order(&format!("c{}", i), day(2024, 1, 1), usd(1)))
                        .await
                        .unwrap();
                }

                assert_eq!(store.fetch_latest(limit(2)).await.unwrap().len(), 2);
                assert_eq!(store.fetch_latest(limit(200)).await.unwrap().len(), 4);
            }

            #[tokio::test]
            async fn test_optional_ship_date_round_trip() {
                let store = $factory;
                store.ensure_schema().await.unwrap();

                let mut raw = raw_order("c1", day(2024, 3, 1), usd(5));
                raw.ship_date = Some(day(2024, 3, 4));
                let shipped = order_desk::core::prepare(raw, day(2024, 3, 1)).unwrap();

                store
                    .insert(&new_order("c0", day(2024, 3, 1), usd(5)))
                    .await
                    .unwrap();
                tokio::time::sleep(Duration::from_millis(5)).await;
                store.insert(&shipped).await.unwrap();

                let rows = store.fetch_latest(limit(2)).await.unwrap();
                assert_eq!(rows[0].ship_date, Some(day(2024, 3, 4)));
                assert_eq!(rows[1].ship_date, None);
            }
        }
    };
}
