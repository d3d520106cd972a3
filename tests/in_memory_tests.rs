//! Integration tests for InMemoryOrderStore using the store test harness.
//!
//! This file invokes `order_store_tests!` to validate that InMemoryOrderStore
//! fully conforms to the OrderStore contract.

#[macro_use]
mod store_harness;

use order_desk::storage::InMemoryOrderStore;
use store_harness::*;

order_store_tests!(InMemoryOrderStore::new());
