//! In-memory entity models for tests that never touch the database.
//!
//! Fixtures return plain `entity::*::Model` values with fixed timestamps relative to a
//! caller-supplied `now`, so rule evaluation can be tested deterministically.

pub mod activity;
pub mod voucher;
