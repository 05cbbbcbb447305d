//! Fixture invariant test suite.
//!
//! Builds the standard fixture set (and a few hand-made input sets) through
//! the public API and checks the guarantees the dashboard relies on.
//!
//! Run with: cargo test --test fixture_invariants

mod test_helpers;

mod test_analytics;
mod test_idempotence;
mod test_invariants;
mod test_queries;
mod test_scenarios;
