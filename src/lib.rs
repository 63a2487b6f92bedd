//! joinhint - join-strategy hints for a logical query planner
//!
//! This crate provides the hint layer of the planner:
//! - Hint wrapper nodes embedded in the logical plan
//! - Resolution of hint names against the join-strategy catalog
//! - Merging of conflicting hints on the two sides of a join
//! - Non-fatal diagnostics through a pluggable error handler

pub mod utils;

pub mod config;
pub mod query_planner;
