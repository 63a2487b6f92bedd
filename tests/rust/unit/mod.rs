//! Unit tests - public API of the hint layer, no external services needed

mod hint_pipeline_tests;
mod strategy_resolution_tests;
