use thiserror::Error;

use crate::query_planner::{analyzer::errors::AnalyzerError, optimizer::errors::OptimizerError};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryPlannerError {
    #[error("Hint analysis failed: {0}")]
    Analyzer(#[from] AnalyzerError),

    #[error("Hint optimization failed: {0}")]
    Optimizer(#[from] OptimizerError),
}
