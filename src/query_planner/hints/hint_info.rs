use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query_planner::hints::{error_handler::HintErrorHandler, strategy::JoinStrategy};

/// Hint payload carried by a resolved hint node or one side of a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HintInfo {
    pub strategy: Option<JoinStrategy>,
}

impl HintInfo {
    pub const EMPTY: HintInfo = HintInfo { strategy: None };

    pub fn new(strategy: JoinStrategy) -> Self {
        HintInfo {
            strategy: Some(strategy),
        }
    }

    /// Combine two hints. `self` wins when both carry different strategies;
    /// `other` is then reported as overridden.
    ///
    /// Callers that want the global priority order must pass the preferred
    /// hint as `self`.
    pub fn merge(&self, other: &HintInfo, handler: &mut dyn HintErrorHandler) -> HintInfo {
        let strategy = match (self.strategy, other.strategy) {
            (Some(mine), Some(theirs)) if mine != theirs => {
                log::debug!("Hint {} overrides {}", self, other);
                handler.hint_overridden(other);
                Some(mine)
            }
            (mine, theirs) => mine.or(theirs),
        };
        HintInfo { strategy }
    }
}

impl fmt::Display for HintInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strategy {
            Some(strategy) => write!(f, "(strategy={})", strategy),
            None => f.write_str("none"),
        }
    }
}
