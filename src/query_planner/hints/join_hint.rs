use std::fmt;

use serde::{Deserialize, Serialize};

use crate::query_planner::hints::{hint_info::HintInfo, strategy::JoinStrategy};

/// Hints attached to the two inputs of a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinHint {
    pub left: Option<HintInfo>,
    pub right: Option<HintInfo>,
}

impl JoinHint {
    /// No hint on either side.
    pub const NONE: JoinHint = JoinHint {
        left: None,
        right: None,
    };

    pub fn new(left: Option<HintInfo>, right: Option<HintInfo>) -> Self {
        JoinHint { left, right }
    }

    pub fn is_none(&self) -> bool {
        *self == JoinHint::NONE
    }

    /// Highest-priority strategy requested on either side.
    ///
    /// Ties (the same strategy on both sides) return that strategy.
    pub fn preferred_strategy(&self) -> Option<JoinStrategy> {
        [self.left, self.right]
            .into_iter()
            .flatten()
            .filter_map(|info| info.strategy)
            .filter(|strategy| strategy.priority().is_some())
            .max_by_key(|strategy| strategy.priority())
    }
}

impl Default for JoinHint {
    fn default() -> Self {
        JoinHint::NONE
    }
}

impl fmt::Display for JoinHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sides: Vec<String> = [("leftHint", self.left), ("rightHint", self.right)]
            .into_iter()
            .filter_map(|(label, info)| info.map(|info| format!("{}={}", label, info)))
            .collect();
        f.write_str(&sides.join(", "))
    }
}
