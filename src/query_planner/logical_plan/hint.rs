//! Hint wrapper nodes.
//!
//! A hint sits in the tree as a unary node over the subtree it applies to.
//! The parser produces [`UnresolvedHint`]; analysis replaces it with a
//! [`ResolvedHint`] or removes it. Neither wrapper changes the output of its
//! input.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::query_planner::{
    hints::HintInfo, logical_expr::LogicalExpr, logical_plan::LogicalPlan,
    transformed::Transformed,
};

/// A hint as written in the query: a name and its parameters, not yet
/// matched against the strategy catalog.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct UnresolvedHint {
    pub name: String,
    pub parameters: Vec<LogicalExpr>,
    #[serde(with = "crate::utils::serde_arc")]
    pub input: Arc<LogicalPlan>,
}

/// A hint whose name resolved to a join strategy.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ResolvedHint {
    #[serde(with = "crate::utils::serde_arc")]
    pub input: Arc<LogicalPlan>,
    pub info: HintInfo,
}

impl UnresolvedHint {
    pub fn new(
        name: impl Into<String>,
        parameters: Vec<LogicalExpr>,
        input: Arc<LogicalPlan>,
    ) -> Self {
        UnresolvedHint {
            name: name.into(),
            parameters,
            input,
        }
    }

    /// Always false: resolution replaces the node instead of flagging it.
    pub fn is_resolved(&self) -> bool {
        false
    }

    pub fn rebuild_or_clone(
        &self,
        input_tf: Transformed<Arc<LogicalPlan>>,
        old_plan: Arc<LogicalPlan>,
    ) -> Transformed<Arc<LogicalPlan>> {
        match input_tf {
            Transformed::Yes(new_input) => {
                let new_node = LogicalPlan::UnresolvedHint(UnresolvedHint {
                    name: self.name.clone(),
                    parameters: self.parameters.clone(),
                    input: new_input,
                });
                Transformed::Yes(Arc::new(new_node))
            }
            Transformed::No(_) => Transformed::No(old_plan),
        }
    }
}

impl ResolvedHint {
    pub fn new(input: Arc<LogicalPlan>, info: HintInfo) -> Self {
        ResolvedHint { input, info }
    }

    pub fn rebuild_or_clone(
        &self,
        input_tf: Transformed<Arc<LogicalPlan>>,
        old_plan: Arc<LogicalPlan>,
    ) -> Transformed<Arc<LogicalPlan>> {
        match input_tf {
            Transformed::Yes(new_input) => {
                let new_node = LogicalPlan::ResolvedHint(ResolvedHint {
                    input: new_input,
                    info: self.info,
                });
                Transformed::Yes(Arc::new(new_node))
            }
            Transformed::No(_) => Transformed::No(old_plan),
        }
    }
}
