//! Fails analysis when an unresolved hint is still in the plan.
//!
//! Resolution replaces or removes every [`UnresolvedHint`] node, so one that
//! survives means a pass was skipped. This is a planner defect, unlike the
//! hint problems reported through the error handler.
//!
//! [`UnresolvedHint`]: crate::query_planner::logical_plan::UnresolvedHint

use std::sync::Arc;

use crate::query_planner::{
    analyzer::{
        analyzer_pass::{AnalyzerPass, AnalyzerResult},
        errors::{AnalyzerError, Pass},
    },
    logical_plan::LogicalPlan,
    plan_ctx::PlanCtx,
    transformed::Transformed,
};

pub struct HintResolutionCheck;

impl AnalyzerPass for HintResolutionCheck {
    fn analyze(
        &self,
        logical_plan: Arc<LogicalPlan>,
        _plan_ctx: &mut PlanCtx<'_>,
    ) -> AnalyzerResult<Transformed<Arc<LogicalPlan>>> {
        if let Some(hint) = logical_plan.find_unresolved_hint() {
            return Err(AnalyzerError::UnresolvedHint {
                pass: Pass::HintResolutionCheck,
                name: hint.name.clone(),
            });
        }
        Ok(Transformed::No(logical_plan))
    }
}

impl HintResolutionCheck {
    pub fn new() -> Self {
        HintResolutionCheck
    }
}
