//! Strips every hint wrapper when hints are disabled in [`HintConfig`].
//!
//! Disabled hints are not a problem in the query, so nothing is reported.
//!
//! [`HintConfig`]: crate::config::HintConfig

use std::sync::Arc;

use crate::query_planner::{
    analyzer::analyzer_pass::{AnalyzerPass, AnalyzerResult},
    logical_plan::LogicalPlan,
    plan_ctx::PlanCtx,
    transformed::Transformed,
};

pub struct RemoveAllHints;

impl AnalyzerPass for RemoveAllHints {
    fn analyze(
        &self,
        logical_plan: Arc<LogicalPlan>,
        _plan_ctx: &mut PlanCtx<'_>,
    ) -> AnalyzerResult<Transformed<Arc<LogicalPlan>>> {
        Ok(self.remove_hints(logical_plan))
    }
}

impl RemoveAllHints {
    pub fn new() -> Self {
        RemoveAllHints
    }

    fn remove_hints(&self, logical_plan: Arc<LogicalPlan>) -> Transformed<Arc<LogicalPlan>> {
        match logical_plan.as_ref() {
            LogicalPlan::Empty | LogicalPlan::Scan(_) => Transformed::No(logical_plan.clone()),
            LogicalPlan::Filter(filter) => {
                let child_tf = self.remove_hints(filter.input.clone());
                filter.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Projection(projection) => {
                let child_tf = self.remove_hints(projection.input.clone());
                projection.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Limit(limit) => {
                let child_tf = self.remove_hints(limit.input.clone());
                limit.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Join(join) => {
                let left_tf = self.remove_hints(join.left.clone());
                let right_tf = self.remove_hints(join.right.clone());
                join.rebuild_or_clone(left_tf, right_tf, logical_plan.clone())
            }
            LogicalPlan::UnresolvedHint(hint) => {
                log::debug!("RemoveAllHints: removing hint `{}`", hint.name);
                Transformed::Yes(self.remove_hints(hint.input.clone()).get_plan())
            }
            LogicalPlan::ResolvedHint(hint) => {
                Transformed::Yes(self.remove_hints(hint.input.clone()).get_plan())
            }
        }
    }
}
