use std::sync::Arc;

use crate::query_planner::{logical_plan::LogicalPlan, plan_ctx::PlanCtx, transformed::Transformed};

use super::errors::AnalyzerError;

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

pub trait AnalyzerPass {
    fn analyze(
        &self,
        logical_plan: Arc<LogicalPlan>,
        plan_ctx: &mut PlanCtx<'_>,
    ) -> AnalyzerResult<Transformed<Arc<LogicalPlan>>>;
}
