use std::sync::Arc;

pub use errors::QueryPlannerError;

use crate::{
    config::HintConfig,
    query_planner::{hints::HintErrorHandler, logical_plan::LogicalPlan, plan_ctx::PlanCtx},
};

pub mod analyzer;
mod errors;
pub mod hints;
pub mod logical_expr;
pub mod logical_plan;
pub mod optimizer;
pub mod plan_ctx;
pub mod transformed;

/// Resolve the hint wrappers in `logical_plan` without moving them into joins.
///
/// The returned plan holds only [`ResolvedHint`](logical_plan::ResolvedHint)
/// wrappers, or none when hints are disabled.
pub fn resolve_hints(
    logical_plan: Arc<LogicalPlan>,
    config: &HintConfig,
    hint_error_handler: &mut dyn HintErrorHandler,
) -> Result<Arc<LogicalPlan>, QueryPlannerError> {
    let mut plan_ctx = PlanCtx::new(config, hint_error_handler);
    let logical_plan = analyzer::analyze_hints(logical_plan, &mut plan_ctx)?;
    Ok(logical_plan)
}

/// Run the full hint pipeline: resolve every hint, then attach the resolved
/// hints to the joins they sit on. The result contains no hint wrappers.
pub fn plan_hints(
    logical_plan: Arc<LogicalPlan>,
    config: &HintConfig,
    hint_error_handler: &mut dyn HintErrorHandler,
) -> Result<Arc<LogicalPlan>, QueryPlannerError> {
    let mut plan_ctx = PlanCtx::new(config, hint_error_handler);

    let logical_plan = analyzer::analyze_hints(logical_plan, &mut plan_ctx)?;
    let logical_plan = optimizer::optimize_hints(logical_plan, &mut plan_ctx)?;

    log::debug!("Hint planning finished:\n{}", logical_plan);
    Ok(logical_plan)
}
