use std::sync::Arc;

use crate::query_planner::{
    logical_plan::LogicalPlan,
    optimizer::{
        eliminate_resolved_hints::EliminateResolvedHints,
        optimizer_pass::{OptimizerPass, OptimizerResult},
    },
};

use super::plan_ctx::PlanCtx;

mod eliminate_resolved_hints;
pub mod errors;
pub mod optimizer_pass;

// Helper to recursively print plan structure for debugging (TRACE level)
fn log_plan_structure(plan: &LogicalPlan, indent: usize) {
    if !log::log_enabled!(log::Level::Trace) {
        return;
    }

    let prefix = "  ".repeat(indent);
    match plan {
        LogicalPlan::Join(j) => {
            log::trace!("{}Join({:?}, {})", prefix, j.join_type, j.hint);
            log_plan_structure(&j.left, indent + 1);
            log_plan_structure(&j.right, indent + 1);
        }
        LogicalPlan::ResolvedHint(h) => {
            log::trace!("{}ResolvedHint{}", prefix, h.info);
            log_plan_structure(&h.input, indent + 1);
        }
        other => {
            log::trace!("{}{}", prefix, other.variant_name());
            for child in other.children() {
                log_plan_structure(child, indent + 1);
            }
        }
    }
}

pub fn optimize_hints(
    plan: Arc<LogicalPlan>,
    plan_ctx: &mut PlanCtx<'_>,
) -> OptimizerResult<Arc<LogicalPlan>> {
    log::trace!("Hint optimization: plan structure before EliminateResolvedHints:");
    log_plan_structure(&plan, 1);

    let eliminate_resolved_hints = EliminateResolvedHints::new();
    let transformed_plan = eliminate_resolved_hints.optimize(plan, plan_ctx)?;
    log::debug!(
        "Hint optimization: EliminateResolvedHints transformed={}",
        transformed_plan.is_yes()
    );
    let plan = transformed_plan.get_plan();

    log::trace!("Hint optimization: plan structure after EliminateResolvedHints:");
    log_plan_structure(&plan, 1);
    Ok(plan)
}
