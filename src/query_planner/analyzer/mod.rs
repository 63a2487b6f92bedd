//! # Hint Analyzer
//!
//! Resolves the hint wrappers the parser left in the logical plan.
//!
//! ## Pass Pipeline
//!
//! ```text
//! 1. ResolveJoinStrategyHints - UnresolvedHint -> ResolvedHint, or dropped
//!    (RemoveAllHints instead, when hints are disabled)
//! 2. HintResolutionCheck      - no UnresolvedHint may remain
//! ```
//!
//! Problems with individual hints go to the [`HintErrorHandler`] in the
//! [`PlanCtx`] and never fail analysis. Only a structurally incomplete plan
//! produces an [`AnalyzerError`].
//!
//! [`HintErrorHandler`]: crate::query_planner::hints::HintErrorHandler
//! [`AnalyzerError`]: errors::AnalyzerError

use std::sync::Arc;

use analyzer_pass::AnalyzerResult;

use crate::query_planner::{
    analyzer::{
        analyzer_pass::AnalyzerPass, hint_resolution_check::HintResolutionCheck,
        remove_all_hints::RemoveAllHints, resolve_join_strategy_hints::ResolveJoinStrategyHints,
    },
    logical_plan::LogicalPlan,
};

use super::plan_ctx::PlanCtx;

mod analyzer_pass;
pub mod errors;
mod hint_resolution_check;
mod remove_all_hints;
mod resolve_join_strategy_hints;

pub fn analyze_hints(
    plan: Arc<LogicalPlan>,
    plan_ctx: &mut PlanCtx<'_>,
) -> AnalyzerResult<Arc<LogicalPlan>> {
    log::debug!("ANALYZER: Entering analyze_hints");

    let plan = if plan_ctx.config().enabled {
        let resolve_hints = ResolveJoinStrategyHints::new();
        resolve_hints.analyze(plan, plan_ctx)?.get_plan()
    } else {
        log::debug!("ANALYZER: hints disabled, removing all hint wrappers");
        let remove_hints = RemoveAllHints::new();
        remove_hints.analyze(plan, plan_ctx)?.get_plan()
    };

    let resolution_check = HintResolutionCheck::new();
    let plan = resolution_check.analyze(plan, plan_ctx)?.get_plan();

    log::trace!("ANALYZER: plan after analyze_hints: {}", plan);
    Ok(plan)
}
