//! Resolution of join strategy hints.
//!
//! Replaces every [`UnresolvedHint`] with [`ResolvedHint`] wrappers, working
//! bottom-up so an outer hint sees the inner hints already resolved.
//!
//! - `BROADCAST` (no parameters) wraps the hint's whole input.
//! - `BROADCAST(t1, db.t2)` wraps each scan under the hint whose name ends
//!   with one of the parameters; parameters that match nothing are reported
//!   through `hint_relations_not_found`.
//! - A name that is not a strategy alias is reported through
//!   `hint_not_recognized` and the hint is dropped, keeping its input.
//!
//! When a relation is already wrapped by an inner hint, the outer hint is
//! merged over it and wins on conflict.

use std::{collections::BTreeSet, sync::Arc};

use crate::query_planner::{
    analyzer::analyzer_pass::{AnalyzerPass, AnalyzerResult},
    hints::{HintInfo, JoinStrategy},
    logical_expr::LogicalExpr,
    logical_plan::{LogicalPlan, ResolvedHint, Scan, UnresolvedHint},
    plan_ctx::PlanCtx,
    transformed::Transformed,
};

pub struct ResolveJoinStrategyHints;

impl AnalyzerPass for ResolveJoinStrategyHints {
    fn analyze(
        &self,
        logical_plan: Arc<LogicalPlan>,
        plan_ctx: &mut PlanCtx<'_>,
    ) -> AnalyzerResult<Transformed<Arc<LogicalPlan>>> {
        self.resolve_hints(logical_plan, plan_ctx)
    }
}

/// A relation named by a hint parameter.
struct RelationTarget {
    /// Parameter as written, used in diagnostics
    written: String,
    /// Comparison keys of the name parts, `None` when the parameter is not
    /// a relation identifier
    key_parts: Option<Vec<String>>,
}

impl ResolveJoinStrategyHints {
    pub fn new() -> Self {
        ResolveJoinStrategyHints
    }

    fn resolve_hints(
        &self,
        logical_plan: Arc<LogicalPlan>,
        plan_ctx: &mut PlanCtx<'_>,
    ) -> AnalyzerResult<Transformed<Arc<LogicalPlan>>> {
        let transformed_plan = match logical_plan.as_ref() {
            LogicalPlan::Empty | LogicalPlan::Scan(_) => Transformed::No(logical_plan.clone()),
            LogicalPlan::Filter(filter) => {
                let child_tf = self.resolve_hints(filter.input.clone(), plan_ctx)?;
                filter.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Projection(projection) => {
                let child_tf = self.resolve_hints(projection.input.clone(), plan_ctx)?;
                projection.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Limit(limit) => {
                let child_tf = self.resolve_hints(limit.input.clone(), plan_ctx)?;
                limit.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Join(join) => {
                let left_tf = self.resolve_hints(join.left.clone(), plan_ctx)?;
                let right_tf = self.resolve_hints(join.right.clone(), plan_ctx)?;
                join.rebuild_or_clone(left_tf, right_tf, logical_plan.clone())
            }
            LogicalPlan::ResolvedHint(hint) => {
                let child_tf = self.resolve_hints(hint.input.clone(), plan_ctx)?;
                hint.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::UnresolvedHint(hint) => {
                let input = self.resolve_hints(hint.input.clone(), plan_ctx)?.get_plan();
                Transformed::Yes(self.resolve_hint(hint, input, plan_ctx))
            }
        };
        Ok(transformed_plan)
    }

    fn resolve_hint(
        &self,
        hint: &UnresolvedHint,
        input: Arc<LogicalPlan>,
        plan_ctx: &mut PlanCtx<'_>,
    ) -> Arc<LogicalPlan> {
        let Some(strategy) = plan_ctx.catalog().resolve(&hint.name) else {
            log::debug!("ResolveJoinStrategyHints: dropping unrecognized hint `{}`", hint.name);
            plan_ctx
                .hint_error_handler()
                .hint_not_recognized(&hint.name, &hint.parameters);
            return input;
        };

        if hint.parameters.is_empty() {
            log::debug!(
                "ResolveJoinStrategyHints: `{}` resolved to {} for the whole input",
                hint.name,
                strategy
            );
            return Arc::new(LogicalPlan::ResolvedHint(ResolvedHint::new(
                input,
                HintInfo::new(strategy),
            )));
        }

        let targets = self.relation_targets(&hint.parameters, plan_ctx);
        let mut matched = BTreeSet::new();
        let applied = self
            .apply_to_relations(input, strategy, &targets, &mut matched, plan_ctx)
            .get_plan();

        let unmatched: Vec<String> = targets
            .iter()
            .enumerate()
            .filter(|(i, _)| !matched.contains(i))
            .map(|(_, target)| target.written.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !unmatched.is_empty() {
            plan_ctx
                .hint_error_handler()
                .hint_relations_not_found(&hint.name, &hint.parameters, &unmatched);
        }
        applied
    }

    fn relation_targets(
        &self,
        parameters: &[LogicalExpr],
        plan_ctx: &PlanCtx<'_>,
    ) -> Vec<RelationTarget> {
        parameters
            .iter()
            .map(|param| RelationTarget {
                written: param.to_string(),
                key_parts: param.as_relation_identifier().map(|ident| {
                    ident
                        .split('.')
                        .map(|part| plan_ctx.relation_key(part))
                        .collect()
                }),
            })
            .collect()
    }

    /// Wrap matching scans under `logical_plan`. Does not descend below an
    /// existing resolved hint unless it directly wraps a matching scan.
    fn apply_to_relations(
        &self,
        logical_plan: Arc<LogicalPlan>,
        strategy: JoinStrategy,
        targets: &[RelationTarget],
        matched: &mut BTreeSet<usize>,
        plan_ctx: &mut PlanCtx<'_>,
    ) -> Transformed<Arc<LogicalPlan>> {
        match logical_plan.as_ref() {
            LogicalPlan::Empty => Transformed::No(logical_plan.clone()),
            LogicalPlan::Scan(scan) => {
                if self.mark_matches(scan, targets, matched, plan_ctx) {
                    Transformed::Yes(Arc::new(LogicalPlan::ResolvedHint(ResolvedHint::new(
                        logical_plan.clone(),
                        HintInfo::new(strategy),
                    ))))
                } else {
                    Transformed::No(logical_plan.clone())
                }
            }
            LogicalPlan::ResolvedHint(existing) => {
                let LogicalPlan::Scan(scan) = existing.input.as_ref() else {
                    return Transformed::No(logical_plan.clone());
                };
                if !self.mark_matches(scan, targets, matched, plan_ctx) {
                    return Transformed::No(logical_plan.clone());
                }
                let info =
                    HintInfo::new(strategy).merge(&existing.info, plan_ctx.hint_error_handler());
                Transformed::Yes(Arc::new(LogicalPlan::ResolvedHint(ResolvedHint::new(
                    existing.input.clone(),
                    info,
                ))))
            }
            LogicalPlan::Filter(filter) => {
                let child_tf = self.apply_to_relations(
                    filter.input.clone(),
                    strategy,
                    targets,
                    matched,
                    plan_ctx,
                );
                filter.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Projection(projection) => {
                let child_tf = self.apply_to_relations(
                    projection.input.clone(),
                    strategy,
                    targets,
                    matched,
                    plan_ctx,
                );
                projection.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Limit(limit) => {
                let child_tf = self.apply_to_relations(
                    limit.input.clone(),
                    strategy,
                    targets,
                    matched,
                    plan_ctx,
                );
                limit.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Join(join) => {
                let left_tf = self.apply_to_relations(
                    join.left.clone(),
                    strategy,
                    targets,
                    matched,
                    plan_ctx,
                );
                let right_tf = self.apply_to_relations(
                    join.right.clone(),
                    strategy,
                    targets,
                    matched,
                    plan_ctx,
                );
                join.rebuild_or_clone(left_tf, right_tf, logical_plan.clone())
            }
            LogicalPlan::UnresolvedHint(hint) => {
                let child_tf = self.apply_to_relations(
                    hint.input.clone(),
                    strategy,
                    targets,
                    matched,
                    plan_ctx,
                );
                hint.rebuild_or_clone(child_tf, logical_plan.clone())
            }
        }
    }

    /// Record every target naming `scan`; true if any did.
    fn mark_matches(
        &self,
        scan: &Scan,
        targets: &[RelationTarget],
        matched: &mut BTreeSet<usize>,
        plan_ctx: &PlanCtx<'_>,
    ) -> bool {
        let scan_parts: Vec<String> = scan
            .relation_name_parts()
            .into_iter()
            .map(|part| plan_ctx.relation_key(part))
            .collect();

        let mut any = false;
        for (i, target) in targets.iter().enumerate() {
            let Some(parts) = &target.key_parts else {
                continue;
            };
            if !parts.is_empty() && scan_parts.ends_with(parts) {
                matched.insert(i);
                any = true;
            }
        }
        any
    }
}
