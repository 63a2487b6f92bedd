//! Moves resolved hints into the joins they apply to.
//!
//! For each join (bottom-up) whose [`JoinHint`] is still empty, the resolved
//! hints stacked on each input are collected, looking through filters,
//! projections and limits, and merged outermost-first into that side of the
//! join hint. The wrappers are removed from the tree.
//!
//! Any resolved hint left afterwards never reached a join; it is reported
//! through `join_not_found_for_join_hint` and removed.

use std::sync::Arc;

use crate::query_planner::{
    hints::{HintInfo, JoinHint},
    logical_plan::{Join, LogicalPlan, UnresolvedHint},
    optimizer::{
        errors::{OptimizerError, Pass},
        optimizer_pass::{OptimizerPass, OptimizerResult},
    },
    plan_ctx::PlanCtx,
    transformed::Transformed,
};

pub struct EliminateResolvedHints;

impl OptimizerPass for EliminateResolvedHints {
    fn optimize(
        &self,
        logical_plan: Arc<LogicalPlan>,
        plan_ctx: &mut PlanCtx<'_>,
    ) -> OptimizerResult<Transformed<Arc<LogicalPlan>>> {
        let pulled_tf = self.pull_hints_into_joins(logical_plan, plan_ctx)?;
        let pulled_changed = pulled_tf.is_yes();

        let stripped_tf = self.strip_orphan_hints(pulled_tf.get_plan(), plan_ctx)?;
        Ok(match stripped_tf {
            Transformed::No(plan) if pulled_changed => Transformed::Yes(plan),
            other => other,
        })
    }
}

impl EliminateResolvedHints {
    pub fn new() -> Self {
        EliminateResolvedHints
    }

    fn pull_hints_into_joins(
        &self,
        logical_plan: Arc<LogicalPlan>,
        plan_ctx: &mut PlanCtx<'_>,
    ) -> OptimizerResult<Transformed<Arc<LogicalPlan>>> {
        let transformed_plan = match logical_plan.as_ref() {
            LogicalPlan::Empty | LogicalPlan::Scan(_) => Transformed::No(logical_plan.clone()),
            LogicalPlan::Filter(filter) => {
                let child_tf = self.pull_hints_into_joins(filter.input.clone(), plan_ctx)?;
                filter.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Projection(projection) => {
                let child_tf = self.pull_hints_into_joins(projection.input.clone(), plan_ctx)?;
                projection.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Limit(limit) => {
                let child_tf = self.pull_hints_into_joins(limit.input.clone(), plan_ctx)?;
                limit.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::ResolvedHint(hint) => {
                let child_tf = self.pull_hints_into_joins(hint.input.clone(), plan_ctx)?;
                hint.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::UnresolvedHint(hint) => return Err(unresolved_hint_error(hint)),
            LogicalPlan::Join(join) => {
                let left_tf = self.pull_hints_into_joins(join.left.clone(), plan_ctx)?;
                let right_tf = self.pull_hints_into_joins(join.right.clone(), plan_ctx)?;
                if !join.hint.is_none() {
                    return Ok(join.rebuild_or_clone(left_tf, right_tf, logical_plan.clone()));
                }
                self.attach_join_hint(join, left_tf, right_tf, logical_plan.clone(), plan_ctx)?
            }
        };
        Ok(transformed_plan)
    }

    fn attach_join_hint(
        &self,
        join: &Join,
        left_tf: Transformed<Arc<LogicalPlan>>,
        right_tf: Transformed<Arc<LogicalPlan>>,
        old_plan: Arc<LogicalPlan>,
        plan_ctx: &mut PlanCtx<'_>,
    ) -> OptimizerResult<Transformed<Arc<LogicalPlan>>> {
        let left_changed = left_tf.is_yes();
        let right_changed = right_tf.is_yes();
        let (new_left, left_hints) = self.extract_hints(left_tf.get_plan())?;
        let (new_right, right_hints) = self.extract_hints(right_tf.get_plan())?;

        if left_hints.is_empty() && right_hints.is_empty() {
            let left_tf = if left_changed {
                Transformed::Yes(new_left)
            } else {
                Transformed::No(new_left)
            };
            let right_tf = if right_changed {
                Transformed::Yes(new_right)
            } else {
                Transformed::No(new_right)
            };
            return Ok(join.rebuild_or_clone(left_tf, right_tf, old_plan));
        }

        let hint = JoinHint::new(
            self.merge_hints(&left_hints, plan_ctx),
            self.merge_hints(&right_hints, plan_ctx),
        );
        log::debug!("EliminateResolvedHints: join hint {}", hint);

        Ok(Transformed::Yes(Arc::new(LogicalPlan::Join(Join {
            left: new_left,
            right: new_right,
            join_type: join.join_type,
            condition: join.condition.clone(),
            hint,
        }))))
    }

    /// Split the resolved hints off the top of a join input, outermost first.
    fn extract_hints(
        &self,
        logical_plan: Arc<LogicalPlan>,
    ) -> OptimizerResult<(Arc<LogicalPlan>, Vec<HintInfo>)> {
        match logical_plan.as_ref() {
            LogicalPlan::ResolvedHint(hint) => {
                let (inner, mut hints) = self.extract_hints(hint.input.clone())?;
                hints.insert(0, hint.info);
                Ok((inner, hints))
            }
            LogicalPlan::Filter(filter) => {
                let (inner, hints) = self.extract_hints(filter.input.clone())?;
                if hints.is_empty() {
                    return Ok((logical_plan.clone(), hints));
                }
                let rebuilt =
                    filter.rebuild_or_clone(Transformed::Yes(inner), logical_plan.clone());
                Ok((rebuilt.get_plan(), hints))
            }
            LogicalPlan::Projection(projection) => {
                let (inner, hints) = self.extract_hints(projection.input.clone())?;
                if hints.is_empty() {
                    return Ok((logical_plan.clone(), hints));
                }
                let rebuilt =
                    projection.rebuild_or_clone(Transformed::Yes(inner), logical_plan.clone());
                Ok((rebuilt.get_plan(), hints))
            }
            LogicalPlan::Limit(limit) => {
                let (inner, hints) = self.extract_hints(limit.input.clone())?;
                if hints.is_empty() {
                    return Ok((logical_plan.clone(), hints));
                }
                let rebuilt = limit.rebuild_or_clone(Transformed::Yes(inner), logical_plan.clone());
                Ok((rebuilt.get_plan(), hints))
            }
            LogicalPlan::UnresolvedHint(hint) => Err(unresolved_hint_error(hint)),
            LogicalPlan::Empty | LogicalPlan::Scan(_) | LogicalPlan::Join(_) => {
                Ok((logical_plan.clone(), vec![]))
            }
        }
    }

    /// Outer hints win: each is merged over the ones below it.
    fn merge_hints(&self, hints: &[HintInfo], plan_ctx: &mut PlanCtx<'_>) -> Option<HintInfo> {
        hints
            .iter()
            .copied()
            .reduce(|outer, inner| outer.merge(&inner, plan_ctx.hint_error_handler()))
    }

    fn strip_orphan_hints(
        &self,
        logical_plan: Arc<LogicalPlan>,
        plan_ctx: &mut PlanCtx<'_>,
    ) -> OptimizerResult<Transformed<Arc<LogicalPlan>>> {
        let transformed_plan = match logical_plan.as_ref() {
            LogicalPlan::Empty | LogicalPlan::Scan(_) => Transformed::No(logical_plan.clone()),
            LogicalPlan::Filter(filter) => {
                let child_tf = self.strip_orphan_hints(filter.input.clone(), plan_ctx)?;
                filter.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Projection(projection) => {
                let child_tf = self.strip_orphan_hints(projection.input.clone(), plan_ctx)?;
                projection.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Limit(limit) => {
                let child_tf = self.strip_orphan_hints(limit.input.clone(), plan_ctx)?;
                limit.rebuild_or_clone(child_tf, logical_plan.clone())
            }
            LogicalPlan::Join(join) => {
                let left_tf = self.strip_orphan_hints(join.left.clone(), plan_ctx)?;
                let right_tf = self.strip_orphan_hints(join.right.clone(), plan_ctx)?;
                join.rebuild_or_clone(left_tf, right_tf, logical_plan.clone())
            }
            LogicalPlan::ResolvedHint(hint) => {
                let input = self.strip_orphan_hints(hint.input.clone(), plan_ctx)?.get_plan();
                log::debug!("EliminateResolvedHints: hint {} is not on a join input", hint.info);
                plan_ctx
                    .hint_error_handler()
                    .join_not_found_for_join_hint(&hint.info);
                Transformed::Yes(input)
            }
            LogicalPlan::UnresolvedHint(hint) => return Err(unresolved_hint_error(hint)),
        };
        Ok(transformed_plan)
    }
}

fn unresolved_hint_error(hint: &UnresolvedHint) -> OptimizerError {
    OptimizerError::UnresolvedHint {
        pass: Pass::EliminateResolvedHints,
        name: hint.name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::HintConfig,
        query_planner::{
            hints::{CollectingHintErrorHandler, HintDiagnostic, JoinStrategy},
            logical_expr::{Literal, LogicalExpr},
            logical_plan::{Filter, JoinType, ResolvedHint, Scan},
        },
    };

    fn scan(alias: &str) -> Arc<LogicalPlan> {
        Arc::new(LogicalPlan::Scan(Scan {
            table_alias: Some(alias.to_string()),
            table_name: None,
            columns: vec![format!("{}.id", alias)],
        }))
    }

    fn join(left: Arc<LogicalPlan>, right: Arc<LogicalPlan>, hint: JoinHint) -> Arc<LogicalPlan> {
        Arc::new(LogicalPlan::Join(Join {
            left,
            right,
            join_type: JoinType::Inner,
            condition: None,
            hint,
        }))
    }

    fn resolved(input: Arc<LogicalPlan>, strategy: JoinStrategy) -> Arc<LogicalPlan> {
        Arc::new(LogicalPlan::ResolvedHint(ResolvedHint::new(input, HintInfo::new(strategy))))
    }

    fn filter(input: Arc<LogicalPlan>) -> Arc<LogicalPlan> {
        Arc::new(LogicalPlan::Filter(Filter {
            input,
            predicate: LogicalExpr::Literal(Literal::Boolean(true)),
        }))
    }

    fn run(
        plan: Arc<LogicalPlan>,
    ) -> (
        OptimizerResult<Transformed<Arc<LogicalPlan>>>,
        Vec<HintDiagnostic>,
    ) {
        let mut handler = CollectingHintErrorHandler::new();
        let result = {
            let mut plan_ctx = PlanCtx::new(&HintConfig::default(), &mut handler);
            EliminateResolvedHints::new().optimize(plan, &mut plan_ctx)
        };
        (result, handler.into_diagnostics())
    }

    #[test]
    fn test_hint_on_input_moves_into_join() {
        let plan = join(resolved(scan("a"), JoinStrategy::Broadcast), scan("b"), JoinHint::NONE);

        let (result, diagnostics) = run(plan);

        assert_eq!(
            result.unwrap().get_plan(),
            join(
                scan("a"),
                scan("b"),
                JoinHint::new(Some(HintInfo::new(JoinStrategy::Broadcast)), None)
            )
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_stacked_hints_merge_outermost_first() {
        let left = resolved(
            filter(resolved(scan("a"), JoinStrategy::ShuffleHash)),
            JoinStrategy::Broadcast,
        );
        let right = resolved(scan("b"), JoinStrategy::ShuffleMerge);
        let plan = join(left, right, JoinHint::NONE);

        let (result, diagnostics) = run(plan);

        assert_eq!(
            result.unwrap().get_plan(),
            join(
                filter(scan("a")),
                scan("b"),
                JoinHint::new(
                    Some(HintInfo::new(JoinStrategy::Broadcast)),
                    Some(HintInfo::new(JoinStrategy::ShuffleMerge)),
                )
            )
        );
        assert_eq!(
            diagnostics,
            vec![HintDiagnostic::HintOverridden {
                info: HintInfo::new(JoinStrategy::ShuffleHash)
            }]
        );
    }

    #[test]
    fn test_hint_above_inner_join_goes_to_outer_join() {
        let inner = join(scan("b"), scan("c"), JoinHint::NONE);
        let plan = join(
            scan("a"),
            resolved(inner, JoinStrategy::ShuffleReplicateNl),
            JoinHint::NONE,
        );

        let (result, diagnostics) = run(plan);

        assert_eq!(
            result.unwrap().get_plan(),
            join(
                scan("a"),
                join(scan("b"), scan("c"), JoinHint::NONE),
                JoinHint::new(None, Some(HintInfo::new(JoinStrategy::ShuffleReplicateNl)))
            )
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_orphan_hint_is_reported_and_removed() {
        let plan = resolved(join(scan("a"), scan("b"), JoinHint::NONE), JoinStrategy::Broadcast);

        let (result, diagnostics) = run(plan);

        assert_eq!(result.unwrap().get_plan(), join(scan("a"), scan("b"), JoinHint::NONE));
        assert_eq!(
            diagnostics,
            vec![HintDiagnostic::JoinNotFoundForHint {
                info: HintInfo::new(JoinStrategy::Broadcast)
            }]
        );
    }

    #[test]
    fn test_plan_without_hints_is_not_transformed() {
        let plan = filter(join(scan("a"), scan("b"), JoinHint::NONE));

        let (result, diagnostics) = run(plan.clone());

        let result = result.unwrap();
        assert!(!result.is_yes());
        assert!(Arc::ptr_eq(&result.get_plan(), &plan));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unresolved_hint_is_an_error() {
        let plan = join(
            Arc::new(LogicalPlan::UnresolvedHint(UnresolvedHint::new(
                "BROADCAST",
                vec![],
                scan("a"),
            ))),
            scan("b"),
            JoinHint::NONE,
        );

        let (result, _) = run(plan);

        assert_eq!(
            result.unwrap_err(),
            OptimizerError::UnresolvedHint {
                pass: Pass::EliminateResolvedHints,
                name: "BROADCAST".to_string(),
            }
        );
    }
}
