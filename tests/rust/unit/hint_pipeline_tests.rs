//! End-to-end hint planning over hand-built logical plans
//!
//! Each test builds the plan a parser would produce for a hinted query and
//! checks the planned tree and the diagnostics the host would receive.

#[cfg(test)]
mod hint_pipeline_tests {
    use std::sync::Arc;

    use joinhint::{
        config::{init_logging, HintConfig},
        query_planner::{
            hints::{
                CollectingHintErrorHandler, HintDiagnostic, HintInfo, JoinHint, JoinStrategy,
                LoggingHintErrorHandler, NoopHintErrorHandler,
            },
            logical_expr::{Literal, LogicalExpr, TableAlias},
            logical_plan::{Join, JoinType, LogicalPlan, ResolvedHint, Scan, UnresolvedHint},
            plan_hints, resolve_hints,
        },
    };

    fn scan(alias: &str) -> Arc<LogicalPlan> {
        Arc::new(LogicalPlan::Scan(Scan {
            table_alias: Some(alias.to_string()),
            table_name: Some(format!("{}_table", alias)),
            columns: vec![format!("{}.id", alias)],
        }))
    }

    fn table_scan(table_name: &str) -> Arc<LogicalPlan> {
        Arc::new(LogicalPlan::Scan(Scan {
            table_alias: None,
            table_name: Some(table_name.to_string()),
            columns: vec!["id".to_string()],
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

    fn hint(name: &str, relations: &[&str], input: Arc<LogicalPlan>) -> Arc<LogicalPlan> {
        let parameters = relations
            .iter()
            .map(|r| LogicalExpr::TableAlias(TableAlias(r.to_string())))
            .collect();
        Arc::new(LogicalPlan::UnresolvedHint(UnresolvedHint::new(name, parameters, input)))
    }

    fn info(strategy: JoinStrategy) -> HintInfo {
        HintInfo::new(strategy)
    }

    fn plan_collecting(
        plan: Arc<LogicalPlan>,
        config: &HintConfig,
    ) -> (Arc<LogicalPlan>, Vec<HintDiagnostic>) {
        let mut handler = CollectingHintErrorHandler::new();
        let planned = plan_hints(plan, config, &mut handler).expect("hint planning failed");
        (planned, handler.into_diagnostics())
    }

    #[test]
    fn test_hint_on_join_input_becomes_join_hint() {
        let plan = join(scan("a"), hint("BROADCAST", &[], scan("b")), JoinHint::NONE);

        let (planned, diagnostics) = plan_collecting(plan, &HintConfig::default());

        assert_eq!(
            planned,
            join(
                scan("a"),
                scan("b"),
                JoinHint::new(None, Some(info(JoinStrategy::Broadcast)))
            )
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_relation_hint_over_join_targets_named_side() {
        let plan = hint("MAPJOIN", &["a"], join(scan("a"), scan("b"), JoinHint::NONE));

        let (planned, diagnostics) = plan_collecting(plan, &HintConfig::default());

        assert_eq!(
            planned,
            join(
                scan("a"),
                scan("b"),
                JoinHint::new(Some(info(JoinStrategy::Broadcast)), None)
            )
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_outer_relation_hint_overrides_inner() {
        let inner = hint("SHUFFLE_HASH", &["a"], join(scan("a"), scan("b"), JoinHint::NONE));
        let plan = hint("BROADCAST", &["a"], inner);

        let (planned, diagnostics) = plan_collecting(plan, &HintConfig::default());

        assert_eq!(
            planned,
            join(
                scan("a"),
                scan("b"),
                JoinHint::new(Some(info(JoinStrategy::Broadcast)), None)
            )
        );
        assert_eq!(
            diagnostics,
            vec![HintDiagnostic::HintOverridden {
                info: info(JoinStrategy::ShuffleHash)
            }]
        );
    }

    #[test]
    fn test_both_sides_hinted() {
        let inner = hint("MERGE", &["b"], join(scan("a"), scan("b"), JoinHint::NONE));
        let plan = hint("SHUFFLE_REPLICATE_NL", &["a"], inner);

        let (planned, diagnostics) = plan_collecting(plan, &HintConfig::default());

        let expected_hint = JoinHint::new(
            Some(info(JoinStrategy::ShuffleReplicateNl)),
            Some(info(JoinStrategy::ShuffleMerge)),
        );
        assert_eq!(planned, join(scan("a"), scan("b"), expected_hint));
        assert_eq!(expected_hint.preferred_strategy(), Some(JoinStrategy::ShuffleMerge));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_hint_is_dropped_and_reported() {
        let plan = hint("UNKNOWNHINT", &[], join(scan("a"), scan("b"), JoinHint::NONE));

        let (planned, diagnostics) = plan_collecting(plan, &HintConfig::default());

        assert_eq!(planned, join(scan("a"), scan("b"), JoinHint::NONE));
        assert_eq!(
            diagnostics,
            vec![HintDiagnostic::UnrecognizedHint {
                name: "UNKNOWNHINT".to_string(),
                parameters: vec![],
            }]
        );
    }

    #[test]
    fn test_missing_relations_reported_once_sorted() {
        let plan = hint(
            "BROADCAST",
            &["missing", "c", "a", "c"],
            join(scan("a"), scan("b"), JoinHint::NONE),
        );

        let (planned, diagnostics) = plan_collecting(plan, &HintConfig::default());

        assert_eq!(
            planned,
            join(
                scan("a"),
                scan("b"),
                JoinHint::new(Some(info(JoinStrategy::Broadcast)), None)
            )
        );
        assert_eq!(diagnostics.len(), 1);
        match &diagnostics[0] {
            HintDiagnostic::RelationsNotFound {
                name,
                invalid_relations,
                ..
            } => {
                assert_eq!(name, "BROADCAST");
                assert_eq!(invalid_relations, &vec!["c".to_string(), "missing".to_string()]);
            }
            other => panic!("unexpected diagnostic: {:?}", other),
        }
    }

    #[test]
    fn test_qualified_relation_matches_table_name_suffix() {
        let plan = Arc::new(LogicalPlan::UnresolvedHint(UnresolvedHint::new(
            "SHUFFLE_HASH",
            vec![LogicalExpr::Literal(Literal::String("sales.orders".to_string()))],
            join(table_scan("prod.sales.orders"), table_scan("prod.sales.items"), JoinHint::NONE),
        )));

        let (planned, diagnostics) = plan_collecting(plan, &HintConfig::default());

        assert_eq!(
            planned,
            join(
                table_scan("prod.sales.orders"),
                table_scan("prod.sales.items"),
                JoinHint::new(Some(info(JoinStrategy::ShuffleHash)), None)
            )
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_hint_over_whole_join_is_orphaned() {
        let plan = hint("BROADCAST", &[], join(scan("a"), scan("b"), JoinHint::NONE));

        let (planned, diagnostics) = plan_collecting(plan, &HintConfig::default());

        assert_eq!(planned, join(scan("a"), scan("b"), JoinHint::NONE));
        assert_eq!(
            diagnostics,
            vec![HintDiagnostic::JoinNotFoundForHint {
                info: info(JoinStrategy::Broadcast)
            }]
        );
    }

    #[test]
    fn test_disabled_hints_are_removed_silently() {
        let config = HintConfig {
            enabled: false,
            ..HintConfig::default()
        };
        let plan = join(
            hint("UNKNOWNHINT", &[], scan("a")),
            hint("BROADCAST", &[], scan("b")),
            JoinHint::NONE,
        );

        let (planned, diagnostics) = plan_collecting(plan, &config);

        assert_eq!(planned, join(scan("a"), scan("b"), JoinHint::NONE));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_resolve_hints_keeps_wrappers() {
        let plan = join(scan("a"), hint("broadcastjoin", &[], scan("b")), JoinHint::NONE);
        let mut handler = NoopHintErrorHandler;

        let resolved = resolve_hints(plan.clone(), &HintConfig::default(), &mut handler).unwrap();

        let expected = join(
            scan("a"),
            Arc::new(LogicalPlan::ResolvedHint(ResolvedHint::new(
                scan("b"),
                info(JoinStrategy::Broadcast),
            ))),
            JoinHint::NONE,
        );
        assert_eq!(resolved, expected);
        assert!(!resolved.contains_unresolved_hint());
        let unhinted = join(scan("a"), scan("b"), JoinHint::NONE);
        assert_eq!(resolved.canonicalize(), unhinted.canonicalize());
        assert_ne!(plan.canonicalize(), unhinted.canonicalize());
        assert_eq!(resolved.output(), plan.output());
    }

    #[test]
    fn test_strict_host_escalates_first_diagnostic() {
        let plan = hint("UNKNOWNHINT", &[], scan("a"));
        let mut handler = CollectingHintErrorHandler::new();

        plan_hints(plan, &HintConfig::default(), &mut handler).unwrap();

        let err = handler.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Unrecognized hint: UNKNOWNHINT");
    }

    #[test]
    fn test_logging_handler_does_not_fail_planning() {
        init_logging(&HintConfig::default());
        let plan = hint("UNKNOWNHINT", &[], join(scan("a"), scan("b"), JoinHint::NONE));
        let mut handler = LoggingHintErrorHandler;

        let planned = plan_hints(plan, &HintConfig::default(), &mut handler).unwrap();

        assert_eq!(planned, join(scan("a"), scan("b"), JoinHint::NONE));
    }

    #[test]
    fn test_planned_join_hint_serializes() {
        let plan = join(scan("a"), hint("MERGEJOIN", &[], scan("b")), JoinHint::NONE);

        let (planned, _) = plan_collecting(plan, &HintConfig::default());

        let LogicalPlan::Join(planned_join) = planned.as_ref() else {
            panic!("expected a join, got {}", planned);
        };
        let json = serde_json::to_value(planned_join.hint).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "left": null, "right": { "strategy": "merge" } })
        );
    }
}
