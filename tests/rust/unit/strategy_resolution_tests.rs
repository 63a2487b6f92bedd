//! Hint name resolution and merge behavior through the public API

#[cfg(test)]
mod strategy_resolution_tests {
    use joinhint::{
        config::HintNameMatching,
        query_planner::hints::{
            CollectingHintErrorHandler, HintDiagnostic, HintInfo, JoinStrategy, StrategyCatalog,
        },
    };
    use test_case::test_case;

    #[test_case("BROADCAST", JoinStrategy::Broadcast; "broadcast")]
    #[test_case("BROADCASTJOIN", JoinStrategy::Broadcast; "broadcastjoin")]
    #[test_case("MAPJOIN", JoinStrategy::Broadcast; "mapjoin")]
    #[test_case("SHUFFLE_MERGE", JoinStrategy::ShuffleMerge; "shuffle merge")]
    #[test_case("MERGE", JoinStrategy::ShuffleMerge; "merge")]
    #[test_case("MERGEJOIN", JoinStrategy::ShuffleMerge; "mergejoin")]
    #[test_case("SHUFFLE_HASH", JoinStrategy::ShuffleHash; "shuffle hash")]
    #[test_case("SHUFFLE_REPLICATE_NL", JoinStrategy::ShuffleReplicateNl; "shuffle replicate nl")]
    fn test_alias_resolves(name: &str, expected: JoinStrategy) {
        let catalog = StrategyCatalog::default();
        assert_eq!(catalog.resolve(name), Some(expected));
    }

    #[test]
    fn test_broadcast_display_name() {
        let strategy = StrategyCatalog::default().resolve("BROADCAST");
        assert_eq!(strategy, Some(JoinStrategy::Broadcast));
        assert_eq!(JoinStrategy::Broadcast.display_name(), "broadcast");
        assert_eq!(JoinStrategy::Broadcast.to_string(), "broadcast");
    }

    #[test_case("UNKNOWNHINT"; "unknown name")]
    #[test_case("NO_BROADCAST_HASH"; "internal strategy has no alias")]
    #[test_case(""; "empty name")]
    fn test_unknown_name_is_unrecognized(name: &str) {
        assert_eq!(StrategyCatalog::default().resolve(name), None);
    }

    #[test_case(HintNameMatching::Uppercase, Some(JoinStrategy::Broadcast); "uppercase matching")]
    #[test_case(HintNameMatching::Exact, None; "exact matching")]
    fn test_lowercase_name_depends_on_matching(
        name_matching: HintNameMatching,
        expected: Option<JoinStrategy>,
    ) {
        assert_eq!(StrategyCatalog::new(name_matching).resolve("broadcast"), expected);
    }

    #[test]
    fn test_merge_conflict_keeps_left_and_reports_right() {
        let mut handler = CollectingHintErrorHandler::new();

        let merged = HintInfo::new(JoinStrategy::Broadcast)
            .merge(&HintInfo::new(JoinStrategy::ShuffleHash), &mut handler);

        assert_eq!(merged, HintInfo::new(JoinStrategy::Broadcast));
        assert_eq!(
            handler.into_diagnostics(),
            vec![HintDiagnostic::HintOverridden {
                info: HintInfo::new(JoinStrategy::ShuffleHash)
            }]
        );
    }

    #[test]
    fn test_merge_into_empty_hint_is_silent() {
        let mut handler = CollectingHintErrorHandler::new();

        let merged =
            HintInfo::EMPTY.merge(&HintInfo::new(JoinStrategy::ShuffleMerge), &mut handler);

        assert_eq!(merged, HintInfo::new(JoinStrategy::ShuffleMerge));
        assert!(handler.is_empty());
    }

    #[test]
    fn test_merge_is_not_commutative_on_conflict() {
        let mut handler = CollectingHintErrorHandler::new();
        let broadcast = HintInfo::new(JoinStrategy::Broadcast);
        let merge = HintInfo::new(JoinStrategy::ShuffleMerge);

        assert_ne!(
            broadcast.merge(&merge, &mut handler),
            merge.merge(&broadcast, &mut handler)
        );
        assert_eq!(handler.diagnostics().len(), 2);
    }

    #[test]
    fn test_strategy_serializes_as_display_name() {
        for strategy in JoinStrategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{}\"", strategy.display_name()));
        }
    }
}
