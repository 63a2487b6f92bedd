//! Join strategy catalog.
//!
//! The closed set of join algorithms a hint can ask for, the literal names
//! each one answers to, and name-based resolution.

use std::{borrow::Cow, collections::HashMap, fmt};

use serde::{Deserialize, Serialize};

use crate::config::{HintConfig, HintNameMatching};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JoinStrategy {
    #[serde(rename = "broadcast")]
    Broadcast,
    #[serde(rename = "merge")]
    ShuffleMerge,
    #[serde(rename = "shuffle_hash")]
    ShuffleHash,
    #[serde(rename = "shuffle_replicate_nl")]
    ShuffleReplicateNl,
    /// Set by adaptive execution to forbid a broadcast hash join.
    /// Has no aliases, so users cannot name it in a hint.
    #[serde(rename = "no_broadcast_hash")]
    NoBroadcastHash,
}

impl JoinStrategy {
    pub const ALL: [JoinStrategy; 5] = [
        JoinStrategy::Broadcast,
        JoinStrategy::ShuffleMerge,
        JoinStrategy::ShuffleHash,
        JoinStrategy::ShuffleReplicateNl,
        JoinStrategy::NoBroadcastHash,
    ];

    /// Name shown in plan output.
    pub fn display_name(self) -> &'static str {
        match self {
            JoinStrategy::Broadcast => "broadcast",
            JoinStrategy::ShuffleMerge => "merge",
            JoinStrategy::ShuffleHash => "shuffle_hash",
            JoinStrategy::ShuffleReplicateNl => "shuffle_replicate_nl",
            JoinStrategy::NoBroadcastHash => "no_broadcast_hash",
        }
    }

    /// Hint names that resolve to this strategy.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            JoinStrategy::Broadcast => &["BROADCAST", "BROADCASTJOIN", "MAPJOIN"],
            JoinStrategy::ShuffleMerge => &["SHUFFLE_MERGE", "MERGE", "MERGEJOIN"],
            JoinStrategy::ShuffleHash => &["SHUFFLE_HASH"],
            JoinStrategy::ShuffleReplicateNl => &["SHUFFLE_REPLICATE_NL"],
            JoinStrategy::NoBroadcastHash => &[],
        }
    }

    /// Rank in the global hint priority order, higher wins:
    /// broadcast > merge > shuffle_hash > shuffle_replicate_nl.
    ///
    /// `NoBroadcastHash` is a restriction rather than a request and is unranked.
    pub fn priority(self) -> Option<u8> {
        match self {
            JoinStrategy::Broadcast => Some(4),
            JoinStrategy::ShuffleMerge => Some(3),
            JoinStrategy::ShuffleHash => Some(2),
            JoinStrategy::ShuffleReplicateNl => Some(1),
            JoinStrategy::NoBroadcastHash => None,
        }
    }
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

lazy_static::lazy_static! {
    static ref STRATEGY_ALIASES: HashMap<&'static str, JoinStrategy> = {
        let mut m = HashMap::new();
        for strategy in JoinStrategy::ALL {
            for alias in strategy.aliases() {
                m.insert(*alias, strategy);
            }
        }
        m
    };
}

/// Resolves hint names to join strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrategyCatalog {
    name_matching: HintNameMatching,
}

impl StrategyCatalog {
    pub fn new(name_matching: HintNameMatching) -> Self {
        StrategyCatalog { name_matching }
    }

    pub fn from_config(config: &HintConfig) -> Self {
        Self::new(config.name_matching)
    }

    pub fn name_matching(&self) -> HintNameMatching {
        self.name_matching
    }

    /// Look up `name` among the strategy aliases. `None` means the hint is
    /// not a join strategy hint.
    pub fn resolve(&self, name: &str) -> Option<JoinStrategy> {
        let key: Cow<'_, str> = match self.name_matching {
            HintNameMatching::Uppercase => Cow::Owned(name.to_ascii_uppercase()),
            HintNameMatching::Exact => Cow::Borrowed(name),
        };
        STRATEGY_ALIASES.get(key.as_ref()).copied()
    }
}
