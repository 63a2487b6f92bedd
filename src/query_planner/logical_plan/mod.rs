use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

use crate::query_planner::{
    hints::{errors::format_hint, JoinHint},
    logical_expr::{ColumnAlias, LogicalExpr},
    transformed::Transformed,
};

mod hint;

pub use hint::{ResolvedHint, UnresolvedHint};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub enum LogicalPlan {
    Empty,

    Scan(Scan),

    Filter(Filter),

    Projection(Projection),

    Limit(Limit),

    Join(Join),

    /// Hint straight from the parser; must not survive analysis.
    UnresolvedHint(UnresolvedHint),

    /// Hint matched to a join strategy, waiting to be pulled into a join.
    ResolvedHint(ResolvedHint),
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Scan {
    pub table_alias: Option<String>,
    pub table_name: Option<String>,
    /// Output columns of the scanned relation
    #[serde(default)]
    pub columns: Vec<String>,
}

impl Scan {
    /// Name parts a hint parameter is matched against.
    ///
    /// An alias hides the table name; `db.orders` splits into `["db", "orders"]`.
    pub fn relation_name_parts(&self) -> Vec<&str> {
        match (&self.table_alias, &self.table_name) {
            (Some(alias), _) => vec![alias.as_str()],
            (None, Some(name)) => name.split('.').collect(),
            (None, None) => vec![],
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Filter {
    #[serde(with = "crate::utils::serde_arc")]
    pub input: Arc<LogicalPlan>,
    pub predicate: LogicalExpr,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Projection {
    #[serde(with = "crate::utils::serde_arc")]
    pub input: Arc<LogicalPlan>,
    pub items: Vec<ProjectionItem>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ProjectionItem {
    pub expression: LogicalExpr,
    pub col_alias: Option<ColumnAlias>,
}

impl ProjectionItem {
    pub fn output_name(&self) -> String {
        match &self.col_alias {
            Some(alias) => alias.0.clone(),
            None => self.expression.to_string(),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Limit {
    #[serde(with = "crate::utils::serde_arc")]
    pub input: Arc<LogicalPlan>,
    pub count: i64,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Join {
    #[serde(with = "crate::utils::serde_arc")]
    pub left: Arc<LogicalPlan>,
    #[serde(with = "crate::utils::serde_arc")]
    pub right: Arc<LogicalPlan>,
    pub join_type: JoinType,
    pub condition: Option<LogicalExpr>,
    /// Strategy hints pulled down onto each input by the optimizer
    pub hint: JoinHint,
}

#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize, Default)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
    Full,
}

impl Filter {
    pub fn rebuild_or_clone(
        &self,
        input_tf: Transformed<Arc<LogicalPlan>>,
        old_plan: Arc<LogicalPlan>,
    ) -> Transformed<Arc<LogicalPlan>> {
        match input_tf {
            Transformed::Yes(new_input) => {
                let new_node = LogicalPlan::Filter(Filter {
                    input: new_input,
                    predicate: self.predicate.clone(),
                });
                Transformed::Yes(Arc::new(new_node))
            }
            Transformed::No(_) => Transformed::No(old_plan),
        }
    }
}

impl Projection {
    pub fn rebuild_or_clone(
        &self,
        input_tf: Transformed<Arc<LogicalPlan>>,
        old_plan: Arc<LogicalPlan>,
    ) -> Transformed<Arc<LogicalPlan>> {
        match input_tf {
            Transformed::Yes(new_input) => {
                let new_node = LogicalPlan::Projection(Projection {
                    input: new_input,
                    items: self.items.clone(),
                });
                Transformed::Yes(Arc::new(new_node))
            }
            Transformed::No(_) => Transformed::No(old_plan),
        }
    }
}

impl Limit {
    pub fn rebuild_or_clone(
        &self,
        input_tf: Transformed<Arc<LogicalPlan>>,
        old_plan: Arc<LogicalPlan>,
    ) -> Transformed<Arc<LogicalPlan>> {
        match input_tf {
            Transformed::Yes(new_input) => {
                let new_node = LogicalPlan::Limit(Limit {
                    input: new_input,
                    count: self.count,
                });
                Transformed::Yes(Arc::new(new_node))
            }
            Transformed::No(_) => Transformed::No(old_plan),
        }
    }
}

impl Join {
    pub fn rebuild_or_clone(
        &self,
        left_tf: Transformed<Arc<LogicalPlan>>,
        right_tf: Transformed<Arc<LogicalPlan>>,
        old_plan: Arc<LogicalPlan>,
    ) -> Transformed<Arc<LogicalPlan>> {
        if left_tf.is_yes() || right_tf.is_yes() {
            let new_join = LogicalPlan::Join(Join {
                left: left_tf.get_plan(),
                right: right_tf.get_plan(),
                join_type: self.join_type,
                condition: self.condition.clone(),
                hint: self.hint,
            });
            Transformed::Yes(Arc::new(new_join))
        } else {
            Transformed::No(old_plan)
        }
    }
}

impl fmt::Display for LogicalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_tree(f, "", true, true)
    }
}

impl LogicalPlan {
    /// Direct inputs of this node, left to right.
    pub fn children(&self) -> Vec<&Arc<LogicalPlan>> {
        match self {
            LogicalPlan::Empty | LogicalPlan::Scan(_) => vec![],
            LogicalPlan::Filter(filter) => vec![&filter.input],
            LogicalPlan::Projection(proj) => vec![&proj.input],
            LogicalPlan::Limit(limit) => vec![&limit.input],
            LogicalPlan::Join(join) => vec![&join.left, &join.right],
            LogicalPlan::UnresolvedHint(hint) => vec![&hint.input],
            LogicalPlan::ResolvedHint(hint) => vec![&hint.input],
        }
    }

    /// Output column names. Hint wrappers report their input's output.
    pub fn output(&self) -> Vec<String> {
        match self {
            LogicalPlan::Empty => vec![],
            LogicalPlan::Scan(scan) => scan.columns.clone(),
            LogicalPlan::Filter(filter) => filter.input.output(),
            LogicalPlan::Projection(proj) => {
                proj.items.iter().map(ProjectionItem::output_name).collect()
            }
            LogicalPlan::Limit(limit) => limit.input.output(),
            LogicalPlan::Join(join) => {
                let mut columns = join.left.output();
                columns.extend(join.right.output());
                columns
            }
            LogicalPlan::UnresolvedHint(hint) => hint.input.output(),
            LogicalPlan::ResolvedHint(hint) => hint.input.output(),
        }
    }

    /// Form used for plan equality checks (caching, deduplication).
    ///
    /// Resolved hints are erased and join hints reset, so plans that differ
    /// only in hint metadata canonicalize to the same tree.
    pub fn canonicalize(&self) -> LogicalPlan {
        match self {
            LogicalPlan::Empty => LogicalPlan::Empty,
            LogicalPlan::Scan(scan) => LogicalPlan::Scan(scan.clone()),
            LogicalPlan::Filter(filter) => LogicalPlan::Filter(Filter {
                input: Arc::new(filter.input.canonicalize()),
                predicate: filter.predicate.clone(),
            }),
            LogicalPlan::Projection(proj) => LogicalPlan::Projection(Projection {
                input: Arc::new(proj.input.canonicalize()),
                items: proj.items.clone(),
            }),
            LogicalPlan::Limit(limit) => LogicalPlan::Limit(Limit {
                input: Arc::new(limit.input.canonicalize()),
                count: limit.count,
            }),
            LogicalPlan::Join(join) => LogicalPlan::Join(Join {
                left: Arc::new(join.left.canonicalize()),
                right: Arc::new(join.right.canonicalize()),
                join_type: join.join_type,
                condition: join.condition.clone(),
                hint: JoinHint::NONE,
            }),
            LogicalPlan::UnresolvedHint(hint) => LogicalPlan::UnresolvedHint(UnresolvedHint {
                name: hint.name.clone(),
                parameters: hint.parameters.clone(),
                input: Arc::new(hint.input.canonicalize()),
            }),
            LogicalPlan::ResolvedHint(hint) => hint.input.canonicalize(),
        }
    }

    /// First unresolved hint found in pre-order, if any.
    pub fn find_unresolved_hint(&self) -> Option<&UnresolvedHint> {
        match self {
            LogicalPlan::UnresolvedHint(hint) => Some(hint),
            other => other
                .children()
                .into_iter()
                .find_map(|child| child.find_unresolved_hint()),
        }
    }

    /// Analysis is complete only when this is false.
    pub fn contains_unresolved_hint(&self) -> bool {
        self.find_unresolved_hint().is_some()
    }

    fn fmt_with_tree(
        &self,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
        is_root: bool,
    ) -> fmt::Result {
        let (branch, next_prefix) = if is_last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };

        if is_root {
            writeln!(f, "\n{}", self.variant_name())?;
        } else {
            writeln!(f, "{}{}{}", prefix, branch, self.variant_name())?;
        }

        let children = self.children();
        let n = children.len();
        for (i, child) in children.into_iter().enumerate() {
            child.fmt_with_tree(f, &format!("{}{}", prefix, next_prefix), i + 1 == n, false)?;
        }
        Ok(())
    }

    pub(crate) fn variant_name(&self) -> String {
        match self {
            LogicalPlan::Empty => "".to_string(),
            LogicalPlan::Scan(scan) => format!("Scan({})", scan.relation_name_parts().join(".")),
            LogicalPlan::Filter(filter) => format!("Filter({})", filter.predicate),
            LogicalPlan::Projection(_) => "Projection".to_string(),
            LogicalPlan::Limit(limit) => format!("Limit({})", limit.count),
            LogicalPlan::Join(join) if join.hint.is_none() => format!("Join({:?})", join.join_type),
            LogicalPlan::Join(join) => format!("Join({:?}, {})", join.join_type, join.hint),
            LogicalPlan::UnresolvedHint(hint) => {
                format!("UnresolvedHint({})", format_hint(&hint.name, &hint.parameters))
            }
            LogicalPlan::ResolvedHint(hint) => format!("ResolvedHint {}", hint.info),
        }
    }
}
