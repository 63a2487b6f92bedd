//! Hint diagnostics.
//!
//! None of these stop planning. They are what a [`HintErrorHandler`] is told
//! about, materialized so handlers can log, collect or escalate them.
//!
//! [`HintErrorHandler`]: super::error_handler::HintErrorHandler

use thiserror::Error;

use crate::query_planner::{hints::hint_info::HintInfo, logical_expr::LogicalExpr};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum HintDiagnostic {
    #[error("Unrecognized hint: {}", format_hint(.name, .parameters))]
    UnrecognizedHint {
        name: String,
        parameters: Vec<LogicalExpr>,
    },

    #[error(
        "Could not find relation(s) {} specified in hint '{}'.",
        .invalid_relations.join(", "),
        format_hint(.name, .parameters)
    )]
    RelationsNotFound {
        name: String,
        parameters: Vec<LogicalExpr>,
        invalid_relations: Vec<String>,
    },

    #[error("A join hint {info} is specified but it is not part of a join relation.")]
    JoinNotFoundForHint { info: HintInfo },

    #[error("Hint {info} is overridden by another hint and will not take effect.")]
    HintOverridden { info: HintInfo },
}

/// Render a hint the way it was written: `NAME` or `NAME(p1, p2)`.
pub fn format_hint(name: &str, parameters: &[LogicalExpr]) -> String {
    if parameters.is_empty() {
        name.to_string()
    } else {
        let params: Vec<String> = parameters.iter().map(ToString::to_string).collect();
        format!("{}({})", name, params.join(", "))
    }
}
