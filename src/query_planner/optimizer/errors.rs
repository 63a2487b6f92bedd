use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Pass {
    EliminateResolvedHints,
}

impl Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::EliminateResolvedHints => write!(f, "EliminateResolvedHints"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OptimizerError {
    #[error(" {pass}: Unresolved hint `{name}` reached the optimizer.")]
    UnresolvedHint { pass: Pass, name: String },
}
