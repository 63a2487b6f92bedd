use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Pass {
    ResolveJoinStrategyHints,
    RemoveAllHints,
    HintResolutionCheck,
}

impl Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::ResolveJoinStrategyHints => write!(f, "ResolveJoinStrategyHints"),
            Pass::RemoveAllHints => write!(f, "RemoveAllHints"),
            Pass::HintResolutionCheck => write!(f, "HintResolutionCheck"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyzerError {
    #[error(" {pass}: Hint `{name}` is still unresolved after analysis.")]
    UnresolvedHint { pass: Pass, name: String },
}
