//! Hint error handling.
//!
//! Hint problems never fail planning on their own. They are reported through a
//! [`HintErrorHandler`] chosen by the host, which decides whether to ignore,
//! log, collect, or escalate them.

use crate::query_planner::{
    hints::{errors::HintDiagnostic, hint_info::HintInfo},
    logical_expr::LogicalExpr,
};

pub trait HintErrorHandler {
    /// A hint name matched no known strategy alias.
    fn hint_not_recognized(&mut self, name: &str, parameters: &[LogicalExpr]);

    /// A hint named relations that are not in scope under it.
    fn hint_relations_not_found(
        &mut self,
        name: &str,
        parameters: &[LogicalExpr],
        invalid_relations: &[String],
    );

    /// A resolved hint was never attached to a join.
    fn join_not_found_for_join_hint(&mut self, info: &HintInfo);

    /// A conflicting hint was discarded while merging.
    fn hint_overridden(&mut self, info: &HintInfo);
}

/// Ignores every diagnostic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHintErrorHandler;

impl HintErrorHandler for NoopHintErrorHandler {
    fn hint_not_recognized(&mut self, _name: &str, _parameters: &[LogicalExpr]) {}

    fn hint_relations_not_found(
        &mut self,
        _name: &str,
        _parameters: &[LogicalExpr],
        _invalid_relations: &[String],
    ) {
    }

    fn join_not_found_for_join_hint(&mut self, _info: &HintInfo) {}

    fn hint_overridden(&mut self, _info: &HintInfo) {}
}

/// Logs every diagnostic as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHintErrorHandler;

impl HintErrorHandler for LoggingHintErrorHandler {
    fn hint_not_recognized(&mut self, name: &str, parameters: &[LogicalExpr]) {
        log::warn!(
            "{}",
            HintDiagnostic::UnrecognizedHint {
                name: name.to_string(),
                parameters: parameters.to_vec(),
            }
        );
    }

    fn hint_relations_not_found(
        &mut self,
        name: &str,
        parameters: &[LogicalExpr],
        invalid_relations: &[String],
    ) {
        log::warn!(
            "{}",
            HintDiagnostic::RelationsNotFound {
                name: name.to_string(),
                parameters: parameters.to_vec(),
                invalid_relations: invalid_relations.to_vec(),
            }
        );
    }

    fn join_not_found_for_join_hint(&mut self, info: &HintInfo) {
        log::warn!("{}", HintDiagnostic::JoinNotFoundForHint { info: *info });
    }

    fn hint_overridden(&mut self, info: &HintInfo) {
        log::warn!("{}", HintDiagnostic::HintOverridden { info: *info });
    }
}

/// Records diagnostics in the order they were reported.
#[derive(Debug, Clone, Default)]
pub struct CollectingHintErrorHandler {
    diagnostics: Vec<HintDiagnostic>,
}

impl CollectingHintErrorHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[HintDiagnostic] {
        &self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<HintDiagnostic> {
        self.diagnostics
    }

    /// `Err` with the first recorded diagnostic, for hosts that treat hint
    /// problems as fatal.
    pub fn into_result(self) -> Result<(), HintDiagnostic> {
        match self.diagnostics.into_iter().next() {
            Some(first) => Err(first),
            None => Ok(()),
        }
    }
}

impl HintErrorHandler for CollectingHintErrorHandler {
    fn hint_not_recognized(&mut self, name: &str, parameters: &[LogicalExpr]) {
        self.diagnostics.push(HintDiagnostic::UnrecognizedHint {
            name: name.to_string(),
            parameters: parameters.to_vec(),
        });
    }

    fn hint_relations_not_found(
        &mut self,
        name: &str,
        parameters: &[LogicalExpr],
        invalid_relations: &[String],
    ) {
        self.diagnostics.push(HintDiagnostic::RelationsNotFound {
            name: name.to_string(),
            parameters: parameters.to_vec(),
            invalid_relations: invalid_relations.to_vec(),
        });
    }

    fn join_not_found_for_join_hint(&mut self, info: &HintInfo) {
        self.diagnostics
            .push(HintDiagnostic::JoinNotFoundForHint { info: *info });
    }

    fn hint_overridden(&mut self, info: &HintInfo) {
        self.diagnostics.push(HintDiagnostic::HintOverridden { info: *info });
    }
}
