//! Hint planning context.
//!
//! [`PlanCtx`] is threaded through every hint pass of one planning run. It
//! carries:
//! - The hint configuration
//! - The strategy catalog built from that configuration
//! - The host's [`HintErrorHandler`] that receives diagnostics

use crate::{
    config::HintConfig,
    query_planner::hints::{HintErrorHandler, StrategyCatalog},
};

pub struct PlanCtx<'a> {
    config: HintConfig,
    catalog: StrategyCatalog,
    hint_error_handler: &'a mut dyn HintErrorHandler,
}

impl<'a> PlanCtx<'a> {
    pub fn new(config: &HintConfig, hint_error_handler: &'a mut dyn HintErrorHandler) -> Self {
        PlanCtx {
            config: config.clone(),
            catalog: StrategyCatalog::from_config(config),
            hint_error_handler,
        }
    }

    pub fn config(&self) -> &HintConfig {
        &self.config
    }

    pub fn catalog(&self) -> &StrategyCatalog {
        &self.catalog
    }

    pub fn hint_error_handler(&mut self) -> &mut dyn HintErrorHandler {
        &mut *self.hint_error_handler
    }

    /// Key used to compare relation names, honoring
    /// `HintConfig::case_sensitive_relations`.
    pub fn relation_key(&self, name: &str) -> String {
        if self.config.case_sensitive_relations {
            name.to_string()
        } else {
            name.to_lowercase()
        }
    }
}
