//! Agent Context
//!
//! Everything one `init` call shares between its interceptors.

use std::rc::Rc;

use pitchguard_core::SignalExtractor;

use crate::config::EmbedConfig;
use super::evaluator::RemoteEvaluator;
use super::hooks::Hooks;
use super::host::Document;
use super::page::PageController;

pub struct AgentContext {
    pub config: EmbedConfig,
    pub extractor: SignalExtractor,
    pub hooks: Hooks,
    pub page: Rc<PageController>,
    pub document: Rc<dyn Document>,
    pub evaluator: Rc<dyn RemoteEvaluator>,
}

impl AgentContext {
    pub fn new(
        config: EmbedConfig,
        hooks: Hooks,
        page: Rc<PageController>,
        document: Rc<dyn Document>,
        evaluator: Rc<dyn RemoteEvaluator>,
    ) -> Self {
        let extractor = SignalExtractor::new(config.rule_set());
        Self {
            config,
            extractor,
            hooks,
            page,
            document,
            evaluator,
        }
    }
}
