//! PitchGuard Embed Agent
//!
//! Client side of PitchGuard: discovers forms on a page, publishes live
//! detection snapshots while the user types, and on submit asks the cloud
//! evaluator for a decision before letting the submission through.
//!
//! The agent is single-threaded. The host binding implements the traits in
//! `logic::host` and `logic::page::Surface`, forwards DOM events to the
//! `Guard`, and drives `Guard::run` on its local executor.

pub mod constants;
pub mod config;
pub mod error;
pub mod logic;


use std::rc::Rc;

use tokio::sync::mpsc;

pub use config::{ConfigError, DebugRules, EmbedConfig};
pub use error::{GuardError, TransportError};
pub use logic::discovery::{DocumentChange, FormDiscovery, ScanReport};
pub use logic::evaluator::{EvaluatorConfig, HttpEvaluator, RemoteEvaluator};
pub use logic::hooks::Hooks;
pub use logic::host::{Document, EventKind, FormHost, FormId, HostError, Phase, SubmitEvent};
pub use logic::interceptor::{AllowReason, ChallengeResume, FormInterceptor, FormState, Outcome};
pub use logic::page::{PageController, Presentation, Surface};

use logic::context::AgentContext;

/// Start protecting the page. Returns `None` (after logging why) when the
/// configuration is unusable; never panics into the host page.
///
/// `evaluator` defaults to an `HttpEvaluator` for `config.evaluate_url()`.
pub fn init(
    config: EmbedConfig,
    hooks: Hooks,
    document: Rc<dyn Document>,
    surface: Rc<dyn Surface>,
    evaluator: Option<Rc<dyn RemoteEvaluator>>,
) -> Option<Guard> {
    if let Err(err) = config.validate() {
        log::error!("PitchGuard not started: {}", err);
        return None;
    }

    let evaluator = match evaluator {
        Some(evaluator) => evaluator,
        None => match HttpEvaluator::new(EvaluatorConfig::from(&config)) {
            Ok(client) => Rc::new(client),
            Err(err) => {
                log::error!("PitchGuard not started: {}", err);
                return None;
            }
        },
    };

    let page = Rc::new(PageController::new(surface));
    page.ensure_styles();

    let ctx = Rc::new(AgentContext::new(config, hooks, page, document, evaluator));
    let discovery = Rc::new(FormDiscovery::new(ctx.clone()));
    let report = discovery.scan();

    log::info!(
        "PitchGuard v{} active on {} form(s){}",
        constants::AGENT_VERSION,
        report.attached.len(),
        if ctx.config.preview_mode { " (preview mode)" } else { "" }
    );

    Some(Guard { ctx, discovery })
}

/// Handle to one running agent
pub struct Guard {
    ctx: Rc<AgentContext>,
    discovery: Rc<FormDiscovery>,
}

impl Guard {
    pub fn config(&self) -> &EmbedConfig {
        &self.ctx.config
    }

    pub fn discovery(&self) -> &Rc<FormDiscovery> {
        &self.discovery
    }

    /// Keep the registry in sync with the document until `destroy`
    pub async fn run(&self, changes: mpsc::UnboundedReceiver<DocumentChange>) {
        self.discovery.run(changes).await;
    }

    /// Forward an input/change event. `false` if the form is not registered.
    pub fn handle_input(&self, form: FormId) -> bool {
        match self.discovery.interceptor(form) {
            Some(interceptor) => {
                interceptor.handle_input();
                true
            }
            None => false,
        }
    }

    pub fn handle_paste(&self, form: FormId) -> bool {
        match self.discovery.interceptor(form) {
            Some(interceptor) => {
                interceptor.handle_paste();
                true
            }
            None => false,
        }
    }

    /// Forward a submit event. `None` if the form is not registered, in
    /// which case the event is left alone.
    pub async fn handle_submit(&self, form: FormId, event: &dyn SubmitEvent) -> Option<Outcome> {
        let interceptor = self.discovery.interceptor(form)?;
        Some(interceptor.handle_submit(event).await)
    }

    pub fn destroy(&self) {
        self.discovery.destroy();
    }
}
