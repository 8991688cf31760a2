//! Form Discovery
//!
//! Owns the registry of interceptors, one per live matching form. `scan`
//! reconciles the registry with the document; `run` keeps it reconciled as
//! the page mutates (per-frame debounced rescans plus an optional bounded
//! polling loop).


use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::{mpsc, Notify};
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::constants::FRAME_INTERVAL_MS;
use super::context::AgentContext;
use super::host::{FormHost, FormId};
use super::interceptor::FormInterceptor;

/// Document-change notification fed to `run`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentChange {
    NodesAdded,
    NodesRemoved,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub attached: Vec<FormId>,
    pub pruned: Vec<FormId>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty() && self.pruned.is_empty()
    }
}

pub struct FormDiscovery {
    ctx: Rc<AgentContext>,
    registry: RefCell<BTreeMap<FormId, Rc<FormInterceptor>>>,
    stopped: Cell<bool>,
    stop: Notify,
}

impl FormDiscovery {
    pub fn new(ctx: Rc<AgentContext>) -> Self {
        Self {
            ctx,
            registry: RefCell::new(BTreeMap::new()),
            stopped: Cell::new(false),
            stop: Notify::new(),
        }
    }

    /// Prune registrations whose form left the document, then attach to
    /// every unregistered match. Registered forms are left untouched.
    pub fn scan(&self) -> ScanReport {
        let mut report = ScanReport::default();
        if self.stopped.get() {
            return report;
        }

        let forms = self.ctx.document.query_forms(&self.ctx.config.selector);
        let live: HashSet<FormId> = forms
            .iter()
            .filter(|form| form.is_connected())
            .map(|form| form.id())
            .collect();

        let mut registry = self.registry.borrow_mut();

        let stale: Vec<FormId> = registry
            .iter()
            .filter(|(id, interceptor)| !live.contains(id) || !interceptor.form().is_connected())
            .map(|(id, _)| *id)
            .collect();
        for id in stale {
            if let Some(interceptor) = registry.remove(&id) {
                interceptor.detach();
                report.pruned.push(id);
            }
        }

        for form in forms {
            let id = form.id();
            if !live.contains(&id) || registry.contains_key(&id) {
                continue;
            }
            registry.insert(id, FormInterceptor::attach(form, self.ctx.clone()));
            report.attached.push(id);
        }
        drop(registry);

        if !report.is_empty() {
            log::debug!(
                "Scan: attached {:?}, pruned {:?}, {} registered",
                report.attached,
                report.pruned,
                self.len()
            );
        }
        report
    }

    /// Reconcile on document changes until `destroy`, or until there is
    /// nothing left to watch (channel closed and polling window over).
    pub async fn run(&self, mut changes: mpsc::UnboundedReceiver<DocumentChange>) {
        let config = &self.ctx.config;
        let started = Instant::now();
        let poll_deadline = started + Duration::from_millis(config.discovery_timeout_ms);
        let mut poller = config.discovery_interval_ms.map(|ms| {
            let period = Duration::from_millis(ms.max(1));
            let mut interval = time::interval_at(started + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        let mut observing = config.observe_mutations;
        let mut rescan_at: Option<Instant> = None;

        loop {
            if self.stopped.get() {
                break;
            }
            if !observing && poller.is_none() && rescan_at.is_none() {
                log::debug!("Discovery idle, nothing left to watch");
                break;
            }

            tokio::select! {
                _ = self.stop.notified() => break,

                change = changes.recv(), if observing => match change {
                    Some(DocumentChange::NodesAdded) => {
                        if rescan_at.is_none() {
                            rescan_at = Some(Instant::now() + Duration::from_millis(FRAME_INTERVAL_MS));
                        }
                    }
                    // removals are picked up by the next scan
                    Some(DocumentChange::NodesRemoved) => {}
                    None => observing = false,
                },

                _ = sleep_until_some(rescan_at) => {
                    rescan_at = None;
                    self.scan();
                }

                _ = next_tick(&mut poller) => {
                    self.scan();
                }

                _ = time::sleep_until(poll_deadline), if poller.is_some() => {
                    log::debug!("Discovery polling stopped after {}ms", config.discovery_timeout_ms);
                    poller = None;
                }
            }
        }
    }

    /// Detach every interceptor, stop `run`, clear the registry. Idempotent.
    pub fn destroy(&self) {
        if self.stopped.replace(true) {
            return;
        }
        self.stop.notify_one();

        let registry = std::mem::take(&mut *self.registry.borrow_mut());
        for interceptor in registry.values() {
            interceptor.detach();
        }
        self.ctx.page.dismiss();
        log::info!("PitchGuard destroyed, {} form(s) released", registry.len());
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.get()
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().is_empty()
    }

    pub fn interceptor(&self, id: FormId) -> Option<Rc<FormInterceptor>> {
        self.registry.borrow().get(&id).cloned()
    }

    pub fn form_ids(&self) -> Vec<FormId> {
        self.registry.borrow().keys().copied().collect()
    }
}

async fn sleep_until_some(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

async fn next_tick(poller: &mut Option<Interval>) {
    match poller {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
