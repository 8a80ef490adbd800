//! Run orchestration: owns the workbench state, the deferred-run scheduler
//! and the markup surface, and dispatches each run to the right engine.

pub mod scheduler;
mod state;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::highlight;
use crate::language::Language;
use crate::log::{LogEntry, LogSequence};
use crate::passthrough::{MemoryHost, PassthroughExecutor, SurfaceHost, SurfaceId};
use crate::simulate;

pub use scheduler::{CancellationToken, Fired, Scheduler, TaskHandle};
pub use state::{SourceDocument, State};

/// Result of one completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Textual language: the simulated trace.
    Log(LogSequence),
    /// Markup: the freshly mounted surface.
    Surface(SurfaceId),
    /// The run was cancelled before it fired.
    Cancelled,
}

pub struct Session<H = MemoryHost> {
    state: State,
    config: Config,
    scheduler: Scheduler<SourceDocument>,
    passthrough: PassthroughExecutor<H>,
}

impl Session<MemoryHost> {
    pub fn with_memory_host(config: Config) -> Self {
        Self::new(config, MemoryHost::new())
    }
}

impl<H: SurfaceHost> Session<H> {
    pub fn new(config: Config, host: H) -> Self {
        Self {
            state: State::new(config.language),
            config,
            scheduler: Scheduler::new(),
            passthrough: PassthroughExecutor::new(host),
        }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn passthrough(&self) -> &PassthroughExecutor<H> {
        &self.passthrough
    }

    fn transition(&mut self, f: impl FnOnce(State) -> State) {
        let state = std::mem::take(&mut self.state);
        self.state = f(state);
    }

    /// Schedule a run of the current source after the configured delay.
    ///
    /// Returns `None` while a previous run is still pending.
    pub fn request_run(&mut self) -> Option<TaskHandle> {
        if self.state.running {
            debug!("run already pending, ignoring request");
            return None;
        }
        self.transition(State::begin_run);
        let snapshot = self.state.snapshot();
        info!(language = %snapshot.language, bytes = snapshot.text.len(), "run requested");
        Some(self.scheduler.schedule(self.config.run_delay(), snapshot))
    }

    /// Fire every pending run, returning the outcome of the last one.
    pub fn run_pending(&mut self) -> Result<Option<RunOutcome>> {
        let mut outcome = None;
        while let Some(fired) = self.scheduler.next() {
            outcome = Some(match fired {
                Fired::Due(document) => self.execute(&document)?,
                Fired::Cancelled(_) => {
                    self.transition(State::abort_run);
                    RunOutcome::Cancelled
                }
            });
        }
        Ok(outcome)
    }

    /// Request a run and wait for it to complete.
    pub fn run(&mut self) -> Result<Option<RunOutcome>> {
        self.request_run();
        self.run_pending()
    }

    fn execute(&mut self, document: &SourceDocument) -> Result<RunOutcome> {
        match simulate::extractor_for(document.language) {
            Some(extractor) => {
                let log = simulate::run_extractor(extractor, &document.text);
                self.transition(|s| s.finish_run(log.clone()));
                Ok(RunOutcome::Log(log))
            }
            None => match self.passthrough.render(&document.text) {
                Ok(id) => {
                    self.transition(|s| s.finish_run(LogSequence::new()));
                    Ok(RunOutcome::Surface(id))
                }
                Err(e) => {
                    warn!("markup render failed: {}", e);
                    let mut log = LogSequence::new();
                    log.push(LogEntry::error(format!("Error: {}", e)));
                    self.transition(|s| s.finish_run(log.clone()));
                    Ok(RunOutcome::Log(log))
                }
            },
        }
    }

    /// Drop runs scheduled against a source that is about to be replaced.
    fn drop_pending_runs(&mut self) {
        if self.scheduler.cancel_all() > 0 {
            self.transition(State::abort_run);
        }
    }

    fn discard_surface(&mut self) {
        if let Err(e) = self.passthrough.discard() {
            warn!("failed to tear down surface: {}", e);
        }
    }

    /// Empty the output area. Idempotent.
    pub fn clear(&mut self) {
        self.drop_pending_runs();
        self.discard_surface();
        self.transition(State::clear);
    }

    pub fn switch_language(&mut self, language: Language) {
        info!(%language, "switching language");
        self.drop_pending_runs();
        self.discard_surface();
        self.transition(|s| s.switch_language(language));
    }

    pub fn edit(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.transition(|s| s.edit(text));
    }

    /// Insert the configured indent over `[start, end)`; returns the new caret.
    pub fn insert_indent(&mut self, start: usize, end: usize) -> usize {
        let indent = self.config.indent.clone();
        self.transition(|s| s.insert_indent(start, end, &indent));
        self.state.cursor
    }

    pub fn highlight(&self) -> String {
        highlight::highlight(&self.state.source, self.state.language)
    }
}
