//! Async driver for the browser reducer.
//!
//! A single task owns the [`BrowserState`]. UI actions and network
//! completions are funneled through it one at a time, so completions can
//! never interleave with a transition. Requests run on their own tasks and
//! report back as actions; the reducer's sequence gating decides whether
//! their results are shown.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};
use tracing::debug;

use reqwest::Url;

use super::client::{CatalogApi, HttpCatalogApi};
use super::debounce::Debouncer;
use super::state::{BrowserState, RequestSeq, SearchMode};
use super::update::{Action, Command};
use crate::catalog::SearchCriteria;
use crate::config::{Config, ConfigError};

/// Handle to a running browser session.
pub struct BrowserHandle {
    actions: mpsc::UnboundedSender<Action>,
    state: watch::Receiver<BrowserState>,
    task: JoinHandle<()>,
}

impl BrowserHandle {
    /// Queue an action. Returns false if the session has stopped.
    pub fn dispatch(&self, action: Action) -> bool {
        self.actions.send(action).is_ok()
    }

    /// Receiver notified after every transition.
    pub fn subscribe(&self) -> watch::Receiver<BrowserState> {
        self.state.clone()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> BrowserState {
        self.state.borrow().clone()
    }

    /// Stop the session after it has drained queued actions.
    pub async fn shutdown(self) {
        drop(self.actions);
        let _ = self.task.await;
    }
}

enum Event {
    Action(Action),
    DebounceElapsed,
    Closed,
}

/// The task behind a [`BrowserHandle`].
pub struct BrowserSession {
    api: Arc<dyn CatalogApi>,
    actions: mpsc::UnboundedReceiver<Action>,
    completions_tx: mpsc::UnboundedSender<Action>,
    completions: mpsc::UnboundedReceiver<Action>,
    debouncer: Debouncer<(RequestSeq, SearchCriteria)>,
    publish: watch::Sender<BrowserState>,
}

impl BrowserSession {
    /// Spawn a session on the current runtime.
    pub fn spawn(api: Arc<dyn CatalogApi>, state: BrowserState, debounce: Duration) -> BrowserHandle {
        let (actions_tx, actions) = mpsc::unbounded_channel();
        let (completions_tx, completions) = mpsc::unbounded_channel();
        let (publish, state_rx) = watch::channel(state.clone());

        let session = Self {
            api,
            actions,
            completions_tx,
            completions,
            debouncer: Debouncer::new(debounce),
            publish,
        };
        let task = tokio::spawn(session.run(state));

        BrowserHandle {
            actions: actions_tx,
            state: state_rx,
            task,
        }
    }

    /// Spawn a session talking to the service described by `config`.
    pub fn spawn_from_config(config: &Config, mode: SearchMode) -> Result<BrowserHandle, ConfigError> {
        let api = HttpCatalogApi::new(config.browser.api_base_url.clone())
            .map_err(|e| ConfigError::ValidationError(format!("browser client: {}", e)))?;
        let asset_base = Url::parse(&config.asset_base_url()).map_err(|e| {
            ConfigError::ValidationError(format!("artwork base URL: {}", e))
        })?;

        Ok(Self::spawn(
            Arc::new(api),
            BrowserState::new(mode, asset_base),
            Duration::from_millis(config.browser.debounce_ms),
        ))
    }

    async fn run(mut self, mut state: BrowserState) {
        debug!(
            "Browser session started (mode: {:?}, debounce: {:?})",
            state.mode(),
            self.debouncer.window()
        );

        loop {
            let deadline = self.debouncer.deadline();
            let event = tokio::select! {
                received = self.actions.recv() => match received {
                    Some(action) => Event::Action(action),
                    None => Event::Closed,
                },
                Some(done) = self.completions.recv() => Event::Action(done),
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    Event::DebounceElapsed
                }
            };

            match event {
                Event::Action(action) => {
                    let (next, command) = state.apply(action);
                    state = next;
                    if let Some(command) = command {
                        self.execute(command);
                    }
                    self.publish.send_replace(state.clone());
                }
                Event::DebounceElapsed => {
                    if let Some((seq, criteria)) = self.debouncer.take_due(Instant::now()) {
                        if seq == state.latest_seq() {
                            self.spawn_search(seq, criteria);
                        } else {
                            debug!("Dropping debounced search {} (latest {})", seq, state.latest_seq());
                        }
                    }
                }
                Event::Closed => break,
            }
        }

        debug!("Browser session stopped");
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Fetch { seq, criteria } => self.spawn_search(seq, criteria),
            Command::DebouncedFetch { seq, criteria } => {
                self.debouncer.push((seq, criteria), Instant::now());
            }
            Command::FetchAll { seq } => {
                let api = Arc::clone(&self.api);
                let done = self.completions_tx.clone();
                tokio::spawn(async move {
                    let outcome = api.search(&SearchCriteria::default()).await;
                    let _ = done.send(Action::DatasetLoaded { seq, outcome });
                });
            }
        }
    }

    fn spawn_search(&self, seq: RequestSeq, criteria: SearchCriteria) {
        debug!("Issuing search {}", seq);
        let api = Arc::clone(&self.api);
        let done = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = api.search(&criteria).await;
            let _ = done.send(Action::SearchCompleted { seq, outcome });
        });
    }
}
