//! Debounced, latest-wins selection controller.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::{AbortHandle, JoinHandle, JoinSet};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace, warn};

use webmanager_models::{BlockId, SelectionSummary};

use crate::config::{LoadingDisplay, SelectionConfig};
use crate::error::{Result, SelectionError};
use crate::event::SelectionEvent;
use crate::fetch::{FetchFailure, FetchService};
use crate::state::ControllerState;

/// Capacity of the event broadcast channel.
const EVENT_CAPACITY: usize = 256;

/// Coalesces selections into fetches and publishes the latest result.
///
/// All state lives in a driver task spawned by [`SelectionController::start`].
/// The handle only forwards selections and exposes the published state, so
/// it can be shared by reference across the presentation layer.
pub struct SelectionController<S: FetchService> {
    /// Selection intents for the driver.
    commands: mpsc::UnboundedSender<SelectionSummary>,
    /// Published state.
    state: watch::Receiver<ControllerState<S::Content>>,
    /// Event broadcast sender (kept for subscribing).
    events: broadcast::Sender<SelectionEvent>,
    /// Shutdown signal sender.
    shutdown_tx: watch::Sender<bool>,
    /// Handle to the driver task.
    driver: Option<JoinHandle<()>>,
}

impl<S: FetchService> SelectionController<S> {
    /// Start a controller over `initial`.
    ///
    /// If `initial` is non-empty its first item settles immediately, without
    /// waiting for the debounce window. Must be called from within a Tokio
    /// runtime.
    pub fn start(service: Arc<S>, config: SelectionConfig, initial: Vec<SelectionSummary>) -> Self {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ControllerState::default());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        debug!(
            debounce_ms = config.debounce.as_millis() as u64,
            items = initial.len(),
            "starting selection controller"
        );

        let mut driver = Driver {
            service,
            config,
            state: state_tx,
            events: events.clone(),
            generation: 0,
            pending: None,
            fetches: JoinSet::new(),
            in_flight: None,
        };

        if let Some(first) = initial.into_iter().next() {
            driver.settle(first);
        }

        let handle = tokio::spawn(driver.run(commands_rx, shutdown_rx));

        Self {
            commands: commands_tx,
            state: state_rx,
            events,
            shutdown_tx,
            driver: Some(handle),
        }
    }

    /// Record a new selection intent.
    ///
    /// The selection is fetched once the debounce window passes without a
    /// newer call. Ignored after the controller has stopped.
    pub fn select_item(&self, item: SelectionSummary) {
        let block_id = item.id;
        if self.commands.send(item).is_err() {
            debug!(block_id = %block_id, "controller stopped, ignoring selection");
        }
    }

    /// Snapshot of the published state.
    pub fn current_state(&self) -> ControllerState<S::Content> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state transition.
    pub fn subscribe_state(&self) -> watch::Receiver<ControllerState<S::Content>> {
        self.state.clone()
    }

    /// Subscribe to controller events.
    pub fn subscribe(&self) -> broadcast::Receiver<SelectionEvent> {
        self.events.subscribe()
    }

    /// Check if the driver task is still running.
    pub fn is_running(&self) -> bool {
        self.driver.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the driver and release every timer and fetch task.
    ///
    /// No state transitions happen after this returns; results of fetches
    /// still in flight are dropped.
    pub async fn dispose(mut self) -> Result<()> {
        debug!("disposing selection controller");

        // The driver may already have exited; nothing to signal then
        let _ = self.shutdown_tx.send(true);

        if let Some(handle) = self.driver.take() {
            handle
                .await
                .map_err(|e| SelectionError::Shutdown(format!("driver task panicked: {}", e)))?;
        }

        debug!("selection controller stopped");

        Ok(())
    }
}

impl<S: FetchService> Drop for SelectionController<S> {
    fn drop(&mut self) {
        // Dropped without dispose(): stop the driver, which drops its fetches
        if let Some(handle) = self.driver.take() {
            let _ = self.shutdown_tx.send(true);
            handle.abort();
        }
    }
}

/// Result of one fetch, tagged with the settlement that issued it.
struct Completion<C> {
    generation: u64,
    block_id: BlockId,
    result: std::result::Result<C, FetchFailure>,
}

/// Owns the controller state; runs as a single task.
struct Driver<S: FetchService> {
    service: Arc<S>,
    config: SelectionConfig,
    state: watch::Sender<ControllerState<S::Content>>,
    events: broadcast::Sender<SelectionEvent>,
    /// Number of settlements so far.
    generation: u64,
    /// Selection waiting for its debounce deadline.
    pending: Option<(SelectionSummary, Instant)>,
    fetches: JoinSet<Completion<S::Content>>,
    /// Fetch task of the latest generation.
    in_flight: Option<AbortHandle>,
}

impl<S: FetchService> Driver<S> {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<SelectionSummary>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        loop {
            let deadline = self.pending.as_ref().map(|(_, at)| *at);

            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("selection driver received shutdown signal");
                        break;
                    }
                }
                command = commands.recv() => {
                    match command {
                        Some(item) => self.schedule(item),
                        None => {
                            debug!("selection channel closed");
                            break;
                        }
                    }
                }
                Some(joined) = self.fetches.join_next(), if !self.fetches.is_empty() => {
                    match joined {
                        Ok(completion) => self.apply(completion),
                        Err(e) if e.is_cancelled() => trace!("superseded fetch aborted"),
                        Err(e) => warn!(error = %e, "fetch task failed"),
                    }
                }
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some((item, _)) = self.pending.take() {
                        self.settle(item);
                    }
                }
            }
        }

        self.fetches.shutdown().await;
        debug!("selection driver stopped");
    }

    /// Restart the debounce window for a new selection.
    fn schedule(&mut self, item: SelectionSummary) {
        trace!(block_id = %item.id, "selection received, debounce restarted");
        self.emit(SelectionEvent::Selected { block_id: item.id });
        self.pending = Some((item, Instant::now() + self.config.debounce));
    }

    /// Settle a selection: bump the generation and issue its fetch.
    fn settle(&mut self, item: SelectionSummary) {
        self.generation += 1;
        let generation = self.generation;
        let block_id = item.id;

        if self.config.abort_superseded {
            if let Some(previous) = self.in_flight.take() {
                previous.abort();
            }
        }

        let hide = self.config.loading_display == LoadingDisplay::HideContent;
        self.state.send_modify(|state| {
            state.selected = Some(item);
            state.generation = generation;
            state.is_loading = true;
            state.error = None;
            if hide {
                state.content = None;
            }
        });

        debug!(generation, block_id = %block_id, "selection settled, fetching");

        let service = Arc::clone(&self.service);
        let handle = self.fetches.spawn(async move {
            let result = AssertUnwindSafe(service.fetch(block_id))
                .catch_unwind()
                .await
                .unwrap_or_else(|_| Err(FetchFailure::new("fetch panicked")));
            Completion {
                generation,
                block_id,
                result,
            }
        });
        self.in_flight = Some(handle);

        self.emit(SelectionEvent::Settled {
            generation,
            block_id,
        });
    }

    /// Publish a completion if it belongs to the latest settlement.
    fn apply(&mut self, completion: Completion<S::Content>) {
        let Completion {
            generation,
            block_id,
            result,
        } = completion;

        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation,
                block_id = %block_id,
                "discarding superseded fetch result"
            );
            self.emit(SelectionEvent::Discarded {
                generation,
                block_id,
            });
            return;
        }

        self.in_flight = None;

        match result {
            Ok(content) => {
                debug!(generation, block_id = %block_id, "fetch succeeded");
                self.state.send_modify(|state| {
                    state.content = Some(content);
                    state.error = None;
                    state.is_loading = false;
                });
                self.emit(SelectionEvent::Loaded {
                    generation,
                    block_id,
                });
            }
            Err(failure) => {
                warn!(generation, block_id = %block_id, error = %failure, "fetch failed");
                let message = failure.message;
                self.state.send_modify(|state| {
                    state.content = None;
                    state.error = Some(message.clone());
                    state.is_loading = false;
                });
                self.emit(SelectionEvent::Failed {
                    generation,
                    block_id,
                    message,
                });
            }
        }
    }

    fn emit(&self, event: SelectionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}
