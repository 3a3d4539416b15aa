/*!
 * One-time, retryable engine initialization.
 *
 * The first caller moves the cell from `Idle` to `Loading` and drives the
 * loader. Callers arriving while a load is in flight queue a waiter and are
 * resumed with the same outcome once the load finishes. A failed load puts
 * the cell back to `Idle` so a later request can retry.
 */

use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::errors::EngineError;
use crate::nlp::{EngineHandle, EngineLoader};

type LoadResult = Result<Arc<dyn EngineHandle>, EngineError>;

/// Observable lifecycle of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug)]
enum Slot {
    Idle,
    Loading(Vec<oneshot::Sender<LoadResult>>),
    Ready(Arc<dyn EngineHandle>),
}

/// Shared, lazily loaded engine.
#[derive(Debug)]
pub struct EngineCell {
    loader: Arc<dyn EngineLoader>,
    slot: Mutex<Slot>,
}

impl EngineCell {
    /// Create an idle cell around a loader
    pub fn new(loader: Arc<dyn EngineLoader>) -> Self {
        Self {
            loader,
            slot: Mutex::new(Slot::Idle),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> EngineState {
        match &*self.slot.lock() {
            Slot::Idle => EngineState::Idle,
            Slot::Loading(_) => EngineState::Loading,
            Slot::Ready(_) => EngineState::Ready,
        }
    }

    /// Handle if the engine is already loaded
    pub fn handle(&self) -> Option<Arc<dyn EngineHandle>> {
        match &*self.slot.lock() {
            Slot::Ready(handle) => Some(handle.clone()),
            _ => None,
        }
    }

    /// Number of callers currently waiting on an in-flight load
    pub fn waiting(&self) -> usize {
        match &*self.slot.lock() {
            Slot::Loading(waiters) => waiters.len(),
            _ => 0,
        }
    }

    /// Return the loaded engine, loading it first if needed
    pub async fn get_or_load(&self) -> LoadResult {
        let waiter = {
            let mut slot = self.slot.lock();
            match &mut *slot {
                Slot::Ready(handle) => return Ok(handle.clone()),
                Slot::Loading(waiters) => {
                    let (sender, receiver) = oneshot::channel();
                    waiters.push(sender);
                    Some(receiver)
                }
                Slot::Idle => {
                    *slot = Slot::Loading(Vec::new());
                    None
                }
            }
        };

        match waiter {
            Some(receiver) => {
                debug!("Engine load already in flight, waiting for it to finish");
                receiver.await.unwrap_or(Err(EngineError::LoadAborted))
            }
            None => self.run_load().await,
        }
    }

    async fn run_load(&self) -> LoadResult {
        let mut guard = LoadGuard {
            slot: &self.slot,
            finished: false,
        };

        info!("Loading NLP engine '{}'", self.loader.name());
        let result = self.loader.load().await;

        match &result {
            Ok(_) => info!("NLP engine '{}' loaded successfully", self.loader.name()),
            Err(e) => warn!("Error loading NLP engine '{}': {}", self.loader.name(), e),
        }

        guard.finish(&result);
        result
    }
}

// Resets the cell to Idle if the loading future is dropped mid-flight.
// Dropping the queued senders resumes waiters with LoadAborted.
struct LoadGuard<'a> {
    slot: &'a Mutex<Slot>,
    finished: bool,
}

impl LoadGuard<'_> {
    fn finish(&mut self, result: &LoadResult) {
        let next = match result {
            Ok(handle) => Slot::Ready(handle.clone()),
            Err(_) => Slot::Idle,
        };

        let waiters = match std::mem::replace(&mut *self.slot.lock(), next) {
            Slot::Loading(waiters) => waiters,
            _ => Vec::new(),
        };
        self.finished = true;

        if !waiters.is_empty() {
            debug!("Resuming {} queued engine request(s)", waiters.len());
        }
        for waiter in waiters {
            let _ = waiter.send(result.clone());
        }
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut slot = self.slot.lock();
        if matches!(*slot, Slot::Loading(_)) {
            warn!("Engine load dropped before completion");
            *slot = Slot::Idle;
        }
    }
}
