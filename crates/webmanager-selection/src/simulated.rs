//! Simulated fetch service with deterministic latency.
//!
//! Latency in milliseconds equals the block id, and a configurable set of
//! ids always fails. Used by the `simulate` command and by tests.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tracing::trace;

use webmanager_models::BlockId;

use crate::fetch::{FetchFailure, FetchService};

/// Content returned by the simulated service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedBlock {
    pub id: BlockId,
    pub name: String,
}

/// Fetch service that sleeps `id` milliseconds before answering.
#[derive(Debug)]
pub struct SimulatedFetchService {
    failing: HashSet<BlockId>,
    calls: Mutex<Vec<BlockId>>,
}

impl SimulatedFetchService {
    /// Creates a service where ids 42 and 43 fail.
    pub fn new() -> Self {
        Self::with_failing([BlockId::new(42), BlockId::new(43)])
    }

    /// Creates a service where the given ids fail.
    pub fn with_failing(ids: impl IntoIterator<Item = BlockId>) -> Self {
        Self {
            failing: ids.into_iter().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// IDs fetched so far, in call order.
    pub fn calls(&self) -> Vec<BlockId> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, id: BlockId) {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(id),
            Err(poisoned) => poisoned.into_inner().push(id),
        }
    }
}

impl Default for SimulatedFetchService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FetchService for SimulatedFetchService {
    type Content = SimulatedBlock;

    async fn fetch(&self, id: BlockId) -> Result<SimulatedBlock, FetchFailure> {
        self.record(id);

        let latency = Duration::from_millis(id.value().max(0) as u64);
        trace!(block_id = %id, latency_ms = latency.as_millis() as u64, "simulated fetch");
        tokio::time::sleep(latency).await;

        if self.failing.contains(&id) {
            return Err(FetchFailure::new(format!("Block {} could not be loaded", id)));
        }

        Ok(SimulatedBlock {
            id,
            name: format!("Block {}", id),
        })
    }
}
