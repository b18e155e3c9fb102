//! Proposal types.

use serde::{Deserialize, Serialize};

use crate::block::{BlockSummary, SelectionSummary};
use crate::ids::ProposalCode;

/// Proposal entry as returned by the proposal list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalSummary {
    pub code: ProposalCode,
    pub title: String,
    pub semester: String,
}

/// Observing time granted to a proposal for one semester and priority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeAllocation {
    pub semester: String,
    pub priority: u8,
    pub allocated_secs: u64,
}

/// Proposal with its time allocations and block list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub code: ProposalCode,
    pub title: String,
    pub principal_investigator: String,
    pub semester: String,
    #[serde(default)]
    pub time_allocations: Vec<TimeAllocation>,
    #[serde(default)]
    pub blocks: Vec<BlockSummary>,
}

impl Proposal {
    /// Total allocated seconds for a semester across all priorities.
    pub fn total_allocation(&self, semester: &str) -> u64 {
        self.time_allocations
            .iter()
            .filter(|a| a.semester == semester)
            .map(|a| a.allocated_secs)
            .sum()
    }

    /// Selection summaries for all blocks, in listing order.
    pub fn selections(&self) -> Vec<SelectionSummary> {
        self.blocks.iter().map(BlockSummary::selection).collect()
    }
}
