//! Scheduling block types.
//!
//! A block is the unit the telescope schedules: a set of targets observed
//! with a sequence of instrument configurations. Proposals list their blocks
//! as lightweight [`BlockSummary`] values; the full [`Block`] is fetched on
//! demand.

use serde::{Deserialize, Serialize};

use crate::filter::DateInterval;
use crate::ids::{BlockId, ProposalCode, TargetId};
use crate::instrument::InstrumentConfig;

/// Lifecycle status of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    /// Block may be scheduled.
    #[default]
    Active,
    /// Block is temporarily excluded from scheduling.
    OnHold,
    /// All requested observations are done.
    Completed,
    /// Block was removed by the investigator.
    Deleted,
    /// Block was replaced by a newer submission.
    Superseded,
}

impl BlockStatus {
    /// Human-readable status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockStatus::Active => "Active",
            BlockStatus::OnHold => "On Hold",
            BlockStatus::Completed => "Completed",
            BlockStatus::Deleted => "Deleted",
            BlockStatus::Superseded => "Superseded",
        }
    }
}

/// Lightweight reference to a selectable item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionSummary {
    /// ID of the item, unique within its source list.
    pub id: BlockId,
    /// Display text.
    pub label: String,
}

impl SelectionSummary {
    /// Creates a new summary.
    pub fn new(id: impl Into<BlockId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Block entry as listed by a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockSummary {
    /// Block ID.
    pub id: BlockId,

    /// Block name.
    pub name: String,

    /// Current status.
    #[serde(default)]
    pub status: BlockStatus,

    /// Window in which the block may be observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_window: Option<DateInterval>,
}

impl BlockSummary {
    /// Converts this entry into a selection summary for the block browser.
    pub fn selection(&self) -> SelectionSummary {
        SelectionSummary::new(self.id, format!("{} ({})", self.name, self.status.as_str()))
    }
}

/// Observation target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub name: String,
    pub right_ascension_deg: f64,
    pub declination_deg: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
}

/// Fully loaded scheduling block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block ID.
    pub id: BlockId,

    /// Block name.
    pub name: String,

    /// Proposal the block belongs to.
    pub proposal_code: ProposalCode,

    /// Semester, e.g. `2024-1`.
    pub semester: String,

    /// Current status.
    #[serde(default)]
    pub status: BlockStatus,

    /// Scheduling priority (0 is highest).
    pub priority: u8,

    /// Total block length in seconds, including overheads.
    pub length_secs: u32,

    /// Window in which the block may be observed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observation_window: Option<DateInterval>,

    /// Targets observed by the block.
    #[serde(default)]
    pub targets: Vec<Target>,

    /// Instrument configurations in observing order.
    #[serde(default)]
    pub instruments: Vec<InstrumentConfig>,
}

impl Block {
    /// Summed exposure time of all instrument configurations.
    pub fn total_exposure_secs(&self) -> f64 {
        self.instruments
            .iter()
            .map(InstrumentConfig::exposure_time_secs)
            .sum()
    }

    /// Returns the summary entry for this block.
    pub fn summary(&self) -> BlockSummary {
        BlockSummary {
            id: self.id,
            name: self.name.clone(),
            status: self.status,
            observation_window: self.observation_window,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCK_JSON: &str = r#"{
        "id": 300,
        "name": "NGC 300 deep field",
        "proposal_code": "2024-1-SCI-017",
        "semester": "2024-1",
        "status": "on_hold",
        "priority": 2,
        "length_secs": 3600,
        "targets": [
            {"id": 1, "name": "NGC 300", "right_ascension_deg": 13.72, "declination_deg": -37.68}
        ],
        "instruments": [
            {"type": "imager", "filter": "V", "exposure_time_secs": 100, "cycles": 2},
            {"type": "spectrograph", "grating": "PG0900", "slit_width_arcsec": 1.5, "exposure_time_secs": 600}
        ]
    }"#;

    #[test]
    fn test_block_deserialize() {
        let block: Block = serde_json::from_str(BLOCK_JSON).unwrap();
        assert_eq!(block.id, BlockId::new(300));
        assert_eq!(block.status, BlockStatus::OnHold);
        assert_eq!(block.targets[0].magnitude, None);
        assert!(block.observation_window.is_none());
        assert_eq!(block.total_exposure_secs(), 800.0);
    }

    #[test]
    fn test_summary_selection_label() {
        let block: Block = serde_json::from_str(BLOCK_JSON).unwrap();
        let selection = block.summary().selection();

        assert_eq!(selection.id, BlockId::new(300));
        assert_eq!(selection.label, "NGC 300 deep field (On Hold)");
    }

    #[test]
    fn test_summary_status_defaults_to_active() {
        let summary: BlockSummary = serde_json::from_str(r#"{"id": 5, "name": "x"}"#).unwrap();
        assert_eq!(summary.status, BlockStatus::Active);
    }
}
