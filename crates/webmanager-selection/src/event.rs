//! Controller events.

use webmanager_models::BlockId;

/// Events emitted by the selection controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// A selection was received and the debounce timer restarted.
    Selected {
        /// Selected block.
        block_id: BlockId,
    },
    /// A selection settled and its fetch was issued.
    Settled {
        /// Generation of the settlement.
        generation: u64,
        /// Block being fetched.
        block_id: BlockId,
    },
    /// The latest fetch succeeded and its content was published.
    Loaded {
        generation: u64,
        block_id: BlockId,
    },
    /// The latest fetch failed and its error was published.
    Failed {
        generation: u64,
        block_id: BlockId,
        /// Failure message.
        message: String,
    },
    /// A superseded fetch completed and its result was dropped.
    Discarded {
        generation: u64,
        block_id: BlockId,
    },
}

impl SelectionEvent {
    /// Returns the block ID associated with this event.
    pub fn block_id(&self) -> BlockId {
        match self {
            SelectionEvent::Selected { block_id } => *block_id,
            SelectionEvent::Settled { block_id, .. } => *block_id,
            SelectionEvent::Loaded { block_id, .. } => *block_id,
            SelectionEvent::Failed { block_id, .. } => *block_id,
            SelectionEvent::Discarded { block_id, .. } => *block_id,
        }
    }

    /// Returns the generation, if the event belongs to a settlement.
    pub fn generation(&self) -> Option<u64> {
        match self {
            SelectionEvent::Selected { .. } => None,
            SelectionEvent::Settled { generation, .. }
            | SelectionEvent::Loaded { generation, .. }
            | SelectionEvent::Failed { generation, .. }
            | SelectionEvent::Discarded { generation, .. } => Some(*generation),
        }
    }

    /// Returns true if this is a failure event.
    pub fn is_failure(&self) -> bool {
        matches!(self, SelectionEvent::Failed { .. })
    }
}
