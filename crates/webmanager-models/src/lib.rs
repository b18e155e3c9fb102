//! Core data models for the Web Manager viewer.
//!
//! This crate provides the read-only data shapes served by the Web Manager
//! API: proposals, their time allocations, scheduling blocks, targets and
//! instrument configurations, plus the lightweight selection summaries the
//! block browser navigates over.

pub mod block;
pub mod filter;
pub mod ids;
pub mod instrument;
pub mod proposal;

// Re-export main types
pub use block::{Block, BlockStatus, BlockSummary, SelectionSummary, Target};
pub use filter::{BlockFilter, DateInterval};
pub use ids::{BlockId, InvalidProposalCode, ProposalCode, TargetId};
pub use instrument::{HrsMode, InstrumentConfig};
pub use proposal::{Proposal, ProposalSummary, TimeAllocation};
