//! Text rendering of proposals, blocks and controller state.

use std::fmt::Write;

use webmanager_models::{Block, DateInterval, Proposal, ProposalSummary};
use webmanager_selection::{ControllerState, Navigator, StateView};

/// Formats seconds as `1h 30m`, `12m 5s` or `40s`.
pub fn format_duration(secs: u64) -> String {
    let hours = secs / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

fn format_window(window: &DateInterval) -> String {
    format!(
        "{} to {}",
        window.start.format("%Y-%m-%d %H:%M"),
        window.end.format("%Y-%m-%d %H:%M")
    )
}

/// Renders the current controller state as one line.
///
/// `describe` renders loaded content; the label of the selection being
/// loaded comes from the state itself.
pub fn render_state<C>(state: &ControllerState<C>, describe: impl Fn(&C) -> String) -> String {
    let label = state
        .selected
        .as_ref()
        .map(|s| s.label.as_str())
        .unwrap_or("-");

    match state.view() {
        StateView::Empty => "No block selected".to_string(),
        StateView::Loading { stale: None } => {
            format!("[{}] Loading {}...", state.generation, label)
        }
        StateView::Loading { stale: Some(content) } => format!(
            "[{}] Loading {}... (still showing {})",
            state.generation,
            label,
            describe(content)
        ),
        StateView::Content(content) => format!("[{}] {}", state.generation, describe(content)),
        StateView::Error(message) => {
            format!("[{}] Error loading {}: {}", state.generation, label, message)
        }
    }
}

/// One-line block description.
pub fn block_line(block: &Block) -> String {
    format!(
        "Block {}: {} ({}, {}, {} instrument(s))",
        block.id,
        block.name,
        block.status.as_str(),
        format_duration(u64::from(block.length_secs)),
        block.instruments.len()
    )
}

/// Multi-line block description.
pub fn block_detail(block: &Block) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Block {}: {}", block.id, block.name);
    let _ = writeln!(out, "  Proposal:  {} ({})", block.proposal_code, block.semester);
    let _ = writeln!(out, "  Status:    {}", block.status.as_str());
    let _ = writeln!(out, "  Priority:  {}", block.priority);
    let _ = writeln!(
        out,
        "  Length:    {}",
        format_duration(u64::from(block.length_secs))
    );
    if let Some(ref window) = block.observation_window {
        let _ = writeln!(out, "  Window:    {}", format_window(window));
    }

    if !block.targets.is_empty() {
        let _ = writeln!(out, "  Targets:");
        for target in &block.targets {
            let magnitude = target
                .magnitude
                .map(|m| format!(", mag {:.1}", m))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "    {} (RA {:.4}, Dec {:+.4}{})",
                target.name, target.right_ascension_deg, target.declination_deg, magnitude
            );
        }
    }

    if !block.instruments.is_empty() {
        let _ = writeln!(out, "  Instruments:");
        for instrument in &block.instruments {
            let _ = writeln!(
                out,
                "    {}: {} ({:.0}s exposure)",
                instrument.name(),
                instrument.describe(),
                instrument.exposure_time_secs()
            );
        }
        let _ = writeln!(out, "  Total exposure: {:.0}s", block.total_exposure_secs());
    }

    out
}

/// Proposal list, one per line.
pub fn proposal_list(proposals: &[ProposalSummary]) -> String {
    if proposals.is_empty() {
        return "No proposals found.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{:<16} {:<8} TITLE", "CODE", "SEMESTER");
    for proposal in proposals {
        let _ = writeln!(
            out,
            "{:<16} {:<8} {}",
            proposal.code.as_str(),
            proposal.semester,
            proposal.title
        );
    }
    out
}

/// Proposal with its time allocations and block list.
pub fn proposal_detail(proposal: &Proposal) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}: {}", proposal.code, proposal.title);
    let _ = writeln!(out, "  PI:       {}", proposal.principal_investigator);
    let _ = writeln!(out, "  Semester: {}", proposal.semester);

    if !proposal.time_allocations.is_empty() {
        let _ = writeln!(out, "  Time allocations:");
        for allocation in &proposal.time_allocations {
            let _ = writeln!(
                out,
                "    {} P{}: {}",
                allocation.semester,
                allocation.priority,
                format_duration(allocation.allocated_secs)
            );
        }
    }

    let _ = writeln!(out, "  Blocks ({}):", proposal.blocks.len());
    for block in &proposal.blocks {
        let window = block
            .observation_window
            .as_ref()
            .map(|w| format!(" [{}]", format_window(w)))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "    {:>6}  {} ({}){}",
            block.id.value(),
            block.name,
            block.status.as_str(),
            window
        );
    }
    out
}

/// Numbered selection list with the current item marked.
pub fn selection_list(navigator: &Navigator) -> String {
    let mut out = String::new();
    for (index, item) in navigator.items().iter().enumerate() {
        let marker = if navigator.position() == Some(index) {
            '>'
        } else {
            ' '
        };
        let _ = writeln!(out, "{} {:>3}. {} (id {})", marker, index + 1, item.label, item.id);
    }
    out
}
