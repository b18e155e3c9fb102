//! Scripted browsing session against simulated blocks.
//!
//! The simulated service answers after `id` milliseconds and always fails
//! blocks 42 and 43, which makes the races between slow and fast fetches
//! reproducible.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::info;

use webmanager_models::{BlockId, SelectionSummary};
use webmanager_selection::{
    SelectionConfig, SelectionController, SelectionEvent, SimulatedBlock, SimulatedFetchService,
};

use crate::commands::Result;
use crate::render::render_state;

/// One step of a scripted session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Select the block with this ID.
    Select(i64),
    /// Let this many milliseconds pass, then report.
    Wait(u64),
}

/// Blocks listed by the simulated proposal.
pub const BLOCKS: [i64; 6] = [10, 42, 300, 40, 30, 43];

/// Initial load, a rapid burst, then a slow fetch overtaken by a failing
/// one and by a fast one.
pub const SCENARIO: &[Step] = &[
    Step::Wait(120),
    Step::Select(42),
    Step::Wait(20),
    Step::Select(300),
    Step::Wait(20),
    Step::Select(40),
    Step::Wait(220),
    Step::Select(300),
    Step::Wait(120),
    Step::Select(43),
    Step::Wait(400),
    Step::Select(300),
    Step::Wait(120),
    Step::Select(30),
    Step::Wait(400),
];

fn describe_block(block: &SimulatedBlock) -> String {
    format!("{} loaded", block.name)
}

fn describe_event(event: &SelectionEvent) -> Option<String> {
    match event {
        SelectionEvent::Selected { .. } => None,
        SelectionEvent::Settled { generation, block_id } => {
            Some(format!("settled on block {} (generation {})", block_id, generation))
        }
        SelectionEvent::Loaded { generation, block_id } => {
            Some(format!("block {} loaded (generation {})", block_id, generation))
        }
        SelectionEvent::Failed {
            generation,
            block_id,
            message,
        } => Some(format!(
            "block {} failed (generation {}): {}",
            block_id, generation, message
        )),
        SelectionEvent::Discarded { generation, block_id } => Some(format!(
            "dropped stale result for block {} (generation {})",
            block_id, generation
        )),
    }
}

/// Play `steps` against a fresh simulated service.
///
/// Every line of the transcript is passed to `output`. Returns the block IDs
/// the service was asked for, in order.
pub async fn play(
    config: SelectionConfig,
    steps: &[Step],
    mut output: impl FnMut(String),
) -> Result<Vec<BlockId>> {
    let service = Arc::new(SimulatedFetchService::new());
    let items: Vec<SelectionSummary> = BLOCKS
        .iter()
        .map(|&id| SelectionSummary::new(id, format!("Block {}", id)))
        .collect();

    let controller = SelectionController::start(Arc::clone(&service), config, items.clone());
    let mut events = controller.subscribe();
    let mut elapsed = 0;

    output(format!(
        "t={:>5}ms  {}",
        elapsed,
        render_state(&controller.current_state(), describe_block)
    ));

    for step in steps {
        match *step {
            Step::Select(id) => {
                let item = items
                    .iter()
                    .find(|item| item.id == BlockId::new(id))
                    .cloned()
                    .unwrap_or_else(|| SelectionSummary::new(id, format!("Block {}", id)));
                output(format!("t={:>5}ms  select {}", elapsed, item.label));
                controller.select_item(item);
            }
            Step::Wait(ms) => {
                tokio::time::sleep(Duration::from_millis(ms)).await;
                elapsed += ms;

                loop {
                    match events.try_recv() {
                        Ok(event) => {
                            if let Some(line) = describe_event(&event) {
                                output(format!("           {}", line));
                            }
                        }
                        Err(TryRecvError::Lagged(skipped)) => {
                            output(format!("           ({} events skipped)", skipped));
                        }
                        Err(_) => break,
                    }
                }

                output(format!(
                    "t={:>5}ms  {}",
                    elapsed,
                    render_state(&controller.current_state(), describe_block)
                ));
            }
        }
    }

    controller.dispose().await?;
    Ok(service.calls())
}

/// Run the built-in scenario and print the transcript.
pub fn run(config: SelectionConfig) -> Result<()> {
    info!(
        debounce_ms = config.debounce.as_millis() as u64,
        "running simulated browsing session"
    );

    let runtime = Runtime::new()?;
    let calls = runtime.block_on(play(config, SCENARIO, |line| println!("{}", line)))?;

    let fetched: Vec<String> = calls.iter().map(|id| id.to_string()).collect();
    println!("Fetched blocks: {}", fetched.join(", "));
    Ok(())
}
