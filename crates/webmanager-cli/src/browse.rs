//! Interactive block browser.
//!
//! Navigation commands move a [`Navigator`] over the proposal's blocks and
//! feed every move to a [`SelectionController`]. A background task prints
//! each state the controller publishes, so holding `n` only fetches the
//! block the cursor comes to rest on.

use std::sync::Arc;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tracing::{debug, info};

use webmanager_client::{authenticated_client, BlockFetcher, ClientConfig};
use webmanager_models::{Block, BlockFilter, BlockId, ProposalCode, SelectionSummary};
use webmanager_selection::{
    ControllerState, Navigator, SelectionConfig, SelectionController, SelectionError, StateView,
};

use crate::commands::Result;
use crate::render::{block_detail, block_line, render_state, selection_list};

const HELP: &str = "\
Commands:
  n, next        Select the next block
  p, prev        Select the previous block
  <number>       Select the block at that position in the list
  id <block id>  Select the block with that ID
  l, list        Show the block list
  h, help        Show this help
  q, quit        Leave the browser";

/// Browser input commands.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Next,
    Previous,
    /// Zero-based position in the list.
    Index(usize),
    Id(BlockId),
    List,
    Help,
    Quit,
    /// Unrecognised input, with the reason.
    Unknown(String),
}

impl BrowseCommand {
    /// Parse a line of input. Positions are entered one-based.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let mut parts = input.splitn(2, ' ');
        let cmd = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next().map(str::trim);

        match cmd.as_str() {
            "n" | "next" => BrowseCommand::Next,
            "p" | "prev" | "previous" => BrowseCommand::Previous,
            "l" | "ls" | "list" => BrowseCommand::List,
            "h" | "help" | "?" => BrowseCommand::Help,
            "q" | "quit" | "exit" => BrowseCommand::Quit,
            "id" => match arg.map(str::parse::<BlockId>) {
                Some(Ok(id)) => BrowseCommand::Id(id),
                Some(Err(_)) => {
                    BrowseCommand::Unknown(format!("invalid block id '{}'", arg.unwrap_or_default()))
                }
                None => BrowseCommand::Unknown("id requires a block id".to_string()),
            },
            number => match number.parse::<usize>() {
                Ok(0) => BrowseCommand::Unknown("positions start at 1".to_string()),
                Ok(position) => BrowseCommand::Index(position - 1),
                Err(_) => BrowseCommand::Unknown(format!("unknown command '{}'", input)),
            },
        }
    }
}

/// Move the cursor for a navigation command.
///
/// Returns the item to select, or `None` when the cursor did not move.
pub fn navigate(
    navigator: &mut Navigator,
    command: &BrowseCommand,
) -> std::result::Result<Option<SelectionSummary>, SelectionError> {
    let item = match command {
        BrowseCommand::Next => navigator.next().cloned(),
        BrowseCommand::Previous => navigator.previous().cloned(),
        BrowseCommand::Index(index) => Some(navigator.select_index(*index)?.clone()),
        BrowseCommand::Id(id) => Some(navigator.select_id(*id)?.clone()),
        _ => None,
    };
    Ok(item)
}

/// Browse the blocks of a proposal.
pub fn run(
    config: &ClientConfig,
    code: &ProposalCode,
    selection: SelectionConfig,
    filter: BlockFilter,
) -> Result<()> {
    let client = authenticated_client(config)?;
    let runtime = Runtime::new()?;

    let proposal = runtime.block_on(client.proposal(code))?;
    let items: Vec<SelectionSummary> = filter
        .apply(&proposal.blocks)
        .into_iter()
        .map(|block| block.selection())
        .collect();

    info!(proposal = %code, blocks = items.len(), "browsing proposal");

    if items.is_empty() {
        println!("No blocks in {} match the filter.", code);
        return Ok(());
    }

    println!("{}: {}", proposal.code, proposal.title);
    let mut navigator = Navigator::new(items.clone());
    print!("{}", selection_list(&navigator));
    println!("Type 'help' for commands.");

    // The controller spawns its driver onto the current runtime
    let _guard = runtime.enter();
    let controller =
        SelectionController::start(Arc::new(BlockFetcher::new(client)), selection, items);
    let printer = runtime.spawn(print_states(controller.subscribe_state()));

    let mut editor = DefaultEditor::new()?;
    loop {
        let prompt = format!(
            "browse [{}/{}]> ",
            navigator.position().map(|i| i + 1).unwrap_or(0),
            navigator.len()
        );

        match editor.readline(&prompt) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line.as_str());

                match BrowseCommand::parse(&line) {
                    BrowseCommand::Quit => break,
                    BrowseCommand::Help => println!("{}", HELP),
                    BrowseCommand::List => print!("{}", selection_list(&navigator)),
                    BrowseCommand::Unknown(reason) => {
                        println!("{} (type 'help' for commands)", reason)
                    }
                    command => match navigate(&mut navigator, &command) {
                        Ok(Some(item)) => {
                            debug!(block_id = %item.id, "selecting");
                            controller.select_item(item);
                        }
                        Ok(None) => println!("No more blocks in that direction."),
                        Err(e) => println!("{}", e),
                    },
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    runtime.block_on(controller.dispose())?;
    // The state channel closes with the controller, ending the printer
    runtime.block_on(printer)?;
    Ok(())
}

/// Print every published state until the controller stops.
async fn print_states(mut states: watch::Receiver<ControllerState<Block>>) {
    loop {
        let state = states.borrow_and_update().clone();
        println!("{}", render_state(&state, block_line));
        if let StateView::Content(block) = state.view() {
            print!("{}", block_detail(block));
        }

        if states.changed().await.is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_nav() -> Navigator {
        Navigator::new(vec![
            SelectionSummary::new(10, "Field A"),
            SelectionSummary::new(11, "Field B"),
            SelectionSummary::new(12, "Field C"),
        ])
    }

    #[test]
    fn test_parse_navigation() {
        assert_eq!(BrowseCommand::parse("n"), BrowseCommand::Next);
        assert_eq!(BrowseCommand::parse(" NEXT "), BrowseCommand::Next);
        assert_eq!(BrowseCommand::parse("p"), BrowseCommand::Previous);
        assert_eq!(BrowseCommand::parse("3"), BrowseCommand::Index(2));
        assert_eq!(BrowseCommand::parse("id 404"), BrowseCommand::Id(BlockId::new(404)));
        assert_eq!(BrowseCommand::parse("list"), BrowseCommand::List);
        assert_eq!(BrowseCommand::parse("?"), BrowseCommand::Help);
        assert_eq!(BrowseCommand::parse("q"), BrowseCommand::Quit);
    }

    #[test]
    fn test_parse_invalid_input() {
        assert!(matches!(BrowseCommand::parse("0"), BrowseCommand::Unknown(_)));
        assert!(matches!(BrowseCommand::parse("id"), BrowseCommand::Unknown(_)));
        assert!(matches!(BrowseCommand::parse("id abc"), BrowseCommand::Unknown(_)));
        assert!(matches!(BrowseCommand::parse("jump"), BrowseCommand::Unknown(_)));
    }

    #[test]
    fn test_navigate_moves_cursor() {
        let mut nav = make_nav();

        let item = navigate(&mut nav, &BrowseCommand::Next).unwrap();
        assert_eq!(item.map(|s| s.id.value()), Some(11));

        let item = navigate(&mut nav, &BrowseCommand::Id(BlockId::new(12))).unwrap();
        assert_eq!(item.map(|s| s.id.value()), Some(12));
        assert!(navigate(&mut nav, &BrowseCommand::Next).unwrap().is_none());

        let item = navigate(&mut nav, &BrowseCommand::Index(0)).unwrap();
        assert_eq!(item.map(|s| s.id.value()), Some(10));
        assert!(navigate(&mut nav, &BrowseCommand::Previous).unwrap().is_none());
    }

    #[test]
    fn test_navigate_errors_leave_cursor() {
        let mut nav = make_nav();

        assert!(matches!(
            navigate(&mut nav, &BrowseCommand::Index(7)),
            Err(SelectionError::IndexOutOfRange { index: 7, len: 3 })
        ));
        assert!(matches!(
            navigate(&mut nav, &BrowseCommand::Id(BlockId::new(99))),
            Err(SelectionError::UnknownId(_))
        ));
        assert_eq!(nav.position(), Some(0));
    }

    #[test]
    fn test_non_navigation_commands_select_nothing() {
        let mut nav = make_nav();
        assert!(navigate(&mut nav, &BrowseCommand::List).unwrap().is_none());
        assert!(navigate(&mut nav, &BrowseCommand::Help).unwrap().is_none());
    }
}
