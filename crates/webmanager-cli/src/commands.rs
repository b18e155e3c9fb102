//! Command handlers for CLI subcommands.

use tokio::runtime::Runtime;
use tracing::{info, warn};

use webmanager_client::{authenticated_client, ClientConfig, TokenStore};
use webmanager_models::{BlockId, ProposalCode};

use crate::cli::{Cli, Commands};
use crate::{browse, prompt, render, simulate};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command.
pub fn execute(cli: Cli) -> Result<()> {
    let config = cli.client_config()?;

    match cli.command {
        Commands::Login { username, password } => cmd_login(&config, &username, password),
        Commands::Logout => cmd_logout(&config),
        Commands::Proposals => cmd_proposals(&config),
        Commands::Proposal { code } => cmd_proposal(&config, &code),
        Commands::Block { id } => cmd_block(&config, id),
        Commands::Browse {
            code,
            display,
            window,
        } => browse::run(&config, &code, display.selection_config(), window.filter()),
        Commands::Simulate { display } => simulate::run(display.selection_config()),
    }
}

fn cmd_login(config: &ClientConfig, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt::read_password("Password: ")?,
    };

    let runtime = Runtime::new()?;
    let stored = runtime.block_on(webmanager_client::login(config, username, &password))?;

    println!("Logged in as {}.", stored.username);
    Ok(())
}

fn cmd_logout(config: &ClientConfig) -> Result<()> {
    let store = TokenStore::from_config(config);
    let username = match store.load() {
        Ok(token) => token.map(|t| t.username),
        Err(e) => {
            // A corrupt token file is still removed
            warn!(error = %e, "could not read stored token");
            None
        }
    };

    if webmanager_client::logout(config)? {
        match username {
            Some(username) => println!("Logged out {}.", username),
            None => println!("Logged out."),
        }
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

fn cmd_proposals(config: &ClientConfig) -> Result<()> {
    let client = authenticated_client(config)?;
    let runtime = Runtime::new()?;

    let proposals = runtime.block_on(client.proposals())?;
    info!(count = proposals.len(), "fetched proposals");

    print!("{}", render::proposal_list(&proposals));
    Ok(())
}

fn cmd_proposal(config: &ClientConfig, code: &ProposalCode) -> Result<()> {
    let client = authenticated_client(config)?;
    let runtime = Runtime::new()?;

    let proposal = runtime.block_on(client.proposal(code))?;
    print!("{}", render::proposal_detail(&proposal));
    Ok(())
}

fn cmd_block(config: &ClientConfig, id: BlockId) -> Result<()> {
    let client = authenticated_client(config)?;
    let runtime = Runtime::new()?;

    let block = runtime.block_on(client.block(id))?;
    print!("{}", render::block_detail(&block));
    Ok(())
}
