//! Command-line interface definition using clap.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use url::Url;

use webmanager_client::{ClientConfig, ClientError};
use webmanager_models::{BlockFilter, BlockId, BlockStatus, DateInterval, ProposalCode};
use webmanager_selection::{LoadingDisplay, SelectionConfig};

/// Web Manager - browse proposals and scheduling blocks
#[derive(Parser, Debug)]
#[command(name = "webmanager")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the login token
    #[arg(long, global = true)]
    pub state_dir: Option<PathBuf>,

    /// Base URL of the Web Manager API
    #[arg(long, global = true)]
    pub api_url: Option<Url>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in and store the issued token
    Login {
        /// Web Manager username
        username: String,

        /// Password (prompted for when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// List your proposals
    Proposals,

    /// Show a proposal with its time allocations and blocks
    Proposal {
        /// Proposal code, e.g. 2024-1-SCI-017
        code: ProposalCode,
    },

    /// Show a scheduling block
    Block {
        /// Block ID
        id: BlockId,
    },

    /// Browse the blocks of a proposal interactively
    Browse {
        /// Proposal code, e.g. 2024-1-SCI-017
        code: ProposalCode,

        #[command(flatten)]
        display: DisplayArgs,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Run the browsing scenario against simulated blocks
    Simulate {
        #[command(flatten)]
        display: DisplayArgs,
    },
}

/// Controller settings shared by `browse` and `simulate`.
#[derive(Args, Debug, Clone)]
pub struct DisplayArgs {
    /// Quiet period before a selection is fetched
    #[arg(long, default_value_t = 100)]
    pub debounce_ms: u64,

    /// Keep showing the previous block while the next one loads
    #[arg(long)]
    pub keep_stale: bool,
}

impl DisplayArgs {
    /// Builds the controller configuration.
    pub fn selection_config(&self) -> SelectionConfig {
        let display = if self.keep_stale {
            LoadingDisplay::KeepStale
        } else {
            LoadingDisplay::HideContent
        };
        SelectionConfig::new()
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_loading_display(display)
    }
}

/// Block list filters for `browse`.
#[derive(Args, Debug, Clone, Default)]
pub struct WindowArgs {
    /// Only blocks observable on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Only blocks observable on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Only blocks with this status (active, on_hold, completed, deleted, superseded)
    #[arg(long, value_parser = parse_status)]
    pub status: Option<BlockStatus>,
}

impl WindowArgs {
    /// Builds the block filter; an open end extends without bound.
    pub fn filter(&self) -> BlockFilter {
        let mut filter = BlockFilter::new();

        if self.from.is_some() || self.to.is_some() {
            let start = self.from.map(start_of_day).unwrap_or(DateTime::<Utc>::MIN_UTC);
            let end = self.to.map(end_of_day).unwrap_or(DateTime::<Utc>::MAX_UTC);
            filter = filter.with_interval(DateInterval::new(start, end));
        }
        if let Some(status) = self.status {
            filter = filter.with_status(status);
        }
        filter
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + chrono::Duration::days(1) - chrono::Duration::seconds(1)
}

fn parse_status(s: &str) -> Result<BlockStatus, String> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "active" => Ok(BlockStatus::Active),
        "on_hold" => Ok(BlockStatus::OnHold),
        "completed" => Ok(BlockStatus::Completed),
        "deleted" => Ok(BlockStatus::Deleted),
        "superseded" => Ok(BlockStatus::Superseded),
        other => Err(format!("unknown block status '{}'", other)),
    }
}

impl Cli {
    /// Builds the client configuration: environment first, then flags.
    pub fn client_config(&self) -> Result<ClientConfig, ClientError> {
        let mut config = ClientConfig::from_env()?;
        if let Some(ref url) = self.api_url {
            config = config.with_api_url(url.clone());
        }
        if let Some(ref dir) = self.state_dir {
            config = config.with_state_dir(dir.clone());
        }
        Ok(config)
    }

    /// Returns the log level based on verbosity.
    pub fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parse_login() {
        let cli = Cli::parse_from(["webmanager", "login", "astro", "-p", "hunter2"]);
        match cli.command {
            Commands::Login { username, password } => {
                assert_eq!(username, "astro");
                assert_eq!(password.as_deref(), Some("hunter2"));
            }
            _ => panic!("Expected Login command"),
        }
    }

    #[test]
    fn test_cli_parse_block() {
        let cli = Cli::parse_from(["webmanager", "block", "42"]);
        assert!(matches!(cli.command, Commands::Block { id } if id == BlockId::new(42)));
    }

    #[test]
    fn test_cli_rejects_bad_proposal_code() {
        let result = Cli::try_parse_from(["webmanager", "proposal", "not-a-code"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_browse() {
        let cli = Cli::parse_from([
            "webmanager",
            "browse",
            "2024-1-SCI-017",
            "--debounce-ms",
            "250",
            "--keep-stale",
            "--from",
            "2024-05-01",
            "--status",
            "on-hold",
        ]);
        match cli.command {
            Commands::Browse {
                code,
                display,
                window,
            } => {
                assert_eq!(code.as_str(), "2024-1-SCI-017");

                let config = display.selection_config();
                assert_eq!(config.debounce, Duration::from_millis(250));
                assert_eq!(config.loading_display, LoadingDisplay::KeepStale);

                let filter = window.filter();
                let interval = filter.interval.unwrap();
                assert_eq!(interval.start.to_rfc3339(), "2024-05-01T00:00:00+00:00");
                assert_eq!(interval.end, DateTime::<Utc>::MAX_UTC);
                assert_eq!(filter.status, Some(BlockStatus::OnHold));
            }
            _ => panic!("Expected Browse command"),
        }
    }

    #[test]
    fn test_display_defaults() {
        let cli = Cli::parse_from(["webmanager", "simulate"]);
        match cli.command {
            Commands::Simulate { display } => {
                let config = display.selection_config();
                assert_eq!(config.debounce, Duration::from_millis(100));
                assert_eq!(config.loading_display, LoadingDisplay::HideContent);
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_window_without_dates_has_no_interval() {
        let filter = WindowArgs::default().filter();
        assert!(filter.interval.is_none());
        assert!(filter.status.is_none());
    }

    #[test]
    fn test_window_to_covers_whole_day() {
        let window = WindowArgs {
            to: NaiveDate::from_ymd_opt(2024, 5, 31),
            ..WindowArgs::default()
        };
        let interval = window.filter().interval.unwrap();
        assert_eq!(interval.start, DateTime::<Utc>::MIN_UTC);
        assert_eq!(interval.end.to_rfc3339(), "2024-05-31T23:59:59+00:00");
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::parse_from([
            "webmanager",
            "--api-url",
            "http://127.0.0.1:9000/wm",
            "--state-dir",
            "/tmp/wm",
            "logout",
        ]);
        let config = cli.client_config().unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:9000/wm/");
        assert_eq!(config.token_file(), PathBuf::from("/tmp/wm/token.json"));
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::parse_from(["webmanager", "-vv", "proposals"]);
        assert_eq!(cli.log_level(), tracing::Level::DEBUG);
    }
}
