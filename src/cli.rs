//! CLI - Command Line Interface for anistream
//!
//! Run without a subcommand for the interactive TUI. Subcommands query the
//! catalog backend directly and print human-readable text or JSON.
//!
//! # Examples
//!
//! ```bash
//! # Browse, starting from a deep link
//! anistream open /anime/21?ep=3
//!
//! # Scripting
//! anistream list naruto --json
//! anistream info 21 -e 3
//! anistream play 21 -e 3 --player vlc
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::route::{Route, RouteError};
use crate::stream::PlayerType;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Backend unreachable or returned a server error
    NetworkError = 3,
    /// Title not found
    NotFound = 4,
    /// Title has no episodes
    NoEpisodes = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// anistream - browse and watch anime from your terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "anistream",
    version,
    about = "Browse and watch anime from your terminal",
    long_about = "Browse a catalog of anime titles, pick an episode and watch it \
                  in mpv or VLC.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  anistream                           Launch interactive TUI\n\
                  anistream open /anime/21?ep=3       Open the TUI on an episode\n\
                  anistream list naruto --json        Search the catalog\n\
                  anistream play 21 -e 3              Play episode 3 locally\n\
                  anistream config --set-player vlc   Save the preferred player"
)]
pub struct Cli {
    /// Catalog backend base URL (overrides env and config file)
    #[arg(long, short = 'b', global = true, value_name = "URL")]
    pub backend_url: Option<String>,

    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode. `open` still launches the TUI.
    pub fn is_cli_mode(&self) -> bool {
        !matches!(self.command, None | Some(Command::Open(_)))
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }

    /// Route the TUI starts on
    pub fn initial_route(&self) -> Result<Route, RouteError> {
        match self.command {
            Some(Command::Open(ref cmd)) => cmd.route.parse(),
            _ => Ok(Route::Catalog),
        }
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the TUI at a route (`/` or `/anime/<id>?ep=<n>`)
    #[command(visible_alias = "o")]
    Open(OpenCmd),

    /// List catalog titles, optionally filtered by a search query
    #[command(visible_alias = "ls")]
    List(ListCmd),

    /// Show a title and its episodes
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// Play an episode locally in mpv or VLC
    #[command(visible_alias = "p")]
    Play(PlayCmd),

    /// Show or update the saved configuration
    #[command(visible_alias = "cfg")]
    Config(ConfigCmd),
}

/// Open the TUI at a route
#[derive(Args, Debug)]
pub struct OpenCmd {
    /// Route path, e.g. `/anime/21?ep=3`
    #[arg(default_value = "/")]
    pub route: String,
}

/// List titles from the catalog
#[derive(Args, Debug)]
pub struct ListCmd {
    /// Search query (omit for the full catalog)
    pub query: Option<String>,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

/// Show title details and episodes
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// Title id
    pub id: String,

    /// Episode number to mark as current
    #[arg(long, short = 'e')]
    pub ep: Option<String>,
}

/// Play an episode
#[derive(Args, Debug)]
pub struct PlayCmd {
    /// Title id
    pub id: String,

    /// Episode number (defaults to the first episode)
    #[arg(long, short = 'e')]
    pub ep: Option<String>,

    /// Player to use (overrides the config file)
    #[arg(long, short = 'p', value_enum)]
    pub player: Option<PlayerChoice>,
}

/// Show or update config.toml. Without flags the current values are printed.
#[derive(Args, Debug)]
pub struct ConfigCmd {
    /// Save a backend base URL
    #[arg(long, value_name = "URL")]
    pub set_backend_url: Option<String>,

    /// Save the preferred local player
    #[arg(long, value_enum)]
    pub set_player: Option<PlayerChoice>,
}

impl ConfigCmd {
    /// Whether any value is to be written
    pub fn has_changes(&self) -> bool {
        self.set_backend_url.is_some() || self.set_player.is_some()
    }
}

/// Local player selection
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerChoice {
    Mpv,
    Vlc,
}

impl PlayerChoice {
    /// Name as stored in config.toml
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerChoice::Mpv => "mpv",
            PlayerChoice::Vlc => "vlc",
        }
    }
}

impl From<PlayerChoice> for PlayerType {
    fn from(choice: PlayerChoice) -> Self {
        match choice {
            PlayerChoice::Mpv => PlayerType::Mpv,
            PlayerChoice::Vlc => PlayerType::Vlc,
        }
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Playback started response
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayResponse {
    pub status: String,
    pub player: String,
    pub title: String,
    pub episode: String,
    pub stream_url: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as JSON
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        let output = JsonOutput::success(data);
        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
