//! anistream - browse and watch anime from your terminal
//!
//! # Usage
//!
//! ```bash
//! # Launch interactive TUI
//! anistream
//! anistream open /anime/21?ep=3
//!
//! # CLI mode (for automation)
//! anistream list naruto --json
//! anistream play 21 -e 3
//! anistream config --set-player vlc
//! ```

mod commands;

use std::io::{stdout, Stdout};
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};

use anistream::api::CatalogClient;
use anistream::app::{App, Message};
use anistream::cli::{Cli, Command, ExitCode, Output};
use anistream::config::Config;
use anistream::loader::Loader;
use anistream::route::Route;
use anistream::stream::PlayerType;
use anistream::{logging, ui};

/// Terminal type alias for convenience
type Tui = Terminal<CrosstermBackend<Stdout>>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it logs to a file
    if cli.is_cli_mode() {
        logging::init_stderr();
    } else {
        logging::init_file();
    }

    let config = match cli.config {
        Some(ref path) => Config::load_from(path),
        None => Config::load(),
    };
    let client = CatalogClient::with_base_url(config.backend_url(cli.backend_url.as_deref()));
    let player = preferred_player(&config);

    if cli.is_cli_mode() {
        // CLI mode: execute command and exit
        let exit_code = run_cli(cli, config, client, player).await;
        std::process::exit(exit_code.into());
    }

    let route = match cli.initial_route() {
        Ok(route) => route,
        Err(e) => {
            let output = Output::new(&cli);
            let code = output.error(e.to_string(), ExitCode::InvalidArgs);
            std::process::exit(code.into());
        }
    };

    // TUI mode: launch interactive interface
    info!(backend = %client.base_url(), %route, "starting TUI");
    run_tui(route, client, player).await
}

/// Player from the config file, mpv if unset or unknown
fn preferred_player(config: &Config) -> PlayerType {
    match config.player.as_deref().map(str::parse::<PlayerType>) {
        Some(Ok(player)) => player,
        Some(Err(e)) => {
            warn!(error = %e, "ignoring configured player");
            PlayerType::default()
        }
        None => PlayerType::default(),
    }
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli, config: Config, client: CatalogClient, player: PlayerType) -> ExitCode {
    let output = Output::new(&cli);
    let config_path = cli.config.clone().or_else(Config::path);

    match cli.command {
        Some(Command::List(cmd)) => commands::list_cmd(cmd, &client, &output).await,

        Some(Command::Info(cmd)) => commands::info_cmd(cmd, &client, &output).await,

        Some(Command::Play(cmd)) => {
            let player = cmd.player.map(PlayerType::from).unwrap_or(player);
            commands::play_cmd(cmd, &client, player, &output).await
        }

        Some(Command::Config(cmd)) => {
            commands::config_cmd(cmd, config, config_path.as_deref(), &output)
        }

        Some(Command::Open(_)) | None => {
            // Handled by is_cli_mode check
            ExitCode::Success
        }
    }
}

// =============================================================================
// TUI Mode
// =============================================================================

/// Initialize the terminal for TUI mode
fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal state
fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run interactive TUI
async fn run_tui(route: Route, client: CatalogClient, player: PlayerType) -> Result<()> {
    let mut terminal = init_terminal()?;

    let mut app = App::with_route(route);
    let (mut loader, mut rx) = Loader::new(client, player);

    let result = run_event_loop(&mut terminal, &mut app, &mut loader, &mut rx).await;

    // Always restore terminal, even on error
    restore_terminal(&mut terminal)?;

    result
}

/// Main event loop - handles input, applies loader results, renders UI
async fn run_event_loop(
    terminal: &mut Tui,
    app: &mut App,
    loader: &mut Loader,
    rx: &mut UnboundedReceiver<Message>,
) -> Result<()> {
    const TICK_RATE: Duration = Duration::from_millis(100);

    let mut shown_title = String::new();

    while app.running {
        loader.run_all(app.take_effects());

        let width = terminal.size()?.width.saturating_sub(2);
        app.set_columns(ui::catalog::columns_for(width));

        terminal.draw(|frame| ui::render(frame, app))?;

        if app.window_title != shown_title {
            execute!(terminal.backend_mut(), SetTitle(&app.window_title))?;
            shown_title = app.window_title.clone();
        }

        // Poll for events with timeout so loader results are picked up
        if event::poll(TICK_RATE)? {
            if let Event::Key(key) = event::read()? {
                // Only handle key press events (ignore releases on Windows)
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        while let Ok(message) = rx.try_recv() {
            app.apply(message);
        }
    }

    Ok(())
}
