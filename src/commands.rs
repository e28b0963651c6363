//! CLI Command Handlers
//!
//! Implements the CLI commands against the catalog backend and the local
//! player. Each handler takes CLI args and Output, returns ExitCode.

use std::path::Path;

use serde::Serialize;
use url::Url;

use anistream::api::{CatalogClient, CatalogError};
use anistream::cli::{ConfigCmd, ExitCode, InfoCmd, ListCmd, Output, PlayCmd, PlayResponse};
use anistream::config::Config;
use anistream::models::{select_current, Episode, Title};
use anistream::stream::{LocalPlayer, PlayerType};

/// Map a catalog failure to its exit code
fn catalog_exit(e: &CatalogError) -> ExitCode {
    match e {
        CatalogError::NotFound => ExitCode::NotFound,
        CatalogError::Server(_) | CatalogError::Request(_) => ExitCode::NetworkError,
        CatalogError::InvalidResponse(_) | CatalogError::Cancelled => ExitCode::Error,
    }
}

// =============================================================================
// List Command
// =============================================================================

pub async fn list_cmd(cmd: ListCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    let query = cmd.query.unwrap_or_default();
    if query.is_empty() {
        output.info(format!("Fetching catalog from {}", client.base_url()));
    } else {
        output.info(format!("Searching for: {}", query));
    }

    match client.list_titles(&query).await {
        Ok(mut titles) => {
            titles.truncate(cmd.limit);

            if output.json {
                if let Err(e) = output.print(&titles) {
                    return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
                }
            } else if titles.is_empty() {
                output.info("No titles found");
            } else {
                for title in &titles {
                    match title.tags_line() {
                        Some(tags) => println!("{:>6}  {}  ({})", title.id, title.title, tags),
                        None => println!("{:>6}  {}", title.id, title.title),
                    }
                }
            }
            ExitCode::Success
        }
        Err(e) => output.error(format!("Catalog fetch failed: {}", e), catalog_exit(&e)),
    }
}

// =============================================================================
// Info Command
// =============================================================================

/// Title details with the episode the `ep` parameter resolves to
#[derive(Debug, Serialize)]
struct InfoResponse<'a> {
    title: &'a Title,
    episodes: &'a [Episode],
    #[serde(skip_serializing_if = "Option::is_none")]
    current: Option<&'a Episode>,
}

pub async fn info_cmd(cmd: InfoCmd, client: &CatalogClient, output: &Output) -> ExitCode {
    output.info(format!("Getting info for: {}", cmd.id));

    let (title, episodes) = match client.title_with_episodes(&cmd.id).await {
        Ok(loaded) => loaded,
        Err(e) => return output.error(format!("Info fetch failed: {}", e), catalog_exit(&e)),
    };
    let current = select_current(&episodes, cmd.ep.as_deref());

    if output.json {
        let response = InfoResponse {
            title: &title,
            episodes: &episodes,
            current,
        };
        if let Err(e) = output.print(&response) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
        return ExitCode::Success;
    }

    println!("{}", title.title);
    if let Some(tags) = title.tags_line() {
        println!("{}", tags);
    }
    if let Some(ref description) = title.description {
        println!();
        println!("{}", description);
    }
    println!();
    println!("Episodes ({})", episodes.len());
    for episode in &episodes {
        let marker = match current {
            Some(c) if c.number == episode.number => "▶",
            _ => " ",
        };
        println!("{} {}", marker, episode);
    }

    ExitCode::Success
}

// =============================================================================
// Play Command
// =============================================================================

pub async fn play_cmd(
    cmd: PlayCmd,
    client: &CatalogClient,
    player_type: PlayerType,
    output: &Output,
) -> ExitCode {
    let (title, episodes) = match client.title_with_episodes(&cmd.id).await {
        Ok(loaded) => loaded,
        Err(e) => return output.error(format!("Info fetch failed: {}", e), catalog_exit(&e)),
    };

    let Some(episode) = select_current(&episodes, cmd.ep.as_deref()) else {
        return output.error(
            format!("'{}' has no episodes", title.title),
            ExitCode::NoEpisodes,
        );
    };

    let player = LocalPlayer::new(player_type);
    if !player.is_available().await {
        return output.error(
            format!(
                "{} not found. Install it or pick another with --player",
                player_type.display_name()
            ),
            ExitCode::Error,
        );
    }

    let label = format!("{} - {}", title.title, episode.label());
    output.info(format!("▶ Playing {} in {}", label, player_type.display_name()));

    if let Err(e) = player.play(&episode.stream_url, Some(&label)).await {
        return output.error(e.to_string(), ExitCode::Error);
    }

    if output.json {
        let response = PlayResponse {
            status: "playing".into(),
            player: player_type.to_string(),
            title: title.title.clone(),
            episode: episode.number.clone(),
            stream_url: episode.stream_url.clone(),
        };
        if let Err(e) = output.print(&response) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
    }

    ExitCode::Success
}

// =============================================================================
// Config Command
// =============================================================================

/// Saved settings and the file they live in
#[derive(Debug, Serialize)]
struct ConfigResponse<'a> {
    path: Option<String>,
    #[serde(flatten)]
    config: &'a Config,
}

pub fn config_cmd(
    cmd: ConfigCmd,
    mut config: Config,
    path: Option<&Path>,
    output: &Output,
) -> ExitCode {
    if cmd.has_changes() {
        let Some(path) = path else {
            return output.error(
                "Could not determine config path, pass --config",
                ExitCode::Error,
            );
        };

        if let Some(raw) = cmd.set_backend_url {
            let backend_url = raw.trim().trim_end_matches('/');
            if let Err(e) = Url::parse(backend_url) {
                return output.error(
                    format!("Invalid backend URL '{}': {}", backend_url, e),
                    ExitCode::InvalidArgs,
                );
            }
            config.backend_url = Some(backend_url.to_string());
        }
        if let Some(player) = cmd.set_player {
            config.player = Some(player.as_str().to_string());
        }

        if let Err(e) = config.save_to(path) {
            return output.error(format!("Failed to save config: {}", e), ExitCode::Error);
        }
        tracing::info!(path = %path.display(), "config saved");
        output.info(format!("Saved {}", path.display()));
    }

    if output.json {
        let response = ConfigResponse {
            path: path.map(|p| p.display().to_string()),
            config: &config,
        };
        if let Err(e) = output.print(&response) {
            return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
        }
        return ExitCode::Success;
    }

    let path = path.map(|p| p.display().to_string());
    println!("path         {}", path.as_deref().unwrap_or("(none)"));
    println!(
        "backend_url  {}",
        config.backend_url.as_deref().unwrap_or("(unset)")
    );
    println!("player       {}", config.player.as_deref().unwrap_or("(unset)"));

    ExitCode::Success
}
