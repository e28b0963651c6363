//! Background effect runner
//!
//! Executes [`Effect`]s queued by the app on tokio tasks and reports back
//! over an unbounded channel. Each view has at most one live request: a new
//! fetch cancels the previous token, and a cancelled fetch reports nothing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::CatalogClient;
use crate::app::{Effect, Message};
use crate::stream::{LocalPlayer, PlayerType};

/// Runs app effects against the backend and the local player
pub struct Loader {
    client: Arc<CatalogClient>,
    player: PlayerType,
    tx: mpsc::UnboundedSender<Message>,
    catalog_token: Option<CancellationToken>,
    player_token: Option<CancellationToken>,
}

impl Loader {
    /// Create a loader and the receiving end of its message channel
    pub fn new(
        client: CatalogClient,
        player: PlayerType,
    ) -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = Self {
            client: Arc::new(client),
            player,
            tx,
            catalog_token: None,
            player_token: None,
        };
        (loader, rx)
    }

    /// Cancel the previous token in `slot` and install a fresh one
    fn supersede(slot: &mut Option<CancellationToken>) -> CancellationToken {
        if let Some(old) = slot.take() {
            old.cancel();
        }
        let token = CancellationToken::new();
        *slot = Some(token.clone());
        token
    }

    fn cancel(slot: &mut Option<CancellationToken>) {
        if let Some(token) = slot.take() {
            token.cancel();
        }
    }

    /// Run every effect in order
    pub fn run_all(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            self.run(effect);
        }
    }

    /// Run one effect. Must be called from within a tokio runtime.
    pub fn run(&mut self, effect: Effect) {
        match effect {
            Effect::FetchCatalog { request_id, query } => {
                let token = Self::supersede(&mut self.catalog_token);
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                debug!(request_id, %query, "fetching catalog");

                tokio::spawn(async move {
                    let result = client.list_titles_cancellable(&query, &token).await;
                    if matches!(&result, Err(e) if e.is_cancelled()) {
                        debug!(request_id, "catalog fetch cancelled");
                        return;
                    }
                    let _ = tx.send(Message::CatalogLoaded { request_id, result });
                });
            }
            Effect::FetchPlayer {
                request_id,
                anime_id,
            } => {
                let token = Self::supersede(&mut self.player_token);
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                debug!(request_id, %anime_id, "fetching title and episodes");

                tokio::spawn(async move {
                    let result = client
                        .title_with_episodes_cancellable(&anime_id, &token)
                        .await;
                    if matches!(&result, Err(e) if e.is_cancelled()) {
                        debug!(request_id, "player fetch cancelled");
                        return;
                    }
                    let _ = tx.send(Message::PlayerLoaded { request_id, result });
                });
            }
            Effect::CancelCatalog => Self::cancel(&mut self.catalog_token),
            Effect::CancelPlayer => Self::cancel(&mut self.player_token),
            Effect::Play { stream_url, label } => {
                let player = LocalPlayer::new(self.player);
                let tx = self.tx.clone();
                info!(%label, player = %self.player, "starting local playback");

                tokio::spawn(async move {
                    let message = match player.play(&stream_url, Some(&label)).await {
                        Ok(_child) => Message::PlaybackStarted {
                            player: player.player_type().to_string(),
                        },
                        Err(e) => Message::PlaybackFailed(e.to_string()),
                    };
                    let _ = tx.send(message);
                });
            }
        }
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        Self::cancel(&mut self.catalog_token);
        Self::cancel(&mut self.player_token);
    }
}
