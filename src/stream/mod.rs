//! Playback
//!
//! - Player: hands episode streams to VLC or mpv

pub mod player;

pub use player::{LocalPlayer, PlayerError, PlayerType};
