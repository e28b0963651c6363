//! Data structures for anistream
//!
//! Backend-owned value objects consumed read-only by the client:
//! - **Catalog**: titles returned by the list and detail endpoints
//! - **Episodes**: playable units belonging to a title
//!
//! Plus the pure helpers the views are built on (`select_current`,
//! `format_minutes`).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Brand label used for window titles and the header logo
pub const BRAND: &str = "Anime streaming";

// =============================================================================
// Loose identifiers
// =============================================================================

/// The backend is free to send identifiers and episode numbers as JSON
/// numbers or strings. Both normalise to the string form.
#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Catalog Models
// =============================================================================

/// One streamable series in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Title {
    /// Tags joined the way cards display them
    pub fn tags_line(&self) -> Option<String> {
        if self.tags.is_empty() {
            None
        } else {
            Some(self.tags.join(" • "))
        }
    }

    /// Window title for the player view, if this title has a name
    pub fn window_title(&self) -> Option<String> {
        if self.title.is_empty() {
            None
        } else {
            Some(format!("{} • {}", self.title, BRAND))
        }
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tags_line() {
            Some(tags) => write!(f, "{} [{}]", self.title, tags),
            None => write!(f, "{}", self.title),
        }
    }
}

// =============================================================================
// Episode Models
// =============================================================================

/// One playable unit belonging to a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    /// Ordering key, compared as a string against the `ep` parameter
    #[serde(deserialize_with = "string_or_number")]
    pub number: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Runtime in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    pub stream_url: String,
}

impl Episode {
    /// "Episode N" label
    pub fn label(&self) -> String {
        format!("Episode {}", self.number)
    }

    /// Formatted duration, `None` when the backend sent none
    pub fn duration_str(&self) -> Option<String> {
        format_minutes(self.duration)
    }
}

impl fmt::Display for Episode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())?;
        if let Some(ref title) = self.title {
            write!(f, ": {}", title)?;
        }
        if let Some(duration) = self.duration_str() {
            write!(f, " ({})", duration)?;
        }
        Ok(())
    }
}

/// Format a runtime in minutes. Zero is a value and renders as "0 min".
pub fn format_minutes(minutes: Option<u32>) -> Option<String> {
    minutes.map(|m| format!("{} min", m))
}

/// Pick the current episode: the one whose number equals `ep`, otherwise
/// the first episode, otherwise none.
pub fn select_current<'a>(episodes: &'a [Episode], ep: Option<&str>) -> Option<&'a Episode> {
    ep.and_then(|ep| episodes.iter().find(|e| e.number == ep))
        .or_else(|| episodes.first())
}
