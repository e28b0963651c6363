//! Client-side routes
//!
//! Two views, addressed with web-style paths:
//! - `/` catalog
//! - `/anime/{animeId}?ep=N` player, `ep` optional

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Route parse errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("Unknown route: {0}")]
    Unknown(String),
    #[error("Missing title id in route: {0}")]
    MissingId(String),
}

/// A location in the app
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    /// Catalog view
    #[default]
    Catalog,
    /// Player view for one title
    Player {
        anime_id: String,
        /// Raw `ep` query parameter
        ep: Option<String>,
    },
}

impl Route {
    /// Player route without an episode parameter
    pub fn player(anime_id: impl Into<String>) -> Self {
        Route::Player {
            anime_id: anime_id.into(),
            ep: None,
        }
    }

    /// Title id for player routes
    pub fn anime_id(&self) -> Option<&str> {
        match self {
            Route::Catalog => None,
            Route::Player { anime_id, .. } => Some(anime_id),
        }
    }

    /// Same route with a different `ep` parameter (a `?ep=N` link)
    pub fn with_ep(&self, ep: impl Into<String>) -> Self {
        match self {
            Route::Catalog => Route::Catalog,
            Route::Player { anime_id, .. } => Route::Player {
                anime_id: anime_id.clone(),
                ep: Some(ep.into()),
            },
        }
    }
}

/// Find the value of `key` in a query string, form-decoded
fn query_param(query: &str, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (path, query) = match s.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (s, None),
        };

        let segments: Vec<&str> = path.split('/').filter(|seg| !seg.is_empty()).collect();

        match segments.as_slice() {
            [] => Ok(Route::Catalog),
            ["anime"] => Err(RouteError::MissingId(s.to_string())),
            ["anime", id] => {
                let anime_id = urlencoding::decode(id)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| id.to_string());
                Ok(Route::Player {
                    anime_id,
                    ep: query.and_then(|q| query_param(q, "ep")),
                })
            }
            _ => Err(RouteError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Catalog => write!(f, "/"),
            Route::Player { anime_id, ep } => {
                write!(f, "/anime/{}", urlencoding::encode(anime_id))?;
                if let Some(ep) = ep {
                    write!(f, "?ep={}", urlencoding::encode(ep))?;
                }
                Ok(())
            }
        }
    }
}
