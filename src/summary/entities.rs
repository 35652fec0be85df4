use std::collections::HashMap;
use std::fs;
use std::path::Path;

use const_format::concatcp;
use quick_cache::sync::Cache;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::summary::error::SummaryError;
use crate::summary::traits::Player;

pub(crate) const BLASEBALL_DATABASE: &str = "https://www.blaseball.com/database";
const PLAYER_ENDPOINT: &str = concatcp!(BLASEBALL_DATABASE, "/players?ids=");
const PLAYER_CACHE_CAPACITY: usize = 64;

/// Maps opaque player ids to display names.
pub trait EntityLookup: Send + Sync {
    /// `Ok(None)` means the player is unknown, which is tolerated. Errors are
    /// reserved for a lookup service that answered with something unusable.
    fn player_name(&self, player_id: &str) -> Result<Option<Player>, SummaryError>;
}

/// Fixed id-to-name table, e.g. loaded from a saved roster file.
#[derive(Debug, Default, Eq, PartialEq, Clone, Deserialize)]
#[serde(transparent)]
pub struct RosterLookup(HashMap<String, Player>);

impl RosterLookup {
    pub fn from_path(path: &Path) -> Result<Self, SummaryError> {
        let text = fs::read_to_string(path).map_err(|source| SummaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Player)> for RosterLookup {
    fn from_iter<I: IntoIterator<Item = (String, Player)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl EntityLookup for RosterLookup {
    fn player_name(&self, player_id: &str) -> Result<Option<Player>, SummaryError> {
        Ok(self.0.get(player_id).cloned())
    }
}

#[derive(Debug, Deserialize)]
struct PlayerRecord {
    name: Player,
}

/// Player names from the public database API. Answers, including "unknown",
/// are cached across games since the same rosters come up repeatedly.
pub struct HttpEntityLookup {
    client: Client,
    cache: Cache<String, Option<Player>>,
}

impl HttpEntityLookup {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            cache: Cache::new(PLAYER_CACHE_CAPACITY),
        }
    }

    fn fetch(&self, player_id: &str) -> Result<Option<Player>, SummaryError> {
        let url = format!("{PLAYER_ENDPOINT}{player_id}");
        debug!("Fetching player {}", url);
        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            warn!("Player lookup for {} returned {}", player_id, response.status());
            return Ok(None);
        }
        let players: Vec<PlayerRecord> = response
            .json()
            .map_err(|_| SummaryError::NoMatchingEntity(player_id.to_owned()))?;
        players
            .into_iter()
            .next()
            .map(|p| Some(p.name))
            .ok_or_else(|| SummaryError::NoMatchingEntity(player_id.to_owned()))
    }
}

impl EntityLookup for HttpEntityLookup {
    fn player_name(&self, player_id: &str) -> Result<Option<Player>, SummaryError> {
        if let Some(cached) = self.cache.get(player_id) {
            return Ok(cached);
        }
        let name = self.fetch(player_id)?;
        self.cache.insert(player_id.to_owned(), name.clone());
        Ok(name)
    }
}
