use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use const_format::concatcp;
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::summary::entities::BLASEBALL_DATABASE;
use crate::summary::error::SummaryError;
use crate::summary::event::{Event, EventPayload};
use crate::summary::info::GameMetadata;

const GAME_ENDPOINT: &str = concatcp!(BLASEBALL_DATABASE, "/gameById/");
const EVENTS_ENDPOINT: &str = "https://api.blaseball-reference.com/v1/events?gameId=";

const GAME_FILE_SUFFIX: &str = ".game.json";
const EVENTS_FILE_SUFFIX: &str = ".events.json";

/// Where game metadata and play-by-play events come from.
pub trait GameSource: Send + Sync {
    fn game(&self, game_id: &str) -> Result<GameMetadata, SummaryError>;

    /// Events in feed order. Never empty.
    fn events(&self, game_id: &str) -> Result<Vec<Event>, SummaryError>;
}

/// Game ids are not always echoed back in the payload.
fn with_game_id(mut metadata: GameMetadata, game_id: &str) -> GameMetadata {
    if metadata.id.is_none() {
        metadata.id = Some(game_id.to_owned());
    }
    metadata
}

fn non_empty(events: Vec<Event>, game_id: &str) -> Result<Vec<Event>, SummaryError> {
    if events.is_empty() {
        Err(SummaryError::NoEvents(game_id.to_owned()))
    } else {
        Ok(events)
    }
}

/// Live data from the public game and event APIs.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    fn get(&self, url: &str) -> Result<Response, SummaryError> {
        debug!("Fetching {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(SummaryError::Api {
                url: url.to_owned(),
                status: status.as_u16(),
            })
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, game_id: &str) -> Result<T, SummaryError> {
        self.get(url)?
            .json()
            .map_err(|_| SummaryError::NoMatchingGames(game_id.to_owned()))
    }
}

impl GameSource for HttpSource {
    fn game(&self, game_id: &str) -> Result<GameMetadata, SummaryError> {
        let metadata = self.get_json(&format!("{GAME_ENDPOINT}{game_id}"), game_id)?;
        Ok(with_game_id(metadata, game_id))
    }

    fn events(&self, game_id: &str) -> Result<Vec<Event>, SummaryError> {
        let payload: EventPayload =
            self.get_json(&format!("{EVENTS_ENDPOINT}{game_id}"), game_id)?;
        non_empty(payload.into_events(), game_id)
    }
}

/// Saved payloads in a directory, as `<id>.game.json` and `<id>.events.json`.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn game_path(&self, game_id: &str) -> PathBuf {
        self.dir.join(format!("{game_id}{GAME_FILE_SUFFIX}"))
    }

    pub fn events_path(&self, game_id: &str) -> PathBuf {
        self.dir.join(format!("{game_id}{EVENTS_FILE_SUFFIX}"))
    }

    /// `Ok(None)` if the file doesn't exist.
    fn read(path: &Path) -> Result<Option<String>, SummaryError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SummaryError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl GameSource for FileSource {
    fn game(&self, game_id: &str) -> Result<GameMetadata, SummaryError> {
        let path = self.game_path(game_id);
        debug!("Reading game from {:?}", path);
        let text = Self::read(&path)?
            .ok_or_else(|| SummaryError::NoMatchingGames(game_id.to_owned()))?;
        Ok(with_game_id(serde_json::from_str(&text)?, game_id))
    }

    fn events(&self, game_id: &str) -> Result<Vec<Event>, SummaryError> {
        let path = self.events_path(game_id);
        debug!("Reading events from {:?}", path);
        let text =
            Self::read(&path)?.ok_or_else(|| SummaryError::NoEvents(game_id.to_owned()))?;
        let payload: EventPayload = serde_json::from_str(&text)?;
        non_empty(payload.into_events(), game_id)
    }
}
