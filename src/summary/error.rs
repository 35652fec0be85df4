use std::path::PathBuf;

use thiserror::Error;

use crate::summary::traits::{Inning, InningFrame};

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Game {game_id} ended in a tie ({away_score}-{home_score}), no winner or loser to credit")]
    TieGame {
        game_id: String,
        away_score: f64,
        home_score: f64,
    },

    #[error("Could not mark {frame} of inning {inning}: only {tracked} half-innings tracked")]
    HalfInningIndex {
        inning: Inning,
        frame: InningFrame,
        tracked: usize,
    },

    #[error("No column for inning {inning} ({columns} innings tracked)")]
    InningOutOfRange { inning: Inning, columns: usize },

    #[error("Unknown weather {0}")]
    UnknownWeather(i64),

    #[error("No matching games found for game id {0}")]
    NoMatchingGames(String),

    #[error("No events found for game id {0}")]
    NoEvents(String),

    #[error("No matching entity for id {0}")]
    NoMatchingEntity(String),

    #[error("API error for {url}: status {status}")]
    Api { url: String, status: u16 },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SummaryError {
    pub const fn is_tie_game(&self) -> bool {
        matches!(self, Self::TieGame { .. })
    }
}
