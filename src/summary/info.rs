use std::collections::HashMap;
use std::convert::TryFrom;
use std::fs;
use std::path::Path;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::warn;

use crate::summary::error::SummaryError;
use crate::summary::traits::{Pitcher, Side};

const BUILTIN_STADIUMS: &str = include_str!("../../data/stadiums.json");

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, TryFromPrimitive, IntoPrimitive, Display)]
#[repr(u8)]
pub enum Weather {
    Void = 0,
    Sunny,
    Overcast,
    Rainy,
    Sandstorm,
    Snowy,
    Acidic,
    #[strum(serialize = "Solar Eclipse")]
    SolarEclipse,
    Glitter,
    Blooddrain,
    Peanuts,
    #[strum(serialize = "Lots of Birds")]
    LotsOfBirds,
    Feedback,
    Reverb,
    #[strum(serialize = "Black Hole")]
    BlackHole,
    Coffee,
    #[strum(serialize = "Coffee 2")]
    Coffee2,
    #[strum(serialize = "Coffee 3s")]
    Coffee3s,
    Flooding,
    Salmon,
}

impl Weather {
    pub fn from_code(code: i64) -> Result<Self, SummaryError> {
        u8::try_from(code)
            .ok()
            .and_then(|c| Self::try_from(c).ok())
            .ok_or(SummaryError::UnknownWeather(code))
    }
}

/// Game record as served by the game endpoint, reduced to the fields used here.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadata {
    #[serde(default)]
    pub id: Option<String>,
    pub away_team_name: String,
    pub away_team_nickname: String,
    #[serde(default)]
    pub away_pitcher_name: Option<Pitcher>,
    pub away_score: f64,
    pub home_team_name: String,
    pub home_team_nickname: String,
    #[serde(default)]
    pub home_pitcher_name: Option<Pitcher>,
    pub home_score: f64,
    pub season: u32,
    pub day: u32,
    pub weather: i64,
    #[serde(default)]
    pub is_postseason: bool,
    #[serde(default)]
    pub series_index: Option<u32>,
    #[serde(default)]
    pub series_length: Option<u32>,
}

impl GameMetadata {
    pub fn game_id(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    /// `None` when the game ended tied.
    pub fn winner(&self) -> Option<Side> {
        if self.home_score > self.away_score {
            Some(Side::Home)
        } else if self.away_score > self.home_score {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn winner_or_tie(&self) -> Result<Side, SummaryError> {
        self.winner().ok_or_else(|| SummaryError::TieGame {
            game_id: self.game_id().to_owned(),
            away_score: self.away_score,
            home_score: self.home_score,
        })
    }

    pub fn pitcher_name(&self, side: Side) -> Option<&Pitcher> {
        match side {
            Side::Away => self.away_pitcher_name.as_ref(),
            Side::Home => self.home_pitcher_name.as_ref(),
        }
    }
}

/// Team nickname to stadium.
#[derive(Debug, Default, Eq, PartialEq, Clone, Deserialize)]
#[serde(transparent)]
pub struct StadiumTable(HashMap<String, String>);

impl StadiumTable {
    pub fn builtin() -> Result<Self, SummaryError> {
        Ok(serde_json::from_str(BUILTIN_STADIUMS)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SummaryError> {
        let text = fs::read_to_string(path).map_err(|source| SummaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Looks up by nickname, or by a full team name ending in a known nickname.
    /// The longest matching nickname wins.
    pub fn stadium(&self, team: &str) -> Option<&str> {
        self.0
            .get(team)
            .or_else(|| {
                self.0
                    .iter()
                    .filter(|(nickname, _)| team.ends_with(&format!(" {nickname}")))
                    .max_by_key(|(nickname, _)| nickname.len())
                    .map(|(_, stadium)| stadium)
            })
            .map(String::as_str)
    }
}

impl FromIterator<(String, String)> for StadiumTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Header section of the summary. Season and day are one-indexed here.
#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
    pub season: u32,
    pub day: u32,
    pub home_team_nickname: String,
    pub away_team_nickname: String,
    pub home_team_name: String,
    pub away_team_name: String,
    pub stadium: Option<String>,
    pub weather: String,
    pub is_postseason: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_index: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series_length: Option<u32>,
}

impl GameInfo {
    pub fn new(metadata: &GameMetadata, stadiums: &StadiumTable) -> Result<Self, SummaryError> {
        let weather = Weather::from_code(metadata.weather)?;
        let stadium = stadiums.stadium(&metadata.home_team_nickname).map(str::to_owned);
        if stadium.is_none() {
            warn!("No stadium known for {}", metadata.home_team_nickname);
        }
        Ok(Self {
            game_id: metadata.id.clone(),
            season: metadata.season + 1,
            day: metadata.day + 1,
            home_team_nickname: metadata.home_team_nickname.clone(),
            away_team_nickname: metadata.away_team_nickname.clone(),
            home_team_name: metadata.home_team_name.clone(),
            away_team_name: metadata.away_team_name.clone(),
            stadium,
            weather: weather.to_string(),
            is_postseason: metadata.is_postseason,
            series_index: metadata.series_index,
            series_length: metadata.series_length,
        })
    }

    pub fn nickname(&self, side: Side) -> &str {
        match side {
            Side::Away => &self.away_team_nickname,
            Side::Home => &self.home_team_nickname,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn metadata(home_score: f64, away_score: f64) -> GameMetadata {
        serde_json::from_value(json!({
            "id": "game-1",
            "awayTeamName": "Hellmouth Sunbeams",
            "awayTeamNickname": "Sunbeams",
            "awayPitcherName": "Away Pitcher",
            "awayScore": away_score,
            "homeTeamName": "Mexico City Wild Wings",
            "homeTeamNickname": "Wild Wings",
            "homePitcherName": "Home Pitcher",
            "homeScore": home_score,
            "season": 3,
            "day": 19,
            "weather": 10,
            "isPostseason": false
        }))
        .unwrap()
    }

    #[test]
    fn weather_codes_map_to_labels() {
        assert_eq!(Weather::from_code(10).unwrap().to_string(), "Peanuts");
        assert_eq!(Weather::from_code(11).unwrap().to_string(), "Lots of Birds");
        assert_eq!(Weather::from_code(9).unwrap(), Weather::Blooddrain);
        assert!(matches!(
            Weather::from_code(99),
            Err(SummaryError::UnknownWeather(99))
        ));
        assert!(matches!(
            Weather::from_code(-1),
            Err(SummaryError::UnknownWeather(-1))
        ));
    }

    #[test]
    fn winner_follows_final_score() {
        assert_eq!(metadata(4.0, 2.0).winner(), Some(Side::Home));
        assert_eq!(metadata(1.0, 2.0).winner(), Some(Side::Away));
        assert_eq!(metadata(3.0, 3.0).winner(), None);
        assert!(metadata(3.0, 3.0).winner_or_tie().unwrap_err().is_tie_game());
    }

    #[test]
    fn info_is_one_indexed() {
        let stadiums: StadiumTable = [("Wild Wings".to_owned(), "The Bucket".to_owned())]
            .into_iter()
            .collect();
        let info = GameInfo::new(&metadata(4.0, 2.0), &stadiums).unwrap();
        assert_eq!(info.season, 4);
        assert_eq!(info.day, 20);
        assert_eq!(info.stadium.as_deref(), Some("The Bucket"));
        assert_eq!(info.weather, "Peanuts");
        assert_eq!(info.nickname(Side::Away), "Sunbeams");
    }

    #[test]
    fn stadium_lookup_accepts_full_team_name() {
        let stadiums: StadiumTable = [("Wild Wings".to_owned(), "The Bucket".to_owned())]
            .into_iter()
            .collect();
        assert_eq!(stadiums.stadium("Wild Wings"), Some("The Bucket"));
        assert_eq!(stadiums.stadium("Mexico City Wild Wings"), Some("The Bucket"));
        assert_eq!(stadiums.stadium("Sunbeams"), None);
    }

    #[test]
    fn longest_nickname_suffix_wins() {
        // Fresh tables get fresh hash seeds, so iteration order varies
        for _ in 0..16 {
            let stadiums: StadiumTable = [
                ("Talkers".to_owned(), "Short".to_owned()),
                ("Moist Talkers".to_owned(), "Long".to_owned()),
            ]
            .into_iter()
            .collect();
            assert_eq!(stadiums.stadium("Canada Moist Talkers"), Some("Long"));
        }
    }

    #[test]
    fn builtin_stadiums_cover_the_league() {
        let stadiums = StadiumTable::builtin().unwrap();
        for nickname in [
            "Fridays", "Moist Talkers", "Lovers", "Jazz Hands", "Sunbeams", "Tigers",
            "Wild Wings", "Flowers", "Millennials", "Pies", "Garages", "Dale", "Lift",
            "Firefighters", "Steaks", "Magic", "Breath Mints", "Spies", "Shoe Thieves",
            "Tacos", "Georgias", "Worms", "Crabs", "Mechanics",
        ] {
            assert!(stadiums.stadium(nickname).is_some(), "no stadium for {nickname}");
        }
        for (team, home) in [
            ("Tigers", "Hades"),
            ("Hades Tigers", "Hades"),
            ("Pies", "Philly"),
            ("Crabs", "Baltimore"),
            ("San Francisco Lovers", "San Francisco"),
            ("Firefighters", "Chicago"),
            ("Canada Moist Talkers", "Canada"),
            ("Mexico City Wild Wings", "Mexico City"),
        ] {
            let stadium = stadiums.stadium(team);
            assert!(
                stadium.map_or(false, |s| s.ends_with(home)),
                "no stadium for {team}: {stadium:?}"
            );
        }
    }
}
