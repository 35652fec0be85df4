use serde::Serialize;

use crate::summary::box_score::{BoxScore, InningTally, LineScore};
use crate::summary::info::{GameInfo, GameMetadata};
use crate::summary::team::{Pitching, TeamSummary};
use crate::summary::traits::{Matchup, Pitcher, Side};

/// Pitching tallies relabelled from home/away to winner/loser.
#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct PitchingSummary {
    #[serde(rename = "WP")]
    pub winning_pitcher: Option<Pitcher>,
    #[serde(rename = "WP-K")]
    pub winner_strikeouts: InningTally,
    #[serde(rename = "WP-BB")]
    pub winner_walks: InningTally,
    #[serde(rename = "WP-HBP")]
    pub winner_hit_by_pitch: InningTally,
    #[serde(rename = "LP")]
    pub losing_pitcher: Option<Pitcher>,
    #[serde(rename = "LP-K")]
    pub loser_strikeouts: InningTally,
    #[serde(rename = "LP-BB")]
    pub loser_walks: InningTally,
    #[serde(rename = "LP-HBP")]
    pub loser_hit_by_pitch: InningTally,
}

impl PitchingSummary {
    pub fn new(winner: Side, pitching: Matchup<Pitching>, metadata: &GameMetadata) -> Self {
        let loser = winner.flip();
        let (won, lost) = match winner {
            Side::Home => (pitching.home, pitching.away),
            Side::Away => (pitching.away, pitching.home),
        };
        Self {
            winning_pitcher: metadata.pitcher_name(winner).cloned(),
            winner_strikeouts: won.strikeouts,
            winner_walks: won.walks,
            winner_hit_by_pitch: won.hit_by_pitch,
            losing_pitcher: metadata.pitcher_name(loser).cloned(),
            loser_strikeouts: lost.strikeouts,
            loser_walks: lost.walks,
            loser_hit_by_pitch: lost.hit_by_pitch,
        }
    }
}

/// The finished summary of one game. Built once by
/// [`SummaryAccumulator::finalize`](crate::summary::accumulator::SummaryAccumulator::finalize)
/// and only read afterwards.
#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
pub struct GameSummary {
    pub info: GameInfo,
    pub box_score: BoxScore,
    pub line_score: LineScore,
    pub pitching_summary: PitchingSummary,
    pub game_summary: Matchup<TeamSummary>,
    pub weather_events: Vec<String>,
}

impl GameSummary {
    pub fn innings(&self) -> usize {
        self.line_score.away.innings()
    }
}
