use std::collections::BTreeMap;

use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::summary::baserunning::BaserunningPlay;
use crate::summary::box_score::InningTally;
use crate::summary::event::EventType;
use crate::summary::traits::Player;

/// Count of occurrences per player name.
pub type PlayerTally = BTreeMap<Player, u32>;

pub fn credit(tally: &mut PlayerTally, player: &str) {
    *tally.entry(player.to_owned()).or_default() += 1;
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display, EnumIter)]
pub enum BattingCategory {
    #[strum(serialize = "HR")]
    HomeRun,
    #[strum(serialize = "3B")]
    Triple,
    #[strum(serialize = "2B")]
    Double,
    #[strum(serialize = "1B")]
    Single,
    #[strum(serialize = "BB")]
    Walk,
    #[strum(serialize = "K")]
    Strikeout,
    #[strum(serialize = "SAC")]
    Sacrifice,
    #[strum(serialize = "GDP")]
    GroundedIntoDoublePlay,
    #[strum(serialize = "GTP")]
    GroundedIntoTriplePlay,
}

impl BattingCategory {
    /// Category credited to the batter for the plate appearance itself.
    /// Double and triple plays depend on more than the event type and are
    /// handled separately.
    pub const fn from_event_type(event_type: EventType) -> Option<Self> {
        match event_type {
            EventType::Single => Some(Self::Single),
            EventType::Double => Some(Self::Double),
            EventType::Triple => Some(Self::Triple),
            EventType::HomeRun => Some(Self::HomeRun),
            EventType::Strikeout => Some(Self::Strikeout),
            EventType::Walk => Some(Self::Walk),
            EventType::Sacrifice => Some(Self::Sacrifice),
            _ => None,
        }
    }

    /// Counting stats so routine that a single occurrence isn't worth listing.
    pub const fn is_routine(self) -> bool {
        matches!(self, Self::Single | Self::Strikeout | Self::Walk)
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display, EnumIter)]
pub enum PitchingCategory {
    #[strum(serialize = "K")]
    Strikeout,
    #[strum(serialize = "BB")]
    Walk,
    #[strum(serialize = "HBP")]
    HitByPitch,
}

impl PitchingCategory {
    pub const fn from_event_type(event_type: EventType) -> Option<Self> {
        match event_type {
            EventType::Strikeout => Some(Self::Strikeout),
            EventType::Walk => Some(Self::Walk),
            EventType::HitByPitch => Some(Self::HitByPitch),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Eq, PartialEq, Clone, Serialize)]
pub struct Fielding {
    #[serde(rename = "DP")]
    pub double_plays: u32,
    #[serde(rename = "TP")]
    pub triple_plays: u32,
}

#[derive(Debug, Default, Eq, PartialEq, Clone, Serialize)]
pub struct Batting {
    #[serde(rename = "H")]
    pub hits: InningTally,
    #[serde(rename = "1B")]
    pub singles: PlayerTally,
    #[serde(rename = "2B")]
    pub doubles: PlayerTally,
    #[serde(rename = "3B")]
    pub triples: PlayerTally,
    #[serde(rename = "HR")]
    pub home_runs: PlayerTally,
    #[serde(rename = "K")]
    pub strikeouts: PlayerTally,
    #[serde(rename = "BB")]
    pub walks: PlayerTally,
    #[serde(rename = "SAC")]
    pub sacrifices: PlayerTally,
    #[serde(rename = "GDP")]
    pub grounded_into_double_plays: PlayerTally,
    #[serde(rename = "GTP")]
    pub grounded_into_triple_plays: PlayerTally,
    #[serde(rename = "LOB")]
    pub left_on_base: i64,
    #[serde(rename = "RBI")]
    pub runs_batted_in: u32,
}

impl Batting {
    pub const fn tally(&self, category: BattingCategory) -> &PlayerTally {
        match category {
            BattingCategory::Single => &self.singles,
            BattingCategory::Double => &self.doubles,
            BattingCategory::Triple => &self.triples,
            BattingCategory::HomeRun => &self.home_runs,
            BattingCategory::Strikeout => &self.strikeouts,
            BattingCategory::Walk => &self.walks,
            BattingCategory::Sacrifice => &self.sacrifices,
            BattingCategory::GroundedIntoDoublePlay => &self.grounded_into_double_plays,
            BattingCategory::GroundedIntoTriplePlay => &self.grounded_into_triple_plays,
        }
    }

    pub fn tally_mut(&mut self, category: BattingCategory) -> &mut PlayerTally {
        match category {
            BattingCategory::Single => &mut self.singles,
            BattingCategory::Double => &mut self.doubles,
            BattingCategory::Triple => &mut self.triples,
            BattingCategory::HomeRun => &mut self.home_runs,
            BattingCategory::Strikeout => &mut self.strikeouts,
            BattingCategory::Walk => &mut self.walks,
            BattingCategory::Sacrifice => &mut self.sacrifices,
            BattingCategory::GroundedIntoDoublePlay => &mut self.grounded_into_double_plays,
            BattingCategory::GroundedIntoTriplePlay => &mut self.grounded_into_triple_plays,
        }
    }
}

#[derive(Debug, Default, Eq, PartialEq, Clone, Serialize)]
pub struct Baserunning {
    #[serde(rename = "SB")]
    pub stolen_bases: PlayerTally,
    #[serde(rename = "CS")]
    pub caught_stealing: PlayerTally,
}

impl Baserunning {
    pub fn tally_mut(&mut self, play: BaserunningPlay) -> &mut PlayerTally {
        match play {
            BaserunningPlay::StolenBase => &mut self.stolen_bases,
            BaserunningPlay::CaughtStealing => &mut self.caught_stealing,
        }
    }
}

/// Per-inning counts against a team's pitchers.
#[derive(Debug, Default, Eq, PartialEq, Clone, Serialize)]
pub struct Pitching {
    #[serde(rename = "K")]
    pub strikeouts: InningTally,
    #[serde(rename = "BB")]
    pub walks: InningTally,
    #[serde(rename = "HBP")]
    pub hit_by_pitch: InningTally,
}

impl Pitching {
    pub fn tally_mut(&mut self, category: PitchingCategory) -> &mut InningTally {
        match category {
            PitchingCategory::Strikeout => &mut self.strikeouts,
            PitchingCategory::Walk => &mut self.walks,
            PitchingCategory::HitByPitch => &mut self.hit_by_pitch,
        }
    }

    pub fn add_extra_inning(&mut self) {
        self.strikeouts.add_extra_inning();
        self.walks.add_extra_inning();
        self.hit_by_pitch.add_extra_inning();
    }
}

/// A team's section of the finished summary.
#[derive(Debug, Default, Eq, PartialEq, Clone, Serialize)]
pub struct TeamSummary {
    pub fielding: Fielding,
    pub batting: Batting,
    pub baserunning: Baserunning,
}

/// Everything tallied for a team while events are folded. Pitching is split off
/// into the winner/loser summary once the game is finished.
#[derive(Debug, Default, Eq, PartialEq, Clone, Serialize)]
pub struct TeamLedger {
    pub fielding: Fielding,
    pub batting: Batting,
    pub baserunning: Baserunning,
    pub pitching: Pitching,
}

impl TeamLedger {
    pub fn split(self) -> (TeamSummary, Pitching) {
        let Self {
            fielding,
            batting,
            baserunning,
            pitching,
        } = self;
        (
            TeamSummary {
                fielding,
                batting,
                baserunning,
            },
            pitching,
        )
    }
}
