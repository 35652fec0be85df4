use bounded_integer::BoundedU8;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Zero-based inning index, as it appears in the event feed.
pub type Inning = usize;
pub type Player = String;
pub type Pitcher = Player;

pub type Outs = BoundedU8<0, 3>;
pub type Bases = BoundedU8<0, 4>;

/// Name credited when a player cannot be identified.
pub const UNKNOWN_PLAYER: &str = "UNKNOWN";

/// Number of innings every game starts with before extras are added.
pub const REGULATION_INNINGS: usize = 9;

#[derive(
    Debug, Eq, PartialEq, Ord, PartialOrd, EnumString, Display, Hash, Copy, Clone, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    pub const fn flip(self) -> Self {
        match self {
            Self::Away => Self::Home,
            Self::Home => Self::Away,
        }
    }
}

#[derive(Debug, Eq, PartialEq, EnumString, Display, Hash, Copy, Clone, Serialize)]
#[strum(serialize_all = "lowercase")]
pub enum InningFrame {
    Top,
    Bottom,
}

impl InningFrame {
    pub const fn from_top_of_inning(top_of_inning: bool) -> Self {
        if top_of_inning {
            Self::Top
        } else {
            Self::Bottom
        }
    }

    /// The away team bats in the top of the inning, the home team in the bottom.
    pub const fn batting_side(self) -> Side {
        match self {
            Self::Top => Side::Away,
            Self::Bottom => Side::Home,
        }
    }

    pub const fn fielding_side(self) -> Side {
        self.batting_side().flip()
    }
}

#[derive(Debug, Default, Eq, PartialEq, Clone, Serialize)]
pub struct Matchup<T> {
    pub away: T,
    pub home: T,
}

impl<T> Matchup<T> {
    pub const fn new(away: T, home: T) -> Self {
        Self { away, home }
    }

    pub const fn get(&self, side: Side) -> &T {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Away, &self.away), (Side::Home, &self.home)].into_iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        [&mut self.away, &mut self.home].into_iter()
    }
}
