use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use strum_macros::Display;
use tracing::warn;

use crate::summary::event::EventType;
use crate::summary::traits::{Player, UNKNOWN_PLAYER};

lazy_static! {
    static ref STOLEN_BASE_REGEX: Regex = Regex::new(r"^(?P<runner>.*) (?:stole|steals)").unwrap();
    static ref CAUGHT_STEALING_REGEX: Regex =
        Regex::new(r"^(?P<runner>.*) gets caught stealing").unwrap();
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, Display, Serialize)]
pub enum BaserunningPlay {
    #[strum(serialize = "SB")]
    StolenBase,
    #[strum(serialize = "CS")]
    CaughtStealing,
}

impl BaserunningPlay {
    pub const fn from_event_type(event_type: EventType) -> Option<Self> {
        match event_type {
            EventType::StolenBase => Some(Self::StolenBase),
            EventType::CaughtStealing => Some(Self::CaughtStealing),
            _ => None,
        }
    }

    fn pattern(self) -> &'static Regex {
        match self {
            Self::StolenBase => &STOLEN_BASE_REGEX,
            Self::CaughtStealing => &CAUGHT_STEALING_REGEX,
        }
    }
}

/// Stolen base and caught stealing events only identify the batter, so the
/// runner has to be recovered from the narration.
pub trait RunnerNameMatcher: Send + Sync {
    fn runner_name(&self, play: BaserunningPlay, narration: &[String]) -> Option<Player>;

    /// Falls back to [`UNKNOWN_PLAYER`] when no narration line names a runner.
    fn runner_name_or_unknown(&self, play: BaserunningPlay, narration: &[String]) -> Player {
        self.runner_name(play, narration).unwrap_or_else(|| {
            warn!(
                "Could not find runner for {} event in narration:\n{}",
                play,
                narration.join("\n")
            );
            UNKNOWN_PLAYER.to_owned()
        })
    }
}

/// Matches the text leading up to "stole"/"steals" or "gets caught stealing".
#[derive(Debug, Default, Clone, Copy)]
pub struct NarrationMatcher;

impl RunnerNameMatcher for NarrationMatcher {
    fn runner_name(&self, play: BaserunningPlay, narration: &[String]) -> Option<Player> {
        narration.iter().find_map(|line| {
            play.pattern()
                .captures(line)
                .and_then(|c| c.name("runner"))
                .map(|m| m.as_str().to_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &[&str]) -> Vec<String> {
        text.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn finds_stolen_base_runner() {
        let narration = lines(&["Sam Ford steals second base!"]);
        assert_eq!(
            NarrationMatcher.runner_name(BaserunningPlay::StolenBase, &narration),
            Some("Sam Ford".to_owned())
        );
        let narration = lines(&["Strike, looking. 1-1", "Nagomi Mcdaniel stole third base!"]);
        assert_eq!(
            NarrationMatcher.runner_name(BaserunningPlay::StolenBase, &narration),
            Some("Nagomi Mcdaniel".to_owned())
        );
    }

    #[test]
    fn finds_caught_stealing_runner() {
        let narration = lines(&["Sam Ford gets caught stealing second base."]);
        assert_eq!(
            NarrationMatcher.runner_name(BaserunningPlay::CaughtStealing, &narration),
            Some("Sam Ford".to_owned())
        );
    }

    #[test]
    fn unmatched_narration_falls_back_to_unknown() {
        let narration = lines(&["Something strange happened."]);
        assert_eq!(
            NarrationMatcher.runner_name(BaserunningPlay::CaughtStealing, &narration),
            None
        );
        assert_eq!(
            NarrationMatcher.runner_name_or_unknown(BaserunningPlay::StolenBase, &narration),
            UNKNOWN_PLAYER
        );
    }

    #[test]
    fn only_steal_events_are_baserunning_plays() {
        assert_eq!(
            BaserunningPlay::from_event_type(EventType::StolenBase),
            Some(BaserunningPlay::StolenBase)
        );
        assert_eq!(BaserunningPlay::from_event_type(EventType::Walk), None);
        assert_eq!(BaserunningPlay::CaughtStealing.to_string(), "CS");
    }
}
