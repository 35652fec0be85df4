use std::cmp::max;

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{Display, EnumString};

use crate::summary::traits::{Bases, Inning, InningFrame, Outs};

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash, EnumString, Display, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Single,
    Double,
    Triple,
    HomeRun,
    Strikeout,
    Walk,
    Sacrifice,
    Out,
    StolenBase,
    CaughtStealing,
    HitByPitch,
    #[serde(other)]
    Other,
}

impl EventType {
    pub const fn is_hit(self) -> bool {
        matches!(
            self,
            Self::Single | Self::Double | Self::Triple | Self::HomeRun
        )
    }
}

/// One plate appearance or play, in the shape served by the events API.
#[derive(Debug, Eq, PartialEq, Clone, Serialize, Deserialize)]
pub struct Event {
    pub inning: Inning,
    pub top_of_inning: bool,
    pub event_type: EventType,
    #[serde(default)]
    pub batter_id: Option<String>,
    #[serde(default)]
    pub event_text: Vec<String>,
    #[serde(default)]
    pub runs_batted_in: u32,
    pub bases_hit: Bases,
    #[serde(default, deserialize_with = "flag_or_count")]
    pub errors_on_play: bool,
    #[serde(default)]
    pub is_double_play: bool,
    #[serde(default)]
    pub is_triple_play: bool,
    pub outs_before_play: Outs,
    pub outs_on_play: Outs,
    /// Reported by the feed but unreliable; leadoff status is derived instead.
    #[serde(default)]
    pub is_leadoff: bool,
}

impl Event {
    pub const fn frame(&self) -> InningFrame {
        InningFrame::from_top_of_inning(self.top_of_inning)
    }

    pub const fn is_hit(&self) -> bool {
        self.event_type.is_hit()
    }

    /// Batter reached first, second or third on the play.
    pub fn batter_reached_base(&self) -> bool {
        (1..=3).contains(&self.bases_hit.get())
    }

    pub fn is_third_out(&self) -> bool {
        matches!(
            (self.outs_before_play.get(), self.outs_on_play.get()),
            (2, 1) | (1, 2) | (0, 3)
        )
    }

    fn narration_mentions_score(&self) -> bool {
        self.event_text
            .iter()
            .any(|line| line.to_lowercase().contains("score"))
    }

    /// Runs credited to the batting team on this play, if any scored.
    ///
    /// Runs scoring on errors and the like carry no RBI in the feed but still say
    /// "scores" in the narration, so at least one run is counted then.
    pub fn runs_scored(&self) -> Option<u32> {
        if self.runs_batted_in > 0 || self.narration_mentions_score() {
            Some(max(1, self.runs_batted_in))
        } else {
            None
        }
    }
}

/// Older feeds report `errors_on_play` as a count rather than a flag.
fn flag_or_count<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FlagOrCount {
        Flag(bool),
        Count(u64),
    }

    Ok(match Option::<FlagOrCount>::deserialize(deserializer)? {
        Some(FlagOrCount::Flag(flag)) => flag,
        Some(FlagOrCount::Count(count)) => count > 0,
        None => false,
    })
}

/// The events endpoint wraps results in a paging envelope; saved files may not.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum EventPayload {
    Page { results: Vec<Event> },
    Bare(Vec<Event>),
}

impl EventPayload {
    pub(crate) fn into_events(self) -> Vec<Event> {
        match self {
            Self::Page { results } | Self::Bare(results) => results,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn event(value: serde_json::Value) -> Event {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn decodes_feed_event() {
        let e = event(json!({
            "inning": 2,
            "top_of_inning": false,
            "event_type": "HOME_RUN",
            "batter_id": "abc",
            "event_text": ["Jess Taylor hits a solo home run!"],
            "runs_batted_in": 1,
            "bases_hit": 4,
            "errors_on_play": 0,
            "is_double_play": false,
            "is_triple_play": false,
            "outs_before_play": 1,
            "outs_on_play": 0,
            "is_leadoff": true
        }));
        assert_eq!(e.event_type, EventType::HomeRun);
        assert_eq!(e.frame(), InningFrame::Bottom);
        assert!(e.is_hit());
        assert!(!e.errors_on_play);
        assert!(!e.batter_reached_base());
        assert_eq!(e.runs_scored(), Some(1));
    }

    #[test]
    fn unknown_event_type_and_error_count() {
        let e = event(json!({
            "inning": 0,
            "top_of_inning": true,
            "event_type": "UNKNOWN_OUT",
            "batter_id": null,
            "runs_batted_in": 0,
            "bases_hit": 0,
            "errors_on_play": 2,
            "outs_before_play": 0,
            "outs_on_play": 1
        }));
        assert_eq!(e.event_type, EventType::Other);
        assert!(e.errors_on_play);
        assert!(e.event_text.is_empty());
        assert_eq!(e.runs_scored(), None);
    }

    #[test]
    fn rejects_out_of_range_outs() {
        let result = serde_json::from_value::<Event>(json!({
            "inning": 0,
            "top_of_inning": true,
            "event_type": "OUT",
            "bases_hit": 0,
            "outs_before_play": 4,
            "outs_on_play": 1
        }));
        assert!(result.is_err());
    }

    #[test]
    fn narrated_score_without_rbi_counts_one_run() {
        let e = event(json!({
            "inning": 4,
            "top_of_inning": true,
            "event_type": "WALK",
            "event_text": ["Sam Ford draws a walk.", "Max Kent SCORES!"],
            "bases_hit": 0,
            "outs_before_play": 0,
            "outs_on_play": 0
        }));
        assert_eq!(e.runs_scored(), Some(1));
    }

    #[test]
    fn third_out_combinations() {
        let outs = |before: u8, on: u8| {
            event(json!({
                "inning": 0,
                "top_of_inning": true,
                "event_type": "OUT",
                "bases_hit": 0,
                "outs_before_play": before,
                "outs_on_play": on
            }))
            .is_third_out()
        };
        assert!(outs(2, 1));
        assert!(outs(1, 2));
        assert!(outs(0, 3));
        assert!(!outs(1, 1));
        assert!(!outs(2, 0));
    }

    #[test]
    fn payload_accepts_page_or_bare_list() {
        let row = json!({
            "inning": 0,
            "top_of_inning": true,
            "event_type": "OUT",
            "bases_hit": 0,
            "outs_before_play": 0,
            "outs_on_play": 1
        });
        let page: EventPayload =
            serde_json::from_value(json!({"count": 1, "results": [row.clone()]})).unwrap();
        let bare: EventPayload = serde_json::from_value(json!([row])).unwrap();
        assert_eq!(page.into_events().len(), 1);
        assert_eq!(bare.into_events().len(), 1);
    }
}
