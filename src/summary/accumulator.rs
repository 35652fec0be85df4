use tracing::debug;

use crate::summary::baserunning::{BaserunningPlay, NarrationMatcher, RunnerNameMatcher};
use crate::summary::box_score::{BoxScore, LineScore};
use crate::summary::entities::EntityLookup;
use crate::summary::error::SummaryError;
use crate::summary::event::{Event, EventType};
use crate::summary::info::{GameInfo, GameMetadata, StadiumTable};
use crate::summary::record::{GameSummary, PitchingSummary};
use crate::summary::team::{credit, BattingCategory, PitchingCategory, TeamLedger};
use crate::summary::tracker::{HalfInningTracker, RunnerTracker};
use crate::summary::traits::{InningFrame, Matchup, Player, REGULATION_INNINGS, UNKNOWN_PLAYER};

/// Narration keywords that mark a weather effect. Matched case-sensitively.
pub const WEATHER_KEYWORDS: [&str; 5] = ["blooddrain", "incinerate", "feedback", "allergic", "yummy"];

/// Folds a game's events, in order, into box score, line score, team tallies
/// and the weather log.
pub struct SummaryAccumulator<'a> {
    metadata: GameMetadata,
    info: GameInfo,
    entities: &'a dyn EntityLookup,
    runner_names: Box<dyn RunnerNameMatcher + 'a>,
    half_innings: HalfInningTracker,
    runners: RunnerTracker,
    box_score: BoxScore,
    line_score: LineScore,
    teams: Matchup<TeamLedger>,
    weather_events: Vec<String>,
    events_folded: usize,
}

impl<'a> SummaryAccumulator<'a> {
    pub fn new(
        metadata: GameMetadata,
        stadiums: &StadiumTable,
        entities: &'a dyn EntityLookup,
    ) -> Result<Self, SummaryError> {
        let info = GameInfo::new(&metadata, stadiums)?;
        Ok(Self {
            metadata,
            info,
            entities,
            runner_names: Box::new(NarrationMatcher),
            half_innings: HalfInningTracker::default(),
            runners: RunnerTracker::default(),
            box_score: BoxScore::default(),
            line_score: LineScore::default(),
            teams: Matchup::default(),
            weather_events: vec![],
            events_folded: 0,
        })
    }

    #[must_use]
    pub fn with_runner_names<M: RunnerNameMatcher + 'a>(mut self, matcher: M) -> Self {
        self.runner_names = Box::new(matcher);
        self
    }

    pub const fn box_score(&self) -> &BoxScore {
        &self.box_score
    }

    pub const fn line_score(&self) -> &LineScore {
        &self.line_score
    }

    pub const fn teams(&self) -> &Matchup<TeamLedger> {
        &self.teams
    }

    pub fn weather_events(&self) -> &[String] {
        &self.weather_events
    }

    pub const fn runners_on_base(&self) -> i64 {
        self.runners.runners()
    }

    pub const fn events_folded(&self) -> usize {
        self.events_folded
    }

    /// Folds one event. Leadoff detection and the runner count have to be
    /// brought up to date before anything else reads them.
    pub fn fold(&mut self, event: &Event) -> Result<(), SummaryError> {
        let frame = event.frame();
        let is_leadoff = self.half_innings.observe(event.inning, frame)?;
        if is_leadoff != event.is_leadoff {
            debug!(
                "Feed leadoff flag is {} for {} of inning {}, using {}",
                event.is_leadoff,
                frame,
                event.inning + 1,
                is_leadoff
            );
        }
        self.runners.update(event, is_leadoff);
        if is_leadoff && frame == InningFrame::Top && event.inning >= REGULATION_INNINGS {
            self.add_extra_inning();
        }

        self.fold_box_score(event);
        self.fold_line_score(event)?;
        self.fold_fielding(event);
        self.fold_batting(event)?;
        self.fold_baserunning(event);
        self.fold_pitching(event)?;
        self.fold_weather_events(event);

        self.events_folded += 1;
        Ok(())
    }

    /// Both teams get the new column at once, even though only the away team
    /// has batted in it so far.
    fn add_extra_inning(&mut self) {
        debug!("Adding column for extra inning");
        for line in self.line_score.iter_mut() {
            line.add_extra_inning();
        }
        for team in self.teams.iter_mut() {
            team.batting.hits.add_extra_inning();
            team.pitching.add_extra_inning();
        }
    }

    fn fold_box_score(&mut self, event: &Event) {
        let frame = event.frame();
        let batting = self.box_score.get_mut(frame.batting_side());
        if let Some(runs) = event.runs_scored() {
            batting.runs += runs;
        }
        if event.is_hit() {
            batting.hits += 1;
        }
        // Errors are charged to the defense
        if event.errors_on_play {
            self.box_score.get_mut(frame.fielding_side()).errors += 1;
        }
    }

    fn fold_line_score(&mut self, event: &Event) -> Result<(), SummaryError> {
        if let Some(runs) = event.runs_scored() {
            self.line_score
                .get_mut(event.frame().batting_side())
                .add(event.inning, runs)?;
        }
        Ok(())
    }

    fn fold_fielding(&mut self, event: &Event) {
        let fielding = &mut self.teams.get_mut(event.frame().fielding_side()).fielding;
        if event.is_double_play {
            fielding.double_plays += 1;
        }
        if event.is_triple_play {
            fielding.triple_plays += 1;
        }
    }

    fn fold_batting(&mut self, event: &Event) -> Result<(), SummaryError> {
        let side = event.frame().batting_side();

        if let Some(category) = BattingCategory::from_event_type(event.event_type) {
            let batter = self.batter_name(event)?;
            let batting = &mut self.teams.get_mut(side).batting;
            credit(batting.tally_mut(category), &batter);
            if event.is_hit() {
                batting.hits.add(event.inning, 1)?;
            }
        }

        if let Some(category) = grounded_into(event) {
            let batter = self.batter_name(event)?;
            credit(self.teams.get_mut(side).batting.tally_mut(category), &batter);
        }

        let batting = &mut self.teams.get_mut(side).batting;
        // The runner count is only reset by the next leadoff
        if event.is_third_out() {
            batting.left_on_base += self.runners.runners();
        }
        if let Some(runs) = event.runs_scored() {
            batting.runs_batted_in += runs;
        }
        Ok(())
    }

    fn fold_baserunning(&mut self, event: &Event) {
        if let Some(play) = BaserunningPlay::from_event_type(event.event_type) {
            let runner = self
                .runner_names
                .runner_name_or_unknown(play, &event.event_text);
            let baserunning = &mut self.teams.get_mut(event.frame().batting_side()).baserunning;
            credit(baserunning.tally_mut(play), &runner);
        }
    }

    fn fold_pitching(&mut self, event: &Event) -> Result<(), SummaryError> {
        if let Some(category) = PitchingCategory::from_event_type(event.event_type) {
            self.teams
                .get_mut(event.frame().fielding_side())
                .pitching
                .tally_mut(category)
                .add(event.inning, 1)?;
        }
        Ok(())
    }

    fn fold_weather_events(&mut self, event: &Event) {
        for keyword in WEATHER_KEYWORDS {
            self.weather_events.extend(
                event
                    .event_text
                    .iter()
                    .filter(|line| line.contains(keyword))
                    .cloned(),
            );
        }
    }

    fn batter_name(&self, event: &Event) -> Result<Player, SummaryError> {
        let name = match event.batter_id.as_deref() {
            Some(batter_id) => self.entities.player_name(batter_id)?,
            None => None,
        };
        Ok(name.unwrap_or_else(|| {
            debug!("No name for batter {:?}", event.batter_id);
            UNKNOWN_PLAYER.to_owned()
        }))
    }

    /// Splits pitching off the team tallies and credits it to the winning and
    /// losing sides. Fails on a tied final score.
    pub fn finalize(self) -> Result<GameSummary, SummaryError> {
        let winner = self.metadata.winner_or_tie()?;
        let Matchup { away, home } = self.teams;
        let (away_summary, away_pitching) = away.split();
        let (home_summary, home_pitching) = home.split();
        let pitching_summary = PitchingSummary::new(
            winner,
            Matchup::new(away_pitching, home_pitching),
            &self.metadata,
        );
        debug!(
            "Finalized game {} after {} events",
            self.metadata.game_id(),
            self.events_folded
        );
        Ok(GameSummary {
            info: self.info,
            box_score: self.box_score,
            line_score: self.line_score,
            pitching_summary,
            game_summary: Matchup::new(away_summary, home_summary),
            weather_events: self.weather_events,
        })
    }
}

/// Double play wins when the feed flags both.
fn grounded_into(event: &Event) -> Option<BattingCategory> {
    if event.event_type != EventType::Out {
        None
    } else if event.is_double_play {
        Some(BattingCategory::GroundedIntoDoublePlay)
    } else if event.is_triple_play {
        Some(BattingCategory::GroundedIntoTriplePlay)
    } else {
        None
    }
}
