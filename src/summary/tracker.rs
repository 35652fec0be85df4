use crate::summary::error::SummaryError;
use crate::summary::event::Event;
use crate::summary::traits::{Inning, InningFrame, REGULATION_INNINGS};

/// Remembers which half-innings have already produced an event, so that the
/// first event of each one can be recognised without trusting the feed's own
/// leadoff flag, which is wrong in some games.
#[derive(Debug, Eq, PartialEq, Clone)]
pub struct HalfInningTracker {
    top: Vec<bool>,
    bottom: Vec<bool>,
}

impl Default for HalfInningTracker {
    fn default() -> Self {
        Self {
            top: vec![false; REGULATION_INNINGS],
            bottom: vec![false; REGULATION_INNINGS],
        }
    }
}

impl HalfInningTracker {
    fn seen_mut(&mut self, frame: InningFrame) -> &mut Vec<bool> {
        match frame {
            InningFrame::Top => &mut self.top,
            InningFrame::Bottom => &mut self.bottom,
        }
    }

    /// Marks the half-inning as seen and reports whether this was its first event.
    ///
    /// A half-inning one past the end of the tracked innings is an extra inning and
    /// extends the sequence. Anything further out means the feed skipped a
    /// half-inning, which cannot be tracked.
    pub fn observe(&mut self, inning: Inning, frame: InningFrame) -> Result<bool, SummaryError> {
        let seen = self.seen_mut(frame);
        let tracked = seen.len();
        let is_leadoff = match seen.get(inning) {
            None if inning == tracked => {
                seen.push(false);
                true
            }
            None => false,
            Some(&marked) => !marked,
        };
        let marker = seen.get_mut(inning).ok_or(SummaryError::HalfInningIndex {
            inning,
            frame,
            tracked,
        })?;
        *marker = true;
        Ok(is_leadoff)
    }
}

/// Running count of batters who reached base since the half-inning began.
///
/// Runners driven in by a batter who also reaches base come off the count, so at
/// the third out what remains is the number left on base.
#[derive(Debug, Default, Eq, PartialEq, Clone, Copy)]
pub struct RunnerTracker {
    runners: i64,
}

impl RunnerTracker {
    pub fn update(&mut self, event: &Event, is_leadoff: bool) {
        if is_leadoff {
            self.runners = 0;
        }
        if event.batter_reached_base() {
            self.runners += 1;
            self.runners -= i64::from(event.runs_batted_in);
        }
    }

    pub const fn runners(&self) -> i64 {
        self.runners
    }
}
