use serde::{Serialize, Serializer};

use crate::summary::error::SummaryError;
use crate::summary::traits::{Inning, Matchup, REGULATION_INNINGS};

/// Runs, hits and errors for one team. Serialized as `[R, H, E]`.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Default)]
pub struct BoxScoreLine {
    pub runs: u32,
    pub hits: u32,
    pub errors: u32,
}

impl BoxScoreLine {
    pub const fn as_array(&self) -> [u32; 3] {
        [self.runs, self.hits, self.errors]
    }
}

impl Serialize for BoxScoreLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_array().serialize(serializer)
    }
}

/// A per-inning counter row. Starts with one column per regulation inning and
/// only ever grows by whole extra innings.
#[derive(Debug, Eq, PartialEq, Clone, Serialize)]
#[serde(transparent)]
pub struct InningTally(Vec<u32>);

impl Default for InningTally {
    fn default() -> Self {
        Self(vec![0; REGULATION_INNINGS])
    }
}

impl InningTally {
    pub fn add_extra_inning(&mut self) {
        self.0.push(0);
    }

    pub fn add(&mut self, inning: Inning, count: u32) -> Result<(), SummaryError> {
        let columns = self.0.len();
        let cell = self
            .0
            .get_mut(inning)
            .ok_or(SummaryError::InningOutOfRange { inning, columns })?;
        *cell += count;
        Ok(())
    }

    pub fn innings(&self) -> usize {
        self.0.len()
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl From<Vec<u32>> for InningTally {
    fn from(columns: Vec<u32>) -> Self {
        Self(columns)
    }
}

pub type BoxScore = Matchup<BoxScoreLine>;
pub type LineScore = Matchup<InningTally>;
