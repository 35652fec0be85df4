pub mod accumulator;
pub mod baserunning;
pub mod box_score;
pub mod entities;
pub mod error;
pub mod event;
pub mod info;
pub mod record;
pub mod source;
pub mod team;
pub mod tracker;
pub mod traits;
pub mod view;

use tracing::{debug, info};

use accumulator::SummaryAccumulator;
use entities::EntityLookup;
use error::SummaryError;
use info::StadiumTable;
use record::GameSummary;
use source::GameSource;

/// Fetches a game and its events and folds them into a finished summary.
///
/// Ties are rejected as soon as the final score is known, before any events
/// are fetched.
pub fn summarize(
    source: &dyn GameSource,
    entities: &dyn EntityLookup,
    stadiums: &StadiumTable,
    game_id: &str,
) -> Result<GameSummary, SummaryError> {
    let metadata = source.game(game_id)?;
    metadata.winner_or_tie()?;

    let events = source.events(game_id)?;
    debug!("Folding {} events for game {}", events.len(), game_id);
    let mut accumulator = SummaryAccumulator::new(metadata, stadiums, entities)?;
    for event in &events {
        accumulator.fold(event)?;
    }
    let summary = accumulator.finalize()?;
    info!(
        "Summarized game {} ({} innings)",
        game_id,
        summary.innings()
    );
    Ok(summary)
}
