#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::cargo)]
#![warn(
    clippy::nursery,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use rayon::prelude::*;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use game_summary::summary::entities::{EntityLookup, HttpEntityLookup, RosterLookup};
use game_summary::summary::error::SummaryError;
use game_summary::summary::info::StadiumTable;
use game_summary::summary::source::{FileSource, GameSource, HttpSource};
use game_summary::summary::summarize;
use game_summary::summary::view::{render, Format, ViewOptions};

const ABOUT: &str = "Summarizes Blaseball games from their play-by-play events.";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Parser, Debug)]
#[command(name = "game-summary", version, about = ABOUT)]
#[command(group(ArgGroup::new("format").args(["json", "text", "markdown"])))]
#[command(group(ArgGroup::new("view").args(["box_only", "line_only"])))]
struct Opt {
    /// Games to summarize, printed in the order given
    #[arg(required = true)]
    game_ids: Vec<String>,

    #[arg(long)]
    json: bool,

    #[arg(long)]
    text: bool,

    #[arg(long)]
    markdown: bool,

    /// Only show the box score
    #[arg(long)]
    box_only: bool,

    /// Only show the line score
    #[arg(long)]
    line_only: bool,

    /// Read `<id>.game.json` and `<id>.events.json` from this directory instead of the API
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// JSON object of player id to name, used instead of the player API
    #[arg(long)]
    roster: Option<PathBuf>,

    /// JSON object of team nickname to stadium, replacing the built-in table
    #[arg(long)]
    stadiums: Option<PathBuf>,

    /// JSON file with defaults for data_dir, roster, stadiums and format
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: Level,
}

impl Opt {
    fn format(&self) -> Option<Format> {
        if self.json {
            Some(Format::Json)
        } else if self.markdown {
            Some(Format::Markdown)
        } else if self.text {
            Some(Format::Text)
        } else {
            None
        }
    }

    const fn view_options(&self) -> ViewOptions {
        ViewOptions {
            box_only: self.box_only,
            line_only: self.line_only,
        }
    }
}

/// Defaults read from `--config`. Flags given on the command line win.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    data_dir: Option<PathBuf>,
    roster: Option<PathBuf>,
    stadiums: Option<PathBuf>,
    format: Option<Format>,
}

impl Config {
    fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

struct Settings {
    game_ids: Vec<String>,
    format: Format,
    view: ViewOptions,
    data_dir: Option<PathBuf>,
    roster: Option<PathBuf>,
    stadiums: Option<PathBuf>,
}

impl Settings {
    fn new(opt: Opt) -> Result<Self> {
        let config = opt
            .config
            .as_deref()
            .map(Config::from_path)
            .transpose()?
            .unwrap_or_default();
        let format = opt.format().or(config.format).unwrap_or_default();
        let view = opt.view_options();
        if format == Format::Json && view != ViewOptions::default() {
            warn!("--box-only and --line-only have no effect on JSON output");
        }
        Ok(Self {
            format,
            view,
            data_dir: opt.data_dir.or(config.data_dir),
            roster: opt.roster.or(config.roster),
            stadiums: opt.stadiums.or(config.stadiums),
            game_ids: opt.game_ids,
        })
    }

    fn http_client() -> Result<Client> {
        Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")
    }

    fn game_source(&self) -> Result<Box<dyn GameSource>> {
        Ok(match &self.data_dir {
            Some(dir) => {
                debug!("Reading games from {}", dir.display());
                Box::new(FileSource::new(dir))
            }
            None => Box::new(HttpSource::new(Self::http_client()?)),
        })
    }

    fn entity_lookup(&self) -> Result<Box<dyn EntityLookup>> {
        Ok(match &self.roster {
            Some(path) => {
                let roster = RosterLookup::from_path(path)
                    .with_context(|| format!("Failed to load roster {}", path.display()))?;
                debug!("Loaded {} players from roster", roster.len());
                Box::new(roster)
            }
            None => Box::new(HttpEntityLookup::new(Self::http_client()?)),
        })
    }

    fn stadium_table(&self) -> Result<StadiumTable> {
        match &self.stadiums {
            Some(path) => StadiumTable::from_path(path)
                .with_context(|| format!("Failed to load stadiums {}", path.display())),
            None => StadiumTable::builtin().context("Failed to parse built-in stadium table"),
        }
    }
}

struct GameProcessor {
    settings: Settings,
    source: Box<dyn GameSource>,
    entities: Box<dyn EntityLookup>,
    stadiums: StadiumTable,
}

impl GameProcessor {
    fn new(settings: Settings) -> Result<Self> {
        Ok(Self {
            source: settings.game_source()?,
            entities: settings.entity_lookup()?,
            stadiums: settings.stadium_table()?,
            settings,
        })
    }

    fn process_game(&self, game_id: &str) -> Result<String> {
        let summary = summarize(
            self.source.as_ref(),
            self.entities.as_ref(),
            &self.stadiums,
            game_id,
        )
        .with_context(|| format!("Failed to summarize game {game_id}"))?;
        render(&summary, self.settings.format, self.settings.view)
    }

    /// Prints every summary that succeeded and returns whether any game failed.
    /// Tied games are skipped without counting as failures.
    fn process_games(&self) -> bool {
        let results = self
            .settings
            .game_ids
            .par_iter()
            .map(|game_id| (game_id, self.process_game(game_id)))
            .collect::<Vec<_>>();

        let mut failed = false;
        for (game_id, result) in results {
            match result {
                Ok(output) => print!("{output}"),
                Err(e) => match e.downcast_ref::<SummaryError>() {
                    Some(tie) if tie.is_tie_game() => {
                        info!("Skipping game {}: {}", game_id, tie);
                    }
                    _ => {
                        error!("{:?}", e);
                        failed = true;
                    }
                },
            }
        }
        failed
    }
}

fn run(opt: Opt) -> Result<bool> {
    let processor = GameProcessor::new(Settings::new(opt)?)?;
    Ok(processor.process_games())
}

#[allow(clippy::expect_used)]
fn main() {
    let opt: Opt = Opt::parse();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(opt.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to initialize trace");

    let start = Instant::now();
    let failed = match run(opt) {
        Ok(failed) => failed,
        Err(e) => {
            error!("{:?}", e);
            true
        }
    };
    debug!("Elapsed: {:?}", start.elapsed());
    if failed {
        process::exit(1);
    }
}
