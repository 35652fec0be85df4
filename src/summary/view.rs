use std::fmt::Write;

use anyhow::Result;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumString};

use crate::summary::box_score::{BoxScoreLine, InningTally};
use crate::summary::record::GameSummary;
use crate::summary::team::{BattingCategory, PlayerTally, TeamSummary};
use crate::summary::traits::{Side, UNKNOWN_PLAYER};

const BOX_SCORE_WIDTH: usize = 42;
const TEAM_COLUMN_WIDTH: usize = 20;

#[derive(
    Debug, Default, Eq, PartialEq, Copy, Clone, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Json,
    #[default]
    Text,
    Markdown,
}

/// Which sections to show. The pitching summary, team summaries and weather
/// log only appear in the full view.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub struct ViewOptions {
    pub box_only: bool,
    pub line_only: bool,
}

impl ViewOptions {
    const fn show_box_score(self) -> bool {
        !self.line_only
    }

    const fn show_line_score(self) -> bool {
        !self.box_only
    }

    const fn show_details(self) -> bool {
        !self.box_only && !self.line_only
    }
}

pub fn render(summary: &GameSummary, format: Format, options: ViewOptions) -> Result<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(summary)?),
        Format::Text => TextView.render(summary, options),
        Format::Markdown => MarkdownView.render(summary, options),
    }
}

/// `Name (count)` pairs, most frequent first. Single occurrences of routine
/// categories are left out.
fn player_counts(tally: &PlayerTally, skip_singletons: bool) -> Option<String> {
    let listed = tally
        .iter()
        .filter(|(_, count)| !(skip_singletons && **count < 2))
        .sorted_by(|a, b| b.1.cmp(a.1))
        .map(|(player, count)| format!("{player} ({count})"))
        .join(", ");
    (!listed.is_empty()).then_some(listed)
}

fn batting_lines(team: &TeamSummary) -> Vec<String> {
    let batting = &team.batting;
    let mut lines = vec![format!("RBI: {}", batting.runs_batted_in)];
    // Declaration order is print order, from home runs down to triple plays
    lines.extend(BattingCategory::iter().filter_map(|category| {
        player_counts(batting.tally(category), category.is_routine())
            .map(|listed| format!("{category}: {listed}"))
    }));
    lines.push(format!("LOB: {}", batting.left_on_base));
    lines
}

fn fielding_lines(team: &TeamSummary) -> Vec<String> {
    [("DP", team.fielding.double_plays), ("TP", team.fielding.triple_plays)]
        .into_iter()
        .filter(|&(_, n)| n > 0)
        .map(|(label, n)| format!("{label}: {n}"))
        .collect()
}

fn baserunning_lines(team: &TeamSummary) -> Vec<String> {
    [
        ("SB", &team.baserunning.stolen_bases),
        ("CS", &team.baserunning.caught_stealing),
    ]
    .into_iter()
    .filter_map(|(label, tally)| player_counts(tally, false).map(|l| format!("{label}: {l}")))
    .collect()
}

fn pitcher_name(name: Option<&String>) -> &str {
    name.map_or(UNKNOWN_PLAYER, String::as_str)
}

/// One rendering of the summary sections. Each section is a list of lines.
trait View {
    fn info_header(&self, summary: &GameSummary) -> Vec<String>;
    fn box_score(&self, summary: &GameSummary) -> Vec<String>;
    fn line_score(&self, summary: &GameSummary) -> Vec<String>;
    fn pitching_summary(&self, summary: &GameSummary) -> Vec<String>;
    fn team_summary(&self, summary: &GameSummary, side: Side) -> Vec<String>;
    fn weather_events(&self, summary: &GameSummary) -> Vec<String>;

    fn render(&self, summary: &GameSummary, options: ViewOptions) -> Result<String> {
        let mut sections = vec![self.info_header(summary)];
        if options.show_box_score() {
            sections.push(self.box_score(summary));
        }
        if options.show_line_score() {
            sections.push(self.line_score(summary));
        }
        if options.show_details() {
            sections.push(self.pitching_summary(summary));
            sections.push(self.team_summary(summary, Side::Away));
            sections.push(self.team_summary(summary, Side::Home));
            if !summary.weather_events.is_empty() {
                sections.push(self.weather_events(summary));
            }
        }

        let mut out = String::new();
        for section in sections {
            writeln!(out)?;
            writeln!(out, "{}", section.join("\n"))?;
        }
        Ok(out)
    }
}

fn info_lines(summary: &GameSummary) -> Vec<String> {
    let info = &summary.info;
    let mut lines = vec![
        format!("Game ID: {}", info.game_id.as_deref().unwrap_or_default()),
        format!("Season {} Day {}:", info.season, info.day),
        format!("{} @ {}", info.away_team_name, info.home_team_name),
    ];
    if let Some(stadium) = &info.stadium {
        lines.push(stadium.clone());
    }
    lines.push(format!("Weather: {}", info.weather));
    lines
}

fn underlined(title: String) -> [String; 2] {
    let rule = "-".repeat(title.len());
    [title, rule]
}

struct TextView;

impl TextView {
    fn cells(values: impl IntoIterator<Item = u32>) -> String {
        values.into_iter().map(|v| format!("{v:>3} | ")).collect()
    }

    fn line_score_row(name: &str, innings: &InningTally, totals: &BoxScoreLine) -> String {
        format!(
            "| {name:<TEAM_COLUMN_WIDTH$} | {}    | {}",
            Self::cells(innings.as_slice().iter().copied()),
            Self::cells(totals.as_array())
        )
    }
}

impl View for TextView {
    fn info_header(&self, summary: &GameSummary) -> Vec<String> {
        info_lines(summary)
    }

    fn box_score(&self, summary: &GameSummary) -> Vec<String> {
        let rule = "-".repeat(BOX_SCORE_WIDTH);
        let mut lines = vec![
            rule.clone(),
            format!("| {:>TEAM_COLUMN_WIDTH$} |  R  |  H  |  E  |", " "),
            rule.clone(),
        ];
        for (side, line) in summary.box_score.iter() {
            lines.push(format!(
                "| {:<TEAM_COLUMN_WIDTH$} | {}",
                summary.info.nickname(side),
                Self::cells(line.as_array())
            ));
            lines.push(rule.clone());
        }
        lines
    }

    fn line_score(&self, summary: &GameSummary) -> Vec<String> {
        let innings = summary.innings();
        let width = 2 + 23 + 6 * innings + 5 + 6 * 3;
        let rule = "-".repeat(width);
        let mut lines = vec![
            rule.clone(),
            format!(
                "| {:>TEAM_COLUMN_WIDTH$} | {}    |  R  |  H  |  E  |",
                " ",
                Self::cells((1..=innings).filter_map(|i| u32::try_from(i).ok()))
            ),
            rule.clone(),
        ];
        for (side, line) in summary.line_score.iter() {
            lines.push(Self::line_score_row(
                summary.info.nickname(side),
                line,
                summary.box_score.get(side),
            ));
            lines.push(rule.clone());
        }
        lines
    }

    fn pitching_summary(&self, summary: &GameSummary) -> Vec<String> {
        let p = &summary.pitching_summary;
        let mut lines = underlined("Pitching Summary:".to_owned()).to_vec();
        lines.extend([
            String::new(),
            format!("WP: {}", pitcher_name(p.winning_pitcher.as_ref())),
            format!("WP-K: {}", p.winner_strikeouts.total()),
            format!("WP-BB: {}", p.winner_walks.total()),
            format!("LP: {}", pitcher_name(p.losing_pitcher.as_ref())),
            format!("LP-K: {}", p.loser_strikeouts.total()),
            format!("LP-BB: {}", p.loser_walks.total()),
        ]);
        lines
    }

    fn team_summary(&self, summary: &GameSummary, side: Side) -> Vec<String> {
        let team = summary.game_summary.get(side);
        let mut lines = underlined(format!("Team Summary: {}", summary.info.nickname(side))).to_vec();

        let fielding = fielding_lines(team);
        if !fielding.is_empty() {
            lines.push("Fielding:".to_owned());
            lines.extend(fielding);
            lines.push(String::new());
        }

        lines.push("Batting:".to_owned());
        lines.extend(batting_lines(team));

        let baserunning = baserunning_lines(team);
        if !baserunning.is_empty() {
            lines.push(String::new());
            lines.push("Baserunning:".to_owned());
            lines.extend(baserunning);
        }
        lines
    }

    fn weather_events(&self, summary: &GameSummary) -> Vec<String> {
        let mut lines = underlined("Weather Events:".to_owned()).to_vec();
        lines.extend(summary.weather_events.iter().cloned());
        lines
    }
}

struct MarkdownView;

impl MarkdownView {
    fn row<I: IntoIterator<Item = String>>(cells: I) -> String {
        format!("| {} |", cells.into_iter().join(" | "))
    }

    fn separator(columns: usize) -> String {
        format!("|{}", " --- |".repeat(columns))
    }

    fn cell_block(title: &str, lines: &[String]) -> [String; 2] {
        [format!("| **{title}** |"), format!("| {} |", lines.join(" <br />"))]
    }
}

impl View for MarkdownView {
    /// Trailing blank lines keep each header line its own paragraph.
    fn info_header(&self, summary: &GameSummary) -> Vec<String> {
        info_lines(summary)
            .into_iter()
            .map(|line| format!("{line}\n"))
            .collect()
    }

    fn box_score(&self, summary: &GameSummary) -> Vec<String> {
        let mut lines = vec!["|  | R | H | E |".to_owned(), Self::separator(4)];
        for (side, line) in summary.box_score.iter() {
            lines.push(Self::row(
                std::iter::once(summary.info.nickname(side).to_owned())
                    .chain(line.as_array().iter().map(u32::to_string)),
            ));
        }
        lines
    }

    fn line_score(&self, summary: &GameSummary) -> Vec<String> {
        let innings = summary.innings();
        let header = std::iter::once(String::new())
            .chain((1..=innings).map(|i| i.to_string()))
            .chain(["R", "H", "E"].map(str::to_owned));
        let mut lines = vec![Self::row(header), Self::separator(innings + 4)];
        for (side, line) in summary.line_score.iter() {
            let totals = summary.box_score.get(side).as_array();
            lines.push(Self::row(
                std::iter::once(summary.info.nickname(side).to_owned())
                    .chain(line.as_slice().iter().map(u32::to_string))
                    .chain(totals.iter().map(u32::to_string)),
            ));
        }
        lines
    }

    fn pitching_summary(&self, summary: &GameSummary) -> Vec<String> {
        let p = &summary.pitching_summary;
        vec![
            "| Pitching Summary |".to_owned(),
            Self::separator(1),
            format!(
                "| **Winning Pitcher**: {}<br />K: {}<br />BB: {} |",
                pitcher_name(p.winning_pitcher.as_ref()),
                p.winner_strikeouts.total(),
                p.winner_walks.total()
            ),
            format!(
                "| **Losing Pitcher**: {}<br />K: {}<br />BB: {} |",
                pitcher_name(p.losing_pitcher.as_ref()),
                p.loser_strikeouts.total(),
                p.loser_walks.total()
            ),
        ]
    }

    fn team_summary(&self, summary: &GameSummary, side: Side) -> Vec<String> {
        let team = summary.game_summary.get(side);
        let mut lines = vec![
            format!("| Team Summary: {} |", summary.info.nickname(side)),
            Self::separator(1),
        ];
        let fielding = fielding_lines(team);
        if !fielding.is_empty() {
            lines.extend(Self::cell_block("Fielding:", &fielding));
        }
        lines.extend(Self::cell_block("Batting:", &batting_lines(team)));
        let baserunning = baserunning_lines(team);
        if !baserunning.is_empty() {
            lines.extend(Self::cell_block("Baserunning:", &baserunning));
        }
        lines
    }

    fn weather_events(&self, summary: &GameSummary) -> Vec<String> {
        let mut lines = vec!["| **Weather Events:** |".to_owned(), Self::separator(1)];
        lines.extend(summary.weather_events.iter().map(|e| format!("| {e} |")));
        lines
    }
}
