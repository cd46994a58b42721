//! Per-innings bowling figures from a match scorecard page
//!
//! The page never links a bowling row to its team. Attribution relies on two
//! template conventions:
//! - the first two distinct "<Team> Innings" labels give the batting order
//! - scorecard tables alternate batting/bowling, so bowling sits at 1 and 3

use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, warn};

use crate::document::{Document, Node};
use crate::layout::Layout;
use crate::record::{BowlerFigures, BowlingRecord, Innings, MatchLink, TeamPair};

/// What a scorecard page yielded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionOutcome {
    /// Both innings' rows, first innings first
    Records(Vec<BowlingRecord>),
    /// Fewer than two distinct team labels (abandoned, no result, other layout)
    InsufficientData { teams_found: Vec<String> },
    /// Team labels present but no scorecard tables at all
    NotApplicable,
}

impl ExtractionOutcome {
    /// `None` only for insufficient team names
    pub fn into_records(self) -> Option<Vec<BowlingRecord>> {
        match self {
            Self::Records(records) => Some(records),
            Self::NotApplicable => Some(Vec::new()),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// What a scorecard table at a given position holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    FirstInningsBowling,
    SecondInningsBowling,
    Other,
}

impl TableRole {
    pub fn innings(self) -> Option<Innings> {
        match self {
            Self::FirstInningsBowling => Some(Innings::First),
            Self::SecondInningsBowling => Some(Innings::Second),
            Self::Other => None,
        }
    }
}

/// Position 0 and 2 are batting cards; anything past 3 is not scorecard data.
pub fn table_role_for_position(index: usize) -> TableRole {
    match index {
        1 => TableRole::FirstInningsBowling,
        3 => TableRole::SecondInningsBowling,
        _ => TableRole::Other,
    }
}

/// Team inference, fed label texts in document order
#[derive(Debug, Clone, PartialEq, Eq)]
enum TeamScan {
    SeekingFirstTeam,
    SeekingSecondTeam { team1: String },
    Done(TeamPair),
}

impl TeamScan {
    fn advance(self, name: &str) -> Self {
        match self {
            Self::SeekingFirstTeam => Self::SeekingSecondTeam {
                team1: name.to_string(),
            },
            Self::SeekingSecondTeam { team1 } if team1 == name => {
                Self::SeekingSecondTeam { team1 }
            }
            Self::SeekingSecondTeam { team1 } => Self::Done(TeamPair::new(team1, name)),
            done @ Self::Done(_) => done,
        }
    }

    fn teams_found(&self) -> Vec<String> {
        match self {
            Self::SeekingFirstTeam => Vec::new(),
            Self::SeekingSecondTeam { team1 } => vec![team1.clone()],
            Self::Done(pair) => vec![pair.team1.clone(), pair.team2.clone()],
        }
    }
}

/// "<Name> Innings" → "<Name>"
pub fn team_from_label(text: &str) -> Option<&str> {
    static LABEL: OnceLock<Regex> = OnceLock::new();
    let re = LABEL.get_or_init(|| Regex::new(r"^(.+?)\s+Innings$").unwrap());
    let caps = re.captures(text.trim())?;
    let name = caps.get(1)?.as_str().trim();
    (!name.is_empty()).then_some(name)
}

/// First two distinct team labels on the page, in document order
pub fn infer_teams(detail: &Document, layout: &Layout) -> Result<TeamPair, Vec<String>> {
    let mut scan = TeamScan::SeekingFirstTeam;

    for label in detail.select(&layout.team_label) {
        let text = label.text();
        if let Some(name) = team_from_label(&text) {
            scan = scan.advance(name);
            if let TeamScan::Done(pair) = scan {
                return Ok(pair);
            }
        }
    }

    Err(scan.teams_found())
}

/// Extract every bowler row from both innings of one scorecard page.
pub fn extract_innings(detail: &Document, link: &MatchLink, layout: &Layout) -> ExtractionOutcome {
    let teams = match infer_teams(detail, layout) {
        Ok(teams) => teams,
        Err(teams_found) => {
            warn!(url = %link, found = ?teams_found, "Insufficient team names");
            return ExtractionOutcome::InsufficientData { teams_found };
        }
    };

    let tables = detail.select(&layout.data_table);
    if tables.is_empty() {
        debug!(url = %link, "No scorecard tables");
        return ExtractionOutcome::NotApplicable;
    }

    let mut first = Vec::new();
    let mut second = Vec::new();

    for (position, table) in tables.iter().enumerate() {
        let Some(innings) = table_role_for_position(position).innings() else {
            continue;
        };

        let rows: Vec<BowlingRecord> = bowling_rows(table, layout)
            .into_iter()
            .map(|figures| BowlingRecord::new(&teams, innings, figures))
            .collect();

        debug!(url = %link, ?innings, rows = rows.len(), "Bowling table mapped");

        match innings {
            Innings::First => first.extend(rows),
            Innings::Second => second.extend(rows),
        }
    }

    first.extend(second);
    ExtractionOutcome::Records(first)
}

/// Bowler rows of one table; extras, totals and commentary rows have too few cells
fn bowling_rows(table: &Node<'_>, layout: &Layout) -> Vec<BowlerFigures> {
    table
        .select(&layout.body_rows)
        .into_iter()
        .filter_map(|row| {
            let cells = row.select(&layout.cell);
            (cells.len() >= layout.min_bowling_cells).then(|| figures_from_cells(&cells, layout))
        })
        .collect()
}

fn figures_from_cells(cells: &[Node<'_>], layout: &Layout) -> BowlerFigures {
    let text = |i: usize| cells.get(i).map(Node::text).unwrap_or_default();

    BowlerFigures {
        bowler_name: cells.first().map(|c| bowler_name(c, layout)).unwrap_or_default(),
        overs: text(1),
        maidens: text(2),
        runs: text(3),
        wickets: text(4),
        economy: text(5),
        dots: text(6),
        fours: text(7),
        sixes: text(8),
        wides: text(9),
        no_balls: text(10),
    }
}

/// Name from the linked span, skipping captain/keeper icons in the cell
fn bowler_name(cell: &Node<'_>, layout: &Layout) -> String {
    let spans = cell.select(&layout.bowler_name);
    if spans.is_empty() {
        return cell.text();
    }
    spans.iter().map(Node::text).collect::<String>().trim().to_string()
}
