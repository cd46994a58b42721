//! Data model shared by the extractors, aggregator and writers

use serde::Serialize;
use std::fmt;
use url::Url;

/// Absolute URL of one match's scorecard page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchLink(Url);

impl MatchLink {
    pub fn new(url: Url) -> Self {
        Self(url)
    }

    pub fn url(&self) -> &Url {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MatchLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Four-digit tournament year, used to name the artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Year(String);

impl Year {
    /// `token` must be exactly four ASCII digits
    pub fn new(token: &str) -> Option<Self> {
        (token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()))
            .then(|| Self(token.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Innings {
    First,
    Second,
}

/// Teams in batting order: `team1` batted first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamPair {
    pub team1: String,
    pub team2: String,
}

impl TeamPair {
    pub fn new(team1: impl Into<String>, team2: impl Into<String>) -> Self {
        Self {
            team1: team1.into(),
            team2: team2.into(),
        }
    }

    /// The side fielding while the other bats
    pub fn bowling_team(&self, innings: Innings) -> &str {
        match innings {
            Innings::First => &self.team2,
            Innings::Second => &self.team1,
        }
    }

    pub fn match_label(&self) -> String {
        format!("{} Vs {}", self.team1, self.team2)
    }
}

/// One bowler's row as printed on the scorecard
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BowlerFigures {
    pub bowler_name: String,
    pub overs: String,
    pub maidens: String,
    pub runs: String,
    pub wickets: String,
    pub economy: String,
    pub dots: String,
    pub fours: String,
    pub sixes: String,
    pub wides: String,
    pub no_balls: String,
}

/// Column identifiers of the emitted table, in order
pub const COLUMNS: [&str; 13] = [
    "match",
    "bowlingTeam",
    "bowlerName",
    "overs",
    "maiden",
    "runs",
    "wickets",
    "economy",
    "0s",
    "4s",
    "6s",
    "wides",
    "noBalls",
];

/// One bowler's figures for one innings, tagged with match context.
///
/// Values are the literal text from the page; nothing is coerced to numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BowlingRecord {
    #[serde(rename = "match")]
    pub match_label: String,
    #[serde(rename = "bowlingTeam")]
    pub bowling_team: String,
    #[serde(rename = "bowlerName")]
    pub bowler_name: String,
    pub overs: String,
    #[serde(rename = "maiden")]
    pub maidens: String,
    pub runs: String,
    pub wickets: String,
    pub economy: String,
    #[serde(rename = "0s")]
    pub dots: String,
    #[serde(rename = "4s")]
    pub fours: String,
    #[serde(rename = "6s")]
    pub sixes: String,
    pub wides: String,
    #[serde(rename = "noBalls")]
    pub no_balls: String,
}

impl BowlingRecord {
    pub fn new(teams: &TeamPair, innings: Innings, figures: BowlerFigures) -> Self {
        Self {
            match_label: teams.match_label(),
            bowling_team: teams.bowling_team(innings).to_string(),
            bowler_name: figures.bowler_name,
            overs: figures.overs,
            maidens: figures.maidens,
            runs: figures.runs,
            wickets: figures.wickets,
            economy: figures.economy,
            dots: figures.dots,
            fours: figures.fours,
            sixes: figures.sixes,
            wides: figures.wides,
            no_balls: figures.no_balls,
        }
    }

    /// Values in [`COLUMNS`] order
    pub fn fields(&self) -> [&str; 13] {
        [
            self.match_label.as_str(),
            self.bowling_team.as_str(),
            self.bowler_name.as_str(),
            self.overs.as_str(),
            self.maidens.as_str(),
            self.runs.as_str(),
            self.wickets.as_str(),
            self.economy.as_str(),
            self.dots.as_str(),
            self.fours.as_str(),
            self.sixes.as_str(),
            self.wides.as_str(),
            self.no_balls.as_str(),
        ]
    }
}

/// All records of a run, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    records: Vec<BowlingRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = BowlingRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[BowlingRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<BowlingRecord> {
        self.records
    }
}
