//! Bowling scorecard scraper
//!
//! Reads a tournament results index, follows every scorecard link and
//! extracts per-innings bowling figures:
//! - Link discovery on the index table
//! - Team inference from "<Team> Innings" labels
//! - Positional bowling-table mapping and row filtering
//! - CSV / JSON-lines output named after the tournament year

pub mod aggregate;
pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod fetch;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod record;
pub mod robots;

pub use config::Config;
pub use error::{Result, ScrapeError};
pub use pipeline::{run, RunSummary};
pub use record::{BowlingRecord, MatchLink, ResultSet, TeamPair, Year};
