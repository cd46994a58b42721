//! Structural markers of the source site's page template.
//!
//! `LayoutConfig` is the serializable form; `Layout` holds the compiled
//! patterns handed to the extractors.

use serde::{Deserialize, Serialize};

use crate::document::Pattern;
use crate::error::ParseError;

/// CSS patterns and positions describing the results and scorecard pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Body rows of the index page's results table
    pub index_rows: String,
    /// Cells within any table row
    pub cell: String,
    /// Anchor carrying the scorecard link
    pub anchor: String,
    /// Zero-based cell holding the scorecard link on the index page
    pub link_cell_index: usize,
    /// Elements that may carry a "<Team> Innings" label
    pub team_label: String,
    /// Generic scorecard table marker (batting and bowling alike)
    pub data_table: String,
    /// Body rows within a scorecard table
    pub body_rows: String,
    /// Bowler name inside the first cell, excluding icons
    pub bowler_name: String,
    /// Rows with fewer cells are extras/totals/commentary
    pub min_bowling_cells: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            index_rows: "table.ds-w-full > tbody > tr".to_string(),
            cell: "td".to_string(),
            anchor: "a".to_string(),
            link_cell_index: 6,
            team_label: "span".to_string(),
            data_table: "div > table.ds-table".to_string(),
            body_rows: "tbody > tr".to_string(),
            bowler_name: "a > span".to_string(),
            min_bowling_cells: 11,
        }
    }
}

/// Compiled [`LayoutConfig`]
#[derive(Debug, Clone)]
pub struct Layout {
    pub index_rows: Pattern,
    pub cell: Pattern,
    pub anchor: Pattern,
    pub link_cell_index: usize,
    pub team_label: Pattern,
    pub data_table: Pattern,
    pub body_rows: Pattern,
    pub bowler_name: Pattern,
    pub min_bowling_cells: usize,
}

impl Layout {
    pub fn compile(config: &LayoutConfig) -> Result<Self, ParseError> {
        Ok(Self {
            index_rows: Pattern::parse(&config.index_rows)?,
            cell: Pattern::parse(&config.cell)?,
            anchor: Pattern::parse(&config.anchor)?,
            link_cell_index: config.link_cell_index,
            team_label: Pattern::parse(&config.team_label)?,
            data_table: Pattern::parse(&config.data_table)?,
            body_rows: Pattern::parse(&config.body_rows)?,
            bowler_name: Pattern::parse(&config.bowler_name)?,
            min_bowling_cells: config.min_bowling_cells,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_compiles() {
        let layout = Layout::compile(&LayoutConfig::default()).unwrap();
        assert_eq!(layout.data_table.as_str(), "div > table.ds-table");
        assert_eq!(layout.link_cell_index, 6);
        assert_eq!(layout.min_bowling_cells, 11);
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let config = LayoutConfig {
            data_table: "table..ds-table".to_string(),
            ..LayoutConfig::default()
        };
        assert!(Layout::compile(&config).is_err());
    }
}
