//! Scorecard link discovery on the tournament index page

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;
use url::Url;

use crate::document::Document;
use crate::error::ExtractionError;
use crate::layout::Layout;
use crate::record::{MatchLink, Year};

/// Links found on the index page, in table order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub links: Vec<MatchLink>,
    /// `None` when the index URL carries no four-digit token
    pub year: Option<Year>,
}

/// Collect the scorecard link from every results row.
///
/// Rows whose link cell has no anchor (fixtures without a scorecard) are
/// skipped without shifting the others.
pub fn discover_match_links(
    index: &Document,
    index_url: &str,
    base: &Url,
    layout: &Layout,
) -> Result<Discovery, ExtractionError> {
    let mut links = Vec::new();

    for (row_index, row) in index.select(&layout.index_rows).into_iter().enumerate() {
        let cells = row.select(&layout.cell);
        let Some(cell) = cells.get(layout.link_cell_index) else {
            debug!(row = row_index, cells = cells.len(), "Row has no link cell");
            continue;
        };

        let Some(href) = cell.first(&layout.anchor).and_then(|a| a.attr("href")) else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() {
            continue;
        }

        match base.join(href) {
            Ok(url) => links.push(MatchLink::new(url)),
            Err(e) => debug!(row = row_index, href = %href, error = %e, "Unresolvable link"),
        }
    }

    if links.is_empty() {
        return Err(ExtractionError::NoRowsFound);
    }

    Ok(Discovery {
        links,
        year: year_from_url(index_url),
    })
}

/// First run of four digits anywhere in `url`
pub fn year_from_url(url: &str) -> Option<Year> {
    static YEAR: OnceLock<Regex> = OnceLock::new();
    let re = YEAR.get_or_init(|| Regex::new(r"\d{4}").unwrap());
    re.find(url).and_then(|m| Year::new(m.as_str()))
}
