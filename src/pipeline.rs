//! One scrape run: index → links → scorecards → artifact

use std::path::PathBuf;
use tracing::info;

use crate::aggregate::{aggregate, RunReport};
use crate::config::Config;
use crate::document::Document;
use crate::error::{Result, ScrapeError};
use crate::extractors::{discover_match_links, Discovery};
use crate::fetch::PageFetcher;
use crate::layout::Layout;
use crate::output::TabularWriter;

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub path: PathBuf,
    pub records: usize,
    pub report: RunReport,
}

/// Run the whole scrape. Fails only when there is nothing to process or the
/// artifact cannot be written; individual scorecard pages fail softly.
pub async fn run<F, W>(config: &Config, fetcher: &F, writer: &mut W) -> Result<RunSummary>
where
    F: PageFetcher,
    W: TabularWriter,
{
    let index_url = config.index_url()?;
    let base = config.base_url()?;
    let layout = config.compile_layout()?;

    let markup = fetcher
        .fetch(&index_url)
        .await
        .map_err(|e| ScrapeError::EmptyDiscovery {
            reason: format!("index page unavailable: {e}"),
        })?;

    let Discovery { links, year } = discover(&markup, config, &base, &layout)?;
    let year = year.ok_or_else(|| ScrapeError::EmptyDiscovery {
        reason: format!("no year in index URL {}", config.index_url),
    })?;

    info!(links = links.len(), year = %year, "Match links discovered");

    let (results, report) = aggregate(fetcher, &layout, links).await;

    let path = writer.write(results.records(), &year)?;
    info!(path = %path.display(), records = results.len(), "Data saved");

    Ok(RunSummary {
        path,
        records: results.len(),
        report,
    })
}

fn discover(markup: &str, config: &Config, base: &url::Url, layout: &Layout) -> Result<Discovery> {
    let index = Document::load(markup).map_err(|e| ScrapeError::EmptyDiscovery {
        reason: format!("index page unparseable: {e}"),
    })?;

    discover_match_links(&index, &config.index_url, base, layout).map_err(|e| {
        ScrapeError::EmptyDiscovery {
            reason: e.to_string(),
        }
    })
}
