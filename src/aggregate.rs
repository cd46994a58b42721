//! Sequential aggregation over discovered match links
//!
//! A single worker drains a FIFO queue, one fetch at a time, so the result
//! set comes out in discovery order with no reordering step.

use std::collections::VecDeque;
use tracing::{info, warn};

use crate::document::Document;
use crate::error::FetchError;
use crate::extractors::{extract_innings, ExtractionOutcome};
use crate::fetch::PageFetcher;
use crate::layout::Layout;
use crate::record::{BowlingRecord, MatchLink, ResultSet};

/// Why a page contributed nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Fetch(String),
    Disallowed,
    Parse(String),
    InsufficientTeamNames,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPage {
    pub url: String,
    pub reason: SkipReason,
}

/// Per-run bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub pages_processed: usize,
    pub records: usize,
    pub skipped: Vec<SkippedPage>,
}

/// Result of processing one page
enum PageOutcome {
    Records(Vec<BowlingRecord>),
    Skipped(SkipReason),
}

pub struct Aggregator<'a, F> {
    fetcher: &'a F,
    layout: &'a Layout,
    queue: VecDeque<MatchLink>,
    results: ResultSet,
    report: RunReport,
}

impl<'a, F: PageFetcher> Aggregator<'a, F> {
    pub fn new(fetcher: &'a F, layout: &'a Layout) -> Self {
        Self {
            fetcher,
            layout,
            queue: VecDeque::new(),
            results: ResultSet::new(),
            report: RunReport::default(),
        }
    }

    pub fn enqueue(&mut self, links: impl IntoIterator<Item = MatchLink>) {
        self.queue.extend(links);
    }

    /// Drain the queue, then hand back the records and the report
    pub async fn run(mut self) -> (ResultSet, RunReport) {
        while let Some(link) = self.queue.pop_front() {
            let outcome = self.process(&link).await;
            self.report.pages_processed += 1;

            match outcome {
                PageOutcome::Records(records) => {
                    info!(url = %link, records = records.len(), "Page extracted");
                    self.report.records += records.len();
                    self.results.extend(records);
                }
                PageOutcome::Skipped(reason) => {
                    warn!(url = %link, ?reason, "Error scraping bowling summary");
                    self.report.skipped.push(SkippedPage {
                        url: link.to_string(),
                        reason,
                    });
                }
            }
        }

        (self.results, self.report)
    }

    async fn process(&self, link: &MatchLink) -> PageOutcome {
        match self.fetcher.fetch(link.url()).await {
            Ok(markup) => extract_page(&markup, link, self.layout),
            Err(FetchError::Disallowed { .. }) => PageOutcome::Skipped(SkipReason::Disallowed),
            Err(e) => PageOutcome::Skipped(SkipReason::Fetch(e.to_string())),
        }
    }
}

/// Parse and extract synchronously; the document is dropped before the next fetch.
fn extract_page(markup: &str, link: &MatchLink, layout: &Layout) -> PageOutcome {
    let document = match Document::load(markup) {
        Ok(doc) => doc,
        Err(e) => return PageOutcome::Skipped(SkipReason::Parse(e.to_string())),
    };

    match extract_innings(&document, link, layout).into_records() {
        Some(records) => PageOutcome::Records(records),
        None => PageOutcome::Skipped(SkipReason::InsufficientTeamNames),
    }
}

/// Process `links` in order with one worker
pub async fn aggregate<F: PageFetcher>(
    fetcher: &F,
    layout: &Layout,
    links: Vec<MatchLink>,
) -> (ResultSet, RunReport) {
    let mut aggregator = Aggregator::new(fetcher, layout);
    aggregator.enqueue(links);
    aggregator.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::MemoryFetcher;
    use crate::layout::LayoutConfig;
    use url::Url;

    fn page(team1: &str, team2: &str, bowler: &str) -> String {
        let row = format!(
            r#"<tr><td><a href="/p"><span>{bowler}</span></a></td><td>10</td><td>1</td><td>40</td>
            <td>3</td><td>4.00</td><td>35</td><td>2</td><td>1</td><td>0</td><td>0</td></tr>"#
        );
        format!(
            r#"<span>{team1} Innings</span><span>{team2} Innings</span>
            <div><table class="ds-table"><tbody><tr><td>bat</td></tr></tbody></table></div>
            <div><table class="ds-table"><tbody>{row}</tbody></table></div>"#
        )
    }

    fn link(path: &str) -> MatchLink {
        MatchLink::new(Url::parse(&format!("https://example.com{path}")).unwrap())
    }

    #[tokio::test]
    async fn test_failed_pages_contribute_nothing() {
        let fetcher = MemoryFetcher::new()
            .with_page("https://example.com/m/1", page("India", "Australia", "Starc"))
            .with_page("https://example.com/m/3", "   ")
            .with_page("https://example.com/m/4", "<span>Only Innings</span>")
            .with_page("https://example.com/m/5", page("England", "Pakistan", "Shaheen"));
        let layout = Layout::compile(&LayoutConfig::default()).unwrap();

        let links = ["/m/1", "/m/2", "/m/3", "/m/4", "/m/5"].map(link).to_vec();
        let (results, report) = aggregate(&fetcher, &layout, links).await;

        let names: Vec<&str> = results.records().iter().map(|r| r.bowler_name.as_str()).collect();
        assert_eq!(names, vec!["Starc", "Shaheen"]);
        assert_eq!(report.pages_processed, 5);
        assert_eq!(report.records, 2);

        let reasons: Vec<&SkipReason> = report.skipped.iter().map(|s| &s.reason).collect();
        assert!(matches!(reasons[0], SkipReason::Fetch(_)));
        assert!(matches!(reasons[1], SkipReason::Parse(_)));
        assert_eq!(reasons[2], &SkipReason::InsufficientTeamNames);
        assert_eq!(report.skipped[0].url, "https://example.com/m/2");
    }

    #[tokio::test]
    async fn test_fetches_in_queue_order() {
        let fetcher = MemoryFetcher::new();
        let layout = Layout::compile(&LayoutConfig::default()).unwrap();

        let links = ["/c", "/a", "/b"].map(link).to_vec();
        let _ = aggregate(&fetcher, &layout, links).await;

        assert_eq!(
            fetcher.requests(),
            vec!["https://example.com/c", "https://example.com/a", "https://example.com/b"]
        );
    }
}
