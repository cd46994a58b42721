use std::path::PathBuf;

use bowling_scrape::aggregate::SkipReason;
use bowling_scrape::config::{Config, OutputFormat};
use bowling_scrape::fetch::MemoryFetcher;
use bowling_scrape::output::{FileWriter, MemoryWriter};
use bowling_scrape::robots::RobotsGate;
use bowling_scrape::{run, ScrapeError};

const INDEX_URL: &str = "https://cricket.test/records/tournament/team-match-results/world-cup-2023-24-15338";
const BASE_URL: &str = "https://cricket.test";

fn config() -> Config {
    Config::default()
        .with_index_url(INDEX_URL)
        .with_base_url(BASE_URL)
}

fn index_page(hrefs: &[Option<&str>]) -> String {
    let rows: String = hrefs
        .iter()
        .map(|href| {
            let link = match href {
                Some(h) => format!(r#"<a href="{h}"><span>ODI # 1</span></a>"#),
                None => "-".to_string(),
            };
            format!(
                "<tr><td>A</td><td>B</td><td>won</td><td>runs</td><td>Venue</td><td>Date</td><td>{link}</td></tr>"
            )
        })
        .collect();

    format!(
        r#"<html><body><div>
        <table class="ds-w-full ds-table ds-table-xs">
        <thead><tr><th>Team 1</th><th>Team 2</th><th>Winner</th><th>Margin</th><th>Ground</th><th>Match Date</th><th>Scorecard</th></tr></thead>
        <tbody>{rows}</tbody>
        </table></div></body></html>"#
    )
}

fn bowler_row(name: &str) -> String {
    format!(
        r#"<tr class="ds-border-b">
        <td><div class="ds-flex"><a href="/cricketers/{name}" title="{name}"><span class="ds-text-tight-s">{name}</span></a></div></td>
        <td>10</td><td>0</td><td>55</td><td>1</td><td>5.50</td><td>28</td><td>5</td><td>2</td><td>3</td><td>1</td>
        </tr>
        <tr class="ds-hidden"><td colspan="11"><div>commentary</div></td></tr>"#
    )
}

fn scorecard(team1: &str, team2: &str, first: &[&str], second: &[&str]) -> String {
    let bowling = |names: &[&str]| -> String {
        format!(
            r#"<div><table class="ds-w-full ds-table ds-table-md">
            <thead><tr><th>Bowling</th><th>O</th><th>M</th><th>R</th><th>W</th><th>ECON</th><th>0s</th><th>4s</th><th>6s</th><th>WD</th><th>NB</th></tr></thead>
            <tbody>{}</tbody></table></div>"#,
            names.iter().map(|n| bowler_row(n)).collect::<String>()
        )
    };
    let batting = r#"<div><table class="ds-w-full ds-table ds-table-md">
        <tbody><tr><td>Batter</td><td>b Someone</td><td>12</td><td>20</td></tr>
        <tr><td>Extras</td><td>(w 3)</td></tr><tr><td>Total</td><td>250</td></tr></tbody></table></div>"#;

    format!(
        r#"<html><body>
        <div><span class="ds-text-title-xs">{team1} Innings</span></div>
        {batting}{}
        <div><span class="ds-text-title-xs">{team2} Innings</span></div>
        {batting}{}
        </body></html>"#,
        bowling(first),
        bowling(second)
    )
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bowling_scrape_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[tokio::test]
async fn test_full_run_writes_csv_in_discovery_order() {
    let fetcher = MemoryFetcher::new()
        .with_page(INDEX_URL, index_page(&[Some("/series/m1/full-scorecard"), None, Some("/series/m2/full-scorecard")]))
        .with_page(
            "https://cricket.test/series/m1/full-scorecard",
            scorecard("India", "Australia", &["Starc", "Hazlewood", "Cummins"], &["Bumrah", "Siraj"]),
        )
        .with_page(
            "https://cricket.test/series/m2/full-scorecard",
            scorecard("England", "New Zealand", &["Boult"], &["Wood"]),
        );

    let dir = temp_dir("csv");
    let config = config().with_output_dir(&dir);
    let mut writer = FileWriter::new(&config.output_dir, config.format);

    let summary = run(&config, &fetcher, &mut writer).await.unwrap();

    assert_eq!(summary.path, dir.join("bowlingdata2023.csv"));
    assert_eq!(summary.records, 7);
    assert!(summary.report.skipped.is_empty());

    let text = std::fs::read_to_string(&summary.path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "match,bowlingTeam,bowlerName,overs,maiden,runs,wickets,economy,0s,4s,6s,wides,noBalls"
    );
    assert_eq!(lines[1], "India Vs Australia,Australia,Starc,10,0,55,1,5.50,28,5,2,3,1");
    assert_eq!(lines[4], "India Vs Australia,India,Bumrah,10,0,55,1,5.50,28,5,2,3,1");
    assert_eq!(lines[6], "England Vs New Zealand,New Zealand,Boult,10,0,55,1,5.50,28,5,2,3,1");
    assert_eq!(lines[7], "England Vs New Zealand,England,Wood,10,0,55,1,5.50,28,5,2,3,1");
    assert_eq!(lines.len(), 8);

    // identical input, identical bytes
    let again = run(&config, &fetcher, &mut writer).await.unwrap();
    assert_eq!(std::fs::read_to_string(&again.path).unwrap(), text);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_failing_page_is_skipped_without_gap() {
    let fetcher = MemoryFetcher::new()
        .with_page(INDEX_URL, index_page(&[Some("/m/1"), Some("/m/2"), Some("/m/3")]))
        .with_page("https://cricket.test/m/1", scorecard("India", "Pakistan", &["Shaheen"], &["Kuldeep"]))
        .with_page("https://cricket.test/m/2", "<html><body><p>No result</p></body></html>")
        .with_page("https://cricket.test/m/3", scorecard("Sri Lanka", "Afghanistan", &["Rashid"], &["Theekshana"]));
    let mut writer = MemoryWriter::default();

    let summary = run(&config(), &fetcher, &mut writer).await.unwrap();

    let (year, records) = &writer.written[0];
    assert_eq!(year.as_str(), "2023");
    let names: Vec<&str> = records.iter().map(|r| r.bowler_name.as_str()).collect();
    assert_eq!(names, vec!["Shaheen", "Kuldeep", "Rashid", "Theekshana"]);

    assert_eq!(summary.report.skipped.len(), 1);
    assert_eq!(summary.report.skipped[0].url, "https://cricket.test/m/2");
    assert_eq!(summary.report.skipped[0].reason, SkipReason::InsufficientTeamNames);
}

#[tokio::test]
async fn test_empty_discovery_aborts_without_writing() {
    let fetcher = MemoryFetcher::new().with_page(INDEX_URL, index_page(&[None, None]));
    let mut writer = MemoryWriter::default();

    let err = run(&config(), &fetcher, &mut writer).await.unwrap_err();

    assert!(matches!(err, ScrapeError::EmptyDiscovery { .. }));
    assert!(writer.written.is_empty());
}

#[tokio::test]
async fn test_missing_year_aborts() {
    let index = "https://cricket.test/records/world-cup";
    let fetcher = MemoryFetcher::new()
        .with_page(index, index_page(&[Some("/m/1")]))
        .with_page("https://cricket.test/m/1", scorecard("India", "Pakistan", &["Shaheen"], &[]));
    let mut writer = MemoryWriter::default();

    let err = run(&config().with_index_url(index), &fetcher, &mut writer)
        .await
        .unwrap_err();

    assert!(matches!(err, ScrapeError::EmptyDiscovery { .. }));
    assert!(writer.written.is_empty());
}

#[tokio::test]
async fn test_unreachable_index_aborts() {
    let fetcher = MemoryFetcher::new();
    let mut writer = MemoryWriter::default();

    let err = run(&config(), &fetcher, &mut writer).await.unwrap_err();
    assert!(matches!(err, ScrapeError::EmptyDiscovery { .. }));
}

#[tokio::test]
async fn test_jsonl_output() {
    let fetcher = MemoryFetcher::new()
        .with_page(INDEX_URL, index_page(&[Some("/m/1")]))
        .with_page("https://cricket.test/m/1", scorecard("India", "Pakistan", &["Shaheen"], &["Kuldeep"]));

    let dir = temp_dir("jsonl");
    let config = config().with_output_dir(&dir).with_format(OutputFormat::Jsonl);
    let mut writer = FileWriter::new(&config.output_dir, config.format);

    let summary = run(&config, &fetcher, &mut writer).await.unwrap();
    assert_eq!(summary.path, dir.join("bowlingdata2023.jsonl"));

    let text = std::fs::read_to_string(&summary.path).unwrap();
    let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
    assert_eq!(first["match"], "India Vs Pakistan");
    assert_eq!(first["bowlingTeam"], "Pakistan");
    assert_eq!(first["noBalls"], "1");

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn test_robots_disallowed_pages_are_skipped() {
    let fetcher = MemoryFetcher::new()
        .with_page("https://cricket.test/robots.txt", "User-agent: *\nDisallow: /m/2\n")
        .with_page(INDEX_URL, index_page(&[Some("/m/1"), Some("/m/2")]))
        .with_page("https://cricket.test/m/1", scorecard("India", "Pakistan", &["Shaheen"], &[]))
        .with_page("https://cricket.test/m/2", scorecard("England", "Australia", &["Starc"], &[]));
    let gate = RobotsGate::new(fetcher, "bowling_scrape");
    let mut writer = MemoryWriter::default();

    let summary = run(&config().with_respect_robots(true), &gate, &mut writer)
        .await
        .unwrap();

    assert_eq!(summary.records, 1);
    assert_eq!(summary.report.skipped[0].reason, SkipReason::Disallowed);
}
