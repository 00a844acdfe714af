//! End-to-end runs against mock listing servers
use std::path::Path;
use std::time::Duration;

use market_scraper_lib::infrastructure::config::{AppConfig, SiteProfile};
use market_scraper_lib::run_scrape;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEPARATOR: &str = "***\n***\n***\n";

fn coin_row(rank: u32, name: &str, symbol: &str) -> String {
    format!(
        r#"<tr class="arz-coin-tr" data-symbol="{symbol}" data-name="{name}">
             <td class="arz-coin-table__number-td"><span>{rank}</span></td>
             <td class="arz-coin-table__name-td">
               <img class="arz-coin-image" data-src="https://cdn.test/{symbol}.png">
               <a href="/coins/{symbol}/"><span>{name}</span></a>
             </td>
             <td class="arz-coin-table__price-td"><span>${rank}.00</span></td>
             <td class="arz-coin-table__rial-price-td"><span><span>{rank}0,000</span></span></td>
             <td class="arz-coin-table__marketcap-td"><span dir="auto">${rank}M</span><span class="arz-value-unit">{rank} T</span></td>
             <td class="arz-coin-table__volume-td"><span dir="auto">${rank}K</span><span class="arz-value-unit">{rank} B</span></td>
             <td class="arz-coin-table__daily-swing-td"><span class="arz-positive">1.5%</span></td>
             <td class="arz-coin-table__weekly-swing-td"><span class="arz-negative">0.5%</span></td>
           </tr>"#
    )
}

fn listing(rows: &[String]) -> String {
    format!(
        "<html><body><table><tbody>{}</tbody></table></body></html>",
        rows.concat()
    )
}

async fn mount_page(server: &MockServer, route: &str, body: String, delay_ms: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .set_delay(Duration::from_millis(delay_ms)),
        )
        .mount(server)
        .await;
}

fn coin_config(server: &MockServer, pages: u32, output: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.scrape.base_url = Some(format!("{}/coins/", server.uri()));
    config.scrape.page_count = pages;
    config.scrape.request_timeout_seconds = Some(5);
    config.output.path = Some(output.to_path_buf());
    config
}

fn blocks(contents: &str) -> Vec<&str> {
    contents.split(SEPARATOR).collect()
}

fn rank_line(block: &str) -> &str {
    block.lines().next().unwrap_or_default()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn records_are_written_in_page_order_despite_delays() {
    let server = MockServer::start().await;
    // first pages answer last
    mount_page(&server, "/coins/", listing(&[coin_row(1, "Bitcoin", "BTC"), coin_row(2, "Ethereum", "ETH")]), 300).await;
    mount_page(&server, "/coins/page-2/", listing(&[coin_row(3, "Tether", "USDT")]), 150).await;
    mount_page(&server, "/coins/page-3/", listing(&[coin_row(4, "BNB", "BNB"), coin_row(5, "Solana", "SOL")]), 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("arzdigital_data.txt");
    let summary = run_scrape(&coin_config(&server, 3, &output)).await.unwrap();

    assert_eq!(summary.pages_attempted, 3);
    assert_eq!(summary.pages_failed, 0);
    assert_eq!(summary.records_written, 5);

    let contents = std::fs::read_to_string(&output).unwrap();
    let ranks: Vec<&str> = blocks(&contents).into_iter().map(rank_line).collect();
    assert_eq!(ranks, vec!["Rank: 1", "Rank: 2", "Rank: 3", "Rank: 4", "Rank: 5"]);
    assert!(!contents.ends_with(SEPARATOR));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn random_completion_order_never_changes_the_output() {
    let server = MockServer::start().await;
    let mut rng = fastrand::Rng::with_seed(7);
    let pages = 6;

    for page in 1..=pages {
        let route = if page == 1 {
            "/coins/".to_string()
        } else {
            format!("/coins/page-{page}/")
        };
        let row = coin_row(page, &format!("Coin{page}"), &format!("C{page}"));
        mount_page(&server, &route, listing(&[row]), rng.u64(0..200)).await;
    }

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");
    run_scrape(&coin_config(&server, pages, &output)).await.unwrap();

    let contents = std::fs::read_to_string(&output).unwrap();
    let names: Vec<String> = blocks(&contents)
        .iter()
        .filter_map(|block| block.lines().nth(1).map(str::to_string))
        .collect();
    let expected: Vec<String> = (1..=pages).map(|page| format!("Name: Coin{page}")).collect();
    assert_eq!(names, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn failed_page_contributes_nothing() {
    let server = MockServer::start().await;
    mount_page(&server, "/coins/", listing(&[coin_row(1, "Bitcoin", "BTC")]), 0).await;
    Mock::given(method("GET"))
        .and(path("/coins/page-2/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/coins/page-3/", listing(&[coin_row(3, "Tether", "USDT")]), 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");
    let summary = run_scrape(&coin_config(&server, 3, &output)).await.unwrap();

    assert_eq!(summary.pages_failed, 1);
    assert_eq!(summary.records_written, 2);

    let contents = std::fs::read_to_string(&output).unwrap();
    let ranks: Vec<&str> = blocks(&contents).into_iter().map(rank_line).collect();
    assert_eq!(ranks, vec!["Rank: 1", "Rank: 3"]);
}

#[tokio::test]
async fn complete_block_lists_every_field_in_order() {
    let server = MockServer::start().await;
    mount_page(&server, "/coins/", listing(&[coin_row(1, "Bitcoin", "BTC")]), 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");
    run_scrape(&coin_config(&server, 1, &output)).await.unwrap();

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        contents,
        "Rank: 1\n\
         Name: Bitcoin\n\
         Slug: BTC\n\
         Price_USD: $1.00\n\
         Price_Toman: 10,000\n\
         Total_Market_USD: $1M\n\
         Total_Market_Toman: 1 T\n\
         Daily_Market_USD: $1K\n\
         Daily_Market_Toman: 1 B\n\
         Daily_Positive_Negative: +1.5%\n\
         Weekly_Positive_Negative: -0.5%\n\
         Logo: https://cdn.test/BTC.png\n"
    );
}

#[tokio::test]
async fn missing_optional_fields_render_as_placeholder_and_broken_rows_drop() {
    let server = MockServer::start().await;
    let sparse = r#"<tr class="arz-coin-tr">
        <td class="arz-coin-table__number-td"><span>9</span></td>
        <td class="arz-coin-table__name-td"><a><span>Sparse</span></a></td>
        <td class="arz-coin-table__price-td"><span>$0.10</span></td>
        <td class="arz-coin-table__marketcap-td"></td>
        <td class="arz-coin-table__volume-td"></td>
    </tr>"#;
    let broken = r#"<tr class="arz-coin-tr"><td class="arz-coin-table__number-td"><span>10</span></td></tr>"#;
    mount_page(&server, "/coins/", listing(&[sparse.to_string(), broken.to_string()]), 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.txt");
    let summary = run_scrape(&coin_config(&server, 1, &output)).await.unwrap();

    assert_eq!(summary.records_written, 1);
    assert_eq!(summary.skipped_rows, 1);

    let contents = std::fs::read_to_string(&output).unwrap();
    assert!(contents.contains("Slug: N/A\n"));
    assert!(contents.contains("Price_Toman: N/A\n"));
    assert!(contents.contains("Logo: N/A\n"));
}

#[tokio::test]
async fn repeated_runs_produce_identical_files() {
    let server = MockServer::start().await;
    mount_page(&server, "/coins/", listing(&[coin_row(1, "Bitcoin", "BTC")]), 20).await;
    mount_page(&server, "/coins/page-2/", listing(&[coin_row(2, "Ethereum", "ETH")]), 0).await;

    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.txt");
    let second = dir.path().join("second.txt");

    run_scrape(&coin_config(&server, 2, &first)).await.unwrap();
    run_scrape(&coin_config(&server, 2, &second)).await.unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), std::fs::read(&second).unwrap());
}

#[tokio::test]
async fn quote_profile_without_blocks_writes_diagnostic_line() {
    let server = MockServer::start().await;
    mount_page(&server, "/widget", "<html><body><p>maintenance</p></body></html>".into(), 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("quote_price.txt");
    let mut config = AppConfig::default();
    config.scrape.profile = SiteProfile::QuoteTicker;
    config.scrape.base_url = Some(format!("{}/widget", server.uri()));
    config.output.path = Some(output.clone());

    let summary = run_scrape(&config).await.unwrap();
    assert_eq!(summary.pages_attempted, 1);
    assert_eq!(summary.records_written, 0);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "No data retrieved.\n");
}

#[tokio::test]
async fn quote_profile_writes_dollar_prices() {
    let server = MockServer::start().await;
    let widget = r#"<html><body>
        <div class="ticker-block"><div class="circleFlagMain"><img src="eu.svg"></div>
          <strong>EUR/USD</strong>
          <div class="ticker-bottom"><span>1.0850</span><span>1.0848</span><span>0.12%</span></div>
        </div></body></html>"#;
    mount_page(&server, "/widget", widget.into(), 0).await;

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("quote_price.txt");
    let mut config = AppConfig::default();
    config.scrape.profile = SiteProfile::QuoteTicker;
    config.scrape.base_url = Some(format!("{}/widget", server.uri()));
    config.output.path = Some(output.clone());

    run_scrape(&config).await.unwrap();
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Rank: 1\nName: EUR/USD\nSlug: EUR/USD\nPrice_USD: $1.0850\nDaily_Positive_Negative: 0.12%\nLogo: eu.svg\n"
    );
}

#[tokio::test]
async fn unreachable_output_location_is_an_error() {
    let server = MockServer::start().await;
    mount_page(&server, "/coins/", listing(&[coin_row(1, "Bitcoin", "BTC")]), 0).await;

    let dir = tempfile::tempdir().unwrap();
    // a regular file where the output directory should be
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "x").unwrap();

    let config = coin_config(&server, 1, &blocker.join("out.txt"));
    assert!(run_scrape(&config).await.is_err());
}
