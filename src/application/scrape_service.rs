//! One scrape run: collect every configured page, merge in page order,
//! write the output file.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::crawling::{PageCollector, PageFetcher, PageTask};
use crate::infrastructure::config::{AppConfig, FetchStrategy, SiteProfile};
use crate::infrastructure::http_client::{HttpClient, HttpClientConfig};
use crate::infrastructure::parsing::{CoinTableParser, QuoteTickerParser, RecordParser};
use crate::infrastructure::record_writer::write_records;

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub run_id: Uuid,
    pub profile: SiteProfile,
    pub pages_attempted: usize,
    pub pages_failed: usize,
    pub records_written: usize,
    pub skipped_rows: usize,
    pub elapsed: Duration,
    pub output_path: PathBuf,
}

impl ScrapeSummary {
    fn log(&self) {
        info!("=== Scrape run {} finished ===", self.run_id);
        info!("Pages attempted: {}", self.pages_attempted);
        info!("Pages failed: {}", self.pages_failed);
        info!("Rows skipped: {}", self.skipped_rows);
        info!("Records written: {}", self.records_written);
        info!("Elapsed: {:.2?}", self.elapsed);
        info!("Output: {:?}", self.output_path);
    }
}

/// Run a full scrape for `config`
///
/// Page failures are logged and tolerated. Invalid configuration, a fetcher
/// that cannot be set up, or a failed output write are errors.
pub async fn run_scrape(config: &AppConfig) -> Result<ScrapeSummary> {
    config.validate().context("Invalid configuration")?;

    let run_id = Uuid::new_v4();
    let span = info_span!("scrape_run", %run_id, profile = ?config.scrape.profile);

    async move {
        let started = Instant::now();
        let fetcher = build_fetcher(config)?;

        let summary = match config.scrape.profile {
            SiteProfile::CoinTable => {
                let parser = CoinTableParser::with_config(&config.parsing.coin_table)
                    .context("Invalid coin table selectors")?;
                collect_and_write(config, fetcher, parser, run_id, started).await?
            }
            SiteProfile::QuoteTicker => {
                let parser = QuoteTickerParser::with_config(&config.parsing.quote_ticker)
                    .context("Invalid quote ticker selectors")?;
                collect_and_write(config, fetcher, parser, run_id, started).await?
            }
        };

        summary.log();
        Ok::<_, anyhow::Error>(summary)
    }
    .instrument(span)
    .await
}

async fn collect_and_write<P: RecordParser>(
    config: &AppConfig,
    fetcher: Arc<dyn PageFetcher>,
    parser: P,
    run_id: Uuid,
    started: Instant,
) -> Result<ScrapeSummary> {
    let profile = config.scrape.profile;
    let tasks = PageTask::from_urls(&config.scrape.page_urls());
    let collector = PageCollector::new(fetcher, Arc::new(parser), config.scrape.worker_count(tasks.len()));

    let report = collector.collect(tasks).await;

    let output_path = config.output.resolved_path(profile);
    write_records(&output_path, &report.records, config.output.empty_placeholder(profile))
        .await
        .inspect_err(|e| error!("{}", e))
        .with_context(|| format!("Failed to write results to {output_path:?}"))?;

    Ok(ScrapeSummary {
        run_id,
        profile,
        pages_attempted: report.total_pages(),
        pages_failed: report.failed_pages(),
        records_written: report.records.len(),
        skipped_rows: report.skipped_rows(),
        elapsed: started.elapsed(),
        output_path,
    })
}

fn build_fetcher(config: &AppConfig) -> Result<Arc<dyn PageFetcher>> {
    match config.scrape.fetch_strategy {
        FetchStrategy::Http => {
            let client = HttpClient::with_config(HttpClientConfig::from_scrape_config(&config.scrape))
                .context("Failed to create HTTP client")?;
            Ok(Arc::new(client))
        }
        FetchStrategy::Browser => browser_fetcher(config),
    }
}

#[cfg(feature = "browser")]
fn browser_fetcher(config: &AppConfig) -> Result<Arc<dyn PageFetcher>> {
    use crate::infrastructure::browser::BrowserSession;

    let ready_selector = match config.scrape.profile {
        SiteProfile::CoinTable => config.parsing.coin_table.row.clone(),
        SiteProfile::QuoteTicker => config.parsing.quote_ticker.block.clone(),
    };
    let session = BrowserSession::launch(Some(ready_selector), config.scrape.request_timeout())
        .context("Failed to launch headless Chrome")?;
    Ok(Arc::new(session))
}

#[cfg(not(feature = "browser"))]
fn browser_fetcher(_config: &AppConfig) -> Result<Arc<dyn PageFetcher>> {
    anyhow::bail!("The browser fetch strategy requires building with the `browser` feature")
}
