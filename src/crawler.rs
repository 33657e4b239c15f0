//! Crawl orchestration.
//!
//! Drives fetch → classify → enqueue → fetch-next over a bounded page
//! budget: the seed page's links are classified and prioritized exactly
//! once, the resulting queue is drained sequentially with a politeness
//! delay, and a fallback probe of conventional scorecard paths runs only
//! when no scorecard link was discovered organically. Individual page
//! failures are absorbed; only a failed seed fetch ends the crawl early.

use crate::config::CrawlConfig;
use crate::extract::Extractor;
use crate::fetcher::PageFetcher;
use crate::filter::LinkFilter;
use crate::links;
use crate::results::PageRecord;
use fantoccini::{Client, ClientBuilder};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use url::Url;

/// Conventional scorecard locations probed when no scorecard link was
/// found on the seed page. First HTTP success wins.
const PROBE_PATHS: &[&str] = &[
    "/scorecard",
    "/score-card",
    "/golf/scorecard",
    "/course/scorecard",
    "/course-info",
    "/course-tour",
    "/the-course",
    "/golf-course",
];

const PROBE_TIMEOUT_SECS: u64 = 10;

/// Fetch seam for the crawl loop; lets the loop be driven by a stub in
/// tests where no browser session exists.
pub(crate) trait FetchPage {
    async fn fetch(&self, url: &str, is_first_page: bool) -> Option<PageRecord>;
}

impl FetchPage for PageFetcher<'_> {
    async fn fetch(&self, url: &str, is_first_page: bool) -> Option<PageRecord> {
        PageFetcher::fetch(self, url, is_first_page).await
    }
}

/// Failures that prevent a crawl from starting at all. Everything past
/// session setup is absorbed into the page list instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL: {0}")]
    InvalidSeedUrl(#[from] url::ParseError),

    #[error("failed to connect to WebDriver: {0}")]
    WebDriver(#[from] fantoccini::error::NewSessionError),

    #[error("invalid extraction pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("failed to build HTTP probe client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Mutable per-session state, owned exclusively by the orchestrator and
/// dropped when the crawl ends.
#[derive(Debug, Default)]
pub struct CrawlState {
    /// URLs for which a fetch was attempted (success or failure).
    pub visited: HashSet<String>,

    /// Prioritized visitation queue, built once from the seed page.
    pub queue: VecDeque<String>,

    /// Collected pages; index 0 is always the seed page.
    pub pages: Vec<PageRecord>,

    /// Whether classification found any scorecard-category link.
    pub scorecard_link_found: bool,
}

/// One crawl session: a browser client, an HTTP probe client, and the
/// extraction pipeline, bound to a validated seed URL.
pub struct Crawler {
    client: Client,
    http: reqwest::Client,
    extractor: Extractor,
    filter: LinkFilter,
    seed: Url,
    config: CrawlConfig,
}

impl Crawler {
    /// Validates the seed URL and connects to the WebDriver instance.
    pub async fn connect(config: CrawlConfig) -> Result<Self, CrawlError> {
        let seed = Url::parse(&config.seed_url)?;
        let filter = LinkFilter::new(&seed)?;
        let extractor = Extractor::new(config.fetch.clone())?;

        let client = ClientBuilder::native().connect(&config.webdriver_url).await?;
        ::log::info!("Connected to WebDriver at {}", config.webdriver_url);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            http,
            extractor,
            filter,
            seed,
            config,
        })
    }

    /// Runs the crawl to completion and returns the collected pages.
    ///
    /// An empty result means the seed page itself could not be fetched;
    /// callers must treat zero pages as "nothing usable was found", not as
    /// a crash.
    pub async fn crawl(&self) -> Vec<PageRecord> {
        let fetcher = PageFetcher::new(&self.client, &self.extractor, &self.filter, &self.config.fetch);
        let mut state = collect_pages(&fetcher, &self.filter, &self.seed, &self.config).await;

        if !state.scorecard_link_found && state.pages.len() < self.config.page_budget {
            self.fallback_probe(&fetcher, &mut state).await;
        }

        ::log::info!("Crawl complete: {} pages collected", state.pages.len());
        state.pages
    }

    /// Probes conventional scorecard paths with a lightweight HEAD check,
    /// fetching the first one that exists. Not exhaustive by design.
    async fn fallback_probe<F: FetchPage>(&self, fetcher: &F, state: &mut CrawlState) {
        ::log::info!("No scorecard link found, probing conventional paths");

        for path in PROBE_PATHS {
            let Ok(candidate) = self.seed.join(path) else {
                continue;
            };
            let candidate = self.filter.normalize(&candidate).to_string();
            if state.visited.contains(&candidate) {
                continue;
            }

            let exists = match self.http.head(candidate.as_str()).send().await {
                Ok(response) => probe_hit(response.status()),
                Err(e) => {
                    ::log::debug!("Probe failed for {}: {}", candidate, e);
                    false
                }
            };
            if !exists {
                continue;
            }

            ::log::info!("Probe hit: {}", candidate);
            sleep(Duration::from_millis(self.config.request_delay_ms)).await;

            let page = fetcher.fetch(&candidate, false).await;
            state.visited.insert(candidate.clone());
            match page {
                Some(page) => {
                    state.visited.insert(page.url.clone());
                    state.pages.push(page);
                }
                None => {
                    ::log::warn!("Probe page could not be fetched: {}", candidate);
                }
            }
            return;
        }

        ::log::info!("Fallback probe exhausted with no hits");
    }

    /// Closes the browser session.
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }
    }
}

/// Seed fetch, one-time link classification, and queue drain.
///
/// A failed seed fetch ends the crawl immediately: the returned state
/// carries zero pages and the caller surfaces that as an empty result.
async fn collect_pages<F: FetchPage>(
    fetcher: &F,
    filter: &LinkFilter,
    seed: &Url,
    config: &CrawlConfig,
) -> CrawlState {
    let mut state = CrawlState::default();

    let seed_url = filter.normalize(seed).to_string();
    ::log::info!("Fetching seed page: {}", seed_url);

    let seed_page = fetcher.fetch(&seed_url, true).await;
    state.visited.insert(seed_url.clone());

    let Some(seed_page) = seed_page else {
        ::log::error!("Seed page fetch failed, ending crawl with no pages");
        return state;
    };
    state.visited.insert(seed_page.url.clone());
    state.pages.push(seed_page);

    // Link prioritization happens exactly once, from the seed page only
    let buckets = links::classify(&state.pages[0].internal_links, &state.visited);
    state.scorecard_link_found = buckets.has_scorecard();
    state.queue = links::prioritize(&buckets).into();
    ::log::info!(
        "Classified {} seed links into a queue of {}",
        state.pages[0].internal_links.len(),
        state.queue.len()
    );

    while let Some(url) = state.queue.pop_front() {
        if state.pages.len() >= config.page_budget {
            ::log::info!("Page budget of {} reached", config.page_budget);
            break;
        }
        if state.visited.contains(&url) {
            continue;
        }

        sleep(Duration::from_millis(config.request_delay_ms)).await;

        let page = fetcher.fetch(&url, false).await;
        state.visited.insert(url.clone());
        match page {
            Some(page) => {
                ::log::info!("Fetched page {}: {}", state.pages.len() + 1, page.url);
                state.visited.insert(page.url.clone());
                state.pages.push(page);
            }
            None => {
                ::log::warn!("Skipping unfetchable page: {}", url);
            }
        }
    }

    state
}

/// Any non-error HTTP status counts as a probe hit; scorecard pages are
/// often fronted by a redirect to their real location.
fn probe_hit(status: reqwest::StatusCode) -> bool {
    status.as_u16() < 400
}
