//! course-scout: crawls a golf-course website, extracts structured page
//! content, and fits it into a fixed LLM token budget.
//!
//! The crawl is sequential through one WebDriver session: the seed page's
//! links are classified and prioritized once, a bounded number of pages is
//! fetched, and the payload optimizer prunes, deduplicates, and truncates
//! the result until it fits the configured budget.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod fetcher;
pub mod filter;
pub mod links;
pub mod optimizer;
pub mod payload;
pub mod results;
pub mod similarity;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{CrawlConfig, PayloadBudget};
pub use crawler::{CrawlError, Crawler};
pub use optimizer::OptimizeReport;
pub use payload::{CrawlPayload, ImportantUrls};
pub use results::PageRecord;

/// Everything a caller gets back from one crawl: the budgeted payload for
/// the extraction collaborator, the important-URLs map for persistence,
/// and the optimizer diagnostics.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub payload: CrawlPayload,
    pub important_urls: ImportantUrls,
    pub report: OptimizeReport,
}

/// Builder for configuring and running one crawl.
pub struct CourseCrawl {
    config: CrawlConfig,
    budget: PayloadBudget,
}

impl CourseCrawl {
    /// Create a new crawl builder for the given seed URL.
    pub fn new(seed_url: &str) -> Self {
        Self {
            config: CrawlConfig::new(seed_url),
            budget: PayloadBudget::default(),
        }
    }

    /// Set the maximum number of pages to collect, seed included.
    pub fn with_page_budget(mut self, pages: usize) -> Self {
        self.config.page_budget = pages;
        self
    }

    /// Set the WebDriver endpoint to drive the browser through.
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Set the delay between successive page fetches.
    pub fn with_request_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.request_delay_ms = delay_ms;
        self
    }

    /// Replace the payload token-budget policy.
    pub fn with_budget(mut self, budget: PayloadBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Run the crawl and the payload optimizer.
    ///
    /// Errors only for pre-crawl failures (bad seed URL, WebDriver
    /// connection). A seed page that cannot be fetched is a successful
    /// outcome with zero pages.
    pub async fn run(self) -> Result<CrawlOutcome, CrawlError> {
        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        let crawler = Crawler::connect(config).await?;
        let pages = crawler.crawl().await;
        crawler.close().await;

        // Derived before optimization so link data is still complete
        let important_urls = ImportantUrls::derive(&pages);

        let (optimized, report) = optimizer::optimize(&pages, &self.budget);
        let payload = CrawlPayload::build(optimized);

        Ok(CrawlOutcome {
            payload,
            important_urls,
            report,
        })
    }
}
