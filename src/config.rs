use serde::{Deserialize, Serialize};

/// Configuration for one crawl session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URL to start crawling from (the seed page).
    pub seed_url: String,

    /// Maximum number of pages to collect, seed included.
    #[serde(default = "default_page_budget")]
    pub page_budget: usize,

    /// Fixed delay between successive page fetches, in milliseconds.
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// URL for the WebDriver instance.
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Per-fetch navigation and extraction limits.
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Navigation and extraction limits applied to every fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Timeout for the strict (load-stable) navigation attempt, seconds.
    #[serde(default = "default_nav_timeout_secs")]
    pub nav_timeout_secs: u64,

    /// Timeout for the relaxed retry attempt, seconds.
    #[serde(default = "default_relaxed_timeout_secs")]
    pub relaxed_timeout_secs: u64,

    /// Hard cap on a page's cleaned main-content text, in characters.
    #[serde(default = "default_text_cap")]
    pub text_cap: usize,

    /// Maximum internal links kept per page.
    #[serde(default = "default_max_internal_links")]
    pub max_internal_links: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            nav_timeout_secs: default_nav_timeout_secs(),
            relaxed_timeout_secs: default_relaxed_timeout_secs(),
            text_cap: default_text_cap(),
            max_internal_links: default_max_internal_links(),
        }
    }
}

impl CrawlConfig {
    /// Create a new configuration with default values.
    pub fn new(seed_url: &str) -> Self {
        Self {
            seed_url: seed_url.to_string(),
            page_budget: default_page_budget(),
            request_delay_ms: default_request_delay_ms(),
            webdriver_url: default_webdriver_url(),
            fetch: FetchConfig::default(),
        }
    }
}

/// One named tier of the progressive-truncation pipeline. Tiers are applied
/// in order, each one a stricter set of per-field caps than the last.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruncationTier {
    pub name: String,

    /// Cap on the main text field, characters.
    pub text_cap: usize,

    /// Cap on each topical snippet list (prices, amenities, ...).
    pub snippet_cap: usize,

    /// Cap on the headings list.
    pub heading_cap: usize,

    /// Maximum tables kept.
    pub table_cap: usize,

    /// Maximum rows kept per table.
    pub table_row_cap: usize,

    /// Maximum list blocks kept.
    pub list_cap: usize,

    /// Maximum items kept per list block.
    pub list_item_cap: usize,
}

/// Token-budget policy for the payload optimizer. Stateless; passed in per
/// invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadBudget {
    /// Hard ceiling on the estimated LLM-context cost of the payload.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Rough chars-per-token approximation used to estimate cost. This is
    /// a heuristic, not a tokenizer guarantee; keep it configurable.
    #[serde(default = "default_chars_per_token")]
    pub chars_per_token: usize,

    /// Similarity score at or above which text counts as a near-duplicate.
    #[serde(default = "default_dedup_threshold")]
    pub dedup_threshold: f64,

    /// Ordered truncation tiers, mildest first.
    #[serde(default = "default_tiers")]
    pub tiers: Vec<TruncationTier>,

    /// Keyword-matching pages retained (besides the seed) when whole pages
    /// must be dropped.
    #[serde(default = "default_max_keyword_pages")]
    pub max_keyword_pages: usize,
}

impl Default for PayloadBudget {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            chars_per_token: default_chars_per_token(),
            dedup_threshold: default_dedup_threshold(),
            tiers: default_tiers(),
            max_keyword_pages: default_max_keyword_pages(),
        }
    }
}

impl PayloadBudget {
    /// The budget expressed in serialized characters.
    pub fn max_chars(&self) -> usize {
        self.max_tokens * self.chars_per_token
    }

    /// Estimated token cost of a payload of `chars` characters.
    pub fn estimate_tokens(&self, chars: usize) -> usize {
        chars / self.chars_per_token.max(1)
    }
}

fn default_page_budget() -> usize {
    10
}

fn default_request_delay_ms() -> u64 {
    2000
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_nav_timeout_secs() -> u64 {
    30
}

fn default_relaxed_timeout_secs() -> u64 {
    60
}

fn default_text_cap() -> usize {
    75_000
}

fn default_max_internal_links() -> usize {
    30
}

fn default_max_tokens() -> usize {
    120_000
}

fn default_chars_per_token() -> usize {
    4
}

fn default_dedup_threshold() -> f64 {
    0.85
}

fn default_max_keyword_pages() -> usize {
    3
}

fn default_tiers() -> Vec<TruncationTier> {
    vec![
        TruncationTier {
            name: "trim".to_string(),
            text_cap: 5_000,
            snippet_cap: 5,
            heading_cap: 10,
            table_cap: 3,
            table_row_cap: 15,
            list_cap: 3,
            list_item_cap: 5,
        },
        TruncationTier {
            name: "aggressive".to_string(),
            text_cap: 1_500,
            snippet_cap: 3,
            heading_cap: 5,
            table_cap: 1,
            table_row_cap: 8,
            list_cap: 2,
            list_item_cap: 3,
        },
    ]
}
