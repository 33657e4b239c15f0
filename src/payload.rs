//! Final payload assembly for the LLM-extraction and persistence
//! collaborators.

use crate::optimizer::prune_json;
use crate::results::PageRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Summary flags describing what the crawl found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayloadMetadata {
    pub total_pages: usize,
    pub main_url: String,
    pub has_scorecard_page: bool,
    pub has_rates_page: bool,
    pub has_about_page: bool,
    pub has_membership_page: bool,
}

/// The bounded, deduplicated content bundle handed to the extraction
/// collaborator. Pages are expected to have passed through the optimizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlPayload {
    pub metadata: PayloadMetadata,
    pub pages: Vec<PageRecord>,
}

/// Category landing pages discovered during the crawl, for the persistence
/// collaborator. Derived by a first-match scan over page URLs, then over
/// every page's internal links.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportantUrls {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scorecard_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tee_time_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_website: Option<String>,
}

const SCORECARD_KEYWORDS: &[&str] = &["scorecard", "score-card", "score_card"];
const RATES_KEYWORDS: &[&str] = &["rates", "pricing", "fees", "green-fees", "prices"];
const ABOUT_KEYWORDS: &[&str] = &["about", "history", "our-story"];
const MEMBERSHIP_KEYWORDS: &[&str] = &["membership", "join"];
const TEE_TIME_KEYWORDS: &[&str] = &["tee-time", "teetime", "tee_time", "tee-times"];
const RESERVATION_KEYWORDS: &[&str] = &["book", "reserve", "reservation"];

fn url_matches(url: &str, keywords: &[&str]) -> bool {
    let lower = url.to_lowercase();
    keywords.iter().any(|kw| lower.contains(kw))
}

/// First page URL matching `keywords`, falling back to the first matching
/// internal link across all pages.
fn first_match(pages: &[PageRecord], keywords: &[&str]) -> Option<String> {
    for page in pages {
        if url_matches(&page.url, keywords) {
            return Some(page.url.clone());
        }
    }
    for page in pages {
        for link in &page.internal_links {
            if url_matches(&link.href, keywords) {
                return Some(link.href.clone());
            }
        }
    }
    None
}

impl ImportantUrls {
    pub fn derive(pages: &[PageRecord]) -> Self {
        Self {
            scorecard_url: first_match(pages, SCORECARD_KEYWORDS),
            rates_url: first_match(pages, RATES_KEYWORDS),
            about_url: first_match(pages, ABOUT_KEYWORDS),
            membership_url: first_match(pages, MEMBERSHIP_KEYWORDS),
            tee_time_url: first_match(pages, TEE_TIME_KEYWORDS),
            reservation_url: first_match(pages, RESERVATION_KEYWORDS),
            main_website: pages.first().map(|p| p.url.clone()),
        }
    }
}

impl CrawlPayload {
    /// Assembles the payload from optimized pages. `pages[0]` is the seed
    /// page when the crawl succeeded; an empty slice yields an empty
    /// payload, not an error.
    pub fn build(pages: Vec<PageRecord>) -> Self {
        let metadata = PayloadMetadata {
            total_pages: pages.len(),
            main_url: pages.first().map(|p| p.url.clone()).unwrap_or_default(),
            has_scorecard_page: pages.iter().any(|p| url_matches(&p.url, SCORECARD_KEYWORDS)),
            has_rates_page: pages.iter().any(|p| url_matches(&p.url, RATES_KEYWORDS)),
            has_about_page: pages.iter().any(|p| url_matches(&p.url, ABOUT_KEYWORDS)),
            has_membership_page: pages
                .iter()
                .any(|p| url_matches(&p.url, MEMBERSHIP_KEYWORDS)),
        };

        Self { metadata, pages }
    }

    /// Serializes through empty-field pruning so the JSON carries no
    /// nulls, empty strings, or empty collections.
    pub fn to_value(&self) -> Value {
        prune_json(serde_json::to_value(self).unwrap_or(Value::Null))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{CategoryFlags, InternalLink};

    fn page(url: &str) -> PageRecord {
        PageRecord {
            url: url.to_string(),
            ..PageRecord::default()
        }
    }

    fn link(href: &str) -> InternalLink {
        InternalLink {
            text: String::new(),
            href: href.to_string(),
            flags: CategoryFlags::default(),
        }
    }

    #[test]
    fn test_metadata_flags_from_page_urls() {
        let pages = vec![
            page("https://x.com/"),
            page("https://x.com/scorecard"),
            page("https://x.com/rates"),
        ];
        let payload = CrawlPayload::build(pages);
        assert_eq!(payload.metadata.total_pages, 3);
        assert_eq!(payload.metadata.main_url, "https://x.com/");
        assert!(payload.metadata.has_scorecard_page);
        assert!(payload.metadata.has_rates_page);
        assert!(!payload.metadata.has_about_page);
    }

    #[test]
    fn test_empty_crawl_builds_empty_payload() {
        let payload = CrawlPayload::build(Vec::new());
        assert_eq!(payload.metadata.total_pages, 0);
        assert_eq!(payload.metadata.main_url, "");
        assert!(payload.pages.is_empty());
    }

    #[test]
    fn test_important_urls_prefer_fetched_pages() {
        let mut seed = page("https://x.com/");
        seed.internal_links.push(link("https://x.com/other-scorecard"));
        let pages = vec![seed, page("https://x.com/scorecard")];

        let urls = ImportantUrls::derive(&pages);
        // The fetched scorecard page wins over the internal link
        assert_eq!(urls.scorecard_url.as_deref(), Some("https://x.com/scorecard"));
        assert_eq!(urls.main_website.as_deref(), Some("https://x.com/"));
    }

    #[test]
    fn test_important_urls_fall_back_to_internal_links() {
        let mut seed = page("https://x.com/");
        seed.internal_links.push(link("https://x.com/membership"));
        seed.internal_links.push(link("https://x.com/tee-times"));

        let urls = ImportantUrls::derive(&[seed]);
        assert_eq!(urls.membership_url.as_deref(), Some("https://x.com/membership"));
        assert_eq!(urls.tee_time_url.as_deref(), Some("https://x.com/tee-times"));
        assert!(urls.scorecard_url.is_none());
    }

    #[test]
    fn test_to_value_prunes_empty_fields() {
        let payload = CrawlPayload::build(vec![page("https://x.com/")]);
        let value = payload.to_value();
        let page_obj = &value["pages"][0];
        assert!(page_obj.get("title").is_none());
        assert!(page_obj.get("headings").is_none());
        assert_eq!(page_obj["url"], "https://x.com/");
    }
}
