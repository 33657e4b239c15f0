//! Browser-backed page fetching.
//!
//! One WebDriver session drives all fetches for a crawl. Navigation is
//! attempted with a strict load-stable wait first, then retried once with
//! a relaxed condition (upgrading plain-http URLs to https); interstitial
//! overlays are dismissed on the first page only. Unrecoverable navigation
//! failure yields `None`, never an error.

use crate::config::FetchConfig;
use crate::extract::Extractor;
use crate::filter::LinkFilter;
use crate::results::PageRecord;
use fantoccini::key::Key;
use fantoccini::{Client, Locator};
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

/// Overlay dismissal targets, tried in order with a short per-selector
/// wait: aria close labels first, then common cookie-consent buttons.
const DISMISS_SELECTORS: &[&str] = &[
    "[aria-label='Close']",
    "[aria-label='close']",
    "[aria-label='Dismiss']",
    ".modal-close",
    ".popup-close",
    ".close-button",
    "#onetrust-accept-btn-handler",
    ".cookie-accept",
    "button.accept-cookies",
    ".cc-dismiss",
];

/// How long to wait for each dismissal selector before moving on.
const DISMISS_WAIT_MS: u64 = 1200;

/// Wait for the body element after navigation in the strict attempt.
const BODY_WAIT_SECS: u64 = 10;

/// Fetches and extracts one page at a time through a shared browser session.
pub struct PageFetcher<'a> {
    client: &'a Client,
    extractor: &'a Extractor,
    filter: &'a LinkFilter,
    config: &'a FetchConfig,
}

impl<'a> PageFetcher<'a> {
    pub fn new(
        client: &'a Client,
        extractor: &'a Extractor,
        filter: &'a LinkFilter,
        config: &'a FetchConfig,
    ) -> Self {
        Self {
            client,
            extractor,
            filter,
            config,
        }
    }

    /// Navigates to `url` and extracts a [`PageRecord`] from the rendered
    /// DOM. Returns `None` on unrecoverable navigation failure; callers
    /// must still mark the URL visited.
    pub async fn fetch(&self, url: &str, is_first_page: bool) -> Option<PageRecord> {
        let final_url = self.navigate(url).await?;

        if is_first_page {
            self.dismiss_interstitials().await;
        }

        let html = match self.client.source().await {
            Ok(source) => source,
            Err(e) => {
                ::log::error!("Failed to read page source for {}: {}", url, e);
                return None;
            }
        };

        Some(self.extractor.extract(&html, &final_url, self.filter))
    }

    /// Strict attempt (goto + body wait, bounded), then one relaxed retry
    /// (goto only, longer bound) with an http→https upgrade when possible.
    async fn navigate(&self, url: &str) -> Option<Url> {
        let strict = Duration::from_secs(self.config.nav_timeout_secs);
        let strict_ok = matches!(timeout(strict, self.goto_stable(url)).await, Ok(Ok(())));

        if !strict_ok {
            let retry_url = if let Some(rest) = url.strip_prefix("http://") {
                format!("https://{}", rest)
            } else {
                url.to_string()
            };
            ::log::warn!("Strict navigation failed for {}, retrying relaxed as {}", url, retry_url);

            let relaxed = Duration::from_secs(self.config.relaxed_timeout_secs);
            match timeout(relaxed, self.client.goto(&retry_url)).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    ::log::error!("Failed to navigate to {}: {}", retry_url, e);
                    return None;
                }
                Err(_) => {
                    ::log::error!("Timed out navigating to {}", retry_url);
                    return None;
                }
            }
        }

        match self.client.current_url().await {
            Ok(current) => Some(current),
            Err(e) => {
                ::log::error!("Failed to read current URL after navigating to {}: {}", url, e);
                None
            }
        }
    }

    async fn goto_stable(&self, url: &str) -> Result<(), fantoccini::error::CmdError> {
        self.client.goto(url).await?;
        self.client
            .wait()
            .at_most(Duration::from_secs(BODY_WAIT_SECS))
            .for_element(Locator::Css("body"))
            .await?;
        Ok(())
    }

    /// Tries each dismissal selector once, stopping at the first successful
    /// click; falls back to an Escape keypress. Never fails the fetch.
    async fn dismiss_interstitials(&self) {
        for selector in DISMISS_SELECTORS {
            let found = self
                .client
                .wait()
                .at_most(Duration::from_millis(DISMISS_WAIT_MS))
                .for_element(Locator::Css(selector))
                .await;

            if let Ok(element) = found {
                match element.click().await {
                    Ok(_) => {
                        ::log::info!("Dismissed interstitial via selector: {}", selector);
                        return;
                    }
                    Err(e) => {
                        ::log::debug!("Dismissal click failed for {}: {}", selector, e);
                    }
                }
            }
        }

        // Last resort: Escape often closes modals with no close button
        if let Ok(body) = self.client.find(Locator::Css("body")).await {
            let escape: char = Key::Escape.into();
            if let Err(e) = body.send_keys(&escape.to_string()).await {
                ::log::debug!("Escape keypress failed: {}", e);
            }
        }
    }
}
