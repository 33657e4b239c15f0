use crate::utils::same_host;
use regex::Regex;
use url::Url;

/// Decides which discovered hrefs count as crawlable internal links.
///
/// Internal means: same host as the site being crawled, an http(s) scheme,
/// and not a static asset or a fragment-only self reference.
#[derive(Debug)]
pub struct LinkFilter {
    site_host: String,
    asset_regex: Regex,
}

impl LinkFilter {
    /// Create a filter scoped to the host of `site_url`.
    pub fn new(site_url: &Url) -> Result<Self, regex::Error> {
        let asset_regex =
            Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|css|js|ico|svg|woff2?|ttf|eot|pdf|zip|mp4)$")?;

        Ok(Self {
            site_host: site_url.host_str().unwrap_or_default().to_string(),
            asset_regex,
        })
    }

    /// Resolve `href` against `base` and return it only if it is an
    /// internal, non-asset page link.
    pub fn resolve_internal(&self, base: &Url, href: &str) -> Option<Url> {
        let trimmed = href.trim();
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("mailto:")
            || trimmed.starts_with("tel:")
            || trimmed.starts_with("javascript:")
        {
            return None;
        }

        let resolved = base.join(trimmed).ok()?;
        if resolved.scheme() != "http" && resolved.scheme() != "https" {
            return None;
        }

        let host = resolved.host_str()?;
        if !same_host(host, &self.site_host) {
            return None;
        }

        if self.asset_regex.is_match(resolved.path()) {
            return None;
        }

        Some(self.normalize(&resolved))
    }

    /// Normalized form used for visited-set and queue membership: the URL
    /// with its fragment stripped.
    pub fn normalize(&self, url: &Url) -> Url {
        let mut normalized = url.clone();
        normalized.set_fragment(None);
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> (LinkFilter, Url) {
        let base = Url::parse("https://www.example-golf.com/home").unwrap();
        (LinkFilter::new(&base).unwrap(), base)
    }

    #[test]
    fn test_relative_link_resolved() {
        let (filter, base) = filter();
        let url = filter.resolve_internal(&base, "/scorecard").unwrap();
        assert_eq!(url.as_str(), "https://www.example-golf.com/scorecard");
    }

    #[test]
    fn test_external_host_rejected() {
        let (filter, base) = filter();
        assert!(filter.resolve_internal(&base, "https://other.com/page").is_none());
    }

    #[test]
    fn test_www_prefix_is_internal() {
        let base = Url::parse("https://example-golf.com/").unwrap();
        let filter = LinkFilter::new(&base).unwrap();
        assert!(filter
            .resolve_internal(&base, "https://www.example-golf.com/rates")
            .is_some());
    }

    #[test]
    fn test_assets_and_pseudo_links_rejected() {
        let (filter, base) = filter();
        assert!(filter.resolve_internal(&base, "/logo.png").is_none());
        assert!(filter.resolve_internal(&base, "#top").is_none());
        assert!(filter.resolve_internal(&base, "mailto:pro@example-golf.com").is_none());
        assert!(filter.resolve_internal(&base, "tel:+15551234567").is_none());
    }

    #[test]
    fn test_fragment_stripped() {
        let (filter, base) = filter();
        let url = filter.resolve_internal(&base, "/rates#weekend").unwrap();
        assert_eq!(url.as_str(), "https://www.example-golf.com/rates");
    }
}
