//! Link classification and crawl-queue prioritization.
//!
//! Discovered links are sorted into category buckets by an ordered
//! first-match-wins predicate chain; bucket order encodes business
//! priority (scorecards and pricing are the highest-value pages).

use crate::results::{CategoryFlags, InternalLink};
use std::collections::HashSet;

/// Semantic link categories in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkCategory {
    Scorecard,
    Rates,
    About,
    Membership,
    TeeTime,
    Amenity,
    General,
}

/// One entry of the classification chain. A link matches a rule if its
/// pre-computed flag is set, or its URL contains one of the URL patterns,
/// or its anchor text contains one of the text patterns.
struct CategoryRule {
    category: LinkCategory,
    flag: fn(&CategoryFlags) -> bool,
    url_patterns: &'static [&'static str],
    text_patterns: &'static [&'static str],
}

/// The ordered predicate chain. Evaluated top to bottom with early exit,
/// so a link matching several rules lands in the first one tested.
const RULES: &[CategoryRule] = &[
    CategoryRule {
        category: LinkCategory::Scorecard,
        flag: |f| f.is_scorecard,
        url_patterns: &["scorecard", "score-card", "score_card", "course-tour", "course-layout", "hole-by-hole"],
        text_patterns: &["scorecard", "score card", "course layout", "hole by hole", "course tour"],
    },
    CategoryRule {
        category: LinkCategory::Rates,
        flag: |f| f.is_rates,
        url_patterns: &["rates", "pricing", "prices", "fees", "green-fees", "greens-fees", "golf-rates"],
        text_patterns: &["rates", "green fees", "greens fees", "pricing", "prices", "fees"],
    },
    CategoryRule {
        category: LinkCategory::About,
        flag: |f| f.is_about,
        url_patterns: &["about", "history", "our-story", "club-info", "overview"],
        text_patterns: &["about", "history", "our story", "the club"],
    },
    CategoryRule {
        category: LinkCategory::Membership,
        flag: |f| f.is_membership,
        url_patterns: &["membership", "memberships", "member", "join"],
        text_patterns: &["membership", "become a member", "join the club"],
    },
    CategoryRule {
        category: LinkCategory::TeeTime,
        flag: |f| f.is_tee_time || f.is_reservation,
        url_patterns: &["tee-time", "teetime", "tee_time", "book", "booking", "reserve", "reservation"],
        text_patterns: &["tee time", "tee times", "book now", "book a", "reserve"],
    },
    CategoryRule {
        category: LinkCategory::Amenity,
        flag: |_| false,
        url_patterns: &["amenities", "facilities", "dining", "restaurant", "pro-shop", "proshop", "events", "weddings", "lessons", "practice", "driving-range"],
        text_patterns: &["amenities", "facilities", "dining", "restaurant", "pro shop", "lessons", "driving range", "practice"],
    },
];

/// Substrings that mark a scorecard link as top tier within its bucket.
const SCORECARD_HIGH_PRIORITY: &[&str] = &["scorecard", "score card"];

/// Category-labeled link buckets produced by [`classify`].
#[derive(Debug, Default)]
pub struct ClassifiedLinks {
    pub scorecard: Vec<String>,
    pub rates: Vec<String>,
    pub about: Vec<String>,
    pub membership: Vec<String>,
    pub tee_time: Vec<String>,
    pub amenity: Vec<String>,
    pub general: Vec<String>,
}

impl ClassifiedLinks {
    fn bucket_mut(&mut self, category: LinkCategory) -> &mut Vec<String> {
        match category {
            LinkCategory::Scorecard => &mut self.scorecard,
            LinkCategory::Rates => &mut self.rates,
            LinkCategory::About => &mut self.about,
            LinkCategory::Membership => &mut self.membership,
            LinkCategory::TeeTime => &mut self.tee_time,
            LinkCategory::Amenity => &mut self.amenity,
            LinkCategory::General => &mut self.general,
        }
    }

    /// Buckets in fixed priority order.
    fn in_priority_order(&self) -> [&Vec<String>; 7] {
        [
            &self.scorecard,
            &self.rates,
            &self.about,
            &self.membership,
            &self.tee_time,
            &self.amenity,
            &self.general,
        ]
    }

    pub fn total(&self) -> usize {
        self.in_priority_order().iter().map(|b| b.len()).sum()
    }

    pub fn has_scorecard(&self) -> bool {
        !self.scorecard.is_empty()
    }
}

/// Determines the category of a single link via the ordered rule chain.
pub fn category_for(link: &InternalLink) -> LinkCategory {
    let href = link.href.to_lowercase();
    let text = link.text.to_lowercase();

    for rule in RULES {
        if (rule.flag)(&link.flags)
            || rule.url_patterns.iter().any(|p| href.contains(p))
            || rule.text_patterns.iter().any(|p| text.contains(p))
        {
            return rule.category;
        }
    }

    LinkCategory::General
}

fn is_high_priority_scorecard(link: &InternalLink) -> bool {
    let href = link.href.to_lowercase();
    let text = link.text.to_lowercase();
    SCORECARD_HIGH_PRIORITY
        .iter()
        .any(|p| href.contains(p) || text.contains(p))
}

/// Sorts `links` into category buckets, skipping URLs in `visited`.
///
/// Classification is mutually exclusive: each link lands in exactly one
/// bucket. Within the scorecard bucket, links matching the high-priority
/// patterns are inserted at the front; other scorecard matches append.
pub fn classify(links: &[InternalLink], visited: &HashSet<String>) -> ClassifiedLinks {
    let mut buckets = ClassifiedLinks::default();

    for link in links {
        if visited.contains(&link.href) {
            ::log::debug!("Skipping already visited link: {}", link.href);
            continue;
        }

        let category = category_for(link);
        if category == LinkCategory::Scorecard && is_high_priority_scorecard(link) {
            buckets.scorecard.insert(0, link.href.clone());
        } else {
            buckets.bucket_mut(category).push(link.href.clone());
        }
        ::log::debug!("Classified {} as {:?}", link.href, category);
    }

    buckets
}

/// Flattens the buckets into a single crawl queue: fixed category order,
/// duplicates removed preserving first-seen position.
pub fn prioritize(buckets: &ClassifiedLinks) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut queue = Vec::new();

    for bucket in buckets.in_priority_order() {
        for url in bucket {
            if seen.insert(url.clone()) {
                queue.push(url.clone());
            }
        }
    }

    queue
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(text: &str, href: &str) -> InternalLink {
        InternalLink {
            text: text.to_string(),
            href: href.to_string(),
            flags: CategoryFlags::default(),
        }
    }

    #[test]
    fn test_first_match_wins_is_exclusive() {
        // Matches both scorecard and rates patterns; scorecard is tested first
        let l = link("Scorecard and Rates", "https://x.com/scorecard-rates");
        assert_eq!(category_for(&l), LinkCategory::Scorecard);
    }

    #[test]
    fn test_flag_alone_is_sufficient() {
        let mut l = link("click here", "https://x.com/page7");
        l.flags.is_rates = true;
        assert_eq!(category_for(&l), LinkCategory::Rates);
    }

    #[test]
    fn test_unmatched_links_are_general() {
        let l = link("Photo Gallery", "https://x.com/gallery");
        assert_eq!(category_for(&l), LinkCategory::General);
    }

    #[test]
    fn test_each_link_in_exactly_one_bucket() {
        let links = vec![
            link("Scorecard", "https://x.com/scorecard"),
            link("Green Fees", "https://x.com/fees"),
            link("About Us", "https://x.com/about"),
            link("Join", "https://x.com/join"),
            link("Book a Tee Time", "https://x.com/tee-times"),
            link("Dining", "https://x.com/dining"),
            link("News", "https://x.com/news"),
        ];
        let buckets = classify(&links, &HashSet::new());
        assert_eq!(buckets.total(), links.len());
        assert_eq!(buckets.scorecard.len(), 1);
        assert_eq!(buckets.rates.len(), 1);
        assert_eq!(buckets.about.len(), 1);
        assert_eq!(buckets.membership.len(), 1);
        assert_eq!(buckets.tee_time.len(), 1);
        assert_eq!(buckets.amenity.len(), 1);
        assert_eq!(buckets.general.len(), 1);
    }

    #[test]
    fn test_high_priority_scorecard_goes_first() {
        // One link only matches a medium-priority scorecard pattern, the
        // other matches the exact "score card" wording; the latter must
        // come first in the final queue.
        let links = vec![
            link("Home", "https://x.com/"),
            link("Course Layout", "https://x.com/course-layout"),
            link("View Score Card", "https://x.com/course/card"),
            link("Rates", "https://x.com/rates"),
            link("Contact", "https://x.com/contact"),
        ];
        let buckets = classify(&links, &HashSet::new());
        let queue = prioritize(&buckets);
        assert_eq!(queue[0], "https://x.com/course/card");
        assert_eq!(queue[1], "https://x.com/course-layout");
    }

    #[test]
    fn test_visited_links_excluded() {
        let links = vec![link("Scorecard", "https://x.com/scorecard")];
        let visited: HashSet<String> = ["https://x.com/scorecard".to_string()].into();
        let buckets = classify(&links, &visited);
        assert_eq!(buckets.total(), 0);
    }

    #[test]
    fn test_prioritize_dedups_preserving_order() {
        let mut buckets = ClassifiedLinks::default();
        buckets.scorecard.push("https://x.com/scorecard".to_string());
        buckets.rates.push("https://x.com/scorecard".to_string());
        buckets.rates.push("https://x.com/rates".to_string());
        let queue = prioritize(&buckets);
        assert_eq!(queue, vec!["https://x.com/scorecard", "https://x.com/rates"]);
    }

    #[test]
    fn test_prioritize_is_deterministic() {
        let links = vec![
            link("Rates", "https://x.com/rates"),
            link("Scorecard", "https://x.com/scorecard"),
            link("About", "https://x.com/about"),
        ];
        let a = prioritize(&classify(&links, &HashSet::new()));
        let b = prioritize(&classify(&links, &HashSet::new()));
        assert_eq!(a, b);
        assert_eq!(a[0], "https://x.com/scorecard");
    }
}
