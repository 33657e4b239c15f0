//! Per-field extraction heuristics.
//!
//! Each extractor is an independent function over the parsed document that
//! degrades to an empty result when nothing matches; no extractor failure
//! can abort the page record.

use crate::filter::LinkFilter;
use crate::results::{CategoryFlags, Heading, InternalLink, ListBlock, Snippet, SocialLink};
use crate::utils::collapse_whitespace;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Upper bound on snippets kept per topical extractor.
const MAX_SNIPPETS: usize = 40;

/// Snippets shorter than this carry no usable signal.
const MIN_SNIPPET_LEN: usize = 4;

/// Snippets are clipped to this many characters.
const MAX_SNIPPET_LEN: usize = 300;

const MAX_TABLES: usize = 10;
const MAX_TABLE_ROWS: usize = 30;
const MAX_LISTS: usize = 15;
const MAX_LIST_ITEMS: usize = 20;

/// Heuristics for one topical snippet extractor: an element matches if its
/// class/id contains one of the hints, or its text matches the pattern or
/// contains one of the keywords.
pub struct SnippetRule {
    pub class_hints: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub pattern: Option<Regex>,
}

pub fn extract_title(doc: &Html) -> String {
    let selector = Selector::parse("title").expect("static selector");
    doc.select(&selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

/// Best-effort course name via a multi-selector fallback chain.
pub fn extract_course_name(doc: &Html) -> String {
    let attr_chain = [("meta[property=\"og:site_name\"]", "content")];
    for (selector_str, attr) in attr_chain {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(value) = doc.select(&selector).next().and_then(|el| el.value().attr(attr)) {
            let name = collapse_whitespace(value);
            if !name.is_empty() {
                return name;
            }
        }
    }

    let text_chain = [".course-name", ".site-title", ".logo", "h1", "title"];
    for selector_str in text_chain {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(el) = doc.select(&selector).next() {
            let name = collapse_whitespace(&el.text().collect::<String>());
            if !name.is_empty() {
                return name;
            }
        }
    }

    String::new()
}

/// Headings h1..h4 in document order.
pub fn extract_headings(doc: &Html) -> Vec<Heading> {
    let selector = Selector::parse("h1, h2, h3, h4").expect("static selector");
    doc.select(&selector)
        .filter_map(|el| {
            let text = collapse_whitespace(&el.text().collect::<String>());
            if text.is_empty() {
                return None;
            }
            Some(Heading {
                text,
                tag: el.value().name().to_string(),
            })
        })
        .collect()
}

/// Collects text fragments matching a topical rule from the usual
/// content-bearing elements.
pub fn extract_snippets(doc: &Html, rule: &SnippetRule) -> Vec<Snippet> {
    let selector = Selector::parse("p, li, td, th, h2, h3, div, span").expect("static selector");
    let mut seen = HashSet::new();
    let mut snippets = Vec::new();

    for el in doc.select(&selector) {
        if snippets.len() >= MAX_SNIPPETS {
            break;
        }

        let text = collapse_whitespace(&el.text().collect::<String>());
        let char_count = text.chars().count();
        if char_count < MIN_SNIPPET_LEN || char_count > MAX_SNIPPET_LEN {
            continue;
        }

        if !element_matches(el, &text, rule) {
            continue;
        }

        if seen.insert(text.clone()) {
            snippets.push(Snippet::new(text));
        }
    }

    snippets
}

fn element_matches(el: ElementRef, text: &str, rule: &SnippetRule) -> bool {
    let class_id = format!(
        "{} {}",
        el.value().attr("class").unwrap_or_default(),
        el.value().attr("id").unwrap_or_default()
    )
    .to_lowercase();

    if rule.class_hints.iter().any(|hint| class_id.contains(hint)) {
        return true;
    }

    let lower = text.to_lowercase();
    if rule.keywords.iter().any(|kw| lower.contains(kw)) {
        return true;
    }

    rule.pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// Tables as rows of collapsed cell strings; empty rows dropped.
pub fn extract_tables(doc: &Html) -> Vec<Vec<Vec<String>>> {
    let table_sel = Selector::parse("table").expect("static selector");
    let row_sel = Selector::parse("tr").expect("static selector");
    let cell_sel = Selector::parse("td, th").expect("static selector");

    doc.select(&table_sel)
        .take(MAX_TABLES)
        .filter_map(|table| {
            let rows: Vec<Vec<String>> = table
                .select(&row_sel)
                .take(MAX_TABLE_ROWS)
                .filter_map(|row| {
                    let cells: Vec<String> = row
                        .select(&cell_sel)
                        .map(|cell| collapse_whitespace(&cell.text().collect::<String>()))
                        .collect();
                    if cells.iter().all(String::is_empty) {
                        None
                    } else {
                        Some(cells)
                    }
                })
                .collect();
            if rows.is_empty() { None } else { Some(rows) }
        })
        .collect()
}

/// List blocks with the nearest preceding heading as context.
pub fn extract_lists(doc: &Html) -> Vec<ListBlock> {
    let list_sel = Selector::parse("ul, ol").expect("static selector");
    let item_sel = Selector::parse("li").expect("static selector");

    doc.select(&list_sel)
        .take(MAX_LISTS)
        .filter_map(|list| {
            let items: Vec<String> = list
                .select(&item_sel)
                .take(MAX_LIST_ITEMS)
                .map(|item| collapse_whitespace(&item.text().collect::<String>()))
                .filter(|text| !text.is_empty())
                .collect();
            if items.is_empty() {
                return None;
            }
            Some(ListBlock {
                list_type: list.value().name().to_string(),
                items,
                context: preceding_heading(list),
            })
        })
        .collect()
}

/// Walks backwards over siblings to find the closest heading before `el`.
fn preceding_heading(el: ElementRef) -> String {
    for sibling in el.prev_siblings() {
        if let Some(sib_el) = ElementRef::wrap(sibling) {
            let name = sib_el.value().name();
            if matches!(name, "h1" | "h2" | "h3" | "h4" | "h5") {
                return collapse_whitespace(&sib_el.text().collect::<String>());
            }
        }
    }
    String::new()
}

/// Same-site links with pre-computed category flags, capped at `max_links`.
pub fn extract_internal_links(
    doc: &Html,
    base: &Url,
    filter: &LinkFilter,
    max_links: usize,
) -> Vec<InternalLink> {
    let selector = Selector::parse("a[href]").expect("static selector");
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for el in doc.select(&selector) {
        if links.len() >= max_links {
            break;
        }

        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let Some(resolved) = filter.resolve_internal(base, href) else {
            continue;
        };
        let href = resolved.to_string();
        if !seen.insert(href.clone()) {
            continue;
        }

        let text = collapse_whitespace(&el.text().collect::<String>());
        let flags = compute_flags(&href, &text);
        links.push(InternalLink { text, href, flags });
    }

    links
}

fn compute_flags(href: &str, text: &str) -> CategoryFlags {
    let haystack = format!("{} {}", href, text).to_lowercase();
    let any = |patterns: &[&str]| patterns.iter().any(|p| haystack.contains(p));

    CategoryFlags {
        is_scorecard: any(&["scorecard", "score card", "score-card"]),
        is_rates: any(&["rates", "green fees", "pricing", "fees"]),
        is_about: any(&["about", "history"]),
        is_membership: any(&["membership", "join"]),
        is_tee_time: any(&["tee time", "tee-time", "teetime"]),
        is_reservation: any(&["book", "reserve", "reservation"]),
    }
}

/// Outbound links to recognized social platforms.
pub fn extract_social_links(doc: &Html) -> Vec<SocialLink> {
    const PLATFORMS: &[(&str, &str)] = &[
        ("facebook.com", "facebook"),
        ("instagram.com", "instagram"),
        ("twitter.com", "twitter"),
        ("x.com", "x"),
        ("youtube.com", "youtube"),
        ("linkedin.com", "linkedin"),
        ("tiktok.com", "tiktok"),
    ];

    let selector = Selector::parse("a[href]").expect("static selector");
    let mut seen = HashSet::new();
    let mut social = Vec::new();

    for el in doc.select(&selector) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let lower = href.to_lowercase();
        let Some((_, platform)) = PLATFORMS.iter().find(|(domain, _)| lower.contains(domain))
        else {
            continue;
        };
        if !seen.insert(href.to_string()) {
            continue;
        }
        social.push(SocialLink {
            platform: platform.to_string(),
            href: href.to_string(),
            text: collapse_whitespace(&el.text().collect::<String>()),
        });
    }

    social
}
