//! DOM field extraction.
//!
//! The [`Extractor`] compiles its selectors and regexes once, then builds a
//! [`PageRecord`] per page by composing independent field extractors. Every
//! extractor degrades to an empty result; no single field failure aborts
//! the record.

pub mod content;
pub mod fields;

#[cfg(test)]
mod tests;

use crate::config::FetchConfig;
use crate::filter::LinkFilter;
use crate::results::{ContactInfo, PageRecord};
use crate::utils::collapse_whitespace;
use fields::SnippetRule;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

const MAX_CONTACT_ENTRIES: usize = 10;

/// Builds [`PageRecord`]s from rendered HTML.
pub struct Extractor {
    config: FetchConfig,
    phone_re: Regex,
    email_re: Regex,
    address_re: Regex,
    price_rule: SnippetRule,
    amenity_rule: SnippetRule,
    course_rule: SnippetRule,
    hours_rule: SnippetRule,
}

impl Extractor {
    pub fn new(config: FetchConfig) -> Result<Self, regex::Error> {
        let phone_re = Regex::new(r"(?:\+?1[\s.\-]?)?\(?\d{3}\)?[\s.\-]\d{3}[\s.\-]?\d{4}")?;
        let email_re = Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}")?;
        let address_re = Regex::new(
            r"(?i)\b\d{1,5}\s+[A-Za-z0-9'.\- ]{2,40}\s(?:road|rd|street|st|avenue|ave|drive|dr|lane|ln|boulevard|blvd|way|court|ct|highway|hwy|parkway|pkwy)\b\.?",
        )?;

        let price_rule = SnippetRule {
            class_hints: &["price", "rate", "fee", "cost"],
            keywords: &["green fee", "greens fee", "per player", "per round", "twilight rate"],
            pattern: Some(Regex::new(r"\$\s?\d[\d,]*(?:\.\d{2})?")?),
        };
        let amenity_rule = SnippetRule {
            class_hints: &["amenit", "facilit", "feature"],
            keywords: &[
                "driving range",
                "pro shop",
                "putting green",
                "practice",
                "restaurant",
                "clubhouse",
                "locker",
                "lessons",
                "cart rental",
                "banquet",
            ],
            pattern: None,
        };
        let course_rule = SnippetRule {
            class_hints: &["course", "hole", "yardage"],
            keywords: &[
                "18 holes",
                "9 holes",
                "par 7",
                "par 6",
                "par 5",
                "par 4",
                "par 3",
                "yards",
                "yardage",
                "slope",
                "course rating",
                "front nine",
                "back nine",
            ],
            pattern: None,
        };
        let hours_rule = SnippetRule {
            class_hints: &["hours", "schedule"],
            keywords: &[
                "open daily",
                "monday",
                "tuesday",
                "wednesday",
                "thursday",
                "friday",
                "saturday",
                "sunday",
                "sunrise to sunset",
            ],
            pattern: Some(Regex::new(r"(?i)\b\d{1,2}(?::\d{2})?\s?(?:am|pm)\b")?),
        };

        Ok(Self {
            config,
            phone_re,
            email_re,
            address_re,
            price_rule,
            amenity_rule,
            course_rule,
            hours_rule,
        })
    }

    /// Builds the full record for one rendered page.
    pub fn extract(&self, html: &str, url: &Url, filter: &LinkFilter) -> PageRecord {
        let doc = Html::parse_document(html);

        PageRecord {
            url: url.to_string(),
            title: fields::extract_title(&doc),
            course_name: fields::extract_course_name(&doc),
            contact: self.extract_contact(&doc),
            text: content::clean_text(&doc, self.config.text_cap),
            headings: fields::extract_headings(&doc),
            price_elements: fields::extract_snippets(&doc, &self.price_rule),
            amenity_elements: fields::extract_snippets(&doc, &self.amenity_rule),
            course_elements: fields::extract_snippets(&doc, &self.course_rule),
            hours_elements: fields::extract_snippets(&doc, &self.hours_rule),
            tables: fields::extract_tables(&doc),
            lists: fields::extract_lists(&doc),
            internal_links: fields::extract_internal_links(
                &doc,
                url,
                filter,
                self.config.max_internal_links,
            ),
            social_links: fields::extract_social_links(&doc),
        }
    }

    /// Phones and emails by regex over the whole document text; addresses
    /// from `<address>` elements first, then a street-pattern scan.
    fn extract_contact(&self, doc: &Html) -> ContactInfo {
        let full_text = doc.root_element().text().collect::<Vec<_>>().join(" ");

        let all_phones = unique_matches(&self.phone_re, &full_text);
        let all_emails = unique_matches(&self.email_re, &full_text);

        let mut all_addresses = Vec::new();
        let mut seen = HashSet::new();
        if let Ok(selector) = Selector::parse("address") {
            for el in doc.select(&selector) {
                let text = collapse_whitespace(&el.text().collect::<String>());
                if !text.is_empty() && seen.insert(text.clone()) {
                    all_addresses.push(text);
                }
            }
        }
        for m in self.address_re.find_iter(&full_text) {
            if all_addresses.len() >= MAX_CONTACT_ENTRIES {
                break;
            }
            let text = collapse_whitespace(m.as_str());
            if seen.insert(text.clone()) {
                all_addresses.push(text);
            }
        }

        ContactInfo {
            phone: all_phones.first().cloned().unwrap_or_default(),
            email: all_emails.first().cloned().unwrap_or_default(),
            address: all_addresses.first().cloned().unwrap_or_default(),
            all_phones,
            all_emails,
            all_addresses,
        }
    }
}

fn unique_matches(re: &Regex, text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut matches = Vec::new();
    for m in re.find_iter(text) {
        if matches.len() >= MAX_CONTACT_ENTRIES {
            break;
        }
        let value = collapse_whitespace(m.as_str());
        if seen.insert(value.clone()) {
            matches.push(value);
        }
    }
    matches
}
