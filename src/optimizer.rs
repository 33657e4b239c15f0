//! Payload optimization.
//!
//! A one-way lossy pipeline that fits a variable-sized crawl result into a
//! fixed token budget: empty-field pruning, cross-page near-duplicate
//! removal, a budget check, then progressively destructive truncation
//! tiers and whole-page dropping. Each stage only removes content; stage
//! order is fixed so the destructive stages run only when the cheap ones
//! were not enough.

use crate::config::{PayloadBudget, TruncationTier};
use crate::results::PageRecord;
use crate::similarity::SeenText;
use crate::utils::truncate_chars;
use serde_json::Value;

/// URL keywords that keep a page alive when whole pages must be dropped,
/// in preference order.
const HIGH_VALUE_KEYWORD_GROUPS: &[&[&str]] = &[
    &["scorecard", "score-card"],
    &["rate", "fee", "pricing", "price"],
    &["amenit", "facilit"],
];

/// Bytes/tokens removed per stage, reported alongside the reduced pages.
#[derive(Debug, Clone)]
pub struct OptimizeReport {
    pub chars_before: usize,
    pub chars_after_prune: usize,
    pub chars_after_dedup: usize,
    pub chars_after: usize,
    pub estimated_tokens: usize,
    pub tiers_applied: Vec<String>,
    pub pages_dropped: usize,
    /// Set when even the worst-case reduction could not meet the budget
    /// (a single page larger than the whole budget). The payload is still
    /// returned; no single-page splitting is attempted.
    pub over_budget: bool,
}

/// Runs the full pipeline over `pages`, returning reduced copies and the
/// per-stage diagnostics. The input records are never mutated.
pub fn optimize(pages: &[PageRecord], budget: &PayloadBudget) -> (Vec<PageRecord>, OptimizeReport) {
    let mut reduced: Vec<PageRecord> = pages.to_vec();
    let chars_before = payload_chars(&reduced);

    // Stage 1: empty-field pruning, unconditional
    for page in &mut reduced {
        prune_record(page);
    }
    let chars_after_prune = payload_chars(&reduced);

    // Stage 2: cross-page dedup with one running seen-set, encounter order
    let mut seen = SeenText::new(budget.dedup_threshold);
    for page in &mut reduced {
        dedup_record(page, &mut seen);
    }
    let chars_after_dedup = payload_chars(&reduced);
    ::log::debug!(
        "Optimizer pruned {} chars, dedup removed {} chars",
        chars_before.saturating_sub(chars_after_prune),
        chars_after_prune.saturating_sub(chars_after_dedup)
    );

    // Stage 3: budget check
    let max_chars = budget.max_chars();
    let mut current = chars_after_dedup;
    let mut tiers_applied = Vec::new();
    let mut pages_dropped = 0;

    // Stage 4: progressive truncation, tier by tier, then page dropping
    if current > max_chars {
        for tier in &budget.tiers {
            ::log::info!(
                "Payload at {} chars exceeds budget of {}, applying '{}' tier",
                current,
                max_chars,
                tier.name
            );
            for page in &mut reduced {
                apply_tier(page, tier);
            }
            tiers_applied.push(tier.name.clone());
            current = payload_chars(&reduced);
            if current <= max_chars {
                break;
            }
        }
    }

    if current > max_chars && reduced.len() > 1 {
        let before_count = reduced.len();
        reduced = drop_low_value_pages(reduced, budget.max_keyword_pages);
        pages_dropped = before_count - reduced.len();
        current = payload_chars(&reduced);
        ::log::warn!(
            "Dropped {} low-value pages to meet budget, {} chars remain",
            pages_dropped,
            current
        );
    }

    let report = OptimizeReport {
        chars_before,
        chars_after_prune,
        chars_after_dedup,
        chars_after: current,
        estimated_tokens: budget.estimate_tokens(current),
        tiers_applied,
        pages_dropped,
        over_budget: current > max_chars,
    };

    (reduced, report)
}

/// Recursively strips nulls, empty strings, empty arrays, and empty maps
/// from a JSON value. Idempotent.
pub fn prune_json(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let pruned: serde_json::Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| (k, prune_json(v)))
                .filter(|(_, v)| !is_empty_value(v))
                .collect();
            Value::Object(pruned)
        }
        Value::Array(items) => {
            let pruned: Vec<Value> = items
                .into_iter()
                .map(prune_json)
                .filter(|v| !is_empty_value(v))
                .collect();
            Value::Array(pruned)
        }
        other => other,
    }
}

fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Serialized character count of the pruned payload; the optimizer's
/// measure of cost.
pub fn payload_chars(pages: &[PageRecord]) -> usize {
    let value = serde_json::to_value(pages).unwrap_or(Value::Null);
    serde_json::to_string(&prune_json(value))
        .map(|s| s.chars().count())
        .unwrap_or(0)
}

/// Stage 1: drop whitespace-only strings and empty items from a record.
fn prune_record(page: &mut PageRecord) {
    page.text = page.text.trim().to_string();
    page.title = page.title.trim().to_string();

    page.headings.retain(|h| !h.text.trim().is_empty());
    for snippets in [
        &mut page.price_elements,
        &mut page.amenity_elements,
        &mut page.course_elements,
        &mut page.hours_elements,
    ] {
        snippets.retain(|s| !s.text.trim().is_empty());
    }

    for table in &mut page.tables {
        table.retain(|row| row.iter().any(|cell| !cell.trim().is_empty()));
    }
    page.tables.retain(|table| !table.is_empty());

    for list in &mut page.lists {
        list.items.retain(|item| !item.trim().is_empty());
    }
    page.lists.retain(|list| !list.items.is_empty());

    page.internal_links.retain(|link| !link.href.is_empty());
}

/// Stage 2: zero or remove any text-bearing field that near-duplicates
/// earlier content. The first occurrence always survives unmodified.
fn dedup_record(page: &mut PageRecord, seen: &mut SeenText) {
    if !page.text.is_empty() && seen.check_and_insert(&page.text) {
        ::log::debug!("Dropping duplicate main text on {}", page.url);
        page.text.clear();
    }

    page.headings.retain(|h| !seen.check_and_insert(&h.text));

    for snippets in [
        &mut page.price_elements,
        &mut page.amenity_elements,
        &mut page.course_elements,
        &mut page.hours_elements,
    ] {
        snippets.retain(|s| !seen.check_and_insert(&s.text));
    }

    // Structured fields compare via a canonical serialized form
    page.tables.retain(|table| {
        let canonical = serde_json::to_string(table).unwrap_or_default();
        !seen.check_and_insert(&canonical)
    });
    page.lists.retain(|list| {
        let canonical = serde_json::to_string(list).unwrap_or_default();
        !seen.check_and_insert(&canonical)
    });
}

/// Stage 4 per-tier caps.
fn apply_tier(page: &mut PageRecord, tier: &TruncationTier) {
    page.text = truncate_chars(&page.text, tier.text_cap);
    page.headings.truncate(tier.heading_cap);

    for snippets in [
        &mut page.price_elements,
        &mut page.amenity_elements,
        &mut page.course_elements,
        &mut page.hours_elements,
    ] {
        snippets.truncate(tier.snippet_cap);
    }

    page.tables.truncate(tier.table_cap);
    for table in &mut page.tables {
        table.truncate(tier.table_row_cap);
    }

    page.lists.truncate(tier.list_cap);
    for list in &mut page.lists {
        list.items.truncate(tier.list_item_cap);
    }
}

/// Last resort: keep the seed page plus up to `max_keyword_pages` pages
/// whose URLs match high-value keywords, scorecard before rates before
/// amenities. Everything else is discarded.
fn drop_low_value_pages(pages: Vec<PageRecord>, max_keyword_pages: usize) -> Vec<PageRecord> {
    let mut iter = pages.into_iter();
    let Some(seed) = iter.next() else {
        return Vec::new();
    };
    let rest: Vec<PageRecord> = iter.collect();

    let mut kept_urls: Vec<String> = Vec::new();
    for group in HIGH_VALUE_KEYWORD_GROUPS {
        for page in &rest {
            if kept_urls.len() >= max_keyword_pages {
                break;
            }
            let url = page.url.to_lowercase();
            if group.iter().any(|kw| url.contains(kw)) && !kept_urls.contains(&page.url) {
                kept_urls.push(page.url.clone());
            }
        }
    }

    let mut result = vec![seed];
    // Preserve crawl order among the keepers
    result.extend(rest.into_iter().filter(|p| kept_urls.contains(&p.url)));
    result
}
