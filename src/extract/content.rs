//! Main-content text extraction.
//!
//! Tries a best-effort cleaning pass that walks the DOM and skips
//! boilerplate subtrees; falls back to the raw rendered text when the
//! cleaned result comes up empty.

use crate::utils::{collapse_whitespace, truncate_chars};
use scraper::{ElementRef, Html, Node, Selector};

/// Subtrees skipped entirely by the cleaning pass.
const SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "nav", "header", "footer", "iframe", "svg", "form", "button",
    "aside",
];

/// Candidate roots for the main content, most specific first.
const MAIN_SELECTORS: &[&str] = &["main", "article", "#content", ".main-content", ".content", "body"];

/// Extracts the page's cleaned main text, capped at `cap` characters.
pub fn clean_text(doc: &Html, cap: usize) -> String {
    for selector_str in MAIN_SELECTORS {
        let Ok(selector) = Selector::parse(selector_str) else {
            continue;
        };
        if let Some(root) = doc.select(&selector).next() {
            let mut text = String::new();
            collect_text(root, &mut text);
            let collapsed = collapse_whitespace(&text);
            if !collapsed.is_empty() {
                ::log::debug!("Main content taken from '{}' selector", selector_str);
                return truncate_chars(&collapsed, cap);
            }
        }
    }

    // Cleaning found nothing usable; fall back to the whole document text
    let raw = doc.root_element().text().collect::<Vec<_>>().join(" ");
    truncate_chars(&collapse_whitespace(&raw), cap)
}

/// Depth-first text collection that prunes boilerplate subtrees.
fn collect_text(element: ElementRef, out: &mut String) {
    if SKIP_TAGS.contains(&element.value().name()) {
        return;
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}
