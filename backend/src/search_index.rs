//! Free-text search over the whole entry corpus.
//!
//! Multi-term AND matching against each entry's flattened search text,
//! with a title-weighted score. Ties keep corpus iteration order, so
//! results are stable across runs.

use std::cmp::Reverse;

use crate::{SEARCH_MIN_QUERY_LEN, SEARCH_RESULT_MAX};
use crate::app_data::CorpusBook;
use crate::helpers::{strip_html, truncate_chars};
use crate::types::{Entry, SearchResult};

/// Score added per query term found in the entry title; terms found only
/// in the body score 1.
const TITLE_TERM_SCORE: i32 = 10;

/// The first non-empty paragraph, markup stripped, truncated to 120
/// characters. Used as the result snippet.
pub fn entry_snippet(entry: &Entry) -> String {
    for sec in &entry.sections {
        for p in &sec.paragraphs {
            let plain = strip_html(p);
            if !plain.is_empty() {
                return truncate_chars(&plain, 120);
            }
        }
    }
    String::new()
}

fn score_entry(entry: &Entry, terms: &[&str]) -> Option<i32> {
    let text = entry.search_text();
    let title = entry.title.to_lowercase();

    let mut score = 0;
    for term in terms {
        if !text.contains(term) {
            return None;
        }
        if title.contains(term) {
            score += TITLE_TERM_SCORE;
        } else {
            score += 1;
        }
    }
    Some(score)
}

/// Search every registered book. All query terms must be present in an
/// entry's search text (AND semantics). Results are capped.
pub fn search_books(books: &[CorpusBook], query: &str) -> Vec<SearchResult> {
    let query = query.trim().to_lowercase();
    if query.chars().count() < SEARCH_MIN_QUERY_LEN {
        return Vec::new();
    }

    let terms: Vec<&str> = query.split_whitespace().collect();

    let mut results: Vec<SearchResult> = Vec::new();
    for book in books {
        for entry in &book.entries {
            if let Some(score) = score_entry(entry, &terms) {
                results.push(SearchResult {
                    book: entry.book.clone(),
                    key: entry.key.clone(),
                    title: entry.title.clone(),
                    snippet: entry_snippet(entry),
                    score,
                });
            }
        }
    }

    // Stable sort: ties keep corpus iteration order.
    results.sort_by_key(|r| Reverse(r.score));
    results.truncate(SEARCH_RESULT_MAX);
    results
}
