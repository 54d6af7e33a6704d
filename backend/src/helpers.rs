use html_escape::decode_html_entities;
use lazy_static::lazy_static;
use regex::Regex;

use crate::types::Entry;

lazy_static! {
    static ref RE_COMMENT: Regex = Regex::new(r"<!--(.*?)-->").unwrap();
    static ref RE_TAG: Regex = Regex::new(r"</*\w[^>]*>").unwrap();
    static ref RE_SPACES: Regex = Regex::new(r"\s+").unwrap();
}

/// Strip HTML tags and comments, decode entities, normalize spaces.
pub fn strip_html(text: &str) -> String {
    // Decode HTML entities first (e.g., &amp; -> &)
    let mut s = decode_html_entities(text).to_string();
    s = RE_COMMENT.replace_all(&s, " ").to_string();
    s = RE_TAG.replace_all(&s, " ").to_string();
    compact_plain_text(&s)
}

/// Collapse whitespace runs (including newlines) to single spaces and trim.
pub fn compact_plain_text(text: &str) -> String {
    RE_SPACES.replace_all(text, " ").trim().to_string()
}

/// Lowercase and compact a free-text query before matching.
pub fn normalize_query_text(text: &str) -> String {
    compact_plain_text(&text.to_lowercase())
}

/// Truncate to at most `max_chars` characters, respecting UTF-8 boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Flatten an entry into its searchable string: title, key, section
/// headings, markup-stripped paragraphs, and every language set's lemma
/// and transliteration, lowercased with whitespace collapsed.
pub fn compute_search_text(entry: &Entry) -> String {
    let mut parts: Vec<String> = vec![entry.title.clone(), entry.key.clone()];

    for sec in &entry.sections {
        if !sec.heading.is_empty() {
            parts.push(sec.heading.clone());
        }
        for p in &sec.paragraphs {
            parts.push(strip_html(p));
        }
    }

    for ls in &entry.language_sets {
        if !ls.lemma.is_empty() {
            parts.push(ls.lemma.clone());
        }
        if !ls.transliteration.is_empty() {
            parts.push(ls.transliteration.clone());
        }
    }

    compact_plain_text(&parts.join(" ").to_lowercase())
}
