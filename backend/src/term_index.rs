//! Lemma and transliteration index with script-insensitive normalization.
//!
//! Terms are indexed twice per occurrence: once scoped to the declared
//! source language and once under a wildcard, so lookups can be
//! language-scoped or language-agnostic. A Strong's-number side table
//! supports lexicon cross-navigation.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::helpers::compact_plain_text;
use crate::types::{Entry, EntryHit, EntryIdentity, LanguageSet};

/// The language key under which every term is indexed in addition to its
/// declared language.
pub const WILDCARD_LANGUAGE: &str = "*";

fn is_bidi_control(c: char) -> bool {
    matches!(c,
        '\u{200E}' | '\u{200F}' | '\u{061C}'
        | '\u{202A}'..='\u{202E}'
        | '\u{2066}'..='\u{2069}')
}

/// Normalize a lemma or transliteration for indexing: NFD-decompose,
/// strip combining marks and bidirectional controls, lowercase, collapse
/// whitespace. Makes lookups insensitive to vowel pointing and accents.
pub fn normalize_term_for_index(term: &str) -> String {
    let stripped: String = term
        .nfd()
        .filter(|c| !is_combining_mark(*c) && !is_bidi_control(*c))
        .collect();
    compact_plain_text(&stripped.to_lowercase())
}

fn bucket_key(language: &str, normalized_term: &str) -> String {
    format!("{}|{}", language, normalized_term)
}

fn language_key(language: &str) -> String {
    compact_plain_text(&language.to_lowercase())
}

#[derive(Debug, Default)]
pub struct TermIndex {
    /// `language|term` and `*|term` to entries using that term, in
    /// insertion order, deduplicated by identity.
    buckets: HashMap<String, Vec<EntryHit>>,
    /// Strong's number to entries carrying it.
    strongs: HashMap<String, Vec<EntryHit>>,
}

impl TermIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_hit(bucket: &mut Vec<EntryHit>, hit: &EntryHit) {
        if !bucket.iter().any(|h| h.book == hit.book && h.key == hit.key) {
            bucket.push(hit.clone());
        }
    }

    fn index_language_set(&mut self, hit: &EntryHit, ls: &LanguageSet) {
        let lang = language_key(&ls.language);

        for raw in [&ls.lemma, &ls.transliteration] {
            let term = normalize_term_for_index(raw);
            if term.is_empty() {
                continue;
            }
            for scope in [lang.as_str(), WILDCARD_LANGUAGE] {
                let bucket = self.buckets.entry(bucket_key(scope, &term)).or_default();
                Self::push_hit(bucket, hit);
            }
        }

        for sid in &ls.strongs_ids {
            let sid = sid.trim().to_uppercase();
            if sid.is_empty() {
                continue;
            }
            let bucket = self.strongs.entry(sid).or_default();
            Self::push_hit(bucket, hit);
        }
    }

    /// Index every language-set record of the entry, both the entry-level
    /// records and the inline ones on its sections.
    pub fn index_entry(&mut self, entry: &Entry) {
        let hit = entry.hit();

        for ls in &entry.language_sets {
            self.index_language_set(&hit, ls);
        }
        for sec in &entry.sections {
            for ls in &sec.language_sets {
                self.index_language_set(&hit, ls);
            }
        }
    }

    /// Find the entry a term should link to, excluding the entry the term
    /// occurs on so it never links to itself. Language-scoped hits are
    /// preferred over wildcard hits, and hits in the excluded entry's own
    /// book over hits elsewhere.
    pub fn find_linked_entry(
        &self,
        term: &str,
        language: &str,
        exclude: &EntryIdentity,
    ) -> Option<EntryHit> {
        let term = normalize_term_for_index(term);
        if term.is_empty() {
            return None;
        }

        let mut candidates: Vec<&EntryHit> = Vec::new();
        for scope in [language_key(language), WILDCARD_LANGUAGE.to_string()] {
            if let Some(bucket) = self.buckets.get(&bucket_key(&scope, &term)) {
                for hit in bucket {
                    if !candidates.iter().any(|c| c.book == hit.book && c.key == hit.key) {
                        candidates.push(hit);
                    }
                }
            }
        }

        let same_book = candidates
            .iter()
            .find(|h| h.book == exclude.book && !h.matches_identity(exclude));
        if let Some(hit) = same_book {
            return Some((*hit).clone());
        }

        candidates
            .iter()
            .find(|h| !h.matches_identity(exclude))
            .map(|h| (*h).clone())
    }

    /// Entries carrying the given Strong's number.
    pub fn find_by_strongs_id(&self, id: &str) -> Vec<EntryHit> {
        self.strongs
            .get(&id.trim().to_uppercase())
            .cloned()
            .unwrap_or_default()
    }
}
