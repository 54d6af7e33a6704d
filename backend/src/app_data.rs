//! The corpus store and single authority over all indexes.
//!
//! All indexes are owned here and extended together as books register;
//! no other component mutates them. Queries are read-only and safe to
//! interleave freely once registration has finished.

use std::collections::{HashMap, HashSet};

use crate::logger;
use crate::reference::{parse_reference_query, RangeParseError, VerseRange, VerseReference};
use crate::search_index::search_books;
use crate::term_index::TermIndex;
use crate::types::{Entry, EntryHit, EntryIdentity, RangeLookup, SearchResult};
use crate::verse_index::{sort_entry_hits, VerseIndex};

/// One registered corpus book: the book id and its entries in document
/// order.
#[derive(Debug, Default)]
pub struct CorpusBook {
    pub book_id: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Default)]
pub struct AppData {
    books: Vec<CorpusBook>,
    book_order: HashMap<String, usize>,
    verse_index: VerseIndex,
    term_index: TermIndex,
}

impl AppData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a book's entries and extend every index. Idempotent per
    /// book: re-registering a known book id is a warned no-op. Additive:
    /// earlier books and previously returned results stay valid.
    pub fn register_corpus(&mut self, book_id: &str, entries: Vec<Entry>) {
        if self.book_order.contains_key(book_id) {
            logger::warn(&format!("Corpus book '{}' already registered, skipping", book_id));
            return;
        }

        let mut seen_keys: HashSet<String> = HashSet::new();
        let mut kept: Vec<Entry> = Vec::with_capacity(entries.len());
        let mut citation_count = 0;

        for mut entry in entries {
            if entry.key.trim().is_empty() {
                logger::warn(&format!(
                    "Skipping entry with empty key in book '{}': '{}'",
                    book_id, entry.title
                ));
                continue;
            }
            if !seen_keys.insert(entry.key.clone()) {
                logger::warn(&format!(
                    "Skipping duplicate entry {}:{} ('{}')",
                    book_id, entry.key, entry.title
                ));
                continue;
            }

            // The registering book id is authoritative for identity.
            entry.book = book_id.to_string();

            citation_count += self.verse_index.index_entry(&entry);
            self.term_index.index_entry(&entry);
            kept.push(entry);
        }

        logger::info(&format!(
            "Registered corpus book '{}': {} entries, {} citations, {} verses total",
            book_id,
            kept.len(),
            citation_count,
            self.verse_index.verse_count(),
        ));

        self.book_order.insert(book_id.to_string(), self.books.len());
        self.books.push(CorpusBook {
            book_id: book_id.to_string(),
            entries: kept,
        });
    }

    pub fn books(&self) -> &[CorpusBook] {
        &self.books
    }

    pub fn get_entry(&self, book: &str, key: &str) -> Option<&Entry> {
        let idx = self.book_order.get(book)?;
        self.books[*idx].entries.iter().find(|e| e.key == key)
    }

    /// Resolve a cross-reference target of the form "FAUNA:2.13". The
    /// book part is case-insensitive; the key is not.
    pub fn resolve_cross_ref(&self, target: &str) -> Option<&Entry> {
        let (book, key) = target.split_once(':')?;
        self.get_entry(&book.to_lowercase(), key)
    }

    /// Title/key substring filter over one book's entries, used by the
    /// navigation list. An empty filter returns every entry.
    pub fn filter_entries(&self, book: &str, filter: &str) -> Vec<&Entry> {
        let idx = match self.book_order.get(book) {
            Some(i) => *i,
            None => return Vec::new(),
        };
        let filter = filter.trim().to_lowercase();

        self.books[idx]
            .entries
            .iter()
            .filter(|e| {
                filter.is_empty()
                    || e.title.to_lowercase().contains(&filter)
                    || e.key.contains(&filter)
            })
            .collect()
    }

    /// Range query against the verse index, with deterministic result
    /// order: corpus book registration order, dotted key, title.
    pub fn find_entries_in_range(&self, start: &VerseReference, end: &VerseReference) -> RangeLookup {
        let (mut hits, matched_verse_count) = self.verse_index.scan_range(start, end);
        sort_entry_hits(&mut hits, &self.book_order);
        RangeLookup { entries: hits, matched_verse_count }
    }

    /// Parse a citation query and look up the resulting range in one
    /// step. Parse failures surface as the typed range error; a query
    /// matching nothing is an empty lookup, not an error.
    pub fn lookup_citation(&self, text: &str) -> Result<(VerseRange, RangeLookup), RangeParseError> {
        let range = parse_reference_query(text)?;
        let lookup = self.find_entries_in_range(&range.start, &range.end);
        Ok((range, lookup))
    }

    pub fn find_linked_entry(
        &self,
        term: &str,
        language: &str,
        exclude: &EntryIdentity,
    ) -> Option<EntryHit> {
        self.term_index.find_linked_entry(term, language, exclude)
    }

    pub fn find_by_strongs_id(&self, id: &str) -> Vec<EntryHit> {
        self.term_index.find_by_strongs_id(id)
    }

    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        search_books(&self.books, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, title: &str, refs: &[&str]) -> Entry {
        Entry {
            key: key.to_string(),
            title: title.to_string(),
            references: refs.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_register_corpus_sets_book_on_entries() {
        let mut data = AppData::new();
        data.register_corpus("fauna", vec![entry("1.1", "Lion", &[])]);

        let e = data.get_entry("fauna", "1.1").unwrap();
        assert_eq!(e.book, "fauna");
    }

    #[test]
    fn test_register_corpus_skips_bad_entries() {
        let mut data = AppData::new();
        data.register_corpus("fauna", vec![
            entry("1.1", "Lion", &[]),
            entry("", "No key", &[]),
            entry("1.1", "Duplicate Lion", &[]),
        ]);

        assert_eq!(data.books()[0].entries.len(), 1);
        assert_eq!(data.get_entry("fauna", "1.1").unwrap().title, "Lion");
    }

    #[test]
    fn test_reregistration_is_a_no_op() {
        let mut data = AppData::new();
        data.register_corpus("fauna", vec![entry("1.1", "Lion", &["John 3:16"])]);
        data.register_corpus("fauna", vec![entry("1.1", "Lion", &["John 3:16"])]);

        assert_eq!(data.books().len(), 1);
        let (_, lookup) = data.lookup_citation("John 3:16").unwrap();
        assert_eq!(lookup.entries.len(), 1);
    }

    #[test]
    fn test_incremental_registration_extends_indexes() {
        let mut data = AppData::new();
        data.register_corpus("fauna", vec![entry("1.1", "Lion", &["John 3:16"])]);

        let (_, before) = data.lookup_citation("John 3:16").unwrap();
        assert_eq!(before.entries.len(), 1);

        data.register_corpus("flora", vec![entry("2.1", "Olive", &["John 3:16"])]);

        let (_, after) = data.lookup_citation("John 3:16").unwrap();
        assert_eq!(after.entries.len(), 2);
        assert_eq!(after.matched_verse_count, 1);
    }

    #[test]
    fn test_resolve_cross_ref() {
        let mut data = AppData::new();
        data.register_corpus("fauna", vec![entry("2.13", "Lion", &[])]);

        assert_eq!(data.resolve_cross_ref("FAUNA:2.13").unwrap().title, "Lion");
        assert_eq!(data.resolve_cross_ref("fauna:2.13").unwrap().title, "Lion");
        assert!(data.resolve_cross_ref("FLORA:2.13").is_none());
        assert!(data.resolve_cross_ref("no-separator").is_none());
    }

    #[test]
    fn test_filter_entries() {
        let mut data = AppData::new();
        data.register_corpus("fauna", vec![
            entry("0", "Contents", &[]),
            entry("1.1", "Lion", &[]),
            entry("1.2", "Sea Lion", &[]),
            entry("2.1", "Eagle", &[]),
        ]);

        let all = data.filter_entries("fauna", "");
        assert_eq!(all.len(), 4);

        let lions = data.filter_entries("fauna", "lion");
        assert_eq!(lions.len(), 2);

        let by_key = data.filter_entries("fauna", "2.1");
        assert_eq!(by_key.len(), 1);
        assert_eq!(by_key[0].title, "Eagle");

        assert!(data.filter_entries("unknown", "x").is_empty());
    }

    #[test]
    fn test_lookup_citation_miss_is_empty_not_error() {
        let mut data = AppData::new();
        data.register_corpus("fauna", vec![entry("1.1", "Lion", &["John 3:16"])]);

        let (_, lookup) = data.lookup_citation("Gen 1:1").unwrap();
        assert!(lookup.entries.is_empty());
        assert_eq!(lookup.matched_verse_count, 0);
    }
}
