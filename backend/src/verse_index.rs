//! Reverse index from cited verses to the entries citing them.
//!
//! Built incrementally as corpus books register. The verse universe is
//! sparse: only verses actually cited somewhere are indexed, and range
//! scans count matches against that universe, not against every integer
//! verse a range spans.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::logger;
use crate::reference::{compare_references, parse_reference_unit, VerseReference};
use crate::types::{Entry, EntryHit};

#[derive(Debug, Default)]
pub struct VerseIndex {
    /// Distinct cited verses in first-seen order, scanned for range queries.
    verses: Vec<VerseReference>,
    /// Verse key to the entries citing that verse, deduplicated by identity.
    buckets: HashMap<String, Vec<EntryHit>>,
}

impl VerseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct verses indexed so far.
    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    /// Parse and index every citation of the entry. Unparseable citations
    /// are logged and skipped; they never abort indexing. Returns how many
    /// citations were indexed.
    pub fn index_entry(&mut self, entry: &Entry) -> usize {
        let mut indexed = 0;

        for citation in &entry.references {
            let reference = match parse_reference_unit(citation, None) {
                Ok(r) => r,
                Err(e) => {
                    logger::debug(&format!(
                        "Skipping citation '{}' on {}:{}: {}",
                        citation, entry.book, entry.key, e
                    ));
                    continue;
                }
            };

            let key = reference.verse_key();
            if !self.buckets.contains_key(&key) {
                self.verses.push(reference);
                self.buckets.insert(key.clone(), Vec::new());
            }

            let bucket = self.buckets.get_mut(&key).expect("bucket just ensured");
            if !bucket.iter().any(|h| h.book == entry.book && h.key == entry.key) {
                bucket.push(entry.hit());
            }
            indexed += 1;
        }

        indexed
    }

    /// Scan every indexed verse for the inclusive range, returning the
    /// deduplicated union of entry buckets and the count of verses that
    /// fell inside the range.
    pub fn scan_range(&self, start: &VerseReference, end: &VerseReference) -> (Vec<EntryHit>, usize) {
        let mut hits: Vec<EntryHit> = Vec::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();
        let mut matched_verse_count = 0;

        for verse in &self.verses {
            if compare_references(verse, start) == Ordering::Less {
                continue;
            }
            if compare_references(verse, end) == Ordering::Greater {
                continue;
            }
            matched_verse_count += 1;

            if let Some(bucket) = self.buckets.get(&verse.verse_key()) {
                for hit in bucket {
                    if seen.insert((hit.book.clone(), hit.key.clone())) {
                        hits.push(hit.clone());
                    }
                }
            }
        }

        (hits, matched_verse_count)
    }

    /// The entries citing exactly this verse, in bucket order.
    pub fn entries_for_verse(&self, reference: &VerseReference) -> &[EntryHit] {
        self.buckets
            .get(&reference.verse_key())
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }
}

fn segment_rank(segment: Option<&str>) -> u64 {
    // Non-numeric and missing segments rank after every numeric one.
    match segment {
        Some(s) => s.parse::<u64>().unwrap_or(u64::MAX),
        None => u64::MAX,
    }
}

/// Segment-wise numeric comparison of dotted entry keys ("2.13" before
/// the bare parent "2"; non-numeric segments last).
pub fn compare_entry_keys(a: &str, b: &str) -> Ordering {
    let a_segs: Vec<&str> = a.split('.').collect();
    let b_segs: Vec<&str> = b.split('.').collect();
    let len = a_segs.len().max(b_segs.len());

    for i in 0..len {
        let ord = segment_rank(a_segs.get(i).copied())
            .cmp(&segment_rank(b_segs.get(i).copied()));
        if ord != Ordering::Equal {
            return ord;
        }
    }

    Ordering::Equal
}

/// Deterministic result order: corpus book registration order, then
/// dotted-key comparison, then title.
pub fn sort_entry_hits(hits: &mut [EntryHit], corpus_order: &HashMap<String, usize>) {
    hits.sort_by(|a, b| {
        let a_book = corpus_order.get(&a.book).copied().unwrap_or(usize::MAX);
        let b_book = corpus_order.get(&b.book).copied().unwrap_or(usize::MAX);
        a_book
            .cmp(&b_book)
            .then_with(|| compare_entry_keys(&a.key, &b.key))
            .then_with(|| a.title.cmp(&b.title))
    });
}
