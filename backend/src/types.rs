use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::{Serialize, Deserialize};

use crate::helpers::compute_search_text;

/// A language-set record on a dictionary entry: the source-language
/// headword, its Latin-script rendering, and the citations where it occurs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LanguageSet {
    pub language: String,
    pub lemma: String,
    pub transliteration: String,
    pub references: Vec<String>,
    pub strongs_ids: Vec<String>,
}

/// A content block within an entry. `heading` is the plain-text form used
/// for search; `heading_html` carries markup for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Section {
    pub heading: String,
    pub heading_html: String,
    pub subheading: String,
    pub language_sets: Vec<LanguageSet>,
    pub paragraphs: Vec<String>,
}

/// A contents link on a root entry, pointing at a sub-entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndexItem {
    pub target: String,
    pub label: String,
}

/// A dictionary record. `(book, key)` uniquely identifies an entry and is
/// the identity used by every index. Key "0" denotes the root/contents
/// entry of a book.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entry {
    pub book: String,
    pub key: String,
    pub title: String,
    pub depth: u32,
    pub sections: Vec<Section>,
    pub language_sets: Vec<LanguageSet>,
    pub references: Vec<String>,
    pub cross_refs: Vec<String>,
    pub index_items: Vec<IndexItem>,
    #[serde(skip)]
    pub search_text_cache: OnceLock<String>,
}

impl Entry {
    pub fn identity(&self) -> EntryIdentity {
        EntryIdentity {
            book: self.book.clone(),
            key: self.key.clone(),
        }
    }

    pub fn hit(&self) -> EntryHit {
        EntryHit {
            book: self.book.clone(),
            key: self.key.clone(),
            title: self.title.clone(),
        }
    }

    /// The flattened, lowercased text the corpus search matches against.
    /// Computed once per entry and memoized.
    pub fn search_text(&self) -> &str {
        self.search_text_cache.get_or_init(|| compute_search_text(self))
    }
}

/// The `(book, key)` pair identifying one dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryIdentity {
    pub book: String,
    pub key: String,
}

/// The identity-plus-title projection stored in index buckets and
/// returned from lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryHit {
    pub book: String,
    pub key: String,
    pub title: String,
}

impl EntryHit {
    pub fn identity(&self) -> EntryIdentity {
        EntryIdentity {
            book: self.book.clone(),
            key: self.key.clone(),
        }
    }

    pub fn matches_identity(&self, identity: &EntryIdentity) -> bool {
        self.book == identity.book && self.key == identity.key
    }
}

/// One ranked hit from the corpus search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub book: String,
    pub key: String,
    pub title: String,
    pub snippet: String,
    pub score: i32,
}

/// The result of a citation-range lookup. A well-formed query that
/// matches nothing is an empty result with a zero count, not an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangeLookup {
    pub entries: Vec<EntryHit>,
    pub matched_verse_count: usize,
}

/// One corpus book as loaded from a JSON file: the book id and its
/// entries in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CorpusFile {
    pub book: String,
    pub entries: Vec<Entry>,
}

impl CorpusFile {
    pub fn load_from_json(path: &Path) -> Result<CorpusFile> {
        let mut file = File::open(path)
            .with_context(|| format!("Failed to open corpus file: {}", path.display()))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .with_context(|| format!("Failed to read corpus file: {}", path.display()))?;

        let corpus: CorpusFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse corpus JSON: {}", path.display()))?;

        Ok(corpus)
    }
}
