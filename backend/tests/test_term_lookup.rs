mod helpers;

use helpers::sample_app_data;
use realia_backend::normalize_term_for_index;
use realia_backend::types::EntryIdentity;

fn identity(book: &str, key: &str) -> EntryIdentity {
    EntryIdentity { book: book.to_string(), key: key.to_string() }
}

#[test]
fn test_normalize_term_is_idempotent() {
    for term in ["ʾĂrî", "זַיִת", "café", "  spaced   out  "] {
        let once = normalize_term_for_index(term);
        assert_eq!(normalize_term_for_index(&once), once);
    }
}

#[test]
fn test_normalize_term_ignores_diacritics() {
    assert_eq!(
        normalize_term_for_index("café"),
        normalize_term_for_index("cafe\u{0301}"),
    );
    // Pointed and unpointed Hebrew normalize alike
    assert_eq!(
        normalize_term_for_index("זַיִת"),
        normalize_term_for_index("זית"),
    );
}

#[test]
fn test_shared_transliteration_links_to_the_other_entry() {
    // "ʾărî" occurs on fauna:1.1 (Lion) and realia:3.2 (Lion Motif).
    // Looking it up from within the Lion entry must yield the other one.
    let data = sample_app_data();

    let hit = data
        .find_linked_entry("ʾărî", "Hebrew", &identity("fauna", "1.1"))
        .unwrap();
    assert_eq!(hit.book, "realia");
    assert_eq!(hit.key, "3.2");

    // And the reverse direction
    let hit = data
        .find_linked_entry("ʾărî", "Hebrew", &identity("realia", "3.2"))
        .unwrap();
    assert_eq!(hit.book, "fauna");
    assert_eq!(hit.key, "1.1");
}

#[test]
fn test_lemma_lookup_matches_unpointed_query() {
    let data = sample_app_data();

    let hit = data
        .find_linked_entry("זית", "Hebrew", &identity("fauna", "0"))
        .unwrap();
    assert_eq!(hit.title, "Olive");
}

#[test]
fn test_unshared_term_with_self_excluded_yields_none() {
    let data = sample_app_data();

    // "nesher" only occurs on the Eagle entry itself.
    assert!(data
        .find_linked_entry("nesher", "Hebrew", &identity("fauna", "1.2"))
        .is_none());
}

#[test]
fn test_language_scope_falls_back_to_wildcard() {
    let data = sample_app_data();

    // Queried under the wrong language, the wildcard bucket still matches.
    let hit = data
        .find_linked_entry("zayit", "Greek", &identity("fauna", "0"))
        .unwrap();
    assert_eq!(hit.title, "Olive");
}

#[test]
fn test_strongs_lookup() {
    let data = sample_app_data();

    let hits = data.find_by_strongs_id("H738");
    let books: Vec<&str> = hits.iter().map(|h| h.book.as_str()).collect();
    assert_eq!(books, vec!["fauna", "realia"]);

    assert!(data.find_by_strongs_id("H9999").is_empty());
}
