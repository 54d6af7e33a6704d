//! Canonical book registry and alias resolver.
//!
//! The canonical code list fixes document order across the whole corpus:
//! Old Testament, New Testament, then the deuterocanonical books, in
//! traditional sequence. Free-form book tokens from citations resolve to
//! a canonical code through the alias table.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Canonical book codes in document order.
pub static CANONICAL_BOOKS: &[&str] = &[
    // Old Testament
    "Gen", "Exod", "Lev", "Num", "Deut", "Josh", "Judg", "Ruth",
    "1Sam", "2Sam", "1Kgs", "2Kgs", "1Chr", "2Chr", "Ezra", "Neh",
    "Esth", "Job", "Ps", "Prov", "Eccl", "Song", "Isa", "Jer",
    "Lam", "Ezek", "Dan", "Hos", "Joel", "Amos", "Obad", "Jonah",
    "Mic", "Nah", "Hab", "Zeph", "Hag", "Zech", "Mal",
    // New Testament
    "Matt", "Mark", "Luke", "John", "Acts", "Rom", "1Cor", "2Cor",
    "Gal", "Eph", "Phil", "Col", "1Thess", "2Thess", "1Tim", "2Tim",
    "Titus", "Phlm", "Heb", "Jas", "1Pet", "2Pet", "1John", "2John",
    "3John", "Jude", "Rev",
    // Deuterocanon
    "Tob", "Jdt", "Wis", "Sir", "Bar", "1Macc", "2Macc",
];

/// Known full names and abbreviation variants, per canonical code. The
/// code itself is always registered as an alias of itself.
static BOOK_NAMES: &[(&str, &[&str])] = &[
    ("Gen", &["Genesis"]),
    ("Exod", &["Exodus", "Ex"]),
    ("Lev", &["Leviticus"]),
    ("Num", &["Numbers"]),
    ("Deut", &["Deuteronomy", "Dt"]),
    ("Josh", &["Joshua"]),
    ("Judg", &["Judges", "Jdg"]),
    ("Ruth", &["Ru"]),
    ("1Sam", &["1 Sam", "1 Samuel", "I Samuel"]),
    ("2Sam", &["2 Sam", "2 Samuel", "II Samuel"]),
    ("1Kgs", &["1 Kgs", "1 Kings", "I Kings"]),
    ("2Kgs", &["2 Kgs", "2 Kings", "II Kings"]),
    ("1Chr", &["1 Chr", "1 Chronicles", "I Chronicles"]),
    ("2Chr", &["2 Chr", "2 Chronicles", "II Chronicles"]),
    ("Ezra", &[]),
    ("Neh", &["Nehemiah"]),
    ("Esth", &["Esther"]),
    ("Job", &[]),
    ("Ps", &["Psalm", "Psalms", "Pss"]),
    ("Prov", &["Proverbs", "Prv"]),
    ("Eccl", &["Ecclesiastes", "Qoheleth"]),
    ("Song", &["Song of Solomon", "Song of Songs", "Canticles", "Cant"]),
    ("Isa", &["Isaiah"]),
    ("Jer", &["Jeremiah"]),
    ("Lam", &["Lamentations"]),
    ("Ezek", &["Ezekiel", "Ez"]),
    ("Dan", &["Daniel", "Dn"]),
    ("Hos", &["Hosea"]),
    ("Joel", &[]),
    ("Amos", &["Am"]),
    ("Obad", &["Obadiah", "Ob"]),
    ("Jonah", &["Jon"]),
    ("Mic", &["Micah"]),
    ("Nah", &["Nahum"]),
    ("Hab", &["Habakkuk"]),
    ("Zeph", &["Zephaniah"]),
    ("Hag", &["Haggai"]),
    ("Zech", &["Zechariah"]),
    ("Mal", &["Malachi"]),
    ("Matt", &["Matthew", "Mt"]),
    ("Mark", &["Mk"]),
    ("Luke", &["Lk"]),
    ("John", &["Jn"]),
    ("Acts", &["Acts of the Apostles"]),
    ("Rom", &["Romans"]),
    ("1Cor", &["1 Cor", "1 Corinthians", "I Corinthians"]),
    ("2Cor", &["2 Cor", "2 Corinthians", "II Corinthians"]),
    ("Gal", &["Galatians"]),
    ("Eph", &["Ephesians"]),
    ("Phil", &["Philippians"]),
    ("Col", &["Colossians"]),
    ("1Thess", &["1 Thess", "1 Thessalonians", "I Thessalonians"]),
    ("2Thess", &["2 Thess", "2 Thessalonians", "II Thessalonians"]),
    ("1Tim", &["1 Tim", "1 Timothy", "I Timothy"]),
    ("2Tim", &["2 Tim", "2 Timothy", "II Timothy"]),
    ("Titus", &["Tit"]),
    ("Phlm", &["Philemon"]),
    ("Heb", &["Hebrews"]),
    ("Jas", &["James"]),
    ("1Pet", &["1 Pet", "1 Peter", "I Peter"]),
    ("2Pet", &["2 Pet", "2 Peter", "II Peter"]),
    ("1John", &["1 John", "1 Jn", "I John"]),
    ("2John", &["2 John", "2 Jn", "II John"]),
    ("3John", &["3 John", "3 Jn", "III John"]),
    ("Jude", &[]),
    ("Rev", &["Revelation", "Apocalypse", "Apoc"]),
    ("Tob", &["Tobit"]),
    ("Jdt", &["Judith"]),
    ("Wis", &["Wisdom", "Wisdom of Solomon"]),
    ("Sir", &["Sirach", "Ecclesiasticus"]),
    ("Bar", &["Baruch"]),
    ("1Macc", &["1 Macc", "1 Maccabees", "I Maccabees"]),
    ("2Macc", &["2 Macc", "2 Maccabees", "II Maccabees"]),
];

lazy_static! {
    /// Map of canonical code to its position in document order.
    static ref BOOK_ORDER: HashMap<&'static str, usize> = {
        CANONICAL_BOOKS
            .iter()
            .enumerate()
            .map(|(i, code)| (*code, i))
            .collect()
    };

    /// Normalized alias to canonical code.
    static ref BOOK_ALIASES: HashMap<String, &'static str> = {
        let mut map = HashMap::new();
        for code in CANONICAL_BOOKS {
            map.insert(alias_key(code), *code);
        }
        for (code, names) in BOOK_NAMES {
            for name in names.iter() {
                map.insert(alias_key(name), *code);
            }
        }
        map
    };
}

/// Lowercase, strip periods, collapse whitespace, trim.
fn alias_key(token: &str) -> String {
    let lowered = token.to_lowercase().replace('.', "");
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolve a free-form book token to its canonical code. Unknown input
/// yields None.
pub fn normalize_book_token(input: &str) -> Option<&'static str> {
    let key = alias_key(input);
    if key.is_empty() {
        return None;
    }
    BOOK_ALIASES.get(&key).copied()
}

/// The book's position in canonical document order. Unknown books sort
/// after every canonical one.
pub fn book_order_index(code: &str) -> usize {
    BOOK_ORDER.get(code).copied().unwrap_or(usize::MAX)
}
