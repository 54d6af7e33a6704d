use realia_backend::app_data::AppData;
use realia_backend::types::{Entry, LanguageSet, Section};

pub fn entry(key: &str, title: &str, refs: &[&str]) -> Entry {
    Entry {
        key: key.to_string(),
        title: title.to_string(),
        references: refs.iter().map(|r| r.to_string()).collect(),
        ..Default::default()
    }
}

pub fn entry_with_paragraph(key: &str, title: &str, refs: &[&str], paragraph: &str) -> Entry {
    let mut e = entry(key, title, refs);
    e.sections = vec![Section {
        paragraphs: vec![paragraph.to_string()],
        ..Default::default()
    }];
    e
}

pub fn language_set(language: &str, lemma: &str, translit: &str, strongs: &[&str]) -> LanguageSet {
    LanguageSet {
        language: language.to_string(),
        lemma: lemma.to_string(),
        transliteration: translit.to_string(),
        strongs_ids: strongs.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// A small three-book corpus exercising citations, language sets, and
/// cross references.
pub fn sample_app_data() -> AppData {
    let mut data = AppData::new();

    let mut lion = entry_with_paragraph(
        "1.1",
        "Lion",
        &["Gen 49:9", "Judg 14:5", "1 Samuel 17:34"],
        "<p>The lion is the king of beasts and a figure of royal power.</p>",
    );
    lion.language_sets = vec![language_set("Hebrew", "אֲרִי", "ʾărî", &["H738"])];
    lion.cross_refs = vec!["REALIA:3.2".to_string()];

    let mut eagle = entry_with_paragraph(
        "1.2",
        "Eagle",
        &["Deut 32:11", "Obad 1:4"],
        "<p>A large bird of prey, emblem of swiftness.</p>",
    );
    eagle.language_sets = vec![language_set("Hebrew", "נֶשֶׁר", "nesher", &["H5404"])];

    let contents = entry("0", "Contents", &[]);

    let mut olive = entry_with_paragraph(
        "2.1",
        "Olive",
        &["Gen 8:11", "Deut 32:13"],
        "<p>The olive tree and its oil, staple of the land.</p>",
    );
    olive.language_sets = vec![language_set("Hebrew", "זַיִת", "zayit", &["H2132"])];

    let mut lion_motif = entry_with_paragraph(
        "3.2",
        "Lion Motif",
        &["1 Kgs 7:29"],
        "<p>Carved lions adorned the bases and the throne.</p>",
    );
    lion_motif.language_sets = vec![language_set("Hebrew", "אֲרִי", "ʾărî", &["H738"])];

    data.register_corpus("fauna", vec![contents, lion, eagle]);
    data.register_corpus("flora", vec![entry("0", "Contents", &[]), olive]);
    data.register_corpus("realia", vec![lion_motif]);

    data
}
