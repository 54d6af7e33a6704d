use std::path::PathBuf;
use std::process::exit;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use anyhow::{Context, Result};
use thiserror::Error;

use realia_backend::{get_app_data, logger};
use realia_backend::types::{CorpusFile, EntryIdentity};

#[derive(Error, Debug)]
enum CorpusLoadError {
    #[error("no corpus files given; pass --corpus <FILE> or set REALIA_CORPUS")]
    NoCorpusFiles,
    #[error("corpus file {0} has no book id")]
    MissingBookId(PathBuf),
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Realia Reference CLI", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Corpus JSON file(s) to load before running the command.
    /// May be given multiple times.
    #[arg(long, global = true, value_name = "FILE", env = "REALIA_CORPUS")]
    corpus: Vec<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up entries by scripture citation or citation range,
    /// e.g. "John 3:16-18"
    #[command(arg_required_else_help = true)]
    Lookup {
        citation: String,
    },

    /// Free-text search across all loaded books
    #[command(arg_required_else_help = true)]
    Search {
        query: String,

        /// Print only the number of results
        #[arg(long)]
        count: bool,
    },

    /// Find the entry a lemma or transliteration links to
    #[command(arg_required_else_help = true)]
    Term {
        term: String,

        /// Source language to scope the lookup to
        #[arg(long, default_value = "")]
        language: String,

        /// Book of the entry the term occurs on (excluded from results)
        #[arg(long, default_value = "")]
        from_book: String,

        /// Key of the entry the term occurs on (excluded from results)
        #[arg(long, default_value = "")]
        from_key: String,
    },

    /// Print one entry's references and cross references
    #[command(arg_required_else_help = true)]
    Entry {
        book: String,
        key: String,
    },

    /// List entries carrying a Strong's number
    #[command(arg_required_else_help = true)]
    Strongs {
        id: String,
    },
}

fn load_corpus_files(paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        return Err(CorpusLoadError::NoCorpusFiles.into());
    }

    let app_data = get_app_data();
    for path in paths {
        let corpus = CorpusFile::load_from_json(path)
            .with_context(|| format!("Could not load corpus from {}", path.display()))?;
        if corpus.book.is_empty() {
            return Err(CorpusLoadError::MissingBookId(path.clone()).into());
        }
        app_data.write().register_corpus(&corpus.book, corpus.entries);
    }

    Ok(())
}

fn cmd_lookup(citation: &str) {
    let app_data = get_app_data().read();
    match app_data.lookup_citation(citation) {
        Ok((range, lookup)) => {
            println!("{}: {} verse(s) cited, {} entries", range, lookup.matched_verse_count, lookup.entries.len());
            for hit in &lookup.entries {
                println!("{}:{}: {}", hit.book, hit.key, hit.title);
            }
        }
        Err(e) => {
            eprintln!("Could not read the citation ({})", e);
            exit(1);
        }
    }
}

fn cmd_search(query: &str, count: bool) {
    let app_data = get_app_data().read();
    let results = app_data.search(query);

    if count {
        println!("{}", results.len());
        return;
    }
    for r in &results {
        if r.snippet.is_empty() {
            println!("{}:{}: {}", r.book, r.key, r.title);
        } else {
            println!("{}:{}: {} ({})", r.book, r.key, r.title, r.snippet);
        }
    }
}

fn cmd_term(term: &str, language: &str, from_book: &str, from_key: &str) {
    let app_data = get_app_data().read();
    let exclude = EntryIdentity {
        book: from_book.to_string(),
        key: from_key.to_string(),
    };

    match app_data.find_linked_entry(term, language, &exclude) {
        Some(hit) => println!("{}:{}: {}", hit.book, hit.key, hit.title),
        None => {
            println!("No linked entry for '{}'", term);
            exit(1);
        }
    }
}

fn cmd_entry(book: &str, key: &str) {
    let app_data = get_app_data().read();
    match app_data.get_entry(book, key) {
        Some(entry) => {
            println!("{} ({}:{})", entry.title, entry.book, entry.key);
            for ls in &entry.language_sets {
                if ls.transliteration.is_empty() {
                    println!("  {}: {}", ls.language, ls.lemma);
                } else {
                    println!("  {}: {} ({})", ls.language, ls.lemma, ls.transliteration);
                }
            }
            if !entry.references.is_empty() {
                println!("  References: {}", entry.references.join("; "));
            }
            if !entry.cross_refs.is_empty() {
                for target in &entry.cross_refs {
                    match app_data.resolve_cross_ref(target) {
                        Some(e) => println!("  See also: {} ({})", e.title, target),
                        None => println!("  See also: {}", target),
                    }
                }
            }
        }
        None => {
            eprintln!("No entry {}:{}", book, key);
            exit(1);
        }
    }
}

fn cmd_strongs(id: &str) {
    let app_data = get_app_data().read();
    let hits = app_data.find_by_strongs_id(id);
    if hits.is_empty() {
        println!("No entries for Strong's {}", id);
        return;
    }
    for hit in &hits {
        println!("{}:{}: {}", hit.book, hit.key, hit.title);
    }
}

fn main() -> Result<()> {
    dotenv().ok();

    if let Err(e) = logger::init_tracing() {
        eprintln!("Failed to init tracing: {}", e);
    }

    let cli = Cli::parse();

    load_corpus_files(&cli.corpus)?;

    match &cli.command {
        Commands::Lookup { citation } => cmd_lookup(citation),
        Commands::Search { query, count } => cmd_search(query, *count),
        Commands::Term { term, language, from_book, from_key } => {
            cmd_term(term, language, from_book, from_key)
        }
        Commands::Entry { book, key } => cmd_entry(book, key),
        Commands::Strongs { id } => cmd_strongs(id),
    }

    Ok(())
}
