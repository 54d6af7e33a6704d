pub mod types;
pub mod helpers;
pub mod logger;
pub mod book_registry;
pub mod reference;
pub mod verse_index;
pub mod term_index;
pub mod search_index;
pub mod app_data;
pub mod verse_fetch;

use std::fs::create_dir_all;
use std::path::PathBuf;
use std::error::Error;
use std::sync::OnceLock;

use app_dirs::{get_app_root, AppDataType, AppInfo};
use parking_lot::RwLock;

use crate::app_data::AppData;

/// Search results are capped before returning to the caller.
pub static SEARCH_RESULT_MAX: usize = 30;

/// Queries shorter than this (after trimming) return no results.
pub static SEARCH_MIN_QUERY_LEN: usize = 2;

pub const APP_INFO: AppInfo = AppInfo{name: "realia-ng", author: "tfbf"};

pub use book_registry::normalize_book_token;
pub use reference::compare_references;
pub use term_index::normalize_term_for_index;

pub fn get_create_realia_dir() -> Result<PathBuf, Box<dyn Error>> {
    let p = get_app_root(AppDataType::UserData, &APP_INFO)?;
    if !p.exists() {
        create_dir_all(&p)?;
    }
    Ok(p)
}

static APP_DATA: OnceLock<RwLock<AppData>> = OnceLock::new();

/// Construct the process-wide AppData if it doesn't exist yet.
pub fn init_app_data() {
    let _ = get_app_data();
}

/// The process-wide AppData handle. Corpus registration takes the write
/// lock; queries take the read lock.
pub fn get_app_data() -> &'static RwLock<AppData> {
    APP_DATA.get_or_init(|| RwLock::new(AppData::new()))
}
