//! External verse-text fetch boundary.
//!
//! Verse text comes from an external collaborator behind the
//! [`VerseTextSource`] trait; the core never fetches it itself. Because
//! responses can arrive after the user has already issued a newer query,
//! every request is stamped with a token and a response is applied only
//! while its token is still the current one: last query wins, a late
//! response for a superseded request is discarded.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use thiserror::Error;

use crate::logger;
use crate::reference::{VerseRange, VerseReference};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerseFetchError {
    #[error("verse text is not available for {0}")]
    NotAvailable(String),
    #[error("verse text request failed: {0}")]
    RequestFailed(String),
}

/// The capability the external collaborator implements.
pub trait VerseTextSource {
    fn fetch_verse_text(&self, reference: &VerseReference) -> Result<String, VerseFetchError>;
}

/// Identifies one in-flight fetch: a monotonically increasing id plus
/// the key of the range it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    id: u64,
    range_key: String,
}

impl RequestToken {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn range_key(&self) -> &str {
        &self.range_key
    }
}

fn range_key(range: &VerseRange) -> String {
    format!("{}-{}", range.start.verse_key(), range.end.verse_key())
}

#[derive(Debug, Default)]
pub struct VerseFetchManager {
    counter: AtomicU64,
    current: Mutex<Option<RequestToken>>,
}

impl VerseFetchManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request for the range, superseding any request still
    /// in flight.
    pub fn begin_request(&self, range: &VerseRange) -> RequestToken {
        let token = RequestToken {
            id: self.counter.fetch_add(1, Ordering::SeqCst) + 1,
            range_key: range_key(range),
        };
        *self.current.lock() = Some(token.clone());
        token
    }

    /// Whether the token still identifies the latest request.
    pub fn is_current(&self, token: &RequestToken) -> bool {
        matches!(self.current.lock().as_ref(), Some(t) if t == token)
    }

    /// Apply a response only if its request is still current; a stale
    /// response is dropped and None returned.
    pub fn accept_response<T>(&self, token: &RequestToken, response: T) -> Option<T> {
        let current = self.current.lock();
        match current.as_ref() {
            Some(t) if t == token => Some(response),
            _ => {
                logger::debug(&format!(
                    "Discarding stale verse text response for {} (request {})",
                    token.range_key, token.id
                ));
                None
            }
        }
    }

    /// Drop the current request without replacing it; any in-flight
    /// response becomes stale.
    pub fn cancel(&self) {
        *self.current.lock() = None;
    }
}
