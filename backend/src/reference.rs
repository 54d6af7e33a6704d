//! Scripture citation parsing and ordering.
//!
//! A citation string like "John 3:16" parses into a [`VerseReference`];
//! a citation range like "John 3:16-4:2" parses into a [`VerseRange`]
//! whose endpoints are always in non-decreasing order. The rendered form
//! of a reference (`Display`) parses back to an equal reference and
//! doubles as the verse key used by the reverse verse index.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::book_registry::{book_order_index, normalize_book_token};

/// A resolved citation: canonical book code, chapter, verse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseReference {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl VerseReference {
    /// The unique string key under which this verse is indexed.
    pub fn verse_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.book, self.chapter, self.verse)
    }
}

impl Ord for VerseReference {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_references(self, other)
    }
}

impl PartialOrd for VerseReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order over references: canonical book position (unknown books
/// sort last), then chapter, then verse.
pub fn compare_references(a: &VerseReference, b: &VerseReference) -> Ordering {
    book_order_index(&a.book)
        .cmp(&book_order_index(&b.book))
        .then(a.chapter.cmp(&b.chapter))
        .then(a.verse.cmp(&b.verse))
}

/// An ordered citation range with `start <= end` under the comparator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRange {
    pub start: VerseReference,
    pub end: VerseReference,
}

impl fmt::Display for VerseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// The preceding reference a contextual citation form inherits from.
#[derive(Debug, Clone)]
pub struct RefContext {
    pub book: String,
    pub chapter: Option<u32>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceParseError {
    #[error("the reference is empty")]
    Empty,
    #[error("book not recognized: '{0}'")]
    UnknownBook(String),
    #[error("chapter or verse is not a number: '{0}'")]
    NotNumeric(String),
    #[error("'{0}' needs a preceding reference for context")]
    MissingContext(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSide {
    Start,
    End,
}

impl fmt::Display for RangeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeSide::Start => write!(f, "start"),
            RangeSide::End => write!(f, "end"),
        }
    }
}

/// A range query failure, carrying which side failed and why.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{side} of the range: {cause}")]
pub struct RangeParseError {
    pub side: RangeSide,
    pub cause: ReferenceParseError,
}

fn parse_positive_number(text: &str, whole: &str) -> Result<u32, ReferenceParseError> {
    match text.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ReferenceParseError::NotNumeric(whole.to_string())),
    }
}

fn parse_chapter_verse(cv: &str) -> Result<(u32, u32), ReferenceParseError> {
    let (c, v) = cv
        .split_once(':')
        .ok_or_else(|| ReferenceParseError::NotNumeric(cv.to_string()))?;
    let chapter = parse_positive_number(c.trim(), cv)?;
    let verse = parse_positive_number(v.trim(), cv)?;
    Ok((chapter, verse))
}

/// Parse a single citation into a reference.
///
/// The full form is `"<book> <chapter>:<verse>"`. With a context (used
/// for the second half of a range), `"<chapter>:<verse>"` inherits the
/// book and a bare `"<verse>"` inherits book and chapter.
pub fn parse_reference_unit(
    text: &str,
    context: Option<&RefContext>,
) -> Result<VerseReference, ReferenceParseError> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    if text.is_empty() {
        return Err(ReferenceParseError::Empty);
    }

    if text.contains(':') {
        // Book part, if any, is everything before the chapter:verse token.
        if let Some((book_part, cv)) = text.rsplit_once(' ') {
            if cv.contains(':') {
                let book = normalize_book_token(book_part)
                    .ok_or_else(|| ReferenceParseError::UnknownBook(book_part.to_string()))?;
                let (chapter, verse) = parse_chapter_verse(cv)?;
                return Ok(VerseReference { book: book.to_string(), chapter, verse });
            }
            // A space before the colon token but no colon after the last
            // space, e.g. "John 3 :16". Not a recognized shape.
            return Err(ReferenceParseError::NotNumeric(text));
        }

        // "<chapter>:<verse>" with the book inherited.
        let ctx = context
            .ok_or_else(|| ReferenceParseError::MissingContext(text.clone()))?;
        let (chapter, verse) = parse_chapter_verse(&text)?;
        return Ok(VerseReference { book: ctx.book.clone(), chapter, verse });
    }

    // Bare "<verse>": book and chapter inherited; only valid when the
    // context carries a chapter.
    let ctx = match context {
        Some(ctx) if ctx.chapter.is_some() => ctx,
        _ => return Err(ReferenceParseError::MissingContext(text.clone())),
    };
    let verse = parse_positive_number(&text, &text)?;
    Ok(VerseReference {
        book: ctx.book.clone(),
        chapter: ctx.chapter.unwrap(),
        verse,
    })
}

/// Parse a citation-range query into an ordered range.
///
/// The input is split on the first hyphen; the left side must resolve
/// standalone, the right side inherits the left's book and chapter. With
/// no hyphen the whole string is one unit and `start == end`. Reversed
/// endpoints are swapped.
pub fn parse_reference_query(text: &str) -> Result<VerseRange, RangeParseError> {
    let normalized = text.replace(['\u{2013}', '\u{2014}'], "-");
    let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

    if normalized.is_empty() {
        return Err(RangeParseError {
            side: RangeSide::Start,
            cause: ReferenceParseError::Empty,
        });
    }

    let (start, end) = match normalized.split_once('-') {
        None => {
            let unit = parse_reference_unit(&normalized, None)
                .map_err(|cause| RangeParseError { side: RangeSide::Start, cause })?;
            (unit.clone(), unit)
        }
        Some((left, right)) => {
            let start = parse_reference_unit(left.trim(), None)
                .map_err(|cause| RangeParseError { side: RangeSide::Start, cause })?;

            let ctx = RefContext {
                book: start.book.clone(),
                chapter: Some(start.chapter),
            };
            let end = parse_reference_unit(right.trim(), Some(&ctx))
                .map_err(|cause| RangeParseError { side: RangeSide::End, cause })?;

            (start, end)
        }
    };

    if compare_references(&start, &end) == Ordering::Greater {
        return Ok(VerseRange { start: end, end: start });
    }
    Ok(VerseRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(book: &str, chapter: u32, verse: u32) -> VerseReference {
        VerseReference { book: book.to_string(), chapter, verse }
    }

    #[test]
    fn test_parse_full_form() {
        let r = parse_reference_unit("John 3:16", None).unwrap();
        assert_eq!(r, reference("John", 3, 16));
    }

    #[test]
    fn test_parse_full_name_and_spaces() {
        let r = parse_reference_unit("  Song   of Solomon  2:1 ", None).unwrap();
        assert_eq!(r, reference("Song", 2, 1));

        let r = parse_reference_unit("1 Samuel 17:34", None).unwrap();
        assert_eq!(r, reference("1Sam", 17, 34));
    }

    #[test]
    fn test_parse_contextual_chapter_verse() {
        let ctx = RefContext { book: "John".to_string(), chapter: Some(3) };
        let r = parse_reference_unit("4:2", Some(&ctx)).unwrap();
        assert_eq!(r, reference("John", 4, 2));
    }

    #[test]
    fn test_parse_contextual_bare_verse() {
        let ctx = RefContext { book: "John".to_string(), chapter: Some(3) };
        let r = parse_reference_unit("18", Some(&ctx)).unwrap();
        assert_eq!(r, reference("John", 3, 18));
    }

    #[test]
    fn test_bare_verse_requires_chapter_context() {
        let ctx = RefContext { book: "John".to_string(), chapter: None };
        let err = parse_reference_unit("18", Some(&ctx)).unwrap_err();
        assert!(matches!(err, ReferenceParseError::MissingContext(_)));

        let err = parse_reference_unit("3:16", None).unwrap_err();
        assert!(matches!(err, ReferenceParseError::MissingContext(_)));
    }

    #[test]
    fn test_parse_failures_are_typed() {
        assert_eq!(parse_reference_unit("", None), Err(ReferenceParseError::Empty));
        assert_eq!(parse_reference_unit("   ", None), Err(ReferenceParseError::Empty));

        let err = parse_reference_unit("Johm 3:16", None).unwrap_err();
        assert_eq!(err, ReferenceParseError::UnknownBook("Johm".to_string()));

        let err = parse_reference_unit("John a:16", None).unwrap_err();
        assert!(matches!(err, ReferenceParseError::NotNumeric(_)));

        let err = parse_reference_unit("John 3:0", None).unwrap_err();
        assert!(matches!(err, ReferenceParseError::NotNumeric(_)));
    }

    #[test]
    fn test_display_parse_round_trip() {
        let cases = [
            reference("John", 3, 16),
            reference("1Sam", 17, 34),
            reference("Song", 2, 1),
            reference("Rev", 22, 21),
        ];
        for r in cases {
            let parsed = parse_reference_unit(&r.to_string(), None).unwrap();
            assert_eq!(parsed, r);
        }
    }

    #[test]
    fn test_compare_references_total_order() {
        let a = reference("Gen", 1, 1);
        let b = reference("Gen", 1, 2);
        let c = reference("Matt", 1, 1);

        assert_eq!(compare_references(&a, &b), Ordering::Less);
        assert_eq!(compare_references(&b, &c), Ordering::Less);
        assert_eq!(compare_references(&a, &c), Ordering::Less);
        assert_eq!(compare_references(&a, &a), Ordering::Equal);
        assert_eq!(compare_references(&c, &a), Ordering::Greater);

        // Unknown books sort after canonical ones
        let unknown = reference("Nonesuch", 1, 1);
        assert_eq!(compare_references(&c, &unknown), Ordering::Less);
    }

    #[test]
    fn test_range_same_chapter() {
        let range = parse_reference_query("John 3:16-18").unwrap();
        assert_eq!(range.start, reference("John", 3, 16));
        assert_eq!(range.end, reference("John", 3, 18));
    }

    #[test]
    fn test_range_cross_chapter() {
        let range = parse_reference_query("John 3:16-4:2").unwrap();
        assert_eq!(range.start, reference("John", 3, 16));
        assert_eq!(range.end, reference("John", 4, 2));
    }

    #[test]
    fn test_range_single_unit() {
        let range = parse_reference_query("John 3:16").unwrap();
        assert_eq!(range.start, range.end);
        assert_eq!(range.start, reference("John", 3, 16));
    }

    #[test]
    fn test_range_reversed_endpoints_swap() {
        let range = parse_reference_query("John 3:18-16").unwrap();
        assert_eq!(range.start, reference("John", 3, 16));
        assert_eq!(range.end, reference("John", 3, 18));
    }

    #[test]
    fn test_range_en_dash() {
        let range = parse_reference_query("John 3:16\u{2013}18").unwrap();
        assert_eq!(range.end, reference("John", 3, 18));
    }

    #[test]
    fn test_range_error_carries_side() {
        let err = parse_reference_query("Johm 3:16-18").unwrap_err();
        assert_eq!(err.side, RangeSide::Start);
        assert_eq!(err.cause, ReferenceParseError::UnknownBook("Johm".to_string()));

        let err = parse_reference_query("John 3:16-x").unwrap_err();
        assert_eq!(err.side, RangeSide::End);
        assert!(matches!(err.cause, ReferenceParseError::NotNumeric(_)));
    }
}
