//! Path grammar and parser.
//!
//! A path is a `.` separated list of segments. Each segment names a
//! property, optionally selects one element by index or key, and optionally
//! applies a function to the result:
//!
//! ```text
//! order.items[2].price
//! config.entries['timeout'].value
//! customer.name:upper()
//! tags:default('none')
//! ```
//!
//! Parsing is purely syntactic; whether a name denotes a real property is
//! decided during navigation.

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod error;
mod parser;
mod segment;

// -----------------------------------------------------------------------------
// Exports

pub use cache::PathCache;
pub use error::{PathSyntaxError, SyntaxErrorKind};
pub use segment::{FunctionCall, Literal, Segment, Selector};

// -----------------------------------------------------------------------------
// Path

use alloc::sync::Arc;
use core::fmt;
use core::str::FromStr;

/// A parsed, immutable path.
///
/// Cheap to clone. Never empty.
///
/// # Examples
///
/// ```
/// use vc_nav::path::{Path, Selector};
///
/// let path = Path::parse("config.entries['timeout'].value").unwrap();
/// assert_eq!(path.len(), 3);
///
/// let entries = &path.segments()[1];
/// assert_eq!(entries.name(), "entries");
/// assert_eq!(entries.selector(), Some(&Selector::Key("timeout".into())));
/// assert!(entries.is_type_ambiguous());
///
/// // `Display` is canonical and parses back to an equal path.
/// let reparsed: Path = path.to_string().parse().unwrap();
/// assert_eq!(reparsed, path);
/// ```
#[derive(Clone)]
pub struct Path {
    source: Arc<str>,
    segments: Arc<[Segment]>,
}

impl Path {
    /// Parses `src`.
    pub fn parse(src: &str) -> Result<Self, PathSyntaxError> {
        let segments = parser::parse(src)?;
        Ok(Self {
            source: Arc::from(src),
            segments: Arc::from(segments),
        })
    }

    /// The source string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    #[inline]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The number of segments, at least one.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; provided for symmetry with [`len`](Self::len).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if any segment indexes, keys or calls a function.
    pub fn is_type_ambiguous(&self) -> bool {
        self.segments.iter().any(Segment::is_type_ambiguous)
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.segments == other.segments
    }
}

impl FromStr for Path {
    type Err = PathSyntaxError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Path").field(&&*self.source).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{Literal, Path, PathCache, SyntaxErrorKind, Selector};

    fn error(src: &str) -> (usize, SyntaxErrorKind) {
        let err = Path::parse(src).unwrap_err();
        assert_eq!(err.path, src);
        (err.offset, err.kind)
    }

    #[test]
    fn parse_segments() {
        let path = Path::parse("items[0].price").unwrap();
        let [items, price] = path.segments() else {
            panic!("expected two segments");
        };
        assert_eq!(items.name(), "items");
        assert_eq!(items.selector(), Some(&Selector::Index(0)));
        assert_eq!(items.offset(), 0);
        assert_eq!(price.name(), "price");
        assert_eq!(price.offset(), 9);
        assert!(!price.is_type_ambiguous());
        assert!(path.is_type_ambiguous());
    }

    #[test]
    fn parse_functions() {
        let path = Path::parse(r#"name:upper().tags:default( 'a\'b' , -3, 2.5, true, null )"#).unwrap();
        let name = &path.segments()[0];
        let call = name.function().unwrap();
        assert_eq!(call.name(), "upper");
        assert!(call.args().is_empty());

        let tags = path.segments()[1].function().unwrap();
        assert_eq!(
            tags.args(),
            [
                Literal::Str("a'b".into()),
                Literal::Int(-3),
                Literal::Float(2.5),
                Literal::Bool(true),
                Literal::Null,
            ]
        );
    }

    #[test]
    fn quoting() {
        let path = Path::parse(r#"m["it's"].n['it\'s']"#).unwrap();
        assert_eq!(path.segments()[0].selector(), Some(&Selector::Key("it's".into())));
        assert_eq!(path.segments()[1].selector(), Some(&Selector::Key("it's".into())));

        // Only the quote can be escaped.
        assert_eq!(error(r"m['a\\b']"), (4, SyntaxErrorKind::UnknownEscape('\\')));
    }

    #[test]
    fn canonical_display_round_trips() {
        for src in [
            "a",
            "a.b.c",
            "items[12].price",
            r#"m["it's"]:trim()"#,
            "x:default(1e3, 'q', false)",
            "_a1.b_2['k.e.y']",
        ] {
            let path = Path::parse(src).unwrap();
            let canonical = path.to_string();
            let reparsed = Path::parse(&canonical).unwrap();
            assert_eq!(reparsed, path, "{src} -> {canonical}");
            assert_eq!(reparsed.to_string(), canonical);
        }
    }

    #[test]
    fn syntax_errors() {
        use SyntaxErrorKind::*;

        assert_eq!(error(""), (0, EmptySegment));
        assert_eq!(error(".a"), (0, EmptySegment));
        assert_eq!(error("a..b"), (2, EmptySegment));
        assert_eq!(error("a."), (1, TrailingSeparator));
        assert_eq!(error("a[0"), (1, UnterminatedBracket));
        assert_eq!(error("a["), (1, UnterminatedBracket));
        assert_eq!(error("a]"), (1, UnbalancedBracket));
        assert_eq!(error("a[0]]"), (4, UnbalancedBracket));
        assert_eq!(error("a[]"), (2, EmptySelector));
        assert_eq!(error("a[-1]"), (2, InvalidSelector));
        assert_eq!(error("a['x"), (2, UnterminatedString));
        assert_eq!(error(r"a['x\n']"), (4, UnknownEscape('n')));
        assert_eq!(error("a:"), (2, ExpectedFunctionName));
        assert_eq!(error("a:f"), (3, ExpectedArguments));
        assert_eq!(error("a:f(1"), (3, UnterminatedCall));
        assert_eq!(error("a:f(1,)"), (6, InvalidLiteral));
        assert_eq!(error("a:f(x)"), (4, InvalidLiteral));
        assert_eq!(error("a b"), (1, UnexpectedChar(' ')));
        assert_eq!(error("a[99999999999999999999999]"), (2, IndexOverflow));
    }

    #[test]
    fn errors_are_deterministic() {
        for src in ["a..b", "a['x", "a:f(1"] {
            assert_eq!(Path::parse(src).unwrap_err(), Path::parse(src).unwrap_err());
        }
    }

    #[test]
    fn path_cache() {
        let cache = PathCache::with_capacity(1);
        let a = cache.get_or_parse("a.b").unwrap();
        assert_eq!(cache.get_or_parse("a.b").unwrap(), a);
        assert_eq!(cache.len(), 1);

        // Over capacity: parsed, not stored.
        assert!(cache.get_or_parse("c").is_ok());
        assert_eq!(cache.len(), 1);

        assert!(cache.get_or_parse("a.").is_err());
        cache.clear();
        assert!(cache.is_empty());
    }
}
