use std::num::ParseIntError;

use super::directive::DirectiveKind;

/// The error returned by [`extract`](crate::extract::extract) when a path does not
/// fit a pattern, or when the pattern itself is broken.
///
/// Every variant is terminal: no partial [`Match`](crate::extract::Match) is
/// produced alongside it. Callers treat any error as "this path does not match this
/// pattern" and either try another pattern or answer with a 404/400.
///
/// Offsets are byte offsets into the pattern string and always point at the
/// first byte of the directive involved (the opening `^` for literals).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ExtractError {
    /// The path has more segments than the pattern has directives.
    #[error("ran off the end of pattern string at offset {offset}")]
    PatternExhausted {
        /// Offset one past the last directive consumed
        offset: usize,
    },
    /// A segment could not be converted to the type its directive asks for.
    #[error("could not extract {} ({}) at offset {offset}", .kind.tag(), .kind.name())]
    Decode {
        /// Which directive failed
        kind: DirectiveKind,
        /// Offset of the failing directive
        offset: usize,
        /// Underlying reason
        #[source]
        source: DecodeFailure,
    },
    /// A literal directive was opened with `^` but never closed.
    #[error("bad pattern for literal at offset {offset}, no ending ^ delimiter")]
    MalformedPattern {
        /// Offset of the opening `^`
        offset: usize,
    },
    /// The pattern contains a character that is not a known directive tag.
    #[error("unrecognized pattern {directive:?} at offset {offset}")]
    UnknownDirective {
        /// The offending character
        directive: char,
        /// Offset of the offending character
        offset: usize,
    },
}

impl ExtractError {
    /// Pattern offset the error refers to
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            ExtractError::PatternExhausted { offset }
            | ExtractError::Decode { offset, .. }
            | ExtractError::MalformedPattern { offset }
            | ExtractError::UnknownDirective { offset, .. } => *offset,
        }
    }

    /// `true` when the pattern is at fault rather than the path.
    ///
    /// A route table should surface these at startup or as a 500, since no
    /// path will ever match a broken pattern.
    #[must_use]
    pub fn is_pattern_error(&self) -> bool {
        matches!(
            self,
            ExtractError::MalformedPattern { .. } | ExtractError::UnknownDirective { .. }
        )
    }
}

/// Why a single segment failed to decode.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum DecodeFailure {
    /// Not a base-10 `i64`
    #[error(transparent)]
    Int(#[from] ParseIntError),
    /// Not valid URL-safe base64
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),
    /// Odd length or a non-hex character
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
    /// The segment is not the literal text the pattern demands
    #[error("literal `{expected}` not found, got `{found}`")]
    LiteralMismatch {
        /// Text between the `^` delimiters
        expected: String,
        /// The segment as received
        found: String,
    },
    /// The integer parsed but does not fit the target type
    #[error("{value} is out of range for {target}")]
    OutOfRange {
        /// The parsed integer
        value: i64,
        /// Human readable target (e.g. "duration in seconds")
        target: &'static str,
    },
}
