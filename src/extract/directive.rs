//! Pattern reading.
//!
//! A pattern is a string of one-character directive tags, except for literals which
//! span `^text^`. [`DirectiveCursor`] walks it left to right with two states: at a
//! directive boundary, or inside a literal span waiting for the closing `^`.

use std::fmt;

use super::error::ExtractError;

/// Fieldless identity of a directive, used in errors and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `X`
    Ignore,
    /// `^text^`
    Literal,
    /// `I`
    Int,
    /// `S`
    String,
    /// `B`
    Base64,
    /// `H`
    Hex,
    /// `d`
    Milliseconds,
    /// `D`
    Seconds,
    /// `e`
    EpochMilliseconds,
    /// `E`
    EpochSeconds,
    /// `P`
    PathTail,
}

impl DirectiveKind {
    /// The pattern character that introduces this directive
    #[must_use]
    pub fn tag(self) -> char {
        match self {
            DirectiveKind::Ignore => 'X',
            DirectiveKind::Literal => '^',
            DirectiveKind::Int => 'I',
            DirectiveKind::String => 'S',
            DirectiveKind::Base64 => 'B',
            DirectiveKind::Hex => 'H',
            DirectiveKind::Milliseconds => 'd',
            DirectiveKind::Seconds => 'D',
            DirectiveKind::EpochMilliseconds => 'e',
            DirectiveKind::EpochSeconds => 'E',
            DirectiveKind::PathTail => 'P',
        }
    }

    /// Short human readable name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            DirectiveKind::Ignore => "ignore",
            DirectiveKind::Literal => "literal",
            DirectiveKind::Int => "int",
            DirectiveKind::String => "string",
            DirectiveKind::Base64 => "base64",
            DirectiveKind::Hex => "hex",
            DirectiveKind::Milliseconds => "milliseconds",
            DirectiveKind::Seconds => "seconds",
            DirectiveKind::EpochMilliseconds => "epoch milliseconds",
            DirectiveKind::EpochSeconds => "epoch seconds",
            DirectiveKind::PathTail => "path",
        }
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tag(), self.name())
    }
}

/// One directive read from a pattern.
///
/// Literals borrow their expected text straight from the pattern string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'p> {
    Ignore,
    Literal(&'p str),
    Int,
    String,
    Base64,
    Hex,
    Milliseconds,
    Seconds,
    EpochMilliseconds,
    EpochSeconds,
    PathTail,
}

impl<'p> Directive<'p> {
    #[must_use]
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::Ignore => DirectiveKind::Ignore,
            Directive::Literal(_) => DirectiveKind::Literal,
            Directive::Int => DirectiveKind::Int,
            Directive::String => DirectiveKind::String,
            Directive::Base64 => DirectiveKind::Base64,
            Directive::Hex => DirectiveKind::Hex,
            Directive::Milliseconds => DirectiveKind::Milliseconds,
            Directive::Seconds => DirectiveKind::Seconds,
            Directive::EpochMilliseconds => DirectiveKind::EpochMilliseconds,
            Directive::EpochSeconds => DirectiveKind::EpochSeconds,
            Directive::PathTail => DirectiveKind::PathTail,
        }
    }

    /// Number of pattern bytes this directive occupies
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Directive::Literal(text) => text.len() + 2,
            _ => 1,
        }
    }

    /// Single-character directive for `tag`, if it is one
    fn from_tag(tag: char) -> Option<Directive<'static>> {
        Some(match tag {
            'X' => Directive::Ignore,
            'I' => Directive::Int,
            'S' => Directive::String,
            'B' => Directive::Base64,
            'H' => Directive::Hex,
            'd' => Directive::Milliseconds,
            'D' => Directive::Seconds,
            'e' => Directive::EpochMilliseconds,
            'E' => Directive::EpochSeconds,
            'P' => Directive::PathTail,
            _ => return None,
        })
    }
}

#[derive(Debug, Clone, Copy)]
enum CursorState {
    Boundary,
    Literal { open: usize },
}

/// Reads directives from a pattern one at a time.
///
/// The cursor only moves forward and never looks past the directive it returns,
/// so anything after a `P` is never inspected by the extractor.
#[derive(Debug, Clone)]
pub struct DirectiveCursor<'p> {
    pattern: &'p str,
    offset: usize,
}

impl<'p> DirectiveCursor<'p> {
    #[must_use]
    pub fn new(pattern: &'p str) -> Self {
        Self { pattern, offset: 0 }
    }

    /// Byte offset of the next directive to be read
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Read the next directive and advance past it.
    ///
    /// Returns `Ok(None)` once the pattern is exhausted. On error the cursor is
    /// left where it was.
    ///
    /// # Errors
    ///
    /// * [`ExtractError::UnknownDirective`] for a character that is not a tag
    /// * [`ExtractError::MalformedPattern`] for a `^` with no closing `^`
    pub fn next_directive(&mut self) -> Result<Option<(usize, Directive<'p>)>, ExtractError> {
        let pattern = self.pattern;
        let rest = pattern.get(self.offset..).unwrap_or_default();
        let mut state = CursorState::Boundary;

        for (i, c) in rest.char_indices() {
            let at = self.offset + i;
            match state {
                CursorState::Boundary => {
                    if c == '^' {
                        state = CursorState::Literal { open: at };
                        continue;
                    }
                    let directive = Directive::from_tag(c).ok_or(ExtractError::UnknownDirective {
                        directive: c,
                        offset: at,
                    })?;
                    self.offset = at + directive.width();
                    return Ok(Some((at, directive)));
                }
                CursorState::Literal { open } => {
                    if c == '^' {
                        let directive = Directive::Literal(&pattern[open + 1..at]);
                        self.offset = open + directive.width();
                        return Ok(Some((open, directive)));
                    }
                }
            }
        }

        match state {
            CursorState::Boundary => Ok(None),
            CursorState::Literal { open } => Err(ExtractError::MalformedPattern { offset: open }),
        }
    }
}

/// Yields every directive in the pattern, stopping after the first error.
impl<'p> Iterator for DirectiveCursor<'p> {
    type Item = Result<(usize, Directive<'p>), ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_directive() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => None,
            Err(err) => {
                self.offset = self.pattern.len();
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(pattern: &str) -> Result<Vec<(usize, Directive<'_>)>, ExtractError> {
        DirectiveCursor::new(pattern).collect()
    }

    #[test]
    fn test_single_char_directives() {
        let directives = read_all("XISBHdDeEP").unwrap();
        let kinds: String = directives.iter().map(|(_, d)| d.kind().tag()).collect();
        assert_eq!(kinds, "XISBHdDeEP");
        let offsets: Vec<usize> = directives.iter().map(|(o, _)| *o).collect();
        assert_eq!(offsets, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_literal_span_offsets() {
        let directives = read_all("X^literal^I").unwrap();
        assert_eq!(
            directives,
            vec![
                (0, Directive::Ignore),
                (1, Directive::Literal("literal")),
                (10, Directive::Int),
            ]
        );
        assert_eq!(directives[1].1.width(), 9);
    }

    #[test]
    fn test_empty_literal() {
        let mut cursor = DirectiveCursor::new("^^S");
        assert_eq!(cursor.next_directive().unwrap(), Some((0, Directive::Literal(""))));
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.next_directive().unwrap(), Some((2, Directive::String)));
        assert_eq!(cursor.next_directive().unwrap(), None);
    }

    #[test]
    fn test_literal_may_contain_tags_and_unicode() {
        let directives = read_all("^QIé/^P").unwrap();
        assert_eq!(directives[0], (0, Directive::Literal("QIé/")));
        assert_eq!(directives[1], (7, Directive::PathTail));
    }

    #[test]
    fn test_unclosed_literal() {
        assert_eq!(
            read_all("I^oops"),
            Err(ExtractError::MalformedPattern { offset: 1 })
        );
    }

    #[test]
    fn test_unknown_directive() {
        assert_eq!(
            read_all("IQ"),
            Err(ExtractError::UnknownDirective {
                directive: 'Q',
                offset: 1
            })
        );
    }

    #[test]
    fn test_error_leaves_cursor_in_place() {
        let mut cursor = DirectiveCursor::new("IQ");
        cursor.next_directive().unwrap();
        assert!(cursor.next_directive().is_err());
        assert_eq!(cursor.offset(), 1);
    }

    #[test]
    fn test_iterator_fuses_after_error() {
        let mut cursor = DirectiveCursor::new("Q^never^");
        assert!(matches!(cursor.next(), Some(Err(_))));
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DirectiveKind::EpochMilliseconds.to_string(), "e (epoch milliseconds)");
        assert_eq!(DirectiveKind::Literal.to_string(), "^ (literal)");
    }
}
