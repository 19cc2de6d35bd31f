//! # pathextract
//!
//! **pathextract** decodes a URL path into a sequence of typed values, driven by a
//! short pattern string with one directive per path segment. It is the piece a
//! router calls after it has picked a route: the route carries the pattern, the
//! request carries the path.
//!
//! ## Overview
//!
//! ```
//! use pathextract::{extract, Value};
//!
//! let m = extract(
//!     "/ignore/literal/123/string/TWFu/deadbeef01/1000/1/1412172938000/1412172938/path/to/resource/",
//!     "X^literal^ISBHdDeEP",
//! )?;
//!
//! assert_eq!(m.len(), 11);
//! assert!(m[0].is_absent());
//! assert_eq!(m[1], Value::Bool(true));
//! assert_eq!(m[2].as_int(), Some(123));
//! assert_eq!(m[4].as_bytes(), Some(&b"Man"[..]));
//! assert_eq!(m[10].as_str(), Some("path/to/resource/"));
//! # Ok::<(), pathextract::ExtractError>(())
//! ```
//!
//! ## Pattern directives
//!
//! | Tag | Segment is | Value |
//! |---|---|---|
//! | `X` | ignored | [`Value::Absent`] |
//! | `^text^` | exactly `text` | [`Value::Bool`] |
//! | `I` | base-10 integer | [`Value::Int`] |
//! | `S` | any string, including empty | [`Value::String`] |
//! | `B` | URL-safe base64 | [`Value::Bytes`] |
//! | `H` | hex | [`Value::Bytes`] |
//! | `d` / `D` | milliseconds / seconds | [`Value::Duration`] |
//! | `e` / `E` | epoch milliseconds / seconds | [`Value::Timestamp`] |
//! | `P` | this and all remaining segments | [`Value::String`] |
//!
//! ## Architecture
//!
//! - **[`mod@extract`]** - the extractor: pattern cursor, segment decoders, result types
//! - **[`logging`]** - `tracing-subscriber` setup used by the binary
//! - **[`cli`]** - the `pathextract` command (`extract`, `explain`)
//!
//! ## Key Properties
//!
//! 1. **Pure**: no state survives a call, no pattern caching, safe from any thread
//! 2. **All-or-nothing**: any failure returns an [`ExtractError`] and no values
//! 3. **No optional segments**: the pattern must cover every segment up to `P`
//! 4. **Exhaustive results**: [`Value`] is a closed sum type, consumers `match` on it
//!
//! ## Errors
//!
//! [`ExtractError::is_pattern_error`] separates broken patterns (unclosed `^`,
//! unknown tag) from paths that simply do not fit. The former is a programming
//! error in the route table; the latter is a 404/400 for the request.

pub mod cli;
pub mod extract;
pub mod logging;

pub use extract::{
    extract, DecodeFailure, Directive, DirectiveCursor, DirectiveKind, ExtractError, Match, Value,
};
