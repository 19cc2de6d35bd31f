//! # Extract Module
//!
//! Positional, typed value extraction from URL path segments.
//!
//! ## Overview
//!
//! A route layer that has already picked a pattern for a request hands the raw
//! path and that pattern to [`extract`]. The path is split on `/` and each
//! segment is decoded by the directive at the same position in the pattern:
//!
//! ```text
//! path:     /ignore/literal/123/string/TWFu/deadbeef01/1000/1/1412172938000/1412172938/path/to/resource/
//! pattern:   X      ^literal^ I  S      B    H          d    D e             E          P
//! ```
//!
//! ## Architecture
//!
//! - [`DirectiveCursor`] reads the pattern, tracking the byte offset used in errors
//! - the decoders turn one segment into one [`Value`]
//! - [`extract`] walks segments and directives together and stops at `P`
//!
//! The extractor is a pure function. It holds no state between calls and is safe
//! to call from any number of threads at once.

mod core;
mod decode;
mod directive;
mod error;
mod value;

pub use self::core::extract;
pub use directive::{Directive, DirectiveCursor, DirectiveKind};
pub use error::{DecodeFailure, ExtractError};
pub use value::{Match, Value, MAX_INLINE_VALUES};
