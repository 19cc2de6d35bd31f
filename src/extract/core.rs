//! Extractor core - runs once per request on the routing hot path.
//!
//! One pass over the path segments in lockstep with a [`DirectiveCursor`].
//! Nothing is cached between calls: every call re-reads the pattern.

use tracing::{debug, trace};

use super::decode;
use super::directive::{Directive, DirectiveCursor};
use super::error::ExtractError;
use super::value::{Match, Value};

/// Extract positional values from a URL path (no host or query parts).
///
/// `pattern` holds one directive per path segment:
///
/// | Tag | Value |
/// |---|---|
/// | `X` | [`Value::Absent`], segment ignored |
/// | `^text^` | [`Value::Bool`] `true` if the segment is exactly `text` |
/// | `I` | [`Value::Int`] |
/// | `S` | [`Value::String`] |
/// | `B` | [`Value::Bytes`] from URL-safe base64 |
/// | `H` | [`Value::Bytes`] from hex |
/// | `d` | [`Value::Duration`] from milliseconds |
/// | `D` | [`Value::Duration`] from seconds |
/// | `e` | [`Value::Timestamp`] from epoch milliseconds |
/// | `E` | [`Value::Timestamp`] from epoch seconds |
/// | `P` | [`Value::String`] holding this and every remaining segment |
///
/// One leading and one trailing `/` are stripped before splitting. A stripped
/// trailing slash is put back on the end of a `P` capture. `P` ends extraction,
/// so it only makes sense as the last directive. There are no optional
/// segments: a path with more segments than the pattern has directives fails.
///
/// # Errors
///
/// Returns an [`ExtractError`] describing the first segment or directive that
/// failed. No partial match is returned.
///
/// # Example
///
/// ```
/// use pathextract::{extract, Value};
///
/// let m = extract("/users/42/files/a/b.txt", "^users^I^files^P")?;
/// assert_eq!(m[1], Value::Int(42));
/// assert_eq!(m[3].as_str(), Some("a/b.txt"));
/// # Ok::<(), pathextract::ExtractError>(())
/// ```
pub fn extract(path: &str, pattern: &str) -> Result<Match, ExtractError> {
    let result = extract_segments(path, pattern);

    match &result {
        Ok(matched) => debug!(
            path = %path,
            pattern = %pattern,
            values = matched.len(),
            "Path extracted"
        ),
        Err(err) => debug!(
            path = %path,
            pattern = %pattern,
            offset = err.offset(),
            error = %err,
            "Path did not match pattern"
        ),
    }

    result
}

fn extract_segments(path: &str, pattern: &str) -> Result<Match, ExtractError> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let (path, trailing_slash) = match path.strip_suffix('/') {
        Some(stripped) => (stripped, true),
        None => (path, false),
    };

    let mut cursor = DirectiveCursor::new(pattern);
    let mut matched = Match::with_capacity(path.split('/').count());
    // Byte offset of the current segment within the normalized path
    let mut segment_start = 0;

    for segment in path.split('/') {
        let exhausted_at = cursor.offset();
        let Some((offset, directive)) = cursor.next_directive()? else {
            return Err(ExtractError::PatternExhausted {
                offset: exhausted_at,
            });
        };

        let decoded = match directive {
            Directive::Ignore => Ok(Value::Absent),
            Directive::Literal(expected) => decode::literal(segment, expected),
            Directive::Int => decode::int(segment),
            Directive::String => Ok(decode::string(segment)),
            Directive::Base64 => decode::url_base64(segment),
            Directive::Hex => decode::hex_bytes(segment),
            Directive::Milliseconds => decode::milliseconds(segment),
            Directive::Seconds => decode::seconds(segment),
            Directive::EpochMilliseconds => decode::epoch_milliseconds(segment),
            Directive::EpochSeconds => decode::epoch_seconds(segment),
            Directive::PathTail => {
                let tail = path.get(segment_start..).unwrap_or_default();
                let mut captured = String::with_capacity(tail.len() + 1);
                captured.push_str(tail);
                if trailing_slash {
                    captured.push('/');
                }
                matched.push(Value::String(captured));
                return Ok(matched);
            }
        };

        let value = decoded.map_err(|source| ExtractError::Decode {
            kind: directive.kind(),
            offset,
            source,
        })?;
        trace!(
            segment = %segment,
            directive = %directive.kind(),
            offset,
            value = value.kind_name(),
            "Decoded segment"
        );
        matched.push(value);
        segment_start += segment.len() + 1;
    }

    Ok(matched)
}
