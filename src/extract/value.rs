use std::ops::Deref;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Serialize, Serializer};
use smallvec::SmallVec;

/// Number of values stored inline before a [`Match`] spills to the heap.
/// Route paths rarely go deeper than this.
pub const MAX_INLINE_VALUES: usize = 8;

/// A single decoded path segment.
///
/// One variant per result type a directive can produce. Consumers match on it
/// exhaustively or use the `as_*` accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Produced by `X`: the segment was skipped
    Absent,
    /// Produced by a `^literal^` that matched (always `true`)
    Bool(bool),
    /// Produced by `I`
    Int(i64),
    /// Produced by `S` and `P`
    String(String),
    /// Produced by `B` and `H`
    Bytes(Vec<u8>),
    /// Produced by `d` and `D`; may be negative
    Duration(TimeDelta),
    /// Produced by `e` and `E`, always UTC
    Timestamp(DateTime<Utc>),
}

impl Value {
    /// Name of the variant, for diagnostics
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Duration(_) => "duration",
            Value::Timestamp(_) => "timestamp",
        }
    }

    #[inline]
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_duration(&self) -> Option<TimeDelta> {
        match self {
            Value::Duration(d) => Some(*d),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }
}

/// JSON shape: absent is `null`, bytes are lowercase hex, durations are integer
/// milliseconds and timestamps are RFC 3339 with a `Z` suffix.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Absent => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_str(&hex::encode(b)),
            Value::Duration(d) => serializer.serialize_i64(d.num_milliseconds()),
            Value::Timestamp(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

/// Ordered values extracted from one path, one per consumed segment.
///
/// Stack-allocated for paths of up to [`MAX_INLINE_VALUES`] segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Match {
    values: SmallVec<[Value; MAX_INLINE_VALUES]>,
}

impl Match {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            values: SmallVec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Value> {
        self.values.into_vec()
    }

    /// Render as a JSON array (see [`Value`] for the per-variant shape)
    ///
    /// # Errors
    ///
    /// Propagates any error from the `serde_json` serializer.
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

impl Deref for Match {
    type Target = [Value];

    fn deref(&self) -> &Self::Target {
        &self.values
    }
}

impl IntoIterator for Match {
    type Item = Value;
    type IntoIter = smallvec::IntoIter<[Value; MAX_INLINE_VALUES]>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a Match {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_accessors_only_match_their_variant() {
        let v = Value::Int(7);
        assert_eq!(v.as_int(), Some(7));
        assert_eq!(v.as_str(), None);
        assert!(!v.is_absent());
        assert!(Value::Absent.is_absent());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Bytes(vec![1, 2]).as_bytes(), Some(&[1u8, 2][..]));
    }

    #[test]
    fn test_kind_name_per_variant() {
        let names: Vec<&str> = [
            Value::Absent,
            Value::Bool(true),
            Value::Int(1),
            Value::String(String::new()),
            Value::Bytes(Vec::new()),
            Value::Duration(TimeDelta::zero()),
            Value::Timestamp(DateTime::from_timestamp(0, 0).unwrap()),
        ]
        .iter()
        .map(Value::kind_name)
        .collect();
        assert_eq!(
            names,
            ["absent", "bool", "int", "string", "bytes", "duration", "timestamp"]
        );
    }

    #[test]
    fn test_json_shape() {
        let mut m = Match::default();
        m.push(Value::Absent);
        m.push(Value::Bool(true));
        m.push(Value::Int(-3));
        m.push(Value::String("a/b".into()));
        m.push(Value::Bytes(vec![0xde, 0xad]));
        m.push(Value::Duration(TimeDelta::seconds(2)));
        m.push(Value::Timestamp(
            DateTime::from_timestamp(1_412_172_938, 5_000_000).unwrap(),
        ));
        assert_eq!(
            m.to_json().unwrap(),
            json!([
                null,
                true,
                -3,
                "a/b",
                "dead",
                2000,
                "2014-10-01T14:15:38.005Z"
            ])
        );
        assert_eq!(
            serde_json::to_string(&m).unwrap(),
            m.to_json().unwrap().to_string()
        );
    }

    #[test]
    fn test_match_spills_past_inline_capacity() {
        let mut m = Match::with_capacity(2);
        for i in 0..(MAX_INLINE_VALUES as i64 + 3) {
            m.push(Value::Int(i));
        }
        assert_eq!(m.len(), MAX_INLINE_VALUES + 3);
        assert_eq!(m[10].as_int(), Some(10));
        let collected: Vec<i64> = m.into_iter().filter_map(|v| v.as_int()).collect();
        assert_eq!(collected.len(), MAX_INLINE_VALUES + 3);
    }
}
