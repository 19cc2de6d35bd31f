//! Per-directive segment decoders.
//!
//! Each decoder turns one raw segment into a [`Value`] or a [`DecodeFailure`].
//! They know nothing about offsets; the extractor attaches those.

use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use chrono::{DateTime, TimeDelta, Utc};

use super::error::DecodeFailure;
use super::value::Value;

pub(crate) fn int(s: &str) -> Result<Value, DecodeFailure> {
    Ok(Value::Int(s.parse::<i64>()?))
}

pub(crate) fn string(s: &str) -> Value {
    Value::String(s.to_owned())
}

/// URL-safe alphabet with canonical padding. Non-zero bits left over in the
/// last symbol are ignored, so `TWF=` decodes the same as `TWE=`.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &base64::alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

pub(crate) fn url_base64(s: &str) -> Result<Value, DecodeFailure> {
    let bytes = URL_SAFE_LENIENT.decode(s)?;
    Ok(Value::Bytes(bytes))
}

pub(crate) fn hex_bytes(s: &str) -> Result<Value, DecodeFailure> {
    Ok(Value::Bytes(hex::decode(s)?))
}

pub(crate) fn milliseconds(s: &str) -> Result<Value, DecodeFailure> {
    let ms = s.parse::<i64>()?;
    TimeDelta::try_milliseconds(ms)
        .map(Value::Duration)
        .ok_or(DecodeFailure::OutOfRange {
            value: ms,
            target: "duration in milliseconds",
        })
}

pub(crate) fn seconds(s: &str) -> Result<Value, DecodeFailure> {
    let secs = s.parse::<i64>()?;
    TimeDelta::try_seconds(secs)
        .map(Value::Duration)
        .ok_or(DecodeFailure::OutOfRange {
            value: secs,
            target: "duration in seconds",
        })
}

/// Epoch milliseconds, split with floor division so the sub-second part is
/// never negative: `-1` is `1969-12-31T23:59:59.999Z`, not one millisecond
/// after the epoch rounded towards zero.
pub(crate) fn epoch_milliseconds(s: &str) -> Result<Value, DecodeFailure> {
    let ms = s.parse::<i64>()?;
    let secs = ms.div_euclid(1000);
    // 0..=999_000, so the nanosecond product fits u32
    let micros = ms.rem_euclid(1000) * 1000;
    let nanos = u32::try_from(micros * 1000).map_err(|_| DecodeFailure::OutOfRange {
        value: ms,
        target: "timestamp in epoch milliseconds",
    })?;
    DateTime::<Utc>::from_timestamp(secs, nanos)
        .map(Value::Timestamp)
        .ok_or(DecodeFailure::OutOfRange {
            value: ms,
            target: "timestamp in epoch milliseconds",
        })
}

pub(crate) fn epoch_seconds(s: &str) -> Result<Value, DecodeFailure> {
    let secs = s.parse::<i64>()?;
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(Value::Timestamp)
        .ok_or(DecodeFailure::OutOfRange {
            value: secs,
            target: "timestamp in epoch seconds",
        })
}

/// `expected` is the text between the `^` delimiters.
pub(crate) fn literal(s: &str, expected: &str) -> Result<Value, DecodeFailure> {
    if s == expected {
        Ok(Value::Bool(true))
    } else {
        Err(DecodeFailure::LiteralMismatch {
            expected: expected.to_owned(),
            found: s.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_int_accepts_sign_rejects_empty() {
        assert_eq!(int("+42").unwrap(), Value::Int(42));
        assert_eq!(int("-42").unwrap(), Value::Int(-42));
        assert!(matches!(int(""), Err(DecodeFailure::Int(_))));
        assert!(matches!(int("1.5"), Err(DecodeFailure::Int(_))));
        assert!(matches!(int("99999999999999999999"), Err(DecodeFailure::Int(_))));
    }

    #[test]
    fn test_base64_url_safe_alphabet() {
        // 0xfb 0xff encodes to "-_8=" in the URL-safe alphabet
        assert_eq!(url_base64("-_8=").unwrap(), Value::Bytes(vec![0xfb, 0xff]));
        assert!(matches!(url_base64("+/8="), Err(DecodeFailure::Base64(_))));
        assert!(matches!(url_base64("TWE"), Err(DecodeFailure::Base64(_))));
        assert_eq!(url_base64("").unwrap(), Value::Bytes(Vec::new()));
    }

    #[test]
    fn test_base64_ignores_trailing_bits_in_last_symbol() {
        assert_eq!(url_base64("TWF=").unwrap(), Value::Bytes(b"Ma".to_vec()));
        assert_eq!(url_base64("TWF="), url_base64("TWE="));
        assert_eq!(url_base64("TR==").unwrap(), Value::Bytes(b"M".to_vec()));
        // padding is still checked
        assert!(matches!(url_base64("TWF"), Err(DecodeFailure::Base64(_))));
        assert!(matches!(url_base64("TWE=="), Err(DecodeFailure::Base64(_))));
    }

    #[test]
    fn test_hex_rejects_odd_length_and_bad_chars() {
        assert_eq!(hex_bytes("DEADbeef").unwrap(), Value::Bytes(vec![0xde, 0xad, 0xbe, 0xef]));
        assert!(matches!(hex_bytes("abc"), Err(DecodeFailure::Hex(_))));
        assert!(matches!(hex_bytes("zz"), Err(DecodeFailure::Hex(_))));
    }

    #[test]
    fn test_durations() {
        assert_eq!(milliseconds("1000").unwrap(), Value::Duration(TimeDelta::seconds(1)));
        assert_eq!(seconds("-5").unwrap(), Value::Duration(TimeDelta::seconds(-5)));
        assert!(matches!(
            seconds(&i64::MAX.to_string()),
            Err(DecodeFailure::OutOfRange { .. })
        ));
        assert!(matches!(milliseconds(""), Err(DecodeFailure::Int(_))));
    }

    #[test]
    fn test_epoch_milliseconds_keeps_sub_second_part() {
        let expected = Utc.with_ymd_and_hms(2014, 10, 1, 14, 15, 38).unwrap()
            + TimeDelta::milliseconds(123);
        assert_eq!(
            epoch_milliseconds("1412172938123").unwrap(),
            Value::Timestamp(expected)
        );
    }

    #[test]
    fn test_epoch_milliseconds_negative_uses_floor() {
        let epoch = DateTime::<Utc>::from_timestamp(0, 0).unwrap();
        assert_eq!(
            epoch_milliseconds("-1").unwrap(),
            Value::Timestamp(epoch - TimeDelta::milliseconds(1))
        );
        assert_eq!(
            epoch_milliseconds("-1500").unwrap(),
            Value::Timestamp(epoch - TimeDelta::milliseconds(1500))
        );
        assert_eq!(
            epoch_milliseconds("-1000").unwrap(),
            Value::Timestamp(epoch - TimeDelta::seconds(1))
        );
    }

    #[test]
    fn test_epoch_seconds_out_of_range() {
        assert!(matches!(
            epoch_seconds(&i64::MAX.to_string()),
            Err(DecodeFailure::OutOfRange { .. })
        ));
        assert!(matches!(
            epoch_milliseconds(&i64::MIN.to_string()),
            Err(DecodeFailure::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_literal() {
        assert_eq!(literal("users", "users").unwrap(), Value::Bool(true));
        assert_eq!(literal("", "").unwrap(), Value::Bool(true));
        assert!(matches!(
            literal("Users", "users"),
            Err(DecodeFailure::LiteralMismatch { .. })
        ));
    }
}
