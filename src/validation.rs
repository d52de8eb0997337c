//! Input classification for request bodies and path parameters.
//!
//! Everything here is total: wrong-typed or malformed input is classified,
//! never rejected with a panic.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

pub const FIELDS_INVALID: &str = "fields not filled correctly";
pub const PASSWORD_FORMAT: &str =
    "password must be 8-16 characters and contain a digit, a lowercase and an uppercase letter";
pub const DUPLICATE: &str = "duplicate data";
pub const INVALID_ID: &str = "invalid id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invalid {
    Absent,
    NotAString,
    NotANonNegativeInteger,
}

/// Not a JSON string, or blank after trimming.
pub fn is_not_valid_string(value: &Value) -> bool {
    match value {
        Value::String(s) => s.trim().is_empty(),
        _ => true,
    }
}

/// Not a JSON number, not whole, or negative.
pub fn is_not_valid_integer(value: &Value) -> bool {
    as_non_negative_integer(value).is_none()
}

fn as_non_negative_integer(value: &Value) -> Option<i64> {
    let Value::Number(n) = value else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return (i >= 0).then_some(i);
    }
    if n.is_u64() {
        // Above i64::MAX: whole and positive, but not storable.
        return None;
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

pub fn valid_string(value: Option<&Value>) -> Result<&str, Invalid> {
    let value = value.ok_or(Invalid::Absent)?;
    if is_not_valid_string(value) {
        return Err(Invalid::NotAString);
    }
    value.as_str().ok_or(Invalid::NotAString)
}

pub fn valid_non_negative_integer(value: Option<&Value>) -> Result<i64, Invalid> {
    let value = value.ok_or(Invalid::Absent)?;
    as_non_negative_integer(value).ok_or(Invalid::NotANonNegativeInteger)
}

/// Optional string field: absent or `null` is `Ok(None)`, anything else must be a valid string.
pub fn optional_string(value: Option<&Value>) -> Result<Option<&str>, Invalid> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => valid_string(Some(v)).map(Some),
    }
}

lazy_static! {
    static ref DIGIT_RE: Regex = Regex::new(r"[0-9]").unwrap();
    static ref LOWER_RE: Regex = Regex::new(r"[a-z]").unwrap();
    static ref UPPER_RE: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref URL_RE: Regex = Regex::new(r"^https?://[^\s/$.?#][^\s]*$").unwrap();
}

const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Equivalent of the unanchored `(?=.*\d)(?=.*[a-z])(?=.*[A-Z]).{8,16}`.
///
/// Some line must hold a digit, a lowercase and an uppercase letter and be at
/// least 8 UTF-16 code units long. There is no upper bound: a window of 16
/// always fits inside a longer line.
pub fn is_valid_password(password: &str) -> bool {
    password.split(LINE_TERMINATORS).any(|line| {
        line.encode_utf16().count() >= 8
            && DIGIT_RE.is_match(line)
            && LOWER_RE.is_match(line)
            && UPPER_RE.is_match(line)
    })
}

pub fn is_valid_url(url: &str) -> bool {
    URL_RE.is_match(url)
}

/// Path ids must be non-blank UUIDs.
pub fn parse_id(raw: &str) -> Option<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Uuid::parse_str(raw).ok()
}

pub fn parse_id_value(value: Option<&Value>) -> Option<Uuid> {
    valid_string(value).ok().and_then(parse_id)
}

pub fn parse_timestamp(value: Option<&Value>) -> Option<OffsetDateTime> {
    let raw = valid_string(value).ok()?;
    OffsetDateTime::parse(raw.trim(), &Rfc3339).ok()
}
