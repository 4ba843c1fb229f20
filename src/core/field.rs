//! Field value types, ordering and cursor serialization

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::OnceLock;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Null,
}

/// The declared type of an orderable field
///
/// Entities expose a `(field, FieldKind)` registry so that cursor values can be
/// parsed back into their original type without guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Boolean,
    Uuid,
    DateTime,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Total order across field values.
    ///
    /// Null sorts before every non-null value, so an ascending scan lists
    /// null-valued records first and a descending scan lists them last.
    /// Values of the same variant compare naturally (floats with `total_cmp`).
    /// Mixed variants fall back to a fixed variant rank to keep the order total.
    pub fn total_order(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (String(a), String(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Boolean(a), Boolean(b)) => a.cmp(b),
            (Uuid(a), Uuid(b)) => a.cmp(b),
            (DateTime(a), DateTime(b)) => a.cmp(b),
            (a, b) => a.variant_rank().cmp(&b.variant_rank()),
        }
    }

    fn variant_rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Boolean(_) => 1,
            FieldValue::Integer(_) => 2,
            FieldValue::Float(_) => 3,
            FieldValue::String(_) => 4,
            FieldValue::Uuid(_) => 5,
            FieldValue::DateTime(_) => 6,
        }
    }

    /// Serialize this value as a cursor segment.
    ///
    /// The encoding is lossless: timestamps keep their full sub-second
    /// precision as RFC-3339 (`Z` suffix, no characters needing URL escaping),
    /// everything else uses its natural string form. Null encodes as an empty
    /// segment.
    pub fn to_cursor_segment(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => f.to_string(),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Uuid(u) => u.to_string(),
            FieldValue::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            FieldValue::Null => String::new(),
        }
    }
}

impl FieldKind {
    /// Parse a cursor segment back into a value of this kind.
    ///
    /// An empty segment decodes as null for every kind. Returns `None` when
    /// the segment does not parse, which callers surface as a malformed cursor.
    pub fn parse_segment(&self, raw: &str) -> Option<FieldValue> {
        if raw.is_empty() {
            return Some(FieldValue::Null);
        }
        match self {
            FieldKind::String => Some(FieldValue::String(raw.to_string())),
            FieldKind::Integer => raw.parse::<i64>().ok().map(FieldValue::Integer),
            FieldKind::Float => raw.parse::<f64>().ok().map(FieldValue::Float),
            FieldKind::Boolean => raw.parse::<bool>().ok().map(FieldValue::Boolean),
            FieldKind::Uuid => Uuid::parse_str(raw).ok().map(FieldValue::Uuid),
            FieldKind::DateTime => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| FieldValue::DateTime(dt.with_timezone(&Utc))),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => FieldValue::Null,
        }
    }
}

/// Field format validators for automatic validation
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a field value against this format
    pub fn validate(&self, value: &FieldValue) -> bool {
        let string_value = match value.as_string() {
            Some(s) => s,
            None => return false,
        };

        match self {
            FieldFormat::Email => Self::is_valid_email(string_value),
            FieldFormat::Custom(regex) => regex.is_match(string_value),
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
        });
        regex.is_match(email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_accessors() {
        let value = FieldValue::String("test".to_string());
        assert_eq!(value.as_string(), Some("test"));
        assert_eq!(value.as_integer(), None);
        assert!(!value.is_null());

        let value = FieldValue::Integer(42);
        assert_eq!(value.as_integer(), Some(42));
        assert_eq!(value.as_string(), None);

        assert!(FieldValue::Null.is_null());
    }

    #[test]
    fn test_null_sorts_first() {
        let null = FieldValue::Null;
        let name = FieldValue::String("algebra".to_string());
        let ts = FieldValue::DateTime(Utc::now());

        assert_eq!(null.total_order(&name), Ordering::Less);
        assert_eq!(null.total_order(&ts), Ordering::Less);
        assert_eq!(name.total_order(&null), Ordering::Greater);
        assert_eq!(null.total_order(&FieldValue::Null), Ordering::Equal);
    }

    #[test]
    fn test_total_order_same_kind() {
        let a = FieldValue::String("algebra".to_string());
        let b = FieldValue::String("biology".to_string());
        assert_eq!(a.total_order(&b), Ordering::Less);

        let x = FieldValue::Integer(3);
        let y = FieldValue::Integer(10);
        assert_eq!(y.total_order(&x), Ordering::Greater);

        let f1 = FieldValue::Float(1.5);
        let f2 = FieldValue::Float(2.5);
        assert_eq!(f1.total_order(&f2), Ordering::Less);
    }

    #[test]
    fn test_cursor_segment_roundtrip_string() {
        let original = FieldValue::String("calculus".to_string());
        let segment = original.to_cursor_segment();
        let restored = FieldKind::String.parse_segment(&segment).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_cursor_segment_roundtrip_integer() {
        let original = FieldValue::Integer(-17);
        let segment = original.to_cursor_segment();
        let restored = FieldKind::Integer.parse_segment(&segment).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_cursor_segment_roundtrip_datetime() {
        let original = FieldValue::DateTime(Utc::now());
        let segment = original.to_cursor_segment();
        let restored = FieldKind::DateTime.parse_segment(&segment).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_cursor_segment_datetime_has_no_url_hostile_chars() {
        let segment = FieldValue::DateTime(Utc::now()).to_cursor_segment();
        assert!(segment.ends_with('Z'));
        assert!(!segment.contains('+'));
        assert!(!segment.contains(' '));
    }

    #[test]
    fn test_empty_segment_is_null() {
        assert_eq!(
            FieldKind::DateTime.parse_segment(""),
            Some(FieldValue::Null)
        );
        assert_eq!(FieldKind::String.parse_segment(""), Some(FieldValue::Null));
    }

    #[test]
    fn test_unparseable_segment_is_rejected() {
        assert_eq!(FieldKind::Integer.parse_segment("not-a-number"), None);
        assert_eq!(FieldKind::DateTime.parse_segment("yesterday"), None);
        assert_eq!(FieldKind::Uuid.parse_segment("xyz"), None);
    }

    #[test]
    fn test_from_option_maps_none_to_null() {
        let some: FieldValue = Some(Utc::now()).into();
        assert!(!some.is_null());

        let none: FieldValue = Option::<DateTime<Utc>>::None.into();
        assert!(none.is_null());
    }

    #[test]
    fn test_email_validation() {
        let format = FieldFormat::Email;

        assert!(format.validate(&FieldValue::String("test@example.com".to_string())));
        assert!(!format.validate(&FieldValue::String("invalid-email".to_string())));
        assert!(!format.validate(&FieldValue::String("@example.com".to_string())));
        assert!(!format.validate(&FieldValue::Integer(42)));
    }

    #[test]
    fn test_custom_regex_validation() {
        let format = FieldFormat::Custom(Regex::new(r"^[A-Z]{3}\d{3}$").unwrap());

        assert!(format.validate(&FieldValue::String("ABC123".to_string())));
        assert!(!format.validate(&FieldValue::String("abc123".to_string())));
    }
}
