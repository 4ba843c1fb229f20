//! Compound cursor encoding and decoding
//!
//! A cursor names a record's position in a sort order. Paginating by `id` the
//! cursor is the id itself; paginating by any other field it carries the
//! record's id and that field's value, so ties on the field can be broken by
//! id when rebuilding the scan filter.

use uuid::Uuid;

use crate::core::entity::Content;
use crate::core::error::PaginationError;
use crate::core::field::{FieldKind, FieldValue};

/// A decoded position in a sorted listing
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor {
    /// Id of the record the cursor points at
    pub id: Uuid,

    /// Value of the secondary sort field; absent when paginating by `id`
    pub secondary: Option<FieldValue>,
}

impl Cursor {
    /// Anchor a cursor on a record for the given cursor field
    pub fn for_record<T: Content>(record: &T, cursor_field: &str) -> Result<Self, PaginationError> {
        if cursor_field == "id" {
            return Ok(Self {
                id: record.id(),
                secondary: None,
            });
        }
        let value = record.field_value(cursor_field).ok_or_else(|| {
            PaginationError::UnsupportedCursorField {
                field: cursor_field.to_string(),
            }
        })?;
        Ok(Self {
            id: record.id(),
            secondary: Some(value),
        })
    }

    /// Encode as the wire string: the id alone, or `{id}_{value}`
    pub fn encode(&self) -> String {
        match &self.secondary {
            None => self.id.to_string(),
            Some(value) => format!("{}_{}", self.id, value.to_cursor_segment()),
        }
    }

    /// Decode a wire cursor for the given field.
    ///
    /// Compound cursors split on the last underscore. The id segment must be
    /// a valid UUID (UUIDs never contain underscores, so a secondary value
    /// with an underscore cannot silently shift the split point: the id
    /// segment stops parsing and the cursor is rejected instead).
    pub fn decode(raw: &str, cursor_field: &str, kind: FieldKind) -> Result<Self, PaginationError> {
        if cursor_field == "id" {
            let id = Uuid::parse_str(raw)
                .map_err(|_| Self::malformed(raw, "id segment is not a valid UUID"))?;
            return Ok(Self {
                id,
                secondary: None,
            });
        }

        let (id_segment, value_segment) = raw
            .rsplit_once('_')
            .ok_or_else(|| Self::malformed(raw, "expected an id and a field value separated by '_'"))?;

        let id = Uuid::parse_str(id_segment)
            .map_err(|_| Self::malformed(raw, "id segment is not a valid UUID"))?;

        let value = kind
            .parse_segment(value_segment)
            .ok_or_else(|| Self::malformed(raw, "field value segment does not parse"))?;

        Ok(Self {
            id,
            secondary: Some(value),
        })
    }

    fn malformed(cursor: &str, reason: &str) -> PaginationError {
        PaginationError::MalformedCursor {
            cursor: cursor.to_string(),
            reason: reason.to_string(),
        }
    }
}
