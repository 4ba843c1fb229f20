//! Request and response shapes for cursor-paginated listings

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::error::ValidationError;

/// Smallest accepted page size
pub const MIN_PAGE_SIZE: usize = 1;
/// Largest accepted page size
pub const MAX_PAGE_SIZE: usize = 50;
/// Page size used when the request does not specify one
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Sort direction for ordered scans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Pagination parameters extracted from a listing request
///
/// All parameters have defaults, so a bare `GET /questions` lists the newest
/// page. When both cursors are present, `prevCursor` takes precedence.
///
/// # Example
/// ```text
/// GET /questions?cursor=name&size=20&order=asc
/// GET /questions?cursor=name&size=20&order=asc&nextCursor=<opaque>
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageRequest {
    /// Field the listing is ordered by; `id` is always valid
    #[serde(rename = "cursor")]
    pub cursor_field: String,

    /// Number of items per page
    pub size: usize,

    /// Display order of the listing
    pub order: SortDirection,

    /// Cursor returned as `nextCursor` by a previous page
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<String>,

    /// Cursor returned as `prevCursor` by a previous page
    #[serde(rename = "prevCursor")]
    pub prev_cursor: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            cursor_field: "id".to_string(),
            size: DEFAULT_PAGE_SIZE,
            order: SortDirection::Desc,
            next_cursor: None,
            prev_cursor: None,
        }
    }
}

impl PageRequest {
    /// Get the page size, bounded to the accepted range
    pub fn size(&self) -> usize {
        self.size.clamp(MIN_PAGE_SIZE, MAX_PAGE_SIZE)
    }

    /// Upstream request validation.
    ///
    /// Handlers run this before handing the request to the engine: the cursor
    /// field must be `id` or on the resource's allow-list, and the raw size
    /// must be in range. The engine itself trusts a validated request.
    pub fn validate(&self, allowed_fields: &[String]) -> Result<(), ValidationError> {
        if self.cursor_field != "id"
            && !allowed_fields.iter().any(|f| f == &self.cursor_field)
        {
            return Err(ValidationError::UnknownCursorField {
                field: self.cursor_field.clone(),
            });
        }
        if self.size < MIN_PAGE_SIZE || self.size > MAX_PAGE_SIZE {
            return Err(ValidationError::PageSizeOutOfRange { size: self.size });
        }
        Ok(())
    }
}

/// Caller-side filtering inputs for a listing request
///
/// These never reach the pagination engine directly; the handler translates
/// them into the base filter via `Content::list_filter`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListParams {
    /// Case-insensitive name search
    pub search: Option<String>,

    /// Exact status match
    pub status: Option<String>,

    /// Category the content belongs to
    pub category: Option<Uuid>,
}

/// One page of records plus navigation metadata
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Navigation state for a page
///
/// An absent `nextCursor`/`prevCursor` means there is no further page in that
/// direction. The URLs are relative query strings the caller mounts onto its
/// own resource path.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Field the listing is ordered by
    pub cursor: String,

    /// Page size used for this page
    pub size: usize,

    /// Display order of the listing
    pub order: SortDirection,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_cursor: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev_url: Option<String>,
}

impl PageMeta {
    /// Metadata with no navigation in either direction
    pub fn new(cursor_field: &str, size: usize, order: SortDirection) -> Self {
        Self {
            cursor: cursor_field.to_string(),
            size,
            order,
            next_cursor: None,
            next_url: None,
            prev_cursor: None,
            prev_url: None,
        }
    }

    fn base_query(&self) -> String {
        format!(
            "?cursor={}&size={}&order={}",
            self.cursor,
            self.size,
            self.order.as_str()
        )
    }

    /// Record that a following page exists, reachable through `cursor`
    pub fn set_next(&mut self, cursor: String) {
        self.next_url = Some(format!("{}&nextCursor={}", self.base_query(), cursor));
        self.next_cursor = Some(cursor);
    }

    /// Record that a preceding page exists, reachable through `cursor`
    pub fn set_prev(&mut self, cursor: String) {
        self.prev_url = Some(format!("{}&prevCursor={}", self.base_query(), cursor));
        self.prev_cursor = Some(cursor);
    }
}
