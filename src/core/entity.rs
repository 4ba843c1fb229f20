//! Entity traits defining the core abstraction for all content types

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::core::error::ValidationError;
use crate::core::field::{FieldKind, FieldValue};
use crate::core::query::ListParams;
use crate::core::store::Filter;

/// Base trait for all persisted records in the system.
///
/// All entities have:
/// - id: Unique identifier (UUIDv7, so ids are time-encoded and insertion
///   order is recoverable from id ordering)
/// - type: Entity type name (e.g., "question", "exam")
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
/// - deleted_at: Soft deletion timestamp (optional)
/// - status: Current status of the entity
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "questions", "categories")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "question", "category")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the entity type name
    fn entity_type(&self) -> &str;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the deletion timestamp (soft delete)
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    /// Get the entity status
    fn status(&self) -> &str;

    /// Stamp `deleted_at`, removing the entity from every listing
    fn mark_deleted(&mut self);

    /// Bump `updated_at`
    fn touch(&mut self);

    /// Check if the entity has been soft-deleted
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }

    /// Check if the entity is active (status == "active" and not deleted)
    fn is_active(&self) -> bool {
        self.status() == "active" && !self.is_deleted()
    }

    /// Value of one of the base fields shared by every entity.
    ///
    /// Content implementations fall back to this after matching their own
    /// fields, so filters over `id`, `status` or the timestamps work for any
    /// entity type.
    fn base_field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "id" => Some(FieldValue::Uuid(self.id())),
            "status" => Some(FieldValue::String(self.status().to_string())),
            "created_at" => Some(FieldValue::DateTime(self.created_at())),
            "updated_at" => Some(FieldValue::DateTime(self.updated_at())),
            "deleted_at" => Some(self.deleted_at().into()),
            _ => None,
        }
    }
}

/// Trait for content entities that can be listed with cursor pagination.
///
/// Content entities extend the base Entity with:
/// - name: A human-readable name
/// - sortable_fields: The typed registry of fields pagination may order by
/// - field_value: Dynamic field access used by filters and cursor encoding
/// - list_filter: Translation of caller list parameters into a base filter
pub trait Content: Entity {
    /// Get the name of this content entity
    fn name(&self) -> &str;

    /// Fields that pagination may order by, with their declared types.
    ///
    /// `id` is always accepted and does not appear here. This registry is both
    /// the engine's type table for decoding cursor values and its defensive
    /// guard against cursor fields that slipped past request validation.
    fn sortable_fields() -> &'static [(&'static str, FieldKind)];

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Look up the declared kind of a cursor field. `id` is always valid.
    fn cursor_field_kind(field: &str) -> Option<FieldKind> {
        if field == "id" {
            return Some(FieldKind::Uuid);
        }
        Self::sortable_fields()
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)
    }

    /// Validate field formats before persisting. The default accepts
    /// everything; entities with formatted fields override.
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Build the base filter for a list request.
    ///
    /// The default supports status equality and name search; entities with
    /// more filterable fields (e.g. a category reference) override this.
    fn list_filter(params: &ListParams) -> Filter {
        let mut clauses = Vec::new();
        if let Some(status) = &params.status {
            clauses.push(Filter::eq("status", status.as_str()));
        }
        if let Some(search) = &params.search {
            clauses.push(Filter::contains("name", search));
        }
        Filter::all(clauses)
    }
}
