//! Store contract consumed by the pagination engine
//!
//! Filters are plain values composed with `And`/`Or`. They are built fresh for
//! every query — the engine never mutates a filter it has already handed out,
//! so the primary fetch and the existence probes cannot contaminate each other.

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::entity::Content;
use crate::core::error::StorageError;
use crate::core::field::FieldValue;
use crate::core::query::SortDirection;

/// Comparison operator for range predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Gt,
}

/// An immutable filter expression over entity fields
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value (null equals null)
    Eq(String, FieldValue),

    /// Field compares against value with `<` or `>`
    Cmp(String, CmpOp, FieldValue),

    /// String field contains a substring (case-insensitive)
    Contains(String, String),

    /// Field value is null
    IsNull(String),

    /// Every clause matches (empty matches everything)
    And(Vec<Filter>),

    /// At least one clause matches (empty matches nothing)
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<FieldValue>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    pub fn cmp(field: &str, op: CmpOp, value: impl Into<FieldValue>) -> Self {
        Filter::Cmp(field.to_string(), op, value.into())
    }

    pub fn contains(field: &str, needle: &str) -> Self {
        Filter::Contains(field.to_string(), needle.to_string())
    }

    pub fn is_null(field: &str) -> Self {
        Filter::IsNull(field.to_string())
    }

    /// Conjunction of clauses; a single clause collapses to itself
    pub fn all(clauses: Vec<Filter>) -> Self {
        match clauses.len() {
            1 => clauses.into_iter().next().unwrap(),
            _ => Filter::And(clauses),
        }
    }

    /// Disjunction of clauses; a single clause collapses to itself
    pub fn any(clauses: Vec<Filter>) -> Self {
        match clauses.len() {
            1 => clauses.into_iter().next().unwrap(),
            _ => Filter::Or(clauses),
        }
    }

    /// Evaluate this filter against an entity.
    ///
    /// A predicate on a field the entity does not expose matches nothing.
    /// Comparisons use the field-value total order, so null sorts below every
    /// non-null value here exactly as it does in a sorted scan.
    pub fn matches<T: Content>(&self, entity: &T) -> bool {
        match self {
            Filter::Eq(field, value) => match entity.field_value(field) {
                Some(actual) => actual.total_order(value).is_eq(),
                None => false,
            },
            Filter::Cmp(field, op, value) => match entity.field_value(field) {
                Some(actual) => {
                    let ord = actual.total_order(value);
                    match op {
                        CmpOp::Lt => ord.is_lt(),
                        CmpOp::Gt => ord.is_gt(),
                    }
                }
                None => false,
            },
            Filter::Contains(field, needle) => match entity.field_value(field) {
                Some(FieldValue::String(s)) => {
                    s.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
            Filter::IsNull(field) => {
                matches!(entity.field_value(field), Some(FieldValue::Null))
            }
            Filter::And(clauses) => clauses.iter().all(|c| c.matches(entity)),
            Filter::Or(clauses) => clauses.iter().any(|c| c.matches(entity)),
        }
    }
}

/// One key of a compound sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: &str, direction: SortDirection) -> Self {
        Self {
            field: field.to_string(),
            direction,
        }
    }
}

/// Ordered, bounded read access over a collection of entities.
///
/// This is the only store surface the pagination engine consumes. Both
/// methods are single round trips; errors pass through to the caller
/// unchanged, and cancellation is whatever the backing store provides.
#[async_trait]
pub trait OrderedStore<T: Content>: Send + Sync {
    /// Return up to `limit` records matching `filter`, ordered by `sort`
    async fn find(
        &self,
        filter: &Filter,
        sort: &[SortKey],
        limit: usize,
    ) -> Result<Vec<T>, StorageError>;

    /// Existence probe: any one record matching `filter`, or none
    async fn find_one(&self, filter: &Filter) -> Result<Option<T>, StorageError>;
}

/// Full CRUD surface for a content collection.
///
/// Deletion is always soft: `soft_delete` stamps `deleted_at` and the record
/// stops appearing in reads that exclude deleted rows.
#[async_trait]
pub trait ContentStore<T: Content>: OrderedStore<T> {
    /// Persist a new entity
    async fn insert(&self, entity: T) -> Result<T, StorageError>;

    /// Fetch an entity by id, deleted or not
    async fn get(&self, id: &Uuid) -> Result<Option<T>, StorageError>;

    /// Replace an existing entity
    async fn update(&self, id: &Uuid, entity: T) -> Result<T, StorageError>;

    /// Stamp `deleted_at` on an entity
    async fn soft_delete(&self, id: &Uuid) -> Result<(), StorageError>;
}
