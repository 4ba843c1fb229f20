//! Exam content type
//!
//! Exams carry an optional start time: drafts have no `starts_at` yet.
//! Because `starts_at` is also a sortable field, cursors over it can hold a
//! null value — unscheduled exams sort before every scheduled one when
//! ascending.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::entity::{Content, Entity};
use crate::core::field::{FieldKind, FieldValue};
use crate::core::query::ListParams;
use crate::core::store::Filter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exam {
    /// Unique identifier for this entity
    pub id: Uuid,

    /// Type of the entity
    #[serde(rename = "type")]
    pub entity_type: String,

    /// When this entity was created
    pub created_at: DateTime<Utc>,

    /// When this entity was last updated
    pub updated_at: DateTime<Utc>,

    /// When this entity was soft-deleted (if applicable)
    pub deleted_at: Option<DateTime<Utc>>,

    /// Current status of the entity
    pub status: String,

    /// Display name of the exam
    pub name: String,

    /// Category this exam draws questions from
    pub category_id: Uuid,

    /// Scheduled start; absent while the exam is a draft
    pub starts_at: Option<DateTime<Utc>>,

    /// Time allowed, in minutes
    pub duration_minutes: i64,
}

crate::impl_entity!(Exam, "exam", "exams");

impl Exam {
    /// Create a new active exam
    pub fn new(
        name: String,
        category_id: Uuid,
        starts_at: Option<DateTime<Utc>>,
        duration_minutes: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            entity_type: "exam".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            status: "active".to_string(),
            name,
            category_id,
            starts_at,
            duration_minutes,
        }
    }
}

impl Content for Exam {
    fn name(&self) -> &str {
        &self.name
    }

    fn sortable_fields() -> &'static [(&'static str, FieldKind)] {
        &[
            ("name", FieldKind::String),
            ("starts_at", FieldKind::DateTime),
            ("created_at", FieldKind::DateTime),
            ("updated_at", FieldKind::DateTime),
        ]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(self.name.clone().into()),
            "starts_at" => Some(self.starts_at.into()),
            "category_id" => Some(self.category_id.into()),
            _ => self.base_field_value(field),
        }
    }

    /// Exams additionally filter by their category
    fn list_filter(params: &ListParams) -> Filter {
        let mut clauses = Vec::new();
        if let Some(category) = params.category {
            clauses.push(Filter::eq("category_id", category));
        }
        if let Some(status) = &params.status {
            clauses.push(Filter::eq("status", status.as_str()));
        }
        if let Some(search) = &params.search {
            clauses.push(Filter::contains("name", search));
        }
        Filter::all(clauses)
    }
}

/// Creation payload for an exam
#[derive(Debug, Deserialize)]
pub struct NewExam {
    pub name: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(default = "default_duration")]
    pub duration_minutes: i64,
}

fn default_duration() -> i64 {
    60
}

impl From<NewExam> for Exam {
    fn from(payload: NewExam) -> Self {
        Exam::new(
            payload.name,
            payload.category_id,
            payload.starts_at,
            payload.duration_minutes,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_exam_has_null_starts_at() {
        let exam = Exam::new("Midterm".to_string(), Uuid::now_v7(), None, 90);
        assert_eq!(exam.field_value("starts_at"), Some(FieldValue::Null));
    }

    #[test]
    fn test_scheduled_exam_exposes_starts_at() {
        let when = Utc::now();
        let exam = Exam::new("Final".to_string(), Uuid::now_v7(), Some(when), 120);
        assert_eq!(
            exam.field_value("starts_at"),
            Some(FieldValue::DateTime(when))
        );
    }

    #[test]
    fn test_exam_category_filter() {
        let exam = Exam::new("Quiz 1".to_string(), Uuid::now_v7(), None, 30);

        let params = ListParams {
            category: Some(exam.category_id),
            status: Some("active".to_string()),
            ..Default::default()
        };
        assert!(Exam::list_filter(&params).matches(&exam));
    }
}
