//! Question content type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::entity::{Content, Entity};
use crate::core::field::{FieldKind, FieldValue};
use crate::core::query::ListParams;
use crate::core::store::Filter;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
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

    /// Short label shown in listings
    pub name: String,

    /// Category this question belongs to
    pub category_id: Uuid,

    /// The question text presented to the candidate
    pub prompt: String,

    /// Points awarded for a correct answer
    pub points: i64,
}

crate::impl_entity!(Question, "question", "questions");

impl Question {
    /// Create a new active question
    pub fn new(name: String, category_id: Uuid, prompt: String, points: i64) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            entity_type: "question".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            status: "active".to_string(),
            name,
            category_id,
            prompt,
            points,
        }
    }
}

impl Content for Question {
    fn name(&self) -> &str {
        &self.name
    }

    fn sortable_fields() -> &'static [(&'static str, FieldKind)] {
        &[
            ("name", FieldKind::String),
            ("points", FieldKind::Integer),
            ("created_at", FieldKind::DateTime),
            ("updated_at", FieldKind::DateTime),
        ]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(self.name.clone().into()),
            "points" => Some(self.points.into()),
            "category_id" => Some(self.category_id.into()),
            _ => self.base_field_value(field),
        }
    }

    /// Questions additionally filter by their category
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

/// Creation payload for a question
#[derive(Debug, Deserialize)]
pub struct NewQuestion {
    pub name: String,
    pub category_id: Uuid,
    pub prompt: String,
    #[serde(default = "default_points")]
    pub points: i64,
}

fn default_points() -> i64 {
    1
}

impl From<NewQuestion> for Question {
    fn from(payload: NewQuestion) -> Self {
        Question::new(
            payload.name,
            payload.category_id,
            payload.prompt,
            payload.points,
        )
    }
}
