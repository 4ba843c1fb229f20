//! Category content type
//!
//! Categories group questions and exams. They are the smallest content type
//! and use the default list filter (status + name search).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::entity::{Content, Entity};
use crate::core::field::{FieldKind, FieldValue};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
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

    /// Display name of the category
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,
}

crate::impl_entity!(Category, "category", "categories");

impl Category {
    /// Create a new active category
    pub fn new(name: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            entity_type: "category".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            status: "active".to_string(),
            name,
            description,
        }
    }
}

impl Content for Category {
    fn name(&self) -> &str {
        &self.name
    }

    fn sortable_fields() -> &'static [(&'static str, FieldKind)] {
        &[
            ("name", FieldKind::String),
            ("created_at", FieldKind::DateTime),
            ("updated_at", FieldKind::DateTime),
        ]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(self.name.clone().into()),
            _ => self.base_field_value(field),
        }
    }
}

/// Creation payload for a category
#[derive(Debug, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<NewCategory> for Category {
    fn from(payload: NewCategory) -> Self {
        Category::new(payload.name, payload.description)
    }
}
