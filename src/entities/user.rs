//! User content type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::entity::{Content, Entity};
use crate::core::error::ValidationError;
use crate::core::field::{FieldFormat, FieldKind, FieldValue};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
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

    /// Display name of the user
    pub name: String,

    /// Contact email address
    pub email: String,
}

crate::impl_entity!(User, "user", "users");

impl User {
    /// Create a new active user
    pub fn new(name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            entity_type: "user".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
            status: "active".to_string(),
            name,
            email,
        }
    }
}

impl Content for User {
    fn name(&self) -> &str {
        &self.name
    }

    fn sortable_fields() -> &'static [(&'static str, FieldKind)] {
        &[
            ("name", FieldKind::String),
            ("email", FieldKind::String),
            ("created_at", FieldKind::DateTime),
            ("updated_at", FieldKind::DateTime),
        ]
    }

    fn field_value(&self, field: &str) -> Option<FieldValue> {
        match field {
            "name" => Some(self.name.clone().into()),
            "email" => Some(self.email.clone().into()),
            _ => self.base_field_value(field),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let email = FieldValue::String(self.email.clone());
        if !FieldFormat::Email.validate(&email) {
            return Err(ValidationError::InvalidField {
                field: "email".to_string(),
                message: "not a valid email address".to_string(),
            });
        }
        Ok(())
    }
}

/// Creation payload for a user
#[derive(Debug, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
}

impl From<NewUser> for User {
    fn from(payload: NewUser) -> Self {
        User::new(payload.name, payload.email)
    }
}
