//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::auth::PermissionHierarchy;

/// Paging defaults applied by the listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagingConfig {
    /// Page size used when a request does not specify one
    #[serde(default = "default_page_size")]
    pub default_size: usize,

    /// Hard upper bound on requested page sizes
    #[serde(default = "default_max_size")]
    pub max_size: usize,
}

fn default_page_size() -> usize {
    10
}

fn default_max_size() -> usize {
    50
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_size: default_page_size(),
            max_size: default_max_size(),
        }
    }
}

/// Permission hierarchy and per-operation requirements
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// Permission -> permissions it transitively grants
    #[serde(default)]
    pub hierarchy: HashMap<String, Vec<String>>,

    /// Operation name -> required permission (operations without an entry
    /// are public)
    #[serde(default)]
    pub required: HashMap<String, String>,
}

/// Complete configuration for the API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub paging: PagingConfig,

    /// Resource (plural name) -> cursor-field allow-list.
    ///
    /// Resources without an entry fall back to every field the entity
    /// declares sortable; an entry restricts that set.
    #[serde(default)]
    pub cursor_fields: HashMap<String, Vec<String>>,

    #[serde(default)]
    pub permissions: PermissionsConfig,
}

impl ApiConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Configured cursor-field allow-list for a resource, if any
    pub fn allowed_cursor_fields(&self, resource: &str) -> Option<&Vec<String>> {
        self.cursor_fields.get(resource)
    }

    /// Build the permission hierarchy from configuration
    pub fn hierarchy(&self) -> PermissionHierarchy {
        PermissionHierarchy::from_map(self.permissions.hierarchy.clone())
    }

    /// Permission required for an operation, if the operation is protected
    pub fn required_permission(&self, operation: &str) -> Option<&str> {
        self.permissions.required.get(operation).map(String::as_str)
    }

    /// Create a default configuration for testing and development
    pub fn default_config() -> Self {
        let mut hierarchy = HashMap::new();
        hierarchy.insert(
            "admin".to_string(),
            vec!["content:manage".to_string()],
        );
        hierarchy.insert(
            "content:manage".to_string(),
            vec!["content:read".to_string(), "content:write".to_string()],
        );

        let mut required = HashMap::new();
        required.insert("create".to_string(), "content:write".to_string());
        required.insert("delete".to_string(), "content:write".to_string());

        Self {
            paging: PagingConfig::default(),
            cursor_fields: HashMap::new(),
            permissions: PermissionsConfig {
                hierarchy,
                required,
            },
        }
    }
}
