//! Permission-string authorization
//!
//! Authorization is a pure reachability check: a caller may perform an
//! operation when one of their permission strings is, or transitively grants,
//! the required permission. The grant map is plain data loaded from
//! configuration; a visited set makes the walk terminate even if a
//! misconfigured map contains a cycle.

use axum::http::HeaderMap;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Static permission-to-permissions grant map
#[derive(Debug, Clone, Default)]
pub struct PermissionHierarchy {
    grants: HashMap<String, Vec<String>>,
}

impl PermissionHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(grants: HashMap<String, Vec<String>>) -> Self {
        Self { grants }
    }

    /// Declare that holding `parent` also grants every one of `children`
    pub fn grant(&mut self, parent: &str, children: &[&str]) {
        self.grants
            .entry(parent.to_string())
            .or_default()
            .extend(children.iter().map(|c| c.to_string()));
    }

    fn implies(&self, held: &str, required: &str, visited: &mut HashSet<String>) -> bool {
        if held == required {
            return true;
        }
        // Already-expanded permissions are never revisited, so a cyclic map
        // terminates instead of recursing forever.
        if !visited.insert(held.to_string()) {
            return false;
        }
        self.grants
            .get(held)
            .is_some_and(|children| {
                children
                    .iter()
                    .any(|child| self.implies(child, required, visited))
            })
    }
}

/// Check whether a caller may perform an operation.
///
/// `owner_match` short-circuits the hierarchy walk: a caller operating on
/// their own resource is always allowed.
pub fn authorize(
    user_permissions: &[String],
    required: &str,
    hierarchy: &PermissionHierarchy,
    owner_match: bool,
) -> bool {
    if owner_match {
        return true;
    }
    let mut visited = HashSet::new();
    user_permissions
        .iter()
        .any(|held| hierarchy.implies(held, required, &mut visited))
}

/// Caller identity extracted from a request
///
/// Token issuance and verification happen upstream (an API gateway); by the
/// time a request reaches this service the verified identity arrives as
/// plain headers.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Option<Uuid>,
    pub permissions: Vec<String>,
}

impl AuthContext {
    /// Context with no identity and no permissions
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            permissions: Vec::new(),
        }
    }

    /// Build a context from the gateway headers `x-user-id` and
    /// `x-permissions` (comma-separated)
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let user_id = headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok());

        let permissions = headers
            .get("x-permissions")
            .and_then(|v| v.to_str().ok())
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self {
            user_id,
            permissions,
        }
    }

    /// Check this caller against a required permission
    pub fn can(&self, required: &str, hierarchy: &PermissionHierarchy, owner_match: bool) -> bool {
        authorize(&self.permissions, required, hierarchy, owner_match)
    }
}
