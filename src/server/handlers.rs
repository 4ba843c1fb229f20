//! HTTP handlers for content operations
//!
//! The handlers are generic over the content type: every resource gets the
//! same four operations, parameterized by its entity and creation payload.
//! Listing is cursor-paginated and is the only non-trivial handler; the rest
//! is thin plumbing between JSON and the store.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::core::auth::{AuthContext, PermissionHierarchy};
use crate::core::entity::Content;
use crate::core::error::{ApiError, AuthError, EntityError};
use crate::core::paginate::paginate;
use crate::core::query::{ListParams, Page, PageRequest, SortDirection};
use crate::core::store::ContentStore;

/// Per-resource handler state
pub struct ContentState<T: Content> {
    pub store: Arc<dyn ContentStore<T>>,
    pub config: Arc<ApiConfig>,
    pub hierarchy: Arc<PermissionHierarchy>,
}

impl<T: Content> Clone for ContentState<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
            hierarchy: self.hierarchy.clone(),
        }
    }
}

/// Query parameters accepted by listing endpoints.
///
/// Kept flat (no nested extraction) so the query-string deserializer stays
/// simple; the handler splits it into pagination and filtering halves.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    /// Field the listing is ordered by
    pub cursor: Option<String>,
    pub size: Option<usize>,
    pub order: Option<SortDirection>,
    #[serde(rename = "nextCursor")]
    pub next_cursor: Option<String>,
    #[serde(rename = "prevCursor")]
    pub prev_cursor: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<Uuid>,
}

impl ListQuery {
    fn page_request(&self, config: &ApiConfig) -> PageRequest {
        PageRequest {
            cursor_field: self.cursor.clone().unwrap_or_else(|| "id".to_string()),
            size: self
                .size
                .unwrap_or(config.paging.default_size)
                .min(config.paging.max_size),
            order: self.order.unwrap_or_default(),
            next_cursor: self.next_cursor.clone(),
            prev_cursor: self.prev_cursor.clone(),
        }
    }

    fn list_params(&self) -> ListParams {
        ListParams {
            search: self.search.clone(),
            status: self.status.clone(),
            category: self.category,
        }
    }
}

/// Cursor fields a request may order this resource by: the configured
/// allow-list when one exists, otherwise everything the entity declares
fn allowed_cursor_fields<T: Content>(config: &ApiConfig) -> Vec<String> {
    match config.allowed_cursor_fields(T::resource_name()) {
        Some(fields) => fields.clone(),
        None => T::sortable_fields()
            .iter()
            .map(|(name, _)| name.to_string())
            .collect(),
    }
}

/// Reject the request unless the caller holds the permission configured for
/// `operation`. Operations without a configured permission are public.
fn require<T: Content>(
    state: &ContentState<T>,
    headers: &HeaderMap,
    operation: &str,
    owner_match: bool,
) -> Result<(), ApiError> {
    let Some(required) = state.config.required_permission(operation) else {
        return Ok(());
    };
    let context = AuthContext::from_headers(headers);
    if context.can(required, &state.hierarchy, owner_match) {
        return Ok(());
    }
    Err(AuthError::Forbidden {
        required: required.to_string(),
    }
    .into())
}

/// List a resource with cursor pagination
///
/// GET /{resource}?cursor=name&size=20&order=asc&nextCursor=...
pub async fn list_content<T>(
    State(state): State<ContentState<T>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<T>>, ApiError>
where
    T: Content + Serialize,
{
    let request = query.page_request(&state.config);
    request.validate(&allowed_cursor_fields::<T>(&state.config))?;

    let base = T::list_filter(&query.list_params());
    let page = paginate(state.store.as_ref(), &base, &request, true).await?;

    Ok(Json(page))
}

/// Get a single record by id
///
/// GET /{resource}/{id}
pub async fn get_content<T>(
    State(state): State<ContentState<T>>,
    Path(id): Path<Uuid>,
) -> Result<Json<T>, ApiError>
where
    T: Content + Serialize,
{
    match state.store.get(&id).await? {
        Some(record) if !record.is_deleted() => Ok(Json(record)),
        _ => Err(EntityError::NotFound {
            entity_type: T::resource_name_singular().to_string(),
            id,
        }
        .into()),
    }
}

/// Create a record
///
/// POST /{resource}
pub async fn create_content<T, N>(
    State(state): State<ContentState<T>>,
    headers: HeaderMap,
    Json(payload): Json<N>,
) -> Result<(StatusCode, Json<T>), ApiError>
where
    T: Content + Serialize,
    N: DeserializeOwned + Into<T> + Send,
{
    require(&state, &headers, "create", false)?;

    let entity: T = payload.into();
    entity.validate()?;

    let created = state.store.insert(entity).await?;
    tracing::info!(
        resource = T::resource_name(),
        id = %created.id(),
        "created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Soft-delete a record
///
/// DELETE /{resource}/{id}
pub async fn delete_content<T>(
    State(state): State<ContentState<T>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
    T: Content,
{
    // Deleting your own record is always allowed; anything else needs the
    // configured permission.
    let owner_match = AuthContext::from_headers(&headers).user_id == Some(id);
    require(&state, &headers, "delete", owner_match)?;

    match state.store.get(&id).await? {
        Some(record) if !record.is_deleted() => {}
        _ => {
            return Err(EntityError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id,
            }
            .into());
        }
    }

    state.store.soft_delete(&id).await?;
    tracing::info!(resource = T::resource_name(), id = %id, "soft-deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Question;

    #[test]
    fn test_list_query_split() {
        let query = ListQuery {
            cursor: Some("name".to_string()),
            size: Some(5),
            order: Some(SortDirection::Asc),
            search: Some("algebra".to_string()),
            ..Default::default()
        };
        let config = ApiConfig::default_config();

        let request = query.page_request(&config);
        assert_eq!(request.cursor_field, "name");
        assert_eq!(request.size, 5);
        assert_eq!(request.order, SortDirection::Asc);

        let params = query.list_params();
        assert_eq!(params.search.as_deref(), Some("algebra"));
    }

    #[test]
    fn test_list_query_defaults_come_from_config() {
        let mut config = ApiConfig::default_config();
        config.paging.default_size = 25;
        config.paging.max_size = 30;

        let request = ListQuery::default().page_request(&config);
        assert_eq!(request.cursor_field, "id");
        assert_eq!(request.size, 25);

        let request = ListQuery {
            size: Some(100),
            ..Default::default()
        }
        .page_request(&config);
        assert_eq!(request.size, 30);
    }

    #[test]
    fn test_allowed_fields_fall_back_to_registry() {
        let config = ApiConfig::default_config();
        let allowed = allowed_cursor_fields::<Question>(&config);
        assert!(allowed.contains(&"points".to_string()));

        let mut config = ApiConfig::default_config();
        config
            .cursor_fields
            .insert("questions".to_string(), vec!["name".to_string()]);
        let allowed = allowed_cursor_fields::<Question>(&config);
        assert_eq!(allowed, vec!["name".to_string()]);
    }
}
