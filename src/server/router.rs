//! Router composition for the content API

use axum::Router;
use axum::routing::get;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::core::auth::PermissionHierarchy;
use crate::core::entity::Content;
use crate::core::store::ContentStore;
use crate::entities::{
    Category, Exam, NewCategory, NewExam, NewQuestion, NewUser, Question, User,
};
use crate::server::handlers::{
    ContentState, create_content, delete_content, get_content, list_content,
};
use crate::storage::InMemoryStore;

/// Application state shared across all resources
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn ContentStore<Category>>,
    pub questions: Arc<dyn ContentStore<Question>>,
    pub users: Arc<dyn ContentStore<User>>,
    pub exams: Arc<dyn ContentStore<Exam>>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// State backed entirely by in-memory stores
    pub fn in_memory(config: ApiConfig) -> Self {
        Self {
            categories: Arc::new(InMemoryStore::new()),
            questions: Arc::new(InMemoryStore::new()),
            users: Arc::new(InMemoryStore::new()),
            exams: Arc::new(InMemoryStore::new()),
            config: Arc::new(config),
        }
    }
}

/// Routes for one content resource:
/// - GET /{resource} — cursor-paginated listing
/// - POST /{resource} — create
/// - GET /{resource}/{id} — fetch one
/// - DELETE /{resource}/{id} — soft delete
pub fn content_routes<T, N>(
    store: Arc<dyn ContentStore<T>>,
    config: Arc<ApiConfig>,
    hierarchy: Arc<PermissionHierarchy>,
) -> Router
where
    T: Content + Serialize,
    N: DeserializeOwned + Into<T> + Send + 'static,
{
    let state = ContentState {
        store,
        config,
        hierarchy,
    };

    Router::new()
        .route(
            &format!("/{}", T::resource_name()),
            get(list_content::<T>).post(create_content::<T, N>),
        )
        .route(
            &format!("/{}/{{id}}", T::resource_name()),
            get(get_content::<T>).delete(delete_content::<T>),
        )
        .with_state(state)
}

/// Build the complete API router
pub fn build_router(state: AppState) -> Router {
    let hierarchy = Arc::new(state.config.hierarchy());

    Router::new()
        .merge(content_routes::<Category, NewCategory>(
            state.categories,
            state.config.clone(),
            hierarchy.clone(),
        ))
        .merge(content_routes::<Question, NewQuestion>(
            state.questions,
            state.config.clone(),
            hierarchy.clone(),
        ))
        .merge(content_routes::<User, NewUser>(
            state.users,
            state.config.clone(),
            hierarchy.clone(),
        ))
        .merge(content_routes::<Exam, NewExam>(
            state.exams,
            state.config.clone(),
            hierarchy,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
