//! Typed error handling for the testbank API
//!
//! Each error category gets its own enum so callers can match specific
//! failures instead of unpacking a generic `anyhow::Error`. The top-level
//! [`ApiError`] maps every variant onto an HTTP status, a stable error code
//! and a JSON body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for the testbank API
#[derive(Debug)]
pub enum ApiError {
    /// Cursor pagination errors
    Pagination(PaginationError),

    /// Entity-related errors (CRUD operations)
    Entity(EntityError),

    /// Request validation errors
    Validation(ValidationError),

    /// Storage backend errors, passed through unchanged
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Authorization errors
    Auth(AuthError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Pagination(e) => write!(f, "{}", e),
            ApiError::Entity(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Storage(e) => write!(f, "{}", e),
            ApiError::Config(e) => write!(f, "{}", e),
            ApiError::Auth(e) => write!(f, "{}", e),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Pagination(e) => Some(e),
            ApiError::Entity(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Storage(e) => Some(e),
            ApiError::Config(e) => Some(e),
            ApiError::Auth(e) => Some(e),
            ApiError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Pagination(e) => e.status_code(),
            ApiError::Entity(e) => e.status_code(),
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Auth(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Pagination(e) => e.error_code(),
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Config(_) => "CONFIG_ERROR",
            ApiError::Auth(_) => "FORBIDDEN",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            ApiError::Pagination(PaginationError::MalformedCursor { cursor, .. }) => {
                Some(serde_json::json!({ "cursor": cursor }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Pagination Errors
// =============================================================================

/// Errors raised by the cursor pagination engine
#[derive(Debug)]
pub enum PaginationError {
    /// The cursor string does not decode for the requested cursor field.
    /// Client input error; never retried.
    MalformedCursor { cursor: String, reason: String },

    /// A cursor field reached the engine that the entity does not declare.
    /// This is a broken upstream contract, not user input; the engine fails
    /// fast instead of silently falling back to `id`.
    UnsupportedCursorField { field: String },
}

impl fmt::Display for PaginationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaginationError::MalformedCursor { cursor, reason } => {
                write!(f, "Malformed cursor '{}': {}", cursor, reason)
            }
            PaginationError::UnsupportedCursorField { field } => {
                write!(f, "Unsupported cursor field '{}'", field)
            }
        }
    }
}

impl std::error::Error for PaginationError {}

impl PaginationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PaginationError::MalformedCursor { .. } => StatusCode::BAD_REQUEST,
            PaginationError::UnsupportedCursorField { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PaginationError::MalformedCursor { .. } => "MALFORMED_CURSOR",
            PaginationError::UnsupportedCursorField { .. } => "UNSUPPORTED_CURSOR_FIELD",
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug)]
pub enum EntityError {
    /// Entity was not found (or is soft-deleted)
    NotFound { entity_type: String, id: Uuid },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} {} not found", entity_type, id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to request validation
#[derive(Debug)]
pub enum ValidationError {
    /// Requested cursor field is not on the resource's allow-list
    UnknownCursorField { field: String },

    /// Requested page size is outside the accepted range
    PageSizeOutOfRange { size: usize },

    /// A field value failed format validation
    InvalidField { field: String, message: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownCursorField { field } => {
                write!(f, "Cannot paginate by field '{}'", field)
            }
            ValidationError::PageSizeOutOfRange { size } => {
                write!(f, "Page size {} is out of range", size)
            }
            ValidationError::InvalidField { field, message } => {
                write!(f, "Invalid value for '{}': {}", field, message)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors from the storage backend.
///
/// The pagination engine performs no retries and attaches no extra meaning;
/// these surface to the caller exactly as the store raised them.
#[derive(Debug)]
pub enum StorageError {
    /// A query failed to execute
    QueryFailed { message: String },

    /// A shared lock was poisoned by a panicking writer
    LockPoisoned { message: String },

    /// Backend is unreachable
    Unavailable { message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::QueryFailed { message } => write!(f, "Query failed: {}", message),
            StorageError::LockPoisoned { message } => write!(f, "Lock poisoned: {}", message),
            StorageError::Unavailable { message } => {
                write!(f, "Storage unavailable: {}", message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug)]
pub enum ConfigError {
    /// Configuration could not be read or parsed
    Invalid { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { message } => write!(f, "Invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// Auth Errors
// =============================================================================

/// Errors related to authorization
#[derive(Debug)]
pub enum AuthError {
    /// Caller lacks the required permission
    Forbidden { required: String },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Forbidden { required } => {
                write!(f, "Missing required permission '{}'", required)
            }
        }
    }
}

impl std::error::Error for AuthError {}

// =============================================================================
// Conversions
// =============================================================================

impl From<PaginationError> for ApiError {
    fn from(e: PaginationError) -> Self {
        ApiError::Pagination(e)
    }
}

impl From<EntityError> for ApiError {
    fn from(e: EntityError) -> Self {
        ApiError::Entity(e)
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Storage(e)
    }
}

impl From<ConfigError> for ApiError {
    fn from(e: ConfigError) -> Self {
        ApiError::Config(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        ApiError::Auth(e)
    }
}
