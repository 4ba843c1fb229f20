//! # Testbank
//!
//! A quiz/exam content API: categories, questions, users and exams exposed
//! over REST, with keyset (cursor-based) pagination on every listing.
//!
//! ## Features
//!
//! - **Keyset Pagination**: Bidirectional cursor navigation with
//!   existence-probed page metadata — stable under concurrent inserts and
//!   deletes at the page edges
//! - **Compound Cursors**: Order by any allow-listed field; ties broken by a
//!   time-encoded id so traversal never skips or repeats records
//! - **Soft Delete Support**: Deleted records keep their row but leave every
//!   listing immediately
//! - **Typed Filters**: Immutable filter values composed with AND/OR, built
//!   fresh per query
//! - **Permission Hierarchy**: Pure, cycle-safe permission expansion driven
//!   by configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use testbank::prelude::*;
//!
//! let store: InMemoryStore<Question> = InMemoryStore::new();
//!
//! // First page, newest first
//! let request = PageRequest::default();
//! let page = paginate(&store, &Filter::And(vec![]), &request, true).await?;
//!
//! // Follow the cursor
//! if let Some(cursor) = page.meta.next_cursor {
//!     let request = PageRequest {
//!         next_cursor: Some(cursor),
//!         ..Default::default()
//!     };
//!     let next = paginate(&store, &Filter::And(vec![]), &request, true).await?;
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{AuthContext, PermissionHierarchy, authorize},
        cursor::Cursor,
        entity::{Content, Entity},
        error::{ApiError, PaginationError, StorageError},
        field::{FieldFormat, FieldKind, FieldValue},
        paginate::paginate,
        query::{ListParams, Page, PageMeta, PageRequest, SortDirection},
        store::{CmpOp, ContentStore, Filter, OrderedStore, SortKey},
    };

    // === Macros ===
    pub use crate::impl_entity;

    // === Entities ===
    pub use crate::entities::{
        Category, Exam, NewCategory, NewExam, NewQuestion, NewUser, Question, User,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;

    // === Config ===
    pub use crate::config::ApiConfig;

    // === Server ===
    pub use crate::server::{AppState, build_router, serve};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
