//! Core module containing fundamental traits and types

pub mod auth;
pub mod cursor;
pub mod entity;
pub mod error;
pub mod field;
pub mod paginate;
pub mod query;
pub mod store;

pub use auth::{AuthContext, PermissionHierarchy, authorize};
pub use cursor::Cursor;
pub use entity::{Content, Entity};
pub use error::{ApiError, PaginationError, StorageError};
pub use field::{FieldFormat, FieldKind, FieldValue};
pub use paginate::paginate;
pub use query::{ListParams, Page, PageMeta, PageRequest, SortDirection};
pub use store::{CmpOp, ContentStore, Filter, OrderedStore, SortKey};
