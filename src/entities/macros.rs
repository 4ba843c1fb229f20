//! Macro for reducing boilerplate when defining content entities
//!
//! Every content type carries the same base fields and the same mechanical
//! `Entity` implementation; the macro generates those. The `Content`
//! implementation (sortable-field registry, field access, list filter) stays
//! hand-written per entity because it is where the types actually differ.

/// Implement `Entity` plus the shared lifecycle helpers for a content struct.
///
/// The struct must carry the base fields `id`, `entity_type`, `created_at`,
/// `updated_at`, `deleted_at` and `status`.
///
/// # Example
/// ```rust,ignore
/// impl_entity!(Category, "category", "categories");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $singular:expr, $plural:expr) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn entity_type(&self) -> &str {
                &self.entity_type
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn deleted_at(&self) -> Option<::chrono::DateTime<::chrono::Utc>> {
                self.deleted_at
            }

            fn status(&self) -> &str {
                &self.status
            }

            fn mark_deleted(&mut self) {
                self.deleted_at = Some(::chrono::Utc::now());
                self.updated_at = ::chrono::Utc::now();
            }

            fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }

        impl $type {
            /// Restore a soft-deleted entity (clears deleted_at timestamp)
            #[allow(dead_code)]
            pub fn restore(&mut self) {
                self.deleted_at = None;
                self.updated_at = ::chrono::Utc::now();
            }

            /// Change the entity status
            #[allow(dead_code)]
            pub fn set_status(&mut self, status: String) {
                self.status = status;
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}
