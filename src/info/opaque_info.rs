use std::sync::Arc;

use crate::info::{CustomAttributes, Type, TypePath};
use crate::info::{impl_custom_attributes_fn, impl_with_custom_attributes};
use crate::info::impl_type_fn;

/// A container for compile-time info of a type with no reflectable interior.
///
/// Opaque types are treated as atomic values by the reflection system:
/// primitives, strings, and wrappers that deliberately hide their content.
#[derive(Clone, Debug)]
pub struct OpaqueInfo {
    ty: Type,
    // Use `Option` to reduce unnecessary heap requests (when empty content).
    custom_attributes: Option<Arc<CustomAttributes>>,
}

impl OpaqueInfo {
    impl_type_fn!(ty);
    impl_custom_attributes_fn!(custom_attributes);
    impl_with_custom_attributes!(custom_attributes);

    /// Create a new [`OpaqueInfo`].
    pub const fn new<T: TypePath + ?Sized>() -> Self {
        Self {
            ty: Type::of::<T>(),
            custom_attributes: None,
        }
    }
}
