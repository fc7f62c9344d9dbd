use core::any::{Any, TypeId};
use std::sync::Arc;

use bitflags::bitflags;

use crate::info::{CustomAttributes, TypeInfo, Typed};
use crate::info::{impl_custom_attributes_fn, impl_with_custom_attributes};

// -----------------------------------------------------------------------------
// FieldFlags

bitflags! {
    /// Per-field markers collected by the derive macro.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct FieldFlags: u8 {
        /// The field can be read but never written through an element.
        const READONLY = 1 << 0;
        /// The field embeds the type's base struct; hierarchy walks follow it.
        const BASE = 1 << 1;
    }
}

// -----------------------------------------------------------------------------
// NamedField

/// Information for a named (struct) field.
///
/// # Examples
///
/// ```
/// use mirra::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Foo {
///     field_a: f32,
/// }
///
/// let info = Foo::type_info().as_struct().unwrap();
/// let field_info = info.field_at(0).unwrap();
///
/// assert!(field_info.type_is::<f32>());
/// assert_eq!(field_info.name(), "field_a");
/// ```
#[derive(Clone, Debug)]
pub struct NamedField {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    flags: FieldFlags,
    // Use `Option` to reduce unnecessary heap requests (when empty content).
    custom_attributes: Option<Arc<CustomAttributes>>,
}

impl NamedField {
    impl_custom_attributes_fn!(custom_attributes);
    impl_with_custom_attributes!(custom_attributes);

    /// Creates a new [`NamedField`] for the given field `name` and type `T`.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            ty_id: TypeId::of::<T>(),
            flags: FieldFlags::empty(),
            custom_attributes: None,
        }
    }

    /// Replaces the field flags.
    ///
    /// Used by the proc-macro crate.
    pub fn with_flags(mut self, flags: FieldFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Returns the `TypeId`.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the field's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the field flags.
    #[inline]
    pub const fn flags(&self) -> FieldFlags {
        self.flags
    }

    /// Returns `true` if the field was marked `#[reflect(readonly)]`.
    #[inline]
    pub const fn is_readonly(&self) -> bool {
        self.flags.contains(FieldFlags::READONLY)
    }

    /// Returns `true` if the field was marked `#[reflect(base)]`.
    #[inline]
    pub const fn is_base(&self) -> bool {
        self.flags.contains(FieldFlags::BASE)
    }
}
