use core::any::{Any, TypeId};

use crate::info::{Type, TypeInfo, TypePath, Typed};
use crate::info::impl_type_fn;

/// A container for compile-time `Option` info.
///
/// Options get their own kind because element traversal treats them as a
/// possibly-absent value: resolution continues on the
/// [`some_info`](Self::some_info) type when the value is `None`.
#[derive(Clone, Debug)]
pub struct OptionInfo {
    ty: Type,
    some_ty_id: TypeId,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    some_info: fn() -> &'static TypeInfo,
}

impl OptionInfo {
    impl_type_fn!(ty);

    /// Create a new [`OptionInfo`] for option type `O` wrapping `T`.
    pub const fn new<O: TypePath, T: Typed>() -> Self {
        Self {
            ty: Type::of::<O>(),
            some_ty_id: TypeId::of::<T>(),
            some_info: T::type_info,
        }
    }

    /// Returns the `TypeId` of the wrapped type.
    #[inline]
    pub const fn some_ty_id(&self) -> TypeId {
        self.some_ty_id
    }

    /// Check if the given wrapped type matches this one.
    #[inline]
    pub fn some_type_is<T: Any>(&self) -> bool {
        self.some_ty_id == TypeId::of::<T>()
    }

    /// Returns the wrapped type's [`TypeInfo`].
    #[inline]
    pub fn some_info(&self) -> &'static TypeInfo {
        (self.some_info)()
    }
}
