use core::any::{Any, TypeId};

use crate::info::{Type, TypeInfo, TypePath, Typed};
use crate::info::impl_type_fn;

/// A container for compile-time map info.
#[derive(Clone, Debug)]
pub struct MapInfo {
    ty: Type,
    key_ty_id: TypeId,
    value_ty_id: TypeId,
    // `TypeInfo` is created on first access; using function pointers delays it.
    key_info: fn() -> &'static TypeInfo,
    value_info: fn() -> &'static TypeInfo,
}

impl MapInfo {
    impl_type_fn!(ty);

    /// Create a new [`MapInfo`] for map type `M` with keys `K` and values `V`.
    pub const fn new<M: TypePath, K: Typed, V: Typed>() -> Self {
        Self {
            ty: Type::of::<M>(),
            key_ty_id: TypeId::of::<K>(),
            value_ty_id: TypeId::of::<V>(),
            key_info: K::type_info,
            value_info: V::type_info,
        }
    }

    /// Returns the `TypeId` of the key type.
    #[inline]
    pub const fn key_ty_id(&self) -> TypeId {
        self.key_ty_id
    }

    /// Returns the `TypeId` of the value type.
    #[inline]
    pub const fn value_ty_id(&self) -> TypeId {
        self.value_ty_id
    }

    /// Check if the given key type matches this one.
    #[inline]
    pub fn key_type_is<T: Any>(&self) -> bool {
        self.key_ty_id == TypeId::of::<T>()
    }

    /// Check if the given value type matches this one.
    #[inline]
    pub fn value_type_is<T: Any>(&self) -> bool {
        self.value_ty_id == TypeId::of::<T>()
    }

    /// Returns the key type's [`TypeInfo`].
    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    /// Returns the value type's [`TypeInfo`].
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}
