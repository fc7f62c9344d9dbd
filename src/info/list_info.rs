use core::any::{Any, TypeId};

use crate::info::{Type, TypeInfo, TypePath, Typed};
use crate::info::impl_type_fn;

/// A container for compile-time list info.
///
/// Covers both growable sequences (`Vec<T>`) and fixed-length arrays
/// (`[T; N]`); the latter additionally report a static [`len`](Self::len).
#[derive(Clone, Debug)]
pub struct ListInfo {
    ty: Type,
    item_ty_id: TypeId,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    item_info: fn() -> &'static TypeInfo,
    len: Option<usize>,
}

impl ListInfo {
    impl_type_fn!(ty);

    /// Create a new [`ListInfo`] for list type `L` with item type `I`.
    pub const fn new<L: TypePath, I: Typed>() -> Self {
        Self {
            ty: Type::of::<L>(),
            item_ty_id: TypeId::of::<I>(),
            item_info: I::type_info,
            len: None,
        }
    }

    /// Records a static length (for fixed-size arrays).
    pub const fn with_len(mut self, len: usize) -> Self {
        self.len = Some(len);
        self
    }

    /// Returns the `TypeId` of the item type.
    #[inline]
    pub const fn item_ty_id(&self) -> TypeId {
        self.item_ty_id
    }

    /// Check if the given item type matches this one.
    #[inline]
    pub fn item_type_is<T: Any>(&self) -> bool {
        self.item_ty_id == TypeId::of::<T>()
    }

    /// Returns the item type's [`TypeInfo`].
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// Returns the static length, if the list is a fixed-size array.
    #[inline]
    pub const fn len(&self) -> Option<usize> {
        self.len
    }
}
