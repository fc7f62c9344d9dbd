use core::any::{Any, TypeId};
use core::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::Reflect;
use crate::info::{Type, TypeInfo, Typed};
use crate::registry::{ConstructorInfo, TypeRegistry, TypeTrait};
use crate::util::TypeIdMap;

// -----------------------------------------------------------------------------
// TypeMeta

/// Runtime storage for type metadata, registered into the [`TypeRegistry`].
///
/// This includes a [`TypeInfo`], a [`TypeTrait`] table and the list of
/// registered [constructors](ConstructorInfo).
///
/// An instance of `TypeMeta` can be created using the [`TypeMeta::of`]
/// method, but is more often automatically generated using
/// [`#[derive(Reflect)]`](crate::derive::Reflect), which generates
/// an implementation of the [`GetTypeMeta`] trait.
///
/// # Example
///
/// ```
/// # use mirra::registry::{TypeMeta, TypeTraitDefault, FromType};
/// let mut meta = TypeMeta::of::<String>();
/// meta.insert_trait::<TypeTraitDefault>(FromType::<String>::from_type());
///
/// let f = meta.get_trait::<TypeTraitDefault>().unwrap();
/// let s = f.default().take::<String>().unwrap();
///
/// assert_eq!(s, "");
/// ```
pub struct TypeMeta {
    // Access `Type` from `TypeInfo` should judge once reflect kind.
    // We cache the reference to reduce the cost of some methods.
    ty: &'static Type,
    type_info: &'static TypeInfo,
    trait_table: TypeIdMap<Box<dyn TypeTrait>>,
    constructors: Vec<Arc<ConstructorInfo>>,
}

impl TypeMeta {
    /// Create a empty [`TypeMeta`] from a type.
    ///
    /// # Examples
    ///
    /// ```
    /// use mirra::registry::TypeMeta;
    /// let meta = TypeMeta::of::<String>();
    /// ```
    #[inline]
    pub fn of<T: Typed>() -> Self {
        let type_info = T::type_info();
        let ty = type_info.ty();
        Self {
            ty,
            type_info,
            trait_table: TypeIdMap::new(),
            constructors: Vec::new(),
        }
    }

    /// Returns the [`TypeInfo`] .
    #[inline(always)]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.type_info
    }

    /// Returns the [`Type`] .
    ///
    /// Manually impl for static reference.
    #[inline(always)]
    pub const fn ty(&self) -> &'static Type {
        self.ty
    }

    crate::info::impl_type_fn!();

    /// Returns the [`CustomAttributes`](crate::info::CustomAttributes) .
    #[inline]
    pub fn custom_attributes(&self) -> &'static crate::info::CustomAttributes {
        self.type_info.custom_attributes()
    }

    /// Returns the attribute of type `T`, if present.
    pub fn get_attribute<T: Reflect>(&self) -> Option<&'static T> {
        self.custom_attributes().get::<T>()
    }

    /// Returns `true` if it contains the given attribute type.
    pub fn has_attribute<T: Reflect>(&self) -> bool {
        self.custom_attributes().contains::<T>()
    }

    /// Insert a new [`TypeTrait`].
    #[inline(always)]
    pub fn insert_trait<T: TypeTrait>(&mut self, data: T) {
        self.insert_trait_by_id(TypeId::of::<T>(), Box::new(data));
    }

    // Block code inline.
    #[inline(never)]
    fn insert_trait_by_id(&mut self, id: TypeId, val: Box<dyn TypeTrait>) {
        self.trait_table.insert(id, val);
    }

    /// Removes a [`TypeTrait`] from the meta.
    pub fn remove_trait_by_id(&mut self, type_id: TypeId) -> Option<Box<dyn TypeTrait>> {
        self.trait_table.remove(&type_id)
    }

    /// Get a [`TypeTrait`] reference, or return `None` if it doesn't exist.
    #[inline]
    pub fn get_trait<T: TypeTrait>(&self) -> Option<&T> {
        self.get_trait_by_id(TypeId::of::<T>())
            .and_then(<dyn TypeTrait>::downcast_ref)
    }

    /// Get a [`TypeTrait`] reference, or return `None` if it doesn't exist.
    pub fn get_trait_by_id(&self, type_id: TypeId) -> Option<&dyn TypeTrait> {
        self.trait_table.get(&type_id).map(Deref::deref)
    }

    /// Get a mutable [`TypeTrait`] reference, or return `None` if it doesn't exist.
    #[inline]
    pub fn get_trait_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        self.get_trait_mut_by_id(TypeId::of::<T>())
            .and_then(<dyn TypeTrait>::downcast_mut)
    }

    /// Get a mutable [`TypeTrait`] reference, or return `None` if it doesn't exist.
    pub fn get_trait_mut_by_id(&mut self, type_id: TypeId) -> Option<&mut dyn TypeTrait> {
        self.trait_table.get_mut(&type_id).map(DerefMut::deref_mut)
    }

    /// Return true if specific [`TypeTrait`] exists.
    #[inline]
    pub fn has_trait<T: TypeTrait>(&self) -> bool {
        self.trait_table.contains(&TypeId::of::<T>())
    }

    /// Return the number of [`TypeTrait`].
    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }

    /// An iterator visiting all `TypeId - &dyn TypeTrait` pairs in arbitrary order.
    pub fn trait_iter(&self) -> impl ExactSizeIterator<Item = (TypeId, &dyn TypeTrait)> {
        self.trait_table
            .iter()
            .map(|(key, val)| (*key, val.deref()))
    }

    /// Registers a [constructor](ConstructorInfo) for this type.
    pub fn add_constructor(&mut self, constructor: ConstructorInfo) {
        self.constructors.push(Arc::new(constructor));
    }

    /// Returns the registered constructors, in registration order.
    #[inline]
    pub fn constructors(&self) -> &[Arc<ConstructorInfo>] {
        &self.constructors
    }
}

impl Clone for TypeMeta {
    fn clone(&self) -> Self {
        let mut new_map = TypeIdMap::with_capacity(self.trait_len());
        for (id, type_trait) in self.trait_table.iter() {
            new_map.insert(*id, (**type_trait).clone_type_trait());
        }

        Self {
            trait_table: new_map,
            type_info: self.type_info,
            ty: self.ty,
            constructors: self.constructors.clone(),
        }
    }
}

impl core::fmt::Debug for TypeMeta {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypeMeta")
            .field("type_info", &self.type_info)
            .field("constructors", &self.constructors)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetTypeMeta

/// A trait which allows a type to generate its [`TypeMeta`]
/// for registration into the [`TypeRegistry`].
///
/// This trait is automatically implemented for items using
/// [`#[derive(Reflect)]`](crate::derive::Reflect).
/// The macro also allows [`TypeTrait`]s and constructors to be registered
/// through `#[reflect(...)]` attributes.
///
/// # Implementation
///
/// Use [`#[derive(Reflect)]`](crate::derive::Reflect):
///
/// ```
/// use mirra::{derive::Reflect, registry::GetTypeMeta};
///
/// #[derive(Reflect)]
/// struct A {
///     value: i32,
/// }
///
/// let meta = A::get_type_meta();
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetTypeMeta` so cannot provide type registration information",
    note = "consider annotating `{Self}` with `#[derive(Reflect)]`"
)]
pub trait GetTypeMeta: Typed {
    /// Returns the **default** [`TypeMeta`] for this type.
    fn get_type_meta() -> TypeMeta;

    /// Registers other types needed by this type.
    /// **Allow** not to register oneself.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
