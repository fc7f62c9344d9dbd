use core::any::Any;

/// A trait representing a capability supported by a registered type.
///
/// Implementors are stored in the [`TypeMeta`] trait table, keyed by their
/// own [`TypeId`], and retrieved to perform type-specific work without a
/// concrete `T` at hand. [`TypeTraitDefault`] is the canonical example.
///
/// This trait has a blanket implementation for any `Clone` type that is
/// `Send + Sync + 'static`.
///
/// [`TypeMeta`]: crate::registry::TypeMeta
/// [`TypeId`]: core::any::TypeId
/// [`TypeTraitDefault`]: crate::registry::TypeTraitDefault
pub trait TypeTrait: Any + Send + Sync {
    /// Clones this trait object.
    fn clone_type_trait(&self) -> Box<dyn TypeTrait>;
}

impl<T: Any + Send + Sync + Clone> TypeTrait for T {
    #[inline]
    fn clone_type_trait(&self) -> Box<dyn TypeTrait> {
        Box::new(self.clone())
    }
}

impl dyn TypeTrait {
    /// Downcasts the trait object to a concrete trait type.
    #[inline]
    pub fn downcast_ref<T: TypeTrait>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the trait object to a mutable concrete trait type.
    #[inline]
    pub fn downcast_mut<T: TypeTrait>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }
}
