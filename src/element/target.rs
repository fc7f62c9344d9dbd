use core::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::Reflect;
use crate::info::{TypeInfo, Typed};

/// A shared, mutable owner of a reflected value.
///
/// Elements bound to a target read and write through it; clones of a
/// `Target` share the same underlying value.
///
/// # Examples
///
/// ```
/// use mirra::element::Target;
///
/// let target = Target::new(vec![1_i32, 2, 3]);
/// let len = target.with(|values: &Vec<i32>| values.len()).unwrap();
/// assert_eq!(len, 3);
/// ```
#[derive(Clone)]
pub struct Target {
    value: Arc<RwLock<Box<dyn Reflect>>>,
    info: &'static TypeInfo,
}

impl Target {
    /// Wraps a value for element access.
    pub fn new<T: Reflect + Typed>(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(Box::new(value))),
            info: T::type_info(),
        }
    }

    /// Wraps an already boxed reflected value.
    pub fn from_boxed(value: Box<dyn Reflect>) -> Self {
        let info = value.reflect_type_info();
        Self {
            value: Arc::new(RwLock::new(value)),
            info,
        }
    }

    /// Returns the [`TypeInfo`] of the wrapped value.
    #[inline]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Runs `f` with a shared view of the wrapped value.
    pub fn view<R>(&self, f: impl FnOnce(&dyn Reflect) -> R) -> R {
        let guard = self.value.read().unwrap_or_else(PoisonError::into_inner);
        f(guard.as_ref())
    }

    /// Runs `f` with an exclusive view of the wrapped value.
    pub fn view_mut<R>(&self, f: impl FnOnce(&mut dyn Reflect) -> R) -> R {
        let mut guard = self.value.write().unwrap_or_else(PoisonError::into_inner);
        f(guard.as_mut())
    }

    /// Runs `f` with a typed view of the wrapped value.
    ///
    /// Returns `None` if the value is not of type `T`.
    pub fn with<T: Reflect, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.view(|value| value.downcast_ref::<T>().map(f))
    }

    /// Runs `f` with a typed exclusive view of the wrapped value.
    ///
    /// Returns `None` if the value is not of type `T`.
    pub fn with_mut<T: Reflect, R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.view_mut(|value| value.downcast_mut::<T>().map(f))
    }

    /// Returns `true` if both handles share the same underlying value.
    #[inline]
    pub fn ptr_eq(&self, other: &Target) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.view(|value| f.debug_tuple("Target").field(&value).finish())
    }
}
