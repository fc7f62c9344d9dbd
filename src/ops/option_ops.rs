use crate::Reflect;

/// A trait for type-erased access to possibly-absent values.
///
/// Implemented for `Option<T>`. Element traversal relies on this trait to
/// step into present values and to degrade gracefully on absent ones.
///
/// # Examples
///
/// ```
/// use mirra::ops::Optional;
///
/// let value = Some(3_i32);
/// let value: &dyn Optional = &value;
///
/// assert!(value.is_some());
/// assert!(value.get().is_some());
/// ```
pub trait Optional: Reflect {
    /// Returns a reference to the wrapped value, if present.
    fn get(&self) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the wrapped value, if present.
    fn get_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns `true` if a value is present.
    fn is_some(&self) -> bool;
}
