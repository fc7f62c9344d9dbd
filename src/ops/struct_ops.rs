use crate::Reflect;

// -----------------------------------------------------------------------------
// Struct trait

/// A trait for type-erased struct operations via reflection.
///
/// When using [`#[derive(Reflect)]`](crate::derive::Reflect) on a named-field
/// struct, this trait will be automatically implemented.
///
/// Fields skipped with `#[reflect(skip)]` are invisible here: indices and
/// [`field_len`](Struct::field_len) only count reflected fields.
///
/// # Examples
///
/// ```
/// use mirra::{derive::Reflect, ops::Struct};
///
/// #[derive(Reflect)]
/// struct Foo {
///     a: i32,
///     b: bool,
/// }
///
/// let value = Foo { a: 10, b: true };
/// let value: &dyn Struct = &value;
///
/// assert_eq!(value.field_len(), 2);
/// assert_eq!(value.field_as::<i32>("a"), Some(&10));
/// assert_eq!(value.field_at_as::<bool>(1), Some(&true));
/// ```
pub trait Struct: Reflect {
    /// Returns a reference to the value of the field named `name`.
    ///
    /// Returns `None` if the field does not exist.
    fn field(&self, name: &str) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value of the field named `name`.
    ///
    /// Returns `None` if the field does not exist.
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Returns a reference to the value of the field with index `index`.
    ///
    /// Returns `None` if `index` is out of bounds.
    fn field_at(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value of the field with index `index`.
    ///
    /// Returns `None` if `index` is out of bounds.
    fn field_at_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the name of the field with index `index`.
    fn name_at(&self, index: usize) -> Option<&str>;

    /// Returns the number of reflected fields in the struct.
    fn field_len(&self) -> usize;

    /// Returns an iterator over the values of the struct's fields.
    ///
    /// The iterator yields references to each field in order,
    /// from index 0 to `field_len() - 1`.
    fn iter_fields(&self) -> StructFieldIter<'_>;
}

impl dyn Struct {
    /// Returns a typed reference to the field with the given name.
    ///
    /// Returns `None` if:
    /// - The field does not exist.
    /// - The field cannot be downcast to type `T`.
    #[inline]
    pub fn field_as<T: Reflect>(&self, name: &str) -> Option<&T> {
        self.field(name).and_then(<dyn Reflect>::downcast_ref)
    }

    /// Returns a typed mutable reference to the field with the given name.
    ///
    /// Returns `None` if:
    /// - The field does not exist.
    /// - The field cannot be downcast to type `T`.
    #[inline]
    pub fn field_mut_as<T: Reflect>(&mut self, name: &str) -> Option<&mut T> {
        self.field_mut(name).and_then(<dyn Reflect>::downcast_mut)
    }

    /// Returns a typed reference to the field at the given index.
    ///
    /// Returns `None` if:
    /// - The index is out of bounds.
    /// - The field cannot be downcast to type `T`.
    #[inline]
    pub fn field_at_as<T: Reflect>(&self, index: usize) -> Option<&T> {
        self.field_at(index).and_then(<dyn Reflect>::downcast_ref)
    }

    /// Returns a typed mutable reference to the field at the given index.
    ///
    /// Returns `None` if:
    /// - The index is out of bounds.
    /// - The field cannot be downcast to type `T`.
    #[inline]
    pub fn field_at_mut_as<T: Reflect>(&mut self, index: usize) -> Option<&mut T> {
        self.field_at_mut(index)
            .and_then(<dyn Reflect>::downcast_mut)
    }
}

// -----------------------------------------------------------------------------
// Struct Field Iterator

/// An iterator over the field values of a struct.
///
/// This is an [`ExactSizeIterator`] that yields references to each field
/// in the struct in order.
pub struct StructFieldIter<'a> {
    struct_val: &'a dyn Struct,
    index: usize,
}

impl<'a> StructFieldIter<'a> {
    /// Creates a new iterator for the given struct.
    #[inline(always)]
    pub const fn new(value: &'a dyn Struct) -> Self {
        StructFieldIter {
            struct_val: value,
            index: 0,
        }
    }
}

impl<'a> Iterator for StructFieldIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.struct_val.field_at(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.struct_val.field_len();
        (size - self.index, Some(size))
    }
}

impl<'a> ExactSizeIterator for StructFieldIter<'a> {}
