use crate::Reflect;

// -----------------------------------------------------------------------------
// List trait

/// A trait for type-erased sequence operations via reflection.
///
/// Implemented for `Vec<T>` and fixed-size arrays `[T; N]`.
///
/// # Examples
///
/// ```
/// use mirra::ops::List;
///
/// let values = vec![1_i32, 2, 3];
/// let values: &dyn List = &values;
///
/// assert_eq!(values.len(), 3);
/// assert_eq!(values.get_as::<i32>(1), Some(&2));
/// ```
pub trait List: Reflect {
    /// Returns a reference to the item at `index`, or `None` if out of bounds.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the item at `index`, or `None` if out
    /// of bounds.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Returns the number of items in the list.
    fn len(&self) -> usize;

    /// Returns `true` if the list contains no items.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the items of the list.
    fn iter_items(&self) -> ListItemIter<'_>;
}

impl dyn List {
    /// Returns a typed reference to the item at the given index.
    ///
    /// Returns `None` if:
    /// - The index is out of bounds.
    /// - The item cannot be downcast to type `T`.
    #[inline]
    pub fn get_as<T: Reflect>(&self, index: usize) -> Option<&T> {
        self.get(index).and_then(<dyn Reflect>::downcast_ref)
    }

    /// Returns a typed mutable reference to the item at the given index.
    ///
    /// Returns `None` if:
    /// - The index is out of bounds.
    /// - The item cannot be downcast to type `T`.
    #[inline]
    pub fn get_mut_as<T: Reflect>(&mut self, index: usize) -> Option<&mut T> {
        self.get_mut(index).and_then(<dyn Reflect>::downcast_mut)
    }
}

// -----------------------------------------------------------------------------
// List Item Iterator

/// An iterator over the items of a reflected list.
pub struct ListItemIter<'a> {
    list: &'a dyn List,
    index: usize,
}

impl<'a> ListItemIter<'a> {
    /// Creates a new iterator for the given list.
    #[inline(always)]
    pub const fn new(list: &'a dyn List) -> Self {
        ListItemIter { list, index: 0 }
    }
}

impl<'a> Iterator for ListItemIter<'a> {
    type Item = &'a dyn Reflect;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let value = self.list.get(self.index);
        self.index += value.is_some() as usize;
        value
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let size = self.list.len();
        (size - self.index, Some(size))
    }
}

impl<'a> ExactSizeIterator for ListItemIter<'a> {}
