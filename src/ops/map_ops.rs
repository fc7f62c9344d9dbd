use crate::Reflect;

// -----------------------------------------------------------------------------
// Map trait

/// A trait for type-erased map operations via reflection.
///
/// Implemented for the standard hash and btree maps and for
/// [`Properties`](crate::sources::Properties).
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use mirra::ops::Map;
///
/// let mut table = HashMap::new();
/// table.insert("a".to_string(), 1_i32);
///
/// let table: &dyn Map = &table;
/// assert_eq!(table.len(), 1);
/// ```
pub trait Map: Reflect {
    /// Returns a reference to the value for the given key, or `None` if the
    /// key is absent or of the wrong type.
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect>;

    /// Returns a mutable reference to the value for the given key, or `None`
    /// if the key is absent or of the wrong type.
    fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect>;

    /// Inserts a boxed key-value pair.
    ///
    /// On success returns the previous value for the key, if any. If either
    /// box has the wrong type, both are handed back unchanged.
    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<Option<Box<dyn Reflect>>, (Box<dyn Reflect>, Box<dyn Reflect>)>;

    /// Removes the value for the given key, returning it if it was present.
    fn remove_boxed(&mut self, key: &dyn Reflect) -> Option<Box<dyn Reflect>>;

    /// Returns the number of entries in the map.
    fn len(&self) -> usize;

    /// Returns `true` if the map contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the entries of the map.
    ///
    /// The iteration order depends on the underlying container.
    fn iter_entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;
}

impl dyn Map {
    /// Returns a typed reference to the value for the given key.
    #[inline]
    pub fn get_as<K: Reflect, V: Reflect>(&self, key: &K) -> Option<&V> {
        self.get(key).and_then(<dyn Reflect>::downcast_ref)
    }

    /// Returns a typed mutable reference to the value for the given key.
    #[inline]
    pub fn get_mut_as<K: Reflect, V: Reflect>(&mut self, key: &K) -> Option<&mut V> {
        self.get_mut(key).and_then(<dyn Reflect>::downcast_mut)
    }
}
