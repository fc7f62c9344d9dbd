use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::{Map, ReflectCloneError};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};

/// An insertion-ordered string table.
///
/// Keys are open: looking up an unknown key is not an error, and writing
/// to it creates the entry. Reflects as a [`Map`] of `String` to `String`.
///
/// # Examples
///
/// ```
/// use mirra::sources::Properties;
///
/// let mut login = Properties::new();
/// login.set("user", "admin");
/// login.set("password", "s3cr3t");
///
/// assert_eq!(login.get("user"), Some("admin"));
/// assert_eq!(login.keys().collect::<Vec<_>>(), ["user", "password"]);
/// ```
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    /// Creates an empty table.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Sets `key` to `value`, returning the replaced value if the key was
    /// already present. New keys keep insertion order.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(name, _)| name == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_of(&self, key: &dyn Reflect) -> Option<usize> {
        let key = string_key(key)?;
        self.entries.iter().position(|(name, _)| name == key)
    }
}

fn string_key(key: &dyn Reflect) -> Option<&str> {
    if let Some(key) = key.downcast_ref::<String>() {
        return Some(key);
    }
    key.downcast_ref::<&'static str>().copied()
}

impl TypePath for Properties {
    #[inline]
    fn type_path() -> &'static str {
        "mirra::sources::Properties"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Properties"
    }
}

impl Typed for Properties {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Map(MapInfo::new::<Self, String, String>()))
    }
}

impl Map for Properties {
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
        let index = self.entry_of(key)?;
        Some(&self.entries[index].1 as &dyn Reflect)
    }

    fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect> {
        let index = self.entry_of(key)?;
        Some(&mut self.entries[index].1 as &mut dyn Reflect)
    }

    fn insert_boxed(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<Option<Box<dyn Reflect>>, (Box<dyn Reflect>, Box<dyn Reflect>)> {
        let key = match key.take::<String>() {
            Ok(key) => key,
            Err(key) => return Err((key, value)),
        };
        match value.take::<String>() {
            Ok(value) => {
                Ok(self.set(key, value).map(|old| Box::new(old) as Box<dyn Reflect>))
            }
            Err(value) => Err((Box::new(key), value)),
        }
    }

    fn remove_boxed(&mut self, key: &dyn Reflect) -> Option<Box<dyn Reflect>> {
        let key = string_key(key)?.to_string();
        self.remove(&key).map(|old| Box::new(old) as Box<dyn Reflect>)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter_entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
        )
    }
}

impl Reflect for Properties {
    crate::reflection::impl_reflect_cast_fn!(Map);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        Ok(Box::new(self.clone()))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        crate::impls::map_partial_eq(self, other)
    }
}

impl GetTypeMeta for Properties {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }
}

#[cfg(test)]
mod tests {
    use super::Properties;
    use crate::info::ReflectKind;
    use crate::ops::Map;
    use crate::Reflect;

    #[test]
    fn set_replaces_and_keeps_order() {
        let mut table = Properties::new();
        table.set("user", "admin");
        table.set("password", "x");

        assert_eq!(table.set("user", "guest"), Some("admin".to_string()));
        assert_eq!(table.get("user"), Some("guest"));
        assert_eq!(table.keys().collect::<Vec<_>>(), ["user", "password"]);
    }

    #[test]
    fn reflects_as_open_map() {
        let mut table = Properties::new();
        table.set("user", "admin");

        assert_eq!(table.reflect_kind(), ReflectKind::Map);

        let map: &dyn Map = &table;
        assert!(map.get(&String::from("user")).is_some());
        assert!(map.get(&String::from("missing")).is_none());
    }
}
