use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::impls::impl_opaque_reflect_fns;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::registry::{GetTypeMeta, TypeMeta};

/// A named, read-only string table.
///
/// Built once with [`with`](Self::with) and never mutated; entry elements
/// over a bundle are readable only.
#[derive(Clone, PartialEq, Debug)]
pub struct ResourceBundle {
    name: String,
    entries: Vec<(String, String)>,
}

impl ResourceBundle {
    /// Creates an empty bundle with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Adds an entry, keeping insertion order.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Returns the bundle name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns the keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the bundle has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TypePath for ResourceBundle {
    #[inline]
    fn type_path() -> &'static str {
        "mirra::sources::ResourceBundle"
    }

    #[inline]
    fn type_name() -> &'static str {
        "ResourceBundle"
    }
}

impl Typed for ResourceBundle {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl Reflect for ResourceBundle {
    impl_opaque_reflect_fns!();
}

impl GetTypeMeta for ResourceBundle {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceBundle;

    #[test]
    fn lookups_are_ordered_and_read_only() {
        let bundle = ResourceBundle::new("messages")
            .with("greeting", "hello")
            .with("farewell", "bye");

        assert_eq!(bundle.name(), "messages");
        assert_eq!(bundle.get("greeting"), Some("hello"));
        assert_eq!(bundle.get("missing"), None);
        assert_eq!(bundle.keys().collect::<Vec<_>>(), ["greeting", "farewell"]);
    }
}
