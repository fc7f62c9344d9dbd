use std::sync::Arc;

use crate::info::{CustomAttributes, NamedField, PropertyInfo, Type, TypePath};
use crate::info::{impl_custom_attributes_fn, impl_with_custom_attributes};
use crate::info::impl_type_fn;
use crate::ops::Struct;
use crate::util::HashMap;

/// A container for compile-time named struct info.
///
/// Besides the field table, this records the accessor-backed
/// [properties](PropertyInfo) of the struct and which field (if any) embeds
/// its base struct for hierarchy walks.
///
/// # Examples
///
/// ```rust
/// use mirra::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct A {
///     val: f32,
/// }
///
/// let info = <A as Typed>::type_info().as_struct().unwrap();
///
/// assert_eq!(info.field_len(), 1);
/// assert_eq!(info.index_of("val"), Some(0));
/// ```
#[derive(Clone, Debug)]
pub struct StructInfo {
    ty: Type,
    fields: HashMap<&'static str, NamedField>,
    field_names: Box<[&'static str]>,
    properties: Box<[PropertyInfo]>,
    base: Option<&'static str>,
    // Use `Option` to reduce unnecessary heap requests (when empty content).
    custom_attributes: Option<Arc<CustomAttributes>>,
}

impl StructInfo {
    impl_type_fn!(ty);
    impl_custom_attributes_fn!(custom_attributes);
    impl_with_custom_attributes!(custom_attributes);

    /// Create a new [`StructInfo`].
    ///
    /// The order of internal fields is fixed, depends on the input order.
    /// At most one field may carry the base flag.
    pub fn new<T: Struct + TypePath>(fields: &[NamedField]) -> Self {
        let field_names = fields.iter().map(NamedField::name).collect();
        let base = fields.iter().find(|v| v.is_base()).map(NamedField::name);
        let fields = fields.iter().map(|v| (v.name(), v.clone())).collect();

        Self {
            ty: Type::of::<T>(),
            fields,
            field_names,
            properties: Box::new([]),
            base,
            custom_attributes: None,
        }
    }

    /// Replaces the declared properties.
    ///
    /// Used by the proc-macro crate.
    pub fn with_properties(mut self, properties: &[PropertyInfo]) -> Self {
        self.properties = properties.iter().cloned().collect();
        self
    }

    /// Returns the [`NamedField`] for the given `name`, if present.
    pub fn field(&self, name: &str) -> Option<&NamedField> {
        self.fields.get(name)
    }

    /// Returns the [`NamedField`] at the given index, if present.
    pub fn field_at(&self, index: usize) -> Option<&NamedField> {
        self.fields.get(self.field_names.get(index)?)
    }

    /// Returns an iterator over the fields in **declaration order**.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &NamedField> {
        self.field_names
            .iter()
            .map(|name| self.fields.get(name).unwrap()) // field names should be valid
    }

    /// Returns the field names in declaration order.
    #[inline]
    pub fn field_names(&self) -> &[&'static str] {
        &self.field_names
    }

    /// Returns the index for the given field `name`, if present.
    ///
    /// This is O(N) complexity.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.field_names.iter().position(|s| *s == name)
    }

    /// Returns the number of fields.
    #[inline]
    pub fn field_len(&self) -> usize {
        self.field_names.len()
    }

    /// Returns the [`PropertyInfo`] with the given `name`, if declared.
    pub fn property(&self, name: &str) -> Option<&PropertyInfo> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Returns the declared properties in declaration order.
    #[inline]
    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    /// Returns the field embedding the base struct, if one was marked
    /// `#[reflect(base)]`.
    pub fn base_field(&self) -> Option<&NamedField> {
        self.fields.get(self.base?)
    }
}
