use core::any::TypeId;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::ops::ReflectCloneError;
use crate::reflection::impl_reflect_cast_fn;
use crate::util::TypeIdMap;

// -----------------------------------------------------------------------------
// CustomAttributes

/// A collection of custom attributes for a type, field, or property.
///
/// These attributes can be created with [`#[derive(Reflect)]`](crate::derive::Reflect).
///
/// Attributes are stored by their [`TypeId`].
/// Because of this, there can only be one attribute per type.
///
/// # Example
///
/// ```
/// # use mirra::{derive::Reflect, info::{Typed, TypeInfo}};
/// #[derive(Reflect)]
/// #[reflect(@false)]
/// struct Slider {
///     #[reflect(@10.0f32)]
///     value: f32,
///     name: String,
/// }
///
/// let info = <Slider as Typed>::type_info().as_struct().unwrap();
/// assert!(info.has_attribute::<bool>());
///
/// let field = info.field("value").unwrap();
/// assert!(!field.has_attribute::<i32>());
/// assert_eq!(*field.get_attribute::<f32>().unwrap(), 10.0f32);
///
/// let field = info.field("name").unwrap();
/// let attrs = field.custom_attributes();
/// assert!(attrs.is_empty());
/// ```
#[derive(Default)]
#[repr(transparent)]
pub struct CustomAttributes {
    attributes: TypeIdMap<Box<dyn Reflect>>,
}

impl CustomAttributes {
    /// A static reference to an empty [`CustomAttributes`].
    ///
    /// Info structs store custom attributes as `Option<Arc<..>>` to avoid
    /// heap allocations when there are no attributes; this const instance
    /// backs the `None` case.
    pub const EMPTY: &'static Self = &Self::new();

    /// Creates an empty [`CustomAttributes`].
    ///
    /// Equivalent to [`Default`], but this is a const function.
    #[inline]
    pub const fn new() -> Self {
        Self {
            attributes: TypeIdMap::new(),
        }
    }

    /// Adds an attribute.
    ///
    /// Attributes are keyed by their concrete type; later insertions for the
    /// same type overwrite earlier values.
    #[inline]
    pub fn with_attribute<T: Reflect>(mut self, value: T) -> Self {
        self.attributes.insert(TypeId::of::<T>(), Box::new(value));
        self
    }

    /// Returns an iterator over the stored attributes.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&TypeId, &dyn Reflect)> {
        self.attributes.iter().map(|(key, val)| (key, &**val))
    }

    /// Returns `true` if an attribute of type `T` is present.
    #[inline]
    pub fn contains<T: Reflect>(&self) -> bool {
        self.contains_by_id(TypeId::of::<T>())
    }

    /// Returns `true` if it contains the attribute with the given `TypeId`.
    #[inline]
    pub fn contains_by_id(&self, id: TypeId) -> bool {
        self.attributes.contains(&id)
    }

    /// Returns the attribute of type `T`, if present.
    #[inline]
    pub fn get<T: Reflect>(&self) -> Option<&T> {
        self.get_by_id(TypeId::of::<T>())
            .and_then(<dyn Reflect>::downcast_ref)
    }

    /// Returns the attribute with the given `TypeId`, if present.
    #[inline]
    pub fn get_by_id(&self, id: TypeId) -> Option<&dyn Reflect> {
        self.attributes.get(&id).map(core::ops::Deref::deref)
    }

    /// Returns the number of stored attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if no attributes are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl core::fmt::Debug for CustomAttributes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.attributes.values()).finish()
    }
}

// -----------------------------------------------------------------------------
// Annotation

/// Marker attribute identifying a struct as an annotation type.
///
/// Attached by `#[reflect(annotation)]`; the annotation element finder only
/// matches struct types carrying this attribute, and exposes their members
/// as read-only elements.
///
/// ```
/// # use mirra::{derive::Reflect, info::{Annotation, Typed}};
/// #[derive(Reflect, Clone)]
/// #[reflect(annotation, clone)]
/// struct Resource {
///     name: String,
/// }
///
/// let info = Resource::type_info();
/// assert!(info.has_attribute::<Annotation>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Annotation;

impl TypePath for Annotation {
    #[inline]
    fn type_path() -> &'static str {
        "mirra::info::Annotation"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Annotation"
    }

    #[inline]
    fn module_path() -> Option<&'static str> {
        Some("mirra::info")
    }
}

impl Typed for Annotation {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl Reflect for Annotation {
    impl_reflect_cast_fn!(Opaque);

    #[inline]
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        Ok(Box::new(*self))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        Some(other.is::<Self>())
    }

    fn reflect_debug(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self, f)
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implement `custom_attributes` and some methods like `get_attribute`.
macro_rules! impl_custom_attributes_fn {
    ($field:ident) => {
        /// Returns the stored custom attributes.
        #[inline]
        pub fn custom_attributes(&self) -> &$crate::info::CustomAttributes {
            match &self.$field {
                Some(ptr) => &**ptr,
                None => $crate::info::CustomAttributes::EMPTY,
            }
        }

        $crate::info::impl_custom_attributes_fn!();
    };
    () => {
        /// Returns the attribute of type `T`, if present.
        pub fn get_attribute<T: $crate::Reflect>(&self) -> Option<&T> {
            self.custom_attributes().get::<T>()
        }

        /// Returns the attribute with the given `TypeId`, if present.
        pub fn get_attribute_by_id(
            &self,
            type_id: ::core::any::TypeId,
        ) -> Option<&dyn $crate::Reflect> {
            self.custom_attributes().get_by_id(type_id)
        }

        /// Returns `true` if it contains the given attribute type.
        pub fn has_attribute<T: $crate::Reflect>(&self) -> bool {
            self.custom_attributes()
                .contains_by_id(::core::any::TypeId::of::<T>())
        }

        /// Returns `true` if it contains the attribute with the given `TypeId`.
        pub fn has_attribute_by_id(&self, type_id: ::core::any::TypeId) -> bool {
            self.custom_attributes().contains_by_id(type_id)
        }
    };
}

/// Implement `with_custom_attributes`.
macro_rules! impl_with_custom_attributes {
    ($field:ident) => {
        /// Replaces stored attributes (overwrite, do not merge).
        ///
        /// Used by the proc-macro crate.
        pub fn with_custom_attributes(self, attributes: CustomAttributes) -> Self {
            if attributes.is_empty() {
                Self {
                    $field: None,
                    ..self
                }
            } else {
                Self {
                    $field: Some(Arc::new(attributes)),
                    ..self
                }
            }
        }
    };
}

pub(super) use impl_custom_attributes_fn;
pub(super) use impl_with_custom_attributes;
