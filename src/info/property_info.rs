use core::any::{Any, TypeId};
use std::sync::Arc;

use crate::Reflect;
use crate::info::{CustomAttributes, TypeInfo, Typed};
use crate::info::{impl_custom_attributes_fn, impl_with_custom_attributes};

// -----------------------------------------------------------------------------
// Accessor function pointers

/// Reads a property value from a type-erased receiver.
///
/// Returns `None` if the receiver is not the declaring type.
pub type PropertyGetter = fn(&dyn Reflect) -> Option<Box<dyn Reflect>>;

/// Writes a property value through a type-erased receiver.
///
/// Returns the value back if the receiver or the value has the wrong type.
pub type PropertySetter = fn(&mut dyn Reflect, Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

// -----------------------------------------------------------------------------
// PropertyInfo

/// Information for an accessor-backed property of a struct.
///
/// A property pairs a logical name and value type with up to two accessor
/// functions: a getter (arity 0, returning the value type) and a setter
/// (arity 1, taking the value type). It is collected by
/// `#[reflect(get = ..., set = ...)]` on a field, or by a struct-level
/// `#[reflect(property(...))]` for properties without a backing field.
///
/// # Examples
///
/// ```
/// use mirra::{derive::Reflect, info::Typed};
///
/// #[derive(Reflect)]
/// struct Celsius {
///     #[reflect(get = degrees, set = set_degrees)]
///     degrees: f64,
/// }
///
/// impl Celsius {
///     fn degrees(&self) -> f64 { self.degrees }
///     fn set_degrees(&mut self, value: f64) { self.degrees = value; }
/// }
///
/// let info = Celsius::type_info().as_struct().unwrap();
/// let property = info.property("degrees").unwrap();
///
/// assert!(property.is_readable());
/// assert!(property.is_writable());
/// assert_eq!(property.getter_name(), Some("degrees"));
/// ```
#[derive(Clone, Debug)]
pub struct PropertyInfo {
    ty_id: TypeId,
    name: &'static str,
    // `TypeInfo` is created on first access; using a function pointer delays it.
    type_info: fn() -> &'static TypeInfo,
    getter: Option<Accessor<PropertyGetter>>,
    setter: Option<Accessor<PropertySetter>>,
    // Use `Option` to reduce unnecessary heap requests (when empty content).
    custom_attributes: Option<Arc<CustomAttributes>>,
}

/// An accessor function together with the name of the method backing it.
#[derive(Clone, Copy)]
struct Accessor<F> {
    name: &'static str,
    invoke: F,
}

impl<F> core::fmt::Debug for Accessor<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name)
    }
}

impl PropertyInfo {
    impl_custom_attributes_fn!(custom_attributes);
    impl_with_custom_attributes!(custom_attributes);

    /// Creates a new [`PropertyInfo`] for the given property `name` and value
    /// type `T`, with no accessors yet.
    #[inline]
    pub const fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            type_info: T::type_info,
            ty_id: TypeId::of::<T>(),
            getter: None,
            setter: None,
            custom_attributes: None,
        }
    }

    /// Attaches a getter accessor.
    ///
    /// Used by the proc-macro crate.
    pub fn with_getter(mut self, name: &'static str, invoke: PropertyGetter) -> Self {
        self.getter = Some(Accessor { name, invoke });
        self
    }

    /// Attaches a setter accessor.
    ///
    /// Used by the proc-macro crate.
    pub fn with_setter(mut self, name: &'static str, invoke: PropertySetter) -> Self {
        self.setter = Some(Accessor { name, invoke });
        self
    }

    /// Returns the property name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the `TypeId` of the value type.
    #[inline]
    pub const fn ty_id(&self) -> TypeId {
        self.ty_id
    }

    /// Check if the given value type matches this one.
    #[inline]
    pub fn type_is<T: Any>(&self) -> bool {
        self.ty_id == TypeId::of::<T>()
    }

    /// Returns the value type's [`TypeInfo`].
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// Returns the getter function, if declared.
    #[inline]
    pub fn getter(&self) -> Option<PropertyGetter> {
        self.getter.as_ref().map(|a| a.invoke)
    }

    /// Returns the setter function, if declared.
    #[inline]
    pub fn setter(&self) -> Option<PropertySetter> {
        self.setter.as_ref().map(|a| a.invoke)
    }

    /// Returns the name of the method backing the getter, if declared.
    #[inline]
    pub fn getter_name(&self) -> Option<&'static str> {
        self.getter.as_ref().map(|a| a.name)
    }

    /// Returns the name of the method backing the setter, if declared.
    #[inline]
    pub fn setter_name(&self) -> Option<&'static str> {
        self.setter.as_ref().map(|a| a.name)
    }

    /// Returns `true` if a getter is declared.
    #[inline]
    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    /// Returns `true` if a setter is declared.
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }
}
