use core::any::TypeId;
use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::Reflect;
use crate::element::Target;
use crate::error::{ElementError, HandlingError};
use crate::info::{CustomAttributes, Type, TypeInfo, TypePath, Typed};

// -----------------------------------------------------------------------------
// ElementId

/// A structural identity for an element.
///
/// Two elements are the same element when their ids are equal, regardless of
/// which target (if any) they are bound to. Binding an element to a target
/// therefore never changes its identity.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ElementId {
    declaring: TypeId,
    kind: &'static str,
    key: ElementKey,
}

impl ElementId {
    /// Creates an id from the declaring type, an element kind tag and a key.
    #[inline]
    pub const fn new(declaring: TypeId, kind: &'static str, key: ElementKey) -> Self {
        Self {
            declaring,
            kind,
            key,
        }
    }

    /// Returns the [`TypeId`] of the declaring type.
    #[inline]
    pub const fn declaring(&self) -> TypeId {
        self.declaring
    }

    /// Returns the element kind tag, such as `"field"` or `"property"`.
    #[inline]
    pub const fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the element key.
    #[inline]
    pub const fn key(&self) -> &ElementKey {
        &self.key
    }
}

/// The key part of an [`ElementId`].
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ElementKey {
    /// A named member, such as a struct field or a map entry.
    Name(String),
    /// A positional member, such as a list index.
    Index(usize),
    /// A chain of elements, for nested paths.
    Path(Vec<ElementId>),
}

// -----------------------------------------------------------------------------
// ElementOps

/// The behavior backing an [`Element`].
///
/// Implementors describe one member of a container type: how to name it,
/// type it, read it and write it. The [`Element`] wrapper adds binding,
/// identity and the typed convenience surface on top.
///
/// Most methods have defaults matching the common case of a readable,
/// writable, unbound member whose value type is unknown until read.
pub trait ElementOps: Send + Sync + 'static {
    /// The element name. Nested elements use dotted names.
    fn name(&self) -> &str;

    /// The declared [`TypeInfo`] of the element's value.
    ///
    /// Elements whose value type is only known at read time, such as map
    /// entries, report the "accepts anything" info of `dyn Reflect`.
    fn type_info(&self) -> &'static TypeInfo {
        <dyn Reflect as Typed>::type_info()
    }

    /// The [`Type`] that declares this element.
    fn declaring_type(&self) -> Type;

    /// Custom attributes attached to the element.
    fn attributes(&self) -> &CustomAttributes {
        CustomAttributes::EMPTY
    }

    /// Whether the element's value can be read.
    fn is_readable(&self) -> bool {
        true
    }

    /// Whether the element's value can be written.
    fn is_writable(&self) -> bool {
        true
    }

    /// Whether this element is bound to a target.
    fn is_specific(&self) -> bool {
        false
    }

    /// The bound target, if any.
    fn target(&self) -> Option<&Target> {
        None
    }

    /// Whether the element can hand out references into its container.
    ///
    /// Computed elements (accessor pairs, result-set columns) cannot, and
    /// are traversed by value instead.
    fn is_projectable(&self) -> bool {
        true
    }

    /// Reads the element's value out of `source`.
    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError>;

    /// Writes `value` into the element slot of `source`.
    fn write(&self, source: &mut dyn Reflect, value: Box<dyn Reflect>)
    -> Result<(), HandlingError>;

    /// Projects a shared reference to the element's value inside `source`.
    fn access<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError>;

    /// Projects an exclusive reference to the element's value inside `source`.
    fn access_mut<'r>(
        &self,
        source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError>;

    /// The structural identity of this element.
    fn id(&self) -> ElementId;

    /// For bound elements, the unbound element they decorate.
    fn as_unbound(&self) -> Option<Element> {
        None
    }
}

// -----------------------------------------------------------------------------
// Element

/// A handle to one member of a container type.
///
/// An element may come from a struct field, an accessor pair, a map or
/// properties entry, a list position, a result-set column, or a dotted
/// chain of any of these. The handle is cheap to clone and compares by
/// [structural identity](ElementId), so a bound element equals its unbound
/// counterpart.
///
/// # Examples
///
/// ```
/// use mirra::derive::Reflect;
/// use mirra::element::Target;
///
/// #[derive(Reflect)]
/// struct Login {
///     user: String,
/// }
///
/// let target = Target::new(Login { user: "admin".into() });
/// let user = mirra::element("user").in_target(&target).unwrap();
///
/// assert_eq!(user.value_as::<String>().unwrap(), "admin");
///
/// user.set(String::from("guest")).unwrap();
/// assert_eq!(user.value_as::<String>().unwrap(), "guest");
/// ```
#[derive(Clone)]
pub struct Element(Arc<dyn ElementOps>);

impl Element {
    /// Wraps element behavior into a handle.
    pub fn new(ops: impl ElementOps) -> Self {
        Self(Arc::new(ops))
    }

    /// Returns the element name.
    #[inline]
    pub fn name(&self) -> &str {
        self.0.name()
    }

    /// Returns the declared [`TypeInfo`] of the element's value.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        self.0.type_info()
    }

    /// Returns the [`Type`] declaring this element.
    #[inline]
    pub fn declaring_type(&self) -> Type {
        self.0.declaring_type()
    }

    /// Returns the custom attributes attached to the element.
    #[inline]
    pub fn attributes(&self) -> &CustomAttributes {
        self.0.attributes()
    }

    /// Returns the attached attribute of type `A`, if present.
    pub fn annotation<A: Reflect>(&self) -> Option<&A> {
        self.attributes().get::<A>()
    }

    /// Returns `true` if an attribute of type `A` is attached.
    pub fn is_annotated_with<A: Reflect>(&self) -> bool {
        self.attributes().contains::<A>()
    }

    /// Whether the element's value can be read.
    #[inline]
    pub fn is_readable(&self) -> bool {
        self.0.is_readable()
    }

    /// Whether the element's value can be written.
    #[inline]
    pub fn is_writable(&self) -> bool {
        self.0.is_writable()
    }

    /// Whether this element is bound to a target.
    #[inline]
    pub fn is_specific(&self) -> bool {
        self.0.is_specific()
    }

    /// Returns the bound target, if any.
    #[inline]
    pub fn target(&self) -> Option<&Target> {
        self.0.target()
    }

    /// Returns the structural identity of this element.
    #[inline]
    pub fn id(&self) -> ElementId {
        self.0.id()
    }

    /// Binds this element to a target, producing a specific element.
    ///
    /// Rebinding an already bound element replaces its target.
    pub fn bind(&self, target: &Target) -> Element {
        let inner = self.0.as_unbound().unwrap_or_else(|| self.clone());
        Element::new(crate::element::SpecificElement::new(inner, target.clone()))
    }

    /// Reads the value of a bound element.
    ///
    /// Fails with [`ElementError::NonSpecific`] when the element has no
    /// target.
    pub fn value(&self) -> Result<Box<dyn Reflect>, ElementError> {
        let target = self
            .0
            .target()
            .ok_or_else(|| ElementError::NonSpecific(self.name().to_string()))?;
        Ok(target.view(|source| self.0.read(source))?)
    }

    /// Reads the value of a bound element and downcasts it to `T`.
    pub fn value_as<T: Reflect + TypePath>(&self) -> Result<T, ElementError> {
        let value = self.value()?;
        value.take::<T>().map_err(|value| {
            ElementError::Handling(HandlingError::MismatchedTypes {
                expected: T::type_path(),
                received: value.reflect_type_path(),
            })
        })
    }

    /// Writes a boxed value into a bound element.
    ///
    /// Fails with [`ElementError::NonSpecific`] when the element has no
    /// target.
    pub fn set_value(&self, value: Box<dyn Reflect>) -> Result<(), ElementError> {
        let target = self
            .0
            .target()
            .ok_or_else(|| ElementError::NonSpecific(self.name().to_string()))?;
        Ok(target.view_mut(|source| self.0.write(source, value))?)
    }

    /// Writes a typed value into a bound element.
    pub fn set<T: Reflect>(&self, value: T) -> Result<(), ElementError> {
        self.set_value(Box::new(value))
    }

    /// Reads the element's value out of an explicit source.
    #[inline]
    pub fn read_from(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        self.0.read(source)
    }

    /// Writes a value into an explicit source.
    #[inline]
    pub fn write_to(
        &self,
        source: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        self.0.write(source, value)
    }

    pub(crate) fn ops(&self) -> &dyn ElementOps {
        self.0.as_ref()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name())
            .field("declaring", &self.declaring_type())
            .field("specific", &self.is_specific())
            .finish()
    }
}
