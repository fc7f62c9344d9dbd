use core::{error, fmt};

use crate::info::{CustomAttributes, ListInfo, MapInfo, OpaqueInfo, OptionInfo, StructInfo, Type};

// -----------------------------------------------------------------------------
// ReflectKind

/// An enumeration of the "kinds" of a reflected type.
///
/// Each kind corresponds to a specific reflection trait, such as `Struct` or
/// `List`, which itself corresponds to the structure of a type.
///
/// A [`ReflectKind`] is obtained via [`Reflect::reflect_kind`],
/// or via [`ReflectRef::kind`] and [`ReflectMut::kind`].
///
/// [`Reflect::reflect_kind`]: crate::Reflect::reflect_kind
/// [`ReflectRef::kind`]: crate::ops::ReflectRef
/// [`ReflectMut::kind`]: crate::ops::ReflectMut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Struct,
    List,
    Map,
    Option,
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Map => f.pad("Map"),
            Self::Option => f.pad("Option"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Error returned when a `TypeInfo` value is not the expected `ReflectKind`.
#[derive(Debug)]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

impl fmt::Display for ReflectKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reflect kind mismatch: expected {}, received {}",
            self.expected, self.received
        )
    }
}

impl error::Error for ReflectKindError {}

// -----------------------------------------------------------------------------
// TypeInfo

/// Compile-time type information for various reflected types.
///
/// # Content
///
/// A `TypeInfo` contains the following information:
///
/// - **kind**: as same as [`ReflectKind`], may be `Struct`, `Map` etc.
/// - **id**: unique type identity, [`core::any::TypeId`].
/// - **name**: type name and module path, as same as [`TypePathTable`].
/// - **attributes**: [`CustomAttributes`], the annotation analog.
///
/// It can be converted to an inner info struct, for example [`StructInfo`],
/// which exposes more detail such as fields and properties.
///
/// # Obtain
///
/// Generally, a type's `TypeInfo` is defined by the [`Typed`] trait and can
/// be retrieved in one of three ways:
///
/// 1. [`Typed::type_info`] when the type is known at compile time.
/// 2. [`DynamicTyped::reflect_type_info`] from a `dyn Reflect`.
/// 3. [`TypeRegistry::get_type_info`] from a `TypeId` or type path.
///
/// [`Typed`]: crate::info::Typed
/// [`TypePathTable`]: crate::info::TypePathTable
/// [`Typed::type_info`]: crate::info::Typed::type_info
/// [`DynamicTyped::reflect_type_info`]: crate::info::DynamicTyped::reflect_type_info
/// [`TypeRegistry::get_type_info`]: crate::registry::TypeRegistry::get_type_info
#[derive(Debug, Clone)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Map(MapInfo),
    Option(OptionInfo),
    Opaque(OpaqueInfo),
}

// Helper macro that implements type-safe accessor methods like `as_struct`.
macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        /// Convert [`TypeInfo`] to specific type information.
        ///
        /// Then you can call some more specific methods without the need to
        /// determine the [type kind](ReflectKind) again.
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_option: Option => OptionInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the underlying [`Type`] metadata for this `TypeInfo`.
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Option(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    crate::info::impl_type_fn!();

    /// Returns the [`ReflectKind`] for this `TypeInfo` (a fast discriminator).
    ///
    /// # Examples
    ///
    /// ```
    /// use mirra::info::{Typed, ReflectKind};
    ///
    /// let info = i32::type_info();
    /// assert_eq!(info.kind(), ReflectKind::Opaque);
    /// ```
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Option(_) => ReflectKind::Option,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Returns the custom attributes attached to this type, if any.
    ///
    /// For kinds that do not support custom attributes this returns a shared
    /// empty reference (`CustomAttributes::EMPTY`).
    pub fn custom_attributes(&self) -> &CustomAttributes {
        match self {
            Self::Struct(info) => info.custom_attributes(),
            Self::Opaque(info) => info.custom_attributes(),
            _ => CustomAttributes::EMPTY,
        }
    }
    crate::info::attributes::impl_custom_attributes_fn!();
}
