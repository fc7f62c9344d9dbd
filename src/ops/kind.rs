use crate::Reflect;
use crate::info::{ReflectKind, ReflectKindError};
use crate::ops::{List, Map, Optional, Struct};

// -----------------------------------------------------------------------------
// ReflectRef

/// An immutable enumeration of ["kinds"](ReflectKind) of a reflected value.
///
/// Obtained via [`Reflect::reflect_ref`].
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Option(&'a dyn Optional),
    Opaque(&'a dyn Reflect),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $ty:ty) => {
        /// Attempts to cast to the expected kind.
        pub fn $name(self) -> Result<$ty, ReflectKindError> {
            match self {
                Self::$kind(value) => Ok(value),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl<'a> ReflectRef<'a> {
    impl_cast_method!(as_struct: Struct => &'a dyn Struct);
    impl_cast_method!(as_list: List => &'a dyn List);
    impl_cast_method!(as_map: Map => &'a dyn Map);
    impl_cast_method!(as_option: Option => &'a dyn Optional);

    /// Returns the [`ReflectKind`] of this reference.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Option(_) => ReflectKind::Option,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// A mutable enumeration of ["kinds"](ReflectKind) of a reflected value.
///
/// Obtained via [`Reflect::reflect_mut`].
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Option(&'a mut dyn Optional),
    Opaque(&'a mut dyn Reflect),
}

impl<'a> ReflectMut<'a> {
    impl_cast_method!(as_struct: Struct => &'a mut dyn Struct);
    impl_cast_method!(as_list: List => &'a mut dyn List);
    impl_cast_method!(as_map: Map => &'a mut dyn Map);
    impl_cast_method!(as_option: Option => &'a mut dyn Optional);

    /// Returns the [`ReflectKind`] of this reference.
    pub const fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Option(_) => ReflectKind::Option,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
