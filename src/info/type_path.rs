use core::any::{Any, TypeId};

// -----------------------------------------------------------------------------
// TypePath

/// A static accessor to type paths and names.
///
/// Provides a stable alternative to [`core::any::type_name`] that survives
/// compiler versions and code refactoring.
///
/// # Methods
///
/// - [`type_path`]: The unique identifier of the type, cannot be duplicated.
/// - [`type_name`]: Type name without module path, may be duplicated.
/// - [`module_path`]: Optional module path.
///
/// We guarantee that these names do not have the prefix `::`.
/// Users should also ensure this when manually implementing the trait.
///
/// # Implementation
///
/// [`#[derive(Reflect)]`](crate::derive::Reflect) implements this trait
/// together with the rest of the reflection surface. Manual implementations
/// are simple for non-generic types:
///
/// ```
/// use mirra::info::TypePath;
///
/// struct Foo;
///
/// impl TypePath for Foo {
///     fn type_path() -> &'static str { "my_crate::foo::Foo" }
///     fn type_name() -> &'static str { "Foo" }
///     fn module_path() -> Option<&'static str> { Some("my_crate::foo") }
/// }
/// ```
///
/// For generic types, [`GenericTypePathCell`](crate::impls::GenericTypePathCell)
/// caches the composed path per instantiation.
///
/// [`type_path`]: TypePath::type_path
/// [`type_name`]: TypePath::type_name
/// [`module_path`]: TypePath::module_path
pub trait TypePath: 'static {
    /// Returns the fully qualified path with generics of the target type.
    ///
    /// This is the complete unique identifier of a type and should **not**
    /// be duplicated between different types.
    ///
    /// For `Option<Vec<usize>>`, this is `"core::option::Option<std::vec::Vec<usize>>"`.
    fn type_path() -> &'static str;

    /// Returns a short, pretty-print enabled name of the type.
    ///
    /// This name allows for duplication.
    ///
    /// For `Option<Vec<usize>>`, this is `"Option<Vec<usize>>"`.
    fn type_name() -> &'static str;

    /// Optional module path where the type is defined.
    ///
    /// Primitive built-in types may return `None`.
    fn module_path() -> Option<&'static str> {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Provide dynamic dispatch for types that implement [`TypePath`].
///
/// Auto impl for all types that implemented [`TypePath`].
///
/// # Examples
///
/// ```
/// use mirra::{info::DynamicTypePath, Reflect};
///
/// let x = 10_u32;
/// assert_eq!(x.reflect_type_path(), "u32");
///
/// // this is useful for reflected values.
/// let y: &dyn Reflect = &x;
/// assert_eq!(y.reflect_type_path(), "u32");
/// ```
pub trait DynamicTypePath {
    /// Returns the fully qualified path with generics of the underlying type.
    ///
    /// See [`TypePath::type_path`].
    fn reflect_type_path(&self) -> &'static str;

    /// Returns a short, pretty-print enabled name of the underlying type.
    ///
    /// See [`TypePath::type_name`].
    fn reflect_type_name(&self) -> &'static str;

    /// Optional module path where the underlying type is defined.
    ///
    /// See [`TypePath::module_path`].
    fn reflect_module_path(&self) -> Option<&'static str>;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        Self::type_name()
    }

    #[inline]
    fn reflect_module_path(&self) -> Option<&'static str> {
        Self::module_path()
    }
}

// -----------------------------------------------------------------------------
// TypePathTable

/// Lightweight vtable providing dynamic access to [`TypePath`] APIs.
///
/// Stores function pointers to a type's `TypePath` implementations, keeping
/// initialization minimal for types that are rarely queried.
#[derive(Clone, Copy)]
pub struct TypePathTable {
    type_path: fn() -> &'static str,
    type_name: fn() -> &'static str,
    module_path: fn() -> Option<&'static str>,
}

impl TypePathTable {
    /// Creates a new table from a type.
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path: T::type_path,
            type_name: T::type_name,
            module_path: T::module_path,
        }
    }

    /// See [`TypePath::type_path`]
    #[inline(always)]
    pub fn path(&self) -> &'static str {
        (self.type_path)()
    }

    /// See [`TypePath::type_name`]
    #[inline(always)]
    pub fn name(&self) -> &'static str {
        (self.type_name)()
    }

    /// See [`TypePath::module_path`]
    #[inline(always)]
    pub fn module_path(&self) -> Option<&'static str> {
        (self.module_path)()
    }
}

impl core::fmt::Debug for TypePathTable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TypePathTable")
            .field("type_path", &self.path())
            .field("type_name", &self.name())
            .field("module_path", &self.module_path())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Type

/// The base representation of a Rust type.
///
/// Includes a [`TypeId`] and a [`TypePathTable`], and re-exports their
/// functions.
///
/// # Examples
///
/// ```
/// # use core::any::TypeId;
/// use mirra::info::Type;
///
/// let ty = Type::of::<u32>();
///
/// assert!(ty.is::<u32>());
/// assert_eq!(ty.path(), "u32");
///
/// let type_id: TypeId = ty.id();
/// // ...
/// ```
#[derive(Copy, Clone)]
pub struct Type {
    type_path_table: TypePathTable,
    type_id: TypeId,
}

impl Type {
    /// Creates a new [`Type`] from a type that implements [`TypePath`].
    #[inline]
    pub const fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            type_path_table: TypePathTable::of::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Returns the [`TypeId`] of the type.
    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.type_id
    }

    /// Check if the given type matches this one.
    ///
    /// This only compares the [`TypeId`] of the types.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        TypeId::of::<T>() == self.type_id
    }

    /// Returns the [`TypePathTable`] of the type.
    #[inline(always)]
    pub const fn path_table(&self) -> TypePathTable {
        self.type_path_table
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        self.type_path_table.path()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        self.type_path_table.name()
    }

    /// See [`TypePath::module_path`].
    #[inline]
    pub fn module_path(&self) -> Option<&'static str> {
        self.type_path_table.module_path()
    }
}

/// This implementation purely relies on the [`TypeId`] of the type,
impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for Type {}

/// This implementation purely relies on the [`TypeId`] of the type,
impl core::hash::Hash for Type {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

/// This implementation will only output the [`TypePath`] of the type.
impl core::fmt::Debug for Type {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

macro_rules! impl_type_fn {
    ($field:ident) => {
        /// Returns the underlying `Type`.
        #[inline(always)]
        pub const fn ty(&self) -> &$crate::info::Type {
            &self.$field
        }
        $crate::info::impl_type_fn!();
    };
    () => {
        /// Returns the `TypeId`.
        #[inline]
        pub const fn ty_id(&self) -> ::core::any::TypeId {
            self.ty().id()
        }

        /// Check if the given type matches this one.
        #[inline]
        pub fn type_is<T: ::core::any::Any + ?Sized>(&self) -> bool {
            self.ty().id() == ::core::any::TypeId::of::<T>()
        }

        /// Returns the type path.
        #[inline]
        pub fn type_path(&self) -> &'static str {
            self.ty().path()
        }

        /// Returns the type name.
        #[inline]
        pub fn type_name(&self) -> &'static str {
            self.ty().name()
        }

        /// Returns the module path.
        #[inline]
        pub fn module_path(&self) -> Option<&'static str> {
            self.ty().module_path()
        }
    };
}

pub(crate) use impl_type_fn;
