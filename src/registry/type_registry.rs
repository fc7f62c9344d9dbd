use core::any::TypeId;

use crate::info::{TypeInfo, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTrait};
use crate::util::{HashMap, HashSet, TypeIdMap};

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of reflected types.
///
/// This struct is used as the central store for type information.
/// [Registering] a type will generate a new [`TypeMeta`] entry in this store
/// using a type's [`GetTypeMeta`] implementation
/// (which is automatically implemented when using
/// [`#[derive(Reflect)]`](crate::derive::Reflect)).
///
/// The element and selection layers consult the registry for constructors
/// and type capabilities.
///
/// # Example
///
/// ```
/// use mirra::registry::{TypeRegistry, TypeTraitDefault};
/// use mirra::info::DynamicTypePath;
///
/// let registry = TypeRegistry::new();
///
/// let generator = registry
///     .get_with_type_name("String").unwrap()
///     .get_trait::<TypeTraitDefault>().unwrap();
///
/// let s = generator.default();
/// let s = s.take::<String>().unwrap();
/// assert_eq!(s, "");
/// ```
///
/// [Registering]: TypeRegistry::register
pub struct TypeRegistry {
    type_meta_table: TypeIdMap<TypeMeta>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`] .
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Create a empty [`TypeRegistry`].
    #[inline]
    pub fn empty() -> Self {
        Self {
            type_meta_table: TypeIdMap::new(),
            type_path_to_id: HashMap::default(),
            type_name_to_id: HashMap::default(),
            ambiguous_names: HashSet::default(),
        }
    }

    /// Create a type registry with default registrations for primitive types.
    ///
    /// - `bool` `char`
    /// - `i8 - i128` `isize`
    /// - `u8 - u128` `usize`
    /// - `f32` `f64`
    /// - `String`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register::<bool>();
        registry.register::<char>();
        registry.register::<u8>();
        registry.register::<u16>();
        registry.register::<u32>();
        registry.register::<u64>();
        registry.register::<u128>();
        registry.register::<usize>();
        registry.register::<i8>();
        registry.register::<i16>();
        registry.register::<i32>();
        registry.register::<i64>();
        registry.register::<i128>();
        registry.register::<isize>();
        registry.register::<f32>();
        registry.register::<f64>();
        registry.register::<String>();
        registry
    }

    // # Validity
    // The type must **not** already exist.
    fn add_new_type_indices(
        type_meta: &TypeMeta,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = type_meta.ty();
        let type_name = ty.name();

        // Check for duplicate names.
        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        // For new types, assuming that the full path cannot be duplicated.
        type_path_to_id.insert(ty.path(), ty.id());
    }

    // - If key [`TypeId`] already exists, the function does nothing and returns `false`.
    // - If the key [`TypeId`] does not exist, the function inserts the value and returns `true`.
    fn register_internal(
        &mut self,
        type_id: TypeId,
        get_type_meta: impl FnOnce() -> TypeMeta,
    ) -> bool {
        self.type_meta_table.try_insert(type_id, || {
            let meta = get_type_meta();
            Self::add_new_type_indices(
                &meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            meta
        })
    }

    /// Try add or do nothing.
    ///
    /// The function will check if `TypeMeta.ty_id()` exists.
    /// - If key [`TypeId`] already exists, the function does nothing and returns `false`.
    /// - If the key [`TypeId`] does not exist, the function inserts the value and returns `true`.
    ///
    /// This method will _not_ register type dependencies.
    /// Use [`register`](Self::register) to register a type with its dependencies.
    #[inline(always)]
    pub fn try_insert_type_meta(&mut self, type_meta: TypeMeta) -> bool {
        self.type_meta_table.try_insert(type_meta.ty_id(), || {
            Self::add_new_type_indices(
                &type_meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            type_meta
        })
    }

    /// Insert or **overwrite** the meta for a type.
    ///
    /// - If key [`TypeId`] already exists, the value will be overwritten.
    ///   But full_path and type_name tables will not be modified.
    /// - If the key [`TypeId`] does not exist, the value will be inserted.
    ///   And the type path will be inserted into the index tables.
    ///
    /// This method will _not_ register type dependencies.
    /// Use [`register`](Self::register) to register a type with its dependencies.
    pub fn insert_type_meta(&mut self, type_meta: TypeMeta) {
        if !self.type_meta_table.contains(&type_meta.ty_id()) {
            Self::add_new_type_indices(
                &type_meta,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
        }
        self.type_meta_table.insert(type_meta.ty_id(), type_meta);
    }

    /// Attempts to register the type `T` if it has not yet been registered already.
    ///
    /// This will also recursively register any type dependencies as specified by
    /// [`GetTypeMeta::register_dependencies`]. When deriving `Reflect`, this will
    /// generally be all the fields of the struct. As with any type meta, these
    /// type dependencies will not be registered more than once.
    ///
    /// # Example
    ///
    /// ```
    /// # use core::any::TypeId;
    /// # use mirra::derive::Reflect;
    /// # use mirra::registry::TypeRegistry;
    /// #[derive(Reflect)]
    /// struct Foo {
    ///   name: Option<String>,
    ///   value: i32,
    /// }
    ///
    /// let mut type_registry = TypeRegistry::default();
    ///
    /// type_registry.register::<Foo>();
    ///
    /// // The main type
    /// assert!(type_registry.contains(TypeId::of::<Foo>()));
    ///
    /// // Its type dependencies
    /// assert!(type_registry.contains(TypeId::of::<Option<String>>()));
    /// assert!(type_registry.contains(TypeId::of::<i32>()));
    /// ```
    pub fn register<T: GetTypeMeta>(&mut self) {
        if self.register_internal(TypeId::of::<T>(), T::get_type_meta) {
            T::register_dependencies(self);
        }
    }

    /// Automatically registers all types annotated with
    /// `#[reflect(auto_register)]`, together with custom element finders and
    /// validators contributed by downstream crates.
    ///
    /// Repeated calls are cheap and will not insert duplicates.
    ///
    /// ## Feature Dependency
    ///
    /// This method requires the `auto_register` feature, enabled by the
    /// `inventory` crate. When disabled, it always does nothing and returns
    /// `false`.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            for entry in inventory::iter::<AutoRegistration> {
                (entry.register)(self);
            }
            true
        }
        #[cfg(not(feature = "auto_register"))]
        false
    }

    /// Attempts to register the referenced type `T` if it has not yet been registered.
    ///
    /// See [`register`](TypeRegistry::register) for more details.
    #[inline]
    pub fn register_by_val<T: GetTypeMeta>(&mut self, _: &T) {
        self.register::<T>();
    }

    /// Registers the type trait `D` for type `T`.
    ///
    /// Most of the time [`TypeRegistry::register`] can be used instead
    /// to register a type you derived `Reflect` for. However, in cases where
    /// you want to add a piece of type trait that was not included in the
    /// `#[reflect(...)]` list of the derive, this method can be used to
    /// insert additional type traits.
    ///
    /// # Panics
    ///
    /// Panics if `T` has not been registered.
    pub fn register_type_trait<T: Typed, D: TypeTrait + FromType<T>>(&mut self) {
        match self.type_meta_table.get_mut(&TypeId::of::<T>()) {
            Some(type_meta) => type_meta.insert_trait(D::from_type()),
            None => panic!(
                "Called `TypeRegistry::register_type_trait`, but the type `{}` of type_trait `{}` without registering",
                T::type_path(),
                core::any::type_name::<D>(),
            ),
        }
    }

    /// Whether the type with given [`TypeId`] has been registered in this registry.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.type_meta_table.contains(&type_id)
    }

    /// Returns a reference to the [`TypeMeta`] of the type with
    /// the given [`TypeId`].
    ///
    /// If the specified type has not been registered, returns `None`.
    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&TypeMeta> {
        self.type_meta_table.get(&type_id)
    }

    /// Returns a mutable reference to the [`TypeMeta`] of the type with
    /// the given [`TypeId`].
    ///
    /// If the specified type has not been registered, returns `None`.
    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut TypeMeta> {
        self.type_meta_table.get_mut(&type_id)
    }

    /// Returns a reference to the [`TypeMeta`] of the type with
    /// the given [type path].
    ///
    /// If no type with the given type path has been registered, returns `None`.
    ///
    /// [type path]: crate::info::TypePath::type_path
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&TypeMeta> {
        // Manual inline
        match self.type_path_to_id.get(type_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns a reference to the [`TypeMeta`] of the type with the given [type name].
    ///
    /// If the type name is ambiguous, or if no type with the given name
    /// has been registered, returns `None`.
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&TypeMeta> {
        match self.type_name_to_id.get(type_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns `true` if the given [type name] matches multiple registered types.
    ///
    /// [type name]: crate::info::TypePath::type_name
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    /// Returns a reference to the [`TypeTrait`] of type `T` associated with the given [`TypeId`].
    ///
    /// If the specified type has not been registered, or if `T` is not present
    /// in its type registration, returns `None`.
    pub fn get_type_trait<T: TypeTrait>(&self, type_id: TypeId) -> Option<&T> {
        // Manual inline
        match self.get(type_id) {
            Some(type_meta) => type_meta.get_trait::<T>(),
            None => None,
        }
    }

    /// Returns the [`TypeInfo`] associated with the given [`TypeId`].
    ///
    /// If the specified type has not been registered, returns `None`.
    pub fn get_type_info(&self, type_id: TypeId) -> Option<&'static TypeInfo> {
        self.get(type_id).map(TypeMeta::type_info)
    }

    /// Returns an iterator over the [`TypeMeta`]s of the registered types.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &TypeMeta> {
        self.type_meta_table.values()
    }

    /// Returns a mutable iterator over the [`TypeMeta`]s of the registered types.
    pub fn iter_mut(&mut self) -> impl ExactSizeIterator<Item = &mut TypeMeta> {
        self.type_meta_table.values_mut()
    }

    /// Checks to see if the [`TypeTrait`] of type `T` is associated with each registered type,
    /// returning a ([`TypeMeta`], [`TypeTrait`]) iterator for all entries where data of that type was found.
    pub fn iter_with_trait<T: TypeTrait>(&self) -> impl Iterator<Item = (&TypeMeta, &T)> {
        self.type_meta_table.values().filter_map(|item| {
            let type_trait = item.get_trait::<T>();
            type_trait.map(|t| (item, t))
        })
    }
}

// -----------------------------------------------------------------------------
// AutoRegistration

/// A statically collected registration hook.
///
/// The derive macro submits one of these for each type annotated with
/// `#[reflect(auto_register)]`; they are drained by
/// [`TypeRegistry::auto_register`].
#[cfg(feature = "auto_register")]
pub struct AutoRegistration {
    /// Called once per [`TypeRegistry::auto_register`] run.
    pub register: fn(&mut TypeRegistry),
}

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);

// -----------------------------------------------------------------------------
// TypeRegistryArc

use std::sync::{Arc, OnceLock, PoisonError};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A cloneable, shared handle to a [`TypeRegistry`].
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    /// The wrapped [`TypeRegistry`].
    pub internal: Arc<RwLock<TypeRegistry>>,
}

impl TypeRegistryArc {
    /// Takes a read lock on the underlying [`TypeRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`TypeRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.internal
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .type_path_to_id
            .keys()
            .fmt(f)
    }
}

/// Returns the process-wide shared registry.
///
/// On first access the registry is seeded with the primitive registrations
/// of [`TypeRegistry::new`] and the statically collected
/// `#[reflect(auto_register)]` types.
pub fn global_registry() -> &'static TypeRegistryArc {
    static REGISTRY: OnceLock<TypeRegistryArc> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let arc = TypeRegistryArc::default();
        {
            let mut registry = arc.write();
            *registry = TypeRegistry::new();
            registry.auto_register();
        }
        arc
    })
}
