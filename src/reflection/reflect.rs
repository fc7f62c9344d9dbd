use core::any::{Any, TypeId};

use crate::impls::NonGenericTypeInfoCell;
use crate::info::{DynamicTypePath, DynamicTyped, TypePath, Typed};
use crate::info::{OpaqueInfo, ReflectKind, TypeInfo};
use crate::ops::ReflectCloneError;
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// The foundational trait for runtime reflection in [`mirra`].
///
/// This trait enables dynamic access and modification of data without
/// compile-time type information. Every value source the element layer can
/// inspect, from plain structs to property tables and result sets, goes
/// through this trait.
///
/// # Recommendations
///
/// It's strongly recommended to use [the derive macro for `Reflect`] rather
/// than manually implementing this trait. The derive macro automatically
/// implements this trait along with [`Struct`], [`Typed`] and [`TypePath`]
/// based on the type's structure.
///
/// # Core Functionality
///
/// ## Type Information
///
/// `Reflect` extends [`DynamicTypePath`] and [`DynamicTyped`], providing:
///
/// ```rust
/// # use mirra::{Reflect, info::{DynamicTypePath, DynamicTyped}};
/// let value = 10i32.into_boxed_reflect();
/// let type_path = value.reflect_type_path();   // Gets the type's path
/// let type_info = value.reflect_type_info();   // Gets the type's reflection metadata
/// ```
///
/// ## Type Identification
///
/// While `Reflect` supports [`Any`], note that [`Any::type_id`] on
/// `Box<dyn Reflect>` returns the container's type ID, not the inner value's.
/// Use [`Reflect::ty_id`] instead:
///
/// ```rust
/// # use mirra::Reflect;
/// # use core::any::{Any, TypeId};
/// let x: Box<dyn Reflect> = Box::new(32_i32).into_reflect();
///
/// assert!(x.type_id() != TypeId::of::<i32>());    // Container type ID
/// assert!((*x).type_id() == TypeId::of::<i32>()); // Dereferenced works
/// assert!(x.ty_id() == TypeId::of::<i32>());      // Preferred method
/// ```
///
/// ## Type Casting
///
/// Use [`reflect_ref`] and [`reflect_mut`] to cast to reflection subtypes
/// ([`Struct`], [`List`], [`Map`], [`Optional`]):
///
/// ```rust
/// # use mirra::{Reflect, ops::List};
/// let vec = vec![1, 2, 3].into_boxed_reflect();
/// let list: &dyn List = vec.reflect_ref().as_list().unwrap();
/// ```
///
/// Use `downcast_ref`, `downcast_mut`, and `downcast` for concrete type
/// conversion:
///
/// ```rust
/// # use mirra::Reflect;
/// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
/// let y = x.downcast_ref::<i32>().unwrap();
/// assert_eq!(*y, 10);
/// ```
///
/// # Manual Implementation
///
/// Some methods have standard implementations:
///
/// ```rust, ignore
/// fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
///     *self = value.take::<Self>()?;  // Extract Self from Box<dyn Reflect>
///     Ok(())
/// }
///
/// fn reflect_kind(&self) -> ReflectKind {
///     ReflectKind::Kind  // e.g., ReflectKind::Struct, ReflectKind::Map
/// }
///
/// fn reflect_ref(&self) -> ReflectRef<'_> {
///     ReflectRef::Kind(self)  // Construct appropriate ReflectRef variant
/// }
///
/// fn reflect_mut(&mut self) -> ReflectMut<'_> {
///     ReflectMut::Kind(self)  // Construct appropriate ReflectMut variant
/// }
/// ```
///
/// Only [`reflect_clone`] must be implemented manually (use `self.clone()` for
/// cloneable types).
///
/// [`reflect_partial_eq`]: Reflect::reflect_partial_eq
/// [`reflect_debug`]: Reflect::reflect_debug
/// [`reflect_clone`]: Reflect::reflect_clone
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
/// [`mirra`]: crate
/// [the derive macro for `Reflect`]: crate::derive::Reflect
/// [`Struct`]: crate::ops::Struct
/// [`List`]: crate::ops::List
/// [`Map`]: crate::ops::Map
/// [`Optional`]: crate::ops::Optional
/// [`DynamicTypePath`]: crate::info::DynamicTypePath
/// [`DynamicTyped`]: crate::info::DynamicTyped
/// [`Any`]: core::any::Any
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    /// Casts this type to a fully-reflected value.
    ///
    /// # Example
    ///
    /// ```
    /// use mirra::Reflect;
    ///
    /// let x = 32;
    /// let r: &dyn Reflect = x.as_reflect();
    /// // Equal to this:
    /// // let r: &dyn Reflect = &x;
    /// ```
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a mutable, fully-reflected value.
    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed, fully-reflected value.
    ///
    /// # Example
    ///
    /// ```
    /// use mirra::Reflect;
    ///
    /// let x = Box::new(32);
    /// let r = x.into_reflect();
    /// // Equal to this:
    /// // let r = x as Box<dyn Reflect>;
    /// ```
    #[inline(always)]
    fn into_reflect(self: Box<Self>) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        self
    }

    /// Casts this type to a boxed, fully-reflected value.
    ///
    /// # Example
    ///
    /// ```
    /// use mirra::Reflect;
    ///
    /// let r = 32.into_boxed_reflect();
    /// // Equal to this:
    /// // let r = Box::new(32) as Box<dyn Reflect>;
    /// ```
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Return the [`TypeId`] of the underlying type.
    ///
    /// When you call `Box<dyn Reflect>::type_id`, it will return
    /// the [`TypeId`] of the entire container, instead of `dyn Reflect`.
    ///
    /// This is prone to errors, so we provide this method.
    ///
    /// # Example
    ///
    /// ```
    /// use mirra::Reflect;
    /// use core::any::{Any, TypeId};
    ///
    /// let x: Box<dyn Reflect> = Box::new(32_i32).into_reflect();
    ///
    /// assert!(x.type_id() != TypeId::of::<i32>()); // !!!
    /// assert!((*x).type_id() == TypeId::of::<i32>());
    /// assert!(x.ty_id() == TypeId::of::<i32>());   // good
    /// ```
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Performs a type-checked assignment of a reflected value to this value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mirra::Reflect;
    /// let data = vec![1_i32, 2_i32, 3_i32].into_boxed_reflect();
    /// let mut vec = Vec::<i32>::new();
    ///
    /// vec.set(data).unwrap();
    /// assert_eq!(vec, [1, 2, 3]);
    /// ```
    fn set(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Returns a pure enumeration of ["kinds"](ReflectKind) of type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mirra::{Reflect, info::ReflectKind};
    /// let vec = vec![1, 2, 3].into_boxed_reflect();
    ///
    /// assert_eq!(vec.reflect_kind(), ReflectKind::List);
    /// ```
    fn reflect_kind(&self) -> ReflectKind;

    /// Returns an immutable enumeration of ["kinds"](ReflectRef) of type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mirra::{Reflect, ops::List};
    /// let vec = vec![1, 2, 3].into_boxed_reflect();
    ///
    /// let list: &dyn List = vec.reflect_ref().as_list().unwrap();
    /// ```
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a mutable enumeration of ["kinds"](ReflectMut) of type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mirra::{Reflect, ops::List};
    /// let mut vec = vec![1, 2, 3].into_boxed_reflect();
    ///
    /// let list: &mut dyn List = vec.reflect_mut().as_list().unwrap();
    /// ```
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Attempts to clone `Self` using reflection.
    ///
    /// This function normally succeeds, except for certain types that
    /// explicitly prohibit cloning, such as live result-set cursors.
    /// If the clone cannot be performed, an appropriate [`ReflectCloneError`]
    /// is returned.
    ///
    /// Note that when cloning successfully, the returned value must have the
    /// same type, otherwise the program may panic in some functions.
    ///
    /// # Example
    ///
    /// ```
    /// # use mirra::Reflect;
    /// let value = vec![1_i32, 2, 3];
    /// let cloned = value.reflect_clone().unwrap();
    /// assert!(cloned.is::<Vec<i32>>())
    /// ```
    ///
    /// It's generally recommended to implement [`Clone`] for your type and
    /// mark it with the `#[reflect(clone)]` attribute, which makes the derive
    /// call [`Clone::clone`] directly:
    ///
    /// ```
    /// # use mirra::derive::Reflect;
    /// #[derive(Reflect, Clone)]
    /// #[reflect(clone)]
    /// struct A { /* ... */ }
    /// ```
    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError>;

    /// Returns a "partial equality" comparison result.
    ///
    /// If the underlying type does not support equality testing, returns
    /// `None`.
    ///
    /// If the type implements [`PartialEq`], consider marking it with the
    /// `#[reflect(partial_eq)]` attribute. When this attribute is present,
    /// the function uses the type's own implementation, and values of a
    /// different type immediately return `Some(false)`.
    ///
    /// ```
    /// use mirra::derive::Reflect;
    ///
    /// #[derive(Reflect, PartialEq)]
    /// #[reflect(partial_eq)]
    /// struct A { /* ... */ }
    /// ```
    #[inline]
    fn reflect_partial_eq(&self, _other: &dyn Reflect) -> Option<bool> {
        // Only inline for default implement
        None
    }

    /// Debug formatter for the value.
    ///
    /// For opaque types, this function will write `"Opaque(type_path)"` by
    /// default. Composite kinds format field by field through their
    /// reflection traits.
    ///
    /// If the type implements [`Debug`](core::fmt::Debug), consider
    /// annotating it with the `#[reflect(debug)]` attribute to make this
    /// function use the [`Debug`](core::fmt::Debug) implementation instead.
    fn reflect_debug(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use crate::impls;
        match self.reflect_ref() {
            ReflectRef::Struct(data) => impls::struct_debug(data, f),
            ReflectRef::List(data) => impls::list_debug(data, f),
            ReflectRef::Map(data) => impls::map_debug(data, f),
            ReflectRef::Option(data) => impls::option_debug(data, f),
            ReflectRef::Opaque(_) => write!(f, "Opaque({})", self.reflect_type_path()),
        }
    }
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mirra::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// assert!(x.is::<i32>());
    /// ```
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts the value to type `T` by reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mirra::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let y = x.downcast_ref::<i32>().unwrap();
    /// assert_eq!(*y, 10);
    /// ```
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts the value to type `T` by mutable reference.
    ///
    /// If the underlying value is not of type `T`, returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mirra::Reflect;
    /// let mut x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let y = x.downcast_mut::<i32>().unwrap();
    /// *y += 2;
    ///
    /// assert_eq!(*y, 12);
    /// ```
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to type `T`, consuming the trait object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mirra::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let x: Box<i32> = x.downcast::<i32>().unwrap();
    /// assert_eq!(*x, 10);
    /// ```
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match <Box<dyn Any>>::downcast::<T>(any) {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type is already checked"),
        }
    }

    /// Downcasts the value to type `T`, unboxing and consuming the trait
    /// object.
    ///
    /// If the underlying value is not of type `T`, returns `Err(self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mirra::Reflect;
    /// let x: Box<dyn Reflect> = 10.into_boxed_reflect();
    ///
    /// let x = x.take::<i32>().unwrap();
    /// assert_eq!(x, 10);
    /// ```
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl core::fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.reflect_debug(f)
    }
}

impl TypePath for dyn Reflect {
    #[inline]
    fn type_path() -> &'static str {
        "dyn mirra::Reflect"
    }
    #[inline]
    fn type_name() -> &'static str {
        "dyn Reflect"
    }
}

impl Typed for dyn Reflect {
    /// This is the [`TypeInfo`] of `dyn Reflect` itself,
    /// not the [`TypeInfo`] of the underlying data!!!!
    ///
    /// Use [`DynamicTyped::reflect_type_info`] to get the underlying
    /// [`TypeInfo`].
    ///
    /// The element layer uses this as the "accepts anything" type for
    /// sources whose value types are unknown until read.
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implement some common methods like `reflect_kind` and `reflect_ref`.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn $crate::Reflect>,
        ) -> Result<(), ::std::boxed::Box<dyn $crate::Reflect>> {
            *self = value.take::<Self>()?;
            Ok(())
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::info::ReflectKind {
            $crate::info::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
