use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to compile-time type information.
///
/// Automatically implemented by [`#[derive(Reflect)]`](crate::derive::Reflect),
/// allowing access to type information without an instance of the type.
///
/// # Examples
///
/// ```
/// use mirra::{derive::Reflect, info::{Typed, TypeInfo}};
///
/// #[derive(Reflect)]
/// struct A { /* ... */ }
///
/// let info: &'static TypeInfo = <A as Typed>::type_info();
/// ```
///
/// # Manually Impl
///
/// It is not recommended to implement this manually, but
/// [`NonGenericTypeInfoCell`] and [`GenericTypeInfoCell`] simplify it when
/// necessary:
///
/// ```
/// use mirra::info::{Typed, TypeInfo, StructInfo, NamedField, TypePath};
/// use mirra::impls::NonGenericTypeInfoCell;
/// # use mirra::derive::Reflect;
///
/// #[derive(Reflect)]
/// #[reflect(type_info = false)]
/// struct NonGenericStruct {
///     foo: usize,
///     bar: f32,
/// }
///
/// impl Typed for NonGenericStruct {
///     fn type_info() -> &'static TypeInfo {
///         static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
///         CELL.get_or_init(|| TypeInfo::Struct(
///             StructInfo::new::<Self>(&[
///                 NamedField::new::<usize>("foo"),
///                 NamedField::new::<f32>("bar"),
///             ])
///         ))
///     }
/// }
/// ```
///
/// [`NonGenericTypeInfoCell`]: crate::impls::NonGenericTypeInfoCell
/// [`GenericTypeInfoCell`]: crate::impls::GenericTypeInfoCell
pub trait Typed: TypePath {
    /// A static accessor to compile-time type information.
    ///
    /// Note: Use [`DynamicTyped`] for dynamic dispatch.
    fn type_info() -> &'static TypeInfo;
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Provide dynamic dispatch for types that implement [`Typed`].
///
/// Auto impl for all types that implemented [`Typed`].
pub trait DynamicTyped {
    /// Returns the [`TypeInfo`] of the underlying type.
    ///
    /// When you hold a `dyn Reflect` object, use this method to get its type
    /// information.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mirra::{derive::Reflect, Reflect, info::DynamicTyped};
    /// #[derive(Reflect)]
    /// struct A { x: u64 }
    ///
    /// let a = Box::new(A { x: 1 }) as Box<dyn Reflect>;
    /// let info = a.reflect_type_info();
    /// ```
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
