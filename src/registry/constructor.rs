use core::fmt;
use std::vec::IntoIter;

use crate::Reflect;
use crate::error::HandlingError;
use crate::info::{Type, TypePath};

type InvokeFn =
    Box<dyn Fn(Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, HandlingError> + Send + Sync>;

// -----------------------------------------------------------------------------
// ConstructorInfo

/// A registered way of creating instances of a type from reflected arguments.
///
/// Constructors are registered into the [`TypeRegistry`] by the
/// `#[reflect(constructor = ...)]` derive attribute, or manually through
/// [`TypeMeta::add_constructor`]. The selection API exposes them via
/// [`constructor()`](crate::constructor) and
/// [`constructors()`](crate::constructors).
///
/// # Examples
///
/// ```
/// use mirra::Reflect;
/// use mirra::registry::ConstructorInfo;
///
/// let info = ConstructorInfo::new(|(n,): (i32,)| n.to_string());
///
/// assert_eq!(info.param_len(), 1);
///
/// let value = info.invoke(vec![30_i32.into_boxed_reflect()]).unwrap();
/// assert_eq!(value.take::<String>().unwrap(), "30");
/// ```
///
/// [`TypeRegistry`]: crate::registry::TypeRegistry
/// [`TypeMeta::add_constructor`]: crate::registry::TypeMeta::add_constructor
pub struct ConstructorInfo {
    declaring: Type,
    params: Box<[Type]>,
    invoke: InvokeFn,
}

impl ConstructorInfo {
    /// Creates a constructor description from a plain function.
    ///
    /// The function takes its parameters as a tuple; tuples of up to four
    /// elements are supported.
    pub fn new<T, Args, F>(f: F) -> Self
    where
        T: Reflect + TypePath,
        Args: ConstructorArgs,
        F: Fn(Args) -> T + Send + Sync + 'static,
    {
        Self {
            declaring: Type::of::<T>(),
            params: Args::types(),
            invoke: Box::new(move |args| Ok(Box::new(f(Args::from_boxed(args)?)))),
        }
    }

    /// Returns the [`Type`] this constructor produces.
    #[inline]
    pub const fn declaring(&self) -> Type {
        self.declaring
    }

    /// Returns the parameter types, in call order.
    #[inline]
    pub fn params(&self) -> &[Type] {
        &self.params
    }

    /// Returns the number of parameters.
    #[inline]
    pub fn param_len(&self) -> usize {
        self.params.len()
    }

    /// Returns `true` if the parameter list matches the given types exactly.
    pub fn accepts(&self, types: &[Type]) -> bool {
        self.params.as_ref() == types
    }

    /// Invokes the constructor with boxed arguments.
    ///
    /// Fails with [`HandlingError::MismatchedTypes`] if an argument has the
    /// wrong type, or [`HandlingError::Other`] on an argument count mismatch.
    pub fn invoke(&self, args: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, HandlingError> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorInfo")
            .field("declaring", &self.declaring)
            .field("params", &self.params)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// ConstructorArgs

/// A tuple of reflected values usable as constructor parameters.
///
/// Implemented for tuples of zero to four [`Reflect`] elements.
pub trait ConstructorArgs: Sized {
    /// The parameter types, in call order.
    fn types() -> Box<[Type]>;

    /// Recovers the tuple from a boxed argument list.
    fn from_boxed(args: Vec<Box<dyn Reflect>>) -> Result<Self, HandlingError>;
}

fn check_arity(received: usize, expected: usize) -> Result<(), HandlingError> {
    if received == expected {
        Ok(())
    } else {
        Err(HandlingError::Other(format!(
            "constructor expects {expected} arguments, received {received}"
        )))
    }
}

fn next_arg<T: Reflect + TypePath>(iter: &mut IntoIter<Box<dyn Reflect>>) -> Result<T, HandlingError> {
    let arg = iter.next().expect("arity already checked");
    arg.take::<T>().map_err(|value| HandlingError::MismatchedTypes {
        expected: T::type_path(),
        received: value.reflect_type_path(),
    })
}

macro_rules! impl_constructor_args {
    ($count:literal; $($name:ident),*) => {
        impl<$($name: Reflect + TypePath),*> ConstructorArgs for ($($name,)*) {
            fn types() -> Box<[Type]> {
                Box::new([$(Type::of::<$name>()),*])
            }

            fn from_boxed(args: Vec<Box<dyn Reflect>>) -> Result<Self, HandlingError> {
                check_arity(args.len(), $count)?;
                #[allow(unused_mut, unused_variables)]
                let mut iter = args.into_iter();
                Ok(($(next_arg::<$name>(&mut iter)?,)*))
            }
        }
    };
}

impl_constructor_args!(0;);
impl_constructor_args!(1; A0);
impl_constructor_args!(2; A0, A1);
impl_constructor_args!(3; A0, A1, A2);
impl_constructor_args!(4; A0, A1, A2, A3);
