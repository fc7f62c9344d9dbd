//! Provide a type registry for non-object information querying.
//!
//! ## Menu
//!
//! - [`TypeTrait`]: A trait representing a capability supported by a type.
//! - [`FromType`]: A trait providing a function to create a `TypeTrait` from a type.
//! - [`TypeMeta`]: A container including a [`TypeInfo`], a [`TypeTrait`] table
//!   and registered [constructors](ConstructorInfo).
//! - [`GetTypeMeta`]: A trait providing a function to create a `TypeMeta` from a type.
//! - [`TypeRegistry`]: A container for storing and operating on `TypeMeta`s.
//! - TypeTraits:
//!     - [`TypeTraitDefault`]: Provide [`Default`] capability for a reflected type.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`] .
//!
//! We use the [`inventory`] crate to implement static registration;
//! not all platforms support it (although major platforms do).
//!
//! [`TypeInfo`]: crate::info::TypeInfo

// -----------------------------------------------------------------------------
// Modules

mod constructor;
mod from_type;
mod traits;
mod type_meta;
mod type_registry;
mod type_trait;

// -----------------------------------------------------------------------------
// Exports

pub use constructor::{ConstructorArgs, ConstructorInfo};
pub use from_type::FromType;
pub use traits::TypeTraitDefault;
pub use type_meta::{GetTypeMeta, TypeMeta};
#[cfg(feature = "auto_register")]
pub use type_registry::AutoRegistration;
pub use type_registry::{TypeRegistry, TypeRegistryArc, global_registry};
pub use type_trait::TypeTrait;
