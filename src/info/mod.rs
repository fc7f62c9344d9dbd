//! Compile-time type information.
//!
//! ## Menu
//!
//! - [`TypePath`]: A trait for obtaining type names, without prefix `::`.
//! - [`DynamicTypePath`]: Provide dynamic dispatch for `TypePath`.
//! - [`TypePathTable`]: Function pointers for a single type's `TypePath` implementation.
//! - [`Type`]: A struct containing a `TypeId` and a `TypePathTable`.
//! - [`CustomAttributes`]: An attribute container, keyed by attribute type.
//! - [`Annotation`]: The marker attribute identifying annotation types.
//! - [`TypeInfo`]: An enum over the per-kind info structs:
//!     - [`StructInfo`]: field names, field/property info, base field and attributes.
//!     - [`ListInfo`]: item type info, optional fixed length.
//!     - [`MapInfo`]: key and value type info.
//!     - [`OptionInfo`]: wrapped type info.
//!     - [`OpaqueInfo`]: internally invisible types (e.g. `String`).
//! - Member info:
//!     - [`NamedField`]: field name, type info, flags and attributes.
//!     - [`PropertyInfo`]: accessor-backed property metadata.
//! - [`ReflectKind`]: the kind discriminator (`Struct`, `List`, ...).
//! - [`Typed`] / [`DynamicTyped`]: accessors for `TypeInfo`.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod field_info;
mod list_info;
mod map_info;
mod opaque_info;
mod option_info;
mod property_info;
mod struct_info;
mod type_info;
mod type_path;
mod typed;

// -----------------------------------------------------------------------------
// Internal API

use attributes::{impl_custom_attributes_fn, impl_with_custom_attributes};

pub(crate) use type_path::impl_type_fn;

// -----------------------------------------------------------------------------
// Exports

pub use attributes::{Annotation, CustomAttributes};
pub use field_info::{FieldFlags, NamedField};
pub use list_info::ListInfo;
pub use map_info::MapInfo;
pub use opaque_info::OpaqueInfo;
pub use option_info::OptionInfo;
pub use property_info::{PropertyGetter, PropertyInfo, PropertySetter};
pub use struct_info::StructInfo;
pub use type_info::{ReflectKind, ReflectKindError, TypeInfo};
pub use type_path::{DynamicTypePath, Type, TypePath, TypePathTable};
pub use typed::{DynamicTyped, Typed};
