//! Fluent selection of type members.
//!
//! Queries start from a free function, are narrowed with filters, and
//! run when a scope is supplied:
//!
//! ```
//! use mirra::derive::Reflect;
//! use mirra::selector::{field, fields};
//!
//! #[derive(Reflect)]
//! struct Config {
//!     #[reflect(readonly)]
//!     version: u32,
//!     host: String,
//! }
//!
//! let host = field("host").of_type::<String>().in_type::<Config>().unwrap();
//! assert_eq!(host.name(), "host");
//!
//! let writable = fields().writable().in_type::<Config>();
//! assert_eq!(writable.len(), 1);
//! ```
//!
//! ## Menu
//!
//! - [`field`] / [`fields`]: struct fields, hierarchy aware.
//! - [`method`] / [`methods`] / [`getter_of`] / [`setter_of`]: accessor
//!   methods declared by properties.
//! - [`constructor`] / [`constructors`]: registered constructors.
//! - [`hierarchy_of`]: the base chain of a type.

// -----------------------------------------------------------------------------
// Modules

mod constructor;
mod field;
mod hierarchy;
mod method;
mod predicate;

// -----------------------------------------------------------------------------
// Exports

pub use constructor::{
    ConstructorMember, ConstructorQuery, ConstructorsQuery, constructor, constructors,
};
pub use field::{FieldMember, FieldQuery, FieldsQuery, field, fields};
pub use hierarchy::{Hierarchy, hierarchy_of};
pub use method::{
    AccessorKind, MethodMember, MethodQuery, MethodsQuery, getter_of, method, methods, setter_of,
};
pub use predicate::Predicate;
