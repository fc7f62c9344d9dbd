//! Type-erased operations over reflected values.
//!
//! Each [kind](crate::info::ReflectKind) of type exposes its shape through a
//! dedicated trait:
//!
//! | Trait | Kind |
//! | :--- | :--- |
//! | [`Struct`] | named-field structs |
//! | [`List`] | sequences |
//! | [`Map`] | key-value containers |
//! | [`Optional`] | possibly-absent values |
//!
//! [`ReflectRef`] and [`ReflectMut`] dispatch a `dyn Reflect` into the
//! matching trait object.

mod clone_error;
mod kind;
mod list_ops;
mod map_ops;
mod option_ops;
mod struct_ops;

pub use clone_error::ReflectCloneError;
pub use kind::{ReflectMut, ReflectRef};
pub use list_ops::{List, ListItemIter};
pub use map_ops::Map;
pub use option_ops::Optional;
pub use struct_ops::{Struct, StructFieldIter};
