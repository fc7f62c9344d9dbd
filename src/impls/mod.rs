//! Reflection implementations for standard types, plus the helpers that
//! manual [`Reflect`](crate::Reflect) implementations build on.
//!
//! ## Menu
//!
//! - [`NonGenericTypeInfoCell`] / [`GenericTypeInfoCell`] /
//!   [`GenericTypePathCell`]: static storage for type information.
//! - `*_partial_eq` / `*_debug`: kind-generic implementations of
//!   [`Reflect::reflect_partial_eq`] and [`Reflect::reflect_debug`].
//! - Implementations for primitives, strings, `Vec<T>`, `[T; N]`,
//!   `HashMap`, `BTreeMap` and `Option<T>`.
//!
//! [`Reflect::reflect_partial_eq`]: crate::Reflect::reflect_partial_eq
//! [`Reflect::reflect_debug`]: crate::Reflect::reflect_debug

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod common;
mod list;
mod map;
mod opaque;
mod option;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use opaque::impl_opaque_reflect_fns;

pub use cell::{
    GenericTypeCell, GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeCell,
    NonGenericTypeInfoCell,
};
pub use common::{
    list_debug, list_partial_eq, map_debug, map_partial_eq, option_debug, option_partial_eq,
    struct_debug, struct_partial_eq,
};

/// Build a `String` from parts.
///
/// Used with [`GenericTypePathCell`] to assemble type paths of generic types.
#[inline]
pub fn concat(parts: &[&str]) -> String {
    let len = parts.iter().map(|part| part.len()).sum();
    let mut out = String::with_capacity(len);
    for part in parts {
        out.push_str(part);
    }
    out
}
