use core::fmt;

use crate::Reflect;
use crate::ops::ReflectRef;
use crate::ops::{List, Map, Optional, Struct};

/// A function use for implementing [`Reflect::reflect_partial_eq`].
///
/// # Rules
///
/// 1. If `other` is not `Struct`, return `Some(false)`.
/// 2. If `self.field_len` != `other.field_len`, return `Some(false)`.
/// 3. Call `reflect_partial_eq` for all fields.
///    Return `Some(false)` if some field names do not match.
///    Return `None` or `Some(false)` if some fields return `None` or `Some(false)`.
/// 4. Return `Some(true)`.
///
/// # Example
///
/// ```ignore
///
/// pub struct Foo { /* ... */ }
///
/// impl Struct for Foo{ /* ... */ }
/// impl Reflect for Foo {
///     // ...
///     fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
///         struct_partial_eq(self, other)
///     }
///     // ...
/// }
/// ```
#[inline(never)]
pub fn struct_partial_eq(x: &dyn Struct, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Struct(y) = y.reflect_ref() else {
        return Some(false);
    };

    if x.field_len() != y.field_len() {
        return Some(false);
    }

    for (idx, y_field) in y.iter_fields().enumerate() {
        let name = y.name_at(idx).unwrap();
        if let Some(x_field) = x.field(name) {
            let result = x_field.reflect_partial_eq(y_field);
            if result != Some(true) {
                return result;
            }
        } else {
            return Some(false);
        }
    }
    Some(true)
}

/// A function use for implementing [`Reflect::reflect_debug`].
///
/// # Example
///
/// ```ignore
///
/// pub struct Foo { /* ... */ }
///
/// impl Struct for Foo{ /* ... */ }
/// impl Reflect for Foo {
///     // ...
///     fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         struct_debug(self, f)
///     }
///     // ...
/// }
/// ```
#[inline(never)]
pub fn struct_debug(dyn_struct: &dyn Struct, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_struct(dyn_struct.reflect_type_path());

    for (index, field) in dyn_struct.iter_fields().enumerate() {
        debug.field(
            dyn_struct.name_at(index).unwrap(),
            &field as &dyn fmt::Debug,
        );
    }
    debug.finish()
}

/// A function use for implementing [`Reflect::reflect_partial_eq`].
///
/// # Rules
///
/// 1. If `other` is not `List`, return `Some(false)`.
/// 2. Return `Some(false)` if `len` mismatched.
/// 3. Compare all items.
/// 4. Return `Some(true)`.
#[inline(never)]
pub fn list_partial_eq(x: &dyn List, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::List(y) = y.reflect_ref() else {
        return Some(false);
    };

    if x.len() != y.len() {
        return Some(false);
    }

    for (x_value, y_value) in x.iter_items().zip(y.iter_items()) {
        let result = x_value.reflect_partial_eq(y_value);
        if result != Some(true) {
            return result;
        }
    }

    Some(true)
}

/// A function use for implementing [`Reflect::reflect_debug`].
#[inline(never)]
pub fn list_debug(dyn_list: &dyn List, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_list();
    for item in dyn_list.iter_items() {
        debug.entry(&item as &dyn fmt::Debug);
    }
    debug.finish()
}

/// A function use for implementing [`Reflect::reflect_partial_eq`].
///
/// # Rules
///
/// 1. If `other` is not `Map`, return `Some(false)`.
/// 2. Return `Some(false)` if `len` mismatched.
/// 3. Compare all key-value pairs.
/// 4. Return `Some(true)`.
#[inline(never)]
pub fn map_partial_eq(x: &dyn Map, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Map(y) = y.reflect_ref() else {
        return Some(false);
    };

    if x.len() != y.len() {
        return Some(false);
    }

    for (key, val) in x.iter_entries() {
        if let Some(y_val) = y.get(key) {
            let result = val.reflect_partial_eq(y_val);
            if result != Some(true) {
                return result;
            }
        } else {
            return Some(false);
        }
    }

    Some(true)
}

/// A function use for implementing [`Reflect::reflect_debug`].
#[inline(never)]
pub fn map_debug(dyn_map: &dyn Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_map();
    for (key, value) in dyn_map.iter_entries() {
        debug.entry(&key as &dyn fmt::Debug, &value as &dyn fmt::Debug);
    }
    debug.finish()
}

/// A function use for implementing [`Reflect::reflect_partial_eq`].
///
/// # Rules
///
/// 1. If `other` is not `Option`, return `Some(false)`.
/// 2. Two absent values are equal.
/// 3. Otherwise compare the wrapped values.
#[inline(never)]
pub fn option_partial_eq(x: &dyn Optional, y: &dyn Reflect) -> Option<bool> {
    let ReflectRef::Option(y) = y.reflect_ref() else {
        return Some(false);
    };

    match (x.get(), y.get()) {
        (None, None) => Some(true),
        (Some(x_value), Some(y_value)) => x_value.reflect_partial_eq(y_value),
        _ => Some(false),
    }
}

/// A function use for implementing [`Reflect::reflect_debug`].
#[inline(never)]
pub fn option_debug(dyn_option: &dyn Optional, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match dyn_option.get() {
        Some(value) => f.debug_tuple("Some").field(&value as &dyn fmt::Debug).finish(),
        None => f.write_str("None"),
    }
}
