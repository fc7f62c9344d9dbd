//! Derive macros for `mirra`.
//!
//! See [`Reflect`].
#![cfg_attr(docsrs, feature(doc_cfg))]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

// -----------------------------------------------------------------------------
// Modules

mod codegen;
mod input;

// -----------------------------------------------------------------------------
// Macros

/// # Full Reflection Derivation
///
/// `#[derive(Reflect)]` automatically implements the following traits:
///
/// - `TypePath`
/// - `Typed`
/// - `Struct` (for `struct T { ... }`)
/// - `Reflect`
/// - `GetTypeMeta`
///
/// Unit structs (`struct T;`) are treated as `Opaque` rather than as
/// composite types. Tuple structs, enums and generic types are not
/// supported.
///
/// ## Field Attributes
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Person {
///     #[reflect(base)]
///     entity: Entity,
///     name: String,
///     #[reflect(readonly)]
///     created: u64,
///     #[reflect(skip)]
///     scratch: Vec<u8>,
/// }
/// ```
///
/// - `base`: the field embeds the base struct; hierarchy walks follow it.
///   At most one field may carry it.
/// - `readonly`: the field can be read but never written through an
///   element.
/// - `skip`: the field is invisible to reflection.
///
/// ## Accessors
///
/// `get` and `set` name methods of the type and turn the field into an
/// accessor-backed property:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Gauge {
///     #[reflect(get = level, set = set_level)]
///     level: i32,
/// }
///
/// impl Gauge {
///     fn level(&self) -> i32 { self.level }
///     fn set_level(&mut self, value: i32) { self.level = value.clamp(0, 100); }
/// }
/// ```
///
/// The getter takes `&self` and returns the value type; the setter takes
/// `&mut self` and the value type.
///
/// A property without a backing field is declared at the type level:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(property(name = "label", ty = String, get = label))]
/// struct Tag { /* ... */ }
/// ```
///
/// ## Custom Attributes
///
/// `@EXPR` attaches an attribute instance, keyed by its type, to the type
/// or field it annotates:
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// struct Account {
///     #[reflect(@Range { min: 0.0, max: 100.0 })]
///     balance: f64,
/// }
/// ```
///
/// The flag `annotation` marks the whole type as an annotation, making its
/// members enumerable as read-only elements.
///
/// ## Standard Trait Flags
///
/// The macro cannot detect which standard traits a type implements, so it
/// does not assume their availability. Declare them to optimize the
/// generated code:
///
/// - `clone`: `reflect_clone` calls `Clone::clone` instead of cloning
///   field by field.
/// - `partial_eq`: `reflect_partial_eq` uses the type's own `PartialEq`.
/// - `debug`: `reflect_debug` uses the type's own `Debug`.
/// - `default`: registers [`Default`] support into the type's metadata.
///
/// ## Registration
///
/// `auto_register` submits the type for static collection; a
/// `TypeRegistry::auto_register` call picks every submitted type up. This
/// requires the `auto_register` feature (enabled by default).
///
/// ## Implementation Control
///
/// `type_info = false` skips the `Typed` impl so it can be written by
/// hand; every other generated trait stays in place.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let derive_input = parse_macro_input!(input as DeriveInput);
    match input::ReflectInput::parse(&derive_input) {
        Ok(model) => codegen::expand(&model).into(),
        Err(error) => error.into_compile_error().into(),
    }
}
