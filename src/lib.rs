#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Generated code names this crate `mirra`; make that path valid here too.
extern crate self as mirra;

// -----------------------------------------------------------------------------
// Modules

pub mod copy;
pub mod element;
pub mod error;
pub mod impls;
pub mod info;
pub mod ops;
pub mod reflection;
pub mod registry;
pub mod selector;
pub mod sources;
pub mod validation;

pub(crate) mod util;

/// The `#[derive(Reflect)]` macro.
pub mod derive {
    pub use mirra_derive::Reflect;
}

#[doc(hidden)]
pub mod __macro_exports {
    #[cfg(feature = "auto_register")]
    pub use inventory;
}

// -----------------------------------------------------------------------------
// Exports

pub use copy::copy;
pub use element::{element, elements};
pub use reflection::Reflect;
pub use validation::validate;
