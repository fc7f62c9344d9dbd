//! Value sources with their own element shapes.
//!
//! ## Menu
//!
//! - [`Properties`]: an ordered, writable string table.
//! - [`ResourceBundle`]: a named, read-only string table.
//! - [`ResultSet`] / [`Rows`]: a forward-only cursor over tabular data.

// -----------------------------------------------------------------------------
// Modules

mod properties;
mod resource_bundle;
mod result_set;

// -----------------------------------------------------------------------------
// Exports

pub use properties::Properties;
pub use resource_bundle::ResourceBundle;
pub use result_set::{ResultSet, Rows};

#[cfg(test)]
pub(crate) use result_set::fixtures;
