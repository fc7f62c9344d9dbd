//! Built-in element finders, one per family of declaring types.

mod annotation;
mod containers;
mod object;
mod sources;

pub use annotation::AnnotationFinder;
pub use containers::{ArrayFinder, MapFinder};
pub use object::ObjectFinder;
pub use sources::{PropertiesFinder, ResourceBundleFinder, ResultSetFinder};
