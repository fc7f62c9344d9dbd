use std::sync::OnceLock;

use crate::Reflect;
use crate::element::Element;
use crate::element::finders::{
    AnnotationFinder, ArrayFinder, MapFinder, ObjectFinder, PropertiesFinder,
    ResourceBundleFinder, ResultSetFinder,
};
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Scope

/// What an element lookup runs against.
///
/// Lookups against a type produce unbound elements from metadata alone;
/// lookups against a value can additionally consult the value itself,
/// which sources with open or data-driven key spaces need.
pub enum Scope<'a> {
    /// A type, without a value.
    Type(&'static TypeInfo),
    /// A borrowed value.
    Value(&'a dyn Reflect),
}

impl<'a> Scope<'a> {
    /// Returns the [`TypeInfo`] of the scope.
    pub fn type_info(&self) -> &'static TypeInfo {
        match self {
            Self::Type(info) => info,
            Self::Value(value) => value.reflect_type_info(),
        }
    }

    /// Returns the scope value, when there is one.
    pub fn value(&self) -> Option<&'a dyn Reflect> {
        match self {
            Self::Type(_) => None,
            Self::Value(value) => Some(*value),
        }
    }
}

// -----------------------------------------------------------------------------
// ElementFinder

/// A strategy producing elements for one family of declaring types.
///
/// Finders are consulted in a fixed order and the first whose
/// [`matches`](Self::matches) accepts the scope type handles the whole
/// lookup. Custom finders registered through [`FinderRegistration`] are
/// consulted before the built-in ones.
pub trait ElementFinder: Send + Sync + 'static {
    /// Whether this finder handles the given declaring type.
    fn matches(&self, info: &'static TypeInfo) -> bool;

    /// Resolves one element by name.
    fn find(&self, scope: &Scope<'_>, name: &str) -> Option<Element>;

    /// Enumerates the elements of the scope.
    fn find_all(&self, scope: &Scope<'_>) -> Vec<Element>;
}

/// An [`ElementFinder`] contributed via `inventory`.
///
/// ```ignore
/// inventory::submit!(FinderRegistration {
///     finder: || Box::new(MyFinder),
/// });
/// ```
#[cfg(feature = "auto_register")]
pub struct FinderRegistration {
    /// Builds the finder to install.
    pub finder: fn() -> Box<dyn ElementFinder>,
}

#[cfg(feature = "auto_register")]
inventory::collect!(FinderRegistration);

// -----------------------------------------------------------------------------
// Dispatch

fn finders() -> &'static [Box<dyn ElementFinder>] {
    static FINDERS: OnceLock<Vec<Box<dyn ElementFinder>>> = OnceLock::new();
    FINDERS
        .get_or_init(|| {
            let mut finders: Vec<Box<dyn ElementFinder>> = Vec::new();
            #[cfg(feature = "auto_register")]
            for registration in inventory::iter::<FinderRegistration> {
                finders.push((registration.finder)());
            }
            finders.push(Box::new(AnnotationFinder));
            finders.push(Box::new(PropertiesFinder));
            finders.push(Box::new(ResourceBundleFinder));
            finders.push(Box::new(ResultSetFinder));
            finders.push(Box::new(MapFinder));
            finders.push(Box::new(ArrayFinder));
            finders.push(Box::new(ObjectFinder));
            finders
        })
        .as_slice()
}

pub(crate) fn find_element(scope: &Scope<'_>, name: &str) -> Option<Element> {
    let info = scope.type_info();
    let finder = finders().iter().find(|finder| finder.matches(info))?;
    finder.find(scope, name)
}

pub(crate) fn find_all_elements(scope: &Scope<'_>) -> Vec<Element> {
    let info = scope.type_info();
    match finders().iter().find(|finder| finder.matches(info)) {
        Some(finder) => finder.find_all(scope),
        None => Vec::new(),
    }
}
