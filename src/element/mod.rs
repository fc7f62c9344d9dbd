//! Elements: uniform handles to the members of heterogeneous sources.
//!
//! An [`Element`] names one member of a container type and knows how to
//! read and write it, whatever the container is: a struct field, an
//! accessor pair, a map or [`Properties`](crate::sources::Properties)
//! entry, a list position, a result-set column, an annotation member, or
//! a dotted chain of any of these.
//!
//! ## Menu
//!
//! - [`element`] / [`elements`]: the query entry points.
//! - [`Element`] / [`ElementOps`] / [`ElementId`]: the handle, its
//!   behavior contract and its structural identity.
//! - [`Target`]: a shared owner of a value that elements bind to.
//! - [`ElementFinder`] / [`Scope`]: the resolution layer.
//! - [`ElementsCache`]: per-type memoization of element tables.
//!
//! # Examples
//!
//! ```
//! use mirra::derive::Reflect;
//! use mirra::element::Target;
//!
//! #[derive(Reflect)]
//! struct Server {
//!     port: u16,
//! }
//!
//! let target = Target::new(Server { port: 8080 });
//! let port = mirra::element("port").in_target(&target).unwrap();
//! assert_eq!(port.value_as::<u16>().unwrap(), 8080);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod annotation;
mod array;
mod cache;
mod column;
mod element;
mod field;
mod finder;
mod finders;
mod map_entry;
mod merged;
mod nested;
mod property;
mod specific;
mod string_table;
mod target;

// -----------------------------------------------------------------------------
// Exports

pub use annotation::AnnotationMemberElement;
pub use array::{ArrayElement, ArrayIndex};
pub use cache::{ElementMap, ElementTable, ElementsCache};
pub use column::ResultSetColumnElement;
pub use element::{Element, ElementId, ElementKey, ElementOps};
pub use field::{FieldElement, InheritedElement};
#[cfg(feature = "auto_register")]
pub use finder::FinderRegistration;
pub use finder::{ElementFinder, Scope};
pub use map_entry::MapEntryElement;
pub use merged::MergedElement;
pub use nested::NestedElement;
pub use property::PropertyElement;
pub use specific::SpecificElement;
pub use string_table::{PropertiesEntryElement, ResourceBundleElement};
pub use target::Target;

pub(crate) use finder::{find_all_elements, find_element};

use crate::Reflect;
use crate::info::{TypeInfo, Typed};
use crate::ops::ReflectRef;

// -----------------------------------------------------------------------------
// Queries

/// Starts a single-element query.
///
/// A dotted `name` resolves as a nested path. The query runs when a scope
/// is supplied with [`ElementQuery::in_type`], [`ElementQuery::in_info`]
/// or [`ElementQuery::in_target`].
pub fn element(name: impl Into<String>) -> ElementQuery {
    ElementQuery { name: name.into() }
}

/// Starts a query for all elements of a scope.
pub fn elements() -> ElementsQuery {
    ElementsQuery {
        filters: Vec::new(),
    }
}

/// A pending single-element query. See [`element`].
pub struct ElementQuery {
    name: String,
}

impl ElementQuery {
    /// Resolves against a type, yielding an unbound element.
    pub fn in_type<T: Typed>(self) -> Option<Element> {
        self.in_info(T::type_info())
    }

    /// Resolves against explicit type information.
    pub fn in_info(self, info: &'static TypeInfo) -> Option<Element> {
        resolve_in_info(info, &self.name)
    }

    /// Resolves against a bound target, yielding a specific element.
    pub fn in_target(self, target: &Target) -> Option<Element> {
        resolve_in_target(target, &self.name)
    }
}

/// A pending all-elements query. See [`elements`].
pub struct ElementsQuery {
    filters: Vec<Box<dyn Fn(&Element) -> bool>>,
}

impl ElementsQuery {
    /// Keeps only elements accepted by `predicate`.
    pub fn filter(mut self, predicate: impl Fn(&Element) -> bool + 'static) -> Self {
        self.filters.push(Box::new(predicate));
        self
    }

    /// Keeps only elements carrying an attribute of type `A`.
    pub fn annotated_with<A: Reflect>(self) -> Self {
        self.filter(|element| element.is_annotated_with::<A>())
    }

    /// Enumerates against a type, yielding unbound elements.
    pub fn in_type<T: Typed>(self) -> Vec<Element> {
        self.in_info(T::type_info())
    }

    /// Enumerates against explicit type information.
    pub fn in_info(self, info: &'static TypeInfo) -> Vec<Element> {
        let all = finder::find_all_elements(&Scope::Type(info));
        self.apply(all)
    }

    /// Enumerates against a bound target, yielding specific elements.
    pub fn in_target(self, target: &Target) -> Vec<Element> {
        let all = target.view(|source| finder::find_all_elements(&Scope::Value(source)));
        self.apply(all)
            .into_iter()
            .map(|element| element.bind(target))
            .collect()
    }

    fn apply(&self, all: Vec<Element>) -> Vec<Element> {
        all.into_iter()
            .filter(|element| self.filters.iter().all(|predicate| predicate(element)))
            .collect()
    }
}

// -----------------------------------------------------------------------------
// Resolution

/// The declared type a path hop continues on, with `Option` layers peeled.
fn declared_scope_info(element: &Element) -> &'static TypeInfo {
    let mut info = element.type_info();
    while let Ok(option) = info.as_option() {
        info = option.some_info();
    }
    info
}

/// Reads a hop value for scope advancement.
///
/// `None` marks degradation to the declared type: the hop is unreadable,
/// the read failed, or an `Option` layer was `None`.
fn read_snapshot(element: &Element, source: &dyn Reflect) -> Option<Box<dyn Reflect>> {
    if !element.is_readable() {
        return None;
    }
    let mut value = element.read_from(source).ok()?;
    loop {
        match value.reflect_ref() {
            ReflectRef::Option(option) => {
                let inner = option.get()?.reflect_clone().ok()?;
                value = inner;
            }
            _ => return Some(value),
        }
    }
}

fn resolve_in_info(info: &'static TypeInfo, name: &str) -> Option<Element> {
    if !name.contains('.') {
        return finder::find_element(&Scope::Type(info), name);
    }
    let mut scope = info;
    let mut hops = Vec::new();
    for segment in name.split('.') {
        let element = finder::find_element(&Scope::Type(scope), segment)?;
        scope = declared_scope_info(&element);
        hops.push(element);
    }
    Some(Element::new(NestedElement::new(hops)))
}

fn resolve_in_target(target: &Target, name: &str) -> Option<Element> {
    if !name.contains('.') {
        let element = target.view(|source| finder::find_element(&Scope::Value(source), name))?;
        return Some(element.bind(target));
    }

    let mut segments = name.split('.');
    let first = segments.next()?;
    let (element, snapshot) = target.view(|source| {
        let element = finder::find_element(&Scope::Value(source), first)?;
        let snapshot = read_snapshot(&element, source);
        Some((element, snapshot))
    })?;

    let mut info = match &snapshot {
        Some(value) => value.reflect_type_info(),
        None => declared_scope_info(&element),
    };
    let mut value = snapshot;
    let mut hops = vec![element];

    for segment in segments {
        let element = match &value {
            Some(scope) => finder::find_element(&Scope::Value(scope.as_ref()), segment)?,
            None => finder::find_element(&Scope::Type(info), segment)?,
        };
        value = match &value {
            Some(scope) => read_snapshot(&element, scope.as_ref()),
            None => None,
        };
        info = match &value {
            Some(next) => next.reflect_type_info(),
            None => declared_scope_info(&element),
        };
        hops.push(element);
    }

    Some(Element::new(NestedElement::new(hops)).bind(target))
}

#[cfg(test)]
mod tests {
    use crate::derive::Reflect;
    use crate::element::Target;

    #[derive(Reflect)]
    struct Engine {
        rpm: u32,
    }

    #[derive(Reflect)]
    struct Car {
        engine: Option<Engine>,
        plate: String,
    }

    #[test]
    fn dotted_lookup_degrades_through_absent_options() {
        let target = Target::new(Car {
            engine: None,
            plate: "x".into(),
        });

        // The intermediate value is absent; resolution continues on the
        // declared type and only reading fails.
        let rpm = crate::element("engine.rpm").in_target(&target).unwrap();
        assert!(rpm.is_specific());
        assert!(rpm.value().is_err());
    }

    #[test]
    fn missing_segments_resolve_to_none() {
        assert!(crate::element("wheels").in_type::<Car>().is_none());
        assert!(crate::element("engine.speed").in_type::<Car>().is_none());
    }

    #[test]
    fn filters_narrow_enumeration() {
        let all = crate::elements().in_type::<Car>();
        let named = crate::elements()
            .filter(|element| element.name() == "plate")
            .in_type::<Car>();

        assert_eq!(all.len(), 2);
        assert_eq!(named.len(), 1);
    }
}
