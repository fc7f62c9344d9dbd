use crate::element::{
    Element, ElementFinder, PropertiesEntryElement, ResourceBundleElement,
    ResultSetColumnElement, Scope,
};
use crate::info::TypeInfo;
use crate::sources::{Properties, ResourceBundle, Rows};

// -----------------------------------------------------------------------------
// PropertiesFinder

/// Finder for [`Properties`] tables. The key space is open.
pub struct PropertiesFinder;

impl ElementFinder for PropertiesFinder {
    fn matches(&self, info: &'static TypeInfo) -> bool {
        info.type_is::<Properties>()
    }

    fn find(&self, _scope: &Scope<'_>, name: &str) -> Option<Element> {
        Some(Element::new(PropertiesEntryElement::new(name)))
    }

    fn find_all(&self, scope: &Scope<'_>) -> Vec<Element> {
        let Some(table) = scope.value().and_then(|v| v.downcast_ref::<Properties>()) else {
            return Vec::new();
        };
        table
            .keys()
            .map(|key| Element::new(PropertiesEntryElement::new(key)))
            .collect()
    }
}

// -----------------------------------------------------------------------------
// ResourceBundleFinder

/// Finder for [`ResourceBundle`] tables. Entries are read-only.
pub struct ResourceBundleFinder;

impl ElementFinder for ResourceBundleFinder {
    fn matches(&self, info: &'static TypeInfo) -> bool {
        info.type_is::<ResourceBundle>()
    }

    fn find(&self, _scope: &Scope<'_>, name: &str) -> Option<Element> {
        Some(Element::new(ResourceBundleElement::new(name)))
    }

    fn find_all(&self, scope: &Scope<'_>) -> Vec<Element> {
        let Some(bundle) = scope.value().and_then(|v| v.downcast_ref::<ResourceBundle>())
        else {
            return Vec::new();
        };
        bundle
            .keys()
            .map(|key| Element::new(ResourceBundleElement::new(key)))
            .collect()
    }
}

// -----------------------------------------------------------------------------
// ResultSetFinder

/// Finder for [`Rows`] cursors.
///
/// Columns are only known from a live cursor, so type-scoped lookups
/// resolve nothing.
pub struct ResultSetFinder;

impl ElementFinder for ResultSetFinder {
    fn matches(&self, info: &'static TypeInfo) -> bool {
        info.type_is::<Rows>()
    }

    fn find(&self, scope: &Scope<'_>, name: &str) -> Option<Element> {
        let rows = scope.value()?.downcast_ref::<Rows>()?;
        rows.column_names()
            .iter()
            .any(|column| column == name)
            .then(|| Element::new(ResultSetColumnElement::new(name)))
    }

    fn find_all(&self, scope: &Scope<'_>) -> Vec<Element> {
        let Some(rows) = scope.value().and_then(|v| v.downcast_ref::<Rows>()) else {
            return Vec::new();
        };
        rows.column_names()
            .iter()
            .map(|column| Element::new(ResultSetColumnElement::new(column.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::element::Target;
    use crate::sources::Properties;

    #[test]
    fn properties_enumerate_in_insertion_order() {
        let mut login = Properties::new();
        login.set("user", "admin");
        login.set("password", "x");

        let target = Target::new(login);
        let entries = crate::elements().in_target(&target);

        let names: Vec<_> = entries.iter().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["user", "password"]);
    }

    #[test]
    fn unknown_result_set_columns_do_not_resolve() {
        use crate::sources::fixtures::StringRows;
        use crate::sources::Rows;

        let target = Target::new(Rows::new(StringRows::new(&["id"], &[])));
        assert!(crate::element("id").in_target(&target).is_some());
        assert!(crate::element("missing").in_target(&target).is_none());
    }
}
