use crate::element::{
    ArrayElement, ArrayIndex, Element, ElementFinder, MapEntryElement, Scope,
};
use crate::info::{ReflectKind, TypeInfo};

// -----------------------------------------------------------------------------
// MapFinder

/// Finder for map kinds.
///
/// The key space is open, so any name resolves to an entry element.
/// Enumeration needs a value and yields the string-keyed entries of the
/// live map.
pub struct MapFinder;

impl ElementFinder for MapFinder {
    fn matches(&self, info: &'static TypeInfo) -> bool {
        info.kind() == ReflectKind::Map
    }

    fn find(&self, scope: &Scope<'_>, name: &str) -> Option<Element> {
        let map_info = scope.type_info().as_map().ok()?;
        Some(Element::new(MapEntryElement::new(
            *map_info.ty(),
            map_info,
            name,
        )))
    }

    fn find_all(&self, scope: &Scope<'_>) -> Vec<Element> {
        let Ok(map_info) = scope.type_info().as_map() else {
            return Vec::new();
        };
        let Some(value) = scope.value() else {
            return Vec::new();
        };
        let Ok(map) = value.reflect_ref().as_map() else {
            return Vec::new();
        };
        map.iter_entries()
            .filter_map(|(key, _)| {
                let key = key.downcast_ref::<String>()?;
                Some(Element::new(MapEntryElement::new(
                    *map_info.ty(),
                    map_info,
                    key.clone(),
                )))
            })
            .collect()
    }
}

// -----------------------------------------------------------------------------
// ArrayFinder

/// Finder for list kinds.
///
/// Resolves `"first"`, `"last"` and decimal index names. Enumeration
/// yields one element per position, from the live length of a value or
/// the static length of a fixed-size array.
pub struct ArrayFinder;

impl ElementFinder for ArrayFinder {
    fn matches(&self, info: &'static TypeInfo) -> bool {
        info.kind() == ReflectKind::List
    }

    fn find(&self, scope: &Scope<'_>, name: &str) -> Option<Element> {
        let list_info = scope.type_info().as_list().ok()?;
        let index = ArrayIndex::parse(name)?;
        Some(Element::new(ArrayElement::new(
            *list_info.ty(),
            list_info,
            index,
        )))
    }

    fn find_all(&self, scope: &Scope<'_>) -> Vec<Element> {
        let Ok(list_info) = scope.type_info().as_list() else {
            return Vec::new();
        };
        let len = match scope.value() {
            Some(value) => match value.reflect_ref().as_list() {
                Ok(list) => list.len(),
                Err(_) => return Vec::new(),
            },
            None => match list_info.len() {
                Some(len) => len,
                None => return Vec::new(),
            },
        };
        (0..len)
            .map(|index| {
                Element::new(ArrayElement::new(
                    *list_info.ty(),
                    list_info,
                    ArrayIndex::Index(index),
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::element::Target;

    #[test]
    fn map_entries_enumerate_from_the_value() {
        let mut scores = std::collections::HashMap::new();
        scores.insert(String::from("ada"), 1_i32);
        scores.insert(String::from("alan"), 2_i32);

        let target = Target::new(scores);
        let entries = crate::elements().in_target(&target);
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn fixed_size_arrays_enumerate_without_a_value() {
        let positions = crate::elements().in_type::<[i32; 3]>();
        assert_eq!(positions.len(), 3);

        let growable = crate::elements().in_type::<Vec<i32>>();
        assert!(growable.is_empty());
    }
}
