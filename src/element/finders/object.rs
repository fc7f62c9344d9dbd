use crate::element::cache::{ElementMap, ElementTable, ElementsCache};
use crate::element::{
    Element, ElementFinder, FieldElement, InheritedElement, MergedElement, PropertyElement, Scope,
};
use crate::info::{ReflectKind, TypeInfo};

/// The fallback finder: fields and properties of plain structs.
///
/// Same-named field/property pairs are merged, members of the base chain
/// are folded in behind their `#[reflect(base)]` hops, and derived
/// members shadow base members of the same name. The resulting table is
/// memoized per declaring type.
pub struct ObjectFinder;

impl ObjectFinder {
    fn element_map(info: &'static TypeInfo) -> ElementMap {
        ElementsCache::global().get_or_populate(info.ty().id(), || build_element_map(info))
    }
}

impl ElementFinder for ObjectFinder {
    fn matches(&self, info: &'static TypeInfo) -> bool {
        info.kind() == ReflectKind::Struct
    }

    fn find(&self, scope: &Scope<'_>, name: &str) -> Option<Element> {
        Self::element_map(scope.type_info()).get(name).cloned()
    }

    fn find_all(&self, scope: &Scope<'_>) -> Vec<Element> {
        Self::element_map(scope.type_info()).elements().to_vec()
    }
}

fn build_element_map(info: &'static TypeInfo) -> ElementTable {
    let mut map = ElementTable::new();
    let Ok(struct_info) = info.as_struct() else {
        return map;
    };
    let declaring = *struct_info.ty();

    for field in struct_info.iter() {
        let element = match struct_info.property(field.name()) {
            Some(property) => Element::new(MergedElement::new(
                Some(FieldElement::new(declaring, field)),
                PropertyElement::new(declaring, property),
            )),
            None => Element::new(FieldElement::new(declaring, field)),
        };
        map.insert(field.name().to_string(), element);
    }

    for property in struct_info.properties() {
        if map.contains(property.name()) {
            continue;
        }
        map.insert(
            property.name().to_string(),
            Element::new(PropertyElement::new(declaring, property)),
        );
    }

    if let Some(base) = struct_info.base_field() {
        let base_info = base.type_info();
        if base_info.kind() == ReflectKind::Struct {
            // The base table already folds in its own base chain.
            let base_map = ObjectFinder::element_map(base_info);
            for inner in base_map.elements() {
                if map.contains(inner.name()) {
                    continue;
                }
                map.insert(
                    inner.name().to_string(),
                    Element::new(InheritedElement::new(
                        declaring,
                        Box::new([base]),
                        inner.clone(),
                    )),
                );
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;
    use std::sync::Arc;

    use crate::derive::Reflect;
    use crate::element::cache::ElementsCache;

    #[derive(Reflect)]
    struct Shape {
        sides: u32,
        label: String,
    }

    #[test]
    fn enumeration_follows_declaration_order() {
        let names: Vec<String> = crate::elements()
            .in_type::<Shape>()
            .iter()
            .map(|element| element.name().to_string())
            .collect();
        assert_eq!(names, ["sides", "label"]);
    }

    #[test]
    fn enumeration_is_cached_per_type() {
        let first = crate::elements().in_type::<Shape>();
        assert_eq!(first.len(), 2);

        // The enumeration above populated the table; later lookups reuse it.
        let cached = ElementsCache::global()
            .get_or_populate(TypeId::of::<Shape>(), || panic!("table must be reused"));
        let again = ElementsCache::global()
            .get_or_populate(TypeId::of::<Shape>(), || panic!("table must be reused"));

        assert_eq!(cached.len(), 2);
        assert!(Arc::ptr_eq(&cached, &again));
    }
}
