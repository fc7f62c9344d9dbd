use crate::element::cache::{ElementMap, ElementTable, ElementsCache};
use crate::element::{AnnotationMemberElement, Element, ElementFinder, Scope};
use crate::info::{Annotation, TypeInfo};

/// Finder for annotation types.
///
/// Matches struct types carrying the [`Annotation`] marker and exposes
/// their fields as read-only member elements. Tables are memoized per
/// annotation type.
pub struct AnnotationFinder;

impl AnnotationFinder {
    fn element_map(info: &'static TypeInfo) -> ElementMap {
        ElementsCache::global().get_or_populate(info.ty().id(), || {
            let mut map = ElementTable::new();
            let Ok(struct_info) = info.as_struct() else {
                return map;
            };
            let declaring = *struct_info.ty();
            for field in struct_info.iter() {
                map.insert(
                    field.name().to_string(),
                    Element::new(AnnotationMemberElement::new(declaring, field)),
                );
            }
            map
        })
    }
}

impl ElementFinder for AnnotationFinder {
    fn matches(&self, info: &'static TypeInfo) -> bool {
        info.has_attribute::<Annotation>()
    }

    fn find(&self, scope: &Scope<'_>, name: &str) -> Option<Element> {
        Self::element_map(scope.type_info()).get(name).cloned()
    }

    fn find_all(&self, scope: &Scope<'_>) -> Vec<Element> {
        Self::element_map(scope.type_info()).elements().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use crate::derive::Reflect;

    #[derive(Reflect)]
    #[reflect(annotation)]
    struct Cached {
        capacity: usize,
        eager: bool,
    }

    #[test]
    fn members_enumerate_read_only() {
        let members = crate::elements().in_type::<Cached>();
        assert_eq!(members.len(), 2);
        assert!(members.iter().all(|member| !member.is_writable()));
    }
}
