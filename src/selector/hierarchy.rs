use crate::info::{ReflectKind, TypeInfo};

/// Iterates a type and its base chain, most derived first.
///
/// The chain follows `#[reflect(base)]` fields; a non-struct base ends
/// the walk.
///
/// # Examples
///
/// ```
/// use mirra::derive::Reflect;
/// use mirra::info::Typed;
/// use mirra::selector::hierarchy_of;
///
/// #[derive(Reflect)]
/// struct Entity {
///     id: u64,
/// }
///
/// #[derive(Reflect)]
/// struct Person {
///     #[reflect(base)]
///     entity: Entity,
///     name: String,
/// }
///
/// let names: Vec<_> = hierarchy_of(Person::type_info())
///     .map(|info| info.type_name())
///     .collect();
/// assert_eq!(names, ["Person", "Entity"]);
/// ```
pub fn hierarchy_of(info: &'static TypeInfo) -> Hierarchy {
    Hierarchy { next: Some(info) }
}

/// Iterator returned by [`hierarchy_of`].
pub struct Hierarchy {
    next: Option<&'static TypeInfo>,
}

impl Iterator for Hierarchy {
    type Item = &'static TypeInfo;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current
            .as_struct()
            .ok()
            .and_then(|struct_info| struct_info.base_field())
            .map(|base| base.type_info())
            .filter(|info| info.kind() == ReflectKind::Struct);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::hierarchy_of;
    use crate::derive::Reflect;
    use crate::info::Typed;

    #[derive(Reflect)]
    struct A {
        value: i32,
    }

    #[derive(Reflect)]
    struct B {
        #[reflect(base)]
        a: A,
    }

    #[derive(Reflect)]
    struct C {
        #[reflect(base)]
        b: B,
    }

    #[test]
    fn walks_the_whole_base_chain() {
        let names: Vec<_> = hierarchy_of(C::type_info())
            .map(|info| info.type_name())
            .collect();
        assert_eq!(names, ["C", "B", "A"]);
    }

    #[test]
    fn plain_types_yield_only_themselves() {
        assert_eq!(hierarchy_of(i32::type_info()).count(), 1);
    }
}
