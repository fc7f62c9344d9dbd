use core::any::Any;
use core::fmt;

use crate::error::ReflectionError;
use crate::info::{PropertyInfo, Type, TypeInfo, Typed};
use crate::selector::{Predicate, hierarchy_of};

// -----------------------------------------------------------------------------
// MethodMember

/// Which side of an accessor pair a method implements.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AccessorKind {
    /// Arity 0, returns the property value.
    Getter,
    /// Arity 1, takes the property value.
    Setter,
}

/// A selected accessor method together with its declaring type.
///
/// Methods enter the reflection surface through the properties that
/// declare them, so every selectable method is the getter or setter of
/// some property.
#[derive(Clone, Copy)]
pub struct MethodMember {
    declaring: Type,
    property: &'static PropertyInfo,
    kind: AccessorKind,
}

impl MethodMember {
    const fn new(declaring: Type, property: &'static PropertyInfo, kind: AccessorKind) -> Self {
        Self {
            declaring,
            property,
            kind,
        }
    }

    /// Returns the method name.
    pub fn name(&self) -> &'static str {
        let name = match self.kind {
            AccessorKind::Getter => self.property.getter_name(),
            AccessorKind::Setter => self.property.setter_name(),
        };
        name.expect("members are only built for declared accessors")
    }

    /// Returns the name of the property this method accesses.
    #[inline]
    pub const fn property_name(&self) -> &'static str {
        self.property.name()
    }

    /// Returns the property declaring this method.
    #[inline]
    pub const fn property(&self) -> &'static PropertyInfo {
        self.property
    }

    /// Returns the type declaring this method.
    #[inline]
    pub const fn declaring(&self) -> Type {
        self.declaring
    }

    /// Returns which side of the accessor pair this method is.
    #[inline]
    pub const fn kind(&self) -> AccessorKind {
        self.kind
    }

    /// Returns `true` if the property value is of type `T`.
    #[inline]
    pub fn value_type_is<T: Any>(&self) -> bool {
        self.property.type_is::<T>()
    }
}

impl fmt::Debug for MethodMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodMember")
            .field("name", &self.name())
            .field("kind", &self.kind)
            .field("declaring", &self.declaring)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Queries

/// How a method query names its subject.
enum MethodName {
    /// By the method's own name.
    Method(String),
    /// By the name of the property the method accesses.
    Property(String),
}

/// Starts a query for one accessor method by its method name.
pub fn method(name: impl Into<String>) -> MethodQuery {
    MethodQuery {
        name: MethodName::Method(name.into()),
        kind: None,
        predicate: Predicate::new(),
    }
}

/// Starts a query for the getter of the named property.
pub fn getter_of(property: impl Into<String>) -> MethodQuery {
    MethodQuery {
        name: MethodName::Property(property.into()),
        kind: Some(AccessorKind::Getter),
        predicate: Predicate::new(),
    }
}

/// Starts a query for the setter of the named property.
pub fn setter_of(property: impl Into<String>) -> MethodQuery {
    MethodQuery {
        name: MethodName::Property(property.into()),
        kind: Some(AccessorKind::Setter),
        predicate: Predicate::new(),
    }
}

/// Starts a query for all accessor methods of a type.
pub fn methods() -> MethodsQuery {
    MethodsQuery {
        kind: None,
        predicate: Predicate::new(),
    }
}

/// A pending single-method query. See [`method`].
pub struct MethodQuery {
    name: MethodName,
    kind: Option<AccessorKind>,
    predicate: Predicate<MethodMember>,
}

impl MethodQuery {
    /// Keeps only methods accepted by `predicate`.
    pub fn filter(
        mut self,
        predicate: impl Fn(&MethodMember) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate.and(predicate);
        self
    }

    /// Keeps only getters returning `T`.
    pub fn returning<T: Any>(mut self) -> Self {
        self.kind = Some(AccessorKind::Getter);
        self.filter(|member| member.value_type_is::<T>())
    }

    /// Keeps only setters taking `T`.
    pub fn taking<T: Any>(mut self) -> Self {
        self.kind = Some(AccessorKind::Setter);
        self.filter(|member| member.value_type_is::<T>())
    }

    /// Runs the query against a type.
    ///
    /// Fails with [`ReflectionError::AmbiguousMatch`] when more than one
    /// method matches.
    pub fn in_type<T: Typed>(self) -> Result<Option<MethodMember>, ReflectionError> {
        self.in_info(T::type_info())
    }

    /// Runs the query against explicit type information.
    pub fn in_info(self, info: &'static TypeInfo) -> Result<Option<MethodMember>, ReflectionError> {
        let mut matches = collect_methods(info, self.kind, &self.predicate);
        matches.retain(|member| match &self.name {
            MethodName::Method(name) => member.name() == name,
            MethodName::Property(name) => member.property_name() == name,
        });
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0])),
            count => Err(ReflectionError::AmbiguousMatch {
                container: info.type_path(),
                count,
            }),
        }
    }
}

/// A pending all-methods query. See [`methods`].
pub struct MethodsQuery {
    kind: Option<AccessorKind>,
    predicate: Predicate<MethodMember>,
}

impl MethodsQuery {
    /// Keeps only methods accepted by `predicate`.
    pub fn filter(
        mut self,
        predicate: impl Fn(&MethodMember) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate.and(predicate);
        self
    }

    /// Keeps only getters.
    pub fn getters(mut self) -> Self {
        self.kind = Some(AccessorKind::Getter);
        self
    }

    /// Keeps only setters.
    pub fn setters(mut self) -> Self {
        self.kind = Some(AccessorKind::Setter);
        self
    }

    /// Runs the query against a type.
    pub fn in_type<T: Typed>(self) -> Vec<MethodMember> {
        self.in_info(T::type_info())
    }

    /// Runs the query against explicit type information.
    pub fn in_info(self, info: &'static TypeInfo) -> Vec<MethodMember> {
        collect_methods(info, self.kind, &self.predicate)
    }
}

fn collect_methods(
    info: &'static TypeInfo,
    kind: Option<AccessorKind>,
    predicate: &Predicate<MethodMember>,
) -> Vec<MethodMember> {
    let mut members = Vec::new();
    for info in hierarchy_of(info) {
        let Ok(struct_info) = info.as_struct() else {
            continue;
        };
        let declaring = *struct_info.ty();
        for property in struct_info.properties() {
            for accessor in [AccessorKind::Getter, AccessorKind::Setter] {
                let declared = match accessor {
                    AccessorKind::Getter => property.getter_name().is_some(),
                    AccessorKind::Setter => property.setter_name().is_some(),
                };
                if !declared || kind.is_some_and(|kind| kind != accessor) {
                    continue;
                }
                let member = MethodMember::new(declaring, property, accessor);
                let shadowed = members.iter().any(|existing: &MethodMember| {
                    existing.property_name() == member.property_name()
                        && existing.kind() == member.kind()
                });
                if !shadowed && predicate.test(&member) {
                    members.push(member);
                }
            }
        }
    }
    members
}

#[cfg(test)]
mod tests {
    use super::{AccessorKind, getter_of, method, methods, setter_of};
    use crate::derive::Reflect;

    #[derive(Reflect)]
    struct Gauge {
        #[reflect(get = level, set = set_level)]
        level: i32,
        #[reflect(get = peak)]
        peak: i32,
    }

    impl Gauge {
        fn level(&self) -> i32 {
            self.level
        }

        fn set_level(&mut self, value: i32) {
            self.level = value;
        }

        fn peak(&self) -> i32 {
            self.peak
        }
    }

    #[test]
    fn methods_resolve_by_name() {
        let member = method("set_level").in_type::<Gauge>().unwrap().unwrap();
        assert_eq!(member.kind(), AccessorKind::Setter);
        assert_eq!(member.property_name(), "level");

        assert!(method("missing").in_type::<Gauge>().unwrap().is_none());
    }

    #[test]
    fn accessors_resolve_by_property() {
        let getter = getter_of("level").in_type::<Gauge>().unwrap().unwrap();
        assert_eq!(getter.name(), "level");

        assert!(setter_of("peak").in_type::<Gauge>().unwrap().is_none());
    }

    #[test]
    fn kind_and_type_filters_apply() {
        let getters = methods().getters().in_type::<Gauge>();
        assert_eq!(getters.len(), 2);

        let setters = methods().setters().in_type::<Gauge>();
        assert_eq!(setters.len(), 1);

        assert!(
            method("level")
                .returning::<i32>()
                .in_type::<Gauge>()
                .unwrap()
                .is_some()
        );
        assert!(
            method("level")
                .returning::<String>()
                .in_type::<Gauge>()
                .unwrap()
                .is_none()
        );
    }
}
