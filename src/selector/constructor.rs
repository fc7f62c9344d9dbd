use core::any::TypeId;
use core::fmt;
use std::sync::Arc;

use crate::Reflect;
use crate::error::{HandlingError, ReflectionError};
use crate::info::{Type, Typed};
use crate::registry::{ConstructorArgs, ConstructorInfo, global_registry};
use crate::selector::Predicate;

// -----------------------------------------------------------------------------
// ConstructorMember

/// A selected constructor of a registered type.
#[derive(Clone)]
pub struct ConstructorMember {
    info: Arc<ConstructorInfo>,
}

impl ConstructorMember {
    /// Returns the type this constructor produces.
    #[inline]
    pub fn declaring(&self) -> Type {
        self.info.declaring()
    }

    /// Returns the parameter types, in order.
    #[inline]
    pub fn params(&self) -> &[Type] {
        self.info.params()
    }

    /// Returns the number of parameters.
    #[inline]
    pub fn param_len(&self) -> usize {
        self.info.param_len()
    }

    /// Invokes the constructor with boxed arguments.
    pub fn invoke(&self, args: Vec<Box<dyn Reflect>>) -> Result<Box<dyn Reflect>, HandlingError> {
        self.info.invoke(args)
    }
}

impl fmt::Debug for ConstructorMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.info, f)
    }
}

// -----------------------------------------------------------------------------
// Queries

/// Starts a query for one constructor.
///
/// Without [`taking`](ConstructorQuery::taking), the query only succeeds
/// when the type declares a single constructor.
pub fn constructor() -> ConstructorQuery {
    ConstructorQuery {
        params: None,
        predicate: Predicate::new(),
    }
}

/// Starts a query for all constructors of a type.
pub fn constructors() -> ConstructorsQuery {
    ConstructorsQuery {
        predicate: Predicate::new(),
    }
}

/// A pending single-constructor query. See [`constructor`].
pub struct ConstructorQuery {
    params: Option<Box<[Type]>>,
    predicate: Predicate<ConstructorMember>,
}

impl ConstructorQuery {
    /// Selects the constructor accepting the parameter tuple `Args`.
    pub fn taking<Args: ConstructorArgs>(mut self) -> Self {
        self.params = Some(Args::types());
        self
    }

    /// Keeps only constructors accepted by `predicate`.
    pub fn filter(
        mut self,
        predicate: impl Fn(&ConstructorMember) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate.and(predicate);
        self
    }

    /// Runs the query against a type.
    ///
    /// Fails with [`ReflectionError::AmbiguousMatch`] when no parameter
    /// list was given and more than one constructor matches.
    pub fn in_type<T: Typed>(self) -> Result<Option<ConstructorMember>, ReflectionError> {
        let declaring = *T::type_info().ty();
        self.run(declaring)
    }

    fn run(self, declaring: Type) -> Result<Option<ConstructorMember>, ReflectionError> {
        let mut matches = registered_constructors(declaring.id());
        matches.retain(|member| {
            self.params
                .as_deref()
                .is_none_or(|params| member.info.accepts(params))
                && self.predicate.test(member)
        });
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            count => Err(ReflectionError::AmbiguousMatch {
                container: declaring.path(),
                count,
            }),
        }
    }
}

/// A pending all-constructors query. See [`constructors`].
pub struct ConstructorsQuery {
    predicate: Predicate<ConstructorMember>,
}

impl ConstructorsQuery {
    /// Keeps only constructors accepted by `predicate`.
    pub fn filter(
        mut self,
        predicate: impl Fn(&ConstructorMember) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.predicate.and(predicate);
        self
    }

    /// Runs the query against a type.
    pub fn in_type<T: Typed>(self) -> Vec<ConstructorMember> {
        let mut members = registered_constructors(TypeId::of::<T>());
        members.retain(|member| self.predicate.test(member));
        members
    }
}

fn registered_constructors(type_id: TypeId) -> Vec<ConstructorMember> {
    let registry = global_registry().read();
    match registry.get(type_id) {
        Some(meta) => meta
            .constructors()
            .iter()
            .map(|info| ConstructorMember {
                info: Arc::clone(info),
            })
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{constructor, constructors};
    use crate::derive::Reflect;
    use crate::registry::{ConstructorInfo, global_registry};

    #[derive(Reflect, PartialEq, Debug)]
    #[reflect(partial_eq, debug)]
    struct Point {
        x: i64,
        y: i64,
    }

    fn register_point_constructors() {
        let mut registry = global_registry().write();
        registry.register::<Point>();
        let meta = registry.get_mut(core::any::TypeId::of::<Point>()).unwrap();
        if meta.constructors().is_empty() {
            meta.add_constructor(ConstructorInfo::new(|()| Point { x: 0, y: 0 }));
            meta.add_constructor(ConstructorInfo::new(|(x, y): (i64, i64)| Point { x, y }));
        }
    }

    #[test]
    fn parameter_lists_disambiguate() {
        register_point_constructors();

        let by_pair = constructor()
            .taking::<(i64, i64)>()
            .in_type::<Point>()
            .unwrap()
            .unwrap();
        let point = by_pair
            .invoke(vec![Box::new(3_i64), Box::new(4_i64)])
            .unwrap();
        assert_eq!(point.take::<Point>().unwrap(), Point { x: 3, y: 4 });

        assert!(constructor().in_type::<Point>().is_err());
    }

    #[test]
    fn all_constructors_enumerate() {
        register_point_constructors();
        assert_eq!(constructors().in_type::<Point>().len(), 2);
    }
}
