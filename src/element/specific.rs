use crate::Reflect;
use crate::element::{Element, ElementId, ElementOps, Target};
use crate::error::HandlingError;
use crate::info::{CustomAttributes, Type, TypeInfo};

/// An element bound to a concrete [`Target`].
///
/// Decorates an unbound element with a target, leaving identity and all
/// access behavior untouched. Produced by [`Element::bind`] and by target
/// based queries.
pub struct SpecificElement {
    inner: Element,
    target: Target,
}

impl SpecificElement {
    pub(crate) fn new(inner: Element, target: Target) -> Self {
        Self { inner, target }
    }
}

impl ElementOps for SpecificElement {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn type_info(&self) -> &'static TypeInfo {
        self.inner.type_info()
    }

    fn declaring_type(&self) -> Type {
        self.inner.declaring_type()
    }

    fn attributes(&self) -> &CustomAttributes {
        self.inner.attributes()
    }

    fn is_readable(&self) -> bool {
        self.inner.is_readable()
    }

    fn is_writable(&self) -> bool {
        self.inner.is_writable()
    }

    fn is_specific(&self) -> bool {
        true
    }

    fn target(&self) -> Option<&Target> {
        Some(&self.target)
    }

    fn is_projectable(&self) -> bool {
        self.inner.ops().is_projectable()
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        self.inner.ops().read(source)
    }

    fn write(
        &self,
        source: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        self.inner.ops().write(source, value)
    }

    fn access<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        self.inner.ops().access(source)
    }

    fn access_mut<'r>(
        &self,
        source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        self.inner.ops().access_mut(source)
    }

    fn id(&self) -> ElementId {
        self.inner.id()
    }

    fn as_unbound(&self) -> Option<Element> {
        Some(self.inner.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::derive::Reflect;
    use crate::element::Target;

    #[derive(Reflect)]
    struct Account {
        balance: i64,
    }

    #[test]
    fn bound_element_equals_unbound() {
        let unbound = crate::element("balance").in_type::<Account>().unwrap();
        let target = Target::new(Account { balance: 12 });
        let bound = unbound.bind(&target);

        assert_eq!(unbound, bound);
        assert!(!unbound.is_specific());
        assert!(bound.is_specific());
    }

    #[test]
    fn non_specific_value_access_fails() {
        let unbound = crate::element("balance").in_type::<Account>().unwrap();
        assert!(unbound.value().is_err());
    }

    #[test]
    fn rebind_replaces_target() {
        let first = Target::new(Account { balance: 1 });
        let second = Target::new(Account { balance: 2 });

        let element = crate::element("balance").in_target(&first).unwrap();
        let rebound = element.bind(&second);

        assert_eq!(element.value_as::<i64>().unwrap(), 1);
        assert_eq!(rebound.value_as::<i64>().unwrap(), 2);
        assert!(rebound.target().unwrap().ptr_eq(&second));
    }
}
