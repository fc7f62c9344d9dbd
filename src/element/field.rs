use crate::Reflect;
use crate::element::{Element, ElementId, ElementKey, ElementOps};
use crate::error::HandlingError;
use crate::info::{CustomAttributes, NamedField, Type, TypeInfo};

// -----------------------------------------------------------------------------
// FieldElement

/// An element backed by a named struct field.
///
/// Reads clone the field value; writes replace it. Fields marked
/// `#[reflect(readonly)]` reject writes with [`HandlingError::Unwritable`].
pub struct FieldElement {
    declaring: Type,
    field: &'static NamedField,
}

impl FieldElement {
    /// Creates a field element for a field of `declaring`.
    pub const fn new(declaring: Type, field: &'static NamedField) -> Self {
        Self { declaring, field }
    }

    /// Returns the backing field description.
    #[inline]
    pub const fn field(&self) -> &'static NamedField {
        self.field
    }

    fn wrong_container(&self, source: &dyn Reflect) -> HandlingError {
        HandlingError::MismatchedTypes {
            expected: self.declaring.path(),
            received: source.reflect_type_path(),
        }
    }
}

impl ElementOps for FieldElement {
    fn name(&self) -> &str {
        self.field.name()
    }

    fn type_info(&self) -> &'static TypeInfo {
        self.field.type_info()
    }

    fn declaring_type(&self) -> Type {
        self.declaring
    }

    fn attributes(&self) -> &CustomAttributes {
        self.field.custom_attributes()
    }

    fn is_writable(&self) -> bool {
        !self.field.is_readonly()
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        Ok(self.access(source)?.reflect_clone()?)
    }

    fn write(
        &self,
        source: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        if self.field.is_readonly() {
            return Err(HandlingError::Unwritable {
                element: self.field.name().to_string(),
                container: self.declaring.path(),
            });
        }
        let slot = self.access_mut(source)?;
        slot.set(value).map_err(|value| HandlingError::MismatchedTypes {
            expected: self.field.type_info().ty().path(),
            received: value.reflect_type_path(),
        })
    }

    fn access<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        let container = source
            .reflect_ref()
            .as_struct()
            .map_err(|_| self.wrong_container(source))?;
        container
            .field(self.field.name())
            .ok_or_else(|| HandlingError::MissingValue {
                element: self.field.name().to_string(),
            })
    }

    fn access_mut<'r>(
        &self,
        source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        let element = self.field.name().to_string();
        let container = match source.reflect_mut().as_struct() {
            Ok(container) => container,
            Err(_) => {
                return Err(HandlingError::MissingValue { element });
            }
        };
        container
            .field_mut(self.field.name())
            .ok_or(HandlingError::MissingValue { element })
    }

    fn id(&self) -> ElementId {
        ElementId::new(
            self.declaring.id(),
            "field",
            ElementKey::Name(self.field.name().to_string()),
        )
    }
}

// -----------------------------------------------------------------------------
// InheritedElement

/// An element declared by a base type, reached through `#[reflect(base)]`
/// field hops from a derived type.
///
/// Keeps the identity of the underlying element, so an inherited element
/// equals the element selected directly on the base type.
pub struct InheritedElement {
    declaring: Type,
    bases: Box<[&'static NamedField]>,
    inner: Element,
}

impl InheritedElement {
    /// Wraps `inner` behind a chain of base field hops.
    pub fn new(declaring: Type, bases: Box<[&'static NamedField]>, inner: Element) -> Self {
        Self {
            declaring,
            bases,
            inner,
        }
    }

    fn descend<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        let mut current = source;
        for base in &self.bases {
            let container = current.reflect_ref().as_struct().map_err(|_| {
                HandlingError::MismatchedTypes {
                    expected: self.declaring.path(),
                    received: source.reflect_type_path(),
                }
            })?;
            current = container
                .field(base.name())
                .ok_or_else(|| HandlingError::MissingValue {
                    element: base.name().to_string(),
                })?;
        }
        Ok(current)
    }

    fn descend_mut<'r>(
        &self,
        source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        let mut current = source;
        for base in &self.bases {
            let element = base.name().to_string();
            let container = match current.reflect_mut().as_struct() {
                Ok(container) => container,
                Err(_) => return Err(HandlingError::MissingValue { element }),
            };
            current = container
                .field_mut(base.name())
                .ok_or(HandlingError::MissingValue { element })?;
        }
        Ok(current)
    }
}

impl ElementOps for InheritedElement {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn type_info(&self) -> &'static TypeInfo {
        self.inner.type_info()
    }

    fn declaring_type(&self) -> Type {
        self.declaring
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

    fn is_projectable(&self) -> bool {
        self.inner.ops().is_projectable()
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        self.inner.ops().read(self.descend(source)?)
    }

    fn write(
        &self,
        source: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        self.inner.ops().write(self.descend_mut(source)?, value)
    }

    fn access<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        self.inner.ops().access(self.descend(source)?)
    }

    fn access_mut<'r>(
        &self,
        source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        self.inner.ops().access_mut(self.descend_mut(source)?)
    }

    fn id(&self) -> ElementId {
        // Same identity as the base type's own element.
        self.inner.id()
    }
}

#[cfg(test)]
mod tests {
    use crate::derive::Reflect;
    use crate::element::Target;

    #[derive(Reflect)]
    struct Entity {
        id: u64,
    }

    #[derive(Reflect)]
    struct Person {
        #[reflect(base)]
        entity: Entity,
        name: String,
        #[reflect(readonly)]
        created: u64,
    }

    #[test]
    fn field_read_and_write() {
        let target = Target::new(Person {
            entity: Entity { id: 1 },
            name: "ada".into(),
            created: 7,
        });

        let name = crate::element("name").in_target(&target).unwrap();
        assert_eq!(name.value_as::<String>().unwrap(), "ada");

        name.set(String::from("grace")).unwrap();
        assert_eq!(name.value_as::<String>().unwrap(), "grace");
    }

    #[test]
    fn readonly_field_rejects_writes() {
        let target = Target::new(Person {
            entity: Entity { id: 1 },
            name: "ada".into(),
            created: 7,
        });

        let created = crate::element("created").in_target(&target).unwrap();
        assert!(!created.is_writable());
        assert!(created.set(9_u64).is_err());
        assert_eq!(created.value_as::<u64>().unwrap(), 7);
    }

    #[test]
    fn inherited_field_matches_base_declaration() {
        let inherited = crate::element("id").in_type::<Person>().unwrap();
        let direct = crate::element("id").in_type::<Entity>().unwrap();
        assert_eq!(inherited, direct);

        let target = Target::new(Person {
            entity: Entity { id: 42 },
            name: "ada".into(),
            created: 7,
        });
        assert_eq!(inherited.bind(&target).value_as::<u64>().unwrap(), 42);
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        let target = Target::new(Person {
            entity: Entity { id: 1 },
            name: "ada".into(),
            created: 7,
        });

        let name = crate::element("name").in_target(&target).unwrap();
        assert!(name.set(10_i32).is_err());
    }
}
