use crate::Reflect;
use crate::element::{ElementId, ElementKey, ElementOps, FieldElement};
use crate::error::HandlingError;
use crate::info::{CustomAttributes, NamedField, Type, TypeInfo};

/// An element backed by a member of an annotation type.
///
/// Annotation values are configuration and treated as immutable once
/// attached, so member elements are readable only.
pub struct AnnotationMemberElement {
    field: FieldElement,
}

impl AnnotationMemberElement {
    /// Creates a member element for a field of the annotation `declaring`.
    pub const fn new(declaring: Type, field: &'static NamedField) -> Self {
        Self {
            field: FieldElement::new(declaring, field),
        }
    }
}

impl ElementOps for AnnotationMemberElement {
    fn name(&self) -> &str {
        self.field.name()
    }

    fn type_info(&self) -> &'static TypeInfo {
        self.field.type_info()
    }

    fn declaring_type(&self) -> Type {
        self.field.declaring_type()
    }

    fn attributes(&self) -> &CustomAttributes {
        self.field.attributes()
    }

    fn is_writable(&self) -> bool {
        false
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        self.field.read(source)
    }

    fn write(
        &self,
        _source: &mut dyn Reflect,
        _value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        Err(HandlingError::Unwritable {
            element: self.field.name().to_string(),
            container: self.field.declaring_type().path(),
        })
    }

    fn access<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        self.field.access(source)
    }

    fn access_mut<'r>(
        &self,
        _source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        Err(HandlingError::Unwritable {
            element: self.field.name().to_string(),
            container: self.field.declaring_type().path(),
        })
    }

    fn id(&self) -> ElementId {
        ElementId::new(
            self.field.declaring_type().id(),
            "annotation",
            ElementKey::Name(self.field.name().to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::derive::Reflect;
    use crate::element::Target;

    #[derive(Reflect)]
    #[reflect(annotation)]
    struct Timeout {
        seconds: u32,
    }

    #[test]
    fn members_read_but_never_write() {
        let target = Target::new(Timeout { seconds: 30 });
        let seconds = crate::element("seconds").in_target(&target).unwrap();

        assert!(seconds.is_readable());
        assert!(!seconds.is_writable());
        assert_eq!(seconds.value_as::<u32>().unwrap(), 30);
        assert!(seconds.set(60_u32).is_err());
    }
}
