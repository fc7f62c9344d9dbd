use crate::Reflect;
use crate::element::{ElementId, ElementKey, ElementOps};
use crate::error::HandlingError;
use crate::info::{CustomAttributes, PropertyInfo, Type, TypeInfo};

/// An element backed by an accessor pair.
///
/// Reads invoke the getter, writes invoke the setter. Properties are
/// computed values, so they cannot hand out references into their
/// container and are never projectable.
pub struct PropertyElement {
    declaring: Type,
    property: &'static PropertyInfo,
}

impl PropertyElement {
    /// Creates a property element for a property of `declaring`.
    pub const fn new(declaring: Type, property: &'static PropertyInfo) -> Self {
        Self {
            declaring,
            property,
        }
    }

    /// Returns the backing property description.
    #[inline]
    pub const fn property(&self) -> &'static PropertyInfo {
        self.property
    }

    fn not_projectable(&self) -> HandlingError {
        HandlingError::NotProjectable {
            element: self.property.name().to_string(),
        }
    }
}

impl ElementOps for PropertyElement {
    fn name(&self) -> &str {
        self.property.name()
    }

    fn type_info(&self) -> &'static TypeInfo {
        self.property.type_info()
    }

    fn declaring_type(&self) -> Type {
        self.declaring
    }

    fn attributes(&self) -> &CustomAttributes {
        self.property.custom_attributes()
    }

    fn is_readable(&self) -> bool {
        self.property.is_readable()
    }

    fn is_writable(&self) -> bool {
        self.property.is_writable()
    }

    fn is_projectable(&self) -> bool {
        false
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        let getter = self
            .property
            .getter()
            .ok_or_else(|| HandlingError::Unreadable {
                element: self.property.name().to_string(),
                container: self.declaring.path(),
            })?;
        getter(source).ok_or_else(|| HandlingError::MismatchedTypes {
            expected: self.declaring.path(),
            received: source.reflect_type_path(),
        })
    }

    fn write(
        &self,
        source: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        let setter = self
            .property
            .setter()
            .ok_or_else(|| HandlingError::Unwritable {
                element: self.property.name().to_string(),
                container: self.declaring.path(),
            })?;
        setter(source, value).map_err(|value| HandlingError::MismatchedTypes {
            expected: self.property.type_info().ty().path(),
            received: value.reflect_type_path(),
        })
    }

    fn access<'r>(&self, _source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        Err(self.not_projectable())
    }

    fn access_mut<'r>(
        &self,
        _source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        Err(self.not_projectable())
    }

    fn id(&self) -> ElementId {
        ElementId::new(
            self.declaring.id(),
            "property",
            ElementKey::Name(self.property.name().to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::derive::Reflect;
    use crate::element::Target;

    #[derive(Reflect)]
    struct Gauge {
        #[reflect(get = level, set = set_level)]
        level: i32,
    }

    impl Gauge {
        fn level(&self) -> i32 {
            self.level
        }

        fn set_level(&mut self, value: i32) {
            self.level = value.clamp(0, 100);
        }
    }

    #[test]
    fn setter_logic_applies_on_write() {
        let target = Target::new(Gauge { level: 50 });
        let level = crate::element("level").in_target(&target).unwrap();

        level.set(250_i32).unwrap();
        assert_eq!(level.value_as::<i32>().unwrap(), 100);

        level.set(-3_i32).unwrap();
        assert_eq!(level.value_as::<i32>().unwrap(), 0);
    }

    #[test]
    fn wrong_receiver_is_rejected() {
        let gauge = Gauge { level: 50 };
        let element = crate::element("level").in_type::<Gauge>().unwrap();

        assert!(element.read_from(&gauge).is_ok());
        assert!(element.read_from(&10_i32).is_err());
    }
}
