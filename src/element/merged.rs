use crate::Reflect;
use crate::element::{ElementId, ElementOps, FieldElement, PropertyElement};
use crate::error::HandlingError;
use crate::info::{CustomAttributes, Type, TypeInfo};

/// An element merging an accessor pair with its backing field.
///
/// Reads prefer the getter and fall back to the field; writes prefer the
/// setter and fall back to the field. Identity follows the property, so a
/// merged element equals the plain property element of the same name.
pub struct MergedElement {
    field: Option<FieldElement>,
    property: PropertyElement,
}

impl MergedElement {
    /// Merges a property with its backing field, if one exists.
    pub const fn new(field: Option<FieldElement>, property: PropertyElement) -> Self {
        Self { field, property }
    }

    fn not_projectable(&self) -> HandlingError {
        HandlingError::NotProjectable {
            element: self.property.name().to_string(),
        }
    }
}

impl ElementOps for MergedElement {
    fn name(&self) -> &str {
        self.property.name()
    }

    fn type_info(&self) -> &'static TypeInfo {
        self.property.type_info()
    }

    fn declaring_type(&self) -> Type {
        self.property.declaring_type()
    }

    /// Answers from the property, falling back to the backing field:
    /// `#[reflect(@..)]` attributes of an accessor field are recorded on
    /// the field, not on the property derived from it.
    fn attributes(&self) -> &CustomAttributes {
        let attributes = self.property.attributes();
        if attributes.is_empty()
            && let Some(field) = &self.field
        {
            return field.attributes();
        }
        attributes
    }

    fn is_readable(&self) -> bool {
        self.property.is_readable() || self.field.is_some()
    }

    fn is_writable(&self) -> bool {
        self.property.is_writable()
            || self.field.as_ref().is_some_and(FieldElement::is_writable)
    }

    fn is_projectable(&self) -> bool {
        self.field.is_some()
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        if self.property.is_readable() {
            return self.property.read(source);
        }
        match &self.field {
            Some(field) => field.read(source),
            None => Err(HandlingError::Unreadable {
                element: self.property.name().to_string(),
                container: self.property.declaring_type().path(),
            }),
        }
    }

    fn write(
        &self,
        source: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        if self.property.is_writable() {
            return self.property.write(source, value);
        }
        match &self.field {
            Some(field) => field.write(source, value),
            None => Err(HandlingError::Unwritable {
                element: self.property.name().to_string(),
                container: self.property.declaring_type().path(),
            }),
        }
    }

    fn access<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        match &self.field {
            Some(field) => field.access(source),
            None => Err(self.not_projectable()),
        }
    }

    fn access_mut<'r>(
        &self,
        source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        match &self.field {
            Some(field) => field.access_mut(source),
            None => Err(self.not_projectable()),
        }
    }

    fn id(&self) -> ElementId {
        self.property.id()
    }
}

#[cfg(test)]
mod tests {
    use crate::derive::Reflect;
    use crate::element::Target;

    #[derive(Reflect)]
    #[reflect(property(name = "label", ty = String, get = label))]
    struct Tag {
        raw: String,
    }

    impl Tag {
        fn label(&self) -> String {
            self.raw.to_uppercase()
        }
    }

    #[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
    #[reflect(clone)]
    struct Audited;

    #[derive(Reflect)]
    struct Door {
        #[reflect(get = open, set = set_open)]
        #[reflect(@Audited)]
        open: bool,
    }

    impl Door {
        fn open(&self) -> bool {
            self.open
        }

        fn set_open(&mut self, value: bool) {
            self.open = value;
        }
    }

    #[test]
    fn fieldless_property_is_read_only_and_not_projectable() {
        let target = Target::new(Tag { raw: "news".into() });
        let label = crate::element("label").in_target(&target).unwrap();

        assert!(label.is_readable());
        assert!(!label.is_writable());
        assert_eq!(label.value_as::<String>().unwrap(), "NEWS");
        assert!(label.set(String::from("x")).is_err());
    }

    #[test]
    fn merged_element_round_trips_through_accessors() {
        let target = Target::new(Door { open: false });
        let open = crate::element("open").in_target(&target).unwrap();

        open.set(true).unwrap();
        assert!(open.value_as::<bool>().unwrap());
    }

    #[derive(Reflect)]
    struct Meter {
        #[reflect(set = set_level)]
        level: i32,
    }

    impl Meter {
        fn set_level(&mut self, value: i32) {
            self.level = value + 15;
        }
    }

    #[test]
    fn setter_only_field_writes_through_the_setter_and_reads_raw() {
        let target = Target::new(Meter { level: 0 });
        let level = crate::element("level").in_target(&target).unwrap();

        assert!(level.is_readable());
        assert!(level.is_writable());

        // The setter runs on the write; the read falls back to the field
        // and sees what the setter stored.
        level.set(10_i32).unwrap();
        assert_eq!(level.value_as::<i32>().unwrap(), 25);
    }

    #[test]
    fn field_attributes_stay_visible_through_the_merged_view() {
        let target = Target::new(Door { open: false });
        let open = crate::element("open").in_target(&target).unwrap();

        assert!(open.is_annotated_with::<Audited>());
    }
}
