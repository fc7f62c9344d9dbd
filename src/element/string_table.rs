use crate::Reflect;
use crate::element::{ElementId, ElementKey, ElementOps};
use crate::error::HandlingError;
use crate::info::{Type, TypeInfo, TypePath, Typed};
use crate::ops::Map;
use crate::sources::{Properties, ResourceBundle};

// -----------------------------------------------------------------------------
// PropertiesEntryElement

/// An element backed by a [`Properties`] entry.
///
/// Like map entries, the key space is open: reads of absent keys fail
/// with a missing value and writes create the entry.
pub struct PropertiesEntryElement {
    key: String,
}

impl PropertiesEntryElement {
    /// Creates an element for the entry `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn missing(&self) -> HandlingError {
        HandlingError::MissingValue {
            element: self.key.clone(),
        }
    }

    fn as_table<'r>(&self, source: &'r dyn Reflect) -> Result<&'r Properties, HandlingError> {
        source
            .downcast_ref::<Properties>()
            .ok_or_else(|| HandlingError::MismatchedTypes {
                expected: Properties::type_path(),
                received: source.reflect_type_path(),
            })
    }
}

impl ElementOps for PropertiesEntryElement {
    fn name(&self) -> &str {
        &self.key
    }

    fn type_info(&self) -> &'static TypeInfo {
        String::type_info()
    }

    fn declaring_type(&self) -> Type {
        Type::of::<Properties>()
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        let table = self.as_table(source)?;
        let value = table.get(&self.key).ok_or_else(|| self.missing())?;
        Ok(Box::new(value.to_string()))
    }

    fn write(
        &self,
        source: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        let received = source.reflect_type_path();
        let table = source
            .downcast_mut::<Properties>()
            .ok_or(HandlingError::MismatchedTypes {
                expected: Properties::type_path(),
                received,
            })?;
        let value = value.take::<String>().map_err(|value| {
            HandlingError::MismatchedTypes {
                expected: String::type_path(),
                received: value.reflect_type_path(),
            }
        })?;
        table.set(self.key.clone(), value);
        Ok(())
    }

    fn access<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        let table = self.as_table(source)?;
        Map::get(table, &self.key as &dyn Reflect).ok_or_else(|| self.missing())
    }

    fn access_mut<'r>(
        &self,
        source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        let received = source.reflect_type_path();
        let table = source
            .downcast_mut::<Properties>()
            .ok_or(HandlingError::MismatchedTypes {
                expected: Properties::type_path(),
                received,
            })?;
        Map::get_mut(table, &self.key as &dyn Reflect).ok_or_else(|| self.missing())
    }

    fn id(&self) -> ElementId {
        ElementId::new(
            Type::of::<Properties>().id(),
            "properties",
            ElementKey::Name(self.key.clone()),
        )
    }
}

// -----------------------------------------------------------------------------
// ResourceBundleElement

/// An element backed by a [`ResourceBundle`] entry. Never writable.
pub struct ResourceBundleElement {
    key: String,
}

impl ResourceBundleElement {
    /// Creates an element for the entry `key`.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl ElementOps for ResourceBundleElement {
    fn name(&self) -> &str {
        &self.key
    }

    fn type_info(&self) -> &'static TypeInfo {
        String::type_info()
    }

    fn declaring_type(&self) -> Type {
        Type::of::<ResourceBundle>()
    }

    fn is_writable(&self) -> bool {
        false
    }

    fn is_projectable(&self) -> bool {
        false
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        let bundle = source
            .downcast_ref::<ResourceBundle>()
            .ok_or_else(|| HandlingError::MismatchedTypes {
                expected: ResourceBundle::type_path(),
                received: source.reflect_type_path(),
            })?;
        let value = bundle
            .get(&self.key)
            .ok_or_else(|| HandlingError::MissingValue {
                element: self.key.clone(),
            })?;
        Ok(Box::new(value.to_string()))
    }

    fn write(
        &self,
        _source: &mut dyn Reflect,
        _value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        Err(HandlingError::Unwritable {
            element: self.key.clone(),
            container: ResourceBundle::type_path(),
        })
    }

    fn access<'r>(&self, _source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        Err(HandlingError::NotProjectable {
            element: self.key.clone(),
        })
    }

    fn access_mut<'r>(
        &self,
        _source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        Err(HandlingError::NotProjectable {
            element: self.key.clone(),
        })
    }

    fn id(&self) -> ElementId {
        ElementId::new(
            Type::of::<ResourceBundle>().id(),
            "bundle",
            ElementKey::Name(self.key.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::PropertiesEntryElement;
    use crate::element::{Element, Target};
    use crate::error::HandlingError;
    use crate::info::TypePath;
    use crate::sources::{Properties, ResourceBundle};

    #[test]
    fn properties_entries_read_and_write() {
        let mut login = Properties::new();
        login.set("user", "admin");
        let target = Target::new(login);

        let user = crate::element("user").in_target(&target).unwrap();
        assert_eq!(user.value_as::<String>().unwrap(), "admin");

        user.set(String::from("guest")).unwrap();
        assert_eq!(user.value_as::<String>().unwrap(), "guest");
    }

    #[test]
    fn unknown_properties_keys_still_resolve() {
        let target = Target::new(Properties::new());
        let entry = crate::element("timeout").in_target(&target).unwrap();

        assert!(entry.value().is_err());
        entry.set(String::from("30")).unwrap();
        assert_eq!(entry.value_as::<String>().unwrap(), "30");
    }

    #[test]
    fn mismatched_sources_report_the_expected_path() {
        let entry = Element::new(PropertiesEntryElement::new("user"));
        let error = entry.read_from(&4_u32).unwrap_err();
        assert!(matches!(
            error,
            HandlingError::MismatchedTypes { expected, .. }
                if expected == Properties::type_path()
        ));
    }

    #[test]
    fn bundle_entries_are_read_only() {
        let bundle = ResourceBundle::new("messages").with("greeting", "hello");
        let target = Target::new(bundle);

        let greeting = crate::element("greeting").in_target(&target).unwrap();
        assert!(!greeting.is_writable());
        assert_eq!(greeting.value_as::<String>().unwrap(), "hello");
        assert!(greeting.set(String::from("hi")).is_err());
    }
}
