use crate::Reflect;
use crate::element::{ElementId, ElementKey, ElementOps};
use crate::error::HandlingError;
use crate::info::{MapInfo, Type, TypeInfo};
use crate::ops::Map;

/// An element backed by a map entry.
///
/// Map keys are an open space: any name resolves to an element, reads of
/// absent keys fail with a missing value, and writes create the entry.
pub struct MapEntryElement {
    declaring: Type,
    info: &'static MapInfo,
    key: String,
}

impl MapEntryElement {
    /// Creates an element for the entry `key` of the map described by
    /// `info`.
    pub fn new(declaring: Type, info: &'static MapInfo, key: impl Into<String>) -> Self {
        Self {
            declaring,
            info,
            key: key.into(),
        }
    }

    fn as_map<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Map, HandlingError> {
        source
            .reflect_ref()
            .as_map()
            .map_err(|_| HandlingError::MismatchedTypes {
                expected: self.declaring.path(),
                received: source.reflect_type_path(),
            })
    }

    fn missing(&self) -> HandlingError {
        HandlingError::MissingValue {
            element: self.key.clone(),
        }
    }
}

impl ElementOps for MapEntryElement {
    fn name(&self) -> &str {
        &self.key
    }

    fn type_info(&self) -> &'static TypeInfo {
        self.info.value_info()
    }

    fn declaring_type(&self) -> Type {
        self.declaring
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        Ok(self.access(source)?.reflect_clone()?)
    }

    fn write(
        &self,
        source: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        let expected = self.info.value_info().ty().path();
        let map = match source.reflect_mut().as_map() {
            Ok(map) => map,
            Err(_) => {
                return Err(HandlingError::MissingValue {
                    element: self.key.clone(),
                });
            }
        };
        map.insert_boxed(Box::new(self.key.clone()), value)
            .map(|_| ())
            .map_err(|(_, value)| HandlingError::MismatchedTypes {
                expected,
                received: value.reflect_type_path(),
            })
    }

    fn access<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        let map = self.as_map(source)?;
        map.get(&self.key as &dyn Reflect).ok_or_else(|| self.missing())
    }

    fn access_mut<'r>(
        &self,
        source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        let missing = self.missing();
        let map = match source.reflect_mut().as_map() {
            Ok(map) => map,
            Err(_) => return Err(missing),
        };
        map.get_mut(&self.key as &dyn Reflect).ok_or(missing)
    }

    fn id(&self) -> ElementId {
        ElementId::new(
            self.declaring.id(),
            "entry",
            ElementKey::Name(self.key.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::element::Target;

    fn scores() -> HashMap<String, i32> {
        let mut scores = HashMap::new();
        scores.insert(String::from("ada"), 10);
        scores
    }

    #[test]
    fn any_key_resolves_to_an_element() {
        let target = Target::new(scores());

        let known = crate::element("ada").in_target(&target).unwrap();
        let unknown = crate::element("alan").in_target(&target).unwrap();

        assert_eq!(known.value_as::<i32>().unwrap(), 10);
        assert!(unknown.value().is_err());
    }

    #[test]
    fn writes_create_absent_entries() {
        let target = Target::new(scores());
        let entry = crate::element("alan").in_target(&target).unwrap();

        entry.set(5_i32).unwrap();
        assert_eq!(entry.value_as::<i32>().unwrap(), 5);

        let len = target.with(HashMap::<String, i32>::len).unwrap();
        assert_eq!(len, 2);
    }

    #[test]
    fn wrong_value_type_is_rejected() {
        let target = Target::new(scores());
        let entry = crate::element("ada").in_target(&target).unwrap();
        assert!(entry.set(String::from("ten")).is_err());
    }
}
