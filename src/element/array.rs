use crate::Reflect;
use crate::element::{ElementId, ElementKey, ElementOps};
use crate::error::HandlingError;
use crate::info::{ListInfo, Type, TypeInfo};
use crate::ops::List;

/// A position inside a list element source.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ArrayIndex {
    /// A fixed position.
    Index(usize),
    /// The first item, whatever the length.
    First,
    /// The last item, whatever the length.
    Last,
}

impl ArrayIndex {
    /// Parses an element name into a position.
    ///
    /// Accepts `"first"`, `"last"` and decimal indices.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "first" => Some(Self::First),
            "last" => Some(Self::Last),
            _ => name.parse().ok().map(Self::Index),
        }
    }

    fn resolve(self, len: usize) -> Option<usize> {
        let index = match self {
            Self::Index(index) => index,
            Self::First => 0,
            Self::Last => len.checked_sub(1)?,
        };
        (index < len).then_some(index)
    }
}

/// An element backed by a list position.
///
/// Positions are resolved against the live length on every access, so the
/// `last` element follows the list as it grows and shrinks.
pub struct ArrayElement {
    declaring: Type,
    info: &'static ListInfo,
    index: ArrayIndex,
    name: String,
}

impl ArrayElement {
    /// Creates an element for one position of the list described by `info`.
    pub fn new(declaring: Type, info: &'static ListInfo, index: ArrayIndex) -> Self {
        let name = match index {
            ArrayIndex::Index(index) => index.to_string(),
            ArrayIndex::First => "first".to_string(),
            ArrayIndex::Last => "last".to_string(),
        };
        Self {
            declaring,
            info,
            index,
            name,
        }
    }

    fn as_list<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn List, HandlingError> {
        source
            .reflect_ref()
            .as_list()
            .map_err(|_| HandlingError::MismatchedTypes {
                expected: self.declaring.path(),
                received: source.reflect_type_path(),
            })
    }

    fn out_of_bounds(&self) -> HandlingError {
        HandlingError::MissingValue {
            element: self.name.clone(),
        }
    }
}

impl ElementOps for ArrayElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_info(&self) -> &'static TypeInfo {
        self.info.item_info()
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
        let slot = self.access_mut(source)?;
        slot.set(value).map_err(|value| HandlingError::MismatchedTypes {
            expected: self.info.item_info().ty().path(),
            received: value.reflect_type_path(),
        })
    }

    fn access<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        let list = self.as_list(source)?;
        let index = self
            .index
            .resolve(list.len())
            .ok_or_else(|| self.out_of_bounds())?;
        list.get(index).ok_or_else(|| self.out_of_bounds())
    }

    fn access_mut<'r>(
        &self,
        source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        let out_of_bounds = self.out_of_bounds();
        let wrong_container = HandlingError::MismatchedTypes {
            expected: self.declaring.path(),
            received: source.reflect_type_path(),
        };
        let list = match source.reflect_mut().as_list() {
            Ok(list) => list,
            Err(_) => return Err(wrong_container),
        };
        let index = match self.index.resolve(list.len()) {
            Some(index) => index,
            None => return Err(out_of_bounds),
        };
        list.get_mut(index).ok_or(out_of_bounds)
    }

    fn id(&self) -> ElementId {
        let key = match self.index {
            ArrayIndex::Index(index) => ElementKey::Index(index),
            ArrayIndex::First | ArrayIndex::Last => ElementKey::Name(self.name.clone()),
        };
        ElementId::new(self.declaring.id(), "array", key)
    }
}

#[cfg(test)]
mod tests {
    use crate::element::Target;

    #[test]
    fn positions_resolve_against_the_live_list() {
        let target = Target::new(vec![0_i32, 10, 12, 33]);

        let first = crate::element("first").in_target(&target).unwrap();
        let last = crate::element("last").in_target(&target).unwrap();
        let third = crate::element("2").in_target(&target).unwrap();

        assert_eq!(first.value_as::<i32>().unwrap(), 0);
        assert_eq!(last.value_as::<i32>().unwrap(), 33);
        assert_eq!(third.value_as::<i32>().unwrap(), 12);
    }

    #[test]
    fn last_follows_growth() {
        let target = Target::new(vec![1_i32, 2]);
        let last = crate::element("last").in_target(&target).unwrap();

        assert_eq!(last.value_as::<i32>().unwrap(), 2);
        target.with_mut(|v: &mut Vec<i32>| v.push(9)).unwrap();
        assert_eq!(last.value_as::<i32>().unwrap(), 9);
    }

    #[test]
    fn writes_replace_items_in_place() {
        let target = Target::new(vec![0_i32, 10, 12, 33]);
        let first = crate::element("first").in_target(&target).unwrap();

        first.set(7_i32).unwrap();
        let items = target.with(|items: &Vec<i32>| items.clone()).unwrap();
        assert_eq!(items, vec![7, 10, 12, 33]);
    }

    #[test]
    fn out_of_bounds_reads_fail() {
        let target = Target::new(Vec::<i32>::new());
        let first = crate::element("first").in_target(&target).unwrap();
        assert!(first.value().is_err());
    }
}
