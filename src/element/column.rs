use crate::Reflect;
use crate::element::{ElementId, ElementKey, ElementOps};
use crate::error::HandlingError;
use crate::info::{Type, TypePath};
use crate::sources::Rows;

/// An element backed by a result-set column.
///
/// Reads go through the live cursor: the same element yields a different
/// value after each [`Rows::advance`]. Columns are never writable and,
/// since the value is produced by the cursor, never projectable.
pub struct ResultSetColumnElement {
    column: String,
}

impl ResultSetColumnElement {
    /// Creates an element for the column named `column`.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
        }
    }
}

impl ElementOps for ResultSetColumnElement {
    fn name(&self) -> &str {
        &self.column
    }

    fn declaring_type(&self) -> Type {
        Type::of::<Rows>()
    }

    fn is_writable(&self) -> bool {
        false
    }

    fn is_projectable(&self) -> bool {
        false
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        let rows = source
            .downcast_ref::<Rows>()
            .ok_or_else(|| HandlingError::MismatchedTypes {
                expected: Rows::type_path(),
                received: source.reflect_type_path(),
            })?;
        rows.fetch(&self.column)
            .ok_or_else(|| HandlingError::MissingValue {
                element: self.column.clone(),
            })
    }

    fn write(
        &self,
        _source: &mut dyn Reflect,
        _value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        Err(HandlingError::Unwritable {
            element: self.column.clone(),
            container: Rows::type_path(),
        })
    }

    fn access<'r>(&self, _source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        Err(HandlingError::NotProjectable {
            element: self.column.clone(),
        })
    }

    fn access_mut<'r>(
        &self,
        _source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        Err(HandlingError::NotProjectable {
            element: self.column.clone(),
        })
    }

    fn id(&self) -> ElementId {
        ElementId::new(
            Type::of::<Rows>().id(),
            "column",
            ElementKey::Name(self.column.clone()),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::element::Target;
    use crate::sources::fixtures::StringRows;
    use crate::sources::Rows;

    fn people() -> Target {
        Target::new(Rows::new(StringRows::new(
            &["id", "name", "role"],
            &[&["1", "ada", "admin"], &["2", "alan", "guest"]],
        )))
    }

    #[test]
    fn columns_enumerate_and_stay_unwritable() {
        let target = people();
        let columns = crate::elements().in_target(&target);

        assert_eq!(columns.len(), 3);
        for column in &columns {
            assert!(column.is_specific());
            assert!(!column.is_writable());
        }
    }

    #[test]
    fn reads_follow_the_cursor() {
        let target = people();
        let name = crate::element("name").in_target(&target).unwrap();

        assert!(name.value().is_err());

        target.with_mut(Rows::advance).unwrap();
        assert_eq!(name.value_as::<String>().unwrap(), "ada");

        target.with_mut(Rows::advance).unwrap();
        assert_eq!(name.value_as::<String>().unwrap(), "alan");
    }
}
