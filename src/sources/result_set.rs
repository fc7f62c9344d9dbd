use core::fmt;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::ops::ReflectCloneError;
use crate::registry::{GetTypeMeta, TypeMeta};

/// A cursor over tabular data.
///
/// The contract mirrors a database result set: a fixed set of named
/// columns, a current row, and a cursor that only moves forward.
pub trait ResultSet: Send + Sync + 'static {
    /// The column names, in declaration order.
    fn column_names(&self) -> &[String];

    /// Reads a column of the current row.
    ///
    /// Returns `None` for unknown columns or when the cursor is not on a
    /// row.
    fn fetch(&self, column: &str) -> Option<Box<dyn Reflect>>;

    /// Moves the cursor to the next row.
    ///
    /// Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> bool;
}

/// A reflected wrapper around a [`ResultSet`].
///
/// Cursors cannot be cloned or compared, so `Rows` reflects as an opaque
/// value whose clone attempts fail. Column elements read through the live
/// cursor: advancing it changes what every column element sees.
pub struct Rows {
    inner: Box<dyn ResultSet>,
}

impl Rows {
    /// Wraps a cursor for element access.
    pub fn new(result_set: impl ResultSet) -> Self {
        Self {
            inner: Box::new(result_set),
        }
    }

    /// The column names, in declaration order.
    #[inline]
    pub fn column_names(&self) -> &[String] {
        self.inner.column_names()
    }

    /// Reads a column of the current row.
    #[inline]
    pub fn fetch(&self, column: &str) -> Option<Box<dyn Reflect>> {
        self.inner.fetch(column)
    }

    /// Moves the cursor to the next row.
    #[inline]
    pub fn advance(&mut self) -> bool {
        self.inner.advance()
    }
}

impl fmt::Debug for Rows {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rows")
            .field("columns", &self.inner.column_names())
            .finish()
    }
}

impl TypePath for Rows {
    #[inline]
    fn type_path() -> &'static str {
        "mirra::sources::Rows"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Rows"
    }
}

impl Typed for Rows {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl Reflect for Rows {
    crate::reflection::impl_reflect_cast_fn!(Opaque);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        Err(ReflectCloneError::NotCloneable {
            type_path: Self::type_path(),
        })
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl GetTypeMeta for Rows {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ResultSet;
    use crate::Reflect;

    /// An in-memory result set over string columns.
    pub(crate) struct StringRows {
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
        cursor: Option<usize>,
    }

    impl StringRows {
        pub(crate) fn new(columns: &[&str], rows: &[&[&str]]) -> Self {
            Self {
                columns: columns.iter().map(|c| c.to_string()).collect(),
                rows: rows
                    .iter()
                    .map(|row| row.iter().map(|v| v.to_string()).collect())
                    .collect(),
                cursor: None,
            }
        }
    }

    impl ResultSet for StringRows {
        fn column_names(&self) -> &[String] {
            &self.columns
        }

        fn fetch(&self, column: &str) -> Option<Box<dyn Reflect>> {
            let row = self.rows.get(self.cursor?)?;
            let index = self.columns.iter().position(|c| c == column)?;
            Some(Box::new(row[index].clone()))
        }

        fn advance(&mut self) -> bool {
            let next = self.cursor.map_or(0, |cursor| cursor + 1);
            if next < self.rows.len() {
                self.cursor = Some(next);
                true
            } else {
                self.cursor = None;
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StringRows;
    use super::Rows;
    use crate::Reflect;

    #[test]
    fn cursor_starts_before_the_first_row() {
        let mut rows = Rows::new(StringRows::new(
            &["id", "name"],
            &[&["1", "ada"], &["2", "alan"]],
        ));

        assert!(rows.fetch("name").is_none());
        assert!(rows.advance());
        assert_eq!(
            rows.fetch("name").unwrap().take::<String>().unwrap(),
            "ada"
        );
        assert!(rows.advance());
        assert!(!rows.advance());
    }

    #[test]
    fn rows_refuse_to_clone() {
        let rows = Rows::new(StringRows::new(&["id"], &[]));
        assert!(rows.reflect_clone().is_err());
    }
}
