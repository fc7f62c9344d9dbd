//! Copying element values between targets.
//!
//! [`copy`] pairs the readable elements of a source with the same-named
//! writable elements of a destination and transfers their values. The
//! containers do not have to share a type; any two element sources with
//! overlapping names can exchange values.
//!
//! # Examples
//!
//! ```
//! use mirra::copy;
//! use mirra::derive::Reflect;
//! use mirra::element::Target;
//!
//! #[derive(Reflect)]
//! struct Form {
//!     name: String,
//!     age: u32,
//! }
//!
//! #[derive(Reflect)]
//! struct Customer {
//!     name: String,
//!     age: u32,
//!     id: u64,
//! }
//!
//! let form = Target::new(Form { name: "ada".into(), age: 36 });
//! let customer = Target::new(Customer { name: String::new(), age: 0, id: 7 });
//!
//! let copied = copy(&form).to(&customer).unwrap();
//! assert_eq!(copied, 2);
//! ```

use crate::Reflect;
use crate::element::{Element, Scope, Target, find_all_elements, find_element};
use crate::error::HandlingError;
use crate::selector::Predicate;

/// Starts an element copy out of `source`.
pub fn copy(source: &Target) -> ElementCopier {
    ElementCopier {
        source: source.clone(),
        predicate: Predicate::new(),
        by_name_only: false,
    }
}

/// A pending element copy. See [`copy`].
pub struct ElementCopier {
    source: Target,
    predicate: Predicate<Element>,
    by_name_only: bool,
}

impl ElementCopier {
    /// Keeps only source elements accepted by `predicate`.
    pub fn filter(mut self, predicate: impl Fn(&Element) -> bool + Send + Sync + 'static) -> Self {
        self.predicate.and(predicate);
        self
    }

    /// Pairs elements by name alone, without requiring matching declared
    /// value types.
    ///
    /// Pairs whose values turn out to be incompatible at write time are
    /// skipped instead of failing the copy.
    pub fn by_name_only(mut self) -> Self {
        self.by_name_only = true;
        self
    }

    /// Runs the copy into `destination`, returning the number of elements
    /// written.
    ///
    /// Unreadable source elements, unmatched names and incompatible pairs
    /// are skipped. Write failures other than a value-type mismatch under
    /// [`by_name_only`](Self::by_name_only) propagate.
    pub fn to(self, destination: &Target) -> Result<usize, HandlingError> {
        let staged = self.source.view(|value| {
            let mut staged: Vec<(Element, Box<dyn Reflect>)> = Vec::new();
            for element in find_all_elements(&Scope::Value(value)) {
                if !element.is_readable() || !self.predicate.test(&element) {
                    continue;
                }
                if let Ok(snapshot) = element.read_from(value) {
                    staged.push((element, snapshot));
                }
            }
            staged
        });

        let mut copied = 0;
        for (element, snapshot) in staged {
            let paired =
                destination.view(|value| find_element(&Scope::Value(value), element.name()));
            let Some(paired) = paired else {
                continue;
            };
            if !paired.is_writable() {
                continue;
            }
            if !self.by_name_only
                && element.type_info().ty().id() != paired.type_info().ty().id()
            {
                continue;
            }
            match destination.view_mut(|value| paired.write_to(value, snapshot)) {
                Ok(()) => copied += 1,
                Err(HandlingError::MismatchedTypes { .. }) if self.by_name_only => {}
                Err(error) => return Err(error),
            }
        }
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::copy;
    use crate::derive::Reflect;
    use crate::element::Target;
    use crate::sources::Rows;
    use crate::sources::fixtures::StringRows;

    #[derive(Reflect)]
    struct Form {
        name: String,
        age: u32,
        note: String,
    }

    #[derive(Reflect)]
    struct Customer {
        name: String,
        age: u32,
        #[reflect(readonly)]
        id: u64,
    }

    fn form() -> Target {
        Target::new(Form {
            name: "ada".into(),
            age: 36,
            note: "vip".into(),
        })
    }

    #[test]
    fn same_named_elements_transfer_their_values() {
        let source = form();
        let destination = Target::new(Customer {
            name: String::new(),
            age: 0,
            id: 7,
        });

        let copied = copy(&source).to(&destination).unwrap();
        assert_eq!(copied, 2);

        let name = crate::element("name").in_target(&destination).unwrap();
        assert_eq!(name.value_as::<String>().unwrap(), "ada");
        let id = crate::element("id").in_target(&destination).unwrap();
        assert_eq!(id.value_as::<u64>().unwrap(), 7);
    }

    #[test]
    fn filters_narrow_the_copied_set() {
        let source = form();
        let destination = Target::new(Customer {
            name: String::new(),
            age: 0,
            id: 7,
        });

        let copied = copy(&source)
            .filter(|element| element.name() != "age")
            .to(&destination)
            .unwrap();
        assert_eq!(copied, 1);

        let age = crate::element("age").in_target(&destination).unwrap();
        assert_eq!(age.value_as::<u32>().unwrap(), 0);
    }

    #[test]
    fn map_destinations_pair_by_declared_value_type() {
        let source = form();
        let entries: HashMap<String, String> = HashMap::default();
        let destination = Target::new(entries);

        // String entries pair with the string fields; `age` declares `u32`
        // and stays out.
        let copied = copy(&source).to(&destination).unwrap();
        assert_eq!(copied, 2);

        let name = crate::element("name").in_target(&destination).unwrap();
        assert_eq!(name.value_as::<String>().unwrap(), "ada");
        let note = crate::element("note").in_target(&destination).unwrap();
        assert_eq!(note.value_as::<String>().unwrap(), "vip");
        let age = crate::element("age").in_target(&destination).unwrap();
        assert!(age.value().is_err());
    }

    #[test]
    fn name_only_pairing_relaxes_the_declared_type_check() {
        let mut rows = Rows::new(StringRows::new(
            &["name", "age", "note"],
            &[&["grace", "45", "vip"]],
        ));
        rows.advance();
        let source = Target::new(rows);
        let destination = Target::new(Customer {
            name: String::new(),
            age: 0,
            id: 7,
        });

        // Result-set columns carry no declared value type, so the strict
        // pairing skips them all.
        assert_eq!(copy(&source).to(&destination).unwrap(), 0);

        // By name, the string column lands and the numeric field drops
        // its incompatible value at write time.
        let copied = copy(&source).by_name_only().to(&destination).unwrap();
        assert_eq!(copied, 1);

        let name = crate::element("name").in_target(&destination).unwrap();
        assert_eq!(name.value_as::<String>().unwrap(), "grace");
        let age = crate::element("age").in_target(&destination).unwrap();
        assert_eq!(age.value_as::<u32>().unwrap(), 0);
    }
}
