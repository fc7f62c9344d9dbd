use crate::Reflect;
use crate::element::{Element, ElementId, ElementKey, ElementOps};
use crate::error::HandlingError;
use crate::info::{CustomAttributes, ReflectKind, Type, TypeInfo};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Option unwrapping

/// Steps over an `Option` hop by reference.
///
/// Values of other kinds pass through untouched; a `None` fails the
/// traversal with [`HandlingError::MissingValue`].
fn enter_ref<'r>(source: &'r dyn Reflect, element: &str) -> Result<&'r dyn Reflect, HandlingError> {
    if source.reflect_kind() != ReflectKind::Option {
        return Ok(source);
    }
    match source.reflect_ref() {
        ReflectRef::Option(option) => option.get().ok_or_else(|| HandlingError::MissingValue {
            element: element.to_string(),
        }),
        _ => unreachable!("kind is already checked"),
    }
}

fn enter_mut<'r>(
    source: &'r mut dyn Reflect,
    element: &str,
) -> Result<&'r mut dyn Reflect, HandlingError> {
    if source.reflect_kind() != ReflectKind::Option {
        return Ok(source);
    }
    match source.reflect_mut() {
        ReflectMut::Option(option) => {
            option.get_mut().ok_or_else(|| HandlingError::MissingValue {
                element: element.to_string(),
            })
        }
        _ => unreachable!("kind is already checked"),
    }
}

fn enter_owned(
    value: Box<dyn Reflect>,
    element: &str,
) -> Result<Box<dyn Reflect>, HandlingError> {
    if value.reflect_kind() != ReflectKind::Option {
        return Ok(value);
    }
    match value.reflect_ref() {
        ReflectRef::Option(option) => match option.get() {
            Some(inner) => Ok(inner.reflect_clone()?),
            None => Err(HandlingError::MissingValue {
                element: element.to_string(),
            }),
        },
        _ => unreachable!("kind is already checked"),
    }
}

// -----------------------------------------------------------------------------
// NestedElement

/// An element addressed by a dotted path of hops.
///
/// Intermediate hops that evaluate to an `Option` are stepped over: `Some`
/// continues into the inner value and `None` fails the whole traversal
/// with a missing value. Non projectable hops, such as accessor backed
/// properties, are traversed by value: the hop is read, the rest of the
/// path is applied to the copy and the copy is written back.
pub struct NestedElement {
    name: String,
    path: Box<[Element]>,
}

impl NestedElement {
    /// Joins a non empty chain of hops into one element.
    pub(crate) fn new(path: Vec<Element>) -> Self {
        debug_assert!(!path.is_empty(), "a nested path needs at least one hop");
        let mut name = String::new();
        for hop in &path {
            if !name.is_empty() {
                name.push('.');
            }
            name.push_str(hop.name());
        }
        Self {
            name,
            path: path.into_boxed_slice(),
        }
    }

    /// Returns the hops of this path, in order.
    #[inline]
    pub fn hops(&self) -> &[Element] {
        &self.path
    }

    fn read_path(&self, source: &dyn Reflect, index: usize) -> Result<Box<dyn Reflect>, HandlingError> {
        let hop = &self.path[index];
        let value = hop.ops().read(source)?;
        if index + 1 == self.path.len() {
            return Ok(value);
        }
        let value = enter_owned(value, hop.name())?;
        self.read_path(value.as_ref(), index + 1)
    }

    fn write_path(
        &self,
        source: &mut dyn Reflect,
        index: usize,
        value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        let hop = &self.path[index];
        if index + 1 == self.path.len() {
            return hop.ops().write(source, value);
        }
        if hop.ops().is_projectable() {
            let slot = hop.ops().access_mut(source)?;
            let inner = enter_mut(slot, hop.name())?;
            return self.write_path(inner, index + 1, value);
        }
        // Traverse the hop by value and write the modified copy back.
        let mut owned = hop.ops().read(source)?;
        {
            let inner = enter_mut(owned.as_mut(), hop.name())?;
            self.write_path(inner, index + 1, value)?;
        }
        hop.ops().write(source, owned)
    }
}

impl ElementOps for NestedElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_info(&self) -> &'static TypeInfo {
        // This is the type of the value the path evaluates to.
        self.path[self.path.len() - 1].type_info()
    }

    fn declaring_type(&self) -> Type {
        self.path[0].declaring_type()
    }

    fn attributes(&self) -> &CustomAttributes {
        self.path[self.path.len() - 1].attributes()
    }

    fn is_readable(&self) -> bool {
        self.path.iter().all(Element::is_readable)
    }

    fn is_writable(&self) -> bool {
        // Every hop before the last is entered either by projection or by
        // read-modify-write, so an unreadable intermediate blocks writes.
        let last = self.path.len() - 1;
        self.path[last].is_writable()
            && self.path[..last].iter().all(Element::is_readable)
    }

    fn is_projectable(&self) -> bool {
        self.path.iter().all(|hop| hop.ops().is_projectable())
    }

    fn read(&self, source: &dyn Reflect) -> Result<Box<dyn Reflect>, HandlingError> {
        self.read_path(source, 0)
    }

    fn write(
        &self,
        source: &mut dyn Reflect,
        value: Box<dyn Reflect>,
    ) -> Result<(), HandlingError> {
        self.write_path(source, 0, value)
    }

    fn access<'r>(&self, source: &'r dyn Reflect) -> Result<&'r dyn Reflect, HandlingError> {
        let mut current = source;
        for (index, hop) in self.path.iter().enumerate() {
            current = hop.ops().access(current)?;
            if index + 1 < self.path.len() {
                current = enter_ref(current, hop.name())?;
            }
        }
        Ok(current)
    }

    fn access_mut<'r>(
        &self,
        source: &'r mut dyn Reflect,
    ) -> Result<&'r mut dyn Reflect, HandlingError> {
        let mut current = source;
        for (index, hop) in self.path.iter().enumerate() {
            current = hop.ops().access_mut(current)?;
            if index + 1 < self.path.len() {
                current = enter_mut(current, hop.name())?;
            }
        }
        Ok(current)
    }

    fn id(&self) -> ElementId {
        let ids = self.path.iter().map(Element::id).collect();
        ElementId::new(
            self.path[0].declaring_type().id(),
            "nested",
            ElementKey::Path(ids),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::derive::Reflect;
    use crate::element::Target;

    #[derive(Clone, Reflect)]
    #[reflect(clone)]
    struct Address {
        city: String,
    }

    #[derive(Reflect)]
    struct Customer {
        address: Address,
        backup: Option<Address>,
    }

    fn customer() -> Customer {
        Customer {
            address: Address {
                city: "paris".into(),
            },
            backup: None,
        }
    }

    #[test]
    fn nested_read_and_write() {
        let target = Target::new(customer());
        let city = crate::element("address.city").in_target(&target).unwrap();

        assert_eq!(city.name(), "address.city");
        assert_eq!(city.value_as::<String>().unwrap(), "paris");

        city.set(String::from("lyon")).unwrap();
        let stored = target.with(|c: &Customer| c.address.city.clone()).unwrap();
        assert_eq!(stored, "lyon");
    }

    #[test]
    fn absent_intermediate_fails_with_missing_value() {
        let target = Target::new(customer());
        let city = crate::element("backup.city").in_target(&target).unwrap();

        assert!(city.value().is_err());

        target
            .with_mut(|c: &mut Customer| {
                c.backup = Some(Address {
                    city: "nice".into(),
                });
            })
            .unwrap();
        assert_eq!(city.value_as::<String>().unwrap(), "nice");
    }

    #[test]
    fn same_path_resolves_to_equal_elements() {
        let first = crate::element("address.city").in_type::<Customer>().unwrap();
        let second = crate::element("address.city").in_type::<Customer>().unwrap();
        let direct = crate::element("city").in_type::<Address>().unwrap();

        assert_eq!(first, second);
        assert_ne!(first, direct);
    }

    #[derive(Reflect)]
    #[reflect(property(name = "addr", ty = Address, get = addr, set = set_addr))]
    struct Holder {
        stored: Address,
    }

    impl Holder {
        fn addr(&self) -> Address {
            self.stored.clone()
        }

        fn set_addr(&mut self, value: Address) {
            self.stored = value;
        }
    }

    #[derive(Reflect)]
    #[reflect(property(name = "slot", ty = Address, set = set_slot))]
    struct Vault {
        hidden: Address,
    }

    impl Vault {
        fn set_slot(&mut self, value: Address) {
            self.hidden = value;
        }
    }

    #[test]
    fn unreadable_intermediate_hop_blocks_writes() {
        let target = Target::new(Vault {
            hidden: Address {
                city: "turin".into(),
            },
        });
        let city = crate::element("slot.city").in_target(&target).unwrap();

        assert!(!city.is_writable());
        assert!(city.set(String::from("milan")).is_err());
    }

    #[test]
    fn write_through_accessor_hop_copies_back() {
        let target = Target::new(Holder {
            stored: Address {
                city: "oslo".into(),
            },
        });
        let city = crate::element("addr.city").in_target(&target).unwrap();

        city.set(String::from("bergen")).unwrap();
        let stored = target.with(|h: &Holder| h.stored.city.clone()).unwrap();
        assert_eq!(stored, "bergen");
    }
}
