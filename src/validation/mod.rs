//! Validation of element values through attached rule attributes.
//!
//! A rule attribute is an ordinary attribute struct attached with
//! `#[reflect(@..)]`; a [`Validator`] registered for its type judges the
//! element values it is attached to. [`validate`] runs every registered
//! rule over every element of a target.
//!
//! ## Menu
//!
//! - [`validate`] / [`ValidationResult`]: the entry point and its outcome.
//! - [`Validator`] / [`register_validator`]: the rule contract.
//! - [`Range`] / [`NotEmpty`] / [`Contains`] / [`Valid`]: built-in rules.
//!
//! # Examples
//!
//! ```
//! use mirra::derive::Reflect;
//! use mirra::element::Target;
//! use mirra::validation::{NotEmpty, Range, validate};
//!
//! #[derive(Reflect)]
//! struct Account {
//!     #[reflect(@NotEmpty)]
//!     owner: String,
//!     #[reflect(@Range { min: 0.0, max: 1_000_000.0 })]
//!     balance: f64,
//! }
//!
//! let target = Target::new(Account {
//!     owner: String::new(),
//!     balance: 250.0,
//! });
//! let result = validate(&target).unwrap();
//! assert_eq!(result.invalid_elements(), ["owner"]);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod rules;

pub use rules::{Contains, NotEmpty, Range, Valid};

use core::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock};

use crate::Reflect;
use crate::element::{Element, Scope, Target, find_all_elements};
use crate::error::HandlingError;
use crate::util::TypeIdMap;

// -----------------------------------------------------------------------------
// Validator

/// Judges the value of one element.
///
/// A validator is registered for a rule attribute type and runs on every
/// element carrying that attribute. The attribute instance itself is
/// reachable through [`Element::annotation`].
pub trait Validator: Send + Sync + 'static {
    /// Returns `true` when `value`, read out of `target` for `element`,
    /// satisfies the rule.
    fn is_valid(&self, element: &Element, target: &dyn Reflect, value: &dyn Reflect) -> bool;
}

/// Registers a validator at startup.
///
/// ```ignore
/// inventory::submit! {
///     ValidatorRegistration {
///         attribute: || TypeId::of::<Positive>(),
///         validator: || Box::new(PositiveRule),
///     }
/// }
/// ```
#[cfg(feature = "auto_register")]
pub struct ValidatorRegistration {
    /// The rule attribute the validator runs for.
    pub attribute: fn() -> TypeId,
    /// Builds the validator instance.
    pub validator: fn() -> Box<dyn Validator>,
}

#[cfg(feature = "auto_register")]
inventory::collect!(ValidatorRegistration);

fn registry() -> &'static RwLock<TypeIdMap<Box<dyn Validator>>> {
    static REGISTRY: OnceLock<RwLock<TypeIdMap<Box<dyn Validator>>>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut table: TypeIdMap<Box<dyn Validator>> = TypeIdMap::new();
        table.insert_type::<Range>(Box::new(rules::RangeRule));
        table.insert_type::<NotEmpty>(Box::new(rules::NotEmptyRule));
        table.insert_type::<Contains>(Box::new(rules::ContainsRule));
        table.insert_type::<Valid>(Box::new(rules::ValidRule));
        #[cfg(feature = "auto_register")]
        for registration in inventory::iter::<ValidatorRegistration> {
            table.insert((registration.attribute)(), (registration.validator)());
        }
        RwLock::new(table)
    })
}

/// Registers `validator` for elements annotated with `A`.
///
/// Replaces any validator previously registered for the same attribute,
/// built-ins included.
pub fn register_validator<A: Reflect>(validator: impl Validator) {
    registry()
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(TypeId::of::<A>(), Box::new(validator));
}

// -----------------------------------------------------------------------------
// Validation

/// The outcome of a [`validate`] run.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ValidationResult {
    invalid: Vec<String>,
}

impl ValidationResult {
    /// Returns `true` when every element satisfied its rules.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }

    /// Returns the names of the elements that failed, in enumeration order.
    #[inline]
    pub fn invalid_elements(&self) -> &[String] {
        &self.invalid
    }
}

/// Validates every element of `target` against its attached rules.
///
/// Elements without registered rules are skipped without being read; a
/// failing read of a ruled element aborts the run.
pub fn validate(target: &Target) -> Result<ValidationResult, HandlingError> {
    target.view(validate_source)
}

pub(crate) fn validate_source(source: &dyn Reflect) -> Result<ValidationResult, HandlingError> {
    let table = registry().read().unwrap_or_else(PoisonError::into_inner);
    let mut invalid = Vec::new();
    for element in find_all_elements(&Scope::Value(source)) {
        let attributes = element.attributes();
        if !attributes.iter().any(|(id, _)| table.contains(id)) {
            continue;
        }
        let value = element.read_from(source)?;
        let accepted = attributes
            .iter()
            .filter_map(|(id, _)| table.get(id))
            .all(|validator| validator.is_valid(&element, source, value.as_ref()));
        if !accepted {
            invalid.push(element.name().to_string());
        }
    }
    Ok(ValidationResult { invalid })
}

#[cfg(test)]
mod tests {
    use super::{Contains, NotEmpty, Range, Valid, Validator, register_validator, validate};
    use crate::Reflect;
    use crate::derive::Reflect;
    use crate::element::{Element, Target};

    #[derive(Reflect)]
    struct Product {
        #[reflect(@NotEmpty)]
        name: String,
        #[reflect(@Range { min: 0.0, max: 100.0 })]
        price: f64,
    }

    #[derive(Reflect)]
    struct Order {
        #[reflect(@Valid)]
        product: Product,
        #[reflect(@Contains { part: "@" })]
        contact: String,
    }

    #[test]
    fn failing_elements_are_collected_by_name() {
        let target = Target::new(Product {
            name: String::new(),
            price: 250.0,
        });

        let result = validate(&target).unwrap();
        assert!(!result.is_valid());
        assert_eq!(result.invalid_elements(), ["name", "price"]);
    }

    #[test]
    fn satisfied_rules_accept_the_target() {
        let target = Target::new(Product {
            name: "keyboard".into(),
            price: 49.0,
        });

        assert!(validate(&target).unwrap().is_valid());
    }

    #[test]
    fn group_validation_recurses_into_values() {
        let target = Target::new(Order {
            product: Product {
                name: "keyboard".into(),
                price: -1.0,
            },
            contact: "sales".into(),
        });

        let result = validate(&target).unwrap();
        assert_eq!(result.invalid_elements(), ["product", "contact"]);
    }

    #[test]
    fn custom_rules_can_be_registered() {
        #[derive(Clone, Copy, PartialEq, Eq, Debug, Reflect)]
        #[reflect(clone)]
        struct Even;

        struct EvenRule;

        impl Validator for EvenRule {
            fn is_valid(&self, _: &Element, _: &dyn Reflect, value: &dyn Reflect) -> bool {
                value.downcast_ref::<u32>().is_some_and(|n| n % 2 == 0)
            }
        }

        #[derive(Reflect)]
        struct Pair {
            #[reflect(@Even)]
            count: u32,
        }

        register_validator::<Even>(EvenRule);

        let odd = Target::new(Pair { count: 3 });
        assert_eq!(validate(&odd).unwrap().invalid_elements(), ["count"]);

        let even = Target::new(Pair { count: 8 });
        assert!(validate(&even).unwrap().is_valid());
    }
}
