//! Built-in validation rules and their attribute types.

use crate::Reflect;
use crate::element::Element;
use crate::impls::{NonGenericTypeInfoCell, impl_opaque_reflect_fns};
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::ops::ReflectRef;
use crate::validation::{Validator, validate_source};

/// Implement reflection for a rule attribute as an opaque type.
macro_rules! impl_rule_reflect {
    ($ty:ident) => {
        impl TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                concat!("mirra::validation::", stringify!($ty))
            }

            #[inline]
            fn type_name() -> &'static str {
                stringify!($ty)
            }

            #[inline]
            fn module_path() -> Option<&'static str> {
                Some("mirra::validation")
            }
        }

        impl Typed for $ty {
            fn type_info() -> &'static TypeInfo {
                static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
            }
        }

        impl Reflect for $ty {
            impl_opaque_reflect_fns!();
        }
    };
}

// -----------------------------------------------------------------------------
// Attributes

/// Accepts numeric values within `min..=max`.
///
/// Attach with `#[reflect(@Range { min, max })]`. Non-numeric values are
/// rejected.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Range {
    /// The smallest accepted value.
    pub min: f64,
    /// The largest accepted value.
    pub max: f64,
}

impl_rule_reflect!(Range);

/// Accepts strings, lists and maps holding at least one item, and options
/// holding a value.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct NotEmpty;

impl_rule_reflect!(NotEmpty);

/// Accepts strings containing the given fragment.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Contains {
    /// The fragment the value must contain.
    pub part: &'static str,
}

impl_rule_reflect!(Contains);

/// Validates the element's value recursively, against the rules attached
/// to its own elements.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Valid;

impl_rule_reflect!(Valid);

// -----------------------------------------------------------------------------
// Rules

pub(super) struct RangeRule;

impl Validator for RangeRule {
    fn is_valid(&self, element: &Element, _target: &dyn Reflect, value: &dyn Reflect) -> bool {
        let Some(range) = element.annotation::<Range>() else {
            return true;
        };
        match to_f64(value) {
            Some(value) => range.min <= value && value <= range.max,
            None => false,
        }
    }
}

pub(super) struct NotEmptyRule;

impl Validator for NotEmptyRule {
    fn is_valid(&self, _element: &Element, _target: &dyn Reflect, value: &dyn Reflect) -> bool {
        if let Some(text) = value.downcast_ref::<String>() {
            return !text.is_empty();
        }
        match value.reflect_ref() {
            ReflectRef::List(list) => !list.is_empty(),
            ReflectRef::Map(map) => !map.is_empty(),
            ReflectRef::Option(option) => option.get().is_some(),
            _ => false,
        }
    }
}

pub(super) struct ContainsRule;

impl Validator for ContainsRule {
    fn is_valid(&self, element: &Element, _target: &dyn Reflect, value: &dyn Reflect) -> bool {
        let Some(rule) = element.annotation::<Contains>() else {
            return true;
        };
        match value.downcast_ref::<String>() {
            Some(text) => text.contains(rule.part),
            None => false,
        }
    }
}

pub(super) struct ValidRule;

impl Validator for ValidRule {
    fn is_valid(&self, _element: &Element, _target: &dyn Reflect, value: &dyn Reflect) -> bool {
        match validate_source(value) {
            Ok(result) => result.is_valid(),
            Err(_) => false,
        }
    }
}

fn to_f64(value: &dyn Reflect) -> Option<f64> {
    macro_rules! try_numeric {
        ($($ty:ty),* $(,)?) => {
            $(if let Some(value) = value.downcast_ref::<$ty>() {
                return Some(*value as f64);
            })*
        };
    }
    try_numeric!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64);
    None
}

#[cfg(test)]
mod tests {
    use super::{NotEmpty, NotEmptyRule, Range, RangeRule, to_f64};
    use crate::derive::Reflect;
    use crate::element::Target;
    use crate::validation::Validator;

    #[derive(Reflect)]
    struct Probe {
        #[reflect(@Range { min: 0.0, max: 1.0 })]
        ratio: f64,
        #[reflect(@NotEmpty)]
        tags: Vec<String>,
    }

    #[test]
    fn numeric_widening_covers_every_primitive() {
        assert_eq!(to_f64(&42_u8), Some(42.0));
        assert_eq!(to_f64(&-7_i64), Some(-7.0));
        assert_eq!(to_f64(&1.5_f32), Some(1.5));
        assert_eq!(to_f64(&String::from("nan")), None);
    }

    #[test]
    fn rules_judge_values_through_their_attributes() {
        let target = Target::new(Probe {
            ratio: 0.5,
            tags: Vec::new(),
        });

        let ratio = crate::element("ratio").in_target(&target).unwrap();
        assert!(RangeRule.is_valid(&ratio, &0_i32, &0.5_f64));
        assert!(!RangeRule.is_valid(&ratio, &0_i32, &1.5_f64));
        assert!(!RangeRule.is_valid(&ratio, &0_i32, &String::from("high")));

        let tags = crate::element("tags").in_target(&target).unwrap();
        assert!(!NotEmptyRule.is_valid(&tags, &0_i32, &Vec::<String>::new()));
        assert!(NotEmptyRule.is_valid(&tags, &0_i32, &vec![String::from("a")]));
    }
}
