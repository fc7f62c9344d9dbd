//! Reflection implementation for `Option<T>`.
//!
//! Options are their own [kind](crate::info::ReflectKind::Option): element
//! traversal steps into present values and degrades gracefully on `None`
//! instead of failing.

use crate::Reflect;
use crate::impls::concat;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{OptionInfo, TypeInfo, TypePath, Typed};
use crate::ops::Optional;
use crate::ops::ReflectCloneError;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

impl<T: TypePath> TypePath for Option<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["core::option::Option<", T::type_path(), ">"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Option<", T::type_name(), ">"]))
    }
}

impl<T: Reflect + Typed> Typed for Option<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Option(OptionInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> Optional for Option<T> {
    #[inline]
    fn get(&self) -> Option<&dyn Reflect> {
        self.as_ref().map(|value| value as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.as_mut().map(|value| value as &mut dyn Reflect)
    }

    #[inline]
    fn is_some(&self) -> bool {
        Option::is_some(self)
    }
}

impl<T: Reflect + Typed> Reflect for Option<T> {
    crate::reflection::impl_reflect_cast_fn!(Option);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        match self {
            None => Ok(Box::new(None::<T>)),
            Some(value) => {
                let cloned = value.reflect_clone()?.take::<T>().map_err(|_| {
                    ReflectCloneError::NotCloneable {
                        type_path: T::type_path(),
                    }
                })?;
                Ok(Box::new(Some(cloned)))
            }
        }
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        crate::impls::option_partial_eq(self, other)
    }
}

impl<T: Reflect + Typed + GetTypeMeta> GetTypeMeta for Option<T> {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};
    use crate::ops::Optional;

    #[test]
    fn option_reflects_as_option_kind() {
        let value = Some(3_i32);
        assert_eq!(value.reflect_kind(), ReflectKind::Option);

        let opt: &dyn Optional = &value;
        assert!(opt.is_some());
        assert_eq!(opt.get().unwrap().downcast_ref::<i32>(), Some(&3));

        let absent: Option<i32> = None;
        let opt: &dyn Optional = &absent;
        assert!(opt.get().is_none());
    }

    #[test]
    fn option_info_exposes_inner_type() {
        let info = Option::<String>::type_info().as_option().unwrap();
        assert!(info.some_type_is::<String>());
    }

    #[test]
    fn none_values_compare_equal() {
        let a: Option<i32> = None;
        let b: Option<i32> = None;
        assert_eq!(a.reflect_partial_eq(&b), Some(true));
        assert_eq!(a.reflect_partial_eq(&Some(1_i32)), Some(false));
    }
}
