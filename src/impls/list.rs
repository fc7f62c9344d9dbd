//! Reflection implementations for sequence types.

use crate::Reflect;
use crate::impls::concat;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{ListInfo, TypeInfo, TypePath, Typed};
use crate::ops::ReflectCloneError;
use crate::ops::{List, ListItemIter};
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Vec<", T::type_name(), ">"]))
    }
}

impl<T: Reflect + Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }
}

impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    #[inline]
    fn iter_items(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    crate::reflection::impl_reflect_cast_fn!(List);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let mut out = Vec::with_capacity(self.len());
        for item in self {
            let cloned = item.reflect_clone()?;
            let cloned = cloned
                .take::<T>()
                .map_err(|_| ReflectCloneError::NotCloneable {
                    type_path: T::type_path(),
                })?;
            out.push(cloned);
        }
        Ok(Box::new(out))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        crate::impls::list_partial_eq(self, other)
    }
}

impl<T: Reflect + Typed + GetTypeMeta> GetTypeMeta for Vec<T> {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["[", T::type_path(), "; ", &N.to_string(), "]"])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["[", T::type_name(), "; ", &N.to_string(), "]"])
        })
    }
}

impl<T: Reflect + Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeInfo::List(ListInfo::new::<Self, T>().with_len(N))
        })
    }
}

impl<T: Reflect + Typed, const N: usize> List for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.as_slice().get(index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        self.as_mut_slice()
            .get_mut(index)
            .map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn iter_items(&self) -> ListItemIter<'_> {
        ListItemIter::new(self)
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    crate::reflection::impl_reflect_cast_fn!(List);

    fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
        let mut out = Vec::with_capacity(N);
        for item in self {
            let cloned = item.reflect_clone()?;
            let cloned = cloned
                .take::<T>()
                .map_err(|_| ReflectCloneError::NotCloneable {
                    type_path: T::type_path(),
                })?;
            out.push(cloned);
        }
        let out: [T; N] = out
            .try_into()
            .map_err(|_| ReflectCloneError::NotCloneable {
                type_path: Self::type_path(),
            })?;
        Ok(Box::new(out))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        crate::impls::list_partial_eq(self, other)
    }
}

impl<T: Reflect + Typed + GetTypeMeta, const N: usize> GetTypeMeta for [T; N] {
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
    use crate::ops::List;

    #[test]
    fn vec_reflects_as_list() {
        let values = vec![1_i32, 2, 3];
        assert_eq!(values.reflect_kind(), ReflectKind::List);

        let list: &dyn List = &values;
        assert_eq!(list.len(), 3);
        assert_eq!(list.get_as::<i32>(2), Some(&3));
        assert!(list.get(3).is_none());
    }

    #[test]
    fn array_info_has_fixed_len() {
        let info = <[u8; 4]>::type_info().as_list().unwrap();
        assert_eq!(info.len(), Some(4));
        assert!(info.item_type_is::<u8>());
    }

    #[test]
    fn list_clone_preserves_items() {
        let values = vec![String::from("a"), String::from("b")];
        let cloned = values.reflect_clone().unwrap();
        assert_eq!(cloned.take::<Vec<String>>().unwrap(), values);
    }
}
