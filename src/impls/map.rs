//! Reflection implementations for key-value containers.

use core::hash::Hash;
use std::collections::BTreeMap;
use std::collections::HashMap;

use crate::Reflect;
use crate::impls::concat;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell};
use crate::info::{MapInfo, TypeInfo, TypePath, Typed};
use crate::ops::Map;
use crate::ops::ReflectCloneError;
use crate::registry::{GetTypeMeta, TypeMeta, TypeRegistry};

/// Implement the [`Map`] trait body shared by the standard map containers.
macro_rules! impl_reflect_map_fns {
    () => {
        fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
            let key = key.downcast_ref::<K>()?;
            Self::get(self, key).map(|value| value as &dyn Reflect)
        }

        fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect> {
            let key = key.downcast_ref::<K>()?;
            Self::get_mut(self, key).map(|value| value as &mut dyn Reflect)
        }

        fn insert_boxed(
            &mut self,
            key: Box<dyn Reflect>,
            value: Box<dyn Reflect>,
        ) -> Result<Option<Box<dyn Reflect>>, (Box<dyn Reflect>, Box<dyn Reflect>)> {
            let key = match key.take::<K>() {
                Ok(key) => key,
                Err(key) => return Err((key, value)),
            };
            match value.take::<V>() {
                Ok(value) => Ok(Self::insert(self, key, value)
                    .map(|old| Box::new(old) as Box<dyn Reflect>)),
                Err(value) => Err((Box::new(key), value)),
            }
        }

        fn remove_boxed(&mut self, key: &dyn Reflect) -> Option<Box<dyn Reflect>> {
            let key = key.downcast_ref::<K>()?;
            Self::remove(self, key).map(|value| Box::new(value) as Box<dyn Reflect>)
        }

        fn len(&self) -> usize {
            Self::len(self)
        }

        fn iter_entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
            Box::new(
                Self::iter(self).map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
            )
        }
    };
}

/// Implement the [`Reflect`] methods shared by the standard map containers.
macro_rules! impl_reflect_fns_for_map {
    () => {
        crate::reflection::impl_reflect_cast_fn!(Map);

        fn reflect_clone(&self) -> Result<Box<dyn Reflect>, ReflectCloneError> {
            let mut out = Self::new();
            for (key, value) in Self::iter(self) {
                let key = key
                    .reflect_clone()?
                    .take::<K>()
                    .map_err(|_| ReflectCloneError::NotCloneable {
                        type_path: K::type_path(),
                    })?;
                let value = value
                    .reflect_clone()?
                    .take::<V>()
                    .map_err(|_| ReflectCloneError::NotCloneable {
                        type_path: V::type_path(),
                    })?;
                out.insert(key, value);
            }
            Ok(Box::new(out))
        }

        fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
            crate::impls::map_partial_eq(self, other)
        }
    };
}

impl<K: TypePath, V: TypePath> TypePath for HashMap<K, V> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&[
                "std::collections::HashMap<",
                K::type_path(),
                ", ",
                V::type_path(),
                ">",
            ])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["HashMap<", K::type_name(), ", ", V::type_name(), ">"])
        })
    }
}

impl<K, V> Typed for HashMap<K, V>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
    }
}

impl<K, V> Map for HashMap<K, V>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
{
    impl_reflect_map_fns!();
}

impl<K, V> Reflect for HashMap<K, V>
where
    K: Reflect + Typed + Eq + Hash,
    V: Reflect + Typed,
{
    impl_reflect_fns_for_map!();
}

impl<K, V> GetTypeMeta for HashMap<K, V>
where
    K: Reflect + Typed + Eq + Hash + GetTypeMeta,
    V: Reflect + Typed + GetTypeMeta,
{
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<K>();
        registry.register::<V>();
    }
}

impl<K: TypePath, V: TypePath> TypePath for BTreeMap<K, V> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&[
                "alloc::collections::BTreeMap<",
                K::type_path(),
                ", ",
                V::type_path(),
                ">",
            ])
        })
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| {
            concat(&["BTreeMap<", K::type_name(), ", ", V::type_name(), ">"])
        })
    }
}

impl<K, V> Typed for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
    }
}

impl<K, V> Map for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    impl_reflect_map_fns!();
}

impl<K, V> Reflect for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord,
    V: Reflect + Typed,
{
    impl_reflect_fns_for_map!();
}

impl<K, V> GetTypeMeta for BTreeMap<K, V>
where
    K: Reflect + Typed + Ord + GetTypeMeta,
    V: Reflect + Typed + GetTypeMeta,
{
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<K>();
        registry.register::<V>();
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::Reflect;
    use crate::info::ReflectKind;
    use crate::ops::Map;

    #[test]
    fn hash_map_reflects_as_map() {
        let mut table = HashMap::new();
        table.insert(String::from("a"), 1_i32);
        table.insert(String::from("b"), 2_i32);

        assert_eq!(table.reflect_kind(), ReflectKind::Map);

        let map: &dyn Map = &table;
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get_as::<String, i32>(&String::from("b")),
            Some(&2)
        );
        assert!(map.get(&3_i32).is_none());
    }

    #[test]
    fn insert_boxed_rejects_wrong_types() {
        let mut table: HashMap<String, i32> = HashMap::new();
        let map: &mut dyn Map = &mut table;

        let rejected = map.insert_boxed(
            7_u8.into_boxed_reflect(),
            1_i32.into_boxed_reflect(),
        );
        assert!(rejected.is_err());

        let old = map
            .insert_boxed(
                String::from("a").into_boxed_reflect(),
                1_i32.into_boxed_reflect(),
            )
            .unwrap();
        assert!(old.is_none());
        assert_eq!(table.get("a"), Some(&1));
    }
}
