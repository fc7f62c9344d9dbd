//! Reflection implementations for opaque standard types.

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{OpaqueInfo, TypeInfo, TypePath, Typed};
use crate::registry::{FromType, GetTypeMeta, TypeMeta, TypeTraitDefault};

/// Implement the [`Reflect`] methods shared by all opaque `Clone` types.
macro_rules! impl_opaque_reflect_fns {
    () => {
        $crate::reflection::impl_reflect_cast_fn!(Opaque);

        #[inline]
        fn reflect_clone(
            &self,
        ) -> Result<::std::boxed::Box<dyn $crate::Reflect>, $crate::ops::ReflectCloneError> {
            Ok(::std::boxed::Box::new(Clone::clone(self)))
        }

        fn reflect_partial_eq(&self, value: &dyn $crate::Reflect) -> Option<bool> {
            match <dyn $crate::Reflect>::downcast_ref::<Self>(value) {
                Some(value) => Some(PartialEq::eq(self, value)),
                None => Some(false),
            }
        }

        fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
            ::core::fmt::Debug::fmt(self, f)
        }
    };
}

pub(crate) use impl_opaque_reflect_fns;

macro_rules! impl_reflect_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TypePath for $ty {
                #[inline]
                fn type_path() -> &'static str {
                    stringify!($ty)
                }
                #[inline]
                fn type_name() -> &'static str {
                    stringify!($ty)
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

            impl GetTypeMeta for $ty {
                fn get_type_meta() -> TypeMeta {
                    let mut meta = TypeMeta::of::<Self>();
                    meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
                    meta
                }
            }
        )*
    };
}

impl_reflect_primitive!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64,
);

impl TypePath for String {
    #[inline]
    fn type_path() -> &'static str {
        "alloc::string::String"
    }
    #[inline]
    fn type_name() -> &'static str {
        "String"
    }
}

impl Typed for String {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl Reflect for String {
    impl_opaque_reflect_fns!();
}

impl GetTypeMeta for String {
    fn get_type_meta() -> TypeMeta {
        let mut meta = TypeMeta::of::<Self>();
        meta.insert_trait::<TypeTraitDefault>(FromType::<Self>::from_type());
        meta
    }
}

impl TypePath for &'static str {
    #[inline]
    fn type_path() -> &'static str {
        "&str"
    }
    #[inline]
    fn type_name() -> &'static str {
        "&str"
    }
}

impl Typed for &'static str {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Opaque(OpaqueInfo::new::<Self>()))
    }
}

impl Reflect for &'static str {
    impl_opaque_reflect_fns!();
}

impl GetTypeMeta for &'static str {
    fn get_type_meta() -> TypeMeta {
        TypeMeta::of::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{ReflectKind, Typed};

    #[test]
    fn primitive_info_is_opaque() {
        assert_eq!(i32::type_info().kind(), ReflectKind::Opaque);
        assert_eq!(i32::type_info().ty().path(), "i32");
        assert_eq!(String::type_info().ty().name(), "String");
    }

    #[test]
    fn opaque_partial_eq_crosses_types() {
        let a: Box<dyn Reflect> = 10_i32.into_boxed_reflect();
        assert_eq!(a.reflect_partial_eq(&20_u32), Some(false));
        assert_eq!(a.reflect_partial_eq(&10_i32), Some(true));
    }

    #[test]
    fn set_replaces_value() {
        let mut value = String::from("before");
        value
            .set(String::from("after").into_boxed_reflect())
            .unwrap();
        assert_eq!(value, "after");
    }
}
