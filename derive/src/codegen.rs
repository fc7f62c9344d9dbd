//! Code generation for the reflection model.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Ident, Type};

use crate::input::{ContainerAttrs, DeclaredProperty, InputKind, ReflectField, ReflectInput};

/// Assembles every generated impl for one derive input.
pub(crate) fn expand(input: &ReflectInput) -> TokenStream {
    let type_path = impl_type_path(input);
    let typed = if input.attrs.skip_type_info {
        TokenStream::new()
    } else {
        impl_typed(input)
    };
    let struct_ops = match &input.kind {
        InputKind::Struct(fields) => impl_struct_ops(&input.ident, fields),
        InputKind::Unit => TokenStream::new(),
    };
    let reflect = impl_reflect(input);
    let type_meta = impl_get_type_meta(input);
    let auto_register = if cfg!(feature = "auto_register") && input.attrs.auto_register {
        impl_auto_register(&input.ident)
    } else {
        TokenStream::new()
    };

    quote! {
        #type_path
        #typed
        #struct_ops
        #reflect
        #type_meta
        #auto_register
    }
}

fn reflected<'a>(fields: &'a [ReflectField]) -> impl Iterator<Item = &'a ReflectField> {
    fields.iter().filter(|field| !field.skip)
}

// -----------------------------------------------------------------------------
// TypePath

fn impl_type_path(input: &ReflectInput) -> TokenStream {
    let ident = &input.ident;
    let name = ident.to_string();

    quote! {
        impl ::mirra::info::TypePath for #ident {
            #[inline]
            fn type_path() -> &'static str {
                ::core::concat!(::core::module_path!(), "::", #name)
            }

            #[inline]
            fn type_name() -> &'static str {
                #name
            }

            #[inline]
            fn module_path() -> ::core::option::Option<&'static str> {
                ::core::option::Option::Some(::core::module_path!())
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Typed

fn impl_typed(input: &ReflectInput) -> TokenStream {
    let ident = &input.ident;
    let info = match &input.kind {
        InputKind::Struct(fields) => struct_info(input, fields),
        InputKind::Unit => {
            let attrs = custom_attributes(&input.attrs);
            quote! {
                ::mirra::info::TypeInfo::Opaque(
                    ::mirra::info::OpaqueInfo::new::<Self>() #attrs
                )
            }
        }
    };

    quote! {
        impl ::mirra::info::Typed for #ident {
            fn type_info() -> &'static ::mirra::info::TypeInfo {
                static CELL: ::mirra::impls::NonGenericTypeInfoCell =
                    ::mirra::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| #info)
            }
        }
    }
}

fn struct_info(input: &ReflectInput, fields: &[ReflectField]) -> TokenStream {
    let named_fields = reflected(fields).map(named_field);

    let properties: Vec<TokenStream> = reflected(fields)
        .filter(|field| field.getter.is_some() || field.setter.is_some())
        .map(|field| field_property(&input.ident, field))
        .chain(
            input
                .attrs
                .properties
                .iter()
                .map(|property| declared_property(&input.ident, property)),
        )
        .collect();
    let with_properties = if properties.is_empty() {
        TokenStream::new()
    } else {
        quote! { .with_properties(&[#(#properties),*]) }
    };

    let attrs = custom_attributes(&input.attrs);

    quote! {
        ::mirra::info::TypeInfo::Struct(
            ::mirra::info::StructInfo::new::<Self>(&[#(#named_fields),*])
                #with_properties
                #attrs
        )
    }
}

fn named_field(field: &ReflectField) -> TokenStream {
    let name = field.ident.to_string();
    let ty = &field.ty;

    let mut tokens = quote! { ::mirra::info::NamedField::new::<#ty>(#name) };
    let flags: Vec<TokenStream> = [
        (field.readonly, quote!(::mirra::info::FieldFlags::READONLY)),
        (field.base, quote!(::mirra::info::FieldFlags::BASE)),
    ]
    .into_iter()
    .filter_map(|(set, flag)| set.then_some(flag))
    .collect();
    match flags.as_slice() {
        [] => {}
        [flag] => tokens.extend(quote! { .with_flags(#flag) }),
        [first, rest @ ..] => tokens.extend(quote! { .with_flags(#first #(.union(#rest))*) }),
    }
    if !field.custom.is_empty() {
        let custom = &field.custom;
        tokens.extend(quote! {
            .with_custom_attributes(
                ::mirra::info::CustomAttributes::new() #(.with_attribute(#custom))*
            )
        });
    }
    tokens
}

fn custom_attributes(attrs: &ContainerAttrs) -> TokenStream {
    let annotation = attrs
        .annotation
        .then(|| quote! { .with_attribute(::mirra::info::Annotation) });
    if attrs.custom.is_empty() && annotation.is_none() {
        return TokenStream::new();
    }
    let custom = &attrs.custom;
    quote! {
        .with_custom_attributes(
            ::mirra::info::CustomAttributes::new() #annotation #(.with_attribute(#custom))*
        )
    }
}

// -----------------------------------------------------------------------------
// Properties

fn field_property(ident: &Ident, field: &ReflectField) -> TokenStream {
    let name = field.ident.to_string();
    property_tokens(ident, &name, &field.ty, &field.getter, &field.setter)
}

fn declared_property(ident: &Ident, property: &DeclaredProperty) -> TokenStream {
    let name = property.name.value();
    property_tokens(
        ident,
        &name,
        &property.ty,
        &property.getter,
        &property.setter,
    )
}

fn property_tokens(
    ident: &Ident,
    name: &str,
    ty: &Type,
    getter: &Option<Ident>,
    setter: &Option<Ident>,
) -> TokenStream {
    let mut tokens = quote! { ::mirra::info::PropertyInfo::new::<#ty>(#name) };

    if let Some(getter) = getter {
        let method = getter.to_string();
        tokens.extend(quote! {
            .with_getter(#method, |receiver| {
                let receiver = receiver.downcast_ref::<#ident>()?;
                ::core::option::Option::Some(
                    ::std::boxed::Box::new(#ident::#getter(receiver))
                        as ::std::boxed::Box<dyn ::mirra::Reflect>,
                )
            })
        });
    }

    if let Some(setter) = setter {
        let method = setter.to_string();
        tokens.extend(quote! {
            .with_setter(#method, |receiver, value| {
                let ::core::option::Option::Some(receiver) = receiver.downcast_mut::<#ident>()
                else {
                    return ::core::result::Result::Err(value);
                };
                let value = value.take::<#ty>()?;
                #ident::#setter(receiver, value);
                ::core::result::Result::Ok(())
            })
        });
    }

    tokens
}

// -----------------------------------------------------------------------------
// Struct ops

fn impl_struct_ops(ident: &Ident, fields: &[ReflectField]) -> TokenStream {
    let idents: Vec<&Ident> = reflected(fields).map(|field| &field.ident).collect();
    let names: Vec<String> = idents.iter().map(|ident| ident.to_string()).collect();
    let indices: Vec<usize> = (0..idents.len()).collect();
    let len = idents.len();

    quote! {
        impl ::mirra::ops::Struct for #ident {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn ::mirra::Reflect> {
                match name {
                    #(#names => ::core::option::Option::Some(&self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn ::mirra::Reflect> {
                match name {
                    #(#names => ::core::option::Option::Some(&mut self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn ::mirra::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn ::mirra::Reflect> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&str> {
                match index {
                    #(#indices => ::core::option::Option::Some(#names),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #len
            }

            #[inline]
            fn iter_fields(&self) -> ::mirra::ops::StructFieldIter<'_> {
                ::mirra::ops::StructFieldIter::new(self)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Reflect

fn impl_reflect(input: &ReflectInput) -> TokenStream {
    let ident = &input.ident;
    let kind = match &input.kind {
        InputKind::Struct(_) => quote!(Struct),
        InputKind::Unit => quote!(Opaque),
    };

    let reflect_clone = reflect_clone_tokens(input);
    let reflect_partial_eq = reflect_partial_eq_tokens(input);
    let reflect_debug = input.attrs.debug.then(|| {
        quote! {
            fn reflect_debug(
                &self,
                f: &mut ::core::fmt::Formatter,
            ) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }
    });

    quote! {
        impl ::mirra::Reflect for #ident {
            fn set(
                &mut self,
                value: ::std::boxed::Box<dyn ::mirra::Reflect>,
            ) -> ::core::result::Result<(), ::std::boxed::Box<dyn ::mirra::Reflect>> {
                *self = value.take::<Self>()?;
                ::core::result::Result::Ok(())
            }

            #[inline]
            fn reflect_kind(&self) -> ::mirra::info::ReflectKind {
                ::mirra::info::ReflectKind::#kind
            }

            #[inline]
            fn reflect_ref(&self) -> ::mirra::ops::ReflectRef<'_> {
                ::mirra::ops::ReflectRef::#kind(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ::mirra::ops::ReflectMut<'_> {
                ::mirra::ops::ReflectMut::#kind(self)
            }

            #reflect_clone
            #reflect_partial_eq
            #reflect_debug
        }
    }
}

fn reflect_clone_tokens(input: &ReflectInput) -> TokenStream {
    if input.attrs.clone {
        return quote! {
            #[inline]
            fn reflect_clone(
                &self,
            ) -> ::core::result::Result<
                ::std::boxed::Box<dyn ::mirra::Reflect>,
                ::mirra::ops::ReflectCloneError,
            > {
                ::core::result::Result::Ok(::std::boxed::Box::new(
                    ::core::clone::Clone::clone(self),
                ))
            }
        };
    }

    let body = match &input.kind {
        // A unit struct is trivially rebuildable.
        InputKind::Unit => quote! {
            ::core::result::Result::Ok(::std::boxed::Box::new(Self))
        },
        InputKind::Struct(fields) if fields.iter().any(|field| field.skip) => quote! {
            // Skipped fields cannot be rebuilt from reflection.
            ::core::result::Result::Err(::mirra::ops::ReflectCloneError::NotCloneable {
                type_path: <Self as ::mirra::info::TypePath>::type_path(),
            })
        },
        InputKind::Struct(fields) => {
            let cloned = fields.iter().map(|field| {
                let ident = &field.ident;
                let name = ident.to_string();
                let ty = &field.ty;
                quote! {
                    #ident: ::mirra::Reflect::reflect_clone(&self.#ident)?
                        .take::<#ty>()
                        .map_err(|_| ::mirra::ops::ReflectCloneError::FieldNotCloneable {
                            field: #name,
                            container_type_path: <Self as ::mirra::info::TypePath>::type_path(),
                        })?
                }
            });
            quote! {
                ::core::result::Result::Ok(::std::boxed::Box::new(Self {
                    #(#cloned),*
                }))
            }
        }
    };

    quote! {
        fn reflect_clone(
            &self,
        ) -> ::core::result::Result<
            ::std::boxed::Box<dyn ::mirra::Reflect>,
            ::mirra::ops::ReflectCloneError,
        > {
            #body
        }
    }
}

fn reflect_partial_eq_tokens(input: &ReflectInput) -> TokenStream {
    let body = if input.attrs.partial_eq {
        quote! {
            match other.downcast_ref::<Self>() {
                ::core::option::Option::Some(other) => {
                    ::core::option::Option::Some(::core::cmp::PartialEq::eq(self, other))
                }
                ::core::option::Option::None => ::core::option::Option::Some(false),
            }
        }
    } else {
        match &input.kind {
            InputKind::Struct(_) => quote! {
                ::mirra::impls::struct_partial_eq(self, other)
            },
            InputKind::Unit => quote! {
                ::core::option::Option::Some(other.is::<Self>())
            },
        }
    };

    quote! {
        fn reflect_partial_eq(
            &self,
            other: &dyn ::mirra::Reflect,
        ) -> ::core::option::Option<bool> {
            #body
        }
    }
}

// -----------------------------------------------------------------------------
// Registration

fn impl_get_type_meta(input: &ReflectInput) -> TokenStream {
    let ident = &input.ident;

    let insert_default = input.attrs.default.then(|| {
        quote! {
            meta.insert_trait::<::mirra::registry::TypeTraitDefault>(
                <::mirra::registry::TypeTraitDefault as ::mirra::registry::FromType<Self>>::from_type(),
            );
        }
    });
    let meta_body = match &insert_default {
        Some(insert) => quote! {
            let mut meta = ::mirra::registry::TypeMeta::of::<Self>();
            #insert
            meta
        },
        None => quote! {
            ::mirra::registry::TypeMeta::of::<Self>()
        },
    };

    let dependencies = match &input.kind {
        InputKind::Struct(fields) => {
            let types: Vec<&Type> = reflected(fields).map(|field| &field.ty).collect();
            quote! {
                fn register_dependencies(registry: &mut ::mirra::registry::TypeRegistry) {
                    #(registry.register::<#types>();)*
                }
            }
        }
        InputKind::Unit => TokenStream::new(),
    };

    quote! {
        impl ::mirra::registry::GetTypeMeta for #ident {
            fn get_type_meta() -> ::mirra::registry::TypeMeta {
                #meta_body
            }

            #dependencies
        }
    }
}

fn impl_auto_register(ident: &Ident) -> TokenStream {
    quote! {
        const _: () = {
            ::mirra::__macro_exports::inventory::submit! {
                ::mirra::registry::AutoRegistration {
                    register: |registry| registry.register::<#ident>(),
                }
            }
        };
    }
}
