//! Parsing of the derive input into a reflection model.

use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Expr, Fields, Ident, LitBool, LitStr, Token, Type};

const REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Model

/// The reflection model of one derive input.
pub(crate) struct ReflectInput {
    pub ident: Ident,
    pub kind: InputKind,
    pub attrs: ContainerAttrs,
}

/// Which shape of type is being derived.
pub(crate) enum InputKind {
    /// A struct with named fields.
    Struct(Vec<ReflectField>),
    /// A unit struct, reflected as an opaque value.
    Unit,
}

/// Container-level `#[reflect(..)]` arguments.
#[derive(Default)]
pub(crate) struct ContainerAttrs {
    pub annotation: bool,
    pub clone: bool,
    pub partial_eq: bool,
    pub debug: bool,
    pub default: bool,
    pub auto_register: bool,
    /// `type_info = false` skips the `Typed` impl.
    pub skip_type_info: bool,
    pub properties: Vec<DeclaredProperty>,
    pub custom: Vec<Expr>,
}

/// A struct-level `property(..)` declaration, for properties without a
/// backing field.
pub(crate) struct DeclaredProperty {
    pub name: LitStr,
    pub ty: Type,
    pub getter: Option<Ident>,
    pub setter: Option<Ident>,
}

/// One named field together with its `#[reflect(..)]` arguments.
pub(crate) struct ReflectField {
    pub ident: Ident,
    pub ty: Type,
    pub readonly: bool,
    pub base: bool,
    pub skip: bool,
    pub getter: Option<Ident>,
    pub setter: Option<Ident>,
    pub custom: Vec<Expr>,
}

// -----------------------------------------------------------------------------
// Attribute grammar

/// One argument inside `#[reflect(..)]`.
enum ReflectArg {
    /// A bare word, such as `clone` or `readonly`.
    Flag(Ident),
    /// `get = method` or `set = method`.
    Accessor { kind: Ident, method: Ident },
    /// `type_info = false`.
    TypeInfo(bool),
    /// `property(name = "..", ty = .., get = .., set = ..)`.
    Property(DeclaredProperty),
    /// `@EXPR`, a custom attribute instance.
    Custom(Expr),
}

impl Parse for ReflectArg {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.peek(Token![@]) {
            input.parse::<Token![@]>()?;
            return Ok(Self::Custom(input.parse()?));
        }

        let ident: Ident = input.parse()?;
        if ident == "property" {
            let content;
            syn::parenthesized!(content in input);
            return Ok(Self::Property(content.parse()?));
        }

        if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            if ident == "get" || ident == "set" {
                return Ok(Self::Accessor {
                    kind: ident,
                    method: input.parse()?,
                });
            }
            if ident == "type_info" {
                let value: LitBool = input.parse()?;
                return Ok(Self::TypeInfo(value.value));
            }
            return Err(syn::Error::new(
                ident.span(),
                format!("`{ident}` does not take a value"),
            ));
        }

        Ok(Self::Flag(ident))
    }
}

impl Parse for DeclaredProperty {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut name = None;
        let mut ty = None;
        let mut getter = None;
        let mut setter = None;

        while !input.is_empty() {
            let key: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            if key == "name" {
                name = Some(input.parse::<LitStr>()?);
            } else if key == "ty" {
                ty = Some(input.parse::<Type>()?);
            } else if key == "get" {
                getter = Some(input.parse::<Ident>()?);
            } else if key == "set" {
                setter = Some(input.parse::<Ident>()?);
            } else {
                return Err(syn::Error::new(
                    key.span(),
                    format!("unknown property argument `{key}`"),
                ));
            }
            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }

        let name = name.ok_or_else(|| input.error("a property needs `name = \"..\"`"))?;
        let ty = ty.ok_or_else(|| input.error("a property needs `ty = ..`"))?;
        if getter.is_none() && setter.is_none() {
            return Err(syn::Error::new(
                name.span(),
                "a property needs at least one of `get` and `set`",
            ));
        }

        Ok(Self {
            name,
            ty,
            getter,
            setter,
        })
    }
}

fn reflect_args(attrs: &[Attribute]) -> syn::Result<Vec<ReflectArg>> {
    let mut args = Vec::new();
    for attr in attrs {
        if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
            continue;
        }
        let parsed =
            attr.parse_args_with(Punctuated::<ReflectArg, Token![,]>::parse_terminated)?;
        args.extend(parsed);
    }
    Ok(args)
}

// -----------------------------------------------------------------------------
// Input parsing

impl ReflectInput {
    pub(crate) fn parse(input: &DeriveInput) -> syn::Result<Self> {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new(
                input.generics.span(),
                "#[derive(Reflect)] does not support generic types",
            ));
        }

        let Data::Struct(data) = &input.data else {
            return Err(syn::Error::new(
                input.ident.span(),
                "#[derive(Reflect)] only supports structs",
            ));
        };

        let attrs = ContainerAttrs::parse(&input.attrs)?;
        let kind = match &data.fields {
            Fields::Named(fields) => {
                let fields = fields
                    .named
                    .iter()
                    .map(ReflectField::parse)
                    .collect::<syn::Result<Vec<_>>>()?;
                let bases = fields.iter().filter(|field| field.base).count();
                if bases > 1 {
                    return Err(syn::Error::new(
                        input.ident.span(),
                        "at most one field may carry `#[reflect(base)]`",
                    ));
                }
                InputKind::Struct(fields)
            }
            Fields::Unit => InputKind::Unit,
            Fields::Unnamed(fields) => {
                return Err(syn::Error::new(
                    fields.span(),
                    "#[derive(Reflect)] does not support tuple structs",
                ));
            }
        };

        Ok(Self {
            ident: input.ident.clone(),
            kind,
            attrs,
        })
    }
}

impl ContainerAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for arg in reflect_args(attrs)? {
            match arg {
                ReflectArg::Flag(flag) => {
                    if flag == "annotation" {
                        parsed.annotation = true;
                    } else if flag == "clone" {
                        parsed.clone = true;
                    } else if flag == "partial_eq" {
                        parsed.partial_eq = true;
                    } else if flag == "debug" {
                        parsed.debug = true;
                    } else if flag == "default" {
                        parsed.default = true;
                    } else if flag == "auto_register" {
                        parsed.auto_register = true;
                    } else {
                        return Err(syn::Error::new(
                            flag.span(),
                            format!("unknown container attribute `{flag}`"),
                        ));
                    }
                }
                ReflectArg::TypeInfo(emit) => parsed.skip_type_info = !emit,
                ReflectArg::Property(property) => parsed.properties.push(property),
                ReflectArg::Custom(expr) => parsed.custom.push(expr),
                ReflectArg::Accessor { kind, .. } => {
                    return Err(syn::Error::new(
                        kind.span(),
                        "accessors belong on fields, or inside `property(..)`",
                    ));
                }
            }
        }
        Ok(parsed)
    }
}

impl ReflectField {
    fn parse(field: &syn::Field) -> syn::Result<Self> {
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;

        let mut parsed = Self {
            ident,
            ty: field.ty.clone(),
            readonly: false,
            base: false,
            skip: false,
            getter: None,
            setter: None,
            custom: Vec::new(),
        };

        for arg in reflect_args(&field.attrs)? {
            match arg {
                ReflectArg::Flag(flag) => {
                    if flag == "readonly" {
                        parsed.readonly = true;
                    } else if flag == "base" {
                        parsed.base = true;
                    } else if flag == "skip" {
                        parsed.skip = true;
                    } else {
                        return Err(syn::Error::new(
                            flag.span(),
                            format!("unknown field attribute `{flag}`"),
                        ));
                    }
                }
                ReflectArg::Accessor { kind, method } => {
                    if kind == "get" {
                        parsed.getter = Some(method);
                    } else {
                        parsed.setter = Some(method);
                    }
                }
                ReflectArg::Custom(expr) => parsed.custom.push(expr),
                ReflectArg::TypeInfo(_) => {
                    return Err(syn::Error::new(
                        parsed.ident.span(),
                        "`type_info` can only be applied at the type level",
                    ));
                }
                ReflectArg::Property(property) => {
                    return Err(syn::Error::new(
                        property.name.span(),
                        "`property(..)` can only be applied at the type level",
                    ));
                }
            }
        }

        if parsed.skip && (parsed.getter.is_some() || parsed.setter.is_some()) {
            return Err(syn::Error::new(
                parsed.ident.span(),
                "a skipped field cannot declare accessors",
            ));
        }

        Ok(parsed)
    }
}
