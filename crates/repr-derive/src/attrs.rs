//! Attribute parsing for `#[derive(DataRepr)]` using darling.
//!
//! Container and field options live under `#[data_repr(...)]`.

use darling::{FromDeriveInput, FromField, FromMeta};
use proc_macro2::{TokenStream, TokenTree};
use quote::ToTokens;
use syn::ext::IdentExt;
use syn::{GenericArgument, Ident, PathArguments, Type};

/// A type-level member named in a container attribute, such as
/// `#[data_repr(computed(name = "area"))]`.
#[derive(Debug, Clone, FromMeta)]
pub struct MemberAttrs {
    pub name: String,
}

/// Container-level attributes.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(data_repr), supports(struct_named, struct_unit))]
pub struct DataReprAttrs {
    pub ident: Ident,
    pub generics: syn::Generics,
    pub data: darling::ast::Data<(), DataReprFieldAttrs>,

    /// Display name of the type (defaults to the struct name).
    #[darling(default)]
    pub name: Option<String>,

    /// Omit attributes whose value is falsy.
    #[darling(default)]
    pub skip_falsy: bool,

    /// Do not emit a `Debug` impl.
    #[darling(default)]
    pub no_debug: bool,

    /// Do not emit a `Truthy` impl.
    #[darling(default)]
    pub no_truthy: bool,

    #[darling(default, multiple)]
    pub computed: Vec<MemberAttrs>,

    #[darling(default, multiple)]
    pub constant: Vec<MemberAttrs>,

    #[darling(default, multiple)]
    pub method: Vec<MemberAttrs>,
}

/// Field-level attributes.
#[derive(Debug, Clone, FromField)]
#[darling(attributes(data_repr))]
pub struct DataReprFieldAttrs {
    pub ident: Option<Ident>,
    pub ty: Type,

    /// The field embeds the parent type.
    #[darling(default)]
    pub base: bool,

    /// The field is the free-form associative store.
    #[darling(default)]
    pub store: bool,

    /// Render an `Option` field as-is instead of treating `None` as unbound.
    #[darling(default)]
    pub bound: bool,

    /// Only `Debug` is required of the value; it always counts as truthy.
    #[darling(default)]
    pub opaque: bool,
}

/// How a field participates in the representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    Base,
    Store,
    /// A storage cell that is unbound while `None`.
    OptionalCell,
    Cell,
}

/// How the truthiness of a cell value is decided in generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Truthiness {
    /// Autoref probe: `Truthy` when implemented, truthy otherwise.
    Probe,
    /// The value type mentions a type parameter, so the probe cannot see
    /// through it; the impl is bounded on `Truthy` for this type instead.
    Bounded(Type),
    Opaque,
}

impl DataReprAttrs {
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.ident.to_string())
    }

    pub fn fields(&self) -> impl Iterator<Item = &DataReprFieldAttrs> {
        match &self.data {
            darling::ast::Data::Struct(fields) => fields.iter(),
            _ => unreachable!("DataReprAttrs only supports structs"),
        }
    }

    pub fn base_field(&self) -> Option<&DataReprFieldAttrs> {
        self.fields().find(|f| f.base)
    }

    pub fn store_field(&self) -> Option<&DataReprFieldAttrs> {
        self.fields().find(|f| f.store)
    }

    pub fn cell_fields(&self) -> impl Iterator<Item = &DataReprFieldAttrs> {
        self.fields()
            .filter(|f| matches!(f.role(), FieldRole::Cell | FieldRole::OptionalCell))
    }

    fn type_params(&self) -> Vec<&Ident> {
        self.generics.type_params().map(|param| &param.ident).collect()
    }

    /// Truthiness strategy for a cell field of this struct.
    pub fn truthiness(&self, field: &DataReprFieldAttrs) -> Truthiness {
        if field.opaque {
            return Truthiness::Opaque;
        }
        let value_ty = match field.role() {
            FieldRole::OptionalCell => option_inner_type(&field.ty).unwrap_or(&field.ty),
            _ => &field.ty,
        };
        if mentions_any(value_ty.to_token_stream(), &self.type_params()) {
            Truthiness::Bounded(value_ty.clone())
        } else {
            Truthiness::Probe
        }
    }

    /// Type-level members as `(name, kind)` pairs, in declaration order per
    /// kind.
    pub fn members(&self) -> impl Iterator<Item = (&str, &'static str)> {
        let computed = self.computed.iter().map(|m| (m.name.as_str(), "computed"));
        let constant = self.constant.iter().map(|m| (m.name.as_str(), "constant"));
        let method = self.method.iter().map(|m| (m.name.as_str(), "method"));
        computed.chain(constant).chain(method)
    }

    /// Validate all fields and container-level attributes.
    ///
    /// Returns a list of validation errors, or empty vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.fields().filter(|f| f.base).count() > 1 {
            errors.push(format!(
                "struct `{}` has more than one `base` field",
                self.ident
            ));
        }
        if self.fields().filter(|f| f.store).count() > 1 {
            errors.push(format!(
                "struct `{}` has more than one `store` field",
                self.ident
            ));
        }

        for field in self.fields() {
            if let Err(e) = field.validate() {
                errors.push(e);
            }
        }

        let cells: Vec<String> = self.cell_fields().map(|f| f.name()).collect();
        let mut members: Vec<&str> = Vec::new();
        for (name, _) in self.members() {
            if cells.iter().any(|cell| cell == name) {
                errors.push(format!(
                    "member `{}` conflicts with a field of struct `{}`",
                    name, self.ident
                ));
            }
            if members.contains(&name) {
                errors.push(format!(
                    "member `{}` is declared more than once on struct `{}`",
                    name, self.ident
                ));
            }
            members.push(name);
        }

        errors
    }
}

impl DataReprFieldAttrs {
    /// The attribute name, with any `r#` prefix removed.
    pub fn name(&self) -> String {
        self.ident
            .as_ref()
            .expect("DataReprFieldAttrs requires named fields")
            .unraw()
            .to_string()
    }

    pub fn role(&self) -> FieldRole {
        if self.base {
            FieldRole::Base
        } else if self.store {
            FieldRole::Store
        } else if !self.bound && is_option_type(&self.ty) {
            FieldRole::OptionalCell
        } else {
            FieldRole::Cell
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        let flags = [self.base, self.store, self.bound]
            .iter()
            .filter(|flag| **flag)
            .count();
        if flags > 1 {
            return Err(format!(
                "field `{}`: `base`, `store` and `bound` are mutually exclusive",
                self.name()
            ));
        }
        if self.opaque && (self.base || self.store) {
            return Err(format!(
                "field `{}`: `opaque` only applies to storage cells",
                self.name()
            ));
        }
        if self.bound && !is_option_type(&self.ty) {
            return Err(format!(
                "field `{}`: `bound` only applies to `Option` fields",
                self.name()
            ));
        }
        Ok(())
    }
}

/// Check if a type is `Option<...>`.
pub fn is_option_type(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty
        && type_path.qself.is_none()
        && let Some(segment) = type_path.path.segments.last()
    {
        return segment.ident == "Option";
    }
    false
}

/// The `T` of an `Option<T>` type.
pub fn option_inner_type(ty: &Type) -> Option<&Type> {
    if let Type::Path(type_path) = ty
        && type_path.qself.is_none()
        && let Some(segment) = type_path.path.segments.last()
        && segment.ident == "Option"
        && let PathArguments::AngleBracketed(args) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = args.args.first()
    {
        return Some(inner);
    }
    None
}

fn mentions_any(tokens: TokenStream, idents: &[&Ident]) -> bool {
    tokens.into_iter().any(|tree| match tree {
        TokenTree::Ident(ident) => idents.contains(&&ident),
        TokenTree::Group(group) => mentions_any(group.stream(), idents),
        _ => false,
    })
}
