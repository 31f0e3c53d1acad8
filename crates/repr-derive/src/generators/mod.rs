//! Code generators for the `DataRepr` derive macro.
//!
//! - `layout`: the `DataReprType` impl holding the interned field-descriptor table
//! - `instance`: the `DataRepr` impl with per-field attribute lookup
//! - `debug`: a `Debug` impl rendering through `fmt_repr`
//! - `truthy`: a `Truthy` impl so instances can sit in stores and dynamic values

mod debug;
mod instance;
mod layout;
mod truthy;

pub use debug::generate_debug;
pub use instance::generate_data_repr;
pub use layout::generate_type_layout;
pub use truthy::generate_truthy;

use syn::{Path, WhereClause};

use crate::attrs::{DataReprAttrs, Truthiness};

/// The where clause shared by every generated impl.
///
/// Layouts are interned per `TypeId`, so type parameters must be `'static`;
/// they are rendered through `Debug`. Cell types built from type parameters
/// must be `Truthy`. The base field must itself carry a layout and the store
/// field must expose its keys.
pub(crate) fn impl_where_clause(attrs: &DataReprAttrs, krate: &Path) -> WhereClause {
    let mut where_clause = attrs
        .generics
        .where_clause
        .clone()
        .unwrap_or_else(|| syn::parse_quote!(where));

    for param in attrs.generics.type_params() {
        let ident = &param.ident;
        where_clause
            .predicates
            .push(syn::parse_quote!(#ident: ::core::fmt::Debug + 'static));
    }

    for field in attrs.cell_fields() {
        if let Truthiness::Bounded(ty) = attrs.truthiness(field) {
            where_clause
                .predicates
                .push(syn::parse_quote!(#ty: #krate::Truthy));
        }
    }

    if let Some(base) = attrs.base_field() {
        let ty = &base.ty;
        where_clause
            .predicates
            .push(syn::parse_quote!(#ty: #krate::DataReprType));
    }

    if let Some(store) = attrs.store_field() {
        let ty = &store.ty;
        where_clause
            .predicates
            .push(syn::parse_quote!(#ty: #krate::AttrStore));
    }

    where_clause
}
