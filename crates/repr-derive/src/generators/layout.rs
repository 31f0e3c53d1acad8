//! `DataReprType` generation: the per-type field-descriptor table.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{LitStr, Path};

use crate::attrs::DataReprAttrs;
use crate::generators::impl_where_clause;

pub fn generate_type_layout(attrs: &DataReprAttrs, krate: &Path) -> TokenStream {
    let struct_name = &attrs.ident;
    let (impl_generics, ty_generics, _) = attrs.generics.split_for_impl();
    let where_clause = impl_where_clause(attrs, krate);
    let name_lit = LitStr::new(&attrs.display_name(), Span::call_site());

    let mut chain = quote! { #krate::TypeLayout::builder(#name_lit) };

    if let Some(base) = attrs.base_field() {
        let base_ty = &base.ty;
        chain = quote! {
            #chain.extends(<#base_ty as #krate::DataReprType>::type_layout())
        };
    }

    for field in attrs.cell_fields() {
        let cell_lit = LitStr::new(&field.name(), Span::call_site());
        chain = quote! { #chain.cell(#cell_lit) };
    }

    for (name, kind) in attrs.members() {
        let member_lit = LitStr::new(name, Span::call_site());
        let ctor = syn::Ident::new(kind, Span::call_site());
        chain = quote! { #chain.member(#krate::MemberDesc::#ctor(#member_lit)) };
    }

    if attrs.store_field().is_some() {
        chain = quote! { #chain.store() };
    }

    if attrs.skip_falsy {
        chain = quote! { #chain.falsy(#krate::FalsyPolicy::Skip) };
    }

    quote! {
        impl #impl_generics #krate::DataReprType for #struct_name #ty_generics #where_clause {
            fn type_layout() -> &'static #krate::TypeLayout {
                #krate::layout::intern::<Self>(|| #chain.build())
            }
        }
    }
}
