//! `Truthy` generation: instances of a derived type always count as truthy.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Path;

use crate::attrs::DataReprAttrs;

pub fn generate_truthy(attrs: &DataReprAttrs, krate: &Path) -> TokenStream {
    if attrs.no_truthy {
        return quote! {};
    }

    let struct_name = &attrs.ident;
    let (impl_generics, ty_generics, where_clause) = attrs.generics.split_for_impl();

    quote! {
        impl #impl_generics #krate::Truthy for #struct_name #ty_generics #where_clause {
            fn is_truthy(&self) -> bool {
                true
            }
        }
    }
}
