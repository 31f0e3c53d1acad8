//! `Debug` generation: the namedtuple-style rendering.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Path;

use crate::attrs::DataReprAttrs;
use crate::generators::impl_where_clause;

pub fn generate_debug(attrs: &DataReprAttrs, krate: &Path) -> TokenStream {
    if attrs.no_debug {
        return quote! {};
    }

    let struct_name = &attrs.ident;
    let (impl_generics, ty_generics, _) = attrs.generics.split_for_impl();
    let where_clause = impl_where_clause(attrs, krate);

    quote! {
        impl #impl_generics ::core::fmt::Debug for #struct_name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #krate::fmt_repr(self, f)
            }
        }
    }
}
