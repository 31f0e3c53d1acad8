//! `DataRepr` generation: per-instance attribute lookup.
//!
//! Own fields resolve first, then the embedded base, then the store.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{LitStr, Path};

use crate::attrs::{DataReprAttrs, DataReprFieldAttrs, FieldRole, Truthiness};
use crate::generators::impl_where_clause;

pub fn generate_data_repr(attrs: &DataReprAttrs, krate: &Path) -> TokenStream {
    let struct_name = &attrs.ident;
    let (impl_generics, ty_generics, _) = attrs.generics.split_for_impl();
    let where_clause = impl_where_clause(attrs, krate);

    let arms: Vec<TokenStream> = attrs
        .cell_fields()
        .map(|field| generate_cell_arm(field, attrs.truthiness(field), krate))
        .collect();

    let own_lookup = if arms.is_empty() {
        quote! {}
    } else {
        quote! {
            #[allow(unused_imports)]
            use #krate::__private::{ViaDefault as _, ViaTruthy as _};
            match name {
                #(#arms)*
                _ => {}
            }
        }
    };

    let base_lookup = attrs.base_field().map(|base| {
        let ident = &base.ident;
        quote! { #krate::DataRepr::attr(&self.#ident, name) }
    });
    let store_lookup = attrs.store_field().map(|store| {
        let ident = &store.ident;
        quote! { #krate::AttrStore::get_attr(&self.#ident, name) }
    });
    let fallback = match (base_lookup, store_lookup) {
        (Some(base), Some(store)) => quote! { #base.or_else(|| #store) },
        (Some(base), None) => base,
        (None, Some(store)) => store,
        (None, None) => quote! {
            let _ = name;
            ::core::option::Option::None
        },
    };

    let store_keys = generate_store_keys(attrs, krate);

    quote! {
        impl #impl_generics #krate::DataRepr for #struct_name #ty_generics #where_clause {
            fn layout(&self) -> &#krate::TypeLayout {
                <Self as #krate::DataReprType>::type_layout()
            }

            #store_keys

            fn attr(&self, name: &str) -> ::core::option::Option<#krate::AttrRef<'_>> {
                #own_lookup
                #fallback
            }
        }
    }
}

fn generate_cell_arm(field: &DataReprFieldAttrs, truthiness: Truthiness, krate: &Path) -> TokenStream {
    let ident = &field.ident;
    let name_lit = LitStr::new(&field.name(), Span::call_site());

    let truthy = |value: TokenStream| match &truthiness {
        Truthiness::Probe => quote! { (&#krate::__private::Probe(#value)).probe_truthy() },
        Truthiness::Bounded(_) => quote! { #krate::Truthy::is_truthy(#value) },
        Truthiness::Opaque => quote! { true },
    };

    match field.role() {
        FieldRole::OptionalCell => {
            let truthy = truthy(quote!(value));
            quote! {
                #name_lit => {
                    return self.#ident.as_ref().map(|value| #krate::AttrRef::new(value, #truthy));
                }
            }
        }
        _ => {
            let truthy = truthy(quote!(&self.#ident));
            quote! {
                #name_lit => {
                    return ::core::option::Option::Some(#krate::AttrRef::new(&self.#ident, #truthy));
                }
            }
        }
    }
}

/// Store keys come from the base (which may carry an inherited store) and
/// from this type's own store field.
fn generate_store_keys(attrs: &DataReprAttrs, krate: &Path) -> TokenStream {
    let base = attrs.base_field();
    let store = attrs.store_field();
    if base.is_none() && store.is_none() {
        return quote! {};
    }

    let base_keys = base.map(|base| {
        let ident = &base.ident;
        quote! { keys.extend(#krate::DataRepr::store_keys(&self.#ident)); }
    });
    let own_keys = store.map(|store| {
        let ident = &store.ident;
        quote! { keys.extend(#krate::AttrStore::keys(&self.#ident)); }
    });

    quote! {
        fn store_keys(&self) -> ::std::vec::Vec<&str> {
            let mut keys = ::std::vec::Vec::new();
            #base_keys
            #own_keys
            keys
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darling::FromDeriveInput;
    use syn::parse_quote;

    fn render(input: syn::DeriveInput) -> String {
        let attrs = DataReprAttrs::from_derive_input(&input).unwrap();
        generate_data_repr(&attrs, &parse_quote!(::repr_core)).to_string()
    }

    #[test]
    fn test_plain_and_optional_cells() {
        let output = render(parse_quote! {
            pub struct Point {
                pub x: i32,
                pub z: Option<i32>,
                #[data_repr(bound)]
                pub label: Option<String>,
            }
        });

        assert!(output.contains("\"x\" =>"));
        assert!(output.contains("self . z . as_ref () . map"));
        assert!(!output.contains("self . label . as_ref ()"));
        assert!(output.contains("Probe (& self . label)"));
        assert!(!output.contains("fn store_keys"));
        assert!(output.contains(":: core :: option :: Option :: None"));
    }

    #[test]
    fn test_generic_cells_use_truthy_directly() {
        let output = render(parse_quote! {
            pub struct Tagged<T> {
                pub tag: T,
                pub count: u32,
                #[data_repr(opaque)]
                pub raw: T,
            }
        });

        assert!(output.contains(":: repr_core :: Truthy :: is_truthy (& self . tag)"));
        assert!(output.contains("Probe (& self . count)"));
        assert!(output.contains("AttrRef :: new (& self . raw , true)"));
    }

    #[test]
    fn test_raw_identifiers_keep_field_access() {
        let output = render(parse_quote! {
            pub struct Token {
                pub r#type: u8,
            }
        });

        assert!(output.contains("\"type\" =>"));
        assert!(output.contains("self . r#type"));
    }

    #[test]
    fn test_base_then_store_fallback() {
        let output = render(parse_quote! {
            pub struct Point3D {
                #[data_repr(base)]
                pub point: Point,
                #[data_repr(store)]
                pub extra: Extra,
            }
        });

        assert!(!output.contains("match name"));
        assert!(output.contains(
            ":: repr_core :: DataRepr :: attr (& self . point , name) . or_else (|| :: repr_core :: AttrStore :: get_attr (& self . extra , name))"
        ));
        let base_keys = output.find("DataRepr :: store_keys (& self . point)").unwrap();
        let own_keys = output.find("AttrStore :: keys (& self . extra)").unwrap();
        assert!(base_keys < own_keys);
    }
}
