use proc_macro_crate::{FoundCrate, crate_name};
use proc_macro2::Span;

const RUNTIME_CRATE: &str = "repr-core";

/// Path to the runtime crate as the deriving crate sees it, honouring
/// renamed dependencies.
pub(crate) fn resolve_repr_core_path() -> syn::Result<syn::Path> {
    let found = crate_name(RUNTIME_CRATE).map_err(|_| {
        syn::Error::new(
            Span::call_site(),
            format!("`#[derive(DataRepr)]` needs `{RUNTIME_CRATE}` as a dependency"),
        )
    })?;

    // Within repr-core's own tests and doctests, `crate` would name the test
    // crate; the library declares `extern crate self as repr_core` instead.
    let name = match found {
        FoundCrate::Itself => RUNTIME_CRATE.replace('-', "_"),
        FoundCrate::Name(name) => name.replace('-', "_"),
    };
    let ident = syn::Ident::new(&name, Span::call_site());
    Ok(syn::parse_quote!(::#ident))
}
