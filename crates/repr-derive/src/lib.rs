//! Derive macro for namedtuple-style data representations.
//!
//! `#[derive(DataRepr)]` implements `repr_core::DataReprType`,
//! `repr_core::DataRepr` and (unless opted out) `Debug` and
//! `repr_core::Truthy`, so that
//! `format!("{value:?}")` renders as `TypeName(attr=value, ...)`.

use darling::FromDeriveInput;
use proc_macro::TokenStream;
use syn::parse_macro_input;

mod attrs;
mod generators;
mod runtime_path;

/// Derive macro for data representations.
///
/// Every named field is a storage cell, rendered under its own name (a raw
/// identifier like `r#type` renders as `type`). An `Option<T>` field is
/// unbound, and therefore omitted, while it holds `None`.
///
/// A field whose type is built from a type parameter, like `T` or `Vec<T>`,
/// adds a `Truthy` bound on that type so `skip_falsy` sees through it.
/// Mark such a field `opaque` to require only `Debug`.
///
/// # Container Attributes
///
/// - `#[data_repr(name = "...")]` - Type name shown in the output
/// - `#[data_repr(skip_falsy)]` - Omit empty, zero and `false` values
/// - `#[data_repr(no_debug)]` - Do not generate a `Debug` impl
/// - `#[data_repr(no_truthy)]` - Do not generate a `Truthy` impl (always truthy)
/// - `#[data_repr(computed(name = "..."))]` - Declare a derived, non-stored attribute
/// - `#[data_repr(constant(name = "..."))]` - Declare a type-level constant
/// - `#[data_repr(method(name = "..."))]` - Declare a method
///
/// Declared members are never rendered and hide same-named store entries.
///
/// # Field Attributes
///
/// - `#[data_repr(base)]` - Embedded parent type; its attributes come first
/// - `#[data_repr(store)]` - Free-form attribute map (`BTreeMap`, `HashMap`, `IndexMap`)
/// - `#[data_repr(bound)]` - Render an `Option` field even when it is `None`
/// - `#[data_repr(opaque)]` - Always truthy; the value only needs `Debug`
///
/// # Example
///
/// ```ignore
/// #[derive(DataRepr)]
/// #[data_repr(computed(name = "norm"))]
/// pub struct Vector {
///     pub x: f64,
///     pub y: f64,
/// }
/// ```
#[proc_macro_derive(DataRepr, attributes(data_repr))]
pub fn derive_data_repr(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as syn::DeriveInput);

    match expand_derive_data_repr(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand_derive_data_repr(input: &syn::DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let attrs = attrs::DataReprAttrs::from_derive_input(input)
        .map_err(|e| syn::Error::new_spanned(input, e.to_string()))?;

    let validation_errors = attrs.validate();
    if !validation_errors.is_empty() {
        return Err(syn::Error::new_spanned(
            input,
            validation_errors.join("; "),
        ));
    }

    let krate = runtime_path::resolve_repr_core_path()?;

    let mut output = generators::generate_type_layout(&attrs, &krate);
    output.extend(generators::generate_data_repr(&attrs, &krate));
    output.extend(generators::generate_debug(&attrs, &krate));
    output.extend(generators::generate_truthy(&attrs, &krate));

    Ok(output)
}
