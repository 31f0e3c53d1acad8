//! `TypeName(name=value, ...)` rendering.

use std::fmt;

use crate::enumerate::{enumerate, is_private};
use crate::error::ReprError;
use crate::instance::{AttrRef, DataRepr};
use crate::settings::{FalsyPolicy, ReprOptions};

/// The `(name, value)` pairs that make it into the representation, in
/// display order.
pub fn fields<T: DataRepr + ?Sized>(instance: &T, falsy: FalsyPolicy) -> Vec<(&str, AttrRef<'_>)> {
    let layout = instance.layout();
    let mut fields = Vec::new();

    for name in enumerate(instance) {
        if is_private(name) {
            continue;
        }
        if !layout.is_data_member(name) {
            tracing::trace!(
                type_name = layout.name(),
                name,
                kind = layout.resolve(name).map(|kind| kind.as_str()),
                "skipping non-data member"
            );
            continue;
        }
        let Some(value) = instance.attr(name) else {
            continue;
        };
        if !falsy.admits(value.is_truthy()) {
            continue;
        }
        fields.push((name, value));
    }

    fields
}

/// Write the representation of `instance` using the type's falsy policy,
/// falling back to the global settings.
///
/// Derived `Debug` implementations call this.
pub fn fmt_repr<T: DataRepr + ?Sized>(instance: &T, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt_repr_with(instance, &ReprOptions::default(), f)
}

pub fn fmt_repr_with<T: DataRepr + ?Sized>(
    instance: &T,
    options: &ReprOptions,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let layout = instance.layout();
    let falsy = options.falsy_policy(layout.falsy());

    f.write_str(layout.name())?;
    f.write_str("(")?;
    for (i, (name, value)) in fields(instance, falsy).into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{name}={value:?}")?;
    }
    f.write_str(")")
}

/// The textual representation of `instance`.
pub fn repr<T: DataRepr + ?Sized>(instance: &T) -> Result<String, ReprError> {
    repr_with(instance, &ReprOptions::default())
}

pub fn repr_with<T: DataRepr + ?Sized>(
    instance: &T,
    options: &ReprOptions,
) -> Result<String, ReprError> {
    let mut out = String::new();
    fmt::write(&mut out, format_args!("{}", display_with(instance, *options)))?;
    Ok(out)
}

/// Adapter rendering a [`DataRepr`] through `Display` and `Debug`, for types
/// that keep a hand-written `Debug`.
pub struct ReprDisplay<'a, T: ?Sized> {
    instance: &'a T,
    options: ReprOptions,
}

pub fn display<T: DataRepr + ?Sized>(instance: &T) -> ReprDisplay<'_, T> {
    display_with(instance, ReprOptions::default())
}

pub fn display_with<T: DataRepr + ?Sized>(instance: &T, options: ReprOptions) -> ReprDisplay<'_, T> {
    ReprDisplay { instance, options }
}

impl<T: DataRepr + ?Sized> fmt::Display for ReprDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_repr_with(self.instance, &self.options, f)
    }
}

impl<T: DataRepr + ?Sized> fmt::Debug for ReprDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_repr_with(self.instance, &self.options, f)
    }
}
