//! The capability a type implements to opt into data representations.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::layout::TypeLayout;
use crate::truthy::Truthy;

/// A borrowed, bound attribute value.
#[derive(Clone, Copy)]
pub struct AttrRef<'a> {
    value: &'a dyn fmt::Debug,
    truthy: bool,
}

impl<'a> AttrRef<'a> {
    pub fn new(value: &'a dyn fmt::Debug, truthy: bool) -> Self {
        Self { value, truthy }
    }

    pub fn of<T: fmt::Debug + Truthy>(value: &'a T) -> Self {
        Self {
            value,
            truthy: value.is_truthy(),
        }
    }

    pub fn value(&self) -> &'a dyn fmt::Debug {
        self.value
    }

    pub fn is_truthy(&self) -> bool {
        self.truthy
    }
}

impl fmt::Debug for AttrRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.value, f)
    }
}

/// Instance-level access to stored attributes.
///
/// Usually generated by `#[derive(DataRepr)]`; [`crate::dynamic::DynObject`]
/// implements it for runtime-defined types.
pub trait DataRepr {
    /// The field-descriptor table of the instance's most-derived type.
    fn layout(&self) -> &TypeLayout;

    /// Keys of the instance's free-form associative store, in any order.
    fn store_keys(&self) -> Vec<&str> {
        Vec::new()
    }

    /// Fetch a stored attribute. `None` means the attribute is unbound or
    /// absent; it is never an error.
    fn attr(&self, name: &str) -> Option<AttrRef<'_>>;
}

/// Statically known layout, used to chain a type to its base.
pub trait DataReprType: DataRepr {
    fn type_layout() -> &'static TypeLayout;
}

/// A free-form associative store of attribute name to value.
///
/// The map impls need `V: Truthy` so falsy entries can be skipped; derived
/// types implement it, and a value type without an impl can be wrapped in a
/// derived struct or stored as a dynamic [`crate::dynamic::Value`].
pub trait AttrStore {
    fn keys(&self) -> Vec<&str>;

    fn get_attr(&self, name: &str) -> Option<AttrRef<'_>>;
}

impl<V: fmt::Debug + Truthy> AttrStore for BTreeMap<String, V> {
    fn keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }

    fn get_attr(&self, name: &str) -> Option<AttrRef<'_>> {
        self.get(name).map(AttrRef::of)
    }
}

impl<V: fmt::Debug + Truthy, S: BuildHasher> AttrStore for HashMap<String, V, S> {
    fn keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }

    fn get_attr(&self, name: &str) -> Option<AttrRef<'_>> {
        self.get(name).map(AttrRef::of)
    }
}

impl<V: fmt::Debug + Truthy, S: BuildHasher> AttrStore for IndexMap<String, V, S> {
    fn keys(&self) -> Vec<&str> {
        self.keys().map(String::as_str).collect()
    }

    fn get_attr(&self, name: &str) -> Option<AttrRef<'_>> {
        self.get(name).map(AttrRef::of)
    }
}

impl<T: AttrStore + ?Sized> AttrStore for &T {
    fn keys(&self) -> Vec<&str> {
        (**self).keys()
    }

    fn get_attr(&self, name: &str) -> Option<AttrRef<'_>> {
        (**self).get_attr(name)
    }
}

impl<T: AttrStore + ?Sized> AttrStore for Box<T> {
    fn keys(&self) -> Vec<&str> {
        (**self).keys()
    }

    fn get_attr(&self, name: &str) -> Option<AttrRef<'_>> {
        (**self).get_attr(name)
    }
}

impl<T: DataRepr + ?Sized> DataRepr for &T {
    fn layout(&self) -> &TypeLayout {
        (**self).layout()
    }

    fn store_keys(&self) -> Vec<&str> {
        (**self).store_keys()
    }

    fn attr(&self, name: &str) -> Option<AttrRef<'_>> {
        (**self).attr(name)
    }
}

impl<T: DataRepr + ?Sized> DataRepr for Box<T> {
    fn layout(&self) -> &TypeLayout {
        (**self).layout()
    }

    fn store_keys(&self) -> Vec<&str> {
        (**self).store_keys()
    }

    fn attr(&self, name: &str) -> Option<AttrRef<'_>> {
        (**self).attr(name)
    }
}
