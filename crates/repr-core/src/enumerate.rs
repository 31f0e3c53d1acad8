//! Candidate attribute enumeration.

use std::collections::HashSet;

use crate::instance::DataRepr;

pub(crate) fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

/// Ordered, duplicate-free candidate attribute names of `instance`.
///
/// Associative-store keys come first in ascending lexical order, followed by
/// bound storage cells walking the ancestor chain from the most-base type to
/// the most-derived one, each level in declaration order. A cell declared by
/// several levels keeps the position of its first declaration. Names with a
/// leading underscore are never yielded.
pub fn enumerate<T: DataRepr + ?Sized>(instance: &T) -> Vec<&str> {
    let layout = instance.layout();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut names = Vec::new();

    let mut keys = instance.store_keys();
    keys.sort_unstable();
    for key in keys {
        if is_private(key) {
            continue;
        }
        if seen.insert(key) {
            names.push(key);
        }
    }

    for cell in layout.cells() {
        if is_private(cell) {
            continue;
        }
        if seen.contains(cell) {
            tracing::trace!(type_name = layout.name(), cell, "cell already listed");
            continue;
        }
        if instance.attr(cell).is_none() {
            tracing::trace!(type_name = layout.name(), cell, "skipping unbound cell");
            continue;
        }
        seen.insert(cell);
        names.push(cell);
    }

    names
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::instance::{AttrRef, AttrStore};
    use crate::layout::TypeLayout;

    /// Hand-written instance: cells live in a map, unbound cells are absent.
    struct Fixture {
        layout: TypeLayout,
        cells: BTreeMap<String, i64>,
        store: BTreeMap<String, i64>,
    }

    impl Fixture {
        fn new(layout: TypeLayout) -> Self {
            Self {
                layout,
                cells: BTreeMap::new(),
                store: BTreeMap::new(),
            }
        }

        fn bind(mut self, name: &str, value: i64) -> Self {
            self.cells.insert(name.to_string(), value);
            self
        }

        fn stored(mut self, name: &str, value: i64) -> Self {
            self.store.insert(name.to_string(), value);
            self
        }
    }

    impl DataRepr for Fixture {
        fn layout(&self) -> &TypeLayout {
            &self.layout
        }

        fn store_keys(&self) -> Vec<&str> {
            AttrStore::keys(&self.store)
        }

        fn attr(&self, name: &str) -> Option<AttrRef<'_>> {
            self.cells
                .get(name)
                .map(AttrRef::of)
                .or_else(|| self.store.get_attr(name))
        }
    }

    #[test]
    fn test_store_keys_sorted_before_cells() {
        let layout = TypeLayout::builder("Mixed").cells(["z", "m"]).store().build();
        let fixture = Fixture::new(layout)
            .bind("z", 1)
            .bind("m", 2)
            .stored("b", 3)
            .stored("a", 4);

        assert_eq!(enumerate(&fixture), ["a", "b", "z", "m"]);
    }

    #[test]
    fn test_unbound_cells_skipped() {
        let layout = TypeLayout::builder("Partial").cells(["x", "y", "z"]).build();
        let fixture = Fixture::new(layout).bind("x", 1).bind("z", 3);

        assert_eq!(enumerate(&fixture), ["x", "z"]);
    }

    #[test]
    fn test_redeclared_cell_keeps_first_position() {
        let base = TypeLayout::builder("Base").cells(["a", "b"]).build();
        let layout = TypeLayout::builder("Derived")
            .extends(&base)
            .cells(["c", "a"])
            .build();
        let fixture = Fixture::new(layout).bind("a", 1).bind("b", 2).bind("c", 3);

        assert_eq!(enumerate(&fixture), ["a", "b", "c"]);
    }

    #[test]
    fn test_cell_also_in_store_listed_once() {
        let layout = TypeLayout::builder("Both").cell("a").store().build();
        let fixture = Fixture::new(layout).bind("a", 1).stored("a", 2).stored("b", 3);

        assert_eq!(enumerate(&fixture), ["a", "b"]);
    }

    #[test]
    fn test_private_names_never_candidates() {
        let layout = TypeLayout::builder("Hidden").cells(["_cache", "x"]).build();
        let fixture = Fixture::new(layout)
            .bind("_cache", 9)
            .bind("x", 1)
            .stored("__secret", 1);

        assert_eq!(enumerate(&fixture), ["x"]);
    }

    #[test]
    fn test_empty_instance() {
        let fixture = Fixture::new(TypeLayout::builder("Empty").build());
        assert!(enumerate(&fixture).is_empty());
    }
}
