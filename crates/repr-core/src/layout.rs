//! Per-type field-descriptor tables.
//!
//! A [`TypeLayout`] is built once per type, at definition time. It records
//! the type's ancestor chain as a flat list of [`LayoutLevel`]s ordered from
//! the most-base type to the type itself, together with a resolved member
//! table that classifies every name the type (or an ancestor) declares.
//!
//! # Example
//!
//! ```
//! use repr_core::{MemberDesc, MemberKind, TypeLayout};
//!
//! let point = TypeLayout::builder("Point").cells(["x", "y"]).build();
//! let point3d = TypeLayout::builder("Point3D")
//!     .extends(&point)
//!     .cell("z")
//!     .member(MemberDesc::computed("norm"))
//!     .build();
//!
//! let cells: Vec<&str> = point3d.cells().collect();
//! assert_eq!(cells, ["x", "y", "z"]);
//! assert_eq!(point3d.resolve("norm"), Some(MemberKind::Computed));
//! assert!(point3d.is_data_member("x"));
//! ```

use std::any::TypeId;
use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::{LazyLock, PoisonError, RwLock};

use indexmap::IndexMap;

use crate::settings::FalsyPolicy;

/// Classification of a named member declared on a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A per-instance storage cell.
    Cell,
    /// A value computed on read, optionally intercepting writes.
    Computed,
    /// A value bound to the type itself and shared by all instances.
    Constant,
    /// A plain method.
    Method,
    /// A method receiving the type rather than an instance.
    ClassMethod,
    /// A function namespaced in the type.
    StaticMethod,
}

impl MemberKind {
    /// Returns true only for members that hold per-instance data.
    pub const fn is_data(self) -> bool {
        matches!(self, MemberKind::Cell)
    }

    pub const fn is_callable(self) -> bool {
        matches!(
            self,
            MemberKind::Method | MemberKind::ClassMethod | MemberKind::StaticMethod
        )
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            MemberKind::Cell => "cell",
            MemberKind::Computed => "computed",
            MemberKind::Constant => "constant",
            MemberKind::Method => "method",
            MemberKind::ClassMethod => "classmethod",
            MemberKind::StaticMethod => "staticmethod",
        }
    }
}

/// A named member together with its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDesc {
    pub name: Cow<'static, str>,
    pub kind: MemberKind,
}

impl MemberDesc {
    pub fn new(name: impl Into<Cow<'static, str>>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub const fn cell(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: MemberKind::Cell,
        }
    }

    pub const fn computed(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: MemberKind::Computed,
        }
    }

    pub const fn constant(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: MemberKind::Constant,
        }
    }

    pub const fn method(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: MemberKind::Method,
        }
    }

    pub const fn class_method(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: MemberKind::ClassMethod,
        }
    }

    pub const fn static_method(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            kind: MemberKind::StaticMethod,
        }
    }
}

/// The members one type in an ancestor chain declares itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutLevel {
    type_name: Cow<'static, str>,
    cells: Vec<Cow<'static, str>>,
    members: Vec<MemberDesc>,
}

impl LayoutLevel {
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Storage cells in declaration order.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|cell| cell.as_ref())
    }

    /// Non-cell members declared at this level.
    pub fn members(&self) -> &[MemberDesc] {
        &self.members
    }
}

/// Flat field-descriptor table for one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLayout {
    name: Cow<'static, str>,
    levels: Vec<LayoutLevel>,
    resolved: IndexMap<Cow<'static, str>, MemberKind>,
    has_store: bool,
    falsy: Option<FalsyPolicy>,
}

impl TypeLayout {
    pub fn builder(name: impl Into<Cow<'static, str>>) -> LayoutBuilder {
        LayoutBuilder::new(name)
    }

    /// The simple name of the most-derived type.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ancestor levels, most-base first; the last level is the type itself.
    pub fn levels(&self) -> &[LayoutLevel] {
        &self.levels
    }

    /// Every declared cell in base-to-derived walk order.
    ///
    /// A cell re-declared by several levels is yielded once per declaration.
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().flat_map(LayoutLevel::cells)
    }

    /// Resolve `name` against the member table; the most-derived
    /// declaration wins.
    pub fn resolve(&self, name: &str) -> Option<MemberKind> {
        self.resolved.get(name).copied()
    }

    /// True when `name` is not shadowed by a computed accessor, constant or
    /// callable anywhere in the chain.
    pub fn is_data_member(&self, name: &str) -> bool {
        self.resolve(name).is_none_or(MemberKind::is_data)
    }

    /// Whether instances carry a free-form associative store.
    pub fn has_store(&self) -> bool {
        self.has_store
    }

    /// Per-type falsy policy, if the type overrides the global setting.
    pub fn falsy(&self) -> Option<FalsyPolicy> {
        self.falsy
    }
}

/// Builder for [`TypeLayout`].
#[derive(Debug, Clone)]
pub struct LayoutBuilder {
    name: Cow<'static, str>,
    inherited: Vec<LayoutLevel>,
    cells: Vec<Cow<'static, str>>,
    members: Vec<MemberDesc>,
    has_store: bool,
    falsy: Option<FalsyPolicy>,
}

impl LayoutBuilder {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            inherited: Vec::new(),
            cells: Vec::new(),
            members: Vec::new(),
            has_store: false,
            falsy: None,
        }
    }

    /// Inherit every level of `parent`. A store on the parent is inherited
    /// too, and so is its falsy override unless this builder sets one.
    pub fn extends(mut self, parent: &TypeLayout) -> Self {
        self.inherited = parent.levels.clone();
        self.has_store |= parent.has_store;
        if self.falsy.is_none() {
            self.falsy = parent.falsy;
        }
        self
    }

    pub fn cell(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.cells.push(name.into());
        self
    }

    pub fn cells<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Cow<'static, str>>,
    {
        self.cells.extend(names.into_iter().map(Into::into));
        self
    }

    /// Declare a member. Cell descriptors are routed to [`Self::cell`].
    pub fn member(mut self, member: MemberDesc) -> Self {
        if member.kind == MemberKind::Cell {
            self.cells.push(member.name);
        } else {
            self.members.push(member);
        }
        self
    }

    pub fn store(mut self) -> Self {
        self.has_store = true;
        self
    }

    pub fn falsy(mut self, policy: FalsyPolicy) -> Self {
        self.falsy = Some(policy);
        self
    }

    pub fn build(self) -> TypeLayout {
        let mut levels = self.inherited;
        levels.push(LayoutLevel {
            type_name: self.name.clone(),
            cells: self.cells,
            members: self.members,
        });

        // Later levels overwrite earlier ones; within a level, non-cell
        // members shadow a same-named cell.
        let mut resolved = IndexMap::new();
        for level in &levels {
            for cell in &level.cells {
                resolved.insert(cell.clone(), MemberKind::Cell);
            }
            for member in &level.members {
                resolved.insert(member.name.clone(), member.kind);
            }
        }

        TypeLayout {
            name: self.name,
            levels,
            resolved,
            has_store: self.has_store,
            falsy: self.falsy,
        }
    }
}

static INTERNED: LazyLock<RwLock<HashMap<TypeId, &'static TypeLayout>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Returns the layout registered for `T`, building it on first use.
///
/// `build` runs without any lock held, so it may itself intern the layouts
/// of ancestor types. If two threads race, one result is kept and the other
/// discarded.
pub fn intern<T: ?Sized + 'static>(build: impl FnOnce() -> TypeLayout) -> &'static TypeLayout {
    let key = TypeId::of::<T>();
    if let Some(layout) = INTERNED
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&key)
    {
        return layout;
    }

    let layout = build();
    let mut interned = INTERNED.write().unwrap_or_else(PoisonError::into_inner);
    interned.entry(key).or_insert_with(|| {
        tracing::debug!(
            type_name = layout.name(),
            levels = layout.levels().len(),
            "interned type layout"
        );
        Box::leak(Box::new(layout))
    })
}
