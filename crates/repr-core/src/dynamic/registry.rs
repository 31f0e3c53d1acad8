use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::dynamic::object::DynObject;
use crate::dynamic::value::Value;
use crate::error::ReprError;
use crate::layout::{MemberDesc, MemberKind, TypeLayout};
use crate::settings::FalsyPolicy;

static NEXT_REGISTRY: AtomicU64 = AtomicU64::new(0);

/// Index of a type inside the [`TypeRegistry`] that defined it. Ids only
/// resolve in their own registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DynTypeId {
    registry: u64,
    index: usize,
}

impl fmt::Display for DynTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.registry, self.index)
    }
}

pub type Getter = Arc<dyn Fn(&DynObject) -> Option<Value> + Send + Sync>;
pub type Setter = Arc<dyn Fn(&mut DynObject, Value) -> Result<(), ReprError> + Send + Sync>;

/// A computed member: reads go through `get`, writes through `set`.
#[derive(Clone, Default)]
pub struct Accessor {
    pub get: Option<Getter>,
    pub set: Option<Setter>,
}

impl Accessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn getter(mut self, get: impl Fn(&DynObject) -> Option<Value> + Send + Sync + 'static) -> Self {
        self.get = Some(Arc::new(get));
        self
    }

    pub fn setter(
        mut self,
        set: impl Fn(&mut DynObject, Value) -> Result<(), ReprError> + Send + Sync + 'static,
    ) -> Self {
        self.set = Some(Arc::new(set));
        self
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("get", &self.get.is_some())
            .field("set", &self.set.is_some())
            .finish()
    }
}

/// A type-level member after resolution.
#[derive(Debug, Clone)]
pub(crate) enum ClassMember {
    /// Index into the instance's slot vector.
    Cell(usize),
    Accessor(Accessor),
    Constant(Value),
    Callable(MemberKind),
}

/// Definition of a runtime type.
#[derive(Debug, Clone)]
pub struct TypeDef {
    name: String,
    parent: Option<DynTypeId>,
    slots: Option<Vec<String>>,
    members: Vec<(String, ClassMember)>,
    with_dict: bool,
    falsy: Option<FalsyPolicy>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            slots: None,
            members: Vec::new(),
            with_dict: false,
            falsy: None,
        }
    }

    pub fn extends(mut self, parent: DynTypeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Declare fixed storage cells. A type that declares slots, and whose
    /// ancestors all do too, has no associative store unless
    /// [`Self::with_dict`] is used.
    pub fn slots<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots
            .get_or_insert_with(Vec::new)
            .extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_dict(mut self) -> Self {
        self.with_dict = true;
        self
    }

    /// A read-only computed member with no getter.
    pub fn computed(self, name: impl Into<String>) -> Self {
        self.accessor(name, Accessor::new())
    }

    pub fn accessor(mut self, name: impl Into<String>, accessor: Accessor) -> Self {
        self.members
            .push((name.into(), ClassMember::Accessor(accessor)));
        self
    }

    pub fn constant(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.members
            .push((name.into(), ClassMember::Constant(value.into())));
        self
    }

    pub fn method(self, name: impl Into<String>) -> Self {
        self.callable(name, MemberKind::Method)
    }

    pub fn class_method(self, name: impl Into<String>) -> Self {
        self.callable(name, MemberKind::ClassMethod)
    }

    pub fn static_method(self, name: impl Into<String>) -> Self {
        self.callable(name, MemberKind::StaticMethod)
    }

    fn callable(mut self, name: impl Into<String>, kind: MemberKind) -> Self {
        self.members
            .push((name.into(), ClassMember::Callable(kind)));
        self
    }

    pub fn falsy(mut self, policy: FalsyPolicy) -> Self {
        self.falsy = Some(policy);
        self
    }
}

/// A defined runtime type.
#[derive(Debug)]
pub struct DynType {
    id: DynTypeId,
    name: String,
    parent: Option<Arc<DynType>>,
    layout: TypeLayout,
    members: HashMap<String, ClassMember>,
    slot_count: usize,
    has_dict: bool,
}

impl DynType {
    pub fn id(&self) -> DynTypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<DynType>> {
        self.parent.as_ref()
    }

    pub fn layout(&self) -> &TypeLayout {
        &self.layout
    }

    /// Ancestor chain, most-derived first.
    pub fn mro(&self) -> Vec<&DynType> {
        let mut chain = vec![self];
        let mut current = self.parent.as_deref();
        while let Some(ty) = current {
            chain.push(ty);
            current = ty.parent.as_deref();
        }
        chain
    }

    pub fn has_dict(&self) -> bool {
        self.has_dict
    }

    pub(crate) fn member(&self, name: &str) -> Option<&ClassMember> {
        self.members.get(name)
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slot_count
    }
}

/// Arena of runtime types. Parents must be defined before their children,
/// so ancestor chains are always finite.
#[derive(Debug)]
pub struct TypeRegistry {
    id: u64,
    types: Vec<Arc<DynType>>,
    names: HashSet<String>,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY.fetch_add(1, Ordering::Relaxed),
            types: Vec::new(),
            names: HashSet::new(),
        }
    }

    pub fn define(&mut self, def: TypeDef) -> Result<DynTypeId, ReprError> {
        if self.names.contains(&def.name) {
            return Err(ReprError::DuplicateType { name: def.name });
        }
        let parent = match def.parent {
            Some(parent_id) => Some(self.get(parent_id).cloned().map_err(|_| {
                ReprError::UnknownParent {
                    name: def.name.clone(),
                    parent: parent_id,
                }
            })?),
            None => None,
        };

        let own_slots = def.slots.clone().unwrap_or_default();
        let mut declared = HashSet::new();
        for name in own_slots
            .iter()
            .chain(def.members.iter().map(|(name, _)| name))
        {
            if !declared.insert(name.as_str()) {
                return Err(ReprError::ConflictingMember {
                    type_name: def.name.clone(),
                    name: name.clone(),
                });
            }
        }

        // Inherited members first, then our own on top. A re-declared slot
        // keeps the parent's storage index.
        let mut members = parent
            .as_ref()
            .map(|p| p.members.clone())
            .unwrap_or_default();
        let mut slot_count = parent.as_ref().map_or(0, |p| p.slot_count);
        for slot in &own_slots {
            let index = match members.get(slot) {
                Some(ClassMember::Cell(index)) => *index,
                _ => {
                    slot_count += 1;
                    slot_count - 1
                }
            };
            members.insert(slot.clone(), ClassMember::Cell(index));
        }
        for (name, member) in &def.members {
            members.insert(name.clone(), member.clone());
        }

        let parent_has_dict = parent.as_ref().is_some_and(|p| p.has_dict);
        let has_dict = parent_has_dict || def.with_dict || def.slots.is_none();

        let mut builder = TypeLayout::builder(def.name.clone());
        if let Some(parent) = &parent {
            builder = builder.extends(&parent.layout);
        }
        builder = builder.cells(own_slots);
        for (name, member) in &def.members {
            let kind = match member {
                ClassMember::Cell(_) => MemberKind::Cell,
                ClassMember::Accessor(_) => MemberKind::Computed,
                ClassMember::Constant(_) => MemberKind::Constant,
                ClassMember::Callable(kind) => *kind,
            };
            builder = builder.member(MemberDesc::new(name.clone(), kind));
        }
        if has_dict {
            builder = builder.store();
        }
        if let Some(policy) = def.falsy {
            builder = builder.falsy(policy);
        }

        let id = DynTypeId {
            registry: self.id,
            index: self.types.len(),
        };
        tracing::debug!(
            type_name = %def.name,
            %id,
            slots = slot_count,
            has_dict,
            "defined dynamic type"
        );
        self.names.insert(def.name.clone());
        self.types.push(Arc::new(DynType {
            id,
            name: def.name,
            parent,
            layout: builder.build(),
            members,
            slot_count,
            has_dict,
        }));
        Ok(id)
    }

    pub fn get(&self, id: DynTypeId) -> Result<&Arc<DynType>, ReprError> {
        if id.registry != self.id {
            return Err(ReprError::UnknownType { id });
        }
        self.types
            .get(id.index)
            .ok_or(ReprError::UnknownType { id })
    }

    pub fn instantiate(&self, id: DynTypeId) -> Result<DynObject, ReprError> {
        Ok(DynObject::new(self.get(id)?.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_lookup() {
        let mut registry = TypeRegistry::new();
        let point = registry
            .define(TypeDef::new("Point").slots(["x", "y"]))
            .unwrap();
        let point3d = registry
            .define(TypeDef::new("Point3D").extends(point).slots(["z"]))
            .unwrap();

        let ty = registry.get(point3d).unwrap();
        assert_eq!(ty.name(), "Point3D");
        assert_eq!(ty.slot_count(), 3);
        assert!(!ty.has_dict());
        let mro: Vec<&str> = ty.mro().iter().map(|t| t.name()).collect();
        assert_eq!(mro, ["Point3D", "Point"]);
        assert_eq!(ty.layout().cells().collect::<Vec<_>>(), ["x", "y", "z"]);
    }

    #[test]
    fn test_dict_rules() {
        let mut registry = TypeRegistry::new();
        let plain = registry.define(TypeDef::new("Plain")).unwrap();
        let slotted = registry
            .define(TypeDef::new("Slotted").slots(["a"]))
            .unwrap();
        let slotted_child = registry
            .define(TypeDef::new("SlottedChild").extends(plain).slots(["b"]))
            .unwrap();
        let opened = registry
            .define(TypeDef::new("Opened").extends(slotted).slots(["c"]).with_dict())
            .unwrap();

        assert!(registry.get(plain).unwrap().has_dict());
        assert!(!registry.get(slotted).unwrap().has_dict());
        assert!(registry.get(slotted_child).unwrap().has_dict());
        assert!(registry.get(opened).unwrap().layout().has_store());
    }

    #[test]
    fn test_redeclared_slot_reuses_storage() {
        let mut registry = TypeRegistry::new();
        let base = registry
            .define(TypeDef::new("Base").slots(["a", "b"]))
            .unwrap();
        let derived = registry
            .define(TypeDef::new("Derived").extends(base).slots(["b", "c"]))
            .unwrap();
        assert_eq!(registry.get(derived).unwrap().slot_count(), 3);
    }

    #[test]
    fn test_errors() {
        let mut registry = TypeRegistry::new();
        registry.define(TypeDef::new("Once")).unwrap();
        assert!(matches!(
            registry.define(TypeDef::new("Once")),
            Err(ReprError::DuplicateType { .. })
        ));

        let mut other = TypeRegistry::new();
        let foreign = other.define(TypeDef::new("A")).unwrap();
        let foreign = other
            .define(TypeDef::new("B").extends(foreign))
            .unwrap();
        assert!(matches!(
            registry.define(TypeDef::new("Orphan").extends(foreign)),
            Err(ReprError::UnknownParent { .. })
        ));

        assert!(matches!(
            registry.define(TypeDef::new("Clash").slots(["x"]).method("x")),
            Err(ReprError::ConflictingMember { .. })
        ));
        assert!(matches!(
            registry.instantiate(foreign),
            Err(ReprError::UnknownType { .. })
        ));
    }

    #[test]
    fn test_foreign_id_in_range_is_rejected() {
        let mut registry = TypeRegistry::new();
        let local = registry.define(TypeDef::new("Local")).unwrap();

        let mut other = TypeRegistry::new();
        let foreign = other.define(TypeDef::new("Foreign")).unwrap();
        assert_ne!(local, foreign);

        assert!(matches!(
            registry.get(foreign),
            Err(ReprError::UnknownType { id }) if id == foreign
        ));
        assert!(matches!(
            registry.define(TypeDef::new("Child").extends(foreign)),
            Err(ReprError::UnknownParent { .. })
        ));
        assert_eq!(registry.get(local).unwrap().name(), "Local");
    }
}
