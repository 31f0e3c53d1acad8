use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::dynamic::registry::{ClassMember, DynType};
use crate::dynamic::value::{BoundMember, Value};
use crate::error::ReprError;
use crate::format::fmt_repr;
use crate::instance::{AttrRef, DataRepr};
use crate::layout::TypeLayout;
use crate::truthy::Truthy;

/// An instance of a [`DynType`].
#[derive(Clone)]
pub struct DynObject {
    ty: Arc<DynType>,
    slots: Vec<Option<Value>>,
    dict: Option<BTreeMap<String, Value>>,
}

impl DynObject {
    pub fn new(ty: Arc<DynType>) -> Self {
        let slots = vec![None; ty.slot_count()];
        let dict = ty.has_dict().then(BTreeMap::new);
        Self { ty, slots, dict }
    }

    pub fn dyn_type(&self) -> &Arc<DynType> {
        &self.ty
    }

    pub fn type_name(&self) -> &str {
        self.ty.name()
    }

    /// Attribute read: cells and accessors first, then the associative
    /// store, then type-level constants and callables.
    pub fn get(&self, name: &str) -> Result<Value, ReprError> {
        match self.ty.member(name) {
            Some(ClassMember::Cell(index)) => {
                return self.slots[*index]
                    .clone()
                    .ok_or_else(|| self.no_such_attribute(name));
            }
            Some(ClassMember::Accessor(accessor)) => {
                return accessor
                    .get
                    .as_ref()
                    .and_then(|get| get(self))
                    .ok_or_else(|| self.no_such_attribute(name));
            }
            _ => {}
        }

        if let Some(value) = self.dict.as_ref().and_then(|dict| dict.get(name)) {
            return Ok(value.clone());
        }

        match self.ty.member(name) {
            Some(ClassMember::Constant(value)) => Ok(value.clone()),
            Some(ClassMember::Callable(kind)) => Ok(Value::new(BoundMember {
                type_name: self.ty.name().to_string(),
                name: name.to_string(),
                kind: kind.as_str(),
            })),
            _ => Err(self.no_such_attribute(name)),
        }
    }

    /// Attribute write. Cells are written in place, accessors go through
    /// their setter, anything else lands in the associative store.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ReprError> {
        let value = value.into();
        match self.ty.member(name).cloned() {
            Some(ClassMember::Cell(index)) => {
                self.slots[index] = Some(value);
                Ok(())
            }
            Some(ClassMember::Accessor(accessor)) => match accessor.set {
                Some(set) => set(self, value),
                None => Err(self.read_only(name)),
            },
            member => {
                if let Some(dict) = self.dict.as_mut() {
                    dict.insert(name.to_string(), value);
                    Ok(())
                } else if member.is_some() {
                    Err(self.read_only(name))
                } else {
                    Err(self.no_such_attribute(name))
                }
            }
        }
    }

    /// Attribute deletion. Unsetting a cell leaves it unbound.
    pub fn unset(&mut self, name: &str) -> Result<(), ReprError> {
        match self.ty.member(name) {
            Some(ClassMember::Cell(index)) => {
                let index = *index;
                match self.slots[index].take() {
                    Some(_) => Ok(()),
                    None => Err(self.no_such_attribute(name)),
                }
            }
            Some(ClassMember::Accessor(_)) => Err(self.read_only(name)),
            _ => match self.dict.as_mut().and_then(|dict| dict.remove(name)) {
                Some(_) => Ok(()),
                None => Err(self.no_such_attribute(name)),
            },
        }
    }

    /// Whether a read of `name` would succeed.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    fn no_such_attribute(&self, name: &str) -> ReprError {
        ReprError::NoSuchAttribute {
            type_name: self.ty.name().to_string(),
            name: name.to_string(),
        }
    }

    fn read_only(&self, name: &str) -> ReprError {
        ReprError::ReadOnlyAttribute {
            type_name: self.ty.name().to_string(),
            name: name.to_string(),
        }
    }
}

impl DataRepr for DynObject {
    fn layout(&self) -> &TypeLayout {
        self.ty.layout()
    }

    fn store_keys(&self) -> Vec<&str> {
        self.dict
            .as_ref()
            .map(|dict| dict.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    fn attr(&self, name: &str) -> Option<AttrRef<'_>> {
        let value = match self.ty.member(name) {
            Some(ClassMember::Cell(index)) => self.slots[*index].as_ref(),
            _ => self.dict.as_ref().and_then(|dict| dict.get(name)),
        }?;
        Some(AttrRef::new(value.as_debug(), value.is_truthy()))
    }
}

/// Objects are truthy regardless of their contents, so nested objects
/// survive falsy filtering.
impl Truthy for DynObject {
    fn is_truthy(&self) -> bool {
        true
    }
}

impl fmt::Debug for DynObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_repr(self, f)
    }
}
