use std::fmt;

use crate::dynamic::DynTypeId;

#[derive(Debug, thiserror::Error)]
pub enum ReprError {
    /// An attribute value's `Debug` implementation failed.
    #[error("failed to render attribute value")]
    Render(#[from] fmt::Error),

    #[error("unknown type {id}")]
    UnknownType { id: DynTypeId },

    #[error("type `{name}` extends unknown type {parent}")]
    UnknownParent { name: String, parent: DynTypeId },

    #[error("type `{name}` is already defined")]
    DuplicateType { name: String },

    #[error("type `{type_name}` declares `{name}` more than once")]
    ConflictingMember { type_name: String, name: String },

    #[error("`{type_name}` object has no attribute `{name}`")]
    NoSuchAttribute { type_name: String, name: String },

    #[error("attribute `{name}` of `{type_name}` object is read-only")]
    ReadOnlyAttribute { type_name: String, name: String },
}
