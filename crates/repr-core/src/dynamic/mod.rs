//! Runtime-defined types.
//!
//! Types are described with a [`TypeDef`] and registered in a
//! [`TypeRegistry`]. Each type may declare fixed storage cells ("slots"),
//! computed accessors with optional write interception, constants and
//! callables, and single-inherits from a previously defined type. Instances
//! ([`DynObject`]) carry a slot vector and, unless every type in the chain
//! declares slots, a free-form associative store.
//!
//! ```
//! use repr_core::dynamic::{TypeDef, TypeRegistry};
//!
//! let mut registry = TypeRegistry::new();
//! let point = registry.define(TypeDef::new("Point").slots(["x", "y"]))?;
//! let point3d = registry.define(TypeDef::new("Point3D").extends(point).slots(["z"]))?;
//!
//! let mut p = registry.instantiate(point3d)?;
//! p.set("x", 1)?;
//! p.set("y", 2)?;
//! assert_eq!(format!("{p:?}"), "Point3D(x=1, y=2)");
//! p.set("z", 3)?;
//! assert_eq!(format!("{p:?}"), "Point3D(x=1, y=2, z=3)");
//! # Ok::<(), repr_core::ReprError>(())
//! ```

mod object;
mod registry;
mod value;

pub use object::DynObject;
pub use registry::{Accessor, DynType, DynTypeId, Getter, Setter, TypeDef, TypeRegistry};
pub use value::{DynValue, Value};
