//! Namedtuple-style representations derived from a type's stored data.
//!
//! A type opts in by implementing [`DataRepr`], usually through
//! `#[derive(DataRepr)]`, and its `Debug` output becomes
//! `TypeName(attr=value, ...)`: one entry per bound, public, per-instance
//! attribute, each value rendered with its own `Debug`.
//!
//! # Overview
//!
//! - [`TypeLayout`] - per-type field-descriptor table (ancestor levels,
//!   storage cells, member kinds)
//! - [`enumerate`] - ordered, duplicate-free candidate attribute names
//! - [`fields`] / [`fmt_repr`] / [`repr`] - filtering and rendering
//! - [`Truthy`] - optional omission of empty/zero values
//! - [`dynamic`] - runtime-defined types with slots, accessors and a
//!   free-form attribute store
//!
//! # Example
//!
//! ```
//! use repr_core::DataRepr;
//!
//! #[derive(DataRepr)]
//! struct Point {
//!     x: i32,
//!     y: i32,
//! }
//!
//! #[derive(DataRepr)]
//! struct Point3D {
//!     #[data_repr(base)]
//!     point: Point,
//!     z: Option<i32>,
//! }
//!
//! let p = Point3D { point: Point { x: 1, y: 2 }, z: Some(3) };
//! assert_eq!(format!("{p:?}"), "Point3D(x=1, y=2, z=3)");
//!
//! let flat = Point3D { point: Point { x: 1, y: 2 }, z: None };
//! assert_eq!(format!("{flat:?}"), "Point3D(x=1, y=2)");
//! ```

extern crate self as repr_core;

pub mod dynamic;
pub mod enumerate;
pub mod error;
pub mod format;
pub mod instance;
pub mod layout;
pub mod settings;
pub mod telemetry;
pub mod truthy;

pub use enumerate::enumerate;
pub use error::ReprError;
pub use format::{display, display_with, fields, fmt_repr, fmt_repr_with, repr, repr_with, ReprDisplay};
pub use instance::{AttrRef, AttrStore, DataRepr, DataReprType};
pub use layout::{LayoutBuilder, LayoutLevel, MemberDesc, MemberKind, TypeLayout};
pub use settings::{configure, settings, FalsyPolicy, ReprOptions, ReprSettings};
pub use truthy::Truthy;

#[cfg(feature = "derive")]
pub use repr_derive::DataRepr;

/// Support items for generated code. Not public API.
#[doc(hidden)]
pub mod __private {
    /// Autoref probe: resolves to [`ViaTruthy`] when the probed type
    /// implements [`crate::Truthy`], to [`ViaDefault`] otherwise.
    pub struct Probe<'a, T: ?Sized>(pub &'a T);

    pub trait ViaTruthy {
        fn probe_truthy(&self) -> bool;
    }

    impl<T: crate::Truthy + ?Sized> ViaTruthy for Probe<'_, T> {
        fn probe_truthy(&self) -> bool {
            self.0.is_truthy()
        }
    }

    pub trait ViaDefault {
        fn probe_truthy(&self) -> bool;
    }

    impl<T: ?Sized> ViaDefault for &Probe<'_, T> {
        fn probe_truthy(&self) -> bool {
            true
        }
    }
}
