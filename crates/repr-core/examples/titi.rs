//! A slotted runtime type with constants, methods, a property and a custom
//! descriptor. Only the two bound slots show up.
//!
//! ```text
//! cargo run -p repr-core --example titi
//! ```

use repr_core::dynamic::{Accessor, TypeDef, TypeRegistry};
use repr_core::telemetry::init_tracing;
use repr_core::ReprError;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let mut registry = TypeRegistry::new();
    let titi = registry.define(
        TypeDef::new("Titi")
            .slots(["a", "b", "c"])
            .constant("clsvars", "test")
            .method("method")
            .accessor(
                "prop",
                Accessor::new()
                    .getter(|obj| obj.get("b").ok())
                    .setter(|obj, value| obj.set("b", value)),
            )
            .accessor(
                "custom_desc",
                Accessor::new()
                    .getter(|obj| obj.get("a").ok())
                    .setter(|obj, value| obj.set("a", value)),
            )
            .class_method("classmethod")
            .static_method("staticmethod"),
    )?;

    let mut t = registry.instantiate(titi)?;
    t.set("custom_desc", 2)?;
    t.set("prop", "g")?;

    println!("{t:?}");
    assert_eq!(format!("{t:?}"), "Titi(a=2, b=\"g\")");

    match t.set("undeclared", 1) {
        Err(err @ ReprError::NoSuchAttribute { .. }) => println!("{err}"),
        other => println!("unexpected: {other:?}"),
    }

    Ok(())
}
