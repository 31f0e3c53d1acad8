//! Derived representations for a small struct hierarchy.
//!
//! ```text
//! RUST_LOG=repr_core=trace cargo run -p repr-core --example points
//! ```

use std::collections::BTreeMap;

use repr_core::telemetry::init_tracing;
use repr_core::{DataRepr, ReprOptions, display_with};

#[derive(DataRepr)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(DataRepr)]
#[data_repr(computed(name = "norm"))]
struct Point3D {
    #[data_repr(base)]
    point: Point,
    z: Option<i32>,
    #[data_repr(store)]
    tags: BTreeMap<String, String>,
}

impl Point3D {
    fn norm(&self) -> f64 {
        let Point { x, y } = self.point;
        let z = self.z.unwrap_or_default();
        f64::from(x * x + y * y + z * z).sqrt()
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let mut p = Point3D {
        point: Point { x: 1, y: 0 },
        z: None,
        tags: BTreeMap::new(),
    };
    println!("{p:?}");

    p.z = Some(3);
    p.tags.insert("label".to_string(), "corner".to_string());
    println!("{p:?}");
    println!("{}", display_with(&p, ReprOptions::new().skip_falsy()));
    println!("norm = {:.3}", p.norm());

    Ok(())
}
