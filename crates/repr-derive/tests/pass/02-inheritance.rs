use std::collections::BTreeMap;

use repr_core::DataRepr;

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
    extra: BTreeMap<String, String>,
}

fn main() {
    let mut extra = BTreeMap::new();
    extra.insert("label".to_string(), "origin".to_string());
    extra.insert("norm".to_string(), "hidden".to_string());

    let p = Point3D {
        point: Point { x: 0, y: 0 },
        z: None,
        extra,
    };
    assert_eq!(format!("{p:?}"), "Point3D(label=\"origin\", x=0, y=0)");
}
