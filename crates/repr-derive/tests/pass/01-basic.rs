use repr_core::DataRepr;

#[derive(DataRepr)]
struct Point {
    y: i32,
    x: i32,
}

fn main() {
    let p = Point { y: 2, x: 1 };
    assert_eq!(format!("{p:?}"), "Point(y=2, x=1)");
    assert_eq!(repr_core::repr(&p).unwrap(), "Point(y=2, x=1)");
}
