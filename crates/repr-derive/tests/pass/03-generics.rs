use repr_core::{DataRepr, ReprOptions, repr_with};

#[derive(DataRepr)]
struct Tagged<T>
where
    T: Clone,
{
    tag: T,
    r#type: &'static str,
}

#[derive(DataRepr, Clone)]
struct Labeled<T> {
    #[data_repr(opaque)]
    label: T,
}

#[derive(DataRepr)]
struct Point {
    x: i32,
}

#[derive(Debug, Clone)]
struct Opaque;

fn main() {
    let a = Tagged { tag: 7u8, r#type: "num" };
    assert_eq!(format!("{a:?}"), "Tagged(tag=7, type=\"num\")");

    let zero = Tagged { tag: 0u8, r#type: "" };
    let sparse = repr_with(&zero, &ReprOptions::new().skip_falsy()).unwrap();
    assert_eq!(sparse, "Tagged()");

    let nested = Tagged { tag: Labeled { label: Opaque }, r#type: "nested" };
    assert_eq!(
        format!("{nested:?}"),
        "Tagged(tag=Labeled(label=Opaque), type=\"nested\")"
    );

    let point = Labeled { label: Point { x: 0 } };
    assert_eq!(format!("{point:?}"), "Labeled(label=Point(x=0))");
}
