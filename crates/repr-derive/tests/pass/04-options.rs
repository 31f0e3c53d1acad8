use std::fmt;

use repr_core::DataRepr;

#[derive(DataRepr)]
struct Unit;

#[derive(DataRepr)]
#[data_repr(name = "Cfg", no_debug, skip_falsy)]
struct Config {
    verbose: bool,
    retries: u32,
    #[data_repr(bound)]
    path: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        repr_core::fmt_repr(self, f)
    }
}

fn main() {
    assert_eq!(format!("{:?}", Unit), "Unit()");

    let config = Config {
        verbose: true,
        retries: 0,
        path: None,
    };
    assert_eq!(format!("{config:?}"), "Cfg(verbose=true)");
}
