#[test]
#[cfg_attr(
    miri,
    ignore = "trybuild launches subprocesses and is unsupported under miri"
)]
fn ui_expansions_compile() {
    let t = trybuild::TestCases::new();
    t.pass("tests/pass/*.rs");
}
