#[test]
fn ui_pass() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/body_basic.rs");
    t.pass("tests/ui/body_generic.rs");
}
