use eventd::prelude::*;

#[derive(EventBody)]
struct Changed<T> {
    value: T,
}

fn main() {
    let bus = Bus::new();
    bus.publish_body(Changed { value: 1_u8 });
    bus.publish_body(Changed { value: String::from("x") });

    assert_eq!(<Changed<u8> as EventBody>::NAME, "Changed");
    assert_eq!(<Changed<String> as EventBody>::NAME, "Changed");
}
