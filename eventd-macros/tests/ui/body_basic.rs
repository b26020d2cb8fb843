use eventd::EventBody;

#[derive(EventBody)]
struct UserCreated {
    id: String,
}

#[derive(EventBody)]
#[event_body(name = "user.renamed")]
struct UserRenamed {
    to: String,
}

#[derive(EventBody)]
enum OrderEvent {
    Placed { order_id: u64 },
    Cancelled,
}

fn main() {
    let _ = UserCreated { id: "u-1".into() }.id;
    let _ = UserRenamed { to: "Bob".into() }.to;
    let _ = [OrderEvent::Placed { order_id: 1 }, OrderEvent::Cancelled];

    assert_eq!(<UserCreated as eventd::EventBody>::NAME, "UserCreated");
    assert_eq!(<UserRenamed as eventd::EventBody>::NAME, "user.renamed");
    assert_eq!(<OrderEvent as eventd::EventBody>::NAME, "OrderEvent");
}
