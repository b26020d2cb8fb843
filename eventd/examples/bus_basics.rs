/// 事件总线示例
/// 展示订阅 / 按名过滤 / 通过上下文发布 / 退订的完整流程
use eventd::prelude::*;
use std::sync::Arc;

#[derive(Debug, EventBody)]
struct UserCreated {
    id: String,
    name: String,
}

#[derive(Debug, EventBody)]
#[event_body(name = "user.deleted")]
struct UserDeleted {
    id: String,
}

fn create_user(ctx: &Context, id: &str, name: &str) -> anyhow::Result<()> {
    let publisher = eventd::require_publisher(ctx)?;
    publisher.publish_body(UserCreated {
        id: id.to_string(),
        name: name.to_string(),
    });
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let bus = Arc::new(Bus::new());

    let audit: Arc<dyn Handler> = Arc::new(|e: &Event| {
        println!("[audit] {} at {}", e.name(), e.occurred_at());
    });
    let welcome: Arc<dyn Handler> = Arc::new(handle_only(
        |e: &Event| {
            if let Some(user) = e.body_as::<UserCreated>() {
                println!("[welcome] hello {} ({})", user.name, user.id);
            }
        },
        [UserCreated::NAME],
    ));

    bus.subscribe(audit.clone());
    bus.subscribe(welcome);

    let ctx = context_with_bus(&Context::background(), bus.clone());
    create_user(&ctx, "u-1", "Alice")?;

    bus.publish_body(UserDeleted { id: "u-1".into() });
    println!("deleted name: {}", UserDeleted::NAME);

    bus.unsubscribe(&audit);
    println!("handlers left: {}", bus.len());

    // 未携带总线的上下文
    assert!(publisher_from_context(&Context::background()).is_none());
    Ok(())
}
