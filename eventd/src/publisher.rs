//! 发布能力（Publisher）
//!
//! 收窄后的事件发布接口：只暴露发布，不暴露订阅/退订。
//! 通过上下文传递给领域逻辑的正是这一能力。
//!
use crate::body::EventBody;
use crate::event::Event;
use std::any::Any;

/// 事件发布者
pub trait Publisher: Send + Sync {
    /// 发布一个已构造的事件
    fn publish_event(&self, event: Event);
}

/// 便捷发布方法，对所有 `Publisher`（含 `dyn Publisher`）可用
pub trait PublisherExt: Publisher {
    /// 以名称与载荷构造事件并发布
    fn publish<B>(&self, name: impl Into<String>, body: B)
    where
        B: Any + Send + Sync,
    {
        self.publish_event(Event::new(name, body));
    }

    /// 发布载荷，事件名取自载荷类型的 `EventBody::NAME`
    fn publish_body<B: EventBody>(&self, body: B) {
        self.publish(B::NAME, body);
    }
}

impl<P: Publisher + ?Sized> PublisherExt for P {}

impl<P: Publisher + ?Sized> Publisher for std::sync::Arc<P> {
    fn publish_event(&self, event: Event) {
        (**self).publish_event(event)
    }
}

impl<P: Publisher + ?Sized> Publisher for &P {
    fn publish_event(&self, event: Event) {
        (**self).publish_event(event)
    }
}
