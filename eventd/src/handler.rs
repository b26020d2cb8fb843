//! 事件处理器（Handler）
//!
//! 定义消费单个事件的能力，以及按事件名过滤的组合器 `HandleOnly`。
//!
use crate::event::Event;

/// 事件处理器：同步处理单个事件
///
/// 任意 `Fn(&Event)` 闭包均自动实现该 trait。处理器内的 panic 不会被总线捕获，
/// 会中止本次发布剩余的分发并传播给发布方。
pub trait Handler: Send + Sync {
    fn handle(&self, event: &Event);
}

impl<F> Handler for F
where
    F: Fn(&Event) + Send + Sync,
{
    fn handle(&self, event: &Event) {
        self(event)
    }
}

/// 仅转发指定名称事件的处理器
#[derive(Debug, Clone)]
pub struct HandleOnly<H> {
    inner: H,
    names: Vec<String>,
}

/// 包装 `handler`，只转发名称与 `names` 之一完全相等的事件
pub fn handle_only<H, I, S>(handler: H, names: I) -> HandleOnly<H>
where
    H: Handler,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    HandleOnly {
        inner: handler,
        names: names.into_iter().map(Into::into).collect(),
    }
}

impl<H> HandleOnly<H> {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: Handler> Handler for HandleOnly<H> {
    fn handle(&self, event: &Event) {
        // 命中第一个即投递并停止，名称列表重复时也只投递一次
        if self.names.iter().any(|name| name == event.name()) {
            self.inner.handle(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter() -> (Arc<AtomicUsize>, impl Handler + Clone) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (count, move |_: &Event| {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn closure_is_handler() {
        let (count, h) = counter();
        h.handle(&Event::new("Any", ()));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handle_only_filters_by_name() {
        let (count, h) = counter();
        let only = handle_only(h, ["X"]);

        only.handle(&Event::new("Y", ()));
        assert_eq!(count.load(Ordering::SeqCst), 0);

        only.handle(&Event::new("X", ()));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handle_only_delivers_once_with_duplicate_names() {
        let (count, h) = counter();
        let only = handle_only(h, vec!["X".to_string(), "Z".to_string(), "X".to_string()]);

        only.handle(&Event::new("X", ()));
        only.handle(&Event::new("Z", ()));
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn handle_only_is_exact_match() {
        let (count, h) = counter();
        let only = handle_only(h, ["Order"]);

        only.handle(&Event::new("OrderCreated", ()));
        only.handle(&Event::new("order", ()));
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(only.names(), ["Order".to_string()]);
    }
}
