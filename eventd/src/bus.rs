//! 事件总线（Bus）
//!
//! 进程内的处理器注册表与同步分发器：
//! - `subscribe` / `unsubscribe`：按身份（`Arc` 分配地址）去重与移除，持有写锁；
//! - `publish`：构造事件后按订阅顺序依次调用处理器，整个分发过程持有读锁，
//!   因此并发发布可以并行，但不会与订阅变更交叠；
//! - 处理器 panic 不做捕获，直接中止本次分发并传播给发布方。
//!
//! 注意：处理器内部可以再次向同一总线发布（读锁可重入），
//! 但在处理器内部对同一总线订阅或退订会造成死锁，属于调用方误用。
//! 处理器列表没有容量上限，由调用方控制订阅规模。
//!
use crate::event::Event;
use crate::handler::Handler;
use crate::publisher::Publisher;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// 同步事件总线
#[derive(Default)]
pub struct Bus {
    handlers: RwLock<Vec<Arc<dyn Handler>>>,
}

impl Bus {
    pub fn new() -> Self {
        Self::default()
    }

    /// 订阅处理器
    ///
    /// 返回 `true` 表示新加入；同一身份的处理器已存在时返回 `false` 且不做变更。
    /// 两个行为相同但分配不同的处理器视为不同订阅者。
    pub fn subscribe(&self, handler: Arc<dyn Handler>) -> bool {
        let mut handlers = self.handlers.write();
        if handlers.iter().any(|h| same_handler(h, &handler)) {
            debug!(handlers = handlers.len(), "handler already subscribed");
            return false;
        }

        handlers.push(handler);
        debug!(handlers = handlers.len(), "handler subscribed");
        true
    }

    /// 退订处理器，其余处理器保持原有相对顺序
    ///
    /// 返回 `false` 表示该处理器未订阅。
    pub fn unsubscribe(&self, handler: &Arc<dyn Handler>) -> bool {
        let mut handlers = self.handlers.write();
        let Some(pos) = handlers.iter().position(|h| same_handler(h, handler)) else {
            return false;
        };

        handlers.remove(pos);
        debug!(handlers = handlers.len(), "handler unsubscribed");
        true
    }

    /// 当前订阅的处理器数量（可在处理器内部调用）
    pub fn len(&self) -> usize {
        self.handlers.read_recursive().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.read_recursive().is_empty()
    }

    fn dispatch(&self, event: &Event) {
        // 递归读锁：处理器内再次发布时不会因排队中的写者而死锁
        let handlers = self.handlers.read_recursive();
        trace!(event = event.name(), handlers = handlers.len(), "publishing event");

        for handler in handlers.iter() {
            handler.handle(event);
        }
    }
}

impl Publisher for Bus {
    fn publish_event(&self, event: Event) {
        self.dispatch(&event);
    }
}

impl fmt::Debug for Bus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bus").field("handlers", &self.len()).finish()
    }
}

// 仅比较数据指针，忽略 vtable 指针（同一类型在不同代码生成单元中 vtable 可能不同）
fn same_handler(a: &Arc<dyn Handler>, b: &Arc<dyn Handler>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
