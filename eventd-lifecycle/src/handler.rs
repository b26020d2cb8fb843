//! 最终事件处理器（EventHandler）
//!
//! 工作单元成功结束后接收缓冲事件的一方，通常负责转发到对外总线或写入发件箱。
//!
use eventd::Event;

/// 最终事件处理器
///
/// 工作单元成功结束时，以发布顺序接收全部缓冲事件，且只接收一次。
/// 任意 `Fn(&[Event])` 闭包均自动实现该 trait。
pub trait EventHandler: Send + Sync {
    fn handle_events(&self, events: &[Event]);
}

impl<F> EventHandler for F
where
    F: Fn(&[Event]) + Send + Sync,
{
    fn handle_events(&self, events: &[Event]) {
        self(events)
    }
}

/// 空实现：丢弃所有事件
#[derive(Debug, Clone, Copy, Default)]
pub struct NopEventHandler;

impl EventHandler for NopEventHandler {
    fn handle_events(&self, _events: &[Event]) {}
}
