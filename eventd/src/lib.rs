//! 进程内事件分发基础库（eventd）
//!
//! 提供领域事件在进程内发布/订阅所需的最小构件：
//! - 事件值对象（`event`）：名称、不透明载荷与发生时间；
//! - 事件处理器（`handler`）：消费单个事件的能力抽象及按名称过滤的组合器；
//! - 事件总线（`bus`）：有序、按身份去重的处理器集合，同步扇出；
//! - 发布能力（`publisher`）：仅暴露发布操作的收窄接口；
//! - 调用上下文（`context`）：在调用链中显式携带发布能力；
//! - 事件名（`body`）：由载荷类型声明的稳定名称，替代运行时反射。
//!
//! 本 crate 不做任何跨进程传输与持久化，所有操作在调用线程上同步执行。
//! 工作单元（事务）级别的事件缓冲见 `eventd-lifecycle`。
//!
//! 典型用法：
//! ```rust
//! use std::sync::Arc;
//! use eventd::prelude::*;
//!
//! let bus = Bus::new();
//! let handler: Arc<dyn Handler> = Arc::new(|e: &Event| {
//!     assert_eq!(e.name(), "Greet");
//! });
//! assert!(bus.subscribe(handler));
//! bus.publish("Greet", "Hello World!");
//! ```
//!
pub mod body;
pub mod bus;
pub mod context;
pub mod error;
pub mod event;
pub mod handler;
pub mod publisher;

pub use body::EventBody;
pub use bus::Bus;
pub use context::{Context, context_with_bus, publisher_from_context, require_publisher};
pub use error::{EventdError, EventdResult};
pub use event::Event;
pub use handler::{HandleOnly, Handler, handle_only};
pub use publisher::{Publisher, PublisherExt};

#[cfg(feature = "derive")]
pub use eventd_macros::EventBody;

/// 常用类型与扩展 trait 的统一导入
pub mod prelude {
    pub use crate::body::EventBody;
    pub use crate::bus::Bus;
    pub use crate::context::{Context, context_with_bus, publisher_from_context};
    pub use crate::event::Event;
    pub use crate::handler::{Handler, handle_only};
    pub use crate::publisher::{Publisher, PublisherExt};

    #[cfg(feature = "derive")]
    pub use eventd_macros::EventBody;
}

// 允许在本 crate 内部通过 ::eventd 进行自引用，
// 以便派生宏在本 crate 的单元测试中也能解析到 ::eventd 路径。
extern crate self as eventd;
