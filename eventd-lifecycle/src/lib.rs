//! 应用层生命周期（eventd-lifecycle）
//!
//! 在 DDD 的应用服务中，领域事件产生时聚合的变更尚未真正写入仓储；
//! 若随后的持久化失败，这些事件就不应生效。`Lifecycle` 在一次工作单元内
//! 缓冲所有发布的事件，仅在工作单元成功结束时一次性交给最终处理器。
//!
//! ```rust
//! use eventd::prelude::*;
//! use eventd_lifecycle::Lifecycle;
//!
//! fn rename_user(ctx: &Context) -> Result<(), String> {
//!     let publisher = publisher_from_context(ctx).ok_or("no publisher")?;
//!     publisher.publish("UserRenamed", String::from("Bob"));
//!     Ok(())
//! }
//!
//! let lc = Lifecycle::new(|events: &[Event]| {
//!     assert_eq!(events.len(), 1);
//! });
//! let outcome = rename_user(lc.context());
//! lc.end(&outcome).unwrap();
//! ```
//!
pub mod config;
pub mod error;
pub mod handler;
pub mod lifecycle;

pub use config::LifecycleConfig;
pub use error::{LifecycleError, LifecycleResult};
pub use handler::{EventHandler, NopEventHandler};
pub use lifecycle::{Ending, Lifecycle};
