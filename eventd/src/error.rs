//! 事件库统一错误定义
//!
//! 总线本身没有失败状态：重复订阅/移除未订阅的处理器以布尔值表达，
//! 上下文中缺少发布能力以 `Option` 表达。这里只收录希望以 `?` 传播的情形。
//!
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventdError {
    #[error("publisher not found in context")]
    PublisherNotFound,
}

/// 统一 Result 类型别名
pub type EventdResult<T> = Result<T, EventdError>;
