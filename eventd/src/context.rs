//! 调用上下文（Context）
//!
//! 以类型为键的不可变键值关联，沿调用链显式传递。
//! 写入总是产生新的子上下文，父上下文不受影响，因此可以放心克隆与跨线程共享。
//!
//! 总线以私有键存入上下文，取出时只暴露收窄后的 `Publisher` 能力，
//! 嵌套的领域逻辑无需显式注入即可发布事件。
//!
use crate::bus::Bus;
use crate::error::{EventdError, EventdResult};
use crate::publisher::Publisher;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 工作单元上下文
#[derive(Clone, Default)]
pub struct Context {
    values: Arc<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Context {
    /// 空上下文
    pub fn background() -> Self {
        Self::default()
    }

    /// 返回携带 `value` 的子上下文；同类型的旧值在子上下文中被覆盖
    pub fn with_value<T>(&self, value: T) -> Self
    where
        T: Any + Send + Sync,
    {
        let mut values = (*self.values).clone();
        values.insert(TypeId::of::<T>(), Arc::new(value));
        Self {
            values: Arc::new(values),
        }
    }

    /// 读取类型为 `T` 的值，不存在时返回 `None`
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values.len())
            .field("has_publisher", &self.contains::<BusKey>())
            .finish()
    }
}

// 私有键，外部无法覆盖或读取原始总线
struct BusKey(Arc<Bus>);

/// 返回携带总线的子上下文
pub fn context_with_bus(ctx: &Context, bus: Arc<Bus>) -> Context {
    ctx.with_value(BusKey(bus))
}

/// 从上下文取出发布能力，未携带时返回 `None`（正常情形，而非错误）
pub fn publisher_from_context(ctx: &Context) -> Option<Arc<dyn Publisher>> {
    ctx.value::<BusKey>()
        .map(|key| key.0.clone() as Arc<dyn Publisher>)
}

/// 同 `publisher_from_context`，但以错误表达缺失，便于在返回 `Result` 的代码中使用 `?`
pub fn require_publisher(ctx: &Context) -> EventdResult<Arc<dyn Publisher>> {
    publisher_from_context(ctx).ok_or(EventdError::PublisherNotFound)
}
