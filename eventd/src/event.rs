//! 领域事件值对象（Event）
//!
//! 事件一经构造即不可变：名称、载荷与发生时间均只读。
//! 载荷由调用方拥有，总线只传递其共享引用，从不复制或检查。
//!
use chrono::{DateTime, Utc};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// 不透明的事件载荷
pub type Body = Arc<dyn Any + Send + Sync>;

/// 领域事件
#[derive(Clone)]
pub struct Event {
    name: String,
    body: Body,
    occurred_at: DateTime<Utc>,
}

impl Event {
    /// 构造事件，发生时间取构造时刻
    pub fn new<B>(name: impl Into<String>, body: B) -> Self
    where
        B: Any + Send + Sync,
    {
        Self::from_shared(name, Arc::new(body))
    }

    /// 以已共享的载荷构造事件（不再额外包装一层 `Arc`）
    pub fn from_shared(name: impl Into<String>, body: Body) -> Self {
        Self {
            name: name.into(),
            body,
            occurred_at: Utc::now(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &(dyn Any + Send + Sync) {
        self.body.as_ref()
    }

    /// 按具体类型读取载荷，类型不符时返回 `None`
    pub fn body_as<T: Any>(&self) -> Option<&T> {
        self.body.downcast_ref::<T>()
    }

    pub fn occurred_at(&self) -> &DateTime<Utc> {
        &self.occurred_at
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("body", &"..")
            .field("occurred_at", &self.occurred_at)
            .finish()
    }
}
