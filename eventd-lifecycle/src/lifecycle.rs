//! 工作单元生命周期（Lifecycle）
//!
//! 状态：`Active` → `Ended`（终态）。
//! - 构造时创建私有总线，并订阅内部收集器，按发布顺序把事件追加到缓冲区；
//! - `context()` 携带该总线的发布能力，传入领域逻辑；
//! - `end(&outcome)`：成功时把缓冲区完整交给最终处理器（仅一次），失败时静默丢弃。
//!
//! 约定：
//! - 重复调用 `end` 不会再次触达处理器，返回 `LifecycleError::AlreadyEnded`；
//! - `end` 之后经由上下文发布的事件会被丢弃并记录告警，不会被转发；
//! - 缓冲区没有容量上限，单个工作单元的事件规模由调用方控制。
//!
use crate::config::LifecycleConfig;
use crate::error::{LifecycleError, LifecycleResult};
use crate::handler::EventHandler;
use eventd::{Bus, Context, Event, Handler, Publisher, context_with_bus};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Active,
    Ended,
}

struct Journal {
    state: State,
    events: Vec<Event>,
}

/// 内部收集器：只追加，保持发布顺序
struct Collector {
    lifecycle_id: Uuid,
    journal: Arc<Mutex<Journal>>,
}

impl Handler for Collector {
    fn handle(&self, event: &Event) {
        let mut journal = self.journal.lock();
        match journal.state {
            State::Active => journal.events.push(event.clone()),
            State::Ended => warn!(
                lifecycle_id = %self.lifecycle_id,
                event = event.name(),
                "event published after lifecycle ended; dropped"
            ),
        }
    }
}

/// 结束结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ending {
    /// 工作单元成功，事件（数量）已交给最终处理器
    Committed(usize),
    /// 工作单元失败，事件（数量）已丢弃
    Discarded(usize),
}

/// 工作单元生命周期
pub struct Lifecycle {
    id: Uuid,
    bus: Arc<Bus>,
    context: Context,
    journal: Arc<Mutex<Journal>>,
    handler: Option<Arc<dyn EventHandler>>,
    config: LifecycleConfig,
}

impl Lifecycle {
    /// 以最终处理器创建生命周期；创建后必须调用 `end` 结束
    pub fn new<H>(handler: H) -> Self
    where
        H: EventHandler + 'static,
    {
        Self::with_config(Some(Arc::new(handler)), LifecycleConfig::default())
    }

    /// 不带最终处理器：成功结束时同样是安全的空操作
    pub fn detached() -> Self {
        Self::with_config(None, LifecycleConfig::default())
    }

    pub fn with_config(handler: Option<Arc<dyn EventHandler>>, config: LifecycleConfig) -> Self {
        let id = Uuid::new_v4();
        let bus = Arc::new(Bus::new());
        let context = context_with_bus(&Context::background(), bus.clone());
        let journal = Arc::new(Mutex::new(Journal {
            state: State::Active,
            events: Vec::with_capacity(config.initial_capacity),
        }));

        bus.subscribe(Arc::new(Collector {
            lifecycle_id: id,
            journal: journal.clone(),
        }));

        debug!(lifecycle_id = %id, label = ?config.label, "lifecycle started");

        Self {
            id,
            bus,
            context,
            journal,
            handler,
            config,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 工作单元上下文，携带私有总线的发布能力
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// 私有总线的发布能力（等价于从 `context()` 取出）
    pub fn publisher(&self) -> Arc<dyn Publisher> {
        self.bus.clone()
    }

    /// 当前已缓冲的事件数
    pub fn buffered(&self) -> usize {
        self.journal.lock().events.len()
    }

    pub fn is_ended(&self) -> bool {
        self.journal.lock().state == State::Ended
    }

    /// 结束生命周期
    ///
    /// - `Ok`：按发布顺序把全部缓冲事件交给最终处理器（若有）；
    /// - `Err`：丢弃全部缓冲事件，错误本身不做检查与分类。
    ///
    /// 已结束时返回 `LifecycleError::AlreadyEnded`，不会再次触达处理器。
    pub fn end<T, E>(&self, outcome: &Result<T, E>) -> LifecycleResult<Ending> {
        let events = {
            let mut journal = self.journal.lock();
            if journal.state == State::Ended {
                warn!(lifecycle_id = %self.id, label = ?self.config.label, "lifecycle ended twice");
                return Err(LifecycleError::AlreadyEnded { id: self.id });
            }
            journal.state = State::Ended;
            std::mem::take(&mut journal.events)
        };

        // 在锁外调用处理器：处理器内再经由上下文发布时只会被丢弃，而不会死锁
        match outcome {
            Ok(_) => {
                if let Some(handler) = &self.handler {
                    handler.handle_events(&events);
                }
                debug!(
                    lifecycle_id = %self.id,
                    label = ?self.config.label,
                    events = events.len(),
                    "lifecycle committed"
                );
                Ok(Ending::Committed(events.len()))
            }
            Err(_) => {
                if self.config.log_discarded {
                    debug!(
                        lifecycle_id = %self.id,
                        label = ?self.config.label,
                        events = events.len(),
                        "lifecycle failed; events discarded"
                    );
                }
                Ok(Ending::Discarded(events.len()))
            }
        }
    }

    pub fn commit(&self) -> LifecycleResult<Ending> {
        self.end(&Ok::<(), ()>(()))
    }

    pub fn rollback(&self) -> LifecycleResult<Ending> {
        self.end(&Err::<(), ()>(()))
    }

    /// 在生命周期内执行一次工作单元，并以其结果结束生命周期
    pub fn run<T, E, F>(self, f: F) -> Result<T, E>
    where
        F: FnOnce(&Context) -> Result<T, E>,
    {
        let outcome = f(&self.context);
        if let Err(err) = self.end(&outcome) {
            warn!(lifecycle_id = %self.id, error = %err, "failed to end lifecycle");
        }
        outcome
    }
}

impl Drop for Lifecycle {
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        let journal = self.journal.lock();
        if journal.state == State::Active && !journal.events.is_empty() {
            warn!(
                lifecycle_id = %self.id,
                label = ?self.config.label,
                events = journal.events.len(),
                "lifecycle dropped without end; buffered events discarded"
            );
        }
    }
}

impl fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let journal = self.journal.lock();
        f.debug_struct("Lifecycle")
            .field("id", &self.id)
            .field("state", &journal.state)
            .field("buffered", &journal.events.len())
            .field("has_handler", &self.handler.is_some())
            .field("config", &self.config)
            .finish()
    }
}
