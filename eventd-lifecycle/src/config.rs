//! 生命周期配置
//!
use bon::Builder;

/// 生命周期配置
///
/// ```rust
/// use eventd_lifecycle::LifecycleConfig;
///
/// let cfg = LifecycleConfig::builder()
///     .label("rename-user")
///     .initial_capacity(4)
///     .build();
/// assert_eq!(cfg.label.as_deref(), Some("rename-user"));
/// assert!(cfg.log_discarded);
/// ```
#[derive(Builder, Clone, Debug)]
pub struct LifecycleConfig {
    /// 日志中用于标识工作单元的名称（缺省时仅记录生命周期 id）
    #[builder(into)]
    pub label: Option<String>,
    /// 事件缓冲的预分配容量；缓冲本身不设上限
    #[builder(default)]
    pub initial_capacity: usize,
    /// 工作单元失败时是否记录被丢弃的事件数
    #[builder(default = true)]
    pub log_discarded: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            label: None,
            initial_capacity: 0,
            log_discarded: true,
        }
    }
}
