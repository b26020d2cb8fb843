//! 生命周期错误类型
//!
use uuid::Uuid;

#[non_exhaustive]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("lifecycle already ended: id={id}")]
    AlreadyEnded { id: Uuid },
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;
