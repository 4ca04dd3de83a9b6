//! 事件发射器统一错误定义
//!
//! 只覆盖核心真正会产生的错误：运行时缺失与参数形状不匹配。
//! 分发到未注册事件、取消未匹配的监听器等情况均视为 no-op，不产生错误。
//!
use thiserror::Error;

/// 统一错误类型
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum EmitterError {
    #[error("no tokio runtime available: {reason}")]
    NoRuntime { reason: String },

    #[error("type mismatch: expected={expected}, found={found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

/// 统一 Result 类型别名
pub type EmitterResult<T> = Result<T, EmitterError>;

impl From<tokio::runtime::TryCurrentError> for EmitterError {
    fn from(err: tokio::runtime::TryCurrentError) -> Self {
        EmitterError::NoRuntime {
            reason: err.to_string(),
        }
    }
}
