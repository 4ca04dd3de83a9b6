use bon::Builder;
use tokio::runtime::Handle;

const DEFAULT_LABEL: &str = "emitter";

/// 发射器配置
///
/// ```rust
/// use eventemitter::EmitterConfig;
///
/// let cfg = EmitterConfig::builder().label("orders").build();
/// assert_eq!(cfg.label(), "orders");
/// ```
#[derive(Builder, Clone, Debug, Default)]
pub struct EmitterConfig {
    /// 记录在该发射器所有日志/span 上的名称，缺省为 `"emitter"`
    #[builder(into)]
    label: Option<String>,
    /// 调度分发任务的运行时；缺省取构造时所在的运行时
    runtime: Option<Handle>,
}

impl EmitterConfig {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(DEFAULT_LABEL)
    }

    pub fn runtime(&self) -> Option<&Handle> {
        self.runtime.as_ref()
    }
}
