use crate::barrier::CompletionBarrier;
use crate::config::EmitterConfig;
use crate::dispatcher::DispatchTask;
use crate::emitter::EventEmitter;
use crate::error::EmitterResult;
use crate::listener::{Listener, ListenerHandle, Payload};
use crate::registry::ListenerRegistry;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::runtime::Handle;

/// 基于内存的 EventEmitter 实现
/// - 注册表按事件名保存有序监听器序列，清空即删除
/// - 每次分发生成一个快照任务，在运行时的阻塞线程池上执行
/// - 完成屏障统计在途分发，供 `wait` 汇合
///
/// 各实例之间不共享任何状态。
pub struct InMemoryEmitter {
    registry: ListenerRegistry,
    barrier: CompletionBarrier,
    runtime: Handle,
    label: Arc<str>,
}

impl InMemoryEmitter {
    /// 在当前 tokio 运行时上创建发射器
    pub fn new() -> EmitterResult<Self> {
        Self::with_config(EmitterConfig::default())
    }

    pub fn with_config(config: EmitterConfig) -> EmitterResult<Self> {
        let runtime = match config.runtime() {
            Some(handle) => handle.clone(),
            None => Handle::try_current()?,
        };

        Ok(Self::build(runtime, config.label()))
    }

    /// 使用指定运行时创建发射器，可在运行时之外调用
    pub fn with_runtime(runtime: Handle) -> Self {
        Self::build(runtime, EmitterConfig::default().label())
    }

    fn build(runtime: Handle, label: &str) -> Self {
        tracing::debug!(emitter = label, "event emitter created");
        Self {
            registry: ListenerRegistry::new(),
            barrier: CompletionBarrier::new(),
            runtime,
            label: Arc::from(label),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// 当前拥有监听器的事件名（无序）
    pub fn event_names(&self) -> Vec<String> {
        self.registry.event_names()
    }

    /// 当前在途分发数
    pub fn in_flight(&self) -> usize {
        self.barrier.in_flight()
    }
}

#[async_trait]
impl EventEmitter for InMemoryEmitter {
    fn subscribe_listener(&self, name: &str, listener: Listener) -> ListenerHandle {
        let handle = self.registry.subscribe(name, listener);
        tracing::debug!(
            emitter = %self.label,
            event = name,
            listener = %handle.id(),
            arg_type = handle.listener().arg_type(),
            "listener subscribed"
        );
        handle
    }

    fn unsubscribe(&self, name: &str, handle: &ListenerHandle) -> bool {
        let removed = self.registry.unsubscribe(name, handle);
        tracing::debug!(
            emitter = %self.label,
            event = name,
            listener = %handle.id(),
            removed,
            "unsubscribe"
        );
        removed
    }

    fn unsubscribe_listener(&self, name: &str, listener: &Listener) -> bool {
        let removed = self.registry.unsubscribe_listener(name, listener);
        tracing::debug!(emitter = %self.label, event = name, removed, "unsubscribe listener");
        removed
    }

    fn dispatch_payload(&self, name: &str, payload: Payload) {
        // 先计数再查表，晚到的 wait 也能正确观察到本次分发
        let guard = self.barrier.enter();

        let Some(listeners) = self.registry.snapshot(name) else {
            tracing::trace!(
                emitter = %self.label,
                event = name,
                "no listeners, dispatch skipped"
            );
            return;
        };

        let arg_type = payload.type_name();
        let task = DispatchTask::new(name, listeners, payload);
        tracing::trace!(
            emitter = %self.label,
            event = name,
            listeners = task.len(),
            arg_type,
            "dispatch scheduled"
        );

        let label = self.label.clone();
        self.runtime.spawn_blocking(move || {
            let _guard = guard;
            task.run(&label);
        });
    }

    fn listener_count(&self, name: &str) -> usize {
        self.registry.len(name)
    }

    async fn wait(&self) {
        self.barrier.wait().await;
    }
}
