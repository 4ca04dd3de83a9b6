//! 分发任务（DispatchTask）
//!
//! 一次 `dispatch` 调用对应一个不可变快照：事件名、调度时刻的监听器序列与参数。
//! 快照内的监听器在同一个工作单元中按订阅顺序依次执行。
//!
//! 监听器的 panic 不在此处捕获：它会中止本工作单元（其后的监听器不再执行），
//! 由运行时把影响限制在该任务内。参数形状不符只跳过对应监听器并记录告警。
//!
use crate::error::EmitterError;
use crate::listener::{ListenerHandle, Payload};

#[derive(Debug)]
pub struct DispatchTask {
    event: String,
    listeners: Vec<ListenerHandle>,
    payload: Payload,
}

impl DispatchTask {
    pub fn new(event: impl Into<String>, listeners: Vec<ListenerHandle>, payload: Payload) -> Self {
        Self {
            event: event.into(),
            listeners,
            payload,
        }
    }

    pub fn event(&self) -> &str {
        &self.event
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// 按快照顺序调用全部监听器，返回实际被调用的数量
    pub fn run(self, emitter: &str) -> usize {
        let span = tracing::debug_span!(
            "dispatch",
            emitter,
            event = %self.event,
            listeners = self.listeners.len()
        );
        let _entered = span.enter();

        let mut invoked = 0;
        for handle in &self.listeners {
            match handle.listener().call(&self.payload) {
                Ok(()) => invoked += 1,
                Err(EmitterError::TypeMismatch { expected, found }) => {
                    tracing::warn!(
                        listener = %handle.id(),
                        expected,
                        found,
                        "listener skipped: argument type mismatch"
                    );
                }
                Err(err) => {
                    tracing::warn!(listener = %handle.id(), error = %err, "listener skipped");
                }
            }
        }

        tracing::trace!(invoked, "dispatch finished");
        invoked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listener::Listener;
    use crate::registry::ListenerRegistry;
    use std::sync::{Arc, Mutex};

    #[test]
    fn runs_listeners_in_snapshot_order() {
        let reg = ListenerRegistry::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..3 {
            let order = order.clone();
            reg.subscribe(
                "test",
                Listener::new(move |_: &()| order.lock().unwrap().push(i)),
            );
        }

        let task = DispatchTask::new("test", reg.snapshot("test").unwrap(), Payload::empty());
        assert_eq!(task.event(), "test");
        assert_eq!(task.len(), 3);
        assert_eq!(task.run("emitter"), 3);
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn mismatched_listener_is_skipped_others_run() {
        let reg = ListenerRegistry::new();
        let total = Arc::new(Mutex::new(0));
        {
            let total = total.clone();
            reg.subscribe(
                "test",
                Listener::new(move |n: &i32| *total.lock().unwrap() += *n),
            );
        }
        reg.subscribe("test", Listener::new(|_: &String| {}));
        {
            let total = total.clone();
            reg.subscribe(
                "test",
                Listener::new(move |n: &i32| *total.lock().unwrap() += *n),
            );
        }

        let task = DispatchTask::new("test", reg.snapshot("test").unwrap(), Payload::new(5i32));
        assert_eq!(task.run("emitter"), 2);
        assert_eq!(*total.lock().unwrap(), 10);
    }

    #[test]
    fn empty_task_invokes_nothing() {
        let task = DispatchTask::new("test", Vec::new(), Payload::empty());
        assert!(task.is_empty());
        assert_eq!(task.run("emitter"), 0);
    }
}
