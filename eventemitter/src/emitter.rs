use crate::listener::{Listener, ListenerHandle, Payload};
use crate::subscriber::Subscriber;
use async_trait::async_trait;
use std::any::Any;

/// 事件发射器（EventEmitter）
///
/// - 订阅/取消订阅同步完成，立即对后续分发可见；
/// - 分发只负责调度，不等待监听器执行；
/// - `wait` 等待所有已调度（以及等待期间新调度）的分发完成。
///
/// 泛型便捷方法带 `Self: Sized` 约束，trait 本身可以作为 `dyn EventEmitter` 使用。
#[async_trait]
pub trait EventEmitter: Send + Sync {
    /// 注册监听器到 `name`，返回本次订阅的令牌
    fn subscribe_listener(&self, name: &str, listener: Listener) -> ListenerHandle;

    /// 按令牌取消订阅；未找到时不做任何事并返回 `false`
    fn unsubscribe(&self, name: &str, handle: &ListenerHandle) -> bool;

    /// 取消 `name` 下第一个与 `listener` 相同的订阅
    fn unsubscribe_listener(&self, name: &str, listener: &Listener) -> bool;

    /// 以已构造的参数分发事件
    fn dispatch_payload(&self, name: &str, payload: Payload);

    /// `name` 下当前的监听器数量
    fn listener_count(&self, name: &str) -> usize;

    /// 等待在途分发全部完成
    async fn wait(&self);

    /// 注册一个强类型回调
    ///
    /// - `name`：事件名
    /// - `f`：回调，参数类型 `A` 需与分发方约定一致
    fn subscribe<A, F>(&self, name: &str, f: F) -> ListenerHandle
    where
        A: Any + Send + Sync,
        F: Fn(&A) + Send + Sync + 'static,
        Self: Sized,
    {
        self.subscribe_listener(name, Listener::new(f))
    }

    /// 分发事件，`args` 在所有监听器间共享
    fn dispatch<A>(&self, name: &str, args: A)
    where
        A: Any + Send + Sync,
        Self: Sized,
    {
        self.dispatch_payload(name, Payload::new(args));
    }

    /// 注册订阅者声明的全部监听器
    fn add_subscriber(&self, subscriber: &dyn Subscriber) {
        for (name, listeners) in subscriber.subscribed_events() {
            tracing::debug!(
                event = %name,
                listeners = listeners.len(),
                "adding subscriber listeners"
            );
            for listener in listeners {
                self.subscribe_listener(&name, listener);
            }
        }
    }

    /// 撤销订阅者声明的全部监听器
    fn remove_subscriber(&self, subscriber: &dyn Subscriber) {
        for (name, listeners) in subscriber.subscribed_events() {
            tracing::debug!(
                event = %name,
                listeners = listeners.len(),
                "removing subscriber listeners"
            );
            for listener in &listeners {
                self.unsubscribe_listener(&name, listener);
            }
        }
    }
}
