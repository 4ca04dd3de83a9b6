//! 进程内事件发射器（eventemitter）
//!
//! 组件通过事件名注册监听器，其他组件按事件名异步触发这些监听器，双方互不直接依赖：
//! - 监听器（`listener`）：强类型闭包包装为类型擦除的 `Listener`，订阅返回 `ListenerHandle`；
//! - 注册表（`registry`）：事件名到有序监听器序列的并发映射，清空即删除；
//! - 分发（`dispatcher`）：每次分发取一份快照，作为一个独立工作单元按顺序执行；
//! - 完成屏障（`barrier`）：统计在途分发，`wait` 在其归零时返回；
//! - 订阅者（`subscriber`）：一次性注册/撤销一组（事件名，监听器）。
//!
//! 不提供跨进程投递、持久化、跨事件名的顺序保证、投递确认与失败重试。
//!
//! 典型用法：
//! ```rust
//! use eventemitter::{EventEmitter, InMemoryEmitter};
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! # #[tokio::main(flavor = "multi_thread", worker_threads = 2)]
//! # async fn main() -> Result<(), eventemitter::EmitterError> {
//! let emitter = InMemoryEmitter::new()?;
//! let total = Arc::new(AtomicUsize::new(0));
//!
//! let t = total.clone();
//! emitter.subscribe("user.created", move |id: &usize| {
//!     t.fetch_add(*id, Ordering::SeqCst);
//! });
//!
//! emitter.dispatch("user.created", 1234usize);
//! emitter.wait().await;
//!
//! assert_eq!(total.load(Ordering::SeqCst), 1234);
//! # Ok(())
//! # }
//! ```
//!
pub mod barrier;
pub mod config;
pub mod dispatcher;
pub mod emitter;
pub mod error;
pub mod inmemory_emitter;
pub mod listener;
pub mod registry;
pub mod subscriber;

pub use barrier::{CompletionBarrier, InFlightGuard};
pub use config::EmitterConfig;
pub use dispatcher::DispatchTask;
pub use emitter::EventEmitter;
pub use error::{EmitterError, EmitterResult};
pub use inmemory_emitter::InMemoryEmitter;
pub use listener::{Listener, ListenerHandle, ListenerId, Payload};
pub use registry::ListenerRegistry;
pub use subscriber::{SubscribedEvents, Subscriber};
