//! 订阅者（Subscriber）
//!
//! 订阅者自己声明关心哪些事件：`add_subscriber` 调用 [`Subscriber::subscribed_events`]
//! 并把返回的每个监听器注册到对应事件名上；`remove_subscriber` 做相反的事。
//!
//! 要让 `remove_subscriber` 恰好撤销 `add_subscriber` 的注册，两次调用必须返回
//! 相同的 [`Listener`] 值（克隆即可），通常把它们保存在订阅者结构体里。
//!
use crate::listener::Listener;
use std::collections::HashMap;

/// 事件名 -> 有序监听器列表
pub type SubscribedEvents = HashMap<String, Vec<Listener>>;

pub trait Subscriber: Send + Sync {
    /// 返回该订阅者要注册的全部监听器
    ///
    /// 不同事件名之间的注册顺序不作保证；同一事件名下按列表顺序注册。
    fn subscribed_events(&self) -> SubscribedEvents;
}
