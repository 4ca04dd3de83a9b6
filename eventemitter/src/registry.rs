//! 订阅注册表（ListenerRegistry）
//!
//! 事件名到有序监听器序列的映射，基于 `DashMap` 分片读写锁：
//! - 订阅/取消订阅持有分片写锁，取消为线性扫描；
//! - 快照只在复制序列时持有分片读锁；
//! - 序列被清空的事件名在同一临界区内从映射中删除，不留空条目。
//!
use crate::listener::{Listener, ListenerHandle, ListenerId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Default)]
pub struct ListenerRegistry {
    listeners: DashMap<String, Vec<ListenerHandle>>,
    next_id: AtomicU64,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加监听器到 `name` 序列末尾，返回本次订阅的令牌
    ///
    /// 不做去重：同一个 `Listener` 订阅两次得到两个独立的令牌。
    pub fn subscribe(&self, name: &str, listener: Listener) -> ListenerHandle {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let handle = ListenerHandle::new(id, listener);

        self.listeners
            .entry(name.to_owned())
            .or_default()
            .push(handle.clone());

        handle
    }

    /// 移除 `name` 下第一个与令牌匹配的订阅
    pub fn unsubscribe(&self, name: &str, handle: &ListenerHandle) -> bool {
        self.remove_first(name, |h| h == handle)
    }

    /// 移除 `name` 下第一个与 `listener` 为同一回调的订阅
    pub fn unsubscribe_listener(&self, name: &str, listener: &Listener) -> bool {
        self.remove_first(name, |h| h.listener().same_as(listener))
    }

    fn remove_first<P>(&self, name: &str, matches: P) -> bool
    where
        P: Fn(&ListenerHandle) -> bool,
    {
        // 未知事件名直接返回，避免为其分配 key
        if !self.listeners.contains_key(name) {
            return false;
        }

        match self.listeners.entry(name.to_owned()) {
            Entry::Occupied(mut entry) => {
                let Some(idx) = entry.get().iter().position(&matches) else {
                    return false;
                };
                entry.get_mut().remove(idx);

                if entry.get().is_empty() {
                    entry.remove();
                }
                true
            }
            Entry::Vacant(_) => false,
        }
    }

    /// 复制 `name` 当前的监听器序列；未注册时返回 `None`
    pub fn snapshot(&self, name: &str) -> Option<Vec<ListenerHandle>> {
        self.listeners.get(name).map(|l| l.value().clone())
    }

    /// `name` 下的监听器数量，未注册为 0
    pub fn len(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, |l| l.len())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.listeners.contains_key(name)
    }

    /// 当前拥有监听器的事件名（只读视图，无序）
    pub fn event_names(&self) -> Vec<String> {
        self.listeners.iter().map(|e| e.key().clone()).collect()
    }

    /// 全部事件名下的监听器总数
    pub fn total(&self) -> usize {
        self.listeners.iter().map(|e| e.value().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}
