//! 完成屏障（CompletionBarrier）
//!
//! 以 `tokio::sync::watch` 记录在途分发数：
//! - `enter` 在调度时立即计数，返回的守卫在析构时恰好减一次（包括 panic 展开）；
//! - `wait` 在观察到计数为 0 时返回，可重复调用，也可与新的分发并发；
//! - 不支持取消与超时，需要期限的调用方自行包一层 `tokio::time::timeout`。
//!
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Clone, Debug)]
pub struct CompletionBarrier {
    in_flight: Arc<watch::Sender<usize>>,
}

impl Default for CompletionBarrier {
    fn default() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            in_flight: Arc::new(tx),
        }
    }
}

impl CompletionBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个在途分发
    pub fn enter(&self) -> InFlightGuard {
        self.in_flight.send_modify(|n| *n += 1);
        InFlightGuard {
            in_flight: self.in_flight.clone(),
        }
    }

    /// 当前在途分发数
    pub fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// 等待在途分发数归零
    pub async fn wait(&self) {
        let mut rx = self.in_flight.subscribe();
        // 发送端由 self 持有，wait_for 不会因通道关闭而出错
        let _ = rx.wait_for(|n| *n == 0).await;
    }
}

/// 在途分发守卫
#[must_use = "dropping the guard immediately marks the dispatch as finished"]
#[derive(Debug)]
pub struct InFlightGuard {
    in_flight: Arc<watch::Sender<usize>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.in_flight.send_modify(|n| *n -= 1);
    }
}
