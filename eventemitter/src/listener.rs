//! 监听器与分发参数（Listener / Payload）
//!
//! - `Payload`：一次分发携带的类型擦除参数，记录具体类型名以便在边界处校验；
//! - `Listener`：由强类型闭包 `Fn(&A)` 包装而成的类型擦除回调，可克隆，按分配身份比较；
//! - `ListenerHandle`：一次订阅的不透明令牌，用于之后精确取消该订阅。
//!
use crate::error::{EmitterError, EmitterResult};
use std::any::{Any, type_name};
use std::fmt;
use std::sync::Arc;

type ListenerFn = dyn Fn(&Payload) -> EmitterResult<()> + Send + Sync;

/// 类型擦除的分发参数
///
/// 无参数事件约定使用单元类型 `()`。
pub struct Payload {
    value: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl Payload {
    pub fn new<A>(value: A) -> Self
    where
        A: Any + Send + Sync,
    {
        Self {
            value: Box::new(value),
            type_name: type_name::<A>(),
        }
    }

    /// 空参数（`()`）
    pub fn empty() -> Self {
        Self::new(())
    }

    /// 参数的具体类型名
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// 还原为具体类型；类型不符时返回 `TypeMismatch`
    pub fn downcast_ref<A: Any>(&self) -> EmitterResult<&A> {
        self.value
            .downcast_ref::<A>()
            .ok_or(EmitterError::TypeMismatch {
                expected: type_name::<A>(),
                found: self.type_name,
            })
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// 类型擦除的监听器
///
/// 克隆得到的 `Listener` 与原值是同一个监听器；
/// 两次 `Listener::new` 即使包装相同的函数也是不同的监听器。
#[derive(Clone)]
pub struct Listener {
    f: Arc<ListenerFn>,
    arg_type: &'static str,
}

impl Listener {
    /// 包装一个强类型回调，参数形状在此处固定为 `A`
    pub fn new<A, F>(f: F) -> Self
    where
        A: Any + Send + Sync,
        F: Fn(&A) + Send + Sync + 'static,
    {
        let wrapped = move |payload: &Payload| -> EmitterResult<()> {
            let args = payload.downcast_ref::<A>()?;
            f(args);
            Ok(())
        };

        Self {
            f: Arc::new(wrapped),
            arg_type: type_name::<A>(),
        }
    }

    /// 监听器期望的参数类型名
    pub fn arg_type(&self) -> &'static str {
        self.arg_type
    }

    /// 以给定参数调用监听器；参数类型不符时不调用并返回 `TypeMismatch`
    pub fn call(&self, payload: &Payload) -> EmitterResult<()> {
        (self.f)(payload)
    }

    /// 是否为同一个监听器（同一分配）
    pub fn same_as(&self, other: &Listener) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("arg_type", &self.arg_type)
            .finish_non_exhaustive()
    }
}

/// 订阅标识，在所属注册表内单调递增
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 一次订阅的令牌：按 `id` 判等
#[derive(Clone, Debug)]
pub struct ListenerHandle {
    id: ListenerId,
    listener: Listener,
}

impl ListenerHandle {
    pub(crate) fn new(id: ListenerId, listener: Listener) -> Self {
        Self { id, listener }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }
}

impl PartialEq for ListenerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ListenerHandle {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn call_with_matching_payload_invokes_callback() {
        let seen = Arc::new(AtomicUsize::new(0));
        let l = {
            let seen = seen.clone();
            Listener::new(move |n: &usize| {
                seen.fetch_add(*n, Ordering::SeqCst);
            })
        };

        l.call(&Payload::new(7usize)).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 7);
        assert_eq!(l.arg_type(), "usize");
    }

    #[test]
    fn call_with_wrong_payload_is_rejected_without_invoking() {
        let seen = Arc::new(AtomicUsize::new(0));
        let l = {
            let seen = seen.clone();
            Listener::new(move |_: &i32| {
                seen.fetch_add(1, Ordering::SeqCst);
            })
        };

        let err = l.call(&Payload::new("oops")).unwrap_err();
        match err {
            EmitterError::TypeMismatch { expected, found } => {
                assert_eq!(expected, "i32");
                assert_eq!(found, "&str");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn identity_follows_clones_not_behaviour() {
        let a = Listener::new(|_: &()| {});
        let b = Listener::new(|_: &()| {});
        let a2 = a.clone();

        assert!(a.same_as(&a2));
        assert!(!a.same_as(&b));
    }

    #[test]
    fn empty_payload_is_unit() {
        let p = Payload::empty();
        assert!(p.downcast_ref::<()>().is_ok());
        assert_eq!(p.type_name(), "()");
    }
}
