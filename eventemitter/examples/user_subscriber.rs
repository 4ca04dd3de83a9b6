/// 订阅者示例：一个结构体声明自己关心的全部事件，一次注册/撤销
use anyhow::Result as AnyResult;
use eventemitter::{EventEmitter, InMemoryEmitter, Listener, SubscribedEvents, Subscriber};
use std::collections::HashMap;

struct UserSubscriber {
    on_created: Listener,
    on_deleted: Listener,
}

impl UserSubscriber {
    fn new() -> Self {
        Self {
            on_created: Listener::new(|id: &u64| println!("created: {id}")),
            on_deleted: Listener::new(|id: &u64| println!("deleted: {id}")),
        }
    }
}

impl Subscriber for UserSubscriber {
    fn subscribed_events(&self) -> SubscribedEvents {
        // 返回保存的监听器克隆，remove_subscriber 才能按身份撤销
        HashMap::from([
            ("user.created".to_string(), vec![self.on_created.clone()]),
            ("user.deleted".to_string(), vec![self.on_deleted.clone()]),
        ])
    }
}

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let emitter = InMemoryEmitter::new()?;
    let subscriber = UserSubscriber::new();

    emitter.add_subscriber(&subscriber);

    emitter.dispatch("user.created", 1234u64);
    emitter.dispatch("user.deleted", 1234u64);
    emitter.wait().await;

    emitter.remove_subscriber(&subscriber);
    assert!(emitter.event_names().is_empty());

    Ok(())
}
