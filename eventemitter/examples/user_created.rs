/// 事件发射器示例：订阅 `user.created` 并携带用户 ID 分发
use anyhow::Result as AnyResult;
use eventemitter::{EmitterConfig, EventEmitter, InMemoryEmitter};

#[tokio::main]
async fn main() -> AnyResult<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    let emitter = InMemoryEmitter::with_config(EmitterConfig::builder().label("users").build())?;

    // 订阅 user.created
    let handle = emitter.subscribe("user.created", |id: &u64| {
        println!("UserID: {id}");
    });

    // 携带用户 ID 分发
    emitter.dispatch("user.created", 1234u64);

    // 参数类型不符的监听器会被跳过并记录告警
    emitter.dispatch("user.created", "not-an-id");

    // 等待所有监听器执行完毕
    emitter.wait().await;

    emitter.unsubscribe("user.created", &handle);
    println!("listeners left: {}", emitter.listener_count("user.created"));

    Ok(())
}
