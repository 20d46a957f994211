//! A calling actor driving a counting server.
//!
//! Run with: `cargo run --example ping_pong`

// Layer 1: Standard library imports
use std::time::Duration;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use missive_rt::prelude::*;

struct Counter {
    count: i64,
}

#[async_trait]
impl Server for Counter {
    async fn dispatch(
        &mut self,
        method: &str,
        message: Value,
        _ctx: &mut ActorContext,
    ) -> Result<Value, DispatchError> {
        match method {
            "add" => {
                self.count += message.as_i64().unwrap_or(0);
                Ok(Value::from(self.count))
            }
            "read" => Ok(Value::from(self.count)),
            _ => Err(DispatchError::UnknownMethod),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt::init();

    let system = ActorSystem::new(SystemConfig::default());
    let counter = system.spawn(ServerBehavior::new(Counter { count: 0 }));

    let target = counter.clone();
    let driver = system.spawn_fn(move |ctx| {
        Box::pin(async move {
            for n in 1..=3 {
                let total = target
                    .call(ctx, "add", Value::from(n), Some(Duration::from_secs(1)))
                    .await?;
                println!("after adding {n}: {total}");
            }
            let total = target.call(ctx, "read", Value::Null, None).await?;
            Ok(total)
        })
    });

    let total = driver.wait().await?;
    println!("final count: {total}");

    counter.kill().await?;
    Ok(())
}
