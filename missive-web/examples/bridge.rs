//! Serve an actor system over HTTP on port 8080.
//!
//! Run with: `cargo run --example bridge`, then from another shell:
//!
//! ```text
//! curl -X PUT  http://127.0.0.1:8080/echo-1 -d echo
//! curl -X POST http://127.0.0.1:8080/echo-1 \
//!      -d '{"remotecall": "r-1", "method": "echo", "message": {"n": 1}}'
//! curl         http://127.0.0.1:8080/echo-1
//! ```

// Layer 1: Standard library imports
use std::io;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use missive_rt::prelude::*;
use missive_web::{BehaviorRegistry, BridgeState};

struct Echo;

#[async_trait]
impl Server for Echo {
    async fn dispatch(
        &mut self,
        method: &str,
        message: Value,
        _ctx: &mut ActorContext,
    ) -> Result<Value, DispatchError> {
        match method {
            "echo" => Ok(message),
            _ => Err(DispatchError::UnknownMethod),
        }
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();

    let base = url::Url::parse("http://127.0.0.1:8080/").map_err(io::Error::other)?;
    let system = ActorSystem::new(SystemConfig::default().with_base_url(base));

    let behaviors = BehaviorRegistry::new();
    behaviors.register("echo", || {
        Box::new(ServerBehavior::new(Echo)) as Box<dyn Behavior>
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
    println!("bridge listening on http://127.0.0.1:8080/");
    missive_web::serve(listener, Arc::new(BridgeState::new(system, behaviors))).await
}
