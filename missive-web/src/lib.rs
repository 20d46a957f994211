//! # missive-web - HTTP Bridge for missive-rt Actors
//!
//! Serves a [`missive_rt::ActorSystem`]'s actors at URL paths equal to
//! their ids, so peers can spawn, cast, call, and kill them over plain
//! HTTP:
//!
//! | Verb   | Path  | Body            | Meaning                          |
//! |--------|-------|-----------------|----------------------------------|
//! | PUT    | /id   | behavior name   | spawn a registered behavior      |
//! | POST   | /id   | message or call | cast, or a correlated remotecall |
//! | DELETE | /id   | -               | kill                             |
//! | GET    | /id   | -               | JSON state dump                  |
//! | HEAD   | /id   | -               | liveness probe                   |
//!
//! Remote spawn is restricted to behaviors registered by name in a
//! [`BehaviorRegistry`]; the bridge never evaluates code it receives.
//! Message bodies use the same JSON encoding as local delivery, with the
//! bridge rewriting local ids to absolute URLs on the way out and stripping
//! its own prefix on the way in.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use missive_rt::{ActorSystem, SystemConfig};
//! use missive_web::{BehaviorRegistry, BridgeState};
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let base = url::Url::parse("http://127.0.0.1:8080/").unwrap();
//!     let system = ActorSystem::new(SystemConfig::default().with_base_url(base));
//!
//!     let behaviors = BehaviorRegistry::new();
//!     // behaviors.register("worker", || Box::new(...));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     missive_web::serve(listener, Arc::new(BridgeState::new(system, behaviors))).await
//! }
//! ```

pub mod app;
pub mod behaviors;

pub use app::{router, serve, BridgeState};
pub use behaviors::BehaviorRegistry;
