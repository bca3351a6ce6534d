//! Bounded-concurrency scheduling
//!
//! A generic "map with at most N in flight" primitive.
//!
//! # Overview
//!
//! [`map_limit`] takes a list of inputs and an async function, keeps a queue
//! of inputs not yet started and a pool of at most `limit` in-flight futures,
//! and admits the next queued input as soon as any in-flight future settles
//! (sliding-window admission). Outputs come back in input order, whatever the
//! completion order was.
//!
//! Everything runs inside the caller's task. Nothing is spawned, so the
//! futures do not need to be `Send` or `'static`.

mod scheduler;

pub use scheduler::{map_limit, MapLimit, Settled};
