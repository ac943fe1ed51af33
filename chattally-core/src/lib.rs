//! # chattally-core
//!
//! Core library for chattally - a personal chat activity tracker.
//!
//! This library provides:
//! - Domain types for the stats snapshot and gateway events
//! - An event classifier and the stats accumulator it feeds
//! - A persistence bridge with a SQLite key/value store
//! - Report rendering and the `stats`/`serverstats`/`resetstats` commands
//! - A lifecycle controller that attaches to a cooperative event bus
//!
//! ## Architecture
//!
//! ```text
//! host gateway → Dispatcher → StatsTracker handlers → classifier
//!                                   → StatsAccumulator → DurableStore
//! commands (stats/serverstats/resetstats) → report renderer → host send
//! ```
//!
//! ## Example
//!
//! ```rust
//! use std::rc::Rc;
//! use chattally_core::{
//!     commands, Dispatcher, MemoryStore, StaticDirectory, StatsTracker, TrackingConfig,
//! };
//!
//! let directory = Rc::new(StaticDirectory {
//!     current_user: Some("me".to_string()),
//!     ..Default::default()
//! });
//! let mut tracker = StatsTracker::new(
//!     Box::new(MemoryStore::new()),
//!     directory,
//!     Rc::new(TrackingConfig::default()),
//! );
//! let mut bus = Dispatcher::new();
//! tracker.start(&mut bus);
//! // ... host dispatches events ...
//! let acc = tracker.accumulator();
//! let response = commands::stats(&acc.borrow(), &TrackingConfig::default());
//! assert!(response.content.contains("ACTIVITY REPORT"));
//! tracker.stop(&mut bus);
//! ```

// Re-export commonly used items at the crate root
pub use accumulator::StatsAccumulator;
pub use bus::{Dispatcher, SubscriptionId};
pub use config::{Config, TrackingConfig};
pub use error::{Error, Result};
pub use host::{Directory, Settings, StaticDirectory};
pub use store::{DurableStore, MemoryStore, SqliteStore, STATS_KEY};
pub use tracker::StatsTracker;
pub use types::*;

// Public modules
pub mod accumulator;
pub mod bus;
pub mod classifier;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod report;
pub mod store;
pub mod tracker;
pub mod types;
