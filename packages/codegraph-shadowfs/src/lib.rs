//! Transactional overlay filesystem with optimistic concurrency, plus the
//! event bus and incremental-reindexing plugin that react to its activity.

#![allow(dead_code)]

pub mod core;
pub mod error;
pub mod events;
pub mod plugins;

pub use crate::core::{MaterializedLease, ShadowFs};
pub use error::{Conflict, EventValidationError, ShadowFsError};
pub use events::{Event, EventBus, EventKind, EventPlugin, PluginError};
pub use plugins::{IncrementalIndexer, IncrementalUpdatePlugin, IrDeltaBuilder};
