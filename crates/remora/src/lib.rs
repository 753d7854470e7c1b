#![forbid(unsafe_code)]

//! Hierarchical state machine → visualization-graph mirroring.
//!
//! Design goals:
//! - structural parity: after every sync the mirror graph matches the source
//!   hierarchy (nodes reused by name, edges rebuilt from scratch, from-any
//!   transitions scoped to the nesting level that declared them)
//! - deterministic, testable outputs (JSON model snapshots)
//! - no coupling to a concrete HSM engine or to the graph owner's
//!   persistence/rendering

pub mod error;
pub mod hsm;
pub mod mirror;
pub mod model;
pub mod resolve;
pub mod utils;

pub use error::{Error, Result};
pub use hsm::{HsmNode, LeafState, MachineNode, Transition, TransitionKind};
pub use mirror::{SyncOptions, sync, sync_with_options};
pub use model::graph_model;
pub use resolve::{ActiveChild, ActiveScope, MAX_ACTIVE_DEPTH, resolve_active_leaf_name};
