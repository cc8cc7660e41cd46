//! # Memory Management
//!
//! Handle-based storage and recycling for the UI graph.
//!
//! ## Design Philosophy
//!
//! - Components and tree nodes refer to each other by [`Index`], never by pointer
//! - Transient objects (events) come from a [`Pool`] and go back to it

mod arena;
mod pool;

pub use arena::{Arena, Index};
pub use pool::{Pool, Poolable, Pools};
