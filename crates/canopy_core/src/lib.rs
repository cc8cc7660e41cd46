//! # Canopy Core
//!
//! Storage primitives shared by the Canopy widget toolkit:
//! - A generational [`Arena`] so the scene graph can use index handles
//!   instead of parent/child pointers
//! - Per-type object [`Pools`] for events created every frame
//!
//! ## Example
//!
//! ```rust
//! use canopy_core::{Arena, Pools};
//!
//! let mut nodes = Arena::new();
//! let root = nodes.insert("root");
//! assert!(nodes.contains(root));
//!
//! let pools = Pools::default();
//! assert!(format!("{pools:?}").contains("Pools"));
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod memory;

pub use memory::{Arena, Index, Pool, Poolable, Pools};
