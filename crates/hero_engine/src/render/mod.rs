//! # Scene rendering
//!
//! The engine does not own a pixel backend. Drawing goes through the
//! [`Rasterizer`] trait, which a host implements on top of its canvas.
//!
//! ## Architecture
//!
//! - **SceneCompositor**: gathers visible drawables, orders them by z-order,
//!   and emits transformed draw calls
//! - **SceneSnapshot**: immutable per-tick copy of everything to draw
//! - **SnapshotBuffer**: hands the latest snapshot from the simulation thread
//!   to the presentation thread
//! - **CommandRecorder**: a rasterizer that records draw calls as data

pub mod commands;
pub mod compositor;
pub mod rasterizer;
pub mod snapshot;

pub use commands::{CommandRecorder, DrawCommand};
pub use compositor::SceneCompositor;
pub use rasterizer::{Rasterizer, TextMetrics};
pub use snapshot::{DrawItem, DrawKind, SceneSnapshot, SnapshotBuffer, TextItem};
