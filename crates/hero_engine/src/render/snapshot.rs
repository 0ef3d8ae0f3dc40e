//! Per-tick scene snapshots
//!
//! The simulation thread publishes a complete, immutable [`SceneSnapshot`]
//! once per tick. The presentation thread reads whichever snapshot is newest
//! and never sees a world that is halfway through an update.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::assets::ImageData;
use crate::ecs::components::{Color, Font};
use crate::ecs::Entity;
use crate::foundation::math::{Mat3, Vec2};

/// What a [`DrawItem`] paints
#[derive(Debug, Clone)]
pub enum DrawKind {
    /// Solid rectangle
    Rect {
        /// Fill color
        color: Color,
    },
    /// Bitmap
    Image {
        /// Pixels
        image: Arc<ImageData>,
        /// Opacity in `[0, 1]`
        opacity: f32,
    },
}

/// One z-ordered drawable, centered on its entity
#[derive(Debug, Clone)]
pub struct DrawItem {
    /// Owning entity
    pub entity: Entity,
    /// Draw order
    pub z_order: i32,
    /// Entity transform (translate * rotate * scale)
    pub transform: Mat3,
    /// Unscaled width
    pub width: f32,
    /// Unscaled height
    pub height: f32,
    /// Payload
    pub kind: DrawKind,
}

/// One text label, centered on its entity's position
#[derive(Debug, Clone)]
pub struct TextItem {
    /// Owning entity
    pub entity: Entity,
    /// Label contents
    pub text: String,
    /// Font
    pub font: Font,
    /// Fill color
    pub color: Color,
    /// Entity position
    pub position: Vec2,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    /// Publication number, assigned by [`SnapshotBuffer::publish`]
    pub frame: u64,
    /// Drawables in final draw order
    pub items: Vec<DrawItem>,
    /// Labels in query order, drawn after every item
    pub texts: Vec<TextItem>,
}

impl SceneSnapshot {
    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.texts.is_empty()
    }
}

/// Single-writer hand-off slot for the newest snapshot
#[derive(Debug, Default)]
pub struct SnapshotBuffer {
    latest: Mutex<Option<Arc<SceneSnapshot>>>,
    frame: AtomicU64,
    dirty: AtomicBool,
}

impl SnapshotBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot, returning its frame number
    pub fn publish(&self, mut snapshot: SceneSnapshot) -> u64 {
        let frame = self.frame.fetch_add(1, Ordering::AcqRel) + 1;
        snapshot.frame = frame;
        let snapshot = Arc::new(snapshot);

        *self.latest.lock().unwrap_or_else(|poisoned| {
            log::warn!("Snapshot buffer lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        }) = Some(snapshot);
        self.dirty.store(true, Ordering::Release);
        frame
    }

    /// Newest published snapshot, if any
    pub fn latest(&self) -> Option<Arc<SceneSnapshot>> {
        self.latest
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of snapshots published so far
    pub fn frame(&self) -> u64 {
        self.frame.load(Ordering::Acquire)
    }

    /// Whether a snapshot was published since the last [`Self::take_dirty`]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Acquire)
    }

    /// Whether a snapshot was published since the last call, clearing the flag
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::AcqRel)
    }
}
