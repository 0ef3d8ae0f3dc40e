//! # Rendering System
//!
//! Collects the scene once per tick and publishes it for the presentation
//! thread. Drawing happens later, from the published snapshot.

use std::sync::Arc;

use crate::ecs::{System, SystemError, World};
use crate::input::InputState;
use crate::render::{SceneCompositor, SnapshotBuffer};

/// System that publishes a [`crate::render::SceneSnapshot`] every tick
pub struct RenderSystem {
    buffer: Arc<SnapshotBuffer>,
}

impl RenderSystem {
    /// Publish into the given buffer
    pub fn new(buffer: Arc<SnapshotBuffer>) -> Self {
        Self { buffer }
    }

    /// The buffer snapshots are published into
    pub fn buffer(&self) -> &Arc<SnapshotBuffer> {
        &self.buffer
    }
}

impl System for RenderSystem {
    fn name(&self) -> &str {
        "RenderSystem"
    }

    fn update(
        &mut self,
        world: &mut World,
        _input: &InputState,
        _delta_time: f32,
    ) -> Result<(), SystemError> {
        let snapshot = SceneCompositor::collect(world);
        let frame = self.buffer.publish(snapshot);
        log::trace!("Published scene snapshot {}", frame);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Color, Sprite, Transform};

    #[test]
    fn test_publishes_each_tick() {
        let buffer = Arc::new(SnapshotBuffer::new());
        let mut system = RenderSystem::new(Arc::clone(&buffer));
        let mut world = World::new();
        let input = InputState::new();

        system.update(&mut world, &input, 0.016).unwrap();
        assert!(buffer.latest().unwrap().is_empty());

        let entity = world.spawn((Transform::new(1.0, 1.0), Sprite::new(2.0, 2.0, Color::GREEN)));
        world.refresh();
        system.update(&mut world, &input, 0.016).unwrap();

        let snapshot = buffer.latest().unwrap();
        assert_eq!(snapshot.frame, 2);
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].entity, entity);
    }

    #[test]
    fn test_snapshot_unaffected_by_later_changes() {
        let buffer = Arc::new(SnapshotBuffer::new());
        let mut system = RenderSystem::new(Arc::clone(&buffer));
        let mut world = World::new();
        let entity = world.spawn((Transform::new(1.0, 1.0), Sprite::new(2.0, 2.0, Color::GREEN)));
        world.refresh();
        system.update(&mut world, &InputState::new(), 0.016).unwrap();
        let published = buffer.latest().unwrap();

        world.despawn(entity);
        world.refresh();

        assert_eq!(published.items.len(), 1);
    }
}
