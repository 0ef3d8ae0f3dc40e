//! ECS collision system
//!
//! Brute-force pairwise AABB detection over every active entity holding a
//! [`Transform`] and a [`BoxCollider`]. Each overlapping pair is handed to a
//! [`CollisionHandler`], once per tick.

use crate::ecs::components::{BoxCollider, Transform};
use crate::ecs::{Entity, System, SystemError, World};
use crate::input::InputState;
use crate::physics::Aabb;

/// Reaction to a detected overlap
///
/// Any `FnMut(&mut World, Entity, Entity)` closure is a handler.
pub trait CollisionHandler: Send {
    /// Called once per overlapping pair, `a` discovered before `b`
    fn on_collision(&mut self, world: &mut World, a: Entity, b: Entity);
}

impl<F> CollisionHandler for F
where
    F: FnMut(&mut World, Entity, Entity) + Send,
{
    fn on_collision(&mut self, world: &mut World, a: Entity, b: Entity) {
        self(world, a, b);
    }
}

/// Handler that ignores every collision
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCollisionResponse;

impl CollisionHandler for NoCollisionResponse {
    fn on_collision(&mut self, _world: &mut World, _a: Entity, _b: Entity) {}
}

/// Two entities whose colliders overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Earlier entity in query order
    pub a: Entity,
    /// Later entity in query order
    pub b: Entity,
}

/// Collision detection system
pub struct CollisionSystem<H = NoCollisionResponse> {
    handler: H,
}

impl CollisionSystem<NoCollisionResponse> {
    /// Detection only; overlaps are found and ignored
    pub fn new() -> Self {
        Self {
            handler: NoCollisionResponse,
        }
    }
}

impl Default for CollisionSystem<NoCollisionResponse> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: CollisionHandler> CollisionSystem<H> {
    /// Detection with a reaction hook
    pub fn with_handler(handler: H) -> Self {
        Self { handler }
    }

    /// The reaction hook
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Mutable access to the reaction hook
    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Every overlapping unordered pair, in discovery order
    ///
    /// Pairs are `(i, j)` with `j` after `i` in query order.
    pub fn detect(world: &World) -> Vec<CollisionPair> {
        let boxes: Vec<(Entity, Aabb)> = world
            .query::<(Transform, BoxCollider)>()
            .into_iter()
            .filter_map(|entity| {
                let transform = world.get::<Transform>(entity)?;
                let collider = world.get::<BoxCollider>(entity)?;
                Some((entity, Aabb::from_collider(transform, collider)))
            })
            .collect();

        let mut pairs = Vec::new();
        for (i, (a, box_a)) in boxes.iter().enumerate() {
            for (b, box_b) in &boxes[i + 1..] {
                if box_a.overlaps(box_b) {
                    pairs.push(CollisionPair { a: *a, b: *b });
                }
            }
        }
        pairs
    }
}

impl<H: CollisionHandler> System for CollisionSystem<H> {
    fn name(&self) -> &str {
        "CollisionSystem"
    }

    fn update(
        &mut self,
        world: &mut World,
        _input: &InputState,
        _delta_time: f32,
    ) -> Result<(), SystemError> {
        let pairs = Self::detect(world);
        if !pairs.is_empty() {
            log::trace!("{} collision pair(s) this tick", pairs.len());
        }
        for pair in pairs {
            self.handler.on_collision(world, pair.a, pair.b);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Hits = Arc<Mutex<Vec<(Entity, Entity)>>>;

    fn recording_system(hits: &Hits) -> CollisionSystem<impl CollisionHandler> {
        let hits = Arc::clone(hits);
        CollisionSystem::with_handler(move |_world: &mut World, a: Entity, b: Entity| {
            hits.lock().unwrap().push((a, b));
        })
    }

    fn spawn_box(world: &mut World, x: f32, y: f32, size: f32) -> Entity {
        world.spawn((Transform::new(x, y), BoxCollider::new(size, size)))
    }

    #[test]
    fn test_overlap_reported_once_then_cleared() {
        let mut world = World::new();
        let a = spawn_box(&mut world, 0.0, 0.0, 10.0);
        let b = spawn_box(&mut world, 5.0, 5.0, 10.0);
        world.refresh();

        let hits: Hits = Arc::default();
        let mut system = recording_system(&hits);
        let input = InputState::new();

        system.update(&mut world, &input, 0.016).unwrap();
        assert_eq!(*hits.lock().unwrap(), vec![(a, b)]);

        world.get_mut::<Transform>(b).unwrap().set_position(20.0, 20.0);
        hits.lock().unwrap().clear();
        system.update(&mut world, &input, 0.016).unwrap();
        assert!(hits.lock().unwrap().is_empty());
    }

    #[test]
    fn test_all_pairs_found() {
        let mut world = World::new();
        let a = spawn_box(&mut world, 0.0, 0.0, 10.0);
        let b = spawn_box(&mut world, 2.0, 0.0, 10.0);
        let c = spawn_box(&mut world, 4.0, 0.0, 10.0);
        let _far = spawn_box(&mut world, 100.0, 100.0, 10.0);
        world.refresh();

        let pairs = CollisionSystem::<NoCollisionResponse>::detect(&world);
        assert_eq!(
            pairs,
            vec![
                CollisionPair { a, b },
                CollisionPair { a, b: c },
                CollisionPair { a: b, b: c },
            ]
        );
    }

    #[test]
    fn test_touching_boxes_not_reported() {
        let mut world = World::new();
        spawn_box(&mut world, 0.0, 0.0, 10.0);
        spawn_box(&mut world, 10.0, 0.0, 10.0);
        world.refresh();

        assert!(CollisionSystem::<NoCollisionResponse>::detect(&world).is_empty());
    }

    #[test]
    fn test_entities_without_collider_ignored() {
        let mut world = World::new();
        spawn_box(&mut world, 0.0, 0.0, 10.0);
        world.spawn((Transform::new(0.0, 0.0),));
        world.refresh();

        assert!(CollisionSystem::<NoCollisionResponse>::detect(&world).is_empty());
    }

    #[test]
    fn test_pairs_fixed_before_handler_runs() {
        let mut world = World::new();
        let a = spawn_box(&mut world, 0.0, 0.0, 10.0);
        let b = spawn_box(&mut world, 5.0, 0.0, 10.0);
        let c = spawn_box(&mut world, 10.0, 0.0, 10.0);
        world.refresh();

        let seen: Hits = Arc::default();
        let log = Arc::clone(&seen);
        let mut system = CollisionSystem::with_handler(move |world: &mut World, x: Entity, y: Entity| {
            log.lock().unwrap().push((x, y));
            // Moving `c` away must not hide the (b, c) pair found this tick
            if let Some(transform) = world.get_mut::<Transform>(c) {
                transform.set_position(500.0, 500.0);
            }
        });
        system.update(&mut world, &InputState::new(), 0.016).unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![(a, b), (b, c)]);
    }

    #[test]
    fn test_trigger_flag_not_special_cased() {
        let mut world = World::new();
        world.spawn((Transform::new(0.0, 0.0), BoxCollider::new(4.0, 4.0).as_trigger()));
        spawn_box(&mut world, 1.0, 1.0, 4.0);
        world.refresh();

        assert_eq!(CollisionSystem::<NoCollisionResponse>::detect(&world).len(), 1);
    }
}
