//! Velocity integration

use crate::ecs::components::{Transform, Velocity};
use crate::ecs::{System, SystemError, World};
use crate::input::InputState;

/// Moves every entity with a [`Transform`] and a [`Velocity`]
///
/// `position += velocity * delta_time`, with no clamping.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl MovementSystem {
    /// Create the system
    pub fn new() -> Self {
        Self
    }
}

impl System for MovementSystem {
    fn name(&self) -> &str {
        "MovementSystem"
    }

    fn update(
        &mut self,
        world: &mut World,
        _input: &InputState,
        delta_time: f32,
    ) -> Result<(), SystemError> {
        for entity in world.query::<(Transform, Velocity)>() {
            let Some(velocity) = world.get::<Velocity>(entity).copied() else {
                continue;
            };
            if let Some(transform) = world.get_mut::<Transform>(entity) {
                transform.position += velocity.linear * delta_time;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_half_second_step() {
        let mut world = World::new();
        let entity = world.spawn((Transform::new(0.0, 0.0), Velocity::new(10.0, 0.0)));
        world.refresh();

        MovementSystem::new()
            .update(&mut world, &InputState::new(), 0.5)
            .unwrap();

        let transform = world.get::<Transform>(entity).unwrap();
        assert_relative_eq!(transform.x(), 5.0);
        assert_relative_eq!(transform.y(), 0.0);
    }

    #[test]
    fn test_entities_without_velocity_stay_put() {
        let mut world = World::new();
        let still = world.spawn((Transform::new(3.0, 3.0),));
        let moving = world.spawn((Transform::new(0.0, 0.0), Velocity::new(-2.0, 4.0)));
        world.refresh();

        let mut system = MovementSystem::new();
        let input = InputState::new();
        system.update(&mut world, &input, 0.25).unwrap();
        system.update(&mut world, &input, 0.25).unwrap();

        assert_eq!(world.get::<Transform>(still), Some(&Transform::new(3.0, 3.0)));
        let moved = world.get::<Transform>(moving).unwrap();
        assert_relative_eq!(moved.x(), -1.0);
        assert_relative_eq!(moved.y(), 2.0);
    }

    #[test]
    fn test_zero_velocity_no_displacement() {
        let mut world = World::new();
        let entity = world.spawn((Transform::new(3.0, 3.0), Velocity::new(0.0, 0.0)));
        world.refresh();

        MovementSystem::new()
            .update(&mut world, &InputState::new(), 10.0)
            .unwrap();

        assert_eq!(world.get::<Transform>(entity), Some(&Transform::new(3.0, 3.0)));
    }

    #[test]
    fn test_staged_and_inactive_entities_not_moved() {
        let mut world = World::new();
        let inactive = world.spawn((Transform::default(), Velocity::new(1.0, 1.0)));
        world.refresh();
        world.set_active(inactive, false);
        let staged = world.spawn((Transform::default(), Velocity::new(1.0, 1.0)));

        MovementSystem::new()
            .update(&mut world, &InputState::new(), 1.0)
            .unwrap();

        assert_eq!(world.get::<Transform>(inactive), Some(&Transform::default()));
        assert_eq!(world.get::<Transform>(staged), Some(&Transform::default()));
    }
}
