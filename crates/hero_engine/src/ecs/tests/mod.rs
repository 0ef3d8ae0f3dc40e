//! Scenario tests across the world, systems, and compositor

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ecs::components::{BoxCollider, Color, Sprite, Transform, Velocity};
use crate::ecs::systems::{CollisionSystem, MovementSystem};
use crate::ecs::{Entity, SystemScheduler, World};
use crate::input::InputState;
use crate::render::SceneCompositor;

#[derive(Default)]
struct Model {
    visible: BTreeSet<Entity>,
    staged_add: BTreeSet<Entity>,
    staged_remove: BTreeSet<Entity>,
}

impl Model {
    fn refresh(&mut self) {
        for entity in std::mem::take(&mut self.staged_remove) {
            self.visible.remove(&entity);
            self.staged_add.remove(&entity);
        }
        self.visible.append(&mut self.staged_add);
    }
}

#[test]
fn test_random_lifecycle_matches_model() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut world = World::new();
    let mut model = Model::default();
    let mut known: Vec<Entity> = Vec::new();

    for _ in 0..2_000 {
        match rng.gen_range(0..10) {
            0..=3 => {
                let entity = world.spawn((Transform::default(),));
                model.staged_add.insert(entity);
                known.push(entity);
            }
            4..=7 if !known.is_empty() => {
                let entity = known[rng.gen_range(0..known.len())];
                world.despawn(entity);
                if model.visible.contains(&entity) || model.staged_add.contains(&entity) {
                    model.staged_remove.insert(entity);
                }
            }
            _ => {
                world.refresh();
                model.refresh();
                let queried: BTreeSet<Entity> = world.query::<(Transform,)>().into_iter().collect();
                assert_eq!(queried, model.visible);
            }
        }
    }
}

#[test]
fn test_despawn_twice_same_as_once() {
    let mut once = World::new();
    let mut twice = World::new();
    let a = once.spawn((Transform::default(),));
    let b = twice.spawn((Transform::default(),));
    once.refresh();
    twice.refresh();

    once.despawn(a);
    twice.despawn(b);
    twice.despawn(b);
    once.refresh();
    twice.refresh();
    twice.despawn(b);
    twice.refresh();

    assert_eq!(once.entity_count(), twice.entity_count());
    assert!(once.query::<(Transform,)>().is_empty());
    assert!(twice.query::<(Transform,)>().is_empty());
}

#[test]
fn test_collision_scenario() {
    let mut world = World::new();
    let mut scheduler = SystemScheduler::new();
    let hits = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&hits);
    scheduler.add_system(
        Box::new(CollisionSystem::with_handler(
            move |_world: &mut World, a: Entity, b: Entity| {
                log.lock().unwrap().push((a, b));
            },
        )),
        &mut world,
    );

    let a = world.spawn((Transform::new(0.0, 0.0), BoxCollider::new(10.0, 10.0)));
    let b = world.spawn((Transform::new(5.0, 5.0), BoxCollider::new(10.0, 10.0)));
    let input = InputState::new();

    world.refresh();
    scheduler.run_tick(&mut world, &input, 0.016);
    assert_eq!(*hits.lock().unwrap(), vec![(a, b)]);

    world.get_mut::<Transform>(b).unwrap().set_position(20.0, 20.0);
    world.refresh();
    scheduler.run_tick(&mut world, &input, 0.016);
    assert_eq!(hits.lock().unwrap().len(), 1);
}

#[test]
fn test_hook_count_equals_overlapping_pairs() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut world = World::new();
    for _ in 0..30 {
        world.spawn((
            Transform::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)),
            BoxCollider::new(rng.gen_range(1.0..20.0), rng.gen_range(1.0..20.0)),
        ));
    }
    world.refresh();

    let entities = world.query::<(Transform, BoxCollider)>();
    let mut expected = 0;
    for (i, a) in entities.iter().enumerate() {
        for b in &entities[i + 1..] {
            let box_of = |entity: Entity| {
                crate::physics::Aabb::from_collider(
                    world.get::<Transform>(entity).unwrap(),
                    world.get::<BoxCollider>(entity).unwrap(),
                )
            };
            let (box_a, box_b) = (box_of(*a), box_of(*b));
            assert_eq!(box_a.overlaps(&box_b), box_b.overlaps(&box_a));
            if box_a.overlaps(&box_b) {
                expected += 1;
            }
        }
    }

    let count = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&count);
    let mut system = CollisionSystem::with_handler(move |_world: &mut World, _a: Entity, _b: Entity| {
        *counter.lock().unwrap() += 1;
    });
    crate::ecs::System::update(&mut system, &mut world, &InputState::new(), 0.016).unwrap();

    assert_eq!(*count.lock().unwrap(), expected);
}

#[test]
fn test_movement_scenario() {
    let mut world = World::new();
    let mut scheduler = SystemScheduler::new();
    scheduler.add_system(Box::new(MovementSystem::new()), &mut world);

    let entity = world.spawn((Transform::new(0.0, 0.0), Velocity::new(10.0, 0.0)));
    world.refresh();
    scheduler.run_tick(&mut world, &InputState::new(), 0.5);

    assert_relative_eq!(world.get::<Transform>(entity).unwrap().x(), 5.0);
}

#[test]
fn test_moving_boxes_drawn_where_they_end_up() {
    let mut world = World::new();
    let mut scheduler = SystemScheduler::new();
    scheduler.add_system(Box::new(MovementSystem::new()), &mut world);

    let mover = world.spawn((
        Transform::new(0.0, 0.0),
        Velocity::new(0.0, 20.0),
        Sprite::new(4.0, 4.0, Color::WHITE).with_z_order(1),
    ));
    let backdrop = world.spawn((Transform::new(0.0, 0.0), Sprite::new(100.0, 100.0, Color::BLACK)));
    world.refresh();
    scheduler.run_tick(&mut world, &InputState::new(), 1.0);

    let snapshot = SceneCompositor::collect(&world);
    let order: Vec<Entity> = snapshot.items.iter().map(|item| item.entity).collect();
    assert_eq!(order, vec![backdrop, mover]);
    assert_relative_eq!(snapshot.items[1].transform[(1, 2)], 20.0);
}

#[test]
fn test_coincident_boxes_reported_and_still_box_stays() {
    let mut world = World::new();
    let mut scheduler = SystemScheduler::new();
    scheduler.add_system(Box::new(MovementSystem::new()), &mut world);

    let still = world.spawn((
        Transform::new(3.0, 3.0),
        Velocity::new(0.0, 0.0),
        BoxCollider::new(0.5, 0.5),
    ));
    world.spawn((Transform::new(3.0, 3.0), BoxCollider::new(0.5, 0.5)));
    world.refresh();

    assert_eq!(CollisionSystem::<crate::ecs::systems::NoCollisionResponse>::detect(&world).len(), 1);

    scheduler.run_tick(&mut world, &InputState::new(), 10.0);
    assert_eq!(world.get::<Transform>(still), Some(&Transform::new(3.0, 3.0)));
}
