//! ECS World implementation
//!
//! The world owns every entity and its components. Creation and destruction
//! are staged: [`World::spawn`] and [`World::despawn`] only queue the change,
//! and [`World::refresh`] applies all removals and then all additions at the
//! tick boundary. Queries therefore always see the world exactly as of the
//! last refresh.

use std::any::TypeId;
use std::collections::{HashMap, HashSet};

use super::component::ComponentBundle;
use super::entity::EntityAllocator;
use super::storage::ComponentSet;
use super::{Component, Entity, Query};

#[derive(Debug)]
struct EntityRecord {
    components: ComponentSet,
    active: bool,
    /// Set by `refresh`; staged entities are owned but not yet queryable
    visible: bool,
}

/// ECS World containing all entities and components
#[derive(Debug, Default)]
pub struct World {
    allocator: EntityAllocator,
    /// Visible entities in creation order
    entities: Vec<Entity>,
    records: HashMap<Entity, EntityRecord>,
    pending_add: Vec<Entity>,
    pending_remove: Vec<Entity>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a new entity with an initial set of components
    ///
    /// The id is returned immediately and further components may be
    /// inserted, but the entity is invisible to queries until the next
    /// [`World::refresh`].
    pub fn spawn<B: ComponentBundle>(&mut self, bundle: B) -> Entity {
        let entity = self.allocator.allocate();
        let mut components = ComponentSet::new();
        bundle.insert_into(&mut components);

        self.records.insert(
            entity,
            EntityRecord {
                components,
                active: true,
                visible: false,
            },
        );
        self.pending_add.push(entity);
        log::trace!("Staged {} for addition", entity);
        entity
    }

    /// Stage a new entity without components
    pub fn spawn_empty(&mut self) -> Entity {
        self.spawn(())
    }

    /// Stage an entity for removal
    ///
    /// Returns `false` without doing anything if the entity is unknown or
    /// already staged. The entity stays visible until the next refresh.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if !self.records.contains_key(&entity) || self.pending_remove.contains(&entity) {
            return false;
        }
        self.pending_remove.push(entity);
        log::trace!("Staged {} for removal", entity);
        true
    }

    /// Apply staged removals, then staged additions
    ///
    /// Removed entities lose all components and their ids are forgotten.
    /// An entity despawned before it was ever added never becomes visible.
    pub fn refresh(&mut self) {
        let removed: HashSet<Entity> = self.pending_remove.drain(..).collect();
        if !removed.is_empty() {
            for entity in &removed {
                if let Some(mut record) = self.records.remove(entity) {
                    record.components.clear();
                }
            }
            self.entities.retain(|entity| !removed.contains(entity));
        }

        let added = self.pending_add.len();
        for entity in self.pending_add.drain(..) {
            if let Some(record) = self.records.get_mut(&entity) {
                record.visible = true;
                self.entities.push(entity);
            }
        }

        if added > 0 || !removed.is_empty() {
            log::trace!(
                "World refresh: -{} +{} ({} entities)",
                removed.len(),
                added,
                self.entities.len()
            );
        }
    }

    /// Attach a component, returning the value of the same type it replaced
    ///
    /// Works on staged entities as well. Returns `Err(component)` if the
    /// entity does not exist.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> Result<Option<T>, T> {
        match self.records.get_mut(&entity) {
            Some(record) => Ok(record.components.insert(component)),
            None => Err(component),
        }
    }

    /// Detach a component
    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.records
            .get_mut(&entity)
            .and_then(|record| record.components.remove::<T>())
    }

    /// Get a component from an entity
    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.records
            .get(&entity)
            .and_then(|record| record.components.get::<T>())
    }

    /// Get a mutable component from an entity
    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.records
            .get_mut(&entity)
            .and_then(|record| record.components.get_mut::<T>())
    }

    /// Check whether an entity holds a component type
    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.records
            .get(&entity)
            .is_some_and(|record| record.components.contains::<T>())
    }

    /// Active entities holding every type in `Q`, in creation order
    pub fn query<Q: Query>(&self) -> Vec<Entity> {
        self.query_types(&Q::type_ids())
    }

    /// Active entities holding every listed component type, in creation order
    pub fn query_types(&self, type_ids: &[TypeId]) -> Vec<Entity> {
        self.entities
            .iter()
            .copied()
            .filter(|entity| {
                self.records.get(entity).is_some_and(|record| {
                    record.active && record.components.contains_all(type_ids)
                })
            })
            .collect()
    }

    /// Iterate active entities holding `T`, in creation order
    pub fn iter<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.entities.iter().filter_map(move |entity| {
            let record = self.records.get(entity)?;
            if !record.active {
                return None;
            }
            record.components.get::<T>().map(|component| (*entity, component))
        })
    }

    /// Enable or disable an entity for queries
    ///
    /// Returns `false` if the entity does not exist.
    pub fn set_active(&mut self, entity: Entity, active: bool) -> bool {
        match self.records.get_mut(&entity) {
            Some(record) => {
                record.active = active;
                true
            }
            None => false,
        }
    }

    /// Whether an entity exists and is active
    pub fn is_active(&self, entity: Entity) -> bool {
        self.records.get(&entity).is_some_and(|record| record.active)
    }

    /// Whether an entity has been made visible by a refresh and not yet removed
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.records.get(&entity).is_some_and(|record| record.visible)
    }

    /// Whether an entity is staged for addition
    pub fn is_pending(&self, entity: Entity) -> bool {
        self.records.get(&entity).is_some_and(|record| !record.visible)
    }

    /// Active visible entities in creation order
    pub fn entities(&self) -> Vec<Entity> {
        self.entities
            .iter()
            .copied()
            .filter(|entity| self.is_active(*entity))
            .collect()
    }

    /// Number of visible entities (active or not)
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Drop every entity and staged change; ids keep counting up
    pub fn clear(&mut self) {
        self.entities.clear();
        self.records.clear();
        self.pending_add.clear();
        self.pending_remove.clear();
    }

    /// Clear the world and restart entity ids from zero
    pub fn reset(&mut self) {
        self.clear();
        self.allocator.reset();
    }
}
