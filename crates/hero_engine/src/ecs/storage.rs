//! Type-keyed component storage
//!
//! Each entity owns one [`ComponentSet`]: a map from component [`TypeId`] to a
//! boxed value. The key is the concrete type, so the downcasts below cannot
//! fail for a value that was stored through [`ComponentSet::insert`].

use std::any::{Any, TypeId};
use std::collections::HashMap;

use super::Component;

/// Per-entity component map (at most one value per component type)
#[derive(Default)]
pub struct ComponentSet {
    components: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ComponentSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a component, returning the value it replaced
    pub fn insert<T: Component>(&mut self, component: T) -> Option<T> {
        self.components
            .insert(TypeId::of::<T>(), Box::new(component))
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Remove a component, returning it if present
    pub fn remove<T: Component>(&mut self) -> Option<T> {
        self.components
            .remove(&TypeId::of::<T>())
            .and_then(|old| old.downcast::<T>().ok())
            .map(|old| *old)
    }

    /// Borrow a component
    pub fn get<T: Component>(&self) -> Option<&T> {
        self.components
            .get(&TypeId::of::<T>())
            .and_then(|component| component.downcast_ref::<T>())
    }

    /// Mutably borrow a component
    pub fn get_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.components
            .get_mut(&TypeId::of::<T>())
            .and_then(|component| component.downcast_mut::<T>())
    }

    /// Check for a component type
    pub fn contains<T: Component>(&self) -> bool {
        self.contains_type(TypeId::of::<T>())
    }

    /// Check for a component type by id
    pub fn contains_type(&self, type_id: TypeId) -> bool {
        self.components.contains_key(&type_id)
    }

    /// Check that every listed type is present
    pub fn contains_all(&self, type_ids: &[TypeId]) -> bool {
        type_ids.iter().all(|type_id| self.contains_type(*type_id))
    }

    /// Number of components held
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Whether no components are held
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Drop every component
    pub fn clear(&mut self) {
        self.components.clear();
    }
}

impl std::fmt::Debug for ComponentSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentSet")
            .field("count", &self.components.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Health(i32);
    impl Component for Health {}

    #[derive(Debug, PartialEq)]
    struct Name(&'static str);
    impl Component for Name {}

    #[test]
    fn test_insert_replaces_same_type() {
        let mut set = ComponentSet::new();
        assert_eq!(set.insert(Health(10)), None);
        assert_eq!(set.insert(Health(20)), Some(Health(10)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get::<Health>(), Some(&Health(20)));
    }

    #[test]
    fn test_distinct_types_coexist() {
        let mut set = ComponentSet::new();
        set.insert(Health(1));
        set.insert(Name("ball"));
        assert!(set.contains_all(&[TypeId::of::<Health>(), TypeId::of::<Name>()]));

        set.get_mut::<Health>().unwrap().0 = 5;
        assert_eq!(set.remove::<Health>(), Some(Health(5)));
        assert!(!set.contains::<Health>());
        assert_eq!(set.get::<Name>(), Some(&Name("ball")));
    }
}
