//! Component trait and bundles

use super::storage::ComponentSet;

/// Marker trait for components
///
/// Any plain data type can become a component by implementing this trait.
/// An entity holds at most one value of each component type.
pub trait Component: 'static + Send + Sync {}

// Engine components
impl Component for crate::ecs::components::Transform {}
impl Component for crate::ecs::components::Velocity {}
impl Component for crate::ecs::components::BoxCollider {}
impl Component for crate::ecs::components::Sprite {}
impl Component for crate::ecs::components::ImageSprite {}
impl Component for crate::ecs::components::Text {}

/// A group of components attached together by [`crate::ecs::World::spawn`]
///
/// Implemented for tuples of up to eight components. Use a one-element
/// tuple `(component,)` to spawn with a single component.
pub trait ComponentBundle {
    /// Move every component into the set, replacing same-typed values
    fn insert_into(self, set: &mut ComponentSet);
}

impl ComponentBundle for () {
    fn insert_into(self, _set: &mut ComponentSet) {}
}

macro_rules! impl_component_bundle {
    ($($name:ident),+) => {
        impl<$($name: Component),+> ComponentBundle for ($($name,)+) {
            #[allow(non_snake_case)]
            fn insert_into(self, set: &mut ComponentSet) {
                let ($($name,)+) = self;
                $(set.insert($name);)+
            }
        }
    };
}

impl_component_bundle!(A);
impl_component_bundle!(A, B);
impl_component_bundle!(A, B, C);
impl_component_bundle!(A, B, C, D);
impl_component_bundle!(A, B, C, D, E);
impl_component_bundle!(A, B, C, D, E, F);
impl_component_bundle!(A, B, C, D, E, F, G);
impl_component_bundle!(A, B, C, D, E, F, G, H);
