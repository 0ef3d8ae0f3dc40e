//! Query type sets
//!
//! A query names a set of component types as a tuple, e.g.
//! `world.query::<(Transform, Velocity)>()`. The tuple is only used for its
//! [`TypeId`]s; matching entities are returned as ids so callers can mutate
//! components while walking the result.

use std::any::TypeId;

use super::Component;

/// A tuple of component types usable as a query filter
pub trait Query {
    /// The component type ids named by this query
    fn type_ids() -> Vec<TypeId>;
}

macro_rules! impl_query {
    ($($name:ident),+) => {
        impl<$($name: Component),+> Query for ($($name,)+) {
            fn type_ids() -> Vec<TypeId> {
                vec![$(TypeId::of::<$name>()),+]
            }
        }
    };
}

impl_query!(A);
impl_query!(A, B);
impl_query!(A, B, C);
impl_query!(A, B, C, D);
impl_query!(A, B, C, D, E);
impl_query!(A, B, C, D, E, F);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::{Transform, Velocity};

    #[test]
    fn test_tuple_type_ids_in_order() {
        let ids = <(Transform, Velocity)>::type_ids();
        assert_eq!(ids, vec![TypeId::of::<Transform>(), TypeId::of::<Velocity>()]);
    }
}
