//! World: entities + type-erased component stores
//!
//! Entities are slotmap keys; each component type lives in its own
//! `SecondaryMap`, keyed by `TypeId`.

use std::any::{Any, TypeId};
use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use crate::error::{Error, Result};

new_key_type! {
    /// Stable entity identifier
    pub struct Entity;
}

/// Marker for types storable in the `World`
pub trait Component: 'static {}

trait ComponentStore: Any {
    fn remove_entity(&mut self, entity: Entity);
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Component> ComponentStore for SecondaryMap<Entity, T> {
    fn remove_entity(&mut self, entity: Entity) {
        self.remove(entity);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Default)]
pub struct World {
    entities: SlotMap<Entity, ()>,
    stores: FxHashMap<TypeId, Box<dyn ComponentStore>>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self) -> Entity {
        self.entities.insert(())
    }

    /// Remove an entity and all of its components. Returns false for a stale entity.
    pub fn despawn(&mut self, entity: Entity) -> bool {
        if self.entities.remove(entity).is_none() {
            return false;
        }
        for store in self.stores.values_mut() {
            store.remove_entity(entity);
        }
        true
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains_key(entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.keys()
    }

    // ===== COMPONENTS =====

    /// Attach (or replace) a component. Fails for a stale entity.
    pub fn insert<T: Component>(&mut self, entity: Entity, component: T) -> Result<()> {
        if !self.is_alive(entity) {
            return Err(Error::InvalidResource(format!(
                "cannot insert {} into despawned entity {:?}",
                std::any::type_name::<T>(), entity
            )));
        }
        self.store_mut_or_insert::<T>().insert(entity, component);
        Ok(())
    }

    pub fn remove<T: Component>(&mut self, entity: Entity) -> Option<T> {
        self.store_mut::<T>()?.remove(entity)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.store::<T>()?.get(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.store_mut::<T>()?.get_mut(entity)
    }

    pub fn has<T: Component>(&self, entity: Entity) -> bool {
        self.get::<T>(entity).is_some()
    }

    /// Every `(entity, component)` pair of type `T`
    pub fn query<T: Component>(&self) -> impl Iterator<Item = (Entity, &T)> + '_ {
        self.store::<T>().into_iter().flat_map(|store| store.iter())
    }

    pub fn query_mut<T: Component>(&mut self) -> impl Iterator<Item = (Entity, &mut T)> + '_ {
        self.store_mut::<T>().into_iter().flat_map(|store| store.iter_mut())
    }

    fn store<T: Component>(&self) -> Option<&SecondaryMap<Entity, T>> {
        self.stores
            .get(&TypeId::of::<T>())
            .and_then(|store| store.as_any().downcast_ref())
    }

    fn store_mut<T: Component>(&mut self) -> Option<&mut SecondaryMap<Entity, T>> {
        self.stores
            .get_mut(&TypeId::of::<T>())
            .and_then(|store| store.as_any_mut().downcast_mut())
    }

    fn store_mut_or_insert<T: Component>(&mut self) -> &mut SecondaryMap<Entity, T> {
        let store = self
            .stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(SecondaryMap::<Entity, T>::new()));
        match store.as_any_mut().downcast_mut() {
            Some(store) => store,
            None => unreachable!("component store registered under a foreign TypeId"),
        }
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod tests;
