//! ECS World implementation
//!
//! # Traversal order
//!
//! Entities are kept in creation order. [`World::entities`] and
//! [`World::entity_at`] expose that order, and it is the order in which the
//! renderer discovers cameras, draw commands and lights.
//!
//! # Hierarchy
//!
//! Each entity has a local [`TransformComponent`] and an optional parent. The
//! local-to-world matrix is the product of the local matrices along the parent
//! chain, root first.

use std::any::Any;
use std::collections::HashMap;

use super::components::TransformComponent;
use super::{Component, Entity};
use crate::foundation::math::Mat4;

struct EntityRecord {
    entity: Entity,
    parent: Option<Entity>,
    local_transform: TransformComponent,
    components: Vec<Box<dyn Any + Send + Sync>>,
}

/// ECS World containing all entities and components
pub struct World {
    next_entity_id: u32,
    records: Vec<EntityRecord>,
    index: HashMap<Entity, usize>,
}

impl World {
    /// Create a new world
    pub fn new() -> Self {
        Self {
            next_entity_id: 0,
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Create a new root entity with an identity transform
    pub fn create_entity(&mut self) -> Entity {
        let entity = Entity::new(self.next_entity_id);
        self.next_entity_id += 1;
        self.index.insert(entity, self.records.len());
        self.records.push(EntityRecord {
            entity,
            parent: None,
            local_transform: TransformComponent::identity(),
            components: Vec::new(),
        });
        log::trace!("Created entity {}", entity.id());
        entity
    }

    /// Create a new entity parented to `parent`
    ///
    /// If `parent` is not alive the child is created as a root.
    pub fn create_child(&mut self, parent: Entity) -> Entity {
        let child = self.create_entity();
        self.set_parent(child, Some(parent));
        child
    }

    /// Re-parent `child`, or detach it with `None`
    ///
    /// Returns `false` and leaves the hierarchy untouched if either entity is
    /// missing or the change would create a cycle.
    pub fn set_parent(&mut self, child: Entity, parent: Option<Entity>) -> bool {
        if !self.contains(child) {
            return false;
        }
        if let Some(parent) = parent {
            if !self.contains(parent) {
                return false;
            }
            let mut ancestor = Some(parent);
            while let Some(current) = ancestor {
                if current == child {
                    log::warn!("Refusing to parent entity {} under its own descendant", child.id());
                    return false;
                }
                ancestor = self.parent(current);
            }
        }
        if let Some(record) = self.record_mut(child) {
            record.parent = parent;
        }
        true
    }

    /// Parent of `entity`, if any
    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.record(entity).and_then(|record| record.parent)
    }

    /// Whether `entity` is alive in this world
    pub fn contains(&self, entity: Entity) -> bool {
        self.index.contains_key(&entity)
    }

    /// Replace the local transform of `entity`
    pub fn set_local_transform(&mut self, entity: Entity, transform: TransformComponent) {
        if let Some(record) = self.record_mut(entity) {
            record.local_transform = transform;
        }
    }

    /// Local transform of `entity`
    pub fn local_transform(&self, entity: Entity) -> Option<&TransformComponent> {
        self.record(entity).map(|record| &record.local_transform)
    }

    /// Mutable local transform of `entity`
    pub fn local_transform_mut(&mut self, entity: Entity) -> Option<&mut TransformComponent> {
        self.record_mut(entity).map(|record| &mut record.local_transform)
    }

    /// Local-to-world matrix of `entity`, composed along its parent chain
    pub fn local_to_world(&self, entity: Entity) -> Option<Mat4> {
        let record = self.record(entity)?;
        let mut matrix = record.local_transform.to_matrix();
        let mut parent = record.parent;
        while let Some(current) = parent {
            let parent_record = self.record(current)?;
            matrix = parent_record.local_transform.to_matrix() * matrix;
            parent = parent_record.parent;
        }
        Some(matrix)
    }

    /// Add a component to an entity
    ///
    /// An entity may hold several components of the same type; they keep
    /// insertion order.
    pub fn add_component<T: Component>(&mut self, entity: Entity, component: T) {
        match self.record_mut(entity) {
            Some(record) => record.components.push(Box::new(component)),
            None => log::warn!("Ignoring component for missing entity {}", entity.id()),
        }
    }

    /// Get the first component of type `T` on an entity
    pub fn get_component<T: Component>(&self, entity: Entity) -> Option<&T> {
        self.get_components::<T>(entity).next()
    }

    /// Get the first component of type `T` on an entity, mutably
    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Option<&mut T> {
        self.get_components_mut::<T>(entity).next()
    }

    /// Get every component of type `T` on an entity
    pub fn get_components<T: Component>(&self, entity: Entity) -> impl Iterator<Item = &T> {
        self.record(entity)
            .into_iter()
            .flat_map(|record| record.components.iter())
            .filter_map(|component| component.downcast_ref::<T>())
    }

    /// Get every component of type `T` on an entity, mutably
    pub fn get_components_mut<T: Component>(&mut self, entity: Entity) -> impl Iterator<Item = &mut T> {
        self.record_mut(entity)
            .into_iter()
            .flat_map(|record| record.components.iter_mut())
            .filter_map(|component| component.downcast_mut::<T>())
    }

    /// Remove an entity and its components
    ///
    /// Children of the removed entity become roots.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        let Some(position) = self.index.remove(&entity) else {
            return false;
        };
        self.records.remove(position);
        for (i, record) in self.records.iter_mut().enumerate() {
            if record.parent == Some(entity) {
                record.parent = None;
            }
            self.index.insert(record.entity, i);
        }
        true
    }

    /// Get an iterator over all entities in traversal order
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.records.iter().map(|record| record.entity)
    }

    /// Entity at `index` in traversal order
    pub fn entity_at(&self, index: usize) -> Option<Entity> {
        self.records.get(index).map(|record| record.entity)
    }

    /// Number of live entities
    pub fn entity_count(&self) -> usize {
        self.records.len()
    }

    fn record(&self, entity: Entity) -> Option<&EntityRecord> {
        self.index.get(&entity).map(|&i| &self.records[i])
    }

    fn record_mut(&mut self, entity: Entity) -> Option<&mut EntityRecord> {
        self.index.get(&entity).map(|&i| &mut self.records[i])
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
