//! World state storage.
//!
//! The [`World`] owns entity identity, every entity's components and the
//! system schedule. It is the single source of truth for a simulation.
//!
//! ## Concurrency
//!
//! All methods take `&self` and the world is `Send + Sync`:
//!
//! - The entity table sits behind one [`RwLock`]. Creating entities and
//!   attaching components take it exclusively; lookups and queries share it.
//!   A query therefore always sees the table as it was between two writes.
//! - Each component lives in its own [`Shared`] cell. Systems clone the cell
//!   handles they need, release the table and lock the cells individually, so
//!   workers that were given disjoint entities never contend.
//! - No table lock is held while a system runs.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tracing::{debug, info};

use flight_component::{
    Aerodynamics, AnyComponent, Component, ComponentKind, ComponentSet, Entity, EntityAllocator,
    Motor, Physics,
};

use crate::error::SimError;
use crate::scheduler::SystemSchedule;
use crate::system::System;

/// A component cell shared between the world and the systems using it.
pub type Shared<T> = Arc<Mutex<T>>;

/// A handle to one component of an entity, tagged with its kind.
#[derive(Debug, Clone)]
pub enum ComponentRef {
    Physics(Shared<Physics>),
    Motor(Shared<Motor>),
    Aerodynamics(Shared<Aerodynamics>),
}

impl ComponentRef {
    /// The kind of the referenced component.
    #[must_use]
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentRef::Physics(_) => ComponentKind::Physics,
            ComponentRef::Motor(_) => ComponentKind::Motor,
            ComponentRef::Aerodynamics(_) => ComponentKind::Aerodynamics,
        }
    }
}

/// Component types the world can hand out typed handles for.
pub trait StoredComponent: Component + Sized {
    /// The kind this type is stored under.
    const KIND: ComponentKind;

    /// Unwraps a [`ComponentRef`] of this type.
    fn from_ref(component: ComponentRef) -> Option<Shared<Self>>;
}

impl StoredComponent for Physics {
    const KIND: ComponentKind = ComponentKind::Physics;

    fn from_ref(component: ComponentRef) -> Option<Shared<Self>> {
        match component {
            ComponentRef::Physics(c) => Some(c),
            _ => None,
        }
    }
}

impl StoredComponent for Motor {
    const KIND: ComponentKind = ComponentKind::Motor;

    fn from_ref(component: ComponentRef) -> Option<Shared<Self>> {
        match component {
            ComponentRef::Motor(c) => Some(c),
            _ => None,
        }
    }
}

impl StoredComponent for Aerodynamics {
    const KIND: ComponentKind = ComponentKind::Aerodynamics;

    fn from_ref(component: ComponentRef) -> Option<Shared<Self>> {
        match component {
            ComponentRef::Aerodynamics(c) => Some(c),
            _ => None,
        }
    }
}

/// The components attached to a single entity, at most one per kind.
#[derive(Debug, Default)]
struct EntityComponents {
    physics: Option<Shared<Physics>>,
    motor: Option<Shared<Motor>>,
    aerodynamics: Option<Shared<Aerodynamics>>,
}

impl EntityComponents {
    fn kinds(&self) -> ComponentSet {
        let mut set = ComponentSet::EMPTY;
        if self.physics.is_some() {
            set.insert(ComponentKind::Physics);
        }
        if self.motor.is_some() {
            set.insert(ComponentKind::Motor);
        }
        if self.aerodynamics.is_some() {
            set.insert(ComponentKind::Aerodynamics);
        }
        set
    }

    /// Stores `component`, replacing any existing component of its kind.
    fn insert(&mut self, component: AnyComponent) {
        match component {
            AnyComponent::Physics(c) => self.physics = Some(Arc::new(Mutex::new(c))),
            AnyComponent::Motor(c) => self.motor = Some(Arc::new(Mutex::new(c))),
            AnyComponent::Aerodynamics(c) => self.aerodynamics = Some(Arc::new(Mutex::new(c))),
        }
    }

    fn get(&self, kind: ComponentKind) -> Option<ComponentRef> {
        match kind {
            ComponentKind::Physics => self.physics.clone().map(ComponentRef::Physics),
            ComponentKind::Motor => self.motor.clone().map(ComponentRef::Motor),
            ComponentKind::Aerodynamics => {
                self.aerodynamics.clone().map(ComponentRef::Aerodynamics)
            }
        }
    }
}

/// The entity/component store and system schedule.
pub struct World {
    /// Entity ID allocator.
    allocator: EntityAllocator,
    /// Components of every entity, in ID order.
    entities: RwLock<BTreeMap<Entity, EntityComponents>>,
    /// Registered systems in execution order.
    schedule: RwLock<SystemSchedule>,
}

impl World {
    /// Create a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self {
            allocator: EntityAllocator::new(),
            entities: RwLock::new(BTreeMap::new()),
            schedule: RwLock::new(SystemSchedule::new()),
        }
    }

    /// Allocate a new entity without any components.
    pub fn create_entity(&self) -> Entity {
        let mut entities = self.entities.write();
        let entity = self.allocator.allocate();
        entities.insert(entity, EntityComponents::default());
        drop(entities);
        debug!(%entity, "created entity");
        entity
    }

    /// Attach a component to an entity, replacing any existing component of
    /// the same kind.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownEntity`] if the entity does not exist. The
    /// world is not modified in that case.
    pub fn add_component(
        &self,
        entity: Entity,
        component: impl Into<AnyComponent>,
    ) -> Result<(), SimError> {
        let component = component.into();
        let kind = component.kind();
        self.entities
            .write()
            .get_mut(&entity)
            .ok_or(SimError::UnknownEntity(entity))?
            .insert(component);
        debug!(%entity, %kind, "attached component");
        Ok(())
    }

    /// Returns the component of the given kind, or `None` if the entity does
    /// not have one (or does not exist).
    #[must_use]
    pub fn get_component(&self, entity: Entity, kind: ComponentKind) -> Option<ComponentRef> {
        self.entities.read().get(&entity)?.get(kind)
    }

    /// Typed variant of [`World::get_component`].
    #[must_use]
    pub fn get<T: StoredComponent>(&self, entity: Entity) -> Option<Shared<T>> {
        self.get_component(entity, T::KIND).and_then(T::from_ref)
    }

    /// Returns every entity holding all of the given component kinds, in
    /// ascending ID order.
    ///
    /// An empty `kinds` slice matches every entity.
    #[must_use]
    pub fn query(&self, kinds: &[ComponentKind]) -> Vec<Entity> {
        let required = ComponentSet::of(kinds);
        self.entities
            .read()
            .iter()
            .filter(|(_, record)| record.kinds().contains_all(required))
            .map(|(entity, _)| *entity)
            .collect()
    }

    /// Returns the set of component kinds attached to an entity.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownEntity`] if the entity does not exist.
    pub fn component_kinds(&self, entity: Entity) -> Result<ComponentSet, SimError> {
        self.entities
            .read()
            .get(&entity)
            .map(EntityComponents::kinds)
            .ok_or(SimError::UnknownEntity(entity))
    }

    /// Returns `true` if the entity exists in this world.
    #[must_use]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.read().contains_key(&entity)
    }

    /// Returns the total number of entities in the world.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.read().len()
    }

    /// Register a system. Systems run in ascending priority; systems with
    /// equal priority run in registration order.
    ///
    /// A system registered while a tick is running takes part from the next
    /// tick on.
    pub fn add_system(&self, system: impl System + 'static) {
        let name = system.name().to_string();
        let priority = system.priority();
        let mut schedule = self.schedule.write();
        schedule.insert(Arc::new(system));
        info!(
            system = name,
            priority,
            system_count = schedule.len(),
            "registered system"
        );
    }

    /// Returns the number of registered systems.
    #[must_use]
    pub fn system_count(&self) -> usize {
        self.schedule.read().len()
    }

    /// Returns the registered system names in execution order.
    #[must_use]
    pub fn system_names(&self) -> Vec<String> {
        self.schedule.read().names()
    }

    /// Run every registered system once, in schedule order.
    ///
    /// Stops at the first failing system. Systems that already ran keep
    /// their effects; later systems are not invoked for this tick.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::SystemUpdateFailed`] naming the failing system.
    pub fn update(&self, dt: f64) -> Result<(), SimError> {
        // Snapshot so systems may register other systems without deadlocking.
        let systems = self.schedule.read().ordered();

        for system in systems {
            system
                .update(self, dt)
                .map_err(|source| SimError::SystemUpdateFailed {
                    system: system.name().to_string(),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("World")
            .field("entities", &self.entity_count())
            .field("systems", &self.system_names())
            .finish()
    }
}
