//! Entities
//!
//! Game objects placed in the world, and the generational arena the world
//! keeps them in. Per-kind behaviour is a `match` on [`EntityKind`] rather
//! than a trait object hierarchy.

use glam::Vec3;

use crate::math::{Color, WORLD_UP, wrap_degrees};

/// Smallest allowed scale component
const MIN_SCALE: f32 = 0.01;
/// Smallest allowed mass
const MIN_MASS: f32 = 0.001;

/// Behaviour class of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Non-moving objects (trees, rocks)
    #[default]
    Static,
    /// Moving objects; velocity is integrated every update
    Dynamic,
    /// Objects the player can interact with
    Interactive,
    /// Visual-only objects
    Decorative,
}

/// Axis-aligned bounding box. Containment and intersection are inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with the given full size.
    pub fn from_center(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self { min: center - half, max: center + half }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

/// A game object with a transform and simple physics state.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    position: Vec3,
    /// Euler angles in degrees, each in [0, 360)
    rotation: Vec3,
    scale: Vec3,
    velocity: Vec3,
    mass: f32,
    /// Normal of the surface the entity stands on
    surface_normal: Vec3,
    kind: EntityKind,
    name: String,
    active: bool,
    visible: bool,
    bounds: BoundingBox,
    color: Color,
}

impl Default for Entity {
    fn default() -> Self {
        Self::with_transform(Vec3::ZERO, Vec3::ZERO, Vec3::ONE)
    }
}

impl Entity {
    /// Unit-scale static entity at `position`.
    pub fn new(position: Vec3) -> Self {
        Self::with_transform(position, Vec3::ZERO, Vec3::ONE)
    }

    pub fn with_transform(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        let mut entity = Self {
            position,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            velocity: Vec3::ZERO,
            mass: 1.0,
            surface_normal: WORLD_UP,
            kind: EntityKind::Static,
            name: "Entity".to_string(),
            active: true,
            visible: true,
            bounds: BoundingBox::default(),
            color: Color::WHITE,
        };
        entity.set_rotation(rotation);
        entity.set_scale(scale);
        entity
    }

    /// Set the kind and return self for chaining.
    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Set the name and return self for chaining.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the color and return self for chaining.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Advance the entity by `delta_time` seconds according to its kind.
    pub fn update(&mut self, delta_time: f32) {
        if !self.active {
            return;
        }
        match self.kind {
            EntityKind::Dynamic => {
                self.position += self.velocity * delta_time;
                self.update_bounds();
            }
            EntityKind::Static | EntityKind::Interactive | EntityKind::Decorative => {}
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_bounds();
    }

    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.update_bounds();
    }

    #[inline]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Set Euler angles in degrees; each axis is wrapped into [0, 360).
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = Vec3::new(
            wrap_degrees(rotation.x),
            wrap_degrees(rotation.y),
            wrap_degrees(rotation.z),
        );
    }

    pub fn rotate(&mut self, angles_deg: Vec3) {
        self.set_rotation(self.rotation + angles_deg);
    }

    #[inline]
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Set the scale; components are clamped to at least 0.01.
    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale.max(Vec3::splat(MIN_SCALE));
        self.update_bounds();
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn set_mass(&mut self, mass: f32) {
        self.mass = mass.max(MIN_MASS);
    }

    #[inline]
    pub fn surface_normal(&self) -> Vec3 {
        self.surface_normal
    }

    /// Set the standing-surface normal; degenerate input falls back to up.
    pub fn set_surface_normal(&mut self, normal: Vec3) {
        let n = normal.normalize_or_zero();
        self.surface_normal = if n.length() < 0.01 { WORLD_UP } else { n };
    }

    #[inline]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: EntityKind) {
        self.kind = kind;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    #[inline]
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounds
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn update_bounds(&mut self) {
        self.bounds = BoundingBox::from_center(self.position, self.scale);
    }
}

// ============================================================================
// ARENA
// ============================================================================

/// Stable handle to an entity owned by an [`EntityArena`].
///
/// Handles carry a generation, so a handle to a removed entity never
/// resolves to whatever later reuses its slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityHandle {
    index: u32,
    generation: u32,
}

impl EntityHandle {
    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entity: Option<Entity>,
}

/// Exclusive owner of a set of entities, addressed by [`EntityHandle`].
///
/// Iteration runs in insertion order. Freed slots are reused, but a reused
/// slot joins the back of the order like any new entity.
#[derive(Debug, Default)]
pub struct EntityArena {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<u32>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `entity` and return its handle.
    pub fn insert(&mut self, entity: Entity) -> EntityHandle {
        let handle = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.entity = Some(entity);
                EntityHandle { index, generation: slot.generation }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, entity: Some(entity) });
                EntityHandle { index, generation: 0 }
            }
        };
        self.order.push(handle.index);
        handle
    }

    /// Remove and return the entity behind `handle`; `None` if it is not present.
    pub fn remove(&mut self, handle: EntityHandle) -> Option<Entity> {
        let slot = self.slots.get_mut(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        let entity = slot.entity.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.order.retain(|&index| index != handle.index);
        Some(entity)
    }

    pub fn get(&self, handle: EntityHandle) -> Option<&Entity> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entity.as_ref())
    }

    pub fn get_mut(&mut self, handle: EntityHandle) -> Option<&mut Entity> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.entity.as_mut())
    }

    pub fn contains(&self, handle: EntityHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntityHandle, &Entity)> + '_ {
        self.order.iter().filter_map(|&index| {
            let slot = self.slots.get(index as usize)?;
            let entity = slot.entity.as_ref()?;
            Some((EntityHandle { index, generation: slot.generation }, entity))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityHandle, &mut Entity)> + '_ {
        let mut by_slot: Vec<Option<&mut Slot>> = self.slots.iter_mut().map(Some).collect();
        self.order.iter().filter_map(move |&index| {
            let slot = by_slot.get_mut(index as usize)?.take()?;
            let generation = slot.generation;
            let entity = slot.entity.as_mut()?;
            Some((EntityHandle { index, generation }, entity))
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop every entity; outstanding handles stop resolving.
    pub fn clear(&mut self) {
        for &index in &self.order {
            if let Some(slot) = self.slots.get_mut(index as usize) {
                slot.entity = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index);
            }
        }
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_defaults() {
        let e = Entity::default();
        assert_eq!(e.name(), "Entity");
        assert_eq!(e.kind(), EntityKind::Static);
        assert!(e.is_active() && e.is_visible());
        assert_eq!(e.mass(), 1.0);
        assert_eq!(e.surface_normal(), Vec3::Y);
        assert_eq!(e.bounding_box(), BoundingBox::new(Vec3::splat(-0.5), Vec3::splat(0.5)));
    }

    #[test]
    fn test_bounds_follow_transform() {
        let mut e = Entity::new(Vec3::new(1.0, 2.0, 3.0));
        e.set_scale(Vec3::new(2.0, 4.0, 0.0));
        let b = e.bounding_box();
        assert_eq!(b.min, Vec3::new(0.0, 0.0, 3.0 - MIN_SCALE * 0.5));
        assert_eq!(b.max.y, 4.0);
        e.translate(Vec3::X);
        assert_eq!(e.bounding_box().min.x, 1.0);
        assert!(e.bounding_box().contains(e.position()));
    }

    #[test]
    fn test_rotation_wraps() {
        let mut e = Entity::default();
        e.set_rotation(Vec3::new(-90.0, 450.0, 360.0));
        assert_eq!(e.rotation(), Vec3::new(270.0, 90.0, 0.0));
        e.rotate(Vec3::new(100.0, 0.0, -10.0));
        assert_eq!(e.rotation(), Vec3::new(10.0, 90.0, 350.0));
    }

    #[test]
    fn test_mass_and_normal_guards() {
        let mut e = Entity::default();
        e.set_mass(-3.0);
        assert_eq!(e.mass(), MIN_MASS);
        e.set_surface_normal(Vec3::ZERO);
        assert_eq!(e.surface_normal(), Vec3::Y);
        e.set_surface_normal(Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(e.surface_normal(), Vec3::Z);
    }

    #[test]
    fn test_update_dispatches_on_kind() {
        let mut moving = Entity::default().with_kind(EntityKind::Dynamic);
        moving.set_velocity(Vec3::new(2.0, 0.0, 0.0));
        moving.update(0.5);
        assert_eq!(moving.position(), Vec3::new(1.0, 0.0, 0.0));

        let mut rock = Entity::default();
        rock.set_velocity(Vec3::new(2.0, 0.0, 0.0));
        rock.update(0.5);
        assert_eq!(rock.position(), Vec3::ZERO);

        let mut sleeping = Entity::default().with_kind(EntityKind::Dynamic);
        sleeping.set_velocity(Vec3::X);
        sleeping.set_active(false);
        sleeping.update(1.0);
        assert_eq!(sleeping.position(), Vec3::ZERO);
    }

    #[test]
    fn test_bounding_box_intersection_inclusive() {
        let a = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
        let b = BoundingBox::new(Vec3::ONE, Vec3::splat(2.0));
        let c = BoundingBox::new(Vec3::splat(1.5), Vec3::splat(2.0));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_arena_insert_remove() {
        let mut arena = EntityArena::new();
        let a = arena.insert(Entity::default().with_name("a"));
        let b = arena.insert(Entity::default().with_name("b"));
        assert_eq!(arena.len(), 2);

        let removed = arena.remove(a).map(|e| e.name().to_string());
        assert_eq!(removed.as_deref(), Some("a"));
        assert!(arena.remove(a).is_none());
        assert!(!arena.contains(a));
        assert!(arena.contains(b));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_arena_stale_handle_after_slot_reuse() {
        let mut arena = EntityArena::new();
        let a = arena.insert(Entity::default().with_name("a"));
        arena.remove(a);
        let c = arena.insert(Entity::default().with_name("c"));
        assert_eq!(a.index(), c.index());
        assert!(arena.get(a).is_none());
        assert_eq!(arena.get(c).map(Entity::name), Some("c"));
    }

    #[test]
    fn test_arena_iterates_in_insertion_order_across_reuse() {
        let mut arena = EntityArena::new();
        let a = arena.insert(Entity::default().with_name("a"));
        arena.insert(Entity::default().with_name("b"));
        arena.remove(a);
        let c = arena.insert(Entity::default().with_name("c"));
        assert_eq!(c.index(), a.index());

        let names: Vec<&str> = arena.iter().map(|(_, e)| e.name()).collect();
        assert_eq!(names, vec!["b", "c"]);
        let handles: Vec<EntityHandle> = arena.iter_mut().map(|(h, _)| h).collect();
        assert_eq!(handles.last(), Some(&c));
    }

    #[test]
    fn test_arena_clear() {
        let mut arena = EntityArena::new();
        let a = arena.insert(Entity::default());
        arena.insert(Entity::default());
        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.iter().count(), 0);
        assert!(arena.get(a).is_none());
    }
}
