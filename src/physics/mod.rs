//! Physics engine adapter
//!
//! The game never talks to the physics engine directly. Everything it needs
//! (rectangle bodies, one soft constraint, forces, positions and
//! collision-start reports) goes through [`PhysicsBackend`], which keeps the
//! controller testable without a real simulation.

pub mod rapier;

pub use rapier::RapierWorld;

use glam::Vec2;

use crate::Result;

/// Stable identifier for a body owned by a physics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BodyId(pub u32);

/// Identifier for a constraint owned by a physics backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId(pub u32);

/// Collision categories (bitmasks)
pub mod category {
    /// Pendulum, walls and falling boxes
    pub const BOX: u32 = 0x0001;
    /// Settled boxes and the finish line
    pub const SCENE: u32 = 0x0002;
    /// The floor. Overlaps both bits above.
    pub const GROUND: u32 = 0x0003;
    /// Default mask: interact with everything
    pub const ALL: u32 = u32::MAX;
}

/// Category/mask pair. Two bodies interact iff each one's category
/// intersects the other's mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionFilter {
    pub category: u32,
    pub mask: u32,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self {
            category: category::BOX,
            mask: category::ALL,
        }
    }
}

impl CollisionFilter {
    pub fn new(category: u32, mask: u32) -> Self {
        Self { category, mask }
    }

    pub fn interacts_with(&self, other: &CollisionFilter) -> bool {
        self.category & other.mask != 0 && other.category & self.mask != 0
    }
}

/// Whether the engine moves a body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Dynamic,
    Fixed,
}

/// Builder for describing a rectangular body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub kind: BodyKind,
    /// Centre position (pixels, Y down)
    pub position: Vec2,
    pub half_extents: Vec2,
    pub filter: CollisionFilter,
    /// Infinite inertia: the body never rotates
    pub fixed_rotation: bool,
    /// Reports contacts without pushing back
    pub sensor: bool,
    pub density: f32,
    pub friction: f32,
}

impl BodyDesc {
    /// A dynamic rectangle of the given full size
    pub fn dynamic(size: Vec2) -> Self {
        Self {
            kind: BodyKind::Dynamic,
            position: Vec2::ZERO,
            half_extents: size / 2.0,
            filter: CollisionFilter::default(),
            fixed_rotation: false,
            sensor: false,
            density: 0.001,
            friction: 0.1,
        }
    }

    /// A static rectangle of the given full size
    pub fn fixed(size: Vec2) -> Self {
        Self {
            kind: BodyKind::Fixed,
            fixed_rotation: true,
            ..Self::dynamic(size)
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_filter(mut self, filter: CollisionFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_fixed_rotation(mut self, fixed: bool) -> Self {
        self.fixed_rotation = fixed;
        self
    }

    pub fn with_sensor(mut self, sensor: bool) -> Self {
        self.sensor = sensor;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }
}

/// A soft two-point constraint from a fixed world anchor to a body's centre.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintDesc {
    pub anchor: Vec2,
    pub body: BodyId,
    pub rest_length: f32,
    pub stiffness: f32,
    pub damping: f32,
}

/// Two bodies that started touching during a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionPair {
    pub body_a: BodyId,
    pub body_b: BodyId,
}

impl CollisionPair {
    pub fn new(body_a: BodyId, body_b: BodyId) -> Self {
        Self { body_a, body_b }
    }
}

/// Operations the game consumes from a physics engine.
pub trait PhysicsBackend {
    /// Create a body and add it to the world.
    fn create_body(&mut self, desc: &BodyDesc) -> BodyId;

    /// Remove a body from the world. Returns false if it was already gone.
    fn remove_body(&mut self, body: BodyId) -> bool;

    /// Attach a constraint between a fixed anchor and an existing body.
    fn create_constraint(&mut self, desc: &ConstraintDesc) -> Result<JointId>;

    /// Replace a body's collision category, keeping its mask.
    fn set_collision_category(&mut self, body: BodyId, category: u32);

    /// Apply a force at a world point for the next simulation step.
    fn apply_force(&mut self, body: BodyId, force: Vec2, point: Vec2);

    /// Current centre position and rotation.
    fn transform(&self, body: BodyId) -> Option<(Vec2, f32)>;

    /// Current centre position.
    fn position(&self, body: BodyId) -> Option<Vec2> {
        self.transform(body).map(|(pos, _)| pos)
    }

    /// Advance the simulation by `dt` seconds, appending collision-start
    /// pairs in the order the engine reports them.
    fn step(&mut self, dt: f32, started: &mut Vec<CollisionPair>);

    /// Number of bodies in the world.
    fn body_count(&self) -> usize;
}
