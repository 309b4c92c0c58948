//! Static play field: floor, walls, finish line and the pendulum

use std::collections::BTreeMap;

use glam::Vec2;

use super::state::{BodyRecord, BodyTag};
use crate::Result;
use crate::Tuning;
use crate::physics::{
    BodyDesc, BodyId, CollisionFilter, ConstraintDesc, JointId, PhysicsBackend, category,
};

/// Floor (wider than the field, top edge at y = 580)
pub const GROUND_CENTER: Vec2 = Vec2::new(400.0, 610.0);
pub const GROUND_SIZE: Vec2 = Vec2::new(810.0, 60.0);

/// Side borders, centred on the field edges
pub const LEFT_WALL_CENTER: Vec2 = Vec2::new(0.0, 300.0);
pub const RIGHT_WALL_CENTER: Vec2 = Vec2::new(340.0, 300.0);
pub const WALL_SIZE: Vec2 = Vec2::new(30.0, 600.0);

/// Height the stack must reach
pub const FINISH_LINE_CENTER: Vec2 = Vec2::new(170.0, 200.0);
pub const FINISH_LINE_SIZE: Vec2 = Vec2::new(309.0, 10.0);

/// Pendulum anchor (just above the top edge) and the box's rest spot
pub const PENDULUM_ANCHOR: Vec2 = Vec2::new(170.0, -2.0);
pub const PENDULUM_START: Vec2 = Vec2::new(170.0, 10.0);

/// The constraint the swing force is applied through
#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    pub id: JointId,
    pub anchor: Vec2,
    /// Body on the free end
    pub body: BodyId,
}

/// Bodies created once at startup and kept for the process lifetime
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    pub ground: BodyId,
    pub left_wall: BodyId,
    pub right_wall: BodyId,
    pub finish_line: BodyId,
    pub pendulum: BodyId,
    pub constraint: Constraint,
}

impl Scene {
    /// Create the static bodies and the pendulum, registering each one's tag
    pub fn build<P: PhysicsBackend>(
        physics: &mut P,
        tuning: &Tuning,
        bodies: &mut BTreeMap<BodyId, BodyRecord>,
    ) -> Result<Self> {
        let mut add = |desc: BodyDesc, tag: BodyTag| {
            let id = physics.create_body(&desc);
            bodies.insert(id, BodyRecord::new(tag, desc.half_extents * 2.0));
            id
        };

        let ground = add(
            BodyDesc::fixed(GROUND_SIZE)
                .with_position(GROUND_CENTER)
                .with_filter(CollisionFilter::new(category::GROUND, category::ALL)),
            BodyTag::Ground,
        );
        let left_wall = add(
            BodyDesc::fixed(WALL_SIZE).with_position(LEFT_WALL_CENTER),
            BodyTag::Wall,
        );
        let right_wall = add(
            BodyDesc::fixed(WALL_SIZE).with_position(RIGHT_WALL_CENTER),
            BodyTag::Wall,
        );
        let finish_line = add(
            BodyDesc::fixed(FINISH_LINE_SIZE)
                .with_position(FINISH_LINE_CENTER)
                .with_filter(CollisionFilter::new(category::SCENE, category::SCENE))
                .with_sensor(true),
            BodyTag::FinishLine,
        );
        let pendulum = add(
            BodyDesc::dynamic(Vec2::splat(tuning.box_size))
                .with_position(PENDULUM_START)
                .with_fixed_rotation(true)
                .with_density(tuning.box_density)
                .with_friction(tuning.box_friction),
            BodyTag::Pendulum,
        );

        let id = physics.create_constraint(&ConstraintDesc {
            anchor: PENDULUM_ANCHOR,
            body: pendulum,
            rest_length: PENDULUM_START.distance(PENDULUM_ANCHOR),
            stiffness: tuning.spring_stiffness,
            damping: tuning.spring_damping,
        })?;

        Ok(Self {
            ground,
            left_wall,
            right_wall,
            finish_line,
            pendulum,
            constraint: Constraint {
                id,
                anchor: PENDULUM_ANCHOR,
                body: pendulum,
            },
        })
    }
}

/// A freshly released box: falls onto anything in the ground category
pub fn dropped_box(tuning: &Tuning, position: Vec2) -> BodyDesc {
    BodyDesc::dynamic(Vec2::splat(tuning.box_size))
        .with_position(position)
        .with_filter(CollisionFilter::new(category::BOX, category::GROUND))
        .with_density(tuning.box_density)
        .with_friction(tuning.box_friction)
}
