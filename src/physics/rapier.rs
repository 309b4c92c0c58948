//! Rapier2D backend for [`PhysicsBackend`]

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use glam::Vec2;
use rapier2d::prelude::*;

use super::{
    BodyDesc, BodyId, BodyKind, CollisionFilter, CollisionPair, ConstraintDesc, JointId,
    PhysicsBackend,
};
use crate::{Error, Result};

fn vec2_to_na(v: Vec2) -> Vector<Real> {
    vector![v.x, v.y]
}

fn vec2_to_point(v: Vec2) -> Point<Real> {
    point![v.x, v.y]
}

fn interaction_groups(filter: CollisionFilter) -> InteractionGroups {
    InteractionGroups::new(
        Group::from_bits_truncate(filter.category),
        Group::from_bits_truncate(filter.mask),
    )
}

/// Rigid body and its single collider
#[derive(Debug, Clone, Copy)]
struct BodyHandles {
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

/// Event collector that is safe on wasm (no channels)
struct EventCollector {
    collisions: Mutex<Vec<CollisionEvent>>,
}

impl EventCollector {
    fn new() -> Self {
        Self {
            collisions: Mutex::new(Vec::new()),
        }
    }

    fn drain(&self) -> Vec<CollisionEvent> {
        let mut collisions = self.collisions.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *collisions)
    }
}

impl EventHandler for EventCollector {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.collisions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// All the Rapier2D state for one play field.
pub struct RapierWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    event_collector: EventCollector,
    handles: HashMap<BodyId, BodyHandles>,
    next_body: u32,
    next_joint: u32,
}

impl RapierWorld {
    /// Create an empty world. Y points down, so positive gravity pulls
    /// bodies toward the floor.
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity: vec2_to_na(gravity),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            event_collector: EventCollector::new(),
            handles: HashMap::new(),
            next_body: 1,
            next_joint: 1,
        }
    }

    /// Current collision filter of a body
    pub fn collision_filter(&self, body: BodyId) -> Option<CollisionFilter> {
        let handles = self.handles.get(&body)?;
        let groups = self.colliders.get(handles.collider)?.collision_groups();
        Some(CollisionFilter::new(groups.memberships.bits(), groups.filter.bits()))
    }

    /// Current linear velocity of a body
    pub fn velocity(&self, body: BodyId) -> Option<Vec2> {
        let handles = self.handles.get(&body)?;
        let rb = self.bodies.get(handles.body)?;
        Some(Vec2::new(rb.linvel().x, rb.linvel().y))
    }

    /// Number of constraints in the world
    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }

    fn collider_to_body(&self, collider: ColliderHandle) -> Option<BodyId> {
        let parent = self.colliders.get(collider)?.parent()?;
        let rb = self.bodies.get(parent)?;
        let id = BodyId(rb.user_data as u32);
        self.handles.contains_key(&id).then_some(id)
    }
}

impl PhysicsBackend for RapierWorld {
    fn create_body(&mut self, desc: &BodyDesc) -> BodyId {
        let id = BodyId(self.next_body);
        self.next_body += 1;

        let body_type = match desc.kind {
            BodyKind::Dynamic => RigidBodyType::Dynamic,
            BodyKind::Fixed => RigidBodyType::Fixed,
        };
        let rb = RigidBodyBuilder::new(body_type)
            .translation(vec2_to_na(desc.position))
            .locked_axes(if desc.fixed_rotation {
                LockedAxes::ROTATION_LOCKED
            } else {
                LockedAxes::empty()
            })
            .user_data(id.0 as u128)
            .build();
        let body = self.bodies.insert(rb);

        let collider = ColliderBuilder::cuboid(desc.half_extents.x, desc.half_extents.y)
            .collision_groups(interaction_groups(desc.filter))
            .sensor(desc.sensor)
            .density(desc.density)
            .friction(desc.friction)
            .restitution(0.0)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();
        let collider = self
            .colliders
            .insert_with_parent(collider, body, &mut self.bodies);

        self.handles.insert(id, BodyHandles { body, collider });
        id
    }

    fn remove_body(&mut self, body: BodyId) -> bool {
        let Some(handles) = self.handles.remove(&body) else {
            return false;
        };
        self.bodies
            .remove(
                handles.body,
                &mut self.island_manager,
                &mut self.colliders,
                &mut self.impulse_joints,
                &mut self.multibody_joints,
                true,
            )
            .is_some()
    }

    fn create_constraint(&mut self, desc: &ConstraintDesc) -> Result<JointId> {
        let handles = *self
            .handles
            .get(&desc.body)
            .ok_or(Error::UnknownBody(desc.body))?;

        // The anchor is a collider-less fixed body, invisible to collisions
        let anchor = self.bodies.insert(
            RigidBodyBuilder::fixed()
                .translation(vec2_to_na(desc.anchor))
                .user_data(0)
                .build(),
        );
        let joint = SpringJointBuilder::new(desc.rest_length, desc.stiffness, desc.damping)
            .local_anchor1(point![0.0, 0.0])
            .local_anchor2(point![0.0, 0.0])
            .build();
        self.impulse_joints.insert(anchor, handles.body, joint, true);

        let id = JointId(self.next_joint);
        self.next_joint += 1;
        Ok(id)
    }

    fn set_collision_category(&mut self, body: BodyId, category: u32) {
        let Some(handles) = self.handles.get(&body) else {
            return;
        };
        if let Some(collider) = self.colliders.get_mut(handles.collider) {
            let groups = collider.collision_groups();
            collider.set_collision_groups(InteractionGroups::new(
                Group::from_bits_truncate(category),
                groups.filter,
            ));
        }
    }

    fn apply_force(&mut self, body: BodyId, force: Vec2, point: Vec2) {
        let dt = self.integration_parameters.dt;
        let Some(handles) = self.handles.get(&body) else {
            return;
        };
        if let Some(rb) = self.bodies.get_mut(handles.body) {
            rb.apply_impulse_at_point(vec2_to_na(force * dt), vec2_to_point(point), true);
        }
    }

    fn transform(&self, body: BodyId) -> Option<(Vec2, f32)> {
        let handles = self.handles.get(&body)?;
        let rb = self.bodies.get(handles.body)?;
        let pos = rb.translation();
        Some((Vec2::new(pos.x, pos.y), rb.rotation().angle()))
    }

    fn step(&mut self, dt: f32, started: &mut Vec<CollisionPair>) {
        self.integration_parameters.dt = dt;
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &self.event_collector,
        );

        for event in self.event_collector.drain() {
            let CollisionEvent::Started(h1, h2, _) = event else {
                continue;
            };
            if let (Some(a), Some(b)) = (self.collider_to_body(h1), self.collider_to_body(h2)) {
                started.push(CollisionPair::new(a, b));
            }
        }
    }

    fn body_count(&self) -> usize {
        self.handles.len()
    }
}
