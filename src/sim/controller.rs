//! Game controller
//!
//! Owns the round state, wires the scene into the physics world and applies
//! the collision rules. Drive it with [`GameController::advance`] and the key
//! handlers; everything else happens from inside those calls.

use std::collections::BTreeMap;
use std::time::Duration;

use glam::Vec2;

use super::scene::{self, Scene};
use super::state::{BodyRecord, BodyTag, BoxState, GamePhase, RenderBody, RoundOutcome};
use super::timer::Interval;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::physics::{BodyId, CollisionPair, PhysicsBackend, category};
use crate::ui::{Panel, UiSink};
use crate::{Result, Tuning};

/// One game session: physics world, UI sink and all round state
pub struct GameController<P, U> {
    physics: P,
    ui: U,
    tuning: Tuning,
    scene: Scene,
    /// Tag side table for every body the game created
    bodies: BTreeMap<BodyId, BodyRecord>,
    /// Boxes released this round, in drop order
    dropped_boxes: Vec<BodyId>,
    score: i32,
    phase: GamePhase,
    box_state: BoxState,
    /// Key held since the last action (auto-repeat suppression)
    held_key: Option<String>,
    swing_left: bool,
    pendulum_timer: Interval,
    scoreboard_timer: Interval,
    /// Unsimulated time carried to the next `advance`
    physics_clock: Duration,
    collisions: Vec<CollisionPair>,
    last_outcome: Option<RoundOutcome>,
}

impl<P: PhysicsBackend, U: UiSink> GameController<P, U> {
    /// Build the scene and start both timers
    pub fn new(mut physics: P, mut ui: U, tuning: Tuning) -> Result<Self> {
        tuning.validate()?;

        let mut bodies = BTreeMap::new();
        let scene = Scene::build(&mut physics, &tuning, &mut bodies)?;

        ui.set_panel_visible(Panel::MainMenu, true);
        ui.set_panel_visible(Panel::EndGame, false);
        ui.set_panel_visible(Panel::Win, false);
        ui.set_panel_visible(Panel::Lose, false);

        log::info!("Scene ready with {} bodies", physics.body_count());

        Ok(Self {
            physics,
            ui,
            score: tuning.start_score,
            pendulum_timer: Interval::new(tuning.pendulum_interval()),
            scoreboard_timer: Interval::new(tuning.scoreboard_interval()),
            tuning,
            scene,
            bodies,
            dropped_boxes: Vec::new(),
            phase: GamePhase::MainMenu,
            box_state: BoxState::Idle,
            held_key: None,
            swing_left: false,
            physics_clock: Duration::ZERO,
            collisions: Vec::new(),
            last_outcome: None,
        })
    }

    /// Advance the virtual clock: step physics at a fixed rate, dispatch
    /// collision starts, then fire whichever timers came due
    pub fn advance(&mut self, dt: Duration) {
        if !self.is_running() {
            return;
        }

        let step = Duration::from_secs_f32(SIM_DT);
        self.physics_clock += dt;

        let mut substeps = 0;
        while self.physics_clock >= step && substeps < MAX_SUBSTEPS {
            self.physics_clock -= step;
            substeps += 1;

            let mut collisions = std::mem::take(&mut self.collisions);
            collisions.clear();
            self.physics.step(SIM_DT, &mut collisions);
            if !collisions.is_empty() {
                self.on_collision(&collisions);
            }
            self.collisions = collisions;
        }
        if self.physics_clock >= step {
            log::debug!("Dropping {:?} of physics backlog", self.physics_clock);
            self.physics_clock = Duration::ZERO;
        }

        for _ in 0..self.pendulum_timer.advance(dt) {
            self.apply_pendulum_force();
        }
        for _ in 0..self.scoreboard_timer.advance(dt) {
            self.refresh_scoreboard();
        }
    }

    /// Stop both timers and physics stepping
    pub fn shutdown(&mut self) {
        self.pendulum_timer.stop();
        self.scoreboard_timer.stop();
        log::info!("Controller stopped");
    }

    pub fn is_running(&self) -> bool {
        self.pendulum_timer.is_running() && self.scoreboard_timer.is_running()
    }

    /// Push the pendulum sideways, alternating direction every call
    pub fn apply_pendulum_force(&mut self) {
        let magnitude = self.tuning.pendulum_force;
        let force = if self.swing_left { -magnitude } else { magnitude };
        let constraint = self.scene.constraint;
        self.physics
            .apply_force(constraint.body, Vec2::new(force, 0.0), constraint.anchor);
        self.swing_left = !self.swing_left;
    }

    /// Show the score; end the round once it runs out
    pub fn refresh_scoreboard(&mut self) {
        self.ui.set_score_text(&self.score.to_string());
        if self.score <= 0 && self.phase == GamePhase::Game {
            self.score = 0;
            self.end_round();
        }
    }

    /// Apply the landing and finish-line rules to one batch of collision
    /// starts, pair by pair in the order given
    pub fn on_collision(&mut self, pairs: &[CollisionPair]) {
        for pair in pairs {
            let (Some(tag_a), Some(tag_b)) = (self.tag(pair.body_a), self.tag(pair.body_b)) else {
                continue;
            };

            let landed = match (tag_a, tag_b) {
                (BodyTag::PendingBox, other) if other.is_grounded() => Some(pair.body_a),
                (other, BodyTag::PendingBox) if other.is_grounded() => Some(pair.body_b),
                _ => None,
            };
            if let Some(landed) = landed {
                self.land_box(landed, pair);
            }

            // Tags may have just changed
            let (Some(tag_a), Some(tag_b)) = (self.tag(pair.body_a), self.tag(pair.body_b)) else {
                continue;
            };
            let reached_finish = (tag_a.is_grounded() && tag_b == BodyTag::FinishLine)
                || (tag_b.is_grounded() && tag_a == BodyTag::FinishLine);
            if reached_finish && self.phase == GamePhase::Game {
                log::info!("Stack reached the finish line");
                self.end_round();
            }
        }
    }

    /// Handle a key press (`KeyboardEvent.code`)
    pub fn on_key_down(&mut self, code: &str) {
        if code != self.tuning.action_key || self.held_key.as_deref() == Some(code) {
            return;
        }

        match (self.phase, self.box_state) {
            (GamePhase::MainMenu, _) => self.start_round(),
            (GamePhase::Game, BoxState::Idle) => self.drop_box(),
            (GamePhase::Game, BoxState::Moving) => return,
        }
        self.held_key = Some(code.to_string());
    }

    /// Handle a key release: any release re-arms the action key
    pub fn on_key_up(&mut self, _code: &str) {
        self.held_key = None;
    }

    /// Show the result screen and return to the menu. Dropped boxes stay in
    /// the world until the next round starts.
    pub fn end_round(&mut self) {
        let outcome = RoundOutcome::from_score(self.score);
        self.ui.set_panel_visible(Panel::MainMenu, true);
        self.ui.set_panel_visible(Panel::EndGame, true);
        self.ui.set_panel_visible(Panel::Win, outcome == RoundOutcome::Win);
        self.ui.set_panel_visible(Panel::Lose, outcome == RoundOutcome::Lose);
        self.phase = GamePhase::MainMenu;
        self.last_outcome = Some(outcome);

        log::info!(
            "Round over: {:?} with {} points after {} boxes",
            outcome,
            self.score,
            self.dropped_boxes.len()
        );
    }

    fn start_round(&mut self) {
        self.score = self.tuning.start_score;
        self.clear_boxes();
        self.ui.set_panel_visible(Panel::MainMenu, false);
        self.phase = GamePhase::Game;
        self.box_state = BoxState::Idle;
        log::info!("Round started with {} points", self.score);
    }

    fn clear_boxes(&mut self) {
        for id in self.dropped_boxes.drain(..) {
            self.physics.remove_body(id);
            self.bodies.remove(&id);
        }
    }

    /// Release a box one box-height below the pendulum
    fn drop_box(&mut self) {
        let pendulum = self.scene.constraint.body;
        self.set_visible(pendulum, false);

        let Some(pos) = self.physics.position(pendulum) else {
            log::warn!("Pendulum {:?} is missing from the world", pendulum);
            self.set_visible(pendulum, true);
            return;
        };
        let size = self.tuning.box_size;
        let spawn = Vec2::new(pos.x, pos.y + size);
        let id = self
            .physics
            .create_body(&scene::dropped_box(&self.tuning, spawn));
        self.bodies
            .insert(id, BodyRecord::new(BodyTag::PendingBox, Vec2::splat(size)));
        self.dropped_boxes.push(id);

        self.set_visible(pendulum, true);
        self.box_state = BoxState::Moving;
        log::debug!("Dropped box {:?} at ({:.1}, {:.1})", id, spawn.x, spawn.y);
    }

    /// A falling box touched the floor or the stack: it joins the stack
    fn land_box(&mut self, landed: BodyId, pair: &CollisionPair) {
        if let Some(record) = self.bodies.get_mut(&landed) {
            record.tag = BodyTag::SettledBox;
        }
        self.physics.set_collision_category(pair.body_a, category::SCENE);
        self.physics.set_collision_category(pair.body_b, category::SCENE);
        self.score -= self.tuning.ground_penalty;
        self.box_state = BoxState::Idle;
        log::debug!("Box {:?} landed, score {}", landed, self.score);
    }

    fn set_visible(&mut self, body: BodyId, visible: bool) {
        if let Some(record) = self.bodies.get_mut(&body) {
            record.visible = visible;
        }
    }

    // -- Accessors --

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn box_state(&self) -> BoxState {
        self.box_state
    }

    pub fn dropped_boxes(&self) -> &[BodyId] {
        &self.dropped_boxes
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn tag(&self, body: BodyId) -> Option<BodyTag> {
        self.bodies.get(&body).map(|r| r.tag)
    }

    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn physics(&self) -> &P {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut P {
        &mut self.physics
    }

    /// Visible bodies with their current transforms, in creation order
    pub fn render_bodies(&self) -> Vec<RenderBody> {
        self.bodies
            .iter()
            .filter(|(_, record)| record.visible)
            .filter_map(|(&id, record)| {
                let (center, rotation) = self.physics.transform(id)?;
                Some(RenderBody {
                    tag: record.tag,
                    center,
                    half_extents: record.size / 2.0,
                    rotation,
                })
            })
            .collect()
    }

    /// Anchor and free end of the pendulum constraint
    pub fn pendulum_line(&self) -> Option<(Vec2, Vec2)> {
        let constraint = self.scene.constraint;
        Some((constraint.anchor, self.physics.position(constraint.body)?))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use proptest::prelude::*;

    use super::*;
    use crate::Error;
    use crate::physics::{BodyDesc, CollisionFilter, ConstraintDesc, JointId};
    use crate::sim::scene::PENDULUM_START;
    use crate::ui::HeadlessUi;

    /// Bodies stay where they were created; collisions are injected by hand
    #[derive(Default)]
    struct FakePhysics {
        bodies: HashMap<BodyId, (Vec2, CollisionFilter)>,
        next_id: u32,
        forces: Vec<(BodyId, Vec2, Vec2)>,
        queued: Vec<CollisionPair>,
        steps: usize,
    }

    impl PhysicsBackend for FakePhysics {
        fn create_body(&mut self, desc: &BodyDesc) -> BodyId {
            self.next_id += 1;
            let id = BodyId(self.next_id);
            self.bodies.insert(id, (desc.position, desc.filter));
            id
        }

        fn remove_body(&mut self, body: BodyId) -> bool {
            self.bodies.remove(&body).is_some()
        }

        fn create_constraint(&mut self, desc: &ConstraintDesc) -> Result<JointId> {
            if self.bodies.contains_key(&desc.body) {
                Ok(JointId(1))
            } else {
                Err(Error::UnknownBody(desc.body))
            }
        }

        fn set_collision_category(&mut self, body: BodyId, category: u32) {
            if let Some((_, filter)) = self.bodies.get_mut(&body) {
                filter.category = category;
            }
        }

        fn apply_force(&mut self, body: BodyId, force: Vec2, point: Vec2) {
            self.forces.push((body, force, point));
        }

        fn transform(&self, body: BodyId) -> Option<(Vec2, f32)> {
            self.bodies.get(&body).map(|(pos, _)| (*pos, 0.0))
        }

        fn step(&mut self, _dt: f32, started: &mut Vec<CollisionPair>) {
            self.steps += 1;
            started.append(&mut self.queued);
        }

        fn body_count(&self) -> usize {
            self.bodies.len()
        }
    }

    type TestGame = GameController<FakePhysics, HeadlessUi>;

    const SPACE: &str = "Space";
    const STATIC_BODIES: usize = 5;

    fn new_game() -> TestGame {
        GameController::new(FakePhysics::default(), HeadlessUi::new(), Tuning::default()).unwrap()
    }

    fn press(game: &mut TestGame) {
        game.on_key_down(SPACE);
        game.on_key_up(SPACE);
    }

    fn last_box(game: &TestGame) -> BodyId {
        *game.dropped_boxes().last().unwrap()
    }

    fn land_last_box(game: &mut TestGame) {
        let pair = CollisionPair::new(last_box(game), game.scene().ground);
        game.on_collision(&[pair]);
    }

    fn started_game() -> TestGame {
        let mut game = new_game();
        press(&mut game);
        assert_eq!(game.phase(), GamePhase::Game);
        game
    }

    #[test]
    fn test_startup_layout() {
        let game = new_game();
        assert_eq!(game.phase(), GamePhase::MainMenu);
        assert_eq!(game.box_state(), BoxState::Idle);
        assert_eq!(game.physics().body_count(), STATIC_BODIES);
        assert!(game.ui().is_visible(Panel::MainMenu));
        assert!(!game.ui().is_visible(Panel::EndGame));
        assert!(!game.ui().is_visible(Panel::Win));
        assert!(!game.ui().is_visible(Panel::Lose));
        assert_eq!(game.tag(game.scene().finish_line), Some(BodyTag::FinishLine));
        assert_eq!(game.scene().constraint.body, game.scene().pendulum);
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let tuning = Tuning {
            box_size: 0.0,
            ..Default::default()
        };
        let result = GameController::new(FakePhysics::default(), HeadlessUi::new(), tuning);
        assert!(matches!(result, Err(Error::InvalidTuning(_))));
    }

    #[test]
    fn test_full_losing_round() {
        let mut game = new_game();

        // Press the action key from the menu
        press(&mut game);
        game.advance(Duration::from_millis(100));
        assert_eq!(game.ui().score_text(), "3000");
        assert!(!game.ui().is_visible(Panel::MainMenu));
        assert_eq!(game.box_state(), BoxState::Idle);

        // Drop one box under the pendulum
        press(&mut game);
        assert_eq!(game.dropped_boxes().len(), 1);
        assert_eq!(game.box_state(), BoxState::Moving);
        let spawned = game.physics().position(last_box(&game)).unwrap();
        assert_eq!(spawned, Vec2::new(PENDULUM_START.x, PENDULUM_START.y + 50.0));

        land_last_box(&mut game);
        assert_eq!(game.score(), 2900);
        assert_eq!(game.box_state(), BoxState::Idle);

        for _ in 0..29 {
            press(&mut game);
            land_last_box(&mut game);
        }
        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), GamePhase::Game);

        game.advance(Duration::from_millis(100));
        assert_eq!(game.phase(), GamePhase::MainMenu);
        assert_eq!(game.ui().score_text(), "0");
        assert_eq!(game.last_outcome(), Some(RoundOutcome::Lose));
        assert!(game.ui().is_visible(Panel::Lose));
        assert!(!game.ui().is_visible(Panel::Win));
        assert!(game.ui().is_visible(Panel::EndGame));
        assert!(game.ui().is_visible(Panel::MainMenu));
        // Boxes stay until the next round starts
        assert_eq!(game.dropped_boxes().len(), 30);
    }

    #[test]
    fn test_finish_line_wins_immediately() {
        let mut game = started_game();
        press(&mut game);
        land_last_box(&mut game);
        let settled = last_box(&game);
        assert_eq!(game.tag(settled), Some(BodyTag::SettledBox));

        let finish = game.scene().finish_line;
        game.on_collision(&[CollisionPair::new(finish, settled)]);

        assert_eq!(game.phase(), GamePhase::MainMenu);
        assert_eq!(game.last_outcome(), Some(RoundOutcome::Win));
        assert!(game.ui().is_visible(Panel::Win));
        assert!(!game.ui().is_visible(Panel::Lose));
        assert!(game.ui().is_visible(Panel::EndGame));
        assert_eq!(game.score(), 2900);
    }

    #[test]
    fn test_pending_box_does_not_trigger_finish() {
        let mut game = started_game();
        press(&mut game);
        let pending = last_box(&game);
        game.on_collision(&[CollisionPair::new(pending, game.scene().finish_line)]);
        assert_eq!(game.phase(), GamePhase::Game);
    }

    #[test]
    fn test_finish_contact_in_menu_is_ignored() {
        let mut game = started_game();
        press(&mut game);
        land_last_box(&mut game);
        game.end_round();
        game.on_key_up(SPACE);

        let settled = last_box(&game);
        game.on_collision(&[CollisionPair::new(settled, game.scene().finish_line)]);
        assert_eq!(game.phase(), GamePhase::MainMenu);
        assert_eq!(game.last_outcome(), Some(RoundOutcome::Win));
    }

    #[test]
    fn test_new_round_resets_score_and_boxes() {
        let mut game = started_game();
        for _ in 0..3 {
            press(&mut game);
            land_last_box(&mut game);
        }
        game.end_round();
        assert_eq!(game.physics().body_count(), STATIC_BODIES + 3);

        press(&mut game);
        assert_eq!(game.phase(), GamePhase::Game);
        assert_eq!(game.score(), 3000);
        assert!(game.dropped_boxes().is_empty());
        assert_eq!(game.physics().body_count(), STATIC_BODIES);
        assert_eq!(game.render_bodies().len(), STATIC_BODIES);
    }

    #[test]
    fn test_debounce_suppresses_auto_repeat() {
        let mut game = new_game();

        game.on_key_down(SPACE);
        assert_eq!(game.phase(), GamePhase::Game);
        // Auto-repeat while still held
        game.on_key_down(SPACE);
        game.on_key_down(SPACE);
        assert!(game.dropped_boxes().is_empty());

        game.on_key_up(SPACE);
        game.on_key_down(SPACE);
        assert_eq!(game.dropped_boxes().len(), 1);

        land_last_box(&mut game);
        game.on_key_down(SPACE);
        assert_eq!(game.dropped_boxes().len(), 1);
    }

    #[test]
    fn test_other_keys_do_nothing() {
        let mut game = new_game();
        game.on_key_down("Enter");
        game.on_key_down("KeyA");
        assert_eq!(game.phase(), GamePhase::MainMenu);
    }

    #[test]
    fn test_no_drop_while_moving() {
        let mut game = started_game();
        press(&mut game);
        press(&mut game);
        press(&mut game);
        assert_eq!(game.dropped_boxes().len(), 1);
        assert_eq!(game.box_state(), BoxState::Moving);
    }

    #[test]
    fn test_only_grounded_contact_lands_a_box() {
        let mut game = started_game();
        press(&mut game);
        let first = last_box(&game);
        let scene = *game.scene();

        game.on_collision(&[
            CollisionPair::new(first, scene.left_wall),
            CollisionPair::new(scene.pendulum, first),
            CollisionPair::new(first, scene.finish_line),
        ]);
        assert_eq!(game.box_state(), BoxState::Moving);
        assert_eq!(game.score(), 3000);
        assert_eq!(game.tag(first), Some(BodyTag::PendingBox));

        // Box-on-box between two falling boxes does not count either
        land_last_box(&mut game);
        press(&mut game);
        let second = last_box(&game);
        game.on_collision(&[CollisionPair::new(second, scene.pendulum)]);
        assert_eq!(game.box_state(), BoxState::Moving);
    }

    #[test]
    fn test_landing_on_stack_counts() {
        let mut game = started_game();
        press(&mut game);
        land_last_box(&mut game);
        let bottom = last_box(&game);

        press(&mut game);
        let top = last_box(&game);
        game.on_collision(&[CollisionPair::new(bottom, top)]);

        assert_eq!(game.score(), 2800);
        assert_eq!(game.tag(top), Some(BodyTag::SettledBox));
        assert_eq!(game.tag(bottom), Some(BodyTag::SettledBox));
        assert_eq!(game.box_state(), BoxState::Idle);
    }

    #[test]
    fn test_landing_moves_both_bodies_to_scene_category() {
        let mut game = started_game();
        press(&mut game);
        let dropped = last_box(&game);
        let ground = game.scene().ground;
        assert_eq!(game.physics().bodies[&dropped].1.category, category::BOX);

        land_last_box(&mut game);
        assert_eq!(game.physics().bodies[&dropped].1.category, category::SCENE);
        assert_eq!(game.physics().bodies[&ground].1.category, category::SCENE);
        // The mask is untouched
        assert_eq!(game.physics().bodies[&dropped].1.mask, category::GROUND);
    }

    #[test]
    fn test_one_penalty_per_box_per_event() {
        let mut game = started_game();
        press(&mut game);
        land_last_box(&mut game);
        let stack = last_box(&game);

        press(&mut game);
        let falling = last_box(&game);
        let ground = game.scene().ground;
        game.on_collision(&[
            CollisionPair::new(falling, ground),
            CollisionPair::new(stack, falling),
        ]);
        assert_eq!(game.score(), 2800);
    }

    #[test]
    fn test_physics_collisions_are_dispatched() {
        let mut game = started_game();
        press(&mut game);
        let pair = CollisionPair::new(game.scene().ground, last_box(&game));
        game.physics_mut().queued.push(pair);

        game.advance(Duration::from_millis(20));
        assert_eq!(game.physics().steps, 1);
        assert_eq!(game.score(), 2900);
        assert_eq!(game.box_state(), BoxState::Idle);
    }

    #[test]
    fn test_pendulum_swings_even_in_menu() {
        let mut game = new_game();
        game.advance(Duration::from_millis(1000));

        let forces = &game.physics().forces;
        assert_eq!(forces.len(), 2);
        let pendulum = game.scene().pendulum;
        let anchor = game.scene().constraint.anchor;
        assert_eq!(forces[0], (pendulum, Vec2::new(20_000.0, 0.0), anchor));
        assert_eq!(forces[1], (pendulum, Vec2::new(-20_000.0, 0.0), anchor));
    }

    #[test]
    fn test_scoreboard_refreshes_every_100ms() {
        let mut game = new_game();
        for _ in 0..60 {
            game.advance(Duration::from_secs_f32(1.0 / 60.0));
        }
        // 60 frames of 1/60 s land within a rounding error of one second
        let writes = game.ui().score_writes();
        assert!((9..=10).contains(&writes), "writes = {}", writes);
    }

    #[test]
    fn test_physics_backlog_is_capped() {
        let mut game = new_game();
        game.advance(Duration::from_secs(2));
        assert_eq!(game.physics().steps, MAX_SUBSTEPS as usize);
        game.advance(Duration::from_millis(20));
        assert_eq!(game.physics().steps, MAX_SUBSTEPS as usize + 1);
    }

    #[test]
    fn test_shutdown_stops_everything() {
        let mut game = new_game();
        game.advance(Duration::from_millis(500));
        let steps = game.physics().steps;
        let forces = game.physics().forces.len();
        let writes = game.ui().score_writes();

        game.shutdown();
        assert!(!game.is_running());
        game.advance(Duration::from_secs(3));

        assert_eq!(game.physics().steps, steps);
        assert_eq!(game.physics().forces.len(), forces);
        assert_eq!(game.ui().score_writes(), writes);
    }

    #[test]
    fn test_render_bodies_and_pendulum_line() {
        let mut game = started_game();
        press(&mut game);

        let bodies = game.render_bodies();
        assert_eq!(bodies.len(), STATIC_BODIES + 1);
        let pending = bodies.iter().find(|b| b.tag == BodyTag::PendingBox).unwrap();
        assert_eq!(pending.half_extents, Vec2::splat(25.0));
        // Pendulum is shown again after the drop
        assert!(bodies.iter().any(|b| b.tag == BodyTag::Pendulum));

        let (anchor, end) = game.pendulum_line().unwrap();
        assert_eq!(anchor, game.scene().constraint.anchor);
        assert_eq!(end, PENDULUM_START);
    }

    proptest! {
        #[test]
        fn prop_score_after_landings(landings in 0usize..45) {
            let mut game = started_game();
            for _ in 0..landings {
                press(&mut game);
                land_last_box(&mut game);
            }
            game.refresh_scoreboard();

            let expected = (3000 - 100 * landings as i32).max(0);
            prop_assert_eq!(game.score(), expected);
            prop_assert_eq!(game.ui().score_text().parse::<i32>().unwrap().max(0), expected);
            prop_assert_eq!(game.phase() == GamePhase::MainMenu, landings >= 30);
        }

        #[test]
        fn prop_box_state_follows_drops_and_landings(actions in prop::collection::vec(any::<bool>(), 0..40)) {
            let mut game = started_game();
            let mut expected = BoxState::Idle;
            for drop in actions {
                if drop {
                    press(&mut game);
                    expected = BoxState::Moving;
                } else if let Some(&id) = game.dropped_boxes().last() {
                    game.on_collision(&[CollisionPair::new(id, game.scene().ground)]);
                    if expected == BoxState::Moving {
                        expected = BoxState::Idle;
                    }
                }
                prop_assert_eq!(game.box_state(), expected);
            }
        }
    }
}
