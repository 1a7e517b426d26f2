//! The game session: targets, viewport, hold gesture and feedback behind a
//! single event entry point.
//!
//! `Game::handle` takes an [`InputEvent`] stamped with a monotonic time and
//! returns the [`Effect`]s (timers) the host must run. Timer callbacks come
//! back as events carrying the id they were scheduled for, so a late callback
//! after a cancel is harmless.

use crate::config::{GameConfig, HoldTiming};
use crate::feedback::FeedbackPresenter;
use crate::model::{Point, Size};
use crate::state::hold::{
    CompletedHold, HoldGestureController, HoldPhaseKind, HoldPoll, IndicatorStatus,
    ProgressIndicator, SessionId,
};
use crate::state::mapper::{self, Layout};
use crate::state::targets::{CommitOutcome, TargetRegistry};
use crate::state::touch::GestureTracker;
use crate::state::viewport::{ViewportTransform, ZOOM_STEP};
use crate::util::clog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Input in viewport (client) pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { at: Point, kind: PointerKind },
    PointerMove { at: Point },
    PointerUp,
    PointerLeave,
    /// Secondary mouse button pressed: pan without arming a hold.
    PanStart { at: Point },
    /// A second finger landed (or moved) while another was down.
    TwoFingers { a: Point, b: Point },
    /// Fewer than two fingers remain.
    PinchEnd,
    Wheel { at: Point, delta_y: f64 },
    ZoomIn,
    ZoomOut,
    ResetView,
    Resize(Layout),
    ArmElapsed(SessionId),
    HoldDeadline(SessionId),
    Frame,
    FlashExpired(u64),
    ConfettiExpired(u64),
}

/// Timer work requested by the game.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    ScheduleArm { session: SessionId, delay_ms: u32 },
    ScheduleHoldDeadline { session: SessionId, delay_ms: u32 },
    /// Run animation frames (`InputEvent::Frame`) while a hold is counting.
    StartProgressFrames,
    /// Drop every timer tied to the hold session.
    CancelHoldTimers,
    ScheduleFlashExpiry { flash: u64, delay_ms: u32 },
    ScheduleConfettiExpiry { burst: u64, delay_ms: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CancelReason {
    PointerUp,
    PointerLeave,
    SecondTouch,
    Dragged,
    DoubleTap,
    ViewChanged,
    Restart,
}

pub struct Game {
    config: GameConfig,
    registry: TargetRegistry,
    viewport: ViewportTransform,
    hold: HoldGestureController,
    gestures: GestureTracker,
    feedback: FeedbackPresenter,
    layout: Layout,
    panning: bool,
    rng: Box<dyn FnMut() -> f64>,
}

impl Game {
    pub fn new(config: GameConfig, rng: Box<dyn FnMut() -> f64>) -> Self {
        let registry = TargetRegistry::new(&config.targets);
        let feedback = FeedbackPresenter::new(config.subject.clone(), &registry);
        let layout = Layout {
            original_size: config.image.size(),
            ..Layout::default()
        };
        Self {
            hold: HoldGestureController::new(config.timing),
            registry,
            viewport: ViewportTransform::new(Size::ZERO),
            gestures: GestureTracker::default(),
            feedback,
            layout,
            panning: false,
            rng,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn viewport(&self) -> &ViewportTransform {
        &self.viewport
    }

    pub fn feedback(&self) -> &FeedbackPresenter {
        &self.feedback
    }

    #[cfg(test)]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[cfg(test)]
    pub fn hold_phase(&self) -> HoldPhaseKind {
        self.hold.phase()
    }

    pub fn active_indicator(&self) -> Option<&ProgressIndicator> {
        self.hold.indicator()
    }

    pub fn is_complete(&self) -> bool {
        self.registry.all_found()
    }

    /// True once a drag has left the slop radius and is moving the picture.
    pub fn is_panning(&self) -> bool {
        self.gestures.is_dragging()
    }

    /// Found markers in container pixels under the current transform.
    pub fn marker_positions(&self) -> Vec<Point> {
        let state = self.viewport.current_transform();
        self.feedback
            .markers()
            .iter()
            .filter_map(|m| mapper::to_viewport_space(m.at, &state, &self.layout))
            .map(|p| self.layout.to_container(p))
            .collect()
    }

    fn timing(&self) -> HoldTiming {
        self.config.timing
    }

    pub fn handle(&mut self, event: InputEvent, now_ms: f64) -> Vec<Effect> {
        match event {
            InputEvent::PointerDown { at, kind } => self.on_pointer_down(at, kind, now_ms),
            InputEvent::PointerMove { at } => self.on_pointer_move(at),
            InputEvent::PointerUp => {
                self.panning = false;
                self.gestures.end_drag();
                self.cancel_hold(CancelReason::PointerUp)
            }
            InputEvent::PointerLeave => {
                self.panning = false;
                self.gestures.end_drag();
                self.cancel_hold(CancelReason::PointerLeave)
            }
            InputEvent::PanStart { at } => {
                self.panning = true;
                self.gestures.begin_drag(self.layout.to_container(at));
                Vec::new()
            }
            InputEvent::TwoFingers { a, b } => self.on_two_fingers(a, b),
            InputEvent::PinchEnd => {
                self.gestures.end_pinch();
                Vec::new()
            }
            InputEvent::Wheel { at, delta_y } => {
                let effects = self.cancel_hold(CancelReason::ViewChanged);
                let factor = (-delta_y * 0.001).exp();
                self.viewport.zoom_by(self.layout.to_container(at), factor);
                effects
            }
            InputEvent::ZoomIn => {
                let effects = self.cancel_hold(CancelReason::ViewChanged);
                let c = self.viewport.container().center();
                self.viewport.zoom_by(c, ZOOM_STEP);
                effects
            }
            InputEvent::ZoomOut => {
                let effects = self.cancel_hold(CancelReason::ViewChanged);
                let c = self.viewport.container().center();
                self.viewport.zoom_by(c, 1.0 / ZOOM_STEP);
                effects
            }
            InputEvent::ResetView => {
                let effects = self.cancel_hold(CancelReason::ViewChanged);
                self.viewport.on_double_tap();
                effects
            }
            InputEvent::Resize(layout) => {
                self.layout = Layout {
                    original_size: self.config.image.size(),
                    ..layout
                };
                self.viewport
                    .set_container(layout.container_size, layout.display_size);
                Vec::new()
            }
            InputEvent::ArmElapsed(id) => self.on_arm_elapsed(id, now_ms),
            InputEvent::HoldDeadline(id) => self.on_deadline(id, now_ms),
            InputEvent::Frame => {
                self.hold.update_progress(now_ms);
                Vec::new()
            }
            InputEvent::FlashExpired(id) => {
                self.feedback.expire_flash(id);
                Vec::new()
            }
            InputEvent::ConfettiExpired(id) => {
                self.feedback.expire_confetti(id);
                Vec::new()
            }
        }
    }

    /// Starts a fresh round with every target hidden again.
    pub fn restart(&mut self) -> Vec<Effect> {
        let effects = self.cancel_hold(CancelReason::Restart);
        self.registry.reset();
        self.feedback.reset(&self.registry);
        self.viewport.on_double_tap();
        self.gestures.reset();
        self.panning = false;
        effects
    }

    fn on_pointer_down(&mut self, at: Point, kind: PointerKind, now_ms: f64) -> Vec<Effect> {
        let rel = self.layout.to_container(at);
        let double_tap_window = f64::from(self.timing().double_tap_ms);
        if self.gestures.register_tap(now_ms, rel, double_tap_window) {
            self.viewport.on_double_tap();
            return self.cancel_hold(CancelReason::DoubleTap);
        }
        if !self.layout.is_ready() || self.hold.is_active() {
            return Vec::new();
        }
        if kind == PointerKind::Touch || self.viewport.is_zoomed() {
            self.gestures.begin_drag(rel);
        }
        // panning still works once everything is found, holding does not
        if self.registry.all_found() {
            return Vec::new();
        }
        let Some(session) = self.hold.pointer_down(at) else {
            return Vec::new();
        };
        vec![Effect::ScheduleArm {
            session,
            delay_ms: self.timing().arm_delay_ms,
        }]
    }

    fn on_pointer_move(&mut self, at: Point) -> Vec<Effect> {
        if self.gestures.is_pinching() {
            return Vec::new();
        }
        let rel = self.layout.to_container(at);
        let phase = self.hold.phase();
        if phase == HoldPhaseKind::Counting && !self.panning {
            // a counting hold is anchored to its down point
            return Vec::new();
        }
        let Some(delta) = self.gestures.update_drag(rel) else {
            return Vec::new();
        };
        let effects = if phase == HoldPhaseKind::Armed {
            self.cancel_hold(CancelReason::Dragged)
        } else {
            Vec::new()
        };
        self.viewport.on_drag_update(delta);
        effects
    }

    fn on_two_fingers(&mut self, a: Point, b: Point) -> Vec<Effect> {
        let a = self.layout.to_container(a);
        let b = self.layout.to_container(b);
        let effects = self.cancel_hold(CancelReason::SecondTouch);
        let scale = self.viewport.current_transform().scale;
        if !self.gestures.is_pinching() {
            self.gestures.begin_pinch(a, b, scale);
            return effects;
        }
        if let Some(update) = self.gestures.update_pinch(a, b, scale) {
            self.viewport.on_drag_update(update.pan);
            self.viewport.on_pinch_update(update.focal, update.scale_delta);
        }
        effects
    }

    fn on_arm_elapsed(&mut self, id: SessionId, now_ms: f64) -> Vec<Effect> {
        let Some(down) = self.hold.session().map(|s| s.down_point) else {
            return Vec::new();
        };
        let indicator_at = self.layout.to_container(down);
        if !self.hold.arm_elapsed(id, now_ms, indicator_at) {
            return Vec::new();
        }
        self.gestures.end_drag();
        vec![
            Effect::StartProgressFrames,
            Effect::ScheduleHoldDeadline {
                session: id,
                delay_ms: self.timing().hold_duration_ms,
            },
        ]
    }

    fn on_deadline(&mut self, id: SessionId, now_ms: f64) -> Vec<Effect> {
        match self.hold.poll(id, now_ms) {
            HoldPoll::Stale => Vec::new(),
            HoldPoll::Pending { remaining_ms } => vec![Effect::ScheduleHoldDeadline {
                session: id,
                delay_ms: remaining_ms.ceil().max(1.0) as u32,
            }],
            HoldPoll::Complete(done) => self.resolve(done),
        }
    }

    fn resolve(&mut self, done: CompletedHold) -> Vec<Effect> {
        let CompletedHold {
            down_point,
            mut indicator,
            ..
        } = done;
        let state = self.viewport.current_transform();
        let image_point = mapper::to_image_space(down_point, &state, &self.layout);
        let outcome = match image_point {
            Some(p) => self.registry.commit(p),
            None => CommitOutcome::Miss,
        };
        let mut effects = vec![Effect::CancelHoldTimers];
        match outcome {
            CommitOutcome::Found(target) => {
                let label = self.registry.targets()[target]
                    .label
                    .as_deref()
                    .unwrap_or("unnamed");
                clog(&format!(
                    "hold hit target={} ({}) found={}/{}",
                    target,
                    label,
                    self.registry.found_count(),
                    self.registry.total()
                ));
                indicator.status = IndicatorStatus::Success;
                if let Some(p) = image_point {
                    self.feedback.add_marker(target, p);
                }
            }
            CommitOutcome::AlreadyFound(target) => {
                clog(&format!("hold on already found target={}", target));
                indicator.status = IndicatorStatus::Success;
            }
            CommitOutcome::Miss => {
                clog("hold miss");
                indicator.status = IndicatorStatus::Failure;
            }
        }
        let flash = self.feedback.flash(indicator);
        effects.push(Effect::ScheduleFlashExpiry {
            flash,
            delay_ms: self.timing().flash_ms,
        });
        self.feedback.refresh_status(&self.registry);
        if matches!(outcome, CommitOutcome::Found(_)) && self.registry.all_found() {
            clog("all targets found");
            let burst = self
                .feedback
                .celebrate(self.layout.window_size, self.rng.as_mut());
            effects.push(Effect::ScheduleConfettiExpiry {
                burst,
                delay_ms: self.timing().confetti_ms,
            });
        }
        effects
    }

    fn cancel_hold(&mut self, reason: CancelReason) -> Vec<Effect> {
        match self.hold.cancel() {
            Some(id) => {
                clog(&format!("hold {:?} cancelled: {:?}", id, reason));
                vec![Effect::CancelHoldTimers]
            }
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::feedback::{CONFETTI_COUNT, StatusTone};

    fn layout() -> Layout {
        Layout {
            container_origin: Point::ORIGIN,
            container_size: Size::new(1516.0, 1010.5),
            display_size: Size::new(1516.0, 1010.5),
            original_size: Size::new(3032.0, 2021.0),
            window_size: Size::new(1516.0, 1100.0),
        }
    }

    fn game() -> Game {
        let mut g = Game::new(test_config(), Box::new(|| 0.5));
        g.handle(InputEvent::Resize(layout()), 0.0);
        g
    }

    fn session_of(effects: &[Effect]) -> SessionId {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::ScheduleArm { session, .. } => Some(*session),
                _ => None,
            })
            .expect("arm scheduled")
    }

    fn down(at: Point) -> InputEvent {
        InputEvent::PointerDown {
            at,
            kind: PointerKind::Touch,
        }
    }

    /// Presses at `at` starting at `t0` and runs both timers on time.
    fn full_hold(g: &mut Game, at: Point, t0: f64) -> Vec<Effect> {
        let effects = g.handle(down(at), t0);
        let id = session_of(&effects);
        let armed = g.handle(InputEvent::ArmElapsed(id), t0 + 200.0);
        assert!(armed.contains(&Effect::StartProgressFrames));
        g.handle(InputEvent::HoldDeadline(id), t0 + 3200.0)
    }

    #[test]
    fn completed_hold_over_target_marks_it_found() {
        let mut g = game();
        let effects = full_hold(&mut g, Point::new(517.0, 679.0), 1000.0);
        assert_eq!(g.registry().found_count(), 1);
        assert!(g.registry().targets()[0].found);
        assert!(effects.contains(&Effect::CancelHoldTimers));
        assert_eq!(g.hold_phase(), HoldPhaseKind::Idle);
        assert_eq!(g.feedback().markers().len(), 1);
        let flash = &g.feedback().flashes()[0];
        assert_eq!(flash.indicator.status, IndicatorStatus::Success);
        assert_eq!(
            g.feedback().status().text,
            "Keep looking! You've found 1 of 2 birds."
        );
    }

    #[test]
    fn repeat_hold_on_found_target_is_a_no_op() {
        let mut g = game();
        full_hold(&mut g, Point::new(517.0, 679.0), 1000.0);
        full_hold(&mut g, Point::new(517.0, 679.0), 10_000.0);
        assert_eq!(g.registry().found_count(), 1);
        assert_eq!(g.feedback().markers().len(), 1);
    }

    #[test]
    fn miss_flashes_failure_then_expires() {
        let mut g = game();
        let effects = full_hold(&mut g, Point::new(10.0, 10.0), 0.0);
        assert_eq!(g.registry().found_count(), 0);
        let flash = g.feedback().flashes()[0].clone();
        assert_eq!(flash.indicator.status, IndicatorStatus::Failure);
        assert!(effects.contains(&Effect::ScheduleFlashExpiry {
            flash: flash.id,
            delay_ms: 500
        }));
        g.handle(InputEvent::FlashExpired(flash.id), 3700.0);
        assert!(g.feedback().flashes().is_empty());
    }

    #[test]
    fn release_before_hold_duration_never_commits() {
        let mut g = game();
        let at = Point::new(517.0, 679.0);
        let id = session_of(&g.handle(down(at), 0.0));
        g.handle(InputEvent::ArmElapsed(id), 200.0);
        g.handle(InputEvent::Frame, 2000.0);
        assert!(g.active_indicator().is_some());
        let effects = g.handle(InputEvent::PointerUp, 3100.0);
        assert_eq!(effects, vec![Effect::CancelHoldTimers]);
        assert!(g.active_indicator().is_none());
        // the deadline timer firing late changes nothing
        assert!(g.handle(InputEvent::HoldDeadline(id), 3200.0).is_empty());
        assert_eq!(g.registry().found_count(), 0);
        assert!(g.feedback().flashes().is_empty());
    }

    #[test]
    fn release_while_armed_cancels_quietly() {
        let mut g = game();
        let id = session_of(&g.handle(down(Point::new(517.0, 679.0)), 0.0));
        g.handle(InputEvent::PointerLeave, 100.0);
        assert!(g.handle(InputEvent::ArmElapsed(id), 200.0).is_empty());
        assert_eq!(g.hold_phase(), HoldPhaseKind::Idle);
    }

    #[test]
    fn second_touch_during_counting_cancels() {
        let mut g = game();
        let at = Point::new(517.0, 679.0);
        let id = session_of(&g.handle(down(at), 0.0));
        g.handle(InputEvent::ArmElapsed(id), 200.0);
        let effects = g.handle(
            InputEvent::TwoFingers {
                a: at,
                b: Point::new(600.0, 700.0),
            },
            250.0,
        );
        assert_eq!(effects, vec![Effect::CancelHoldTimers]);
        assert!(g.active_indicator().is_none());
        assert_eq!(g.hold_phase(), HoldPhaseKind::Idle);
        assert!(g.handle(InputEvent::HoldDeadline(id), 3200.0).is_empty());
        assert!(g.registry().targets().iter().all(|t| !t.found));
    }

    #[test]
    fn early_deadline_reschedules_for_the_remainder() {
        let mut g = game();
        let id = session_of(&g.handle(down(Point::new(517.0, 679.0)), 0.0));
        g.handle(InputEvent::ArmElapsed(id), 200.0);
        let effects = g.handle(InputEvent::HoldDeadline(id), 3195.5);
        assert_eq!(
            effects,
            vec![Effect::ScheduleHoldDeadline {
                session: id,
                delay_ms: 5
            }]
        );
        assert_eq!(g.registry().found_count(), 0);
    }

    #[test]
    fn press_during_active_hold_is_ignored() {
        let mut g = game();
        g.handle(down(Point::new(517.0, 679.0)), 0.0);
        let effects = g.handle(
            InputEvent::PointerDown {
                at: Point::new(900.0, 100.0),
                kind: PointerKind::Mouse,
            },
            1000.0,
        );
        assert!(effects.is_empty());
    }

    #[test]
    fn finding_everything_ends_the_game() {
        let mut g = game();
        full_hold(&mut g, Point::new(517.0, 679.0), 0.0);
        // second bird at (2752, 764) -> display (1376, 382)
        let effects = full_hold(&mut g, Point::new(1376.0, 382.0), 10_000.0);
        assert!(g.is_complete());
        let status = g.feedback().status();
        assert_eq!(status.text, "Congratulations! You found all the birds!");
        assert_eq!(status.tone, StatusTone::Success);
        let burst = g.feedback().confetti().expect("confetti").clone();
        assert_eq!(burst.particles.len(), CONFETTI_COUNT);
        assert!(effects.contains(&Effect::ScheduleConfettiExpiry {
            burst: burst.id,
            delay_ms: 4000
        }));

        assert!(g.handle(down(Point::new(517.0, 679.0)), 20_000.0).is_empty());
        assert_eq!(g.hold_phase(), HoldPhaseKind::Idle);

        g.handle(InputEvent::ConfettiExpired(burst.id), 14_000.0);
        assert!(g.feedback().confetti().is_none());
    }

    #[test]
    fn hit_test_uses_transform_at_resolution() {
        let mut g = game();
        g.handle(InputEvent::ZoomIn, 0.0);
        let state = g.viewport().current_transform();
        let at = mapper::to_viewport_space(Point::new(2752.0, 764.0), &state, g.layout()).unwrap();
        full_hold(&mut g, at, 1000.0);
        assert!(g.registry().targets()[1].found);
    }

    #[test]
    fn double_tap_resets_view_without_arming() {
        let mut g = game();
        g.handle(InputEvent::ZoomIn, 0.0);
        assert!(g.viewport().is_zoomed());
        g.handle(down(Point::new(300.0, 300.0)), 1000.0);
        g.handle(InputEvent::PointerUp, 1080.0);
        let effects = g.handle(down(Point::new(305.0, 302.0)), 1200.0);
        assert!(effects.is_empty());
        assert!(!g.viewport().is_zoomed());
        assert_eq!(g.hold_phase(), HoldPhaseKind::Idle);
    }

    #[test]
    fn dragging_a_pending_press_pans_instead() {
        let mut g = game();
        g.handle(InputEvent::ZoomIn, 0.0);
        let before = g.viewport().current_transform();
        let id = session_of(&g.handle(down(Point::new(500.0, 500.0)), 1000.0));
        let effects = g.handle(InputEvent::PointerMove { at: Point::new(540.0, 500.0) }, 1050.0);
        assert_eq!(effects, vec![Effect::CancelHoldTimers]);
        assert!(g.handle(InputEvent::ArmElapsed(id), 1200.0).is_empty());
        let after = g.viewport().current_transform();
        assert!(after.translate_x > before.translate_x);
    }

    #[test]
    fn pinch_zooms_around_fingers() {
        let mut g = game();
        g.handle(
            InputEvent::TwoFingers {
                a: Point::new(400.0, 400.0),
                b: Point::new(500.0, 400.0),
            },
            0.0,
        );
        g.handle(
            InputEvent::TwoFingers {
                a: Point::new(350.0, 400.0),
                b: Point::new(550.0, 400.0),
            },
            16.0,
        );
        let s = g.viewport().current_transform();
        assert!((s.scale - 2.0).abs() < 1e-9);
        assert!((s.translate_x - (450.0 - 450.0 * 2.0)).abs() < 1e-9);
        g.handle(InputEvent::PinchEnd, 32.0);
        // a lone stray move after the pinch keeps the transform
        g.handle(InputEvent::PointerMove { at: Point::new(10.0, 10.0) }, 40.0);
        assert_eq!(g.viewport().current_transform(), s);
    }

    #[test]
    fn press_before_layout_is_ignored() {
        let mut g = Game::new(test_config(), Box::new(|| 0.5));
        assert!(g.handle(down(Point::new(10.0, 10.0)), 0.0).is_empty());
    }

    #[test]
    fn restart_hides_targets_again() {
        let mut g = game();
        full_hold(&mut g, Point::new(517.0, 679.0), 0.0);
        g.handle(down(Point::new(100.0, 100.0)), 9000.0);
        let effects = g.restart();
        assert_eq!(effects, vec![Effect::CancelHoldTimers]);
        assert_eq!(g.registry().found_count(), 0);
        assert!(g.feedback().markers().is_empty());
        assert_eq!(
            g.feedback().status().text,
            "Keep looking! You've found 0 of 2 birds."
        );
    }

    #[test]
    fn zooming_while_counting_cancels_the_hold() {
        let mut g = game();
        let id = session_of(&g.handle(down(Point::new(517.0, 679.0)), 0.0));
        g.handle(InputEvent::ArmElapsed(id), 200.0);
        let effects = g.handle(InputEvent::ZoomIn, 500.0);
        assert_eq!(effects, vec![Effect::CancelHoldTimers]);
        assert_eq!(g.hold_phase(), HoldPhaseKind::Idle);
        assert!(g.handle(InputEvent::HoldDeadline(id), 3200.0).is_empty());
        assert_eq!(g.registry().found_count(), 0);
        assert!(g.feedback().flashes().is_empty());
    }

    #[test]
    fn every_view_change_cancels_a_pending_hold() {
        let changes = [
            InputEvent::ZoomOut,
            InputEvent::ResetView,
            InputEvent::Wheel {
                at: Point::new(400.0, 400.0),
                delta_y: -120.0,
            },
        ];
        for change in changes {
            let mut g = game();
            let id = session_of(&g.handle(down(Point::new(517.0, 679.0)), 0.0));
            g.handle(InputEvent::ArmElapsed(id), 200.0);
            assert_eq!(g.handle(change, 400.0), vec![Effect::CancelHoldTimers]);
            assert!(g.active_indicator().is_none());
        }
    }

    #[test]
    fn hold_on_target_survives_when_view_is_left_alone() {
        let mut g = game();
        g.handle(InputEvent::ZoomIn, 0.0);
        let state = g.viewport().current_transform();
        let at = mapper::to_viewport_space(Point::new(1034.0, 1358.0), &state, g.layout()).unwrap();
        full_hold(&mut g, at, 1000.0);
        assert_eq!(g.registry().found_count(), 1);
    }

    #[test]
    fn double_tap_still_resets_the_view_after_completion() {
        let mut g = game();
        full_hold(&mut g, Point::new(517.0, 679.0), 0.0);
        full_hold(&mut g, Point::new(1376.0, 382.0), 10_000.0);
        assert!(g.is_complete());
        g.handle(InputEvent::ZoomIn, 20_000.0);
        assert!(g.viewport().is_zoomed());
        assert!(g.handle(down(Point::new(300.0, 300.0)), 21_000.0).is_empty());
        g.handle(InputEvent::PointerUp, 21_080.0);
        assert!(g.handle(down(Point::new(304.0, 301.0)), 21_200.0).is_empty());
        assert!(!g.viewport().is_zoomed());
        assert_eq!(g.hold_phase(), HoldPhaseKind::Idle);
    }

    #[test]
    fn drag_still_pans_after_completion() {
        let mut g = game();
        full_hold(&mut g, Point::new(517.0, 679.0), 0.0);
        full_hold(&mut g, Point::new(1376.0, 382.0), 10_000.0);
        g.handle(InputEvent::ZoomIn, 20_000.0);
        let before = g.viewport().current_transform();
        g.handle(down(Point::new(500.0, 500.0)), 21_000.0);
        g.handle(InputEvent::PointerMove { at: Point::new(540.0, 500.0) }, 21_050.0);
        assert!(g.is_panning());
        assert!(g.viewport().current_transform().translate_x > before.translate_x);
        g.handle(InputEvent::PointerUp, 21_100.0);
        assert!(!g.is_panning());
    }

    #[test]
    fn markers_follow_the_transform() {
        let mut g = game();
        full_hold(&mut g, Point::new(517.0, 679.0), 0.0);
        assert_eq!(g.marker_positions(), vec![Point::new(517.0, 679.0)]);
        g.handle(InputEvent::ZoomIn, 5000.0);
        let s = g.viewport().current_transform();
        let p = g.marker_positions()[0];
        assert!((p.x - (s.translate_x + 517.0 * s.scale)).abs() < 1e-9);
        assert!((p.y - (s.translate_y + 679.0 * s.scale)).abs() < 1e-9);
    }

    #[test]
    fn tall_picture_pans_to_its_bottom_once_zoomed() {
        let mut g = Game::new(test_config(), Box::new(|| 0.5));
        g.handle(
            InputEvent::Resize(Layout {
                container_size: Size::new(1516.0, 800.0),
                ..layout()
            }),
            0.0,
        );
        for _ in 0..8 {
            g.handle(InputEvent::ZoomIn, 0.0);
        }
        g.handle(InputEvent::PanStart { at: Point::new(500.0, 700.0) }, 10.0);
        g.handle(InputEvent::PointerMove { at: Point::new(500.0, -1e7) }, 20.0);
        let s = g.viewport().current_transform();
        assert!((s.translate_y + 1010.5 * s.scale - 800.0).abs() < 1e-6);
    }
}
