// Press-and-hold state machine: Idle -> Armed -> Counting -> resolved -> Idle.
//
// The controller never schedules anything itself. Callers feed it
// timestamps from a monotonic clock and run the timers it asks for;
// every timer callback carries the `SessionId` it was scheduled for.
use crate::config::HoldTiming;
use crate::model::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorStatus {
    Pending,
    Success,
    Failure,
}

/// Visual progress ring owned by a counting session.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressIndicator {
    /// Container-relative position of the press.
    pub at: Point,
    /// 0.0..=1.0
    pub fill: f64,
    pub status: IndicatorStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HoldPhase {
    Armed,
    Counting {
        started_at: f64,
        indicator: ProgressIndicator,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoldPhaseKind {
    Idle,
    Armed,
    Counting,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HoldSession {
    pub id: SessionId,
    /// Viewport-space point of the original press.
    pub down_point: Point,
    pub phase: HoldPhase,
}

/// A session that ran the full hold; the indicator is handed to the caller.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletedHold {
    pub id: SessionId,
    pub down_point: Point,
    pub indicator: ProgressIndicator,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HoldPoll {
    /// Not the active counting session.
    Stale,
    Pending { remaining_ms: f64 },
    Complete(CompletedHold),
}

#[derive(Clone, Debug)]
pub struct HoldGestureController {
    session: Option<HoldSession>,
    next_id: u64,
    timing: HoldTiming,
}

impl HoldGestureController {
    pub fn new(timing: HoldTiming) -> Self {
        Self {
            session: None,
            next_id: 1,
            timing,
        }
    }

    pub fn hold_duration_ms(&self) -> f64 {
        f64::from(self.timing.hold_duration_ms)
    }

    pub fn phase(&self) -> HoldPhaseKind {
        match &self.session {
            None => HoldPhaseKind::Idle,
            Some(HoldSession {
                phase: HoldPhase::Armed,
                ..
            }) => HoldPhaseKind::Armed,
            Some(_) => HoldPhaseKind::Counting,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&HoldSession> {
        self.session.as_ref()
    }

    pub fn indicator(&self) -> Option<&ProgressIndicator> {
        match &self.session {
            Some(HoldSession {
                phase: HoldPhase::Counting { indicator, .. },
                ..
            }) => Some(indicator),
            _ => None,
        }
    }

    /// Starts an armed session. Ignored while another session is alive.
    pub fn pointer_down(&mut self, at: Point) -> Option<SessionId> {
        if self.is_active() {
            return None;
        }
        let id = SessionId(self.next_id);
        self.next_id += 1;
        self.session = Some(HoldSession {
            id,
            down_point: at,
            phase: HoldPhase::Armed,
        });
        Some(id)
    }

    /// Arm delay elapsed: start counting and allocate the indicator at `indicator_at`.
    pub fn arm_elapsed(&mut self, id: SessionId, now_ms: f64, indicator_at: Point) -> bool {
        match self.session.as_mut() {
            Some(s) if s.id == id && s.phase == HoldPhase::Armed => {
                s.phase = HoldPhase::Counting {
                    started_at: now_ms,
                    indicator: ProgressIndicator {
                        at: indicator_at,
                        fill: 0.0,
                        status: IndicatorStatus::Pending,
                    },
                };
                true
            }
            _ => false,
        }
    }

    /// Refreshes the indicator fill; returns the new fraction while counting.
    pub fn update_progress(&mut self, now_ms: f64) -> Option<f64> {
        let duration = self.hold_duration_ms();
        match self.session.as_mut() {
            Some(HoldSession {
                phase: HoldPhase::Counting {
                    started_at,
                    indicator,
                },
                ..
            }) => {
                indicator.fill = ((now_ms - *started_at) / duration).clamp(0.0, 1.0);
                Some(indicator.fill)
            }
            _ => None,
        }
    }

    /// Deadline check. The decision depends only on elapsed time.
    pub fn poll(&mut self, id: SessionId, now_ms: f64) -> HoldPoll {
        let duration = self.hold_duration_ms();
        let started_at = match &self.session {
            Some(HoldSession {
                id: sid,
                phase: HoldPhase::Counting { started_at, .. },
                ..
            }) if *sid == id => *started_at,
            _ => return HoldPoll::Stale,
        };
        let elapsed = now_ms - started_at;
        if elapsed < duration {
            return HoldPoll::Pending {
                remaining_ms: duration - elapsed,
            };
        }
        match self.session.take() {
            Some(HoldSession {
                id,
                down_point,
                phase: HoldPhase::Counting { mut indicator, .. },
            }) => {
                indicator.fill = 1.0;
                HoldPoll::Complete(CompletedHold {
                    id,
                    down_point,
                    indicator,
                })
            }
            _ => HoldPoll::Stale,
        }
    }

    /// Drops the active session and its indicator. Idempotent.
    pub fn cancel(&mut self) -> Option<SessionId> {
        self.session.take().map(|s| s.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> HoldGestureController {
        HoldGestureController::new(HoldTiming::default())
    }

    #[test]
    fn full_lifecycle() {
        let mut c = controller();
        assert_eq!(c.phase(), HoldPhaseKind::Idle);
        let id = c.pointer_down(Point::new(5.0, 6.0)).unwrap();
        assert_eq!(c.phase(), HoldPhaseKind::Armed);
        assert!(c.indicator().is_none());

        assert!(c.arm_elapsed(id, 200.0, Point::new(5.0, 6.0)));
        assert_eq!(c.phase(), HoldPhaseKind::Counting);
        assert_eq!(c.update_progress(1700.0), Some(0.5));
        assert_eq!(c.indicator().unwrap().fill, 0.5);

        assert_eq!(c.poll(id, 3199.0), HoldPoll::Pending { remaining_ms: 1.0 });
        match c.poll(id, 3200.0) {
            HoldPoll::Complete(done) => {
                assert_eq!(done.id, id);
                assert_eq!(done.down_point, Point::new(5.0, 6.0));
                assert_eq!(done.indicator.fill, 1.0);
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(c.phase(), HoldPhaseKind::Idle);
        assert_eq!(c.poll(id, 4000.0), HoldPoll::Stale);
    }

    #[test]
    fn progress_is_capped() {
        let mut c = controller();
        let id = c.pointer_down(Point::ORIGIN).unwrap();
        c.arm_elapsed(id, 0.0, Point::ORIGIN);
        assert_eq!(c.update_progress(9000.0), Some(1.0));
        assert_eq!(c.update_progress(-5.0), Some(0.0));
    }

    #[test]
    fn second_press_is_ignored_while_active() {
        let mut c = controller();
        let id = c.pointer_down(Point::ORIGIN).unwrap();
        assert_eq!(c.pointer_down(Point::new(1.0, 1.0)), None);
        c.arm_elapsed(id, 200.0, Point::ORIGIN);
        assert_eq!(c.pointer_down(Point::new(1.0, 1.0)), None);
        assert_eq!(c.session().unwrap().down_point, Point::ORIGIN);
    }

    #[test]
    fn cancel_releases_indicator_and_is_idempotent() {
        let mut c = controller();
        let id = c.pointer_down(Point::ORIGIN).unwrap();
        c.arm_elapsed(id, 200.0, Point::ORIGIN);
        assert!(c.indicator().is_some());
        assert_eq!(c.cancel(), Some(id));
        assert!(c.indicator().is_none());
        assert_eq!(c.cancel(), None);
        assert_eq!(c.poll(id, 10_000.0), HoldPoll::Stale);
    }

    #[test]
    fn stale_timers_are_ignored() {
        let mut c = controller();
        let first = c.pointer_down(Point::ORIGIN).unwrap();
        c.cancel();
        let second = c.pointer_down(Point::ORIGIN).unwrap();
        assert_ne!(first, second);
        assert!(!c.arm_elapsed(first, 200.0, Point::ORIGIN));
        assert_eq!(c.phase(), HoldPhaseKind::Armed);
        assert!(c.arm_elapsed(second, 200.0, Point::ORIGIN));
        assert!(!c.arm_elapsed(second, 300.0, Point::ORIGIN));
    }

    #[test]
    fn poll_before_counting_is_stale() {
        let mut c = controller();
        let id = c.pointer_down(Point::ORIGIN).unwrap();
        assert_eq!(c.poll(id, 5000.0), HoldPoll::Stale);
        assert_eq!(c.phase(), HoldPhaseKind::Armed);
    }
}
