// Pinch, drag and double-tap tracking. All points are container-relative.
use crate::model::Point;

/// Pinches that start with fingers closer than this are ignored.
pub const MIN_PINCH_DISTANCE: f64 = 10.0;
/// Pointer travel that turns a pending press into a drag.
pub const DRAG_SLOP_PX: f64 = 10.0;
/// Max distance between the two taps of a double tap.
pub const DOUBLE_TAP_SLOP_PX: f64 = 40.0;

/// Snapshot taken when the second finger lands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSession {
    pub initial_distance: f64,
    pub initial_scale: f64,
    pub last_focal: Point,
}

/// One step of a pinch, ready for `ViewportTransform`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchUpdate {
    pub focal: Point,
    pub scale_delta: f64,
    /// Midpoint travel since the previous update.
    pub pan: Point,
}

#[derive(Clone, Debug, Default)]
pub struct GestureTracker {
    pinch: Option<PinchSession>,
    drag_origin: Option<Point>,
    drag_last: Option<Point>,
    dragging: bool,
    last_tap: Option<(f64, Point)>,
}

impl GestureTracker {
    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_pinch(&mut self, a: Point, b: Point, current_scale: f64) {
        self.end_drag();
        self.pinch = Some(PinchSession {
            initial_distance: a.distance(b),
            initial_scale: current_scale,
            last_focal: a.midpoint(b),
        });
    }

    /// Target scale is `initial_scale * distance / initial_distance`; the
    /// returned delta is relative to `current_scale`.
    pub fn update_pinch(&mut self, a: Point, b: Point, current_scale: f64) -> Option<PinchUpdate> {
        let pinch = self.pinch.as_mut()?;
        if pinch.initial_distance < MIN_PINCH_DISTANCE || current_scale <= 0.0 {
            return None;
        }
        let distance = a.distance(b);
        let focal = a.midpoint(b);
        if !distance.is_finite() || !focal.is_finite() {
            return None;
        }
        let target = pinch.initial_scale * distance / pinch.initial_distance;
        let pan = focal - pinch.last_focal;
        pinch.last_focal = focal;
        Some(PinchUpdate {
            focal,
            scale_delta: target / current_scale,
            pan,
        })
    }

    pub fn end_pinch(&mut self) {
        self.pinch = None;
    }

    pub fn begin_drag(&mut self, at: Point) {
        self.drag_origin = Some(at);
        self.drag_last = Some(at);
        self.dragging = false;
    }

    /// Returns the movement to apply once the pointer has left the slop radius.
    pub fn update_drag(&mut self, at: Point) -> Option<Point> {
        let origin = self.drag_origin?;
        let last = self.drag_last?;
        if !self.dragging {
            if origin.distance(at) <= DRAG_SLOP_PX {
                return None;
            }
            self.dragging = true;
        }
        self.drag_last = Some(at);
        Some(at - last)
    }

    pub fn end_drag(&mut self) {
        self.drag_origin = None;
        self.drag_last = None;
        self.dragging = false;
    }

    /// Records a press; `true` when it completes a double tap.
    pub fn register_tap(&mut self, now_ms: f64, at: Point, window_ms: f64) -> bool {
        if let Some((t, p)) = self.last_tap {
            if now_ms - t <= window_ms && p.distance(at) <= DOUBLE_TAP_SLOP_PX {
                self.last_tap = None;
                return true;
            }
        }
        self.last_tap = Some((now_ms, at));
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
