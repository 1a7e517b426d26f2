// Zoom/pan state for the image stage.
use crate::model::{Point, Size};

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 4.0;
/// Multiplier applied by the +/- zoom buttons.
pub const ZOOM_STEP: f64 = 1.25;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportState {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl ViewportState {
    pub const IDENTITY: ViewportState = ViewportState {
        scale: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Owns the stage transform and keeps it inside zoom and pan bounds.
///
/// Translation is anchored top-left: the stage never reveals empty space
/// inside the container, so `translate ∈ [container - content*scale, 0]`
/// where `content` is the unzoomed stage size.
#[derive(Clone, Debug, Default)]
pub struct ViewportTransform {
    state: ViewportState,
    container: Size,
    content: Size,
}

impl ViewportTransform {
    /// A stage that exactly fills its container.
    pub fn new(container: Size) -> Self {
        Self {
            state: ViewportState::IDENTITY,
            container,
            content: container,
        }
    }

    pub fn current_transform(&self) -> ViewportState {
        self.state
    }

    pub fn container(&self) -> Size {
        self.container
    }

    pub fn is_zoomed(&self) -> bool {
        self.state.scale > MIN_ZOOM
    }

    /// `content` may be larger than `container` when the picture is clipped.
    pub fn set_container(&mut self, container: Size, content: Size) {
        self.container = container;
        self.content = content;
        self.clamp_translation();
    }

    /// Rescales by `scale_delta` keeping `focal` (container-relative) visually fixed.
    pub fn on_pinch_update(&mut self, focal: Point, scale_delta: f64) {
        if !scale_delta.is_finite() || scale_delta <= 0.0 || !focal.is_finite() {
            return;
        }
        let old = self.state.scale;
        let new = (old * scale_delta).clamp(MIN_ZOOM, MAX_ZOOM);
        let ratio = new / old;
        self.state.translate_x = focal.x - (focal.x - self.state.translate_x) * ratio;
        self.state.translate_y = focal.y - (focal.y - self.state.translate_y) * ratio;
        self.state.scale = new;
        self.clamp_translation();
    }

    /// Alias used by wheel and button zoom.
    pub fn zoom_by(&mut self, focal: Point, factor: f64) {
        self.on_pinch_update(focal, factor);
    }

    pub fn on_drag_update(&mut self, delta: Point) {
        if !delta.is_finite() {
            return;
        }
        self.state.translate_x += delta.x;
        self.state.translate_y += delta.y;
        self.clamp_translation();
    }

    pub fn on_double_tap(&mut self) {
        self.state = ViewportState::IDENTITY;
    }

    /// Lowest allowed translation per axis (the upper bound is always 0).
    pub fn pan_bounds(&self) -> (f64, f64) {
        let s = self.state.scale;
        (
            (self.container.width - self.content.width * s).min(0.0),
            (self.container.height - self.content.height * s).min(0.0),
        )
    }

    fn clamp_translation(&mut self) {
        if self.state.scale <= MIN_ZOOM || !self.container.is_usable() || !self.content.is_usable() {
            self.state.scale = self.state.scale.max(MIN_ZOOM);
            self.state.translate_x = 0.0;
            self.state.translate_y = 0.0;
            return;
        }
        let (min_x, min_y) = self.pan_bounds();
        self.state.translate_x = self.state.translate_x.clamp(min_x, 0.0);
        self.state.translate_y = self.state.translate_y.clamp(min_y, 0.0);
    }

    /// CSS `transform` value for a stage with `transform-origin: 0 0`.
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.3}px, {:.3}px) scale({:.5})",
            self.state.translate_x, self.state.translate_y, self.state.scale
        )
    }
}
