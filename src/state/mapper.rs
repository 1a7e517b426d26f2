// Viewport <-> original image coordinate mapping.
//
// The image stage is rendered with `transform-origin: 0 0` and
// `translate(tx, ty) scale(s)`, so a display-space point d lands at
// `container_origin + translate + d * scale` in the viewport.
use crate::model::{Point, Size};
use crate::state::viewport::ViewportState;

/// Smallest scale we are willing to divide by.
const MIN_SCALE: f64 = 1e-6;

/// DOM measurements shared by every mapping done for one evaluation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Layout {
    /// Top-left corner of the (untransformed) image container, in viewport pixels.
    pub container_origin: Point,
    /// Visible size of the clipping container.
    pub container_size: Size,
    /// Rendered image size before zoom/pan.
    pub display_size: Size,
    /// Canonical image resolution.
    pub original_size: Size,
    /// Browser window size, used for full-screen effects.
    pub window_size: Size,
}

impl Layout {
    pub fn is_ready(&self) -> bool {
        self.display_size.is_usable() && self.original_size.is_usable()
    }

    /// Viewport point relative to the container's top-left corner.
    pub fn to_container(&self, viewport_point: Point) -> Point {
        viewport_point - self.container_origin
    }
}

fn effective_scale(state: &ViewportState) -> f64 {
    if state.scale.is_finite() {
        state.scale.max(MIN_SCALE)
    } else {
        MIN_SCALE
    }
}

/// Viewport pixels -> original image pixels. `None` until layout is ready.
pub fn to_image_space(viewport_point: Point, state: &ViewportState, layout: &Layout) -> Option<Point> {
    if !layout.is_ready() {
        return None;
    }
    let scale = effective_scale(state);
    let rel = layout.to_container(viewport_point);
    let display_x = (rel.x - state.translate_x) / scale;
    let display_y = (rel.y - state.translate_y) / scale;
    let sx = layout.original_size.width / layout.display_size.width;
    let sy = layout.original_size.height / layout.display_size.height;
    Some(Point::new(display_x * sx, display_y * sy))
}

/// Original image pixels -> viewport pixels. Exact inverse of [`to_image_space`].
pub fn to_viewport_space(image_point: Point, state: &ViewportState, layout: &Layout) -> Option<Point> {
    if !layout.is_ready() {
        return None;
    }
    let scale = effective_scale(state);
    let display_x = image_point.x * layout.display_size.width / layout.original_size.width;
    let display_y = image_point.y * layout.display_size.height / layout.original_size.height;
    Some(Point::new(
        layout.container_origin.x + state.translate_x + display_x * scale,
        layout.container_origin.y + state.translate_y + display_y * scale,
    ))
}
