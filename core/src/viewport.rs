const ZOOM_SENSITIVITY_MOUSE: f64 = 0.001;
const ZOOM_SENSITIVITY_TOUCHPAD: f64 = 0.01;
const DRAG_MULTIPLIER: f64 = 2.5;

/// One window into the map's user coordinate space: origin plus size, the
/// in-memory form of the SVG `viewBox` 4-tuple.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Parse the space-separated `"min-x min-y width height"` attribute form.
    pub fn from_attr(attr: &str) -> Option<Self> {
        let parts: Vec<f64> = attr
            .split_whitespace()
            .map(|part| part.parse().ok())
            .collect::<Option<Vec<_>>>()?;
        let &[min_x, min_y, width, height] = parts.as_slice() else {
            return None;
        };
        Some(Self {
            min_x,
            min_y,
            width,
            height,
        })
    }

    /// Serialize back to the attribute form.
    pub fn to_attr(&self) -> String {
        format!(
            "{} {} {} {}",
            self.min_x, self.min_y, self.width, self.height
        )
    }
}

/// Clamp a window coordinate into `[0, max]`.
pub fn clamp(x: f64, max: f64) -> f64 {
    if x < 0.0 {
        return 0.0;
    }
    if x > max {
        return max;
    }
    x
}

#[derive(Debug, Clone, Copy)]
struct DragOrigin {
    pointer_x: f64,
    pointer_y: f64,
    view: ViewBox,
}

/// Clamped pan/zoom state for the map window.
///
/// The struct is authoritative; the element attribute is a write-through
/// mirror. Space bounds are captured once from the initial window's far
/// corner and never change; origins and sizes clamp against the same pair.
#[derive(Debug, Clone)]
pub struct Viewport {
    view: ViewBox,
    initial: ViewBox,
    max_x: f64,
    max_y: f64,
    drag: Option<DragOrigin>,
}

impl Viewport {
    pub fn new(view: ViewBox) -> Self {
        Self {
            view,
            initial: view,
            max_x: view.width,
            max_y: view.height,
            drag: None,
        }
    }

    pub fn view(&self) -> ViewBox {
        self.view
    }

    /// Begin a drag at a pointer position (client coordinates).
    pub fn drag_start(&mut self, pointer_x: f64, pointer_y: f64) {
        self.drag = Some(DragOrigin {
            pointer_x,
            pointer_y,
            view: self.view,
        });
    }

    /// Shift the window origin opposite the pointer delta since
    /// `drag_start`, scaled and clamped; size is untouched. Returns the
    /// updated window, or `None` when no drag is active.
    pub fn drag_move(&mut self, pointer_x: f64, pointer_y: f64) -> Option<ViewBox> {
        let drag = self.drag?;
        let delta_x = pointer_x - drag.pointer_x;
        let delta_y = pointer_y - drag.pointer_y;
        self.view.min_x = clamp(drag.view.min_x - delta_x * DRAG_MULTIPLIER, self.max_x);
        self.view.min_y = clamp(drag.view.min_y - delta_y * DRAG_MULTIPLIER, self.max_y);
        Some(self.view)
    }

    /// End drag tracking. Returns whether a drag was active.
    pub fn drag_stop(&mut self) -> bool {
        self.drag.take().is_some()
    }

    /// Sub-unit deltas on either axis are the high-resolution trackpad
    /// signature (many small events); notched wheels emit few large ones.
    fn wheel_sensitivity(delta_x: f64, delta_y: f64) -> f64 {
        if delta_y.abs() < 1.0 || delta_x.abs() < 1.0 {
            ZOOM_SENSITIVITY_TOUCHPAD
        } else {
            ZOOM_SENSITIVITY_MOUSE
        }
    }

    /// Zoom about the pointer, given its offset inside the panel's on-screen
    /// rect and that rect's size. The world point under the pointer stays
    /// fixed unless the clamp interferes. A zoom that would collapse either
    /// dimension to zero is rejected with no state change. Returns the
    /// updated window on commit.
    pub fn wheel_zoom(
        &mut self,
        delta_x: f64,
        delta_y: f64,
        pointer_x: f64,
        pointer_y: f64,
        screen_width: f64,
        screen_height: f64,
    ) -> Option<ViewBox> {
        let factor = -delta_y * Self::wheel_sensitivity(delta_x, delta_y);
        let ViewBox {
            min_x,
            min_y,
            width,
            height,
        } = self.view;

        let frac_x = pointer_x / screen_width;
        let frac_y = pointer_y / screen_height;
        let focus_x = min_x + width * frac_x;
        let focus_y = min_y + height * frac_y;

        let new_width = clamp(width * (1.0 + factor), self.max_x);
        let new_height = clamp(height * (1.0 + factor), self.max_y);
        if new_width == 0.0 || new_height == 0.0 {
            return None;
        }

        self.view = ViewBox {
            min_x: clamp(focus_x - frac_x * new_width, self.max_x),
            min_y: clamp(focus_y - frac_y * new_height, self.max_y),
            width: new_width,
            height: new_height,
        };
        Some(self.view)
    }

    /// One-shot clamped origin nudge, for keyboard panning.
    pub fn pan_by(&mut self, delta_x: f64, delta_y: f64) -> ViewBox {
        self.view.min_x = clamp(self.view.min_x + delta_x, self.max_x);
        self.view.min_y = clamp(self.view.min_y + delta_y, self.max_y);
        self.view
    }

    /// Restore the window the controller was constructed with.
    pub fn reset(&mut self) -> ViewBox {
        self.view = self.initial;
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewBox, Viewport, clamp};

    fn view(min_x: f64, min_y: f64, width: f64, height: f64) -> ViewBox {
        ViewBox {
            min_x,
            min_y,
            width,
            height,
        }
    }

    #[test]
    fn clamp_keeps_values_in_bounds() {
        assert_eq!(clamp(-3.0, 100.0), 0.0);
        assert_eq!(clamp(42.0, 100.0), 42.0);
        assert_eq!(clamp(140.0, 100.0), 100.0);
        assert_eq!(clamp(0.0, 100.0), 0.0);
        assert_eq!(clamp(100.0, 100.0), 100.0);
    }

    #[test]
    fn clamp_is_idempotent() {
        for x in [-50.0, 0.0, 3.25, 99.9, 100.0, 1e9] {
            let once = clamp(x, 100.0);
            assert_eq!(clamp(once, 100.0), once);
            assert!((0.0..=100.0).contains(&once));
        }
    }

    #[test]
    fn attr_round_trip() {
        let parsed = ViewBox::from_attr("0 0 1500 900").unwrap();
        assert_eq!(parsed, view(0.0, 0.0, 1500.0, 900.0));
        assert_eq!(parsed.to_attr(), "0 0 1500 900");

        let fractional = view(2.5, 0.0, 990.0, 792.0);
        assert_eq!(
            ViewBox::from_attr(&fractional.to_attr()),
            Some(fractional)
        );
    }

    #[test]
    fn attr_rejects_malformed_tuples() {
        assert_eq!(ViewBox::from_attr(""), None);
        assert_eq!(ViewBox::from_attr("0 0 1500"), None);
        assert_eq!(ViewBox::from_attr("0 0 1500 900 7"), None);
        assert_eq!(ViewBox::from_attr("0 0 wide 900"), None);
    }

    #[test]
    fn drag_shifts_origin_against_pointer_delta() {
        let mut vp = Viewport::new(view(100.0, 100.0, 1000.0, 800.0));
        vp.drag_start(500.0, 500.0);
        let moved = vp.drag_move(490.0, 510.0).unwrap();
        // delta (-10, +10) scaled by the 2.5 multiplier, origin moves opposite.
        assert_eq!(moved.min_x, 125.0);
        assert_eq!(moved.min_y, 75.0);
        assert_eq!(moved.width, 1000.0);
        assert_eq!(moved.height, 800.0);
    }

    #[test]
    fn drag_clamps_to_space_bounds() {
        let mut vp = Viewport::new(view(0.0, 0.0, 1000.0, 800.0));
        vp.drag_start(0.0, 0.0);
        let moved = vp.drag_move(10_000.0, -10_000.0).unwrap();
        assert_eq!(moved.min_x, 0.0);
        assert_eq!(moved.min_y, 800.0);
    }

    #[test]
    fn drag_moves_resolve_against_the_start_snapshot() {
        let mut vp = Viewport::new(view(100.0, 100.0, 1000.0, 800.0));
        vp.drag_start(0.0, 0.0);
        vp.drag_move(-4.0, 0.0);
        let moved = vp.drag_move(-10.0, 0.0).unwrap();
        // Cumulative from the snapshot, not from the previous move.
        assert_eq!(moved.min_x, 125.0);
    }

    #[test]
    fn drag_move_without_start_is_inert() {
        let mut vp = Viewport::new(view(0.0, 0.0, 1000.0, 800.0));
        assert_eq!(vp.drag_move(50.0, 50.0), None);
        assert_eq!(vp.view(), view(0.0, 0.0, 1000.0, 800.0));
    }

    #[test]
    fn drag_stop_ends_tracking() {
        let mut vp = Viewport::new(view(0.0, 0.0, 1000.0, 800.0));
        vp.drag_start(0.0, 0.0);
        assert!(vp.drag_stop());
        assert!(!vp.drag_stop());
        assert_eq!(vp.drag_move(50.0, 50.0), None);
    }

    #[test]
    fn zoom_keeps_world_point_under_pointer() {
        let mut vp = Viewport::new(view(0.0, 0.0, 1000.0, 800.0));
        // Pointer a quarter of the way in, wheel-down by a notched wheel.
        let zoomed = vp
            .wheel_zoom(10.0, 10.0, 250.0, 200.0, 1000.0, 800.0)
            .unwrap();
        assert_eq!(zoomed.width, 990.0);
        assert_eq!(zoomed.height, 792.0);
        let world_x = zoomed.min_x + zoomed.width * 0.25;
        let world_y = zoomed.min_y + zoomed.height * 0.25;
        assert!((world_x - 250.0).abs() < 1e-9);
        assert!((world_y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn zoom_sensitivity_follows_delta_magnitude() {
        // Sub-unit deltas read as trackpad input and zoom harder per unit.
        let mut trackpad = Viewport::new(view(0.0, 0.0, 1000.0, 800.0));
        trackpad
            .wheel_zoom(0.5, 0.5, 500.0, 400.0, 1000.0, 800.0)
            .unwrap();
        assert_eq!(trackpad.view().width, 995.0);

        let mut mouse = Viewport::new(view(0.0, 0.0, 1000.0, 800.0));
        mouse
            .wheel_zoom(10.0, 10.0, 500.0, 400.0, 1000.0, 800.0)
            .unwrap();
        assert_eq!(mouse.view().width, 990.0);
    }

    #[test]
    fn zoom_to_zero_size_is_rejected() {
        let mut vp = Viewport::new(view(0.0, 0.0, 1000.0, 800.0));
        let before = vp.view();
        // factor exactly -1 collapses both dimensions to zero.
        assert_eq!(
            vp.wheel_zoom(1000.0, 1000.0, 500.0, 400.0, 1000.0, 800.0),
            None
        );
        assert_eq!(vp.view(), before);
        // Overshooting negative clamps to zero and is rejected the same way.
        assert_eq!(
            vp.wheel_zoom(2000.0, 2000.0, 500.0, 400.0, 1000.0, 800.0),
            None
        );
        assert_eq!(vp.view(), before);
    }

    #[test]
    fn zoom_out_is_capped_by_the_space_bounds() {
        let mut vp = Viewport::new(view(0.0, 0.0, 1000.0, 800.0));
        vp.wheel_zoom(10.0, 10.0, 500.0, 400.0, 1000.0, 800.0)
            .unwrap();
        // Zooming back out beyond the initial extent clamps to it.
        let out = vp
            .wheel_zoom(-500.0, -500.0, 500.0, 400.0, 1000.0, 800.0)
            .unwrap();
        assert_eq!(out.width, 1000.0);
        assert_eq!(out.height, 800.0);
    }

    #[test]
    fn pan_by_nudges_within_bounds() {
        let mut vp = Viewport::new(view(0.0, 0.0, 1000.0, 800.0));
        assert_eq!(vp.pan_by(50.0, 0.0).min_x, 50.0);
        assert_eq!(vp.pan_by(-200.0, 0.0).min_x, 0.0);
        assert_eq!(vp.pan_by(0.0, 1e6).min_y, 800.0);
    }

    #[test]
    fn reset_restores_the_initial_window() {
        let initial = view(0.0, 0.0, 1000.0, 800.0);
        let mut vp = Viewport::new(initial);
        vp.wheel_zoom(10.0, 10.0, 250.0, 200.0, 1000.0, 800.0)
            .unwrap();
        vp.pan_by(100.0, 100.0);
        assert_eq!(vp.reset(), initial);
        assert_eq!(vp.view(), initial);
    }
}
