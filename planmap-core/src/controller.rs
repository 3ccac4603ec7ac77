//! Viewport transform controller: turns wheel, drag, pinch and resize input
//! into clamped transform updates.
//!
//! Every handler returns `true` when the committed transform changed. Handlers
//! invoked before the container has been measured, or whose arithmetic would
//! be degenerate, leave the transform untouched.

use crate::config::ViewerConfig;
use crate::error::ConfigError;
use crate::geometry::{distance, midpoint, ImagePoint, ScreenPoint, Size};
use crate::transform::{
    clamp, clamp_scale, compute_bounds, compute_min_scale, zoom_about, Bounds, ViewportTransform,
};

/// Smallest inter-touch distance accepted as a pinch origin.
const MIN_PINCH_DISTANCE: f64 = f64::EPSILON;

/// Snapshot taken when a single-pointer pan starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub origin_pointer: ScreenPoint,
    pub origin_transform: ViewportTransform,
}

/// Snapshot taken when a two-finger gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchState {
    pub origin_distance: f64,
    pub origin_midpoint: ScreenPoint,
    pub origin_transform: ViewportTransform,
}

/// What a pointer-down landed on. Only presses on the background start a pan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Background,
    Region,
    /// Overlay controls drawn over the map (buttons, panels).
    Control,
}

/// Cursor to display over the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorHint {
    Default,
    Grab,
    Grabbing,
}

impl CursorHint {
    /// CSS `cursor` value.
    pub fn css(&self) -> &'static str {
        match self {
            CursorHint::Default => "default",
            CursorHint::Grab => "grab",
            CursorHint::Grabbing => "grabbing",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ViewportController {
    config: ViewerConfig,
    container: Option<Size>,
    transform: ViewportTransform,
    drag: Option<DragState>,
    pinch: Option<PinchState>,
}

impl ViewportController {
    pub fn new(config: ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            container: None,
            transform: ViewportTransform::identity(),
            drag: None,
            pinch: None,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn transform(&self) -> ViewportTransform {
        self.transform
    }

    /// Last measured container size, `None` until laid out.
    pub fn container(&self) -> Option<Size> {
        self.container
    }

    pub fn image_size(&self) -> Size {
        self.config.image_size
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn pinch_state(&self) -> Option<&PinchState> {
        self.pinch.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_pinching(&self) -> bool {
        self.pinch.is_some()
    }

    /// Minimum scale for the current container, re-derived on every call.
    pub fn min_scale(&self) -> Option<f64> {
        self.container.map(|container| {
            compute_min_scale(
                container,
                self.config.image_size,
                self.config.policy,
                self.config.min_scale_floor,
            )
        })
    }

    /// Translate bounds at the current scale and container size.
    pub fn bounds(&self) -> Option<Bounds> {
        self.container
            .map(|container| compute_bounds(self.transform.scale, container, self.config.image_size))
    }

    pub fn cursor(&self) -> CursorHint {
        if self.drag.is_some() {
            CursorHint::Grabbing
        } else if self.bounds().is_some_and(|b| b.allows_movement()) {
            CursorHint::Grab
        } else {
            CursorHint::Default
        }
    }

    /// SVG `transform` attribute for the image layer.
    pub fn svg_transform(&self) -> Option<String> {
        self.container
            .map(|container| self.transform.svg_transform(container, self.config.image_size))
    }

    pub fn screen_to_image(&self, point: ScreenPoint) -> Option<ImagePoint> {
        self.container
            .map(|container| self.transform.screen_to_image(point, container, self.config.image_size))
    }

    pub fn image_to_screen(&self, point: ImagePoint) -> Option<ScreenPoint> {
        self.container
            .map(|container| self.transform.image_to_screen(point, container, self.config.image_size))
    }

    /// Record a new container size.
    ///
    /// The first measurement fits the image (minimum scale, centred). Later
    /// measurements keep the current zoom and pan and only pull them back into
    /// the legal range.
    pub fn resize(&mut self, size: Size) -> bool {
        if !size.is_measured() {
            log::debug!("Ignoring unmeasured container size {:?}", size);
            return false;
        }
        let first = self.container.is_none();
        self.container = Some(size);

        if first {
            let min_scale = self.min_scale().unwrap_or(self.config.min_scale_floor);
            self.commit(ViewportTransform::centered(min_scale))
        } else {
            self.commit(self.transform)
        }
    }

    /// Swap in a new background image size and re-clamp.
    pub fn set_image_size(&mut self, size: Size) -> Result<bool, ConfigError> {
        let config = ViewerConfig {
            image_size: size,
            ..self.config.clone()
        };
        config.validate()?;
        self.config = config;
        Ok(self.commit(self.transform))
    }

    /// Clamp and commit an arbitrary transform.
    pub fn set_transform(&mut self, proposed: ViewportTransform) -> bool {
        self.commit(proposed)
    }

    /// Back to the fitted, centred view.
    pub fn reset(&mut self) -> bool {
        let Some(min_scale) = self.min_scale() else {
            return false;
        };
        log::debug!("Resetting viewport to scale {}", min_scale);
        self.end_gestures();
        self.commit(ViewportTransform::centered(min_scale))
    }

    /// Multiply the scale by `factor`, keeping the image point under `focal`
    /// (container-relative) fixed.
    pub fn zoom_at(&mut self, focal: ScreenPoint, factor: f64) -> bool {
        let Some(container) = self.container else {
            return false;
        };
        if !factor.is_finite() || factor <= 0.0 || !focal.is_finite() {
            log::debug!("Ignoring degenerate zoom factor {}", factor);
            return false;
        }
        let current = self.transform;
        if current.scale <= 0.0 {
            return false;
        }
        let Some(min_scale) = self.min_scale() else {
            return false;
        };

        let new_scale = clamp_scale(current.scale * factor, min_scale, self.config.max_scale);
        if new_scale == current.scale {
            return false;
        }
        self.commit(zoom_about(&current, focal, container, new_scale))
    }

    /// Wheel zoom: negative `delta_y` zooms in by one step, positive zooms out.
    pub fn wheel(&mut self, cursor: ScreenPoint, delta_y: f64) -> bool {
        let factor = if delta_y < 0.0 {
            self.config.zoom_step
        } else if delta_y > 0.0 {
            1.0 / self.config.zoom_step
        } else {
            return false;
        };
        self.zoom_at(cursor, factor)
    }

    /// Start a pan from a pointer press. Returns whether a drag started.
    pub fn pointer_down(&mut self, position: ScreenPoint, target: PointerTarget) -> bool {
        if target != PointerTarget::Background
            || self.container.is_none()
            || !position.is_finite()
        {
            return false;
        }
        self.drag = Some(DragState {
            origin_pointer: position,
            origin_transform: self.transform,
        });
        true
    }

    /// Continue a pan. No-op unless a drag is active.
    pub fn pointer_move(&mut self, position: ScreenPoint) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        if self.container.is_none() || !position.is_finite() {
            return false;
        }
        let delta = position.sub(&drag.origin_pointer);
        let origin = drag.origin_transform;
        self.commit(ViewportTransform::new(
            self.transform.scale,
            origin.translate_x + delta.x(),
            origin.translate_y + delta.y(),
        ))
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// The pointer left the viewport: any pan in progress ends.
    pub fn pointer_leave(&mut self) {
        self.drag = None;
    }

    /// Touches went down. Two or more start a pinch (cancelling any pan); a
    /// single touch on the background starts a pan.
    pub fn touch_start(&mut self, touches: &[ScreenPoint], target: PointerTarget) -> bool {
        match touches {
            [first, second, ..] => {
                self.drag = None;
                self.begin_pinch(*first, *second)
            }
            [only] if self.pinch.is_none() => self.pointer_down(*only, target),
            _ => false,
        }
    }

    /// Touches moved. Pinch when two are down, pan when one is.
    pub fn touch_move(&mut self, touches: &[ScreenPoint]) -> bool {
        match touches {
            [first, second, ..] if self.pinch.is_some() => self.update_pinch(*first, *second),
            [only] if self.drag.is_some() => self.pointer_move(*only),
            _ => false,
        }
    }

    /// Touches lifted; `remaining` are those still down.
    ///
    /// Dropping from a pinch to a single finger continues as a pan from that
    /// finger's current position.
    pub fn touch_end(&mut self, remaining: &[ScreenPoint]) {
        match remaining {
            [] => self.end_gestures(),
            [only] => {
                if self.pinch.take().is_some() {
                    self.drag = Some(DragState {
                        origin_pointer: *only,
                        origin_transform: self.transform,
                    });
                }
            }
            [first, second, ..] => {
                // Still two or more fingers: restart the pinch from here so the
                // next move does not jump.
                if self.pinch.is_some() {
                    self.begin_pinch(*first, *second);
                }
            }
        }
    }

    /// Abandon any drag or pinch in progress.
    pub fn end_gestures(&mut self) {
        self.drag = None;
        self.pinch = None;
    }

    fn begin_pinch(&mut self, first: ScreenPoint, second: ScreenPoint) -> bool {
        if self.container.is_none() || !first.is_finite() || !second.is_finite() {
            return false;
        }
        let origin_distance = distance(&first, &second);
        if origin_distance < MIN_PINCH_DISTANCE {
            log::debug!("Ignoring pinch with coincident touches");
            self.pinch = None;
            return false;
        }
        self.pinch = Some(PinchState {
            origin_distance,
            origin_midpoint: midpoint(&first, &second),
            origin_transform: self.transform,
        });
        true
    }

    fn update_pinch(&mut self, first: ScreenPoint, second: ScreenPoint) -> bool {
        let (Some(pinch), Some(container), Some(min_scale)) =
            (self.pinch, self.container, self.min_scale())
        else {
            return false;
        };
        if !first.is_finite() || !second.is_finite() {
            return false;
        }
        let origin = pinch.origin_transform;
        if pinch.origin_distance < MIN_PINCH_DISTANCE || origin.scale <= 0.0 {
            return false;
        }

        let ratio = distance(&first, &second) / pinch.origin_distance;
        let new_scale = clamp_scale(origin.scale * ratio, min_scale, self.config.max_scale);

        // Zoom about the origin midpoint, then follow the midpoint's movement.
        let zoomed = zoom_about(&origin, pinch.origin_midpoint, container, new_scale);
        let shift = midpoint(&first, &second).sub(&pinch.origin_midpoint);
        self.commit(ViewportTransform::new(
            zoomed.scale,
            zoomed.translate_x + shift.x(),
            zoomed.translate_y + shift.y(),
        ))
    }

    fn commit(&mut self, proposed: ViewportTransform) -> bool {
        let Some(container) = self.container else {
            return false;
        };
        let next = clamp(proposed, container, &self.config);
        if !next.is_valid() {
            log::debug!("Discarding invalid transform {:?}", next);
            return false;
        }
        let changed = next != self.transform;
        self.transform = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn controller(image: (f64, f64), container: (f64, f64)) -> ViewportController {
        let config = ViewerConfig::default().with_image_size(image.0, image.1);
        let mut controller = ViewportController::new(config).unwrap();
        controller.resize(Size::new(container.0, container.1));
        controller
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = ViewerConfig::default().with_image_size(-1.0, 10.0);
        assert!(ViewportController::new(config).is_err());
    }

    #[test]
    fn test_handlers_are_noops_before_layout() {
        let mut c = ViewportController::new(ViewerConfig::default()).unwrap();

        assert!(!c.wheel(ScreenPoint::new(10.0, 10.0), -1.0));
        assert!(!c.pointer_down(ScreenPoint::new(10.0, 10.0), PointerTarget::Background));
        assert!(!c.touch_start(
            &[ScreenPoint::new(0.0, 0.0), ScreenPoint::new(10.0, 0.0)],
            PointerTarget::Background
        ));
        assert_eq!(c.transform(), ViewportTransform::identity());
        assert!(c.min_scale().is_none());
        assert!(c.svg_transform().is_none());
    }

    #[test]
    fn test_first_resize_fits_image() {
        let c = controller((1920.0, 1080.0), (800.0, 600.0));
        let t = c.transform();
        assert!((t.scale - 600.0 / 1080.0).abs() < EPS);
        assert_eq!(t.translate_x, 0.0);
        assert_eq!(t.translate_y, 0.0);
    }

    #[test]
    fn test_unmeasured_resize_is_ignored() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        assert!(!c.resize(Size::new(0.0, 0.0)));
        assert_eq!(c.container(), Some(Size::new(800.0, 600.0)));
    }

    #[test]
    fn test_resize_keeps_zoom_and_pan_when_legal() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        c.set_transform(ViewportTransform::new(2.0, 100.0, -50.0));

        c.resize(Size::new(900.0, 700.0));
        assert_eq!(c.transform(), ViewportTransform::new(2.0, 100.0, -50.0));
    }

    #[test]
    fn test_resize_pulls_back_illegal_transform() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        c.set_transform(ViewportTransform::new(1.0, 560.0, 240.0));

        // Wider container shrinks the horizontal slack
        assert!(c.resize(Size::new(1600.0, 600.0)));
        let t = c.transform();
        assert!((t.scale - 1.0).abs() < EPS);
        assert_eq!(t.translate_x, 160.0);
        assert_eq!(t.translate_y, 240.0);
    }

    #[test]
    fn test_resize_raises_scale_when_container_grows() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        c.resize(Size::new(3840.0, 2160.0));
        assert!((c.transform().scale - 2.0).abs() < EPS);
    }

    #[test]
    fn test_wheel_in_and_out_is_symmetric() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        c.set_transform(ViewportTransform::new(2.0, 0.0, 0.0));
        let cursor = ScreenPoint::new(400.0, 300.0);

        assert!(c.wheel(cursor, -100.0));
        assert!((c.transform().scale - 2.2).abs() < EPS);
        assert!(c.wheel(cursor, 100.0));
        assert!((c.transform().scale - 2.0).abs() < EPS);
    }

    #[test]
    fn test_wheel_zero_delta_is_noop() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        assert!(!c.wheel(ScreenPoint::new(400.0, 300.0), 0.0));
    }

    #[test]
    fn test_wheel_at_limit_reports_no_change() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        // Already at minimum scale
        assert!(!c.wheel(ScreenPoint::new(10.0, 10.0), 1.0));
    }

    #[test]
    fn test_zoom_at_rejects_degenerate_factor() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        let before = c.transform();
        assert!(!c.zoom_at(ScreenPoint::new(0.0, 0.0), 0.0));
        assert!(!c.zoom_at(ScreenPoint::new(0.0, 0.0), f64::NAN));
        assert!(!c.zoom_at(ScreenPoint::new(f64::INFINITY, 0.0), 2.0));
        assert_eq!(c.transform(), before);
    }

    #[test]
    fn test_drag_pans_from_snapshot() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        c.set_transform(ViewportTransform::new(1.0, 0.0, 0.0));

        assert!(c.pointer_down(ScreenPoint::new(100.0, 100.0), PointerTarget::Background));
        assert_eq!(c.cursor(), CursorHint::Grabbing);
        c.pointer_move(ScreenPoint::new(130.0, 90.0));
        c.pointer_move(ScreenPoint::new(150.0, 80.0));

        let t = c.transform();
        assert_eq!(t.translate_x, 50.0);
        assert_eq!(t.translate_y, -20.0);

        c.pointer_up();
        assert!(!c.is_dragging());
        assert_eq!(c.cursor(), CursorHint::Grab);
    }

    #[test]
    fn test_pointer_down_on_region_does_not_pan() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        assert!(!c.pointer_down(ScreenPoint::new(100.0, 100.0), PointerTarget::Region));
        assert!(!c.pointer_move(ScreenPoint::new(300.0, 300.0)));
        assert!(c.drag_state().is_none());
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        c.set_transform(ViewportTransform::new(1.0, 0.0, 0.0));
        c.pointer_down(ScreenPoint::new(100.0, 100.0), PointerTarget::Background);
        c.pointer_leave();

        assert!(!c.pointer_move(ScreenPoint::new(200.0, 200.0)));
        assert_eq!(c.transform().translate_x, 0.0);
    }

    #[test]
    fn test_cursor_default_when_nothing_to_pan() {
        let config = ViewerConfig::default()
            .with_image_size(400.0, 300.0)
            .with_policy(crate::config::ConstraintPolicy::Contain);
        let mut c = ViewportController::new(config).unwrap();
        c.resize(Size::new(800.0, 600.0));

        assert_eq!(c.transform().scale, 2.0);
        assert!(!c.bounds().unwrap().allows_movement());
        assert_eq!(c.cursor(), CursorHint::Default);
    }

    #[test]
    fn test_pinch_doubles_scale() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        c.set_transform(ViewportTransform::new(1.0, 0.0, 0.0));

        let a = ScreenPoint::new(350.0, 300.0);
        let b = ScreenPoint::new(450.0, 300.0);
        assert!(c.touch_start(&[a, b], PointerTarget::Background));
        assert!(c.touch_move(&[ScreenPoint::new(300.0, 300.0), ScreenPoint::new(500.0, 300.0)]));

        let t = c.transform();
        assert!((t.scale - 2.0).abs() < EPS);
        // Midpoint at the container centre: stays centred
        assert!(t.translate_x.abs() < EPS);
        assert!(t.translate_y.abs() < EPS);
    }

    #[test]
    fn test_pinch_coincident_touches_short_circuit() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        let before = c.transform();
        let p = ScreenPoint::new(200.0, 200.0);

        assert!(!c.touch_start(&[p, p], PointerTarget::Background));
        assert!(!c.touch_move(&[p, ScreenPoint::new(300.0, 300.0)]));
        assert_eq!(c.transform(), before);
        assert!(!c.is_pinching());
    }

    #[test]
    fn test_pinch_to_single_finger_continues_as_pan() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        c.set_transform(ViewportTransform::new(1.0, 0.0, 0.0));

        c.touch_start(
            &[ScreenPoint::new(350.0, 300.0), ScreenPoint::new(450.0, 300.0)],
            PointerTarget::Background,
        );
        let remaining = ScreenPoint::new(450.0, 300.0);
        c.touch_end(&[remaining]);

        assert!(!c.is_pinching());
        let drag = c.drag_state().copied().unwrap();
        assert_eq!(drag.origin_pointer, remaining);

        c.touch_move(&[ScreenPoint::new(420.0, 310.0)]);
        let t = c.transform();
        assert_eq!(t.translate_x, -30.0);
        assert_eq!(t.translate_y, 10.0);

        c.touch_end(&[]);
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_pointer_down_on_control_does_not_pan() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        assert!(!c.pointer_down(ScreenPoint::new(700.0, 550.0), PointerTarget::Control));
        assert!(!c.touch_start(&[ScreenPoint::new(700.0, 550.0)], PointerTarget::Control));
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_lifting_third_finger_does_not_jump() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        c.set_transform(ViewportTransform::new(1.0, 0.0, 0.0));

        let a = ScreenPoint::new(300.0, 300.0);
        let b = ScreenPoint::new(500.0, 300.0);
        let third = ScreenPoint::new(400.0, 400.0);
        c.touch_start(&[a, b], PointerTarget::Background);
        c.touch_start(&[a, b, third], PointerTarget::Background);

        let a_moved = ScreenPoint::new(250.0, 300.0);
        let b_moved = ScreenPoint::new(550.0, 300.0);
        assert!(c.touch_move(&[a_moved, b_moved, third]));
        let zoomed = c.transform();
        assert!((zoomed.scale - 1.5).abs() < EPS);

        // First finger lifts: the pinch restarts from the two still down
        c.touch_end(&[b_moved, third]);
        let pinch = c.pinch_state().copied().unwrap();
        assert_eq!(pinch.origin_transform, zoomed);
        assert!((pinch.origin_distance - distance(&b_moved, &third)).abs() < EPS);
        assert_eq!(c.transform(), zoomed);

        assert!(!c.touch_move(&[b_moved, third]));
        assert_eq!(c.transform(), zoomed);
    }

    #[test]
    fn test_single_touch_on_region_does_not_pan() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        assert!(!c.touch_start(&[ScreenPoint::new(10.0, 10.0)], PointerTarget::Region));
        assert!(!c.is_dragging());
    }

    #[test]
    fn test_reset_restores_fit() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        c.set_transform(ViewportTransform::new(3.0, 200.0, 100.0));
        assert!(c.reset());
        let t = c.transform();
        assert!((t.scale - 600.0 / 1080.0).abs() < EPS);
        assert_eq!((t.translate_x, t.translate_y), (0.0, 0.0));
    }

    #[test]
    fn test_set_image_size_reclamps() {
        let mut c = controller((1920.0, 1080.0), (800.0, 600.0));
        assert!(c.set_image_size(Size::new(400.0, 300.0)).unwrap());
        assert!((c.transform().scale - 2.0).abs() < EPS);
        assert!(c.set_image_size(Size::new(0.0, 300.0)).is_err());
    }

    #[test]
    fn test_cursor_css_values() {
        assert_eq!(CursorHint::Default.css(), "default");
        assert_eq!(CursorHint::Grab.css(), "grab");
        assert_eq!(CursorHint::Grabbing.css(), "grabbing");
    }
}
