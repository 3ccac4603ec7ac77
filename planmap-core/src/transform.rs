//! The affine viewport transform and the constraint math around it.
//!
//! `translate_x`/`translate_y` are screen pixels from the container centre to
//! the centre of the scaled image. `(0, 0)` therefore means "image centred",
//! and the legal translate range on each axis is symmetric around zero.
//!
//! ```text
//! screen = container_center + translate + (image - image_center) * scale
//! ```

use crate::config::{ConstraintPolicy, ViewerConfig};
use crate::geometry::{ImagePoint, ScreenPoint, Size};

/// Uniform scale plus translation, mapping image space to screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    pub scale: f64,
    pub translate_x: f64,
    pub translate_y: f64,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl ViewportTransform {
    pub fn new(scale: f64, translate_x: f64, translate_y: f64) -> Self {
        Self {
            scale,
            translate_x,
            translate_y,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// Centred transform at the given scale.
    pub fn centered(scale: f64) -> Self {
        Self::new(scale, 0.0, 0.0)
    }

    pub fn translate(&self) -> ScreenPoint {
        ScreenPoint::new(self.translate_x, self.translate_y)
    }

    pub fn is_valid(&self) -> bool {
        self.scale.is_finite()
            && self.scale > 0.0
            && self.translate_x.is_finite()
            && self.translate_y.is_finite()
    }

    /// Map an image-space point to container-relative screen coordinates.
    pub fn image_to_screen(&self, point: ImagePoint, container: Size, image: Size) -> ScreenPoint {
        let container_center: ScreenPoint = container.center();
        let image_center: ImagePoint = image.center();
        ScreenPoint::new(
            container_center.x() + self.translate_x + (point.x() - image_center.x()) * self.scale,
            container_center.y() + self.translate_y + (point.y() - image_center.y()) * self.scale,
        )
    }

    /// Inverse of [`image_to_screen`](Self::image_to_screen).
    pub fn screen_to_image(&self, point: ScreenPoint, container: Size, image: Size) -> ImagePoint {
        let container_center: ScreenPoint = container.center();
        let image_center: ImagePoint = image.center();
        ImagePoint::new(
            image_center.x() + (point.x() - container_center.x() - self.translate_x) / self.scale,
            image_center.y() + (point.y() - container_center.y() - self.translate_y) / self.scale,
        )
    }

    /// Screen position of the image's top-left corner.
    pub fn origin_offset(&self, container: Size, image: Size) -> ScreenPoint {
        self.image_to_screen(ImagePoint::origin(), container, image)
    }

    /// The same mapping as an SVG `transform` attribute value.
    pub fn svg_transform(&self, container: Size, image: Size) -> String {
        let origin = self.origin_offset(container, image);
        format!(
            "translate({} {}) scale({})",
            origin.x(),
            origin.y(),
            self.scale
        )
    }
}

/// Legal translate range at a given scale, in the translate frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn contains(&self, translate_x: f64, translate_y: f64) -> bool {
        (self.min_x..=self.max_x).contains(&translate_x)
            && (self.min_y..=self.max_y).contains(&translate_y)
    }

    /// Whether panning can move the image on at least one axis.
    pub fn allows_movement(&self) -> bool {
        self.max_x - self.min_x > 0.0 || self.max_y - self.min_y > 0.0
    }
}

/// Smallest scale permitted by `policy`, floored at `floor`.
///
/// Returns `floor` when either size is not measured yet.
pub fn compute_min_scale(container: Size, image: Size, policy: ConstraintPolicy, floor: f64) -> f64 {
    if !container.is_measured() || !image.is_measured() {
        return floor;
    }
    let scale_x = container.width / image.width;
    let scale_y = container.height / image.height;
    let scale = match policy {
        ConstraintPolicy::Cover => scale_x.max(scale_y),
        ConstraintPolicy::Contain => scale_x.min(scale_y),
    };
    scale.max(floor)
}

/// Translate bounds at `scale`. An axis whose scaled image does not exceed the
/// container collapses to `[0, 0]` (centred, immovable).
pub fn compute_bounds(scale: f64, container: Size, image: Size) -> Bounds {
    let scaled = image.scaled(scale);
    let slack_x = ((scaled.width - container.width) / 2.0).max(0.0);
    let slack_y = ((scaled.height - container.height) / 2.0).max(0.0);
    Bounds {
        min_x: -slack_x,
        max_x: slack_x,
        min_y: -slack_y,
        max_y: slack_y,
    }
}

/// Clamp a scale into `[min_scale, max_scale]`. When the minimum exceeds the
/// maximum, coverage wins. NaN maps to the minimum.
pub fn clamp_scale(scale: f64, min_scale: f64, max_scale: f64) -> f64 {
    let max_scale = max_scale.max(min_scale);
    if scale.is_nan() {
        min_scale
    } else {
        scale.clamp(min_scale, max_scale)
    }
}

/// Pull a proposed transform into the legal range for `container`.
///
/// The scale is clamped first; the translate bounds are then derived from the
/// clamped scale and the current container size.
pub fn clamp(proposed: ViewportTransform, container: Size, config: &ViewerConfig) -> ViewportTransform {
    let min_scale = compute_min_scale(
        container,
        config.image_size,
        config.policy,
        config.min_scale_floor,
    );
    let scale = clamp_scale(proposed.scale, min_scale, config.max_scale);
    let bounds = compute_bounds(scale, container, config.image_size);

    let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
    ViewportTransform {
        scale,
        translate_x: finite_or_zero(proposed.translate_x).clamp(bounds.min_x, bounds.max_x),
        translate_y: finite_or_zero(proposed.translate_y).clamp(bounds.min_y, bounds.max_y),
    }
}

/// Rescale to `new_scale` keeping the image point under `focal` where it is.
///
/// With `c = focal - container_center`:
/// `translate' = translate - (c - translate) * (new_scale / scale - 1)`.
/// The caller guarantees `transform.scale > 0`.
pub fn zoom_about(
    transform: &ViewportTransform,
    focal: ScreenPoint,
    container: Size,
    new_scale: f64,
) -> ViewportTransform {
    let c = focal.sub(&container.center());
    let ratio = new_scale / transform.scale;
    ViewportTransform {
        scale: new_scale,
        translate_x: transform.translate_x - (c.x() - transform.translate_x) * (ratio - 1.0),
        translate_y: transform.translate_y - (c.y() - transform.translate_y) * (ratio - 1.0),
    }
}
