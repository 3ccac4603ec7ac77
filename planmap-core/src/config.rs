//! Viewer configuration.
//!
//! Every knob of the transform engine and of the region styling lives here so
//! that the constraint policy is chosen once, not per gesture handler.

use crate::error::ConfigError;
use crate::geometry::Size;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SCALE: f64 = 5.0;
pub const DEFAULT_MIN_SCALE_FLOOR: f64 = 0.1;
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;
pub const DEFAULT_IMAGE_SIZE: Size = Size {
    width: 2000.0,
    height: 2000.0,
};

/// How the minimum scale is derived from the container and image sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConstraintPolicy {
    /// Both axes always cover the container; no background is ever visible.
    #[default]
    Cover,
    /// The whole image may be fitted; an under-filled axis is centred and pinned.
    Contain,
}

/// Tooltip placement relative to the pointer, in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        // Above and to the right of the cursor
        Self {
            offset_x: 10.0,
            offset_y: -60.0,
        }
    }
}

/// Colors and widths for hovered and selected regions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub hover_fill: String,
    pub hover_stroke: String,
    pub hover_stroke_width: f64,
    pub select_fill: String,
    pub select_stroke: String,
    pub select_stroke_width: f64,
    /// Duration of the outline sweep on hover entry.
    pub outline_duration_ms: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            hover_fill: "rgba(255, 255, 255, 0.25)".to_string(),
            hover_stroke: "white".to_string(),
            hover_stroke_width: 3.0,
            select_fill: "rgba(34, 197, 94, 0.3)".to_string(),
            select_stroke: "#22c55e".to_string(),
            select_stroke_width: 2.0,
            outline_duration_ms: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Natural size of the background image in image-space pixels.
    pub image_size: Size,
    pub max_scale: f64,
    /// Lower bound applied to the computed minimum scale.
    pub min_scale_floor: f64,
    /// Multiplicative factor per wheel notch (zoom-in uses it, zoom-out its inverse).
    pub zoom_step: f64,
    pub policy: ConstraintPolicy,
    pub tooltip: TooltipConfig,
    pub palette: Palette,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            image_size: DEFAULT_IMAGE_SIZE,
            max_scale: DEFAULT_MAX_SCALE,
            min_scale_floor: DEFAULT_MIN_SCALE_FLOOR,
            zoom_step: DEFAULT_ZOOM_STEP,
            policy: ConstraintPolicy::default(),
            tooltip: TooltipConfig::default(),
            palette: Palette::default(),
        }
    }
}

impl ViewerConfig {
    pub fn with_image_size(mut self, width: f64, height: f64) -> Self {
        self.image_size = Size::new(width, height);
        self
    }

    pub fn with_policy(mut self, policy: ConstraintPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_scale(mut self, max_scale: f64) -> Self {
        self.max_scale = max_scale;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.image_size.is_measured() {
            return Err(ConfigError::InvalidImageSize {
                width: self.image_size.width,
                height: self.image_size.height,
            });
        }
        let floor_ok = self.min_scale_floor.is_finite() && self.min_scale_floor > 0.0;
        let max_ok = self.max_scale.is_finite() && self.max_scale >= self.min_scale_floor;
        if !floor_ok || !max_ok {
            return Err(ConfigError::InvalidScaleRange {
                floor: self.min_scale_floor,
                max: self.max_scale,
            });
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ConfigError::InvalidZoomStep(self.zoom_step));
        }
        Ok(())
    }
}
