pub mod config;
pub mod controller;
pub mod error;
pub mod fullscreen;
pub mod geometry;
pub mod interaction;
pub mod region;
pub mod status;
pub mod transform;

pub use config::{ConstraintPolicy, Palette, TooltipConfig, ViewerConfig};
pub use controller::{CursorHint, DragState, PinchState, PointerTarget, ViewportController};
pub use error::{ConfigError, FullscreenError, RegionError};
pub use fullscreen::{FullscreenCapability, FullscreenSupport, UnsupportedFullscreen};
pub use geometry::{
    distance, midpoint, pair_coords, perimeter, svg_points, ImagePoint, ImageSpace, Point,
    ScreenPoint, ScreenSpace, Size,
};
pub use interaction::{
    derive_style, AreaEvent, InteractionLayer, InteractionState, OutlineAnimation, OutlineStyle,
    RegionStyle, Tooltip,
};
pub use region::{Coords, Region, RegionEntry, RegionGeometry, RegionSet, Shape};
pub use status::LoadStatus;
pub use transform::{
    clamp, clamp_scale, compute_bounds, compute_min_scale, zoom_about, Bounds, ViewportTransform,
};
