//! Error types for region data, viewer configuration and full-screen control.

use crate::region::Shape;
use thiserror::Error;

/// A region that cannot be rendered or hit-tested.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("region `{id}` has an odd number of coordinates ({len})")]
    OddCoordinateCount { id: String, len: usize },

    #[error("region `{id}` has {vertices} vertices, a polygon needs at least 3")]
    TooFewVertices { id: String, vertices: usize },

    #[error("region `{id}` is a {shape:?} but has {len} coordinates (expected {expected})")]
    ShapeCoordinateCount {
        id: String,
        shape: Shape,
        len: usize,
        expected: usize,
    },

    #[error("region `{id}` contains a non-finite coordinate")]
    NonFiniteCoordinate { id: String },

    #[error("region `{id}` has a degenerate size")]
    DegenerateSize { id: String },

    #[error("duplicate region id `{0}`")]
    DuplicateId(String),

    #[error("failed to parse region data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Invalid viewer configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("image size must be positive and finite, got {width}x{height}")]
    InvalidImageSize { width: f64, height: f64 },

    #[error("invalid scale range: floor {floor}, max {max}")]
    InvalidScaleRange { floor: f64, max: f64 },

    #[error("zoom step must be finite and greater than 1, got {0}")]
    InvalidZoomStep(f64),
}

/// Full-screen requests that the host refused or cannot serve.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FullscreenError {
    #[error("full-screen mode is not supported by this host")]
    Unsupported,

    #[error("full-screen request rejected: {0}")]
    Rejected(String),
}
