//! Region data model: the clickable areas overlaid on the background image.

use crate::error::RegionError;
use crate::geometry::{pair_coords, perimeter, ImagePoint};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::f64::consts::PI;

/// Shape tag of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Polygon,
    /// `[x1, y1, x2, y2]`, two opposite corners.
    Rect,
    /// `[cx, cy, r]`.
    Circle,
}

/// Raw coordinate list as supplied by the caller.
///
/// Accepts both the flat form `[x0, y0, x1, y1, ...]` and the paired form
/// `[[x0, y0], [x1, y1], ...]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coords {
    Flat(Vec<f64>),
    Pairs(Vec<[f64; 2]>),
}

impl Coords {
    /// Flat `[x0, y0, x1, y1, ...]` view of the coordinates.
    pub fn flatten(&self) -> Vec<f64> {
        match self {
            Coords::Flat(values) => values.clone(),
            Coords::Pairs(pairs) => pairs.iter().flat_map(|[x, y]| [*x, *y]).collect(),
        }
    }

    /// Number of scalar values once flattened.
    pub fn len(&self) -> usize {
        match self {
            Coords::Flat(values) => values.len(),
            Coords::Pairs(pairs) => pairs.len() * 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<f64>> for Coords {
    fn from(values: Vec<f64>) -> Self {
        Coords::Flat(values)
    }
}

/// A named, shaped area on the image. Immutable once supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub shape: Shape,
    pub coords: Coords,
    /// Style hints passed through to rendering; not used by the interaction logic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
}

impl Region {
    /// Polygon region from a flat coordinate list.
    pub fn polygon(id: impl Into<String>, title: impl Into<String>, coords: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            shape: Shape::Polygon,
            coords: Coords::Flat(coords),
            fill_color: None,
            stroke_color: None,
            line_width: None,
        }
    }

    /// Label shown in the tooltip: the title, or the id when the title is blank.
    pub fn tooltip_text(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.id
        } else {
            &self.title
        }
    }

    /// Validate the coordinates against the shape and build the geometry.
    pub fn geometry(&self) -> Result<RegionGeometry, RegionError> {
        let coords = self.coords.flatten();
        if coords.iter().any(|v| !v.is_finite()) {
            return Err(RegionError::NonFiniteCoordinate {
                id: self.id.clone(),
            });
        }

        match self.shape {
            Shape::Polygon => {
                if coords.len() % 2 != 0 {
                    return Err(RegionError::OddCoordinateCount {
                        id: self.id.clone(),
                        len: coords.len(),
                    });
                }
                let vertices = pair_coords(&coords);
                if vertices.len() < 3 {
                    return Err(RegionError::TooFewVertices {
                        id: self.id.clone(),
                        vertices: vertices.len(),
                    });
                }
                Ok(RegionGeometry::Polygon(vertices))
            }
            Shape::Rect => {
                let [x1, y1, x2, y2] = self.exact_coords::<4>(&coords)?;
                let min = ImagePoint::new(x1.min(x2), y1.min(y2));
                let max = ImagePoint::new(x1.max(x2), y1.max(y2));
                if max.x() - min.x() <= 0.0 || max.y() - min.y() <= 0.0 {
                    return Err(RegionError::DegenerateSize {
                        id: self.id.clone(),
                    });
                }
                Ok(RegionGeometry::Rect { min, max })
            }
            Shape::Circle => {
                let [cx, cy, radius] = self.exact_coords::<3>(&coords)?;
                if radius <= 0.0 {
                    return Err(RegionError::DegenerateSize {
                        id: self.id.clone(),
                    });
                }
                Ok(RegionGeometry::Circle {
                    center: ImagePoint::new(cx, cy),
                    radius,
                })
            }
        }
    }

    fn exact_coords<const N: usize>(&self, coords: &[f64]) -> Result<[f64; N], RegionError> {
        <[f64; N]>::try_from(coords).map_err(|_| RegionError::ShapeCoordinateCount {
            id: self.id.clone(),
            shape: self.shape,
            len: coords.len(),
            expected: N,
        })
    }
}

/// Validated region geometry in image space.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    Polygon(Vec<ImagePoint>),
    Rect { min: ImagePoint, max: ImagePoint },
    Circle { center: ImagePoint, radius: f64 },
}

impl RegionGeometry {
    /// Outline length, used as the draw length of the hover outline animation.
    pub fn perimeter(&self) -> f64 {
        match self {
            RegionGeometry::Polygon(vertices) => perimeter(vertices),
            RegionGeometry::Rect { min, max } => 2.0 * ((max.x() - min.x()) + (max.y() - min.y())),
            RegionGeometry::Circle { radius, .. } => 2.0 * PI * radius,
        }
    }
}

/// A region that passed validation, with its derived geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionEntry {
    pub region: Region,
    pub geometry: RegionGeometry,
    pub perimeter: f64,
}

/// The active region collection.
///
/// Malformed regions and duplicate ids are skipped (and logged) rather than
/// failing the whole set; the rejected inputs stay available via [`RegionSet::skipped`].
#[derive(Debug, Clone, Default)]
pub struct RegionSet {
    entries: Vec<RegionEntry>,
    skipped: Vec<String>,
}

impl RegionSet {
    pub fn new(regions: impl IntoIterator<Item = Region>) -> Self {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut skipped = Vec::new();

        for region in regions {
            let checked = if seen.contains(&region.id) {
                Err(RegionError::DuplicateId(region.id.clone()))
            } else {
                region.geometry()
            };

            match checked {
                Ok(geometry) => {
                    seen.insert(region.id.clone());
                    let perimeter = geometry.perimeter();
                    entries.push(RegionEntry {
                        region,
                        geometry,
                        perimeter,
                    });
                }
                Err(e) => {
                    log::warn!("Skipping region: {}", e);
                    skipped.push(region.id);
                }
            }
        }

        Self { entries, skipped }
    }

    /// Parse a JSON array of regions. Only malformed JSON is an error;
    /// individually malformed regions are skipped.
    pub fn from_json(json: &str) -> Result<Self, RegionError> {
        let regions: Vec<Region> = serde_json::from_str(json)?;
        Ok(Self::new(regions))
    }

    pub fn get(&self, id: &str) -> Option<&RegionEntry> {
        self.entries.iter().find(|entry| entry.region.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids of the regions that were rejected.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }
}
