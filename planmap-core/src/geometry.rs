//! Points, sizes and the small amount of planar geometry the viewer needs.
//!
//! Two coordinate frames are kept apart at the type level:
//! - [`ImageSpace`]: pixels of the raw background image, origin top-left.
//!   Region coordinates live here.
//! - [`ScreenSpace`]: container-relative CSS pixels, origin at the container's
//!   top-left corner. Pointer positions and the tooltip live here.
//!
//! Converting between the two requires a [`ViewportTransform`](crate::ViewportTransform).

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

/// Marker for image-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSpace {}

/// Marker for container-relative screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSpace {}

/// A 2D point tagged with the frame it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<S> {
    x: f64,
    y: f64,
    space: PhantomData<S>,
}

pub type ImagePoint = Point<ImageSpace>;
pub type ScreenPoint = Point<ScreenSpace>;

impl<S> Point<S> {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            space: PhantomData,
        }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn into_parts(self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(&self, other: &Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn mul_scalar(&self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    pub fn div_scalar(&self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl ScreenPoint {
    /// Convert document (client) coordinates into container-relative ones,
    /// given the container's bounding rectangle origin.
    pub fn from_client(client_x: f64, client_y: f64, rect_left: f64, rect_top: f64) -> Self {
        Self::new(client_x - rect_left, client_y - rect_top)
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True when both dimensions are positive and finite, i.e. the element
    /// has been laid out.
    pub fn is_measured(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn scaled(&self, scale: f64) -> Self {
        Self::new(self.width * scale, self.height * scale)
    }

    /// Center point in whichever frame this size describes.
    pub fn center<S>(&self) -> Point<S> {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Euclidean distance between two points in the same frame.
pub fn distance<S>(a: &Point<S>, b: &Point<S>) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Point halfway between `a` and `b`.
pub fn midpoint<S>(a: &Point<S>, b: &Point<S>) -> Point<S> {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Length of a closed polygon outline, wrapping from the last vertex back to
/// the first. Fewer than two vertices have no outline.
pub fn perimeter(vertices: &[ImagePoint]) -> f64 {
    if vertices.len() < 2 {
        return 0.0;
    }
    vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| distance(a, b))
        .sum()
}

/// Pair up a flat `[x0, y0, x1, y1, ...]` list into image-space vertices.
/// A trailing unpaired value is ignored; callers validate the length first.
pub fn pair_coords(coords: &[f64]) -> Vec<ImagePoint> {
    coords
        .chunks_exact(2)
        .map(|pair| ImagePoint::new(pair[0], pair[1]))
        .collect()
}

/// Format vertices for an SVG `points` attribute: `"x0,y0 x1,y1 ..."`.
pub fn svg_points(vertices: &[ImagePoint]) -> String {
    vertices
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_construction_and_accessors() {
        let point = ImagePoint::new(10.5, 20.5);
        assert_eq!(point.x(), 10.5);
        assert_eq!(point.y(), 20.5);
        assert_eq!(point.into_parts(), (10.5, 20.5));
    }

    #[test]
    fn test_point_arithmetic() {
        let a = ScreenPoint::new(3.0, 4.0);
        let b = ScreenPoint::new(1.0, 2.0);

        assert_eq!(a.add(&b), ScreenPoint::new(4.0, 6.0));
        assert_eq!(a.sub(&b), ScreenPoint::new(2.0, 2.0));
        assert_eq!(a.mul_scalar(2.0), ScreenPoint::new(6.0, 8.0));
        assert_eq!(a.div_scalar(2.0), ScreenPoint::new(1.5, 2.0));
    }

    #[test]
    fn test_from_client_subtracts_container_origin() {
        let p = ScreenPoint::from_client(150.0, 90.0, 100.0, 40.0);
        assert_eq!(p, ScreenPoint::new(50.0, 50.0));
    }

    #[test]
    fn test_size_is_measured() {
        assert!(Size::new(800.0, 600.0).is_measured());
        assert!(!Size::new(0.0, 600.0).is_measured());
        assert!(!Size::new(800.0, -1.0).is_measured());
        assert!(!Size::new(f64::NAN, 600.0).is_measured());
    }

    #[test]
    fn test_size_center() {
        let center: ScreenPoint = Size::new(800.0, 600.0).center();
        assert_eq!(center, ScreenPoint::new(400.0, 300.0));
    }

    #[test]
    fn test_distance_and_midpoint() {
        let a = ScreenPoint::new(0.0, 0.0);
        let b = ScreenPoint::new(30.0, 40.0);
        assert_eq!(distance(&a, &b), 50.0);
        assert_eq!(midpoint(&a, &b), ScreenPoint::new(15.0, 20.0));
    }

    #[test]
    fn test_perimeter_of_square() {
        let square = pair_coords(&[0.0, 0.0, 10.0, 0.0, 10.0, 10.0, 0.0, 10.0]);
        assert_eq!(perimeter(&square), 40.0);
    }

    #[test]
    fn test_perimeter_wraps_last_to_first() {
        // 3-4-5 right triangle
        let triangle = pair_coords(&[0.0, 0.0, 3.0, 0.0, 0.0, 4.0]);
        assert!((perimeter(&triangle) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_perimeter_degenerate() {
        assert_eq!(perimeter(&[]), 0.0);
        assert_eq!(perimeter(&[ImagePoint::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_pair_coords_ignores_trailing_value() {
        let points = pair_coords(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1], ImagePoint::new(3.0, 4.0));
    }

    #[test]
    fn test_svg_points_format() {
        let points = pair_coords(&[10.0, 10.0, 50.0, 10.0, 50.5, 50.0]);
        assert_eq!(svg_points(&points), "10,10 50,10 50.5,50");
    }
}
