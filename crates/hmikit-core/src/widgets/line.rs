//! Straight lines and polylines.

use kurbo::Point;
use serde::Serialize;

/// A single segment between two absolute points.
#[derive(Debug, Clone, Serialize)]
pub struct FreeLine {
    pub start: Point,
    pub end: Point,
}

impl Default for FreeLine {
    fn default() -> Self {
        Self::new(Point::ZERO, Point::new(100.0, 100.0))
    }
}

impl FreeLine {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Connected segments. Points are relative to the widget position.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Polyline {
    pub points: Vec<Point>,
}

impl Polyline {
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }
}
