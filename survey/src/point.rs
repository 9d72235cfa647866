//! Basic survey types: local positions, recorded points and the datum.
//!
//! Points are recorded in a local frame, the datum gives the absolute coordinates of its origin.
//! Converting a local position into an absolute one is a simple offset on x (longitude axis)
//! and y (latitude axis); z is left alone.
//!

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Local position of a point, relative to the datum.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 3D Euclidean distance between two local positions.
    ///
    #[inline]
    pub fn distance_3d(&self, other: &Position) -> f64 {
        let (dx, dy, dz) = (other.x - self.x, other.y - self.y, other.z - self.z);
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// One recorded sample of the survey path.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SurveyPoint {
    /// Local position
    pub position: Position,
    /// Are we inside the treatment area?
    pub treatment_area: bool,
}

impl SurveyPoint {
    #[inline]
    pub fn new(position: Position, treatment_area: bool) -> Self {
        Self {
            position,
            treatment_area,
        }
    }

    #[inline]
    pub fn is_treatment(&self) -> bool {
        self.treatment_area
    }
}

/// Reference point of the survey, all local positions are offsets from it.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Datum {
    pub longitude: f64,
    pub latitude: f64,
}

impl Datum {
    #[inline]
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Absolute coordinate of a local position.
    ///
    #[inline]
    pub fn adjust(&self, position: &Position) -> Coord<f64> {
        Coord {
            x: position.x + self.longitude,
            y: position.y + self.latitude,
        }
    }

    /// The datum itself as an absolute coordinate, aka "home".
    ///
    #[inline]
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

/// Sum of the 3D distances between consecutive points, 0 for less than two points.
///
pub fn path_length_3d(points: &[SurveyPoint]) -> f64 {
    points
        .windows(2)
        .map(|w| w[0].position.distance_3d(&w[1].position))
        .sum()
}
