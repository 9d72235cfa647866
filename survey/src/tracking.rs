//! Live tracking against a recorded survey.
//!
//! Each incoming fix (absolute position + timestamp) is matched to the nearest recorded point.
//! When that point is close enough, we log which point it is, which section of the path it
//! belongs to and when we were there.  The survey itself is only borrowed, never modified.
//!

use chrono::{DateTime, Utc};
use geo::{Coord, EuclideanDistance, Point};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{label_points, SegmentKind, Status, Survey};

/// Default capture distance between a fix and a recorded point.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// One live position, in absolute coordinates.
///
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct Fix {
    pub time: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
}

impl Fix {
    #[inline]
    fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

/// What we log for every captured fix.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrackRecord {
    pub point_index: usize,
    pub section: SegmentKind,
    pub timestamp: DateTime<Utc>,
}

/// Map fixes onto a survey and keep a log of the points we went through.
///
#[derive(Debug)]
pub struct Tracker<'a> {
    survey: &'a Survey,
    /// Absolute coordinates of every point
    coords: Vec<Coord<f64>>,
    /// Section of every point
    labels: Vec<SegmentKind>,
    threshold: f64,
    log: Vec<TrackRecord>,
}

impl<'a> Tracker<'a> {
    pub fn new(survey: &'a Survey) -> Self {
        let datum = survey.datum();
        let coords = survey
            .points()
            .iter()
            .map(|p| datum.adjust(&p.position))
            .collect();
        Self {
            survey,
            coords,
            labels: label_points(survey.points()),
            threshold: DEFAULT_THRESHOLD,
            log: vec![],
        }
    }

    /// Change the capture distance.
    ///
    pub fn with_threshold(mut self, threshold: f64) -> Result<Self, Status> {
        if !(threshold.is_finite() && threshold > 0.) {
            return Err(Status::InvalidThreshold(threshold));
        }
        self.threshold = threshold;
        Ok(self)
    }

    #[inline]
    pub fn survey(&self) -> &Survey {
        self.survey
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Section of a given recorded point.
    ///
    #[inline]
    pub fn section(&self, index: usize) -> Option<SegmentKind> {
        self.labels.get(index).copied()
    }

    /// Nearest recorded point and its distance, `None` for an empty survey.
    ///
    pub fn nearest(&self, fix: &Fix) -> Option<(usize, f64)> {
        let here = fix.point();
        self.coords
            .iter()
            .map(|&c| here.euclidean_distance(&Point::from(c)))
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
    }

    /// Process one fix, returns the new record if it was captured.
    ///
    #[tracing::instrument(skip(self))]
    pub fn update(&mut self, fix: Fix) -> Option<&TrackRecord> {
        let (point_index, dist) = self.nearest(&fix)?;
        if dist >= self.threshold {
            trace!("nearest point {point_index} too far ({dist})");
            return None;
        }

        let section = self.labels[point_index];
        debug!("at point {point_index} in {section}");
        self.log.push(TrackRecord {
            point_index,
            section,
            timestamp: fix.time,
        });
        self.log.last()
    }

    /// Feed a series of fixes, returns how many were captured.
    ///
    pub fn replay<I: IntoIterator<Item = Fix>>(&mut self, fixes: I) -> usize {
        fixes
            .into_iter()
            .filter(|&fix| self.update(fix).is_some())
            .count()
    }

    #[inline]
    pub fn log(&self) -> &[TrackRecord] {
        &self.log
    }

    /// Hand over the log, starting a new one.
    ///
    pub fn drain(&mut self) -> Vec<TrackRecord> {
        std::mem::take(&mut self.log)
    }
}
