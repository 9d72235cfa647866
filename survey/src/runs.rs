//! Group contiguous treatment points into runs, used for distance and time accounting.
//!
//! This is a single left-to-right fold over the raw points (no datum, 3D distances) with two
//! states, `Outside` and `InsideRun`.  A run is closed by the first non-treatment point after
//! it and then:
//!
//! - kept and counted if it has at least two points,
//! - silently dropped if it has only one.
//!
//! A run still open when the points end is never closed, so trailing treatment points are not
//! accounted for.
//!

use std::ops::RangeInclusive;

use serde::Serialize;
use tracing::trace;

use crate::{path_length_3d, SurveyPoint};

/// A retained treatment run, indices are inclusive.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TreatmentRun {
    pub start: usize,
    pub end: usize,
    /// 3D length
    pub length: f64,
}

impl TreatmentRun {
    #[inline]
    pub fn range(&self) -> RangeInclusive<usize> {
        self.start..=self.end
    }

    /// Number of points in the run, always at least 2.
    ///
    #[inline]
    pub fn point_count(&self) -> usize {
        self.end - self.start + 1
    }
}

/// All retained runs and the sum of their lengths.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub runs: Vec<TreatmentRun>,
    pub total_distance: f64,
}

impl RunSummary {
    /// Scan the points and collect runs.
    ///
    #[tracing::instrument(skip_all, fields(points = points.len()))]
    pub fn aggregate(points: &[SurveyPoint]) -> Self {
        let summary = points
            .iter()
            .enumerate()
            .fold(RunScan::new(points), RunScan::step)
            .finish();
        trace!(
            "{} runs, {} total",
            summary.runs.len(),
            summary.total_distance
        );
        summary
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Outside,
    InsideRun { start: usize },
}

#[derive(Debug)]
struct RunScan<'a> {
    points: &'a [SurveyPoint],
    state: RunState,
    runs: Vec<TreatmentRun>,
    total_distance: f64,
}

impl<'a> RunScan<'a> {
    fn new(points: &'a [SurveyPoint]) -> Self {
        Self {
            points,
            state: RunState::Outside,
            runs: vec![],
            total_distance: 0.,
        }
    }

    fn step(mut self, (index, point): (usize, &SurveyPoint)) -> Self {
        self.state = match (self.state, point.is_treatment()) {
            (RunState::Outside, true) => RunState::InsideRun { start: index },
            (RunState::Outside, false) => RunState::Outside,
            (inside @ RunState::InsideRun { .. }, true) => inside,
            (RunState::InsideRun { start }, false) => {
                self.close(start, index - 1);
                RunState::Outside
            }
        };
        self
    }

    fn close(&mut self, start: usize, end: usize) {
        if end > start {
            let length = path_length_3d(&self.points[start..=end]);
            self.total_distance += length;
            self.runs.push(TreatmentRun { start, end, length });
        } else {
            trace!("single point run at {start} dropped");
        }
    }

    fn finish(self) -> RunSummary {
        if let RunState::InsideRun { start } = self.state {
            trace!("run from {start} still open at the end, ignored");
        }
        RunSummary {
            runs: self.runs,
            total_distance: self.total_distance,
        }
    }
}
