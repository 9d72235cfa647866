//! Split a survey into its four segments: lead-in, rows, turns and lead-out.
//!
//! All coordinates are absolute (datum applied) and distances are 2D.
//!
//! - lead-in is everything before the first treatment point,
//! - lead-out is everything from the last treatment point to the end,
//! - rows are all the treatment points, contiguous or not,
//! - turns are the points strictly between two consecutive treatment points.
//!
//! A gap before the first treatment point is part of the lead-in, never a turn.
//!

use geo::{Coord, EuclideanLength, LineString};
use serde::Serialize;
use strum::{EnumIter, IntoEnumIterator};
use tracing::{debug, trace};

use crate::{Survey, SurveyPoint};

/// The different parts of a survey path.
///
#[derive(
    Clone, Copy, Debug, Eq, EnumIter, Hash, PartialEq, Serialize, strum::Display, strum::AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SegmentKind {
    LeadIn,
    Rows,
    Turns,
    LeadOut,
}

/// Index of the first item matching `pred`, if any.
///
#[inline]
pub fn first_index_where<T>(items: &[T], pred: impl FnMut(&T) -> bool) -> Option<usize> {
    items.iter().position(pred)
}

/// Index of the last item matching `pred`, if any.
///
#[inline]
pub fn last_index_where<T>(items: &[T], pred: impl FnMut(&T) -> bool) -> Option<usize> {
    items.iter().rposition(pred)
}

/// Ordered list of absolute coordinates for one kind of segment.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub line: LineString<f64>,
    /// Sum of the 2D distances between consecutive coordinates
    pub total_distance: f64,
}

impl Segment {
    fn new(kind: SegmentKind, coords: Vec<Coord<f64>>) -> Self {
        let line = LineString::new(coords);
        let total_distance = line.euclidean_length();
        Self {
            kind,
            line,
            total_distance,
        }
    }

    #[inline]
    pub fn coords(&self) -> &[Coord<f64>] {
        &self.line.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.line.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.line.0.is_empty()
    }

    /// All x values, for plotting.
    ///
    pub fn xs(&self) -> Vec<f64> {
        self.coords().iter().map(|c| c.x).collect()
    }

    /// All y values, for plotting.
    ///
    pub fn ys(&self) -> Vec<f64> {
        self.coords().iter().map(|c| c.y).collect()
    }
}

/// The four segments of a survey.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SegmentSet {
    pub lead_in: Segment,
    pub rows: Segment,
    pub turns: Segment,
    pub lead_out: Segment,
}

impl SegmentSet {
    /// Extract all segments from the survey in one go.
    ///
    #[tracing::instrument(skip_all, fields(points = survey.len()))]
    pub fn extract(survey: &Survey) -> Self {
        let points = survey.points();
        let datum = survey.datum();
        let abs = |p: &SurveyPoint| datum.adjust(&p.position);

        let first = first_index_where(points, SurveyPoint::is_treatment);
        let last = last_index_where(points, SurveyPoint::is_treatment);
        debug!("first treatment = {first:?}, last treatment = {last:?}");

        let lead_in = match first {
            Some(i) => &points[..i],
            None => points,
        };
        let lead_out: &[SurveyPoint] = match last {
            Some(i) => &points[i..],
            None => &[],
        };

        let treatment = treatment_indices(points);
        let rows = treatment.iter().map(|&i| abs(&points[i])).collect();
        let turns = treatment
            .windows(2)
            .flat_map(|w| &points[w[0] + 1..w[1]])
            .map(abs)
            .collect();

        let set = SegmentSet {
            lead_in: Segment::new(SegmentKind::LeadIn, lead_in.iter().map(abs).collect()),
            rows: Segment::new(SegmentKind::Rows, rows),
            turns: Segment::new(SegmentKind::Turns, turns),
            lead_out: Segment::new(SegmentKind::LeadOut, lead_out.iter().map(abs).collect()),
        };
        trace!(
            "lead-in {} rows {} turns {} lead-out {}",
            set.lead_in.len(),
            set.rows.len(),
            set.turns.len(),
            set.lead_out.len()
        );
        set
    }

    pub fn get(&self, kind: SegmentKind) -> &Segment {
        match kind {
            SegmentKind::LeadIn => &self.lead_in,
            SegmentKind::Rows => &self.rows,
            SegmentKind::Turns => &self.turns,
            SegmentKind::LeadOut => &self.lead_out,
        }
    }

    /// Segments in path order.
    ///
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        SegmentKind::iter().map(|k| self.get(k))
    }
}

/// Indices of all treatment points, in order.
///
pub fn treatment_indices(points: &[SurveyPoint]) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| p.is_treatment().then_some(i))
        .collect()
}

/// One label per point, following the segment rules.
///
/// The last treatment point belongs to both rows and lead-out, here it is labelled as a row.
///
pub fn label_points(points: &[SurveyPoint]) -> Vec<SegmentKind> {
    let first = first_index_where(points, SurveyPoint::is_treatment);
    let last = last_index_where(points, SurveyPoint::is_treatment);

    points
        .iter()
        .enumerate()
        .map(|(i, p)| match (first, last) {
            (Some(first), Some(last)) => {
                if p.is_treatment() {
                    SegmentKind::Rows
                } else if i < first {
                    SegmentKind::LeadIn
                } else if i > last {
                    SegmentKind::LeadOut
                } else {
                    SegmentKind::Turns
                }
            }
            _ => SegmentKind::LeadIn,
        })
        .collect()
}
