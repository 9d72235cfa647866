//! Gather everything we compute on a survey into one report.
//!
//! The report is both printable (tables) and serializable, the latter carrying the segment
//! coordinates and the datum for whoever wants to draw the path.
//!

use std::fmt::{Display, Formatter};

use geo::Coord;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::trace;

use crate::{RunSummary, SegmentSet, Survey, TravelTimeEstimate, TravelTimeEstimator};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SurveyReport {
    /// Datum as an absolute coordinate
    pub home: Coord<f64>,
    pub treatment_speed: f64,
    pub non_treatment_speed: f64,
    pub segments: SegmentSet,
    pub runs: RunSummary,
    pub times: TravelTimeEstimate,
}

impl SurveyReport {
    /// Run segmentation, run aggregation and time estimation on `survey`.
    ///
    #[tracing::instrument(skip_all, fields(points = survey.len()))]
    pub fn compute(survey: &Survey, estimator: &TravelTimeEstimator) -> Self {
        trace!("enter");

        let segments = SegmentSet::extract(survey);
        let runs = RunSummary::aggregate(survey.points());
        let times = estimator.estimate(survey, &runs);

        SurveyReport {
            home: survey.datum().coord(),
            treatment_speed: estimator.treatment_speed().value(),
            non_treatment_speed: estimator.non_treatment_speed().value(),
            segments,
            runs,
            times,
        }
    }

    /// Points and 2D distance for each segment.
    ///
    pub fn segment_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(vec![
            "Segment".to_string(),
            "Points".to_string(),
            "Distance (m)".to_string(),
        ]);
        self.segments.iter().for_each(|seg| {
            builder.push_record(vec![
                seg.kind.to_string(),
                seg.len().to_string(),
                format!("{:.2}", seg.total_distance),
            ]);
        });
        builder.build().with(Style::modern()).to_string()
    }

    /// One line per retained run with its ideal time.
    ///
    pub fn run_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(vec![
            "Run".to_string(),
            "Indices".to_string(),
            "Length (m)".to_string(),
            "Time (min)".to_string(),
        ]);
        self.runs
            .runs
            .iter()
            .zip(self.times.run_minutes.iter())
            .enumerate()
            .for_each(|(i, (run, min))| {
                builder.push_record(vec![
                    format!("#{}", i + 1),
                    format!("{}-{}", run.start, run.end),
                    format!("{:.2}", run.length),
                    format!("{min:.2}"),
                ]);
            });
        builder.build().with(Style::modern()).to_string()
    }

    /// Aggregate distances and times.
    ///
    pub fn summary_table(&self) -> String {
        let t = &self.times;
        let mut builder = Builder::default();
        builder.push_record(vec![
            "Area".to_string(),
            "Speed (m/s)".to_string(),
            "Distance (m)".to_string(),
            "Time (min)".to_string(),
        ]);
        builder.push_record(vec![
            "treatment".to_string(),
            format!("{}", self.treatment_speed),
            format!("{:.2}", t.treatment_distance),
            format!("{:.2}", t.treatment_minutes),
        ]);
        builder.push_record(vec![
            "non-treatment".to_string(),
            format!("{}", self.non_treatment_speed),
            format!("{:.2}", t.non_treatment_distance),
            format!("{:.2}", t.non_treatment_minutes),
        ]);
        builder.build().with(Style::modern()).to_string()
    }
}

impl Display for SurveyReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Home at {:.6}, {:.6}", self.home.x, self.home.y)?;
        writeln!(f, "Segments:\n{}", self.segment_table())?;
        writeln!(f, "Runs ({}):\n{}", self.runs.runs.len(), self.run_table())?;
        write!(
            f,
            "Ideal travel times ({:.2} m total):\n{}",
            self.times.total_distance,
            self.summary_table()
        )
    }
}
