//! Convert distances into ideal travel times.
//!
//! Speeds are in distance units per second, times are reported in minutes rounded to two
//! decimals.  Treatment motion (inside the retained runs) and non-treatment motion (everything
//! else on the path) each get their own speed.
//!

use serde::Serialize;
use tracing::debug;

use crate::{path_length_3d, RunSummary, Status, Survey};

/// Default speed inside the treatment area, m/s
pub const DEFAULT_TREATMENT_SPEED: f64 = 0.23;
/// Default speed everywhere else, m/s
pub const DEFAULT_NON_TREATMENT_SPEED: f64 = 0.5;

const SECS_PER_MIN: f64 = 60.;

/// A validated, strictly positive and finite speed.
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize)]
pub struct Speed(f64);

impl Speed {
    /// `name` is only there for the error message.
    ///
    pub fn new(name: &'static str, speed: f64) -> Result<Self, Status> {
        if speed.is_finite() && speed > 0. {
            Ok(Speed(speed))
        } else {
            Err(Status::InvalidSpeed { name, speed })
        }
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Time in minutes to cover `distance`, rounded to 2 decimals.
    ///
    #[inline]
    pub fn minutes(&self, distance: f64) -> f64 {
        round2(distance / self.0 / SECS_PER_MIN)
    }
}

/// Round to 2 decimals, ties to even.
///
/// Goes through the decimal formatter, scaling by 100 first can push a value sitting just below
/// a tie onto it.
///
#[inline]
pub fn round2(v: f64) -> f64 {
    format!("{v:.2}").parse().unwrap_or(v)
}

/// Holds both speeds, once built all estimates are infallible.
///
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TravelTimeEstimator {
    treatment: Speed,
    non_treatment: Speed,
}

impl Default for TravelTimeEstimator {
    fn default() -> Self {
        Self {
            treatment: Speed(DEFAULT_TREATMENT_SPEED),
            non_treatment: Speed(DEFAULT_NON_TREATMENT_SPEED),
        }
    }
}

impl TravelTimeEstimator {
    /// Both speeds are checked before anything else.
    ///
    pub fn new(treatment_speed: f64, non_treatment_speed: f64) -> Result<Self, Status> {
        Ok(Self {
            treatment: Speed::new("treatment", treatment_speed)?,
            non_treatment: Speed::new("non-treatment", non_treatment_speed)?,
        })
    }

    #[inline]
    pub fn treatment_speed(&self) -> Speed {
        self.treatment
    }

    #[inline]
    pub fn non_treatment_speed(&self) -> Speed {
        self.non_treatment
    }

    /// Per-run and aggregate times for a survey, `runs` being its aggregated runs.
    ///
    #[tracing::instrument(skip_all)]
    pub fn estimate(&self, survey: &Survey, runs: &RunSummary) -> TravelTimeEstimate {
        let run_minutes = runs
            .runs
            .iter()
            .map(|r| self.treatment.minutes(r.length))
            .collect();

        let total_distance = path_length_3d(survey.points());
        let treatment_distance = runs.total_distance;

        // Runs are part of the path, anything below 0 is rounding noise.
        //
        let non_treatment_distance = (total_distance - treatment_distance).max(0.);
        debug!("total {total_distance} treatment {treatment_distance} other {non_treatment_distance}");

        TravelTimeEstimate {
            run_minutes,
            total_distance,
            treatment_distance,
            treatment_minutes: self.treatment.minutes(treatment_distance),
            non_treatment_distance,
            non_treatment_minutes: self.non_treatment.minutes(non_treatment_distance),
        }
    }
}

/// Ideal travel times for a survey.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TravelTimeEstimate {
    /// One entry per retained run, same order
    pub run_minutes: Vec<f64>,
    /// 3D length of the whole path
    pub total_distance: f64,
    pub treatment_distance: f64,
    pub treatment_minutes: f64,
    pub non_treatment_distance: f64,
    pub non_treatment_minutes: f64,
}
