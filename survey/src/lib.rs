//! Segmentation and ideal travel time estimation for recorded treatment surveys.
//!
//! A survey is an ordered list of points recorded relative to a datum, each flagged as inside
//! or outside the treatment area.  From it we derive:
//!
//! - the four segments of the path (lead-in, rows, turns, lead-out) in absolute coordinates,
//!   see [`SegmentSet`],
//! - the contiguous treatment runs and their 3D lengths, see [`RunSummary`],
//! - ideal travel times for treatment and non-treatment motion, see [`TravelTimeEstimator`].
//!
//! [`SurveyReport`] does all of it at once and [`Tracker`] maps live fixes back onto the survey.
//!
//! Everything is computed once from an immutable [`Survey`] and never modified afterwards.
//!
//! ```no_run
//! use treatpath_survey::{Survey, SurveyReport, TravelTimeEstimator};
//!
//! let survey = Survey::load("map.json")?;
//! let estimator = TravelTimeEstimator::new(0.23, 0.5)?;
//! let report = SurveyReport::compute(&survey, &estimator);
//! println!("{report}");
//! # Ok::<(), treatpath_survey::Status>(())
//! ```
//!

mod error;
mod point;
mod report;
mod runs;
mod segment;
mod survey;
mod timing;
mod tracking;

pub use error::*;
pub use point::*;
pub use report::*;
pub use runs::*;
pub use segment::*;
pub use survey::*;
pub use timing::*;
pub use tracking::*;
