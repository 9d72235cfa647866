//! The `Survey` struct, aka one recorded map, and its JSON document.
//!
//! The on-disk format is the one written by the recording tool:
//!
//! ```json
//! {
//!   "datum": { "longitude": 10.0, "latitude": 20.0 },
//!   "points": [
//!     { "head": { "position": { "x": 1.0, "y": 2.0, "z": 0.0 } }, "treatment_area": true }
//!   ]
//! }
//! ```
//!
//! A missing `treatment_area` means the point is outside the treatment area.  Anything else
//! missing is an error and nothing is returned.
//!

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Datum, Position, Status, SurveyPoint};

/// One survey: the datum and the ordered list of recorded points.
///
/// Both are immutable once loaded, everything else is derived from them.
///
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Survey {
    datum: Datum,
    points: Vec<SurveyPoint>,
}

impl Survey {
    pub fn new(datum: Datum, points: Vec<SurveyPoint>) -> Self {
        Self { datum, points }
    }

    #[inline]
    pub fn datum(&self) -> &Datum {
        &self.datum
    }

    #[inline]
    pub fn points(&self) -> &[SurveyPoint] {
        &self.points
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Read a survey document from any reader.
    ///
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self, Status> {
        let doc: Document = serde_json::from_reader(rdr)?;
        Survey::try_from(doc)
    }

    /// Load a survey document from a file.
    ///
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Status> {
        trace!("enter");
        let fh = File::open(path.as_ref())?;
        let survey = Self::from_reader(BufReader::new(fh))?;
        debug!("{} points loaded", survey.len());
        Ok(survey)
    }
}

impl FromStr for Survey {
    type Err = Status;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let doc: Document = serde_json::from_str(s)?;
        Survey::try_from(doc)
    }
}

// ----- On-disk document, everything optional so we can say what is missing.

#[derive(Debug, Deserialize)]
struct Document {
    datum: Option<DocDatum>,
    points: Option<Vec<DocPoint>>,
}

#[derive(Debug, Deserialize)]
struct DocDatum {
    longitude: Option<f64>,
    latitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct DocPoint {
    head: Option<DocHead>,
    treatment_area: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct DocHead {
    position: Option<DocPosition>,
}

#[derive(Debug, Deserialize)]
struct DocPosition {
    x: Option<f64>,
    y: Option<f64>,
    z: Option<f64>,
}

impl TryFrom<DocDatum> for Datum {
    type Error = Status;

    fn try_from(value: DocDatum) -> Result<Self, Self::Error> {
        let longitude = value
            .longitude
            .ok_or(Status::IncompleteDatum("longitude"))?;
        let latitude = value.latitude.ok_or(Status::IncompleteDatum("latitude"))?;
        Ok(Datum::new(longitude, latitude))
    }
}

impl DocPoint {
    fn into_point(self, index: usize) -> Result<SurveyPoint, Status> {
        let missing = |field| Status::MissingField { index, field };

        let pos = self
            .head
            .ok_or(missing("head"))?
            .position
            .ok_or(missing("head.position"))?;
        let position = Position::new(
            pos.x.ok_or(missing("position.x"))?,
            pos.y.ok_or(missing("position.y"))?,
            pos.z.ok_or(missing("position.z"))?,
        );
        Ok(SurveyPoint::new(
            position,
            self.treatment_area.unwrap_or(false),
        ))
    }
}

impl TryFrom<Document> for Survey {
    type Error = Status;

    fn try_from(doc: Document) -> Result<Self, Self::Error> {
        let datum = Datum::try_from(doc.datum.ok_or(Status::MissingDatum)?)?;
        let points = doc
            .points
            .ok_or(Status::MissingPoints)?
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.into_point(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Survey::new(datum, points))
    }
}
