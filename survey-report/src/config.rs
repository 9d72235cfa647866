//! Configuration module
//!
//! Speeds and tracking threshold come, in order of priority, from the command line, the
//! configuration file and the built-in defaults.
//!
//! Version History:
//!
//! - v1 has `treatment_speed`, `non_treatment_speed` and `threshold`.
//!

use eyre::Result;
use serde::Deserialize;
use tracing::{debug, trace};

use treatpath_common::{ConfigFile, IntoConfig, Versioned};
use treatpath_survey::{
    TravelTimeEstimator, DEFAULT_NON_TREATMENT_SPEED, DEFAULT_THRESHOLD, DEFAULT_TREATMENT_SPEED,
};

use crate::cli::Opts;

/// Config filename
const CONFIG: &str = "survey-report.hcl";

/// Current version
const CVERSION: usize = 1;

/// Configuration for the CLI tool
///
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Version number for safety
    pub version: usize,
    /// Speed inside the treatment area (m/s)
    pub treatment_speed: f64,
    /// Speed everywhere else (m/s)
    pub non_treatment_speed: f64,
    /// Capture distance for tracking
    pub threshold: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            version: CVERSION,
            treatment_speed: DEFAULT_TREATMENT_SPEED,
            non_treatment_speed: DEFAULT_NON_TREATMENT_SPEED,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Versioned for ReportConfig {
    fn version(&self) -> usize {
        self.version
    }
}

impl IntoConfig for ReportConfig {
    fn filename() -> &'static str {
        CONFIG
    }

    fn expected_version() -> usize {
        CVERSION
    }
}

/// This holds our context, meaning the validated parameters.
///
#[derive(Debug)]
pub struct Context {
    pub estimator: TravelTimeEstimator,
    pub threshold: f64,
}

impl ReportConfig {
    /// Command-line values win over the file.
    ///
    pub fn merge(mut self, opts: &Opts) -> Self {
        if let Some(v) = opts.treatment_speed {
            self.treatment_speed = v;
        }
        if let Some(v) = opts.non_treatment_speed {
            self.non_treatment_speed = v;
        }
        if let Some(v) = opts.threshold {
            self.threshold = v;
        }
        self
    }
}

/// Load the configuration and check everything before doing any work.
///
#[tracing::instrument(skip(opts))]
pub fn init_runtime(opts: &Opts) -> Result<Context> {
    trace!("enter");

    let cfile = ConfigFile::<ReportConfig>::load(opts.config.as_deref())?;
    match cfile.source() {
        Some(fname) => debug!("config loaded from {fname:?}"),
        None => debug!("no config file in {:?}, using defaults", cfile.config_path()),
    }

    let cfg = cfile.into_inner().merge(opts);
    debug!("cfg = {cfg:?}");

    let estimator = TravelTimeEstimator::new(cfg.treatment_speed, cfg.non_treatment_speed)?;
    Ok(Context {
        estimator,
        threshold: cfg.threshold,
    })
}
