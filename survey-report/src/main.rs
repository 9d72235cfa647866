//! Utility reporting on a recorded treatment survey.
//!
//! It loads a survey (JSON, see `treatpath-survey`), splits it into lead-in, rows, turns and
//! lead-out, groups the treatment points into runs and prints the ideal travel times for the
//! treatment and non-treatment parts of the path.
//!
//! ```bash
//! $ survey-report -t 0.23 -n 0.5 report map.json
//! $ survey-report report --json map.json > map-report.json
//! $ survey-report track --fixes fixes.csv map.json
//! ```
//!
//! Speeds and tracking threshold can also be set in `$HOME/.config/treatpath/survey-report.hcl`.
//!

use clap::{crate_authors, crate_version, Parser};
use eyre::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use tracing::{info, trace};

use treatpath_common::init_logging;
use treatpath_survey::{Fix, Survey, SurveyReport, TrackRecord, Tracker};

use crate::cli::{Opts, ReportOpts, SubCommand, TrackOpts};
use crate::config::{init_runtime, Context};
use crate::error::Status;

mod cli;
mod config;
mod error;

/// Binary name, using a different binary name
pub const NAME: &str = env!("CARGO_BIN_NAME");
/// Binary version
pub const VERSION: &str = crate_version!();
/// Authors
pub const AUTHORS: &str = crate_authors!();

fn main() -> Result<()> {
    let opts = Opts::parse();

    // Initialise logging early
    //
    init_logging(NAME, opts.use_tree, opts.use_file.clone())?;
    trace!("Logging initialised.");

    trace!("Execute commands.");
    match &opts.subcmd {
        SubCommand::Report(ropts) => {
            let ctx = init_runtime(&opts)?;
            report(&ctx, ropts)?;
        }
        SubCommand::Track(topts) => {
            let ctx = init_runtime(&opts)?;
            track(&ctx, topts)?;
        }
        SubCommand::Version => {
            println!("{} v{} by {}", NAME, VERSION, AUTHORS);
            println!("{}", treatpath_common::version());
        }
    }
    Ok(())
}

/// Compute and print the full report.
///
#[tracing::instrument(skip(ctx))]
fn report(ctx: &Context, ropts: &ReportOpts) -> Result<()> {
    let survey = Survey::load(&ropts.file)?;
    info!("{} points loaded from {}", survey.len(), ropts.file);

    let report = SurveyReport::compute(&survey, &ctx.estimator);
    if ropts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{report}");
    }
    Ok(())
}

/// Read `time,longitude,latitude` records.
///
fn read_fixes(fname: &str) -> Result<Vec<Fix>> {
    let bad = |source| Status::BadFixes {
        path: fname.to_string(),
        source,
    };

    let mut rdr = csv::Reader::from_path(fname).map_err(bad)?;
    let fixes = rdr
        .deserialize()
        .collect::<Result<Vec<Fix>, _>>()
        .map_err(bad)?;
    Ok(fixes)
}

/// Replay fixes through the tracker and print its log.
///
#[tracing::instrument(skip(ctx))]
fn track(ctx: &Context, topts: &TrackOpts) -> Result<()> {
    let survey = Survey::load(&topts.file)?;
    let fixes = read_fixes(&topts.fixes)?;
    let total = fixes.len();

    let mut tracker = Tracker::new(&survey).with_threshold(ctx.threshold)?;
    let captured = tracker.replay(fixes);
    info!("{captured}/{total} fixes captured");

    let log = tracker.drain();
    if topts.json {
        println!("{}", serde_json::to_string_pretty(&log)?);
    } else {
        println!("{captured}/{total} fixes captured:\n{}", log_table(&log));
    }
    Ok(())
}

fn log_table(log: &[TrackRecord]) -> String {
    let mut builder = Builder::default();
    builder.push_record(vec![
        "Time".to_string(),
        "Point".to_string(),
        "Section".to_string(),
    ]);
    log.iter().for_each(|r| {
        builder.push_record(vec![
            r.timestamp.to_rfc3339(),
            r.point_index.to_string(),
            r.section.to_string(),
        ]);
    });
    builder.build().with(Style::modern()).to_string()
}
