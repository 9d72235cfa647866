use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};

#[derive(Debug, Parser)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// Configuration file (default is $HOME/.config/treatpath/survey-report.hcl).
    #[clap(short = 'c', long)]
    pub config: Option<String>,
    /// Speed inside the treatment area (m/s).
    #[clap(short = 't', long, allow_negative_numbers = true)]
    pub treatment_speed: Option<f64>,
    /// Speed outside the treatment area (m/s).
    #[clap(short = 'n', long, allow_negative_numbers = true)]
    pub non_treatment_speed: Option<f64>,
    /// Capture distance for tracking.
    #[clap(long)]
    pub threshold: Option<f64>,
    /// Hierarchical output for traces.
    #[clap(long)]
    pub use_tree: bool,
    /// Also log into hourly files in that directory.
    #[clap(long)]
    pub use_file: Option<String>,
    /// Sub-commands (see below).
    #[clap(subcommand)]
    pub subcmd: SubCommand,
}

#[derive(Debug, Parser)]
pub enum SubCommand {
    /// Segment distances and ideal travel times.
    Report(ReportOpts),
    /// Replay recorded fixes against a survey.
    Track(TrackOpts),
    /// List all package versions.
    Version,
}

#[derive(Debug, Parser)]
pub struct ReportOpts {
    /// Output the full report as JSON, including coordinates.
    #[clap(short = 'J', long)]
    pub json: bool,
    /// Survey file.
    pub file: String,
}

#[derive(Debug, Parser)]
pub struct TrackOpts {
    /// CSV file with `time,longitude,latitude` fixes.
    #[clap(short = 'f', long)]
    pub fixes: String,
    /// Output the log as JSON.
    #[clap(short = 'J', long)]
    pub json: bool,
    /// Survey file.
    pub file: String,
}
