//! This library is there to share some common code amongst all treatpath modules.
//!
//! - `ConfigFile` is the versioned HCL configuration loader,
//! - `init_logging()` sets up `tracing` for the binaries.
//!

mod macros;

mod config;
mod logging;

use clap::{crate_name, crate_version};
pub use config::*;
pub use logging::*;

const NAME: &str = crate_name!();
const VERSION: &str = crate_version!();

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
