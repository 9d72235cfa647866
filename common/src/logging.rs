//! Common logging initializer
//!
//! Filters come from `RUST_LOG`, output goes either through the hierarchical `tracing-tree`
//! layer or a compact `fmt` layer on stderr, with an optional hourly rolling file on top.
//!

use eyre::{eyre, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_tree::HierarchicalLayer;

/// Initialise logging for the binary `name`.
///
/// May only be called once per process.
///
pub fn init_logging(name: &'static str, use_tree: bool, use_file: Option<String>) -> Result<()> {
    // Load filters from environment
    //
    let filter = EnvFilter::from_default_env();

    // Do we want hierarchical output?
    //
    let (tree, plain) = if use_tree {
        let tree = HierarchicalLayer::new(2)
            .with_ansi(true)
            .with_span_retrace(true)
            .with_span_modes(true)
            .with_targets(true)
            .with_verbose_entry(true)
            .with_verbose_exit(true)
            .with_bracketed_fields(true);
        (Some(tree), None)
    } else {
        let plain = tracing_subscriber::fmt::layer()
            .compact()
            .with_writer(std::io::stderr);
        (None, Some(plain))
    };

    // Log to file?
    //
    let file = use_file.map(|dir| {
        // Basic append-only rolling file for all traces.
        //
        let file_appender = tracing_appender::rolling::hourly(dir, name);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
    });

    // Combine filters & exporters
    //
    tracing_subscriber::registry()
        .with(filter)
        .with(tree)
        .with(plain)
        .with(file)
        .try_init()
        .map_err(|e| eyre!("can not initialise logging for {name}: {e}"))?;

    Ok(())
}
