//! Implements the command-line interface for `cunit`.

mod args;
mod config;
mod events;
mod productinfo;

use crate::args::CommandLineArgs;
use clap::Parser;
use cunit_harness::TestRunner;

/// Main entry point for `cunit`.
fn main() {
    //
    // Set up panic handler. On release builds, it will capture panic details to a
    // temporary .toml file and report a human-readable message to the screen.
    //
    human_panic::setup_panic!(
        human_panic::Metadata::new(env!("CARGO_BIN_NAME"), env!("CARGO_PKG_VERSION"))
            .homepage(productinfo::PRODUCT_DISPLAY_URI)
    );

    let args = CommandLineArgs::parse();

    let exit_code = match run(&args) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(e) => {
            tracing::error!("error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

/// Runs all tests described by the arguments and config file. Returns whether
/// every collected item passed.
fn run(args: &CommandLineArgs) -> anyhow::Result<bool> {
    let event_config = events::TraceEventConfig::init(&args.enabled_log_events);
    tracing::debug!(
        "enabled trace events: {:?}",
        event_config.get_enabled_events()
    );

    let loaded = config::load_config(args.no_config, args.config_file.as_deref());
    if let Some(error) = loaded.error {
        let path = loaded
            .path
            .as_deref()
            .map_or_else(String::new, |p| p.display().to_string());

        if loaded.explicit_path {
            return Err(anyhow::Error::new(error).context(path));
        }

        tracing::warn!("{path}: {error}; using defaults");
    } else if let Some(path) = &loaded.path {
        tracing::debug!("loaded config from {}", path.display());
    }

    let (runner_config, options) = loaded.config.to_runner_settings(args);

    let runner = TestRunner::new(runner_config, options);
    runner.run()
}
