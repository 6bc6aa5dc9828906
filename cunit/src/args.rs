use clap::Parser;
use cunit_harness::TestOptions;
use std::path::PathBuf;

use crate::{events, productinfo};

const SHORT_DESCRIPTION: &str = "Runs native unit-test executables and reports their results";

const LONG_DESCRIPTION: &str = r"
cunit finds native test sources (by default, test*.c), runs the executable compiled
next to each one (the same path without the extension), and reports every [PASS] and
[FAIL] line the executable prints as its own test item.

The executables must already be built; cunit only runs them.
";

/// Parsed command-line arguments.
#[derive(Parser, Debug)]
#[clap(name = productinfo::PRODUCT_NAME,
       version = productinfo::VERSION,
       about = SHORT_DESCRIPTION,
       long_about = LONG_DESCRIPTION,
       disable_help_flag = true,
       disable_version_flag = true)]
pub struct CommandLineArgs {
    /// Display usage information.
    #[clap(long = "help", action = clap::ArgAction::HelpLong)]
    pub help: Option<bool>,

    /// Display version.
    #[clap(long = "version", action = clap::ArgAction::Version)]
    pub version: Option<bool>,

    /// Path to a config file to load instead of the default ones.
    #[clap(long = "config", value_name = "FILE", env = "CUNIT_CONFIG")]
    pub config_file: Option<PathBuf>,

    /// Don't load any config file.
    #[clap(long = "no-config")]
    pub no_config: bool,

    /// Extension of native test sources [default: c].
    #[clap(long = "extension", value_name = "EXT")]
    pub extension: Option<String>,

    /// Required file name prefix of native test sources [default: test].
    #[clap(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Enable debug logging for classes of tracing events.
    #[clap(long = "log-enable", value_name = "EVENT")]
    pub enabled_log_events: Vec<events::TraceEvent>,

    /// Options controlling which items run and how results are reported.
    #[clap(flatten)]
    pub test_options: TestOptions,

    /// Files and directories to search for test sources [default: .].
    #[clap(value_name = "PATH")]
    pub paths: Vec<PathBuf>,
}
