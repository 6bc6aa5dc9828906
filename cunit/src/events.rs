//! Diagnostic tracing setup.

use std::{collections::HashSet, fmt::Display};

use tracing_subscriber::{Layer, filter::Targets, layer::SubscriberExt, util::SubscriberInitExt};

/// Type of event to trace.
#[derive(Clone, Debug, Eq, Hash, PartialEq, clap::ValueEnum)]
pub enum TraceEvent {
    /// Traces which files are accepted or rejected as test sources.
    #[clap(name = "discover")]
    Discover,
    /// Traces test executable runs.
    #[clap(name = "exec")]
    Exec,
    /// Traces parsing of test executable output.
    #[clap(name = "parse")]
    Parse,
}

impl Display for TraceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discover => write!(f, "discover"),
            Self::Exec => write!(f, "exec"),
            Self::Parse => write!(f, "parse"),
        }
    }
}

/// The set of enabled trace events.
#[derive(Debug, Default)]
pub struct TraceEventConfig {
    enabled_trace_events: HashSet<TraceEvent>,
}

impl TraceEventConfig {
    /// Installs a global subscriber logging to stderr with the given events enabled.
    pub fn init(enabled_log_events: &[TraceEvent]) -> Self {
        let config = Self {
            enabled_trace_events: enabled_log_events.iter().cloned().collect(),
        };

        let layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .without_time()
            .with_target(false)
            .with_filter(config.compose_filter());

        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            // Something went wrong; proceed on anyway but complain audibly.
            eprintln!("warning: failed to initialize tracing.");
        }

        config
    }

    /// Builds the target filter: INFO by default, finer for enabled events.
    pub fn compose_filter(&self) -> Targets {
        let mut filter =
            Targets::new().with_default(tracing_subscriber::filter::LevelFilter::INFO);

        for event in &self.enabled_trace_events {
            let (target, level) = match event {
                TraceEvent::Discover => ("discover", tracing::Level::TRACE),
                TraceEvent::Exec => ("exec", tracing::Level::DEBUG),
                TraceEvent::Parse => ("parse", tracing::Level::TRACE),
            };

            filter = filter.with_target(target, level);
        }

        filter
    }

    /// Returns the events enabled at startup.
    pub const fn get_enabled_events(&self) -> &HashSet<TraceEvent> {
        &self.enabled_trace_events
    }
}
