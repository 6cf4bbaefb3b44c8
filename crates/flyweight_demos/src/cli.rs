//! Shared command-line handling for the demo binaries.
//!
//! Both binaries take the same arguments:
//!
//! ```bash
//! forest [-v | --verbose] [SCENARIO.toml]
//! ```

use std::path::PathBuf;

use flyweight_core::{FlyweightError, FlyweightResult};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::ScenarioConfig;

/// Parsed command-line options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Scenario file; the bundled scenario is used when absent.
    pub scenario: Option<PathBuf>,
    /// Log pool hits and misses.
    pub verbose: bool,
}

impl Options {
    /// Parses arguments (without the program name).
    ///
    /// # Errors
    ///
    /// Returns [`FlyweightError::Config`] on an unknown flag or a second
    /// scenario path.
    pub fn parse<I, T>(args: I) -> FlyweightResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut options = Self::default();
        for arg in args {
            let arg: String = arg.into();
            if arg == "-v" || arg == "--verbose" {
                options.verbose = true;
            } else if arg.starts_with('-') {
                return Err(FlyweightError::Config(format!("unknown flag: {arg}")));
            } else if options.scenario.is_some() {
                return Err(FlyweightError::Config(format!("unexpected argument: {arg}")));
            } else {
                options.scenario = Some(PathBuf::from(arg));
            }
        }
        Ok(options)
    }

    /// Loads the selected scenario.
    ///
    /// # Errors
    ///
    /// Returns any error from reading or parsing the scenario.
    pub fn load_scenario(&self) -> FlyweightResult<ScenarioConfig> {
        match &self.scenario {
            Some(path) => ScenarioConfig::load(path),
            None => ScenarioConfig::builtin(),
        }
    }

    /// Installs the global log subscriber, writing to stderr.
    pub fn init_tracing(&self) {
        let level = if self.verbose { Level::DEBUG } else { Level::INFO };

        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .finish();

        if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
            eprintln!("Failed to set tracing subscriber: {e}");
        }
    }
}
