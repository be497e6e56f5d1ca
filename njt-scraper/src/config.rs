//! Runtime configuration.
//!
//! Every setting has a default; environment variables override them:
//!
//! | Variable                  | Meaning                                  |
//! |---------------------------|------------------------------------------|
//! | `NJT_OUTPUT_DIR`          | Directory the CSV/JSON files go to       |
//! | `NJT_STATION_SOURCE`      | `rendered` (default) or `static`         |
//! | `NJT_PACING_MS`           | Delay between station fetches            |
//! | `NJT_CHROME_PATH`         | Chrome/Chromium executable               |
//! | `NJT_RENDER_TIMEOUT_SECS` | How long to wait for a page to render    |
//! | `NJT_FAQ_OVERRIDES`       | JSON file of extra FAQ answer overrides  |

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::stations::StationSource;

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be used
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// Unrecognized command-line command
    #[error("unknown command {0:?} (expected departures, faqs or all)")]
    UnknownCommand(String),
}

/// What a run should scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Command {
    #[default]
    Departures,
    Faqs,
    All,
}

impl Command {
    /// Parse the first command-line argument, if any.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Result<Self, ConfigError> {
        match args.next() {
            Some(arg) => arg.parse(),
            None => Ok(Command::default()),
        }
    }

    pub fn scrapes_departures(self) -> bool {
        matches!(self, Command::Departures | Command::All)
    }

    pub fn scrapes_faqs(self) -> bool {
        matches!(self, Command::Faqs | Command::All)
    }
}

impl FromStr for Command {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "departures" => Ok(Command::Departures),
            "faqs" | "faq" => Ok(Command::Faqs),
            "all" => Ok(Command::All),
            _ => Err(ConfigError::UnknownCommand(s.to_string())),
        }
    }
}

/// Settings for one scraper run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScraperConfig {
    pub output_dir: PathBuf,
    pub station_source: StationSource,
    /// Delay between consecutive station fetches.
    pub pacing: Duration,
    /// Browser executable; auto-detected when `None`.
    pub chrome_executable: Option<PathBuf>,
    /// Upper bound on waiting for a rendered page's ready signal.
    pub render_timeout: Duration,
    /// Extra FAQ answer overrides layered over the built-in ones.
    pub faq_overrides: Option<PathBuf>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            station_source: StationSource::Rendered,
            pacing: Duration::from_secs(2),
            chrome_executable: None,
            render_timeout: Duration::from_secs(10),
            faq_overrides: None,
        }
    }
}

impl ScraperConfig {
    /// Defaults overridden by `NJT_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get("NJT_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        if let Some(value) = get("NJT_STATION_SOURCE") {
            config.station_source = value.parse().map_err(|reason| ConfigError::Invalid {
                var: "NJT_STATION_SOURCE",
                value: value.clone(),
                reason,
            })?;
        }

        if let Some(value) = get("NJT_PACING_MS") {
            config.pacing = Duration::from_millis(parse_number("NJT_PACING_MS", &value)?);
        }

        if let Some(path) = get("NJT_CHROME_PATH") {
            config.chrome_executable = Some(PathBuf::from(path));
        }

        if let Some(value) = get("NJT_RENDER_TIMEOUT_SECS") {
            let secs = parse_number("NJT_RENDER_TIMEOUT_SECS", &value)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: "NJT_RENDER_TIMEOUT_SECS",
                    value,
                    reason: "must be at least 1".to_string(),
                });
            }
            config.render_timeout = Duration::from_secs(secs);
        }

        if let Some(path) = get("NJT_FAQ_OVERRIDES") {
            config.faq_overrides = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
