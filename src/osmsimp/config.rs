use crate::osmsimp::{error::Error, overpass};
use clap::ArgMatches;
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 180;

#[derive(Debug, Clone)]
pub struct OverpassConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        OverpassConfig {
            url: overpass::DEFAULT_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub overpass: OverpassConfig,
    /// Directory the menu lists and resolves file names against.
    pub workdir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            overpass: OverpassConfig::default(),
            workdir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Global flags may be given before or after the subcommand.
    pub fn from_matches(matches: &ArgMatches) -> Result<Config, Error> {
        let mut config = Config::default();
        config.apply(matches)?;
        if let (_, Some(sub)) = matches.subcommand() {
            config.apply(sub)?;
        }
        Ok(config)
    }

    fn apply(&mut self, matches: &ArgMatches) -> Result<(), Error> {
        if let Some(url) = matches.value_of("overpass-url") {
            self.overpass.url = url.to_string();
        }
        if let Some(raw) = matches.value_of("timeout") {
            match u64::from_str(raw) {
                Ok(secs) => self.overpass.timeout = Duration::from_secs(secs),
                Err(_) => {
                    eprintln!("Invalid timeout: {:?} - must be a whole number of seconds.", raw);
                    return Err(Error::InvalidNumberFormat);
                }
            }
        }
        if let Some(dir) = matches.value_of("dir") {
            self.workdir = PathBuf::from(dir);
        }
        Ok(())
    }
}

pub fn verbosity(matches: &ArgMatches) -> u64 {
    let sub = match matches.subcommand() {
        (_, Some(m)) => m.occurrences_of("verbose"),
        _ => 0,
    };
    matches.occurrences_of("verbose").max(sub)
}

pub fn log_level(verbosity: u64) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Parses a simplification tolerance; it has to be a finite, non-negative number.
pub fn parse_tolerance(raw: &str) -> Result<f64, Error> {
    match f64::from_str(raw.trim()) {
        Ok(t) if t.is_finite() && t >= 0.0 => Ok(t),
        _ => Err(Error::InvalidTolerance),
    }
}

#[cfg(test)]
mod tests {
    use super::{log_level, parse_tolerance};
    use log::LevelFilter;

    #[test]
    fn tolerance_must_be_non_negative() {
        assert_eq!(0.001, parse_tolerance("0.001").unwrap());
        assert_eq!(0.0, parse_tolerance(" 0\n").unwrap());
        assert!(parse_tolerance("-1").is_err());
        assert!(parse_tolerance("NaN").is_err());
        assert!(parse_tolerance("inf").is_err());
        assert!(parse_tolerance("pizza").is_err());
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(LevelFilter::Warn, log_level(0));
        assert_eq!(LevelFilter::Debug, log_level(2));
        assert_eq!(LevelFilter::Trace, log_level(7));
    }
}
