use std::convert::From;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum Error {
    UnknownCommand,
    MissingArgument,
    InvalidNumberFormat,
    InvalidTolerance,
    FileNotFound(PathBuf),
    IOError,
    JSONParseError,
    InvalidGeoJSON,
    HTTPError,
    OverpassStatus(u16),
    EmptyQuery,
    UnsupportedOutputFormat(String),
}

impl From<io::Error> for Error {
    fn from(_: io::Error) -> Self {
        Error::IOError
    }
}

impl From<serde_json::Error> for Error {
    fn from(_: serde_json::Error) -> Self {
        Error::JSONParseError
    }
}

impl From<geojson::Error> for Error {
    fn from(e: geojson::Error) -> Self {
        log::debug!("GeoJSON error: {}", e);
        Error::InvalidGeoJSON
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        log::debug!("HTTP error: {}", e);
        Error::HTTPError
    }
}
