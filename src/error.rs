use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("invalid API key header: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("PagerDuty API returned {status} for {path}: {body}")]
    Api {
        status: StatusCode,
        path: String,
        body: String,
    },
    #[error("malformed PagerDuty response for {path}: {reason}")]
    MalformedPage { path: String, reason: &'static str },
    #[error("bad PagerDuty API key in {}: expected at least {min} characters, found {len}", path.display())]
    BadApiKey {
        path: PathBuf,
        len: usize,
        min: usize,
    },
    #[error("unable to find any PagerDuty services with '{0}' in the name")]
    ServiceNotFound(String),
    #[error("incident {incident} is missing `{field}`")]
    MissingField {
        incident: String,
        field: &'static str,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
