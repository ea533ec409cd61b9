use crate::error::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

pub const DEFAULT_API_URL: &str = "https://api.pagerduty.com";
pub const ACCEPT_HEADER: &str = "application/vnd.pagerduty+json;version=2";

pub const PAGE_LIMIT: usize = 100;
pub const ACKNOWLEDGE_LOG_ENTRY: &str = "acknowledge_log_entry";

pub const MIN_API_KEY_LEN: usize = 20;
pub const DEFAULT_API_KEYFILE: &str = ".pdapikey";
pub const DEFAULT_OUTPUT_PATH: &str = "alerts.csv";

/// Positional argument that switches query input to stdin.
pub const STDIN_MARKER: &str = "-";

/// PagerDuty REST API key. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Reads the key from the first line of `path`, trimmed.
    ///
    /// Fails when the file can't be read or the key is shorter than
    /// [`MIN_API_KEY_LEN`] characters.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let key = contents.lines().next().unwrap_or_default().trim();

        let len = key.chars().count();
        if len < MIN_API_KEY_LEN {
            return Err(Error::BadApiKey {
                path: path.to_path_buf(),
                len,
                min: MIN_API_KEY_LEN,
            });
        }

        Ok(ApiKey(key.to_string()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Expands the positional service names into the list of queries to run.
///
/// A single `-` reads newline-separated names from `stdin` until the first
/// blank line or end of input. Anything else is returned as given.
pub fn service_queries<R: BufRead>(args: Vec<String>, stdin: R) -> io::Result<Vec<String>> {
    if !(args.len() == 1 && args[0] == STDIN_MARKER) {
        return Ok(args);
    }

    let mut queries = Vec::new();
    for line in stdin.lines() {
        let line = line?;
        let name = line.trim();
        if name.is_empty() {
            break;
        }
        queries.push(name.to_string());
    }
    Ok(queries)
}

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S%.f"];

/// Checks that `s` is an ISO-8601 date or datetime and keeps it as typed.
///
/// Accepts `2023-01-01`, minute or second precision with optional fractional
/// seconds, and an optional `Z`, `+HH:MM`, `+HHMM` or `+HH` offset.
pub fn parse_timestamp(s: &str) -> std::result::Result<String, String> {
    let local = strip_utc_offset(s);
    let valid = NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        || DATETIME_FORMATS
            .iter()
            .any(|format| NaiveDateTime::parse_from_str(local, format).is_ok());

    if valid {
        Ok(s.to_string())
    } else {
        Err(format!("'{}' is not an ISO-8601 date or datetime", s))
    }
}

fn strip_utc_offset(s: &str) -> &str {
    if let Some(local) = s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        return local;
    }

    for len in [6, 5, 3] {
        let Some(split) = s.len().checked_sub(len) else {
            continue;
        };
        if !s.is_char_boundary(split) {
            continue;
        }
        let (local, offset) = s.split_at(split);
        if local.contains('T') && is_utc_offset(offset) {
            return local;
        }
    }
    s
}

fn is_utc_offset(offset: &str) -> bool {
    let bytes = offset.as_bytes();
    let digits_ok = |range: &[u8]| range.iter().all(u8::is_ascii_digit);

    matches!(bytes.first(), Some(b'+') | Some(b'-'))
        && match bytes.len() {
            6 => bytes[3] == b':' && digits_ok(&bytes[1..3]) && digits_ok(&bytes[4..]),
            5 | 3 => digits_ok(&bytes[1..]),
            _ => false,
        }
}
