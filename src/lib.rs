/// # Modules Overview
///
/// This crate exports human-acknowledged PagerDuty incidents for one or more
/// services into a CSV report, restricted to an optional time window.

/// `client`
///
/// Thin PagerDuty REST client. Handles authentication headers and the
/// offset/limit pagination every listing endpoint shares, exposed as a lazy
/// `Paginator` that fetches one page at a time.
///
/// Example usage:
/// ```rust,ignore
/// let client = client::PagerDutyClient::with_base_url(&api_key, config::DEFAULT_API_URL)?;
/// let mut services = client.paginate::<models::Service>("services", "services", params);
/// while let Some(service) = services.next_item().await { /* ... */ }
/// ```
pub mod client;

/// `config`
///
/// Constants, API key loading and reading service queries from the command
/// line or stdin.
pub mod config;

/// `csv`
///
/// `AlertCsvWriter` writes `AlertRow`s under the fixed
/// `IncidentNum,Timestamp,ClusterName,AlertName,Urgency,URL` header.
///
/// Example usage:
/// ```rust,ignore
/// let mut wtr = csv::AlertCsvWriter::create("alerts.csv")?;
/// wtr.write_row(&row)?;
/// let count = wtr.finish()?;
/// ```
pub mod csv;

pub mod error;

/// `export`
///
/// The whole run: resolve each query, stream the service's incidents, keep the
/// acknowledged ones and write them out. Per-service, per-incident and per-row
/// failures are logged and skipped.
pub mod export;

/// `incidents`
///
/// Lists a service's incidents in a time window and checks an incident's log
/// entries for an acknowledgement.
pub mod incidents;

/// `models`
///
/// Defines the API records and the report row:
/// * `Service`, `Incident`, `LogEntry` – PagerDuty resources as decoded from JSON.
/// * `TimeWindow` – optional `since`/`until` bounds.
/// * `AlertRow` – one CSV line, built with `AlertRow::from_incident`.
pub mod models;

/// `services`
///
/// Maps a partial service name to one concrete PagerDuty service.
pub mod services;

pub use error::{Error, Result};
