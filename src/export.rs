use crate::client::PagerDutyClient;
use crate::csv::AlertCsvWriter;
use crate::error::{Error, Result};
use crate::incidents::{fetch_incidents, was_acknowledged};
use crate::models::{AlertRow, Service, TimeWindow};
use crate::services::resolve_service;
use log::{debug, error, info};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub rows_written: usize,
    /// Queries that matched no service.
    pub unmatched_queries: Vec<String>,
    /// Queries whose service lookup or incident listing failed.
    pub failed_services: Vec<String>,
}

/// Resolves every query, then writes one row per acknowledged incident of
/// each resolved service to `output`, in query order.
///
/// Only failing to create, write the header of, or flush the output file is
/// an error here. Everything per service, per incident and per row is logged
/// and skipped.
pub async fn export_alerts(
    client: &PagerDutyClient,
    queries: &[String],
    window: &TimeWindow,
    output: &Path,
) -> Result<ExportSummary> {
    let mut summary = ExportSummary::default();

    let mut services: Vec<(&str, Service)> = Vec::new();
    for query in queries {
        match resolve_service(client, query).await {
            Ok(service) => services.push((query.as_str(), service)),
            Err(Error::ServiceNotFound(q)) => {
                error!("unable to find any PagerDuty services with '{}' in the name", q);
                summary.unmatched_queries.push(q);
            }
            Err(e) => {
                error!("failed to look up services for '{}' due to {}. Continuing anyways...", query, e);
                summary.failed_services.push(query.clone());
            }
        }
    }

    let mut wtr = AlertCsvWriter::create(output)?;

    for (query, service) in &services {
        info!("Downloading incidents for {}...", service.name);
        if !export_service(client, service, window, &mut wtr).await {
            summary.failed_services.push(query.to_string());
        }
    }

    summary.rows_written = wtr.finish()?;
    Ok(summary)
}

/// Streams one service's incidents into `wtr`. Returns false if the incident
/// listing broke off early.
async fn export_service<W: std::io::Write>(
    client: &PagerDutyClient,
    service: &Service,
    window: &TimeWindow,
    wtr: &mut AlertCsvWriter<W>,
) -> bool {
    let mut incidents = fetch_incidents(client, &service.id, window);
    let mut complete = true;

    while let Some(incident) = incidents.next_item().await {
        let incident = match incident {
            Ok(incident) => incident,
            Err(e) => {
                if let Error::Json(_) = e {
                    error!("skipping unreadable incident of {}: {}", service.name, e);
                } else {
                    error!("failed to get incidents for {} due to {}. Continuing anyways...", service.name, e);
                    complete = false;
                }
                continue;
            }
        };

        match was_acknowledged(client, &incident.id).await {
            Ok(true) => {}
            Ok(false) => {
                debug!("incident {} was never acknowledged, skipping", incident.id);
                continue;
            }
            Err(e) => {
                error!("could not read log entries of incident {} due to {}, leaving it out", incident.id, e);
                continue;
            }
        }

        let written = AlertRow::from_incident(&incident).and_then(|row| wtr.write_row(&row));
        if let Err(e) = written {
            error!("failed to write a row due to {}. Continuing anyways...", e);
        }
    }

    complete
}
