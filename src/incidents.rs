use crate::client::{PagerDutyClient, Paginator};
use crate::config::ACKNOWLEDGE_LOG_ENTRY;
use crate::error::{Error, Result};
use log::debug;
use crate::models::{Incident, LogEntry, TimeWindow};

/// Incidents of one service inside `window`, with timestamps in UTC.
pub fn fetch_incidents<'a>(
    client: &'a PagerDutyClient,
    service_id: &str,
    window: &TimeWindow,
) -> Paginator<'a, Incident> {
    let mut params = vec![
        ("service_ids[]".to_string(), service_id.to_string()),
        ("time_zone".to_string(), "UTC".to_string()),
    ];
    if let Some(since) = &window.since {
        params.push(("since".to_string(), since.clone()));
    }
    if let Some(until) = &window.until {
        params.push(("until".to_string(), until.clone()));
    }

    client.paginate("incidents", "incidents", params)
}

/// True if any log entry of the incident is a human acknowledgement.
///
/// Stops fetching log pages as soon as one is found. Entries that fail to
/// decode are skipped; a failed page fetch is returned so the caller can tell
/// "unknown" from "not acknowledged".
pub async fn was_acknowledged(client: &PagerDutyClient, incident_id: &str) -> Result<bool> {
    let mut entries: Paginator<'_, LogEntry> = client.paginate(
        format!("incidents/{}/log_entries", incident_id),
        "log_entries",
        Vec::new(),
    );

    while let Some(entry) = entries.next_item().await {
        match entry {
            Ok(entry) if entry.kind == ACKNOWLEDGE_LOG_ENTRY => return Ok(true),
            Ok(_) => {}
            Err(Error::Json(e)) => {
                debug!("skipping unreadable log entry of incident {}: {}", incident_id, e);
            }
            Err(e) => return Err(e),
        }
    }
    Ok(false)
}
