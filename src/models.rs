use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServiceReference {
    #[serde(default)]
    pub summary: Option<String>,
}

/// Incident as listed by `GET /incidents`. Only `id` is required to decode;
/// the rest is checked when the incident is projected into a row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Incident {
    pub id: String,
    #[serde(default)]
    pub incident_number: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub urgency: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub service: Option<ServiceReference>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Optional `[since, until]` bounds, ISO-8601, passed to the API verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimeWindow {
    pub since: Option<String>,
    pub until: Option<String>,
}

impl TimeWindow {
    pub fn new(since: Option<String>, until: Option<String>) -> Self {
        TimeWindow { since, until }
    }
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRow {
    #[serde(rename = "IncidentNum")]
    pub incident_number: u64,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "ClusterName")]
    pub cluster_name: String,
    #[serde(rename = "AlertName")]
    pub alert_name: String,
    #[serde(rename = "Urgency")]
    pub urgency: String,
    #[serde(rename = "URL")]
    pub url: String,
}

impl AlertRow {
    pub fn from_incident(incident: &Incident) -> Result<Self> {
        let missing = |field| Error::MissingField {
            incident: incident.id.clone(),
            field,
        };

        let summary = incident
            .service
            .as_ref()
            .and_then(|s| s.summary.as_deref())
            .ok_or_else(|| missing("service.summary"))?;
        let title = incident.title.as_deref().ok_or_else(|| missing("title"))?;

        Ok(AlertRow {
            incident_number: incident
                .incident_number
                .ok_or_else(|| missing("incident_number"))?,
            timestamp: incident
                .created_at
                .clone()
                .ok_or_else(|| missing("created_at"))?,
            cluster_name: cluster_name(summary).to_string(),
            alert_name: alert_name(title).to_string(),
            urgency: incident.urgency.clone().ok_or_else(|| missing("urgency"))?,
            url: incident.html_url.clone().ok_or_else(|| missing("html_url"))?,
        })
    }
}

/// `osd-mycluster.abcd.p1.openshiftapps.com` -> `mycluster`
pub fn cluster_name(service_summary: &str) -> &str {
    let name = service_summary
        .strip_prefix("osd-")
        .unwrap_or(service_summary);
    name.split('.').next().unwrap_or(name)
}

/// `APIServerDown (critical)` -> `APIServerDown`
pub fn alert_name(title: &str) -> &str {
    title.split('(').next().unwrap_or(title).trim()
}
