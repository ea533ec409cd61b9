use crate::client::PagerDutyClient;
use crate::error::{Error, Result};
use crate::models::Service;
use futures::{future, StreamExt, TryStreamExt};
use log::{debug, warn};

/// Resolves a (partial) service name to a single PagerDuty service.
///
/// All matching pages are drained and matches that fail to decode are
/// skipped. With several matches the first one in API order wins and a
/// warning is logged; which duplicate that is isn't guaranteed. No match at all is [`Error::ServiceNotFound`].
pub async fn resolve_service(client: &PagerDutyClient, query: &str) -> Result<Service> {
    let params = vec![("query".to_string(), query.to_string())];
    let mut matches: Vec<Service> = client
        .paginate::<Service>("services", "services", params)
        .into_stream()
        .filter(|item| {
            let readable = match item {
                Err(Error::Json(e)) => {
                    debug!("skipping unreadable service matching '{}': {}", query, e);
                    false
                }
                _ => true,
            };
            future::ready(readable)
        })
        .try_collect()
        .await?;

    if matches.is_empty() {
        return Err(Error::ServiceNotFound(query.to_string()));
    }
    if matches.len() > 1 {
        warn!(
            "found {} PagerDuty services with '{}' in their name, defaulting to the first one ({})",
            matches.len(),
            query,
            matches[0].name
        );
    }

    Ok(matches.swap_remove(0))
}
