use futures::future::join_all;
use serde_json::Value;

use crate::api::query::{PlanError, QueryDescriptor, QueryKey, build_queries};
use crate::api::{ApiClientError, StatsClient};

// ---------------------------------------------------------------------------
// Result bag
// ---------------------------------------------------------------------------

/// Decoded payloads of one completed fetch cycle, keyed by query.
///
/// Only [`fetch_all`] builds a bag, and only when every planned query
/// succeeded, so a bag never lacks one of the planned keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultBag {
    entries: Vec<(QueryKey, Value)>,
}

impl ResultBag {
    pub fn get(&self, key: QueryKey) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, value)| value)
    }

    pub fn keys(&self) -> impl Iterator<Item = QueryKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Entries in plan order.
    pub fn iter(&self) -> impl Iterator<Item = (QueryKey, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn from_entries(entries: Vec<(QueryKey, Value)>) -> Self {
        Self { entries }
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Aggregate result of one batch: every query succeeded, or the batch failed.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(ResultBag),
    Failure(String),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    pub fn bag(&self) -> Option<&ResultBag> {
        match self {
            FetchOutcome::Success(bag) => Some(bag),
            FetchOutcome::Failure(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Fetching
// ---------------------------------------------------------------------------

/// Issue every descriptor concurrently and reduce the results.
///
/// All requests are started together and awaited together; a single failed
/// request turns the whole batch into [`FetchOutcome::Failure`].
pub async fn fetch_all(client: &StatsClient, descriptors: &[QueryDescriptor]) -> FetchOutcome {
    tracing::info!(queries = descriptors.len(), "fetching batch");

    let requests = descriptors.iter().map(|descriptor| async move {
        let result = client.get_json(&descriptor.path).await;
        (descriptor.key, result)
    });
    let results = join_all(requests).await;

    let outcome = reduce(results);
    match &outcome {
        FetchOutcome::Success(bag) => tracing::info!(payloads = bag.len(), "batch complete"),
        FetchOutcome::Failure(reason) => tracing::warn!(%reason, "batch failed"),
    }
    outcome
}

/// Plan and fetch the dashboard for one username.
pub async fn fetch_for_user(
    client: &StatsClient,
    username: &str,
) -> Result<FetchOutcome, PlanError> {
    let descriptors = build_queries(username)?;
    Ok(fetch_all(client, &descriptors).await)
}

fn reduce(results: Vec<(QueryKey, Result<Value, ApiClientError>)>) -> FetchOutcome {
    let total = results.len();
    let mut entries = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for (key, result) in results {
        match result {
            Ok(value) => entries.push((key, value)),
            Err(e) => {
                tracing::debug!(query = %key, error = %e, "query failed");
                failures.push((key, e));
            }
        }
    }

    match failures.first() {
        Some((key, err)) => FetchOutcome::Failure(format!(
            "{} of {total} requests failed (first: {key}: {err})",
            failures.len()
        )),
        None => FetchOutcome::Success(ResultBag { entries }),
    }
}
