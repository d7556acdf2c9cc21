//! Mock API server helpers shared by the fetcher and CLI tests.

use mockito::{Matcher, Mock, ServerGuard};

use crate::api::query::{QueryDescriptor, QueryKey};

/// Match a descriptor path whether or not the server sees the query string.
fn path_matcher(path: &str) -> Matcher {
    let bare = path.split('?').next().unwrap_or(path);
    Matcher::Regex(format!(r"^{}(\?.*)?$", regex::escape(bare)))
}

/// Register one mock per descriptor; `respond` picks each status and body.
pub(crate) async fn mock_endpoints(
    server: &mut ServerGuard,
    plan: &[QueryDescriptor],
    respond: impl Fn(QueryKey) -> (usize, String),
) -> Vec<Mock> {
    let mut mocks = Vec::new();
    for descriptor in plan {
        let (status, body) = respond(descriptor.key);
        let mock = server
            .mock("GET", path_matcher(&descriptor.path))
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;
        mocks.push(mock);
    }
    mocks
}
