use std::fmt;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use thiserror::Error;

/// Percent-encoding set for usernames (encode everything except unreserved chars).
const USERNAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

fn encode_username(s: &str) -> String {
    utf8_percent_encode(s, USERNAME_ENCODE_SET).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("username is empty")]
    BlankUsername,
}

/// The closed set of queries issued for one dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QueryKey {
    Profile,
    Badges,
    Solved,
    Contest,
    ContestHistory,
    Submission,
    AcSubmission,
    Calendar,
    LangStats,
    SkillStats,
    Ranking,
    DailyQuestion,
}

impl QueryKey {
    /// Every query, in plan order.
    pub const ALL: [QueryKey; 12] = [
        QueryKey::Profile,
        QueryKey::Badges,
        QueryKey::Solved,
        QueryKey::Contest,
        QueryKey::ContestHistory,
        QueryKey::Submission,
        QueryKey::AcSubmission,
        QueryKey::Calendar,
        QueryKey::LangStats,
        QueryKey::SkillStats,
        QueryKey::Ranking,
        QueryKey::DailyQuestion,
    ];

    pub fn name(self) -> &'static str {
        match self {
            QueryKey::Profile => "profile",
            QueryKey::Badges => "badges",
            QueryKey::Solved => "solved",
            QueryKey::Contest => "contest",
            QueryKey::ContestHistory => "contestHistory",
            QueryKey::Submission => "submission",
            QueryKey::AcSubmission => "acSubmission",
            QueryKey::Calendar => "calendar",
            QueryKey::LangStats => "langStats",
            QueryKey::SkillStats => "skillStats",
            QueryKey::Ranking => "ranking",
            QueryKey::DailyQuestion => "dailyQuestion",
        }
    }

    /// Resolve the endpoint path; `user` must already be percent-encoded.
    fn path(self, user: &str) -> String {
        match self {
            QueryKey::Profile => format!("/userProfile/{user}"),
            QueryKey::Badges => format!("/{user}/badges"),
            QueryKey::Solved => format!("/{user}/solved"),
            QueryKey::Contest => format!("/{user}/contest"),
            QueryKey::ContestHistory => format!("/{user}/contest/history"),
            QueryKey::Submission => format!("/{user}/submission"),
            QueryKey::AcSubmission => format!("/{user}/acSubmission"),
            QueryKey::Calendar => format!("/{user}/calendar"),
            QueryKey::LangStats => format!("/languageStats?username={user}"),
            QueryKey::SkillStats => format!("/skillStats/{user}"),
            QueryKey::Ranking => format!("/userContestRankingInfo/{user}"),
            QueryKey::DailyQuestion => "/dailyQuestion".to_string(),
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named plan for one query, independent of execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub key: QueryKey,
    pub path: String,
}

impl QueryDescriptor {
    pub fn name(&self) -> &'static str {
        self.key.name()
    }
}

/// Build the fixed query plan for a username.
///
/// Blank usernames are rejected here so that no request is ever issued for
/// them. The username is trimmed and percent-encoded before templating.
pub fn build_queries(username: &str) -> Result<Vec<QueryDescriptor>, PlanError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(PlanError::BlankUsername);
    }

    let encoded = encode_username(username);
    Ok(QueryKey::ALL
        .iter()
        .map(|&key| QueryDescriptor {
            key,
            path: key.path(&encoded),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn plans_every_query_once() {
        let plan = build_queries("alice").unwrap();
        assert_eq!(plan.len(), QueryKey::ALL.len());

        let names: HashSet<_> = plan.iter().map(|d| d.name()).collect();
        assert_eq!(names.len(), plan.len());
    }

    #[test]
    fn resolves_path_templates() {
        let plan = build_queries("alice").unwrap();
        let path = |key: QueryKey| {
            plan.iter()
                .find(|d| d.key == key)
                .map(|d| d.path.as_str())
                .unwrap()
        };

        assert_eq!(path(QueryKey::Profile), "/userProfile/alice");
        assert_eq!(path(QueryKey::ContestHistory), "/alice/contest/history");
        assert_eq!(path(QueryKey::LangStats), "/languageStats?username=alice");
        assert_eq!(path(QueryKey::Ranking), "/userContestRankingInfo/alice");
    }

    #[test]
    fn daily_question_ignores_username() {
        let daily = |user: &str| {
            build_queries(user)
                .unwrap()
                .into_iter()
                .find(|d| d.key == QueryKey::DailyQuestion)
                .unwrap()
                .path
        };
        assert_eq!(daily("alice"), daily("bob"));
        assert_eq!(daily("alice"), "/dailyQuestion");
    }

    #[test]
    fn rejects_blank_username() {
        assert_eq!(build_queries(""), Err(PlanError::BlankUsername));
        assert_eq!(build_queries("   \t"), Err(PlanError::BlankUsername));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let plan = build_queries("  alice ").unwrap();
        assert_eq!(plan[0].path, "/userProfile/alice");
    }

    #[test]
    fn encodes_unsafe_characters() {
        let plan = build_queries("a b/c?x=1&y").unwrap();
        assert_eq!(plan[1].path, "/a%20b%2Fc%3Fx%3D1%26y/badges");
        assert_eq!(
            plan[8].path,
            "/languageStats?username=a%20b%2Fc%3Fx%3D1%26y"
        );
    }

    #[test]
    fn keeps_unreserved_characters() {
        let plan = build_queries("jane_doe-1.0~x").unwrap();
        assert_eq!(plan[2].path, "/jane_doe-1.0~x/solved");
    }
}
