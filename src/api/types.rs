//! Typed views over the aggregation API's payloads.
//!
//! The API's JSON shapes are assumed, never guaranteed. Every field below is
//! optional and decoded leniently: a missing field, a `null`, or a value of
//! the wrong type all become `None` instead of failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a raw payload, falling back to an all-`None` value when the
/// payload is not even an object.
pub fn decode<T: DeserializeOwned + Default>(value: &Value) -> T {
    match value {
        Value::Object(_) => T::deserialize(value).unwrap_or_default(),
        _ => T::default(),
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoders
// ---------------------------------------------------------------------------

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    // Arrays would otherwise be accepted as the positional form of a struct.
    match Value::deserialize(deserializer)? {
        Value::Array(_) => Ok(None),
        value => Ok(T::deserialize(value).ok()),
    }
}

/// A JSON array decodes item by item; items that are not objects become
/// `T::default()` so list positions are preserved.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(_) => T::deserialize(item).unwrap_or_default(),
                    _ => T::default(),
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Counts arrive as numbers, but some endpoints send numeric strings.
fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Whole-second epoch timestamps, as a number or a numeric string.
fn lenient_epoch<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePayload {
    #[serde(default, deserialize_with = "lenient")]
    pub profile: Option<Profile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, deserialize_with = "lenient")]
    pub real_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub user_avatar: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub ranking: Option<u64>,
    #[serde(default, deserialize_with = "lenient")]
    pub country_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Badges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BadgesPayload {
    #[serde(default, deserialize_with = "lenient_list")]
    pub badges: Option<Vec<Badge>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    #[serde(default, deserialize_with = "lenient")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub icon: Option<String>,
}

// ---------------------------------------------------------------------------
// Solved counts and contest rating
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolvedPayload {
    #[serde(default, deserialize_with = "lenient_u64")]
    pub easy_solved: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub medium_solved: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub hard_solved: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestPayload {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub contest_rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub contest_global_ranking: Option<u64>,
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

/// Shared by the general and accepted-only submission endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionsPayload {
    #[serde(default, deserialize_with = "lenient_list")]
    pub submission: Option<Vec<Submission>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status_display: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub lang: Option<String>,
    #[serde(default, deserialize_with = "lenient_epoch")]
    pub timestamp: Option<i64>,
}

// ---------------------------------------------------------------------------
// Language and skill breakdowns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageStatsPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub matched_user: Option<LanguageUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageUser {
    #[serde(default, deserialize_with = "lenient_list")]
    pub language_problem_count: Option<Vec<LanguageCount>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageCount {
    #[serde(default, deserialize_with = "lenient")]
    pub language_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub problems_solved: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillStatsPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub matched_user: Option<SkillUser>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillUser {
    #[serde(default, deserialize_with = "lenient")]
    pub tag_problem_counts: Option<TagProblemCounts>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagProblemCounts {
    #[serde(default, deserialize_with = "lenient_list")]
    pub fundamental: Option<Vec<TagCount>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub intermediate: Option<Vec<TagCount>>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub advanced: Option<Vec<TagCount>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    #[serde(default, deserialize_with = "lenient")]
    pub tag_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub problems_solved: Option<u64>,
}

// ---------------------------------------------------------------------------
// Daily question
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuestionPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub active_daily_coding_challenge_question: Option<DailyChallenge>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyChallenge {
    #[serde(default, deserialize_with = "lenient")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub question: Option<Question>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub difficulty: Option<String>,
}
