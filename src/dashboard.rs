//! Section model derived from a fetch outcome.
//!
//! Each section reads one bag key, walks a fixed path of optional fields and
//! is dropped when the data it needs is missing. Nothing here can fail: an
//! absent or oddly typed field only removes the section (or list item) that
//! depended on it.

use chrono::{DateTime, Local, TimeZone};

use crate::api::batch::{FetchOutcome, ResultBag};
use crate::api::query::QueryKey;
use crate::api::types::{
    BadgesPayload, ContestPayload, DailyQuestionPayload, LanguageStatsPayload, ProfilePayload,
    SkillStatsPayload, SolvedPayload, Submission, SubmissionsPayload, TagCount, decode,
};

/// Shown instead of every section when a batch fails.
pub const FAILURE_MESSAGE: &str = "Failed to fetch some data. Check username or server.";

/// Submission lists show at most this many entries.
pub const SUBMISSION_LIMIT: usize = 5;

// ---------------------------------------------------------------------------
// Section definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Profile,
    Badges,
    Solved,
    Contest,
    Submissions,
    AcceptedSubmissions,
    Languages,
    Skills,
    DailyQuestion,
}

impl SectionKind {
    /// Display order.
    pub const ALL: [SectionKind; 9] = [
        SectionKind::Profile,
        SectionKind::Badges,
        SectionKind::Solved,
        SectionKind::Contest,
        SectionKind::Submissions,
        SectionKind::AcceptedSubmissions,
        SectionKind::Languages,
        SectionKind::Skills,
        SectionKind::DailyQuestion,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Profile => "Profile",
            SectionKind::Badges => "Badges",
            SectionKind::Solved => "Solved Stats",
            SectionKind::Contest => "Contest",
            SectionKind::Submissions => "Recent Submissions",
            SectionKind::AcceptedSubmissions => "Last Accepted",
            SectionKind::Languages => "Language Stats",
            SectionKind::Skills => "Skill Stats",
            SectionKind::DailyQuestion => "Daily Question",
        }
    }

    /// The bag key this section is sourced from.
    pub fn source(self) -> QueryKey {
        match self {
            SectionKind::Profile => QueryKey::Profile,
            SectionKind::Badges => QueryKey::Badges,
            SectionKind::Solved => QueryKey::Solved,
            SectionKind::Contest => QueryKey::Contest,
            SectionKind::Submissions => QueryKey::Submission,
            SectionKind::AcceptedSubmissions => QueryKey::AcSubmission,
            SectionKind::Languages => QueryKey::LangStats,
            SectionKind::Skills => QueryKey::SkillStats,
            SectionKind::DailyQuestion => QueryKey::DailyQuestion,
        }
    }
}

/// Skill-tag proficiency groupings, rendered in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillTier {
    Fundamental,
    Intermediate,
    Advanced,
}

impl SkillTier {
    pub const ALL: [SkillTier; 3] = [
        SkillTier::Fundamental,
        SkillTier::Intermediate,
        SkillTier::Advanced,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SkillTier::Fundamental => "FUNDAMENTAL",
            SkillTier::Intermediate => "INTERMEDIATE",
            SkillTier::Advanced => "ADVANCED",
        }
    }
}

// ---------------------------------------------------------------------------
// Rendered model
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// `label: value`
    Field { label: &'static str, value: String },
    /// One entry of an ordered list.
    Item(String),
    /// Sub-heading inside a section (skill tiers).
    Heading(&'static str),
    Link(String),
}

impl Row {
    pub fn text(&self) -> String {
        match self {
            Row::Field { label, value } => format!("{label}: {value}"),
            Row::Item(text) | Row::Link(text) => text.clone(),
            Row::Heading(text) => (*text).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub rows: Vec<Row>,
}

impl Section {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }

    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(Row::text).collect()
    }
}

/// What the dashboard area shows for the current outcome.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// Nothing fetched yet.
    Empty,
    Error(&'static str),
    Sections(Vec<Section>),
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prefix for the daily question's relative link.
    pub problem_base_url: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            problem_base_url: "https://leetcode.com".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Derivation
// ---------------------------------------------------------------------------

pub fn derive_view(outcome: Option<&FetchOutcome>, opts: &RenderOptions) -> DashboardView {
    match outcome {
        None => DashboardView::Empty,
        Some(FetchOutcome::Failure(_)) => DashboardView::Error(FAILURE_MESSAGE),
        Some(FetchOutcome::Success(bag)) => DashboardView::Sections(sections(bag, opts)),
    }
}

/// Every section whose data is present, in display order.
pub fn sections(bag: &ResultBag, opts: &RenderOptions) -> Vec<Section> {
    SectionKind::ALL
        .iter()
        .filter_map(|&kind| build_section(kind, bag, opts))
        .collect()
}

fn build_section(kind: SectionKind, bag: &ResultBag, opts: &RenderOptions) -> Option<Section> {
    let payload = bag.get(kind.source())?;
    let rows = match kind {
        SectionKind::Profile => profile_rows(&decode(payload)),
        SectionKind::Badges => badge_rows(&decode(payload)),
        SectionKind::Solved => solved_rows(&decode(payload)),
        SectionKind::Contest => contest_rows(&decode(payload)),
        SectionKind::Submissions => submission_rows(&decode(payload), submission_line),
        SectionKind::AcceptedSubmissions => {
            submission_rows(&decode(payload), |s| accepted_line(s, &Local))
        }
        SectionKind::Languages => language_rows(&decode(payload)),
        SectionKind::Skills => skill_rows(&decode(payload)),
        SectionKind::DailyQuestion => daily_rows(&decode(payload), opts),
    }?;

    if rows.is_empty() {
        return None;
    }
    Some(Section { kind, rows })
}

fn field(label: &'static str, value: impl ToString) -> Row {
    Row::Field {
        label,
        value: value.to_string(),
    }
}

fn profile_rows(payload: &ProfilePayload) -> Option<Vec<Row>> {
    let profile = payload.profile.as_ref()?;
    let mut rows = Vec::new();
    if let Some(name) = &profile.real_name {
        rows.push(field("Name", name));
    }
    if let Some(ranking) = profile.ranking {
        rows.push(field("Ranking", ranking));
    }
    if let Some(country) = &profile.country_name {
        rows.push(field("Country", country));
    }
    if let Some(avatar) = &profile.user_avatar {
        rows.push(field("Avatar", avatar));
    }
    Some(rows)
}

fn badge_rows(payload: &BadgesPayload) -> Option<Vec<Row>> {
    let badges = payload.badges.as_ref()?;
    Some(
        badges
            .iter()
            .filter_map(|badge| {
                let name = badge.display_name.as_deref()?;
                Some(Row::Item(match &badge.icon {
                    Some(icon) => format!("{name} ({icon})"),
                    None => name.to_string(),
                }))
            })
            .collect(),
    )
}

fn solved_rows(payload: &SolvedPayload) -> Option<Vec<Row>> {
    let rows = [
        ("Easy", payload.easy_solved),
        ("Medium", payload.medium_solved),
        ("Hard", payload.hard_solved),
    ]
    .into_iter()
    .filter_map(|(label, count)| count.map(|n| field(label, n)))
    .collect();
    Some(rows)
}

fn contest_rows(payload: &ContestPayload) -> Option<Vec<Row>> {
    let mut rows = Vec::new();
    if let Some(rating) = payload.contest_rating {
        rows.push(field("Rating", rating));
    }
    if let Some(rank) = payload.contest_global_ranking {
        rows.push(field("Global Rank", rank));
    }
    Some(rows)
}

/// The first [`SUBMISSION_LIMIT`] entries, in payload order; an entry whose
/// line cannot be built still uses up one of the slots.
fn submission_rows(
    payload: &SubmissionsPayload,
    line: impl Fn(&Submission) -> Option<String>,
) -> Option<Vec<Row>> {
    let submissions = payload.submission.as_ref()?;
    Some(
        submissions
            .iter()
            .take(SUBMISSION_LIMIT)
            .filter_map(|s| line(s).map(Row::Item))
            .collect(),
    )
}

fn submission_line(submission: &Submission) -> Option<String> {
    let mut line = submission.title.clone()?;
    if let Some(status) = &submission.status_display {
        line.push_str(&format!(" - {status}"));
    }
    if let Some(lang) = &submission.lang {
        line.push_str(&format!(" ({lang})"));
    }
    Some(line)
}

fn accepted_line<Tz: TimeZone>(submission: &Submission, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let title = submission.title.clone()?;
    match submission
        .timestamp
        .and_then(|ts| format_timestamp(ts, tz))
    {
        Some(when) => Some(format!("{title} - {when}")),
        None => Some(title),
    }
}

/// Format whole epoch seconds as a date-time in the given zone.
pub fn format_timestamp<Tz: TimeZone>(secs: i64, tz: &Tz) -> Option<String>
where
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::from_timestamp(secs, 0)?;
    Some(
        utc.with_timezone(tz)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    )
}

fn language_rows(payload: &LanguageStatsPayload) -> Option<Vec<Row>> {
    let counts = payload
        .matched_user
        .as_ref()?
        .language_problem_count
        .as_ref()?;
    Some(
        counts
            .iter()
            .filter_map(|c| {
                let name = c.language_name.as_ref()?;
                let solved = c.problems_solved?;
                Some(Row::Item(format!("{name}: {solved} solved")))
            })
            .collect(),
    )
}

fn skill_rows(payload: &SkillStatsPayload) -> Option<Vec<Row>> {
    let tiers = payload
        .matched_user
        .as_ref()?
        .tag_problem_counts
        .as_ref()?;

    let mut rows = Vec::new();
    for tier in SkillTier::ALL {
        let counts = match tier {
            SkillTier::Fundamental => &tiers.fundamental,
            SkillTier::Intermediate => &tiers.intermediate,
            SkillTier::Advanced => &tiers.advanced,
        };
        let items: Vec<Row> = counts
            .iter()
            .flatten()
            .filter_map(|c| skill_item(tier, c))
            .collect();
        if items.is_empty() {
            continue;
        }
        rows.push(Row::Heading(tier.label()));
        rows.extend(items);
    }
    Some(rows)
}

fn skill_item(tier: SkillTier, count: &TagCount) -> Option<Row> {
    let tag = count.tag_name.as_ref()?;
    let solved = count.problems_solved?;
    Some(Row::Item(format!("{} - {tag}: {solved}", tier.label())))
}

fn daily_rows(payload: &DailyQuestionPayload, opts: &RenderOptions) -> Option<Vec<Row>> {
    let challenge = payload.active_daily_coding_challenge_question.as_ref()?;
    let question = challenge.question.as_ref()?;
    let title = question.title.as_ref()?;

    let mut rows = vec![Row::Item(match &question.difficulty {
        Some(difficulty) => format!("{title} ({difficulty})"),
        None => title.clone(),
    })];
    if let Some(date) = &challenge.date {
        rows.push(field("Date", date));
    }
    if let Some(url) = problem_url(challenge.link.as_deref(), opts) {
        rows.push(Row::Link(url));
    }
    Some(rows)
}

fn problem_url(link: Option<&str>, opts: &RenderOptions) -> Option<String> {
    let link = link?;
    Some(format!(
        "{}{link}",
        opts.problem_base_url.trim_end_matches('/')
    ))
}

/// Absolute link to today's daily question, if the bag has one.
pub fn daily_question_url(bag: &ResultBag, opts: &RenderOptions) -> Option<String> {
    let payload: DailyQuestionPayload = decode(bag.get(QueryKey::DailyQuestion)?);
    let challenge = payload.active_daily_coding_challenge_question?;
    challenge.question.as_ref()?.title.as_ref()?;
    problem_url(challenge.link.as_deref(), opts)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::{Value, json};

    use super::*;

    /// A bag in which every query returned an empty object.
    fn empty_bag() -> Vec<(QueryKey, Value)> {
        QueryKey::ALL.iter().map(|&k| (k, json!({}))).collect()
    }

    fn bag_with(overrides: Vec<(QueryKey, Value)>) -> ResultBag {
        let mut entries = empty_bag();
        for (key, value) in overrides {
            if let Some(slot) = entries.iter_mut().find(|(k, _)| *k == key) {
                slot.1 = value;
            }
        }
        ResultBag::from_entries(entries)
    }

    fn section(sections: &[Section], kind: SectionKind) -> Option<&Section> {
        sections.iter().find(|s| s.kind == kind)
    }

    fn representative_bag() -> ResultBag {
        bag_with(vec![
            (
                QueryKey::Profile,
                json!({ "profile": { "realName": "Alice", "ranking": 1234, "countryName": "Wonderland" } }),
            ),
            (
                QueryKey::Badges,
                json!({ "badges": [{ "displayName": "50 Days Badge", "icon": "/b.png" }] }),
            ),
            (
                QueryKey::Solved,
                json!({ "easySolved": 10, "mediumSolved": 5, "hardSolved": 1 }),
            ),
            (
                QueryKey::Contest,
                json!({ "contestRating": 1523.6, "contestGlobalRanking": 9876 }),
            ),
        ])
    }

    #[test]
    fn failure_renders_only_error() {
        let outcome = FetchOutcome::Failure("1 of 12 requests failed".into());
        assert_eq!(
            derive_view(Some(&outcome), &RenderOptions::default()),
            DashboardView::Error(FAILURE_MESSAGE)
        );
        assert_eq!(
            derive_view(None, &RenderOptions::default()),
            DashboardView::Empty
        );
    }

    #[test]
    fn solved_stats_lines() {
        let sections = sections(&representative_bag(), &RenderOptions::default());
        let solved = section(&sections, SectionKind::Solved).unwrap();
        assert_eq!(solved.lines(), vec!["Easy: 10", "Medium: 5", "Hard: 1"]);
    }

    #[test]
    fn missing_badge_list_omits_only_badges() {
        let bag = representative_bag();
        let bag = bag_with(
            bag.iter()
                .map(|(k, v)| match k {
                    QueryKey::Badges => (k, json!({ "badgesCount": 0 })),
                    _ => (k, v.clone()),
                })
                .collect(),
        );

        let sections = sections(&bag, &RenderOptions::default());
        assert!(section(&sections, SectionKind::Badges).is_none());
        assert!(section(&sections, SectionKind::Profile).is_some());
        assert!(section(&sections, SectionKind::Solved).is_some());
        assert_eq!(
            section(&sections, SectionKind::Contest).unwrap().lines(),
            vec!["Rating: 1523.6", "Global Rank: 9876"]
        );
    }

    #[test]
    fn empty_payloads_render_nothing() {
        let bag = ResultBag::from_entries(empty_bag());
        assert!(sections(&bag, &RenderOptions::default()).is_empty());

        let junk: Vec<_> = QueryKey::ALL.iter().map(|&k| (k, json!([1, "x", null]))).collect();
        assert!(sections(&ResultBag::from_entries(junk), &RenderOptions::default()).is_empty());
    }

    #[test]
    fn submissions_truncate_to_first_five_in_order() {
        let entries: Vec<Value> = (1..=12)
            .map(|i| json!({ "title": format!("Problem {i}"), "statusDisplay": "Accepted", "lang": "rust" }))
            .collect();
        let bag = bag_with(vec![(QueryKey::Submission, json!({ "submission": entries }))]);

        let sections = sections(&bag, &RenderOptions::default());
        let lines = section(&sections, SectionKind::Submissions).unwrap().lines();
        assert_eq!(
            lines,
            (1..=5)
                .map(|i| format!("Problem {i} - Accepted (rust)"))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn submission_without_title_still_counts_toward_limit() {
        let bag = bag_with(vec![(
            QueryKey::Submission,
            json!({ "submission": [
                { "title": "A" }, { "lang": "go" }, { "title": "C" },
                { "title": "D" }, { "title": "E" }, { "title": "F" },
            ] }),
        )]);
        let sections = sections(&bag, &RenderOptions::default());
        assert_eq!(
            section(&sections, SectionKind::Submissions).unwrap().lines(),
            vec!["A", "C", "D", "E"]
        );
    }

    #[test]
    fn accepted_line_formats_epoch_seconds() {
        let submission = Submission {
            title: Some("Two Sum".into()),
            timestamp: Some(1_700_000_000),
            ..Default::default()
        };
        assert_eq!(
            accepted_line(&submission, &Utc).as_deref(),
            Some("Two Sum - 2023-11-14 22:13:20")
        );

        let no_time = Submission {
            title: Some("Two Sum".into()),
            ..Default::default()
        };
        assert_eq!(accepted_line(&no_time, &Utc).as_deref(), Some("Two Sum"));
    }

    #[test]
    fn accepted_section_uses_string_timestamps() {
        let bag = bag_with(vec![(
            QueryKey::AcSubmission,
            json!({ "submission": [{ "title": "Two Sum", "timestamp": "1700000000" }] }),
        )]);
        let sections = sections(&bag, &RenderOptions::default());
        let lines = section(&sections, SectionKind::AcceptedSubmissions)
            .unwrap()
            .lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Two Sum - 2023-11-1"), "{}", lines[0]);
    }

    #[test]
    fn only_advanced_tier_renders() {
        let bag = bag_with(vec![(
            QueryKey::SkillStats,
            json!({ "matchedUser": { "tagProblemCounts": {
                "advanced": [
                    { "tagName": "Dynamic Programming", "problemsSolved": 7 },
                    { "tagName": "Backtracking", "problemsSolved": 3 },
                ]
            } } }),
        )]);
        let sections = sections(&bag, &RenderOptions::default());
        let skills = section(&sections, SectionKind::Skills).unwrap();
        assert_eq!(
            skills.rows,
            vec![
                Row::Heading("ADVANCED"),
                Row::Item("ADVANCED - Dynamic Programming: 7".into()),
                Row::Item("ADVANCED - Backtracking: 3".into()),
            ]
        );
        assert!(!skills.rows.contains(&Row::Heading("FUNDAMENTAL")));
        assert!(!skills.rows.contains(&Row::Heading("INTERMEDIATE")));
    }

    #[test]
    fn language_stats_without_matched_user_is_omitted() {
        let bag = bag_with(vec![(QueryKey::LangStats, json!({ "matchedUser": null }))]);
        let omitted = sections(&bag, &RenderOptions::default());
        assert!(section(&omitted, SectionKind::Languages).is_none());

        let bag = bag_with(vec![(
            QueryKey::LangStats,
            json!({ "matchedUser": { "languageProblemCount": [
                { "languageName": "Rust", "problemsSolved": 42 },
                { "languageName": "Go" },
            ] } }),
        )]);
        let sections = sections(&bag, &RenderOptions::default());
        assert_eq!(
            section(&sections, SectionKind::Languages).unwrap().lines(),
            vec!["Rust: 42 solved"]
        );
    }

    #[test]
    fn badges_show_icon_when_present() {
        let bag = bag_with(vec![(
            QueryKey::Badges,
            json!({ "badges": [
                { "displayName": "Knight", "icon": "/k.png" },
                { "displayName": "Guardian" },
                { "icon": "/orphan.png" },
            ] }),
        )]);
        let secs = sections(&bag, &RenderOptions::default());
        assert_eq!(
            section(&secs, SectionKind::Badges).unwrap().lines(),
            vec!["Knight (/k.png)", "Guardian"]
        );
    }

    #[test]
    fn contest_rating_keeps_its_decimals() {
        let bag = bag_with(vec![(
            QueryKey::Contest,
            json!({ "contestRating": 1523.634, "contestGlobalRanking": 9 }),
        )]);
        let secs = sections(&bag, &RenderOptions::default());
        assert_eq!(
            section(&secs, SectionKind::Contest).unwrap().lines(),
            vec!["Rating: 1523.634", "Global Rank: 9"]
        );

        let whole = bag_with(vec![(QueryKey::Contest, json!({ "contestRating": 1500.0 }))]);
        let secs = sections(&whole, &RenderOptions::default());
        assert_eq!(
            section(&secs, SectionKind::Contest).unwrap().lines(),
            vec!["Rating: 1500"]
        );
    }

    #[test]
    fn daily_question_needs_a_title() {
        let opts = RenderOptions::default();
        let bag = bag_with(vec![(
            QueryKey::DailyQuestion,
            json!({ "activeDailyCodingChallengeQuestion": { "link": "/problems/two-sum/" } }),
        )]);
        assert!(section(&sections(&bag, &opts), SectionKind::DailyQuestion).is_none());
        assert_eq!(daily_question_url(&bag, &opts), None);

        let bag = bag_with(vec![(
            QueryKey::DailyQuestion,
            json!({ "activeDailyCodingChallengeQuestion": {
                "link": "/problems/two-sum/",
                "question": { "title": "Two Sum", "difficulty": "Easy" }
            } }),
        )]);
        let sections = sections(&bag, &opts);
        assert_eq!(
            section(&sections, SectionKind::DailyQuestion).unwrap().lines(),
            vec!["Two Sum (Easy)", "https://leetcode.com/problems/two-sum/"]
        );
        assert_eq!(
            daily_question_url(&bag, &opts).as_deref(),
            Some("https://leetcode.com/problems/two-sum/")
        );
    }
}
