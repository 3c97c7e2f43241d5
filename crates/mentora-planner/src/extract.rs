// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword-based requirement extraction.
//!
//! Pure function over a case-folded message. Every slot is first-match-wins:
//! a filled slot is never overwritten, so an ambiguous later message cannot
//! thrash an earlier answer. Keyword order within a table matters; longer,
//! more specific phrases come first ("generative ai" before "ai").

use std::sync::LazyLock;

use regex::Regex;

use crate::profile::Profile;

/// Recognized subjects, most specific first.
const SUBJECTS: &[&str] = &[
    "generative ai",
    "machine learning",
    "data science",
    "web development",
    "ai",
    "programming",
    "python",
    "javascript",
    "mathematics",
    "physics",
    "chemistry",
];

const EXPERIENCE_TABLE: &[(&str, &[&str])] = &[
    ("beginner", &["beginner", "new to", "never", "starting", "no experience"]),
    ("intermediate", &["intermediate", "some experience", "a little"]),
    ("advanced", &["advanced", "experienced", "expert"]),
];

const STYLE_TABLE: &[(&str, &[&str])] = &[
    ("hands-on", &["hands-on", "hands on", "practice", "project", "build"]),
    ("visual", &["visual", "video", "watch", "step-by-step", "tutorial"]),
    ("reading", &["reading", "book", "text", "theory"]),
    ("mixed", &["mixed", "combination", "everything"]),
];

static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*hours?").unwrap_or_else(|_| unreachable!("static pattern"))
});

static DURATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(weeks?|months?)").unwrap_or_else(|_| unreachable!("static pattern"))
});

/// Fill any unset profile slots the message mentions. Pure; no I/O.
pub fn extract(profile: &mut Profile, message: &str) {
    let lower = message.to_lowercase();

    if profile.subject.is_none() {
        for subject in SUBJECTS {
            if lower.contains(subject) {
                profile.subject = Some((*subject).to_string());
                break;
            }
        }
    }

    if profile.experience.is_none() {
        profile.experience = match_table(&lower, EXPERIENCE_TABLE);
    }

    if profile.learning_style.is_none() {
        profile.learning_style = match_table(&lower, STYLE_TABLE);
    }

    if profile.timeline.is_none() {
        profile.timeline = extract_timeline(&lower);
    }

    if profile.time_commitment.is_none() {
        if let Some(caps) = HOURS_RE.captures(&lower) {
            profile.time_commitment = Some(format!("{} hours per week", &caps[1]));
        }
    }

    extract_goals(profile, &lower);
}

fn match_table(lower: &str, table: &[(&str, &[&str])]) -> Option<String> {
    for (value, keywords) in table {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            return Some((*value).to_string());
        }
    }
    None
}

/// Timeline: a numeric duration phrase wins; otherwise pace keywords.
///
/// Malformed numeric phrases (a number with no adjacent unit) fall through
/// to the keyword branches and are otherwise silently ignored.
fn extract_timeline(lower: &str) -> Option<String> {
    if let Some(caps) = DURATION_RE.captures(lower) {
        let unit = if caps[2].starts_with("week") { "weeks" } else { "months" };
        return Some(format!("{} {unit}", &caps[1]));
    }

    if ["quick", "fast", "weeks", "month"].iter().any(|kw| lower.contains(kw)) {
        Some("4-6 weeks".to_string())
    } else if ["slowly", "long term"].iter().any(|kw| lower.contains(kw)) {
        Some("3-6 months".to_string())
    } else {
        None
    }
}

fn extract_goals(profile: &mut Profile, lower: &str) {
    let candidates: &[(&str, &[&str])] = &[
        ("career advancement", &["career", "job", "work", "professional"]),
        ("personal interest", &["personal interest", "hobby", "for fun", "curious"]),
    ];
    for (goal, keywords) in candidates {
        if keywords.iter().any(|kw| lower.contains(kw))
            && !profile.goals.iter().any(|g| g == goal)
        {
            profile.goals.push((*goal).to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_message_fills_three_slots() {
        let mut profile = Profile::default();
        extract(
            &mut profile,
            "I want to learn Python, I'm a beginner, I prefer hands-on projects",
        );
        assert_eq!(profile.subject.as_deref(), Some("python"));
        assert_eq!(profile.experience.as_deref(), Some("beginner"));
        assert_eq!(profile.learning_style.as_deref(), Some("hands-on"));
    }

    #[test]
    fn filled_slots_are_never_overwritten() {
        let mut profile = Profile::default();
        extract(&mut profile, "I'm a beginner");
        extract(&mut profile, "Actually I'm quite advanced");
        assert_eq!(profile.experience.as_deref(), Some("beginner"));
    }

    #[test]
    fn extraction_is_idempotent() {
        let mut profile = Profile::default();
        extract(&mut profile, "machine learning, visual learner, 10 hours a week");
        let snapshot = profile.clone();
        extract(&mut profile, "machine learning, visual learner, 10 hours a week");
        assert_eq!(profile, snapshot);
    }

    #[test]
    fn generative_ai_beats_plain_ai() {
        let mut profile = Profile::default();
        extract(&mut profile, "I want to learn generative ai");
        assert_eq!(profile.subject.as_deref(), Some("generative ai"));
    }

    #[test]
    fn hours_phrase_becomes_weekly_commitment() {
        let mut profile = Profile::default();
        extract(&mut profile, "I can spend about 10 hours on this");
        assert_eq!(profile.time_commitment.as_deref(), Some("10 hours per week"));
    }

    #[test]
    fn numeric_duration_sets_timeline() {
        let mut profile = Profile::default();
        extract(&mut profile, "I'd like to finish in 6 weeks");
        assert_eq!(profile.timeline.as_deref(), Some("6 weeks"));

        let mut profile = Profile::default();
        extract(&mut profile, "maybe 3 months?");
        assert_eq!(profile.timeline.as_deref(), Some("3 months"));
    }

    #[test]
    fn pace_keywords_set_coarse_timeline() {
        let mut profile = Profile::default();
        extract(&mut profile, "something quick please");
        assert_eq!(profile.timeline.as_deref(), Some("4-6 weeks"));

        let mut profile = Profile::default();
        extract(&mut profile, "I want to take it slowly");
        assert_eq!(profile.timeline.as_deref(), Some("3-6 months"));
    }

    #[test]
    fn bare_number_without_unit_is_ignored() {
        let mut profile = Profile::default();
        extract(&mut profile, "I have 10 things going on");
        assert!(profile.timeline.is_none());
        assert!(profile.time_commitment.is_none());
    }

    #[test]
    fn goals_accumulate_without_duplicates() {
        let mut profile = Profile::default();
        extract(&mut profile, "for my career");
        extract(&mut profile, "it's also a hobby and good for my job");
        assert_eq!(
            profile.goals,
            vec!["career advancement".to_string(), "personal interest".to_string()]
        );
    }

    #[test]
    fn unrelated_message_changes_nothing() {
        let mut profile = Profile::default();
        extract(&mut profile, "hello there!");
        assert_eq!(profile, Profile::default());
    }
}
