// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The learner profile accumulated during requirements gathering.
//!
//! A closed record of optional slots rather than an open map: the set of
//! attributes the extractor and the plan generators recognize is fixed, and
//! a typed record makes "unset" explicit.

use serde::{Deserialize, Serialize};

/// Profile attributes filled in across the gathering conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub subject: Option<String>,
    pub experience: Option<String>,
    pub learning_style: Option<String>,
    pub timeline: Option<String>,
    pub time_commitment: Option<String>,
    #[serde(default)]
    pub goals: Vec<String>,
}

impl Profile {
    /// Number of filled secondary slots (everything except subject and goals).
    pub fn filled_secondary(&self) -> usize {
        [
            self.experience.is_some(),
            self.learning_style.is_some(),
            self.timeline.is_some(),
            self.time_commitment.is_some(),
        ]
        .iter()
        .filter(|set| **set)
        .count()
    }

    /// The completeness predicate: a subject plus at least two of
    /// {experience, learning style, timeline, time commitment}.
    pub fn is_complete(&self) -> bool {
        self.subject.is_some() && self.filled_secondary() >= 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_is_incomplete() {
        assert!(!Profile::default().is_complete());
    }

    #[test]
    fn subject_alone_is_incomplete() {
        let profile = Profile {
            subject: Some("python".into()),
            ..Profile::default()
        };
        assert!(!profile.is_complete());
    }

    #[test]
    fn subject_plus_one_secondary_is_incomplete() {
        let profile = Profile {
            subject: Some("python".into()),
            experience: Some("beginner".into()),
            ..Profile::default()
        };
        assert!(!profile.is_complete());
    }

    #[test]
    fn subject_plus_two_secondary_is_complete() {
        let profile = Profile {
            subject: Some("python".into()),
            experience: Some("beginner".into()),
            learning_style: Some("hands-on".into()),
            ..Profile::default()
        };
        assert!(profile.is_complete());
    }

    #[test]
    fn two_secondary_without_subject_is_incomplete() {
        let profile = Profile {
            experience: Some("beginner".into()),
            timeline: Some("4-6 weeks".into()),
            ..Profile::default()
        };
        assert!(!profile.is_complete());
    }

    #[test]
    fn goals_do_not_count_toward_completeness() {
        let profile = Profile {
            subject: Some("python".into()),
            goals: vec!["career advancement".into(), "personal interest".into()],
            ..Profile::default()
        };
        assert!(!profile.is_complete());
    }
}
