// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation stages for the planning dialogue.

use serde::{Deserialize, Serialize};
use strum::Display;

/// The planning conversation's finite set of stages.
///
/// Transitions are strictly forward. The only way "back" is replacing the
/// whole session, which the engine does when the user asks to start over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Waiting for the user to name a subject.
    Initial,
    /// Collecting profile attributes through follow-up questions.
    Gathering,
    /// Plan generation is in flight.
    Planning,
    /// The plan exists; further messages get a static acknowledgment.
    Complete,
}

impl Stage {
    /// The stage that follows this one. `Complete` is terminal.
    pub fn next(self) -> Stage {
        match self {
            Stage::Initial => Stage::Gathering,
            Stage::Gathering => Stage::Planning,
            Stage::Planning | Stage::Complete => Stage::Complete,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Stage::Complete
    }

    /// True when `other` is this stage or a later one.
    pub fn can_advance_to(self, other: Stage) -> bool {
        (other as u8) >= (self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_only_move_forward() {
        let mut stage = Stage::Initial;
        let mut seen = vec![stage];
        loop {
            let next = stage.next();
            assert!(stage.can_advance_to(next), "{stage} -> {next} regressed");
            if next == stage {
                break;
            }
            stage = next;
            seen.push(stage);
        }
        assert_eq!(
            seen,
            vec![Stage::Initial, Stage::Gathering, Stage::Planning, Stage::Complete]
        );
    }

    #[test]
    fn terminal_stage_is_fixed_point() {
        assert_eq!(Stage::Complete.next(), Stage::Complete);
        assert!(Stage::Complete.is_terminal());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Stage::Gathering.to_string(), "gathering");
    }

    #[test]
    fn earlier_stage_cannot_follow_later() {
        assert!(!Stage::Complete.can_advance_to(Stage::Gathering));
        assert!(Stage::Gathering.can_advance_to(Stage::Complete));
    }
}
