// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Teaching assistant and assessment engine for the Mentora platform.

pub mod assessment;
pub mod assistant;
pub mod diagram;

pub use assessment::{
    grade, recommendations, Assessment, AssessmentBuilder, GradeResult, Question, QuestionResult,
    QuestionType, Recommendation, UserAnswer,
};
pub use assistant::{TeachingAssistant, TeachingContext, TeachingReply};
pub use diagram::make_diagram_data_url;
