// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Concept assessments: generation, grading, recommendations.
//!
//! Generation asks the provider for a strict-JSON quiz and falls back to a
//! static two-question assessment on any failure. Grading is pure and
//! deliberately lenient for short answers: containment in either direction
//! counts, since students phrase answers loosely.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mentora_core::json::extract_json;
use mentora_core::traits::ProviderAdapter;
use mentora_core::types::{ChatMessage, ProviderRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::Display;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub questions: Vec<Question>,
    pub passing_score: Option<u32>,
    pub concept: String,
    pub subject: String,
    pub difficulty: String,
    pub learning_style: String,
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    /// Explicit passing score, or half the question count when unset.
    pub fn effective_passing_score(&self) -> u32 {
        self.passing_score
            .unwrap_or(self.questions.len() as u32 / 2)
    }
}

/// What the provider is asked to return; metadata is attached afterwards.
#[derive(Debug, Deserialize)]
struct GeneratedAssessment {
    questions: Vec<Question>,
    passing_score: Option<u32>,
}

/// One submitted answer. The value is loosely typed on purpose: clients
/// send option indexes, booleans, or free text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAnswer {
    pub id: String,
    pub answer: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResult {
    pub id: String,
    pub question: String,
    pub user_answer: Value,
    pub correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

/// Graded outcome. Deserialization is lenient so clients can echo a result
/// back to the recommendations endpoint without every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResult {
    pub passed: bool,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub score_percentage: f64,
    #[serde(default)]
    pub passing_score: u32,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub question_results: Vec<QuestionResult>,
    #[serde(default = "default_concept")]
    pub concept: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default = "Utc::now")]
    pub completed_at: DateTime<Utc>,
}

fn default_concept() -> String {
    "the concept".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub should_continue: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub review_points: Vec<String>,
    pub next_action: String,
}

pub struct AssessmentBuilder {
    provider: Option<Arc<dyn ProviderAdapter>>,
}

impl AssessmentBuilder {
    pub fn new(provider: Option<Arc<dyn ProviderAdapter>>) -> Self {
        Self { provider }
    }

    /// Generate a quiz for the concept. Infallible: any provider or parse
    /// failure yields the static fallback assessment.
    pub async fn create(
        &self,
        concept: &str,
        subject: &str,
        difficulty: &str,
        learning_style: &str,
        previous_responses: &[String],
    ) -> Assessment {
        let Some(provider) = &self.provider else {
            return fallback_assessment(concept, subject, difficulty, learning_style);
        };

        let request = ProviderRequest::new(vec![
            ChatMessage::system(assessment_prompt(
                concept,
                subject,
                difficulty,
                learning_style,
                previous_responses,
            )),
            ChatMessage::user(format!(
                "Create an assessment for {concept} in {subject} at {difficulty} level"
            )),
        ]);

        let generated: Result<GeneratedAssessment, _> = match provider.complete(request).await {
            Ok(response) => extract_json(&response.content).map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match generated {
            Ok(generated) if !generated.questions.is_empty() => Assessment {
                questions: generated.questions,
                passing_score: generated.passing_score,
                concept: concept.to_string(),
                subject: subject.to_string(),
                difficulty: difficulty.to_string(),
                learning_style: learning_style.to_string(),
                created_at: Utc::now(),
            },
            Ok(_) => {
                warn!("generated assessment had no questions, using fallback");
                fallback_assessment(concept, subject, difficulty, learning_style)
            }
            Err(e) => {
                warn!(error = %e, "assessment generation failed, using fallback");
                fallback_assessment(concept, subject, difficulty, learning_style)
            }
        }
    }
}

fn assessment_prompt(
    concept: &str,
    subject: &str,
    difficulty: &str,
    learning_style: &str,
    previous_responses: &[String],
) -> String {
    let mut previous_context = String::new();
    if !previous_responses.is_empty() {
        previous_context.push_str("Previous teaching exchanges:\n");
        for response in previous_responses.iter().take(3) {
            let snippet: String = response.chars().take(100).collect();
            previous_context.push_str(&format!("- {snippet}...\n"));
        }
    }
    format!(
        "You are an expert assessment designer creating a quiz to evaluate student \
         understanding of {concept} in {subject}.\n\n\
         CONTEXT:\n\
         - Student's Learning Style: {learning_style}\n\
         - Difficulty Level: {difficulty}\n\
         - Concept Being Assessed: {concept}\n\
         {previous_context}\n\
         Create exactly 3 progressively harder questions mixing question types.\n\n\
         Respond with ONLY a JSON object matching exactly:\n\
         {{\n\
           \"questions\": [\n\
             {{\n\
               \"id\": \"q1\",\n\
               \"question\": \"Question text here\",\n\
               \"type\": \"multiple_choice|true_false|short_answer\",\n\
               \"options\": [\"Option A\", \"Option B\"],\n\
               \"correct_answer\": \"Correct option text\",\n\
               \"explanation\": \"Why this answer is correct\"\n\
             }}\n\
           ],\n\
           \"passing_score\": 2\n\
         }}\n\n\
         For multiple_choice include 3-4 options with exactly one correct answer. \
         For true_false use options [\"True\", \"False\"] and correct_answer \
         \"True\" or \"False\". For short_answer use an empty options array and \
         put the expected answer in correct_answer."
    )
}

fn fallback_assessment(
    concept: &str,
    subject: &str,
    difficulty: &str,
    learning_style: &str,
) -> Assessment {
    Assessment {
        questions: vec![
            Question {
                id: "q1".to_string(),
                question: format!("Which of the following best describes {concept}?"),
                question_type: QuestionType::MultipleChoice,
                options: vec![
                    format!("A key concept in {subject}"),
                    format!("An unrelated topic to {subject}"),
                    format!("A historical figure in {subject}"),
                    format!("A tool used only in advanced {subject}"),
                ],
                correct_answer: format!("A key concept in {subject}"),
                explanation: format!("{concept} is indeed a fundamental concept in {subject}."),
            },
            Question {
                id: "q2".to_string(),
                question: format!(
                    "True or False: {concept} is important for understanding {subject}."
                ),
                question_type: QuestionType::TrueFalse,
                options: vec!["True".to_string(), "False".to_string()],
                correct_answer: "True".to_string(),
                explanation: format!(
                    "{concept} is a crucial component for understanding {subject}."
                ),
            },
        ],
        passing_score: Some(1),
        concept: concept.to_string(),
        subject: subject.to_string(),
        difficulty: difficulty.to_string(),
        learning_style: learning_style.to_string(),
        created_at: Utc::now(),
    }
}

/// Grade submitted answers against the assessment. Pure.
pub fn grade(answers: &[UserAnswer], assessment: &Assessment) -> GradeResult {
    let passing_score = assessment.effective_passing_score();
    let mut correct_count = 0u32;
    let mut question_results = Vec::new();

    for answer in answers {
        let Some(question) = assessment.questions.iter().find(|q| q.id == answer.id) else {
            continue;
        };
        let correct = check_answer(&answer.answer, question);
        if correct {
            correct_count += 1;
        }
        question_results.push(QuestionResult {
            id: answer.id.clone(),
            question: question.question.clone(),
            user_answer: answer.answer.clone(),
            correct,
            correct_answer: question.correct_answer.clone(),
            explanation: question.explanation.clone(),
        });
    }

    let total = assessment.questions.len() as u32;
    let passed = correct_count >= passing_score;
    let score_percentage = if total > 0 {
        f64::from(correct_count) / f64::from(total) * 100.0
    } else {
        0.0
    };

    let feedback = if passed {
        if correct_count == total {
            format!(
                "Excellent work! You've demonstrated complete mastery of {}.",
                assessment.concept
            )
        } else {
            format!(
                "Good job! You've shown a solid understanding of {}.",
                assessment.concept
            )
        }
    } else {
        format!(
            "You're making progress with {}, but let's review some key points.",
            assessment.concept
        )
    };

    GradeResult {
        passed,
        score: correct_count,
        total,
        score_percentage,
        passing_score,
        feedback,
        question_results,
        concept: assessment.concept.clone(),
        subject: assessment.subject.clone(),
        completed_at: Utc::now(),
    }
}

fn check_answer(user_answer: &Value, question: &Question) -> bool {
    let correct = question.correct_answer.as_str();
    match question.question_type {
        QuestionType::MultipleChoice => match user_answer {
            // An integer answer indexes into the options.
            Value::Number(n) => n
                .as_u64()
                .and_then(|i| question.options.get(i as usize))
                .is_some_and(|option| option == correct),
            Value::String(s) => s == correct,
            _ => false,
        },
        QuestionType::TrueFalse => match user_answer {
            Value::Bool(b) => (*b && correct == "True") || (!*b && correct == "False"),
            Value::String(s) => s == correct,
            _ => false,
        },
        QuestionType::ShortAnswer => {
            let Value::String(s) = user_answer else {
                return false;
            };
            let given = s.to_lowercase();
            let given = given.trim();
            let expected = correct.to_lowercase();
            let expected = expected.trim();
            given == expected || expected.contains(given) || given.contains(expected)
        }
    }
}

/// Continue-or-review guidance derived from a grade.
pub fn recommendations(result: &GradeResult) -> Recommendation {
    if result.passed {
        Recommendation {
            should_continue: true,
            message: format!(
                "Great job! You've demonstrated understanding of {}. Let's continue \
                 with the next concept.",
                result.concept
            ),
            review_points: vec![],
            next_action: "continue_teaching".to_string(),
        }
    } else {
        Recommendation {
            should_continue: false,
            message: format!("Let's review {} a bit more before moving on.", result.concept),
            review_points: vec![
                "Review the key definitions and examples".to_string(),
                "Try to apply the concept in different contexts".to_string(),
                "Focus on understanding the underlying principles".to_string(),
            ],
            next_action: "review_concept".to_string(),
        }
    }
}
