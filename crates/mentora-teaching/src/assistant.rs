// SPDX-FileCopyrightText: 2026 Mentora Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversational teaching assistant.
//!
//! Builds a one-on-one instructor prompt from the session context and talks
//! to the provider. Every provider failure is replaced by a deterministic
//! guidance reply; the caller never sees an error from `chat`.

use std::pin::Pin;
use std::sync::Arc;

use futures::{stream, Stream, StreamExt};
use mentora_core::traits::ProviderAdapter;
use mentora_core::types::{ChatMessage, ProviderRequest};
use tracing::warn;

const FALLBACK_REPLY: &str = "I'm having a brief moment of difficulty, but let's \
     continue our lesson. Can you tell me what specific aspect you'd like me to \
     explain further?";

const EXIT_REPLY: &str =
    "Let's check your understanding of what we've covered so far before moving on.";

const VISUAL_KEYWORDS_MESSAGE: &[&str] = &[
    "visual",
    "diagram",
    "show",
    "picture",
    "graph",
    "chart",
    "illustration",
];

const VISUAL_KEYWORDS_REPLY: &[&str] = &["diagram", "visual", "chart", "graph"];

const MASTERY_KEYWORDS: &[&str] = &[
    "understand",
    "got it",
    "makes sense",
    "clear now",
    "next topic",
    "understood",
    "assessment",
    "test",
    "quiz",
    "check",
];

const CONFUSION_KEYWORDS: &[&str] = &["don't understand", "confused", "unclear", "explain again"];

/// Where the student is in their plan, as supplied by the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct TeachingContext {
    pub subject: Option<String>,
    pub module: Option<String>,
    pub current_concept: Option<String>,
    pub learning_style: Option<String>,
    pub difficulty: Option<String>,
}

impl TeachingContext {
    fn subject(&self) -> &str {
        self.subject.as_deref().unwrap_or("the subject")
    }

    fn module(&self) -> &str {
        self.module.as_deref().unwrap_or("this topic")
    }

    fn learning_style(&self) -> &str {
        self.learning_style.as_deref().unwrap_or("mixed")
    }

    fn difficulty(&self) -> &str {
        self.difficulty.as_deref().unwrap_or("intermediate")
    }

    /// Concept label for the reply; falls back to a slug of the module name.
    fn concept(&self) -> String {
        self.current_concept
            .clone()
            .unwrap_or_else(|| self.module().to_lowercase().replace(' ', "_"))
    }
}

#[derive(Debug, Clone)]
pub struct TeachingReply {
    pub response: String,
    pub current_concept: String,
    pub should_generate_visual: bool,
    pub trigger_assessment: bool,
}

pub struct TeachingAssistant {
    provider: Option<Arc<dyn ProviderAdapter>>,
}

impl TeachingAssistant {
    pub fn new(provider: Option<Arc<dyn ProviderAdapter>>) -> Self {
        Self { provider }
    }

    /// One teaching turn. Infallible: provider errors become `FALLBACK_REPLY`.
    pub async fn chat(&self, message: &str, context: &TeachingContext) -> TeachingReply {
        if is_exit_command(message) {
            return TeachingReply {
                response: EXIT_REPLY.to_string(),
                current_concept: context.concept(),
                should_generate_visual: false,
                trigger_assessment: true,
            };
        }

        let response = match &self.provider {
            Some(provider) => {
                let request = teaching_request(message, context);
                match provider.complete(request).await {
                    Ok(r) => r.content,
                    Err(e) => {
                        warn!(error = %e, "teaching reply failed, using fallback");
                        FALLBACK_REPLY.to_string()
                    }
                }
            }
            None => FALLBACK_REPLY.to_string(),
        };

        TeachingReply {
            should_generate_visual: should_generate_visual(message, &response),
            trigger_assessment: wants_assessment(message),
            current_concept: context.concept(),
            response,
        }
    }

    /// Streaming variant: yields the reply chunk-wise. On provider failure
    /// the fallback reply arrives as a single chunk.
    pub async fn stream_chat(
        &self,
        message: &str,
        context: &TeachingContext,
    ) -> Pin<Box<dyn Stream<Item = String> + Send>> {
        if is_exit_command(message) {
            return Box::pin(stream::once(async { EXIT_REPLY.to_string() }));
        }
        let Some(provider) = &self.provider else {
            return Box::pin(stream::once(async { FALLBACK_REPLY.to_string() }));
        };

        let request = teaching_request(message, context);
        match provider.stream(request).await {
            Ok(chunks) => Box::pin(chunks.filter_map(|chunk| async move {
                match chunk {
                    Ok(c) if !c.delta.is_empty() => Some(c.delta),
                    Ok(_) => None,
                    Err(e) => {
                        warn!(error = %e, "teaching stream interrupted");
                        None
                    }
                }
            })),
            Err(e) => {
                warn!(error = %e, "teaching stream failed, using fallback");
                Box::pin(stream::once(async { FALLBACK_REPLY.to_string() }))
            }
        }
    }
}

fn teaching_request(message: &str, context: &TeachingContext) -> ProviderRequest {
    let prompt = format!(
        "You are an expert instructor teaching {subject}, specifically the module: \
         {module}.\n\n\
         CONTEXT:\n\
         - Student's Learning Style: {style}\n\
         - Difficulty Level: {difficulty}\n\
         - Current Focus: {module}\n\n\
         TEACHING GUIDELINES:\n\
         1. Be conversational and highly interactive, like a one-on-one tutor\n\
         2. Present information in small, digestible chunks (2-3 sentences max)\n\
         3. If the student seems confused, simplify and provide different examples\n\
         4. If they show understanding, introduce a slightly more advanced concept\n\
         5. Use the student's preferred learning style ({style})\n\
         6. Keep all responses under 5 sentences\n\n\
         End each response with a thoughtful question to maintain dialogue. Use \
         concrete examples related to {subject}. Never present multiple concepts \
         at once.",
        subject = context.subject(),
        module = context.module(),
        style = context.learning_style(),
        difficulty = context.difficulty(),
    );
    ProviderRequest::new(vec![
        ChatMessage::system(prompt),
        ChatMessage::user(format!("Student says: {message}")),
    ])
}

fn is_exit_command(message: &str) -> bool {
    matches!(
        message.to_lowercase().trim(),
        "exit" | "quit" | "end session"
    )
}

/// Decide whether a diagram should accompany the reply, from keywords on
/// both sides of the exchange.
fn should_generate_visual(message: &str, reply: &str) -> bool {
    let message = message.to_lowercase();
    let reply = reply.to_lowercase();
    VISUAL_KEYWORDS_MESSAGE.iter().any(|kw| message.contains(kw))
        || VISUAL_KEYWORDS_REPLY.iter().any(|kw| reply.contains(kw))
}

fn wants_assessment(message: &str) -> bool {
    let message = message.to_lowercase();
    MASTERY_KEYWORDS.iter().any(|kw| message.contains(kw))
        && !CONFUSION_KEYWORDS.iter().any(|kw| message.contains(kw))
}
