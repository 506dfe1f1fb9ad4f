use std::sync::Arc;

use validator::Validate;

use crate::{
    constants::quiz_prompt::{
        CONTENT_PLACEHOLDER, MAX_QUESTIONS, MAX_SOURCE_CHARS, MIN_QUESTIONS,
        QUIZ_GENERATION_PROMPT,
    },
    errors::{AppError, AppResult},
    models::domain::Quiz,
    services::{
        file_store::FileStore, model_service::CompletionModel, text_extractor::TextExtractor,
    },
};

pub struct QuizService {
    store: Arc<FileStore>,
    extractor: Arc<TextExtractor>,
    model: Arc<dyn CompletionModel>,
}

impl QuizService {
    pub fn new(
        store: Arc<FileStore>,
        extractor: Arc<TextExtractor>,
        model: Arc<dyn CompletionModel>,
    ) -> Self {
        Self {
            store,
            extractor,
            model,
        }
    }

    /// Full pipeline for one upload: resolve the handle, extract its text and
    /// generate a quiz from it.
    pub async fn generate_from_upload(&self, handle: &str) -> AppResult<Quiz> {
        let path = self.store.resolve(handle).await?;
        let text = self.extractor.extract(&path).await?;
        self.generate_quiz(&text).await
    }

    pub async fn generate_quiz(&self, source_text: &str) -> AppResult<Quiz> {
        let prompt = build_prompt(source_text);
        let reply = self.model.complete(&prompt).await?;
        let quiz = parse_quiz(&reply)?;

        let count = quiz.questions.len();
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&count) {
            log::warn!(
                "Model returned {} questions, outside the requested {}..={}",
                count,
                MIN_QUESTIONS,
                MAX_QUESTIONS
            );
        }
        log::info!("Generated quiz '{}' with {} questions", quiz.title, count);

        Ok(quiz)
    }
}

/// Embeds at most the first `MAX_SOURCE_CHARS` characters of `source_text`
/// into the generation prompt.
pub fn build_prompt(source_text: &str) -> String {
    let excerpt: String = source_text.chars().take(MAX_SOURCE_CHARS).collect();
    QUIZ_GENERATION_PROMPT.replacen(CONTENT_PLACEHOLDER, &excerpt, 1)
}

/// Takes everything from the first `{` to the last `}` of a model reply and
/// parses it as JSON. The reply is not repaired in any other way.
pub fn extract_json_object(raw: &str) -> AppResult<serde_json::Value> {
    let (start, end) = match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => (start, end),
        _ => {
            return Err(AppError::MalformedAIResponse(
                "reply contains no JSON object".to_string(),
            ))
        }
    };

    serde_json::from_str(&raw[start..=end])
        .map_err(|e| AppError::MalformedAIResponse(format!("invalid JSON: {}", e)))
}

pub fn parse_quiz(raw: &str) -> AppResult<Quiz> {
    let value = extract_json_object(raw)?;
    let quiz: Quiz = serde_json::from_value(value)
        .map_err(|e| AppError::SchemaViolation(e.to_string()))?;
    quiz.validate()?;
    Ok(quiz)
}
