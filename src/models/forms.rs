//! Request and response bodies of the Google Forms v1 REST API, limited to
//! the fields the exporter sends or reads.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormInfo {
    pub title: String,
    pub document_title: String,
}

impl FormInfo {
    /// Uses `title` both as the form heading and as the Drive document name.
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            document_title: title.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateFormBody {
    pub info: FormInfo,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub form_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responder_uri: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BatchUpdateBody {
    pub requests: Vec<FormRequest>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormRequest {
    UpdateSettings(UpdateSettingsRequest),
    CreateItem(CreateItemRequest),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub settings: FormSettings,
    pub update_mask: String,
}

impl UpdateSettingsRequest {
    pub fn enable_quiz_mode() -> Self {
        Self {
            settings: FormSettings {
                quiz_settings: QuizSettings { is_quiz: true },
            },
            update_mask: "quizSettings.isQuiz".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSettings {
    pub quiz_settings: QuizSettings,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizSettings {
    pub is_quiz: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CreateItemRequest {
    pub item: Item,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Location {
    pub index: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub title: String,
    pub question_item: QuestionItem,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuestionItem {
    pub question: FormQuestion,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormQuestion {
    pub required: bool,
    pub grading: Grading,
    pub choice_question: ChoiceQuestion,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Grading {
    pub point_value: u32,
    pub correct_answers: CorrectAnswers,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CorrectAnswers {
    pub answers: Vec<CorrectAnswer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CorrectAnswer {
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceQuestion {
    #[serde(rename = "type")]
    pub kind: ChoiceType,
    pub options: Vec<ChoiceOption>,
    pub shuffle: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChoiceType {
    Radio,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: String,
}

/// Error envelope returned by Google APIs.
#[derive(Debug, Deserialize)]
pub struct GoogleErrorBody {
    pub error: GoogleError,
}

#[derive(Debug, Deserialize)]
pub struct GoogleError {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
