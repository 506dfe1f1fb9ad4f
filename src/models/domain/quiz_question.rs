use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const OPTIONS_PER_QUESTION: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
pub struct Question {
    #[validate(length(min = 1, message = "question text must not be empty"))]
    pub question: String,
    #[validate(length(
        min = 4,
        max = 4,
        message = "each question must have exactly four options"
    ))]
    pub options: Vec<String>,
    #[validate(length(min = 1, message = "correct_answer must not be empty"))]
    pub correct_answer: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

fn default_shuffle() -> bool {
    true
}

/// Difficulty as written by the model. Anything other than
/// `medium` or `hard` (any case) reads as `Easy`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase", from = "Option<String>")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl From<Option<String>> for Difficulty {
    fn from(value: Option<String>) -> Self {
        match value.as_deref().map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("medium") => Difficulty::Medium,
            Some(v) if v.eq_ignore_ascii_case("hard") => Difficulty::Hard,
            _ => Difficulty::Easy,
        }
    }
}

impl Difficulty {
    /// Grading weight of a question on the exported form.
    pub fn points(self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }
}
