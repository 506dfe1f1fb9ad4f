use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::quiz_question::Question;

pub const DEFAULT_QUIZ_TITLE: &str = "AI Generated Quiz";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate, JsonSchema)]
pub struct Quiz {
    #[serde(default = "default_title")]
    pub title: String,
    #[validate(nested)]
    pub questions: Vec<Question>,
}

fn default_title() -> String {
    DEFAULT_QUIZ_TITLE.to_string()
}

impl Quiz {
    /// JSON schema of a quiz as the API returns and accepts it.
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(Quiz)).unwrap_or_default()
    }
}
