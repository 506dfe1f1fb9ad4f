use serde::Deserialize;

use crate::models::domain::Quiz;

/// Body of `POST /generate-quiz/`. The field is optional so a missing
/// filename is reported as missing input rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateQuizRequest {
    #[serde(default)]
    pub filename: Option<String>,
}

impl GenerateQuizRequest {
    pub fn filename(&self) -> Option<&str> {
        self.filename
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty())
    }
}

/// Body of `POST /export-google-forms/`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportQuizRequest {
    #[serde(default)]
    pub quiz: Option<Quiz>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filename_counts_as_missing() {
        let request: GenerateQuizRequest = serde_json::from_str(r#"{"filename":"  "}"#).unwrap();
        assert_eq!(request.filename(), None);

        let request: GenerateQuizRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.filename(), None);

        let request: GenerateQuizRequest =
            serde_json::from_str(r#"{"filename":"abc.pdf"}"#).unwrap();
        assert_eq!(request.filename(), Some("abc.pdf"));
    }

    #[test]
    fn export_request_without_quiz_parses() {
        let request: ExportQuizRequest = serde_json::from_str("{}").unwrap();
        assert!(request.quiz.is_none());

        let request: ExportQuizRequest = serde_json::from_str(r#"{"quiz":null}"#).unwrap();
        assert!(request.quiz.is_none());
    }
}
