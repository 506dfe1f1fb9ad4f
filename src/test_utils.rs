use crate::models::domain::{Difficulty, Question, Quiz};

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use lopdf::{
        content::{Content, Operation},
        dictionary, Document, Object, Stream,
    };

    pub const MULTIPART_BOUNDARY: &str = "quizforge-test-boundary";

    /// A single question with lettered options; the answer is London.
    pub fn capital_question() -> Question {
        Question {
            question: "Which city is the capital of the United Kingdom?".to_string(),
            options: vec![
                "A) Paris".to_string(),
                "B) London".to_string(),
                "C) Rome".to_string(),
                "D) Berlin".to_string(),
            ],
            correct_answer: "london".to_string(),
            explanation: "London has been the capital since the Middle Ages.".to_string(),
            difficulty: Difficulty::Medium,
            shuffle: true,
        }
    }

    /// A valid three-question quiz.
    pub fn sample_quiz() -> Quiz {
        let mut easy = capital_question();
        easy.difficulty = Difficulty::Easy;

        Quiz {
            title: "World Capitals".to_string(),
            questions: vec![
                easy,
                Question {
                    question: "What is the capital of Japan?".to_string(),
                    options: vec![
                        "Kyoto".to_string(),
                        "Osaka".to_string(),
                        "Tokyo".to_string(),
                        "Nagoya".to_string(),
                    ],
                    correct_answer: "Tokyo".to_string(),
                    explanation: "Tokyo became the capital in 1868.".to_string(),
                    difficulty: Difficulty::Hard,
                    shuffle: false,
                },
                capital_question(),
            ],
        }
    }

    /// Model-style JSON for a quiz with `count` valid questions.
    pub fn quiz_json(count: usize) -> String {
        let questions: Vec<serde_json::Value> = (1..=count)
            .map(|n| {
                let difficulty = ["easy", "medium", "hard"][n % 3];
                serde_json::json!({
                    "question": format!("Question {}?", n),
                    "options": ["A) one", "B) two", "C) three", "D) four"],
                    "correct_answer": "B) two",
                    "explanation": "Because two.",
                    "difficulty": difficulty,
                })
            })
            .collect();

        serde_json::json!({ "title": "Generated Quiz", "questions": questions }).to_string()
    }

    /// A one-page PDF whose text layer is `text`.
    pub fn hello_world_pdf(text: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content should encode"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("pdf should serialize");
        bytes
    }

    /// A multipart/form-data body with one file field.
    pub fn multipart_body(field: &str, filename: &str, content: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
            boundary = MULTIPART_BOUNDARY,
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
        body
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use actix_web::http::StatusCode;

    use crate::{
        app_state::{AppState, Backends},
        config::Config,
        services::{
            form_export_service::MockFormsApi,
            model_service::MockCompletionModel,
            text_extractor::{MockOcrEngine, MockPdfTextSource},
        },
    };

    /// App state over mocked backends, storing uploads in a fresh temp dir.
    pub fn state_with_backends(
        pdf: MockPdfTextSource,
        ocr: MockOcrEngine,
        model: MockCompletionModel,
        forms: MockFormsApi,
    ) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut config = Config::test_config();
        config.upload_dir = dir.path().join("uploads");

        let state = AppState::with_backends(
            config,
            Backends {
                pdf: Arc::new(pdf),
                ocr: Arc::new(ocr),
                model: Arc::new(model),
                forms: Arc::new(forms),
            },
        )
        .expect("state");

        (dir, state)
    }

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use validator::Validate;

    #[test]
    fn test_fixtures_sample_quiz_is_valid() {
        let quiz = sample_quiz();
        assert_eq!(quiz.questions.len(), 3);
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn test_fixtures_quiz_json_has_requested_count() {
        let quiz: super::Quiz = serde_json::from_str(&quiz_json(15)).unwrap();
        assert_eq!(quiz.questions.len(), 15);
        assert!(quiz.validate().is_ok());
    }

    #[test]
    fn test_fixtures_pdf_has_header() {
        let bytes = hello_world_pdf("Hello");
        assert!(bytes.starts_with(b"%PDF-1.5"));
    }
}
