use std::sync::Arc;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Question, Quiz},
        forms::{
            ChoiceOption, ChoiceQuestion, ChoiceType, CorrectAnswer, CorrectAnswers,
            CreateItemRequest, Form, FormInfo, FormQuestion, FormRequest, Grading, Item,
            Location, QuestionItem, UpdateSettingsRequest,
        },
    },
};

// A leading letter A-D, optionally followed by `)`, `.` or `:`, then optional
// whitespace. The letter is always consumed, even when it starts a word.
static OPTION_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Da-d][).:]?\s*").expect("OPTION_PREFIX is a valid regex pattern")
});

/// The subset of the Google Forms API the exporter drives.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormsApi: Send + Sync {
    async fn create_form(&self, info: FormInfo) -> AppResult<Form>;
    async fn batch_update(&self, form_id: &str, requests: Vec<FormRequest>) -> AppResult<()>;
    async fn get_form(&self, form_id: &str) -> AppResult<Form>;
}

pub struct FormExportService {
    forms: Arc<dyn FormsApi>,
}

impl FormExportService {
    pub fn new(forms: Arc<dyn FormsApi>) -> Self {
        Self { forms }
    }

    /// Creates a graded form for `quiz` and returns its responder link.
    ///
    /// A failure after the form was created leaves it behind incomplete.
    pub async fn export(&self, quiz: &Quiz) -> AppResult<String> {
        let items = quiz
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| build_question_item(question, index).map(FormRequest::CreateItem))
            .collect::<AppResult<Vec<_>>>()?;

        let form = self.forms.create_form(FormInfo::titled(&quiz.title)).await?;
        log::info!("Created form {} for quiz '{}'", form.form_id, quiz.title);

        self.forms
            .batch_update(
                &form.form_id,
                vec![FormRequest::UpdateSettings(UpdateSettingsRequest::enable_quiz_mode())],
            )
            .await?;

        if !items.is_empty() {
            self.forms.batch_update(&form.form_id, items).await?;
        }

        let finalized = self.forms.get_form(&form.form_id).await?;
        let url = finalized.responder_uri.ok_or_else(|| {
            AppError::ExportError(format!("form {} has no responder link", form.form_id))
        })?;

        log::info!(
            "Exported {} questions to form {}",
            quiz.questions.len(),
            form.form_id
        );
        Ok(url)
    }
}

pub fn strip_option_prefix(option: &str) -> String {
    OPTION_PREFIX.replace(option.trim(), "").into_owned()
}

/// Picks the graded value: the first original option whose text contains the
/// correct answer (case-insensitive), prefix-stripped. Falls back to the first
/// cleaned option when nothing matches.
pub fn match_correct_answer(options: &[String], correct_answer: &str) -> Option<String> {
    let needle = correct_answer.trim().to_lowercase();

    options
        .iter()
        .find(|option| option.to_lowercase().contains(&needle))
        .or_else(|| options.first())
        .map(|option| strip_option_prefix(option))
}

pub fn build_question_item(question: &Question, index: usize) -> AppResult<CreateItemRequest> {
    let correct = match_correct_answer(&question.options, &question.correct_answer)
        .ok_or_else(|| {
            AppError::ExportError(format!("question '{}' has no options", question.question))
        })?;

    let options = question
        .options
        .iter()
        .map(|option| ChoiceOption {
            value: strip_option_prefix(option),
        })
        .collect();

    Ok(CreateItemRequest {
        item: Item {
            title: question.question.clone(),
            question_item: QuestionItem {
                question: FormQuestion {
                    required: true,
                    grading: Grading {
                        point_value: question.difficulty.points(),
                        correct_answers: CorrectAnswers {
                            answers: vec![CorrectAnswer { value: correct }],
                        },
                    },
                    choice_question: ChoiceQuestion {
                        kind: ChoiceType::Radio,
                        options,
                        shuffle: question.shuffle,
                    },
                },
            },
        },
        location: Location {
            index: u32::try_from(index)
                .map_err(|_| AppError::ExportError("too many questions".to_string()))?,
        },
    })
}
