use actix_multipart::Multipart;
use actix_web::{get, post, web, HttpResponse};
use futures::StreamExt;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::Quiz,
        dto::{
            request::{ExportQuizRequest, GenerateQuizRequest},
            response::{ExportResponse, QuizResponse, UploadResponse},
        },
    },
};

const UPLOAD_FIELD: &str = "file";

#[post("/upload/")]
async fn upload_file(
    state: web::Data<AppState>,
    mut payload: Multipart,
) -> Result<HttpResponse, AppError> {
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| AppError::InvalidInput(e.to_string()))?;
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let original_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .unwrap_or_default()
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::InvalidInput(e.to_string()))?;
            bytes.extend_from_slice(&chunk);
        }

        let filename = state.file_store.save(&original_name, &bytes).await?;
        return Ok(HttpResponse::Ok().json(UploadResponse { filename }));
    }

    Err(AppError::MissingInput(format!(
        "multipart field '{}'",
        UPLOAD_FIELD
    )))
}

#[post("/generate-quiz/")]
async fn generate_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let filename = request
        .filename()
        .ok_or_else(|| AppError::MissingInput("filename".to_string()))?;

    log::info!("Generating quiz for upload '{}'", filename);
    let quiz = state.quiz_service.generate_from_upload(filename).await?;
    Ok(HttpResponse::Ok().json(QuizResponse { quiz }))
}

#[post("/export-google-forms/")]
async fn export_google_form(
    state: web::Data<AppState>,
    request: web::Json<ExportQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let quiz = request
        .into_inner()
        .quiz
        .ok_or_else(|| AppError::MissingInput("quiz".to_string()))?;

    let url = state.form_export_service.export(&quiz).await?;
    Ok(HttpResponse::Ok().json(ExportResponse { url }))
}

/// JSON schema of the quiz returned by generation and accepted by export.
#[get("/quiz-schema")]
async fn quiz_schema() -> HttpResponse {
    HttpResponse::Ok().json(Quiz::json_schema())
}
