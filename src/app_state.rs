use std::sync::Arc;

use crate::{
    auth::{GoogleTokenProvider, FORMS_BODY_SCOPE},
    config::Config,
    errors::AppResult,
    services::{
        file_store::FileStore,
        form_export_service::{FormExportService, FormsApi},
        google_forms_client::GoogleFormsClient,
        model_service::{CompletionModel, OpenAiCompatibleModel},
        quiz_service::QuizService,
        text_extractor::{LopdfTextSource, OcrEngine, PdfTextSource, TesseractOcr, TextExtractor},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub file_store: Arc<FileStore>,
    pub quiz_service: Arc<QuizService>,
    pub form_export_service: Arc<FormExportService>,
    pub config: Arc<Config>,
}

/// External collaborators the services talk to.
pub struct Backends {
    pub pdf: Arc<dyn PdfTextSource>,
    pub ocr: Arc<dyn OcrEngine>,
    pub model: Arc<dyn CompletionModel>,
    pub forms: Arc<dyn FormsApi>,
}

impl Backends {
    pub fn from_config(config: &Config) -> Self {
        let http = reqwest::Client::new();
        let tokens = Arc::new(GoogleTokenProvider::new(
            http.clone(),
            config.google_service_account_file.clone(),
            vec![FORMS_BODY_SCOPE],
        ));

        Self {
            pdf: Arc::new(LopdfTextSource),
            ocr: Arc::new(TesseractOcr::new(&config.tesseract_bin)),
            model: Arc::new(OpenAiCompatibleModel::new(
                &config.ai_api_base,
                &config.ai_api_key,
                config.ai_model.clone(),
            )),
            forms: Arc::new(GoogleFormsClient::new(http, &config.forms_api_base, tokens)),
        }
    }
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let backends = Backends::from_config(&config);
        Self::with_backends(config, backends)
    }

    pub fn with_backends(config: Config, backends: Backends) -> AppResult<Self> {
        let file_store = Arc::new(FileStore::new(&config.upload_dir)?);
        let extractor = Arc::new(TextExtractor::new(backends.pdf, backends.ocr));
        let quiz_service = Arc::new(QuizService::new(
            file_store.clone(),
            extractor,
            backends.model,
        ));
        let form_export_service = Arc::new(FormExportService::new(backends.forms));

        Ok(Self {
            file_store,
            quiz_service,
            form_export_service,
            config: Arc::new(config),
        })
    }
}
