pub mod file_store;
pub mod form_export_service;
pub mod google_forms_client;
pub mod model_service;
pub mod quiz_service;
pub mod text_extractor;
