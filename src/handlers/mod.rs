pub mod health_handler;
pub mod quiz_handler;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::{app_state::AppState, errors::AppError};

pub use health_handler::health_check;
pub use quiz_handler::{export_google_form, generate_quiz, quiz_schema, upload_file};

/// Registers shared state and every route of the service.
pub fn configure_routes(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .service(upload_file)
            .service(generate_quiz)
            .service(export_google_form)
            .service(quiz_schema)
            .service(health_check);
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::InvalidInput(err.to_string()).into()
}
