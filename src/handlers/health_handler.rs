use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let uploads_ready = state.file_store.root().is_dir();

    let response = serde_json::json!({
        "status": if uploads_ready { "healthy" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "model": state.config.ai_model,
    });

    if uploads_ready {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, test_utils::test_helpers::assert_success_status};
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_check() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::test_config();
        config.upload_dir = dir.path().to_path_buf();
        let state = AppState::new(config).unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health_check),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_success_status(resp.status());

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["model"], "gemini-2.5-flash");
    }
}
