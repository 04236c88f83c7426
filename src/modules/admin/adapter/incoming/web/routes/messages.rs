use actix_web::{delete, get, patch, web, Responder};

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::admin::adapter::incoming::web::extractors::BearerToken;
use crate::modules::admin::adapter::incoming::web::routes::mutation_error_response;
use crate::modules::portfolio::domain::entities::ContactMessage;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List contact messages
///
/// Newest first. Unlike the public reads, failures are reported, not
/// masked by cached data.
#[utoipa::path(
    get,
    path = "/api/admin/messages",
    tag = "admin",
    responses(
        (status = 200, description = "Messages", body = inline(SuccessResponse<Vec<ContactMessage>>)),
        (status = 401, description = "Not signed in", body = ErrorResponse),
        (status = 502, description = "Backend failure", body = ErrorResponse)
    ),
    security(("BearerAuth" = []))
)]
#[get("/api/admin/messages")]
pub async fn list_messages_handler(token: BearerToken, data: web::Data<AppState>) -> impl Responder {
    match data.admin.messages.list_messages(Some(token.token())).await {
        Ok(messages) => ApiResponse::success(messages),
        Err(e) => mutation_error_response(&e),
    }
}

#[patch("/api/admin/messages/{id}/read")]
pub async fn mark_message_read_handler(
    token: BearerToken,
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .messages
        .mark_message_read(Some(token.token()), path.into_inner())
        .await
    {
        Ok(message) => ApiResponse::success(message),
        Err(e) => mutation_error_response(&e),
    }
}

#[delete("/api/admin/messages/{id}")]
pub async fn delete_message_handler(
    token: BearerToken,
    path: web::Path<i64>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .admin
        .messages
        .delete_message(Some(token.token()), path.into_inner())
        .await
    {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => mutation_error_response(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};

    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::fixtures::signed_in;

    fn seed_messages(backend: &crate::tests::support::in_memory_backend::InMemoryBackend) {
        backend.seed(
            "contact_messages",
            vec![
                json!({"id": 1, "name": "A", "email": "a@x.io", "subject": "Hi", "message": "first",
                       "is_read": false, "created_at": "2024-01-01T00:00:00Z"}),
                json!({"id": 2, "name": "B", "email": "b@x.io", "subject": "Yo", "message": "second",
                       "is_read": false, "created_at": "2024-02-01T00:00:00Z"}),
            ],
        );
    }

    #[actix_web::test]
    async fn lists_newest_first_and_marks_read() {
        let (state, backend) = TestAppStateBuilder::default().build();
        let token = signed_in(&backend).await;
        seed_messages(&backend);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_messages_handler)
                .service(mark_message_read_handler),
        )
        .await;
        let bearer = ("Authorization", format!("Bearer {}", token.as_str()));

        let req = test::TestRequest::get()
            .uri("/api/admin/messages")
            .insert_header(bearer.clone())
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"][0]["id"], 2);
        assert_eq!(body["data"][1]["id"], 1);

        let req = test::TestRequest::patch()
            .uri("/api/admin/messages/1/read")
            .insert_header(bearer)
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["data"]["is_read"], true);
    }

    #[actix_web::test]
    async fn backend_failure_is_reported() {
        let (state, backend) = TestAppStateBuilder::default().build();
        let token = signed_in(&backend).await;
        backend.fail_table("contact_messages", true);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(list_messages_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/admin/messages")
            .insert_header(("Authorization", format!("Bearer {}", token.as_str())))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(!resp.status().is_success());
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BACKEND_ERROR");
    }

    #[actix_web::test]
    async fn delete_without_token_leaves_messages() {
        let (state, backend) = TestAppStateBuilder::default().build();
        seed_messages(&backend);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(delete_message_handler),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/api/admin/messages/1")
            .to_request();

        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(backend.rows("contact_messages").len(), 2);
    }
}
