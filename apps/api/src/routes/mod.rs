pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::resumes::handlers as resumes;
use crate::state::AppState;
use crate::suggestion::handlers as suggestion;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/resumes", post(resumes::handle_create_resume))
        .route(
            "/api/resumes/:id",
            get(resumes::handle_get_resume)
                .put(resumes::handle_update_resume)
                .delete(resumes::handle_delete_resume),
        )
        .route(
            "/api/resumes/user/:user_id",
            get(resumes::handle_list_user_resumes),
        )
        .route("/api/resume/upload", post(resumes::handle_upload_resume))
        // Suggestions
        .route("/api/suggest", post(suggestion::handle_suggest))
        .route(
            "/api/generate-resume",
            post(suggestion::handle_generate_resume),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::retrieval::embedder::Embedder;
    use crate::storage::{InMemoryResumeRepository, InMemorySuggestionStore};
    use crate::suggestion::generator::ChatCompleter;
    use crate::test_support::{ConstantEmbedder, FailingChat, FailingEmbedder, ScriptedChat};

    fn state_with(embedder: Arc<dyn Embedder>, llm: Arc<dyn ChatCompleter>) -> AppState {
        AppState {
            resumes: Arc::new(InMemoryResumeRepository::new()),
            suggestions: Arc::new(InMemorySuggestionStore::new()),
            embedder,
            llm,
            config: Config::default(),
        }
    }

    fn default_state() -> AppState {
        state_with(
            Arc::new(ConstantEmbedder(vec![1.0, 0.0])),
            Arc::new(ScriptedChat::new(
                r#"{"skills": ["Python", "SQL", "Pandas"], "categories": ["Data"]}"#,
            )),
        )
    }

    fn resume_body() -> Value {
        json!({
            "contact": {
                "fullName": "Ada Lovelace",
                "email": "ada@example.com",
                "phone": "555-0100",
                "location": "London"
            },
            "summary": "Mathematician and first programmer.",
            "education": [{
                "institution": "University of London",
                "degree": "BSc",
                "field": "Mathematics",
                "startDate": "1830-01"
            }],
            "experience": [{
                "company": "Analytical Engines Ltd",
                "position": "Programmer",
                "startDate": "1842-01",
                "description": "Wrote the first published algorithm."
            }],
            "skills": [{ "category": "Mathematics", "items": ["Calculus"] }]
        })
    }

    async fn send(state: &AppState, request: Request<Body>) -> Response {
        build_router(state.clone()).oneshot(request).await.unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(state: &AppState) -> Uuid {
        let response = send(state, json_request("POST", "/api/resumes", &resume_body())).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let record = body_json(response).await;
        record["id"].as_str().unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(&default_state(), get("/health")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_short_summary_is_rejected_and_not_stored() {
        let state = default_state();
        let mut body = resume_body();
        body["summary"] = json!("Too short");

        let response = send(&state, json_request("POST", "/api/resumes", &body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error = body_json(response).await;
        assert_eq!(error["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(error["error"]["fields"][0]["field"], "summary");

        let listed = send(&state, get("/api/resumes/user/test-user")).await;
        assert_eq!(body_json(listed).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_stores_record_and_indexes_fragments() {
        let state = default_state();
        let id = create(&state).await;

        let fetched = body_json(send(&state, get(&format!("/api/resumes/{id}"))).await).await;
        assert_eq!(fetched["userId"], "test-user");
        assert_eq!(fetched["template"], "modern");
        assert_eq!(fetched["data"]["contact"]["fullName"], "Ada Lovelace");

        // summary, one experience description, one education line
        let fragments = state.suggestions.get_all(id).await.unwrap();
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[2].text, "BSc in Mathematics from University of London");
    }

    #[tokio::test]
    async fn test_create_succeeds_when_embeddings_unavailable() {
        let state = state_with(Arc::new(FailingEmbedder), Arc::new(FailingChat));
        let id = create(&state).await;

        let fetched = send(&state, get(&format!("/api/resumes/{id}"))).await;
        assert_eq!(fetched.status(), StatusCode::OK);
        assert!(state.suggestions.get_all(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_owner_header_and_listing() {
        let state = default_state();
        let request = Request::builder()
            .method("POST")
            .uri("/api/resumes")
            .header(header::CONTENT_TYPE, "application/json")
            .header("X-User-Id", "alice")
            .body(Body::from(resume_body().to_string()))
            .unwrap();
        assert_eq!(send(&state, request).await.status(), StatusCode::CREATED);
        create(&state).await;

        let alice = body_json(send(&state, get("/api/resumes/user/alice")).await).await;
        assert_eq!(alice.as_array().unwrap().len(), 1);
        let nobody = body_json(send(&state, get("/api/resumes/user/nobody")).await).await;
        assert_eq!(nobody, json!([]));
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let state = default_state();
        let id = create(&state).await;
        let mut body = resume_body();
        body["summary"] = json!("Analyst of the Analytical Engine.");

        let response = send(
            &state,
            json_request("PUT", &format!("/api/resumes/{id}"), &body),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated = body_json(response).await;
        assert_eq!(updated["data"]["summary"], "Analyst of the Analytical Engine.");

        let fragments = state.suggestions.get_all(id).await.unwrap();
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].text, "Analyst of the Analytical Engine.");
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let state = default_state();
        let id = Uuid::new_v4();

        let response = send(&state, get(&format!("/api/resumes/{id}"))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");

        let response = send(
            &state,
            json_request("PUT", &format!("/api/resumes/{id}"), &resume_body()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &state,
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/resumes/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_ids_are_not_found() {
        let state = default_state();

        let response = send(&state, get("/api/resumes/123")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");

        let response = send(
            &state,
            json_request("PUT", "/api/resumes/123", &resume_body()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &state,
            Request::builder()
                .method("DELETE")
                .uri("/api/resumes/123")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_cascades_to_fragments() {
        let state = default_state();
        let id = create(&state).await;

        let response = send(
            &state,
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/resumes/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let fetched = send(&state, get(&format!("/api/resumes/{id}"))).await;
        assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
        assert!(state.suggestions.get_all(id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_suggest_skills_returns_typed_payload() {
        let state = default_state();
        let response = send(
            &state,
            json_request(
                "POST",
                "/api/suggest",
                &json!({ "section": "skills", "content": "Python, SQL" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["suggestion"]["skills"].is_array());
        assert!(body["suggestion"]["categories"].is_array());
    }

    #[tokio::test]
    async fn test_suggest_accepts_any_resume_id() {
        let state = default_state();
        create(&state).await;

        for resume_id in ["r1", ""] {
            let response = send(
                &state,
                json_request(
                    "POST",
                    "/api/suggest",
                    &json!({ "section": "skills", "content": "Python", "resumeId": resume_id }),
                ),
            )
            .await;
            assert_eq!(response.status(), StatusCode::OK, "{resume_id:?}");
            assert!(body_json(response).await["suggestion"]["skills"].is_array());
        }
    }

    #[tokio::test]
    async fn test_suggest_failure_is_masked() {
        let state = state_with(Arc::new(FailingEmbedder), Arc::new(FailingChat));
        let response = send(
            &state,
            json_request(
                "POST",
                "/api/suggest",
                &json!({ "section": "summary", "content": "x" }),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "An AI processing error occurred");
        assert!(!body.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_generate_resume_fills_draft() {
        let state = state_with(
            Arc::new(FailingEmbedder),
            Arc::new(ScriptedChat::new(
                r#"{"summary": "Generated.", "description": "Generated.", "achievements": [], "keywords": []}"#,
            )),
        );
        let response = send(
            &state,
            json_request("POST", "/api/generate-resume", &json!({ "currentData": {} })),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let doc = body_json(response).await;
        assert_eq!(doc["summary"], "Generated.");
        assert_eq!(doc["experience"][0]["company"], "Previous Company");
        assert_eq!(doc["experience"][0]["description"], "Generated.");
        assert_eq!(doc["skills"][0]["category"], "Technical Skills");
    }

    #[tokio::test]
    async fn test_generate_resume_without_draft() {
        let state = state_with(
            Arc::new(FailingEmbedder),
            Arc::new(ScriptedChat::new(
                r#"{"summary": "Generated.", "description": "Generated.", "achievements": [], "keywords": []}"#,
            )),
        );
        for body in [json!({ "currentData": null }), json!({})] {
            let response = send(&state, json_request("POST", "/api/generate-resume", &body)).await;
            assert_eq!(response.status(), StatusCode::OK, "{body}");
            assert_eq!(body_json(response).await["summary"], "Generated.");
        }
    }

    fn multipart(filename: &str, content: &str) -> Request<Body> {
        let body = format!(
            "--BOUNDARY\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n\
             {content}\r\n\
             --BOUNDARY--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/api/resume/upload")
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_text_prefills_contact() {
        let response = send(
            &default_state(),
            multipart("cv.txt", "Ada Lovelace ada@example.com"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["contact"]["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn test_upload_unknown_extension_is_unsupported() {
        let response = send(&default_state(), multipart("cv.exe", "MZ")).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
