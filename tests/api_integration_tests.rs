// API Integration Tests
//
// Purpose: Exercise every endpoint against an in-memory store
// Run with: cargo test --features api --test api_integration_tests

#[cfg(feature = "api")]
mod api_tests {
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use inventory_ranker::config::ServerConfig;
    use inventory_ranker::{create_router, AppState, InMemoryStore, SAMPLE_CSV};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt; // for oneshot

    // Helper: Create test app with a fresh in-memory store
    fn create_test_app(max_items: usize) -> axum::Router {
        let config = ServerConfig {
            max_items,
            ..ServerConfig::default()
        };
        let state = AppState::with_store(Arc::new(InMemoryStore::new()), &config);
        create_router(state)
    }

    // Helper: Parse JSON response
    async fn json_response(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        serde_json::from_slice(&body).expect("Failed to parse JSON")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn sample_payload() -> Value {
        let items = inventory_ranker::generate_sample_data(10);
        json!({ "data": items, "thresholds": { "A": 20, "B": 50 } })
    }

    // =========================================================================
    // Section 1: Health Check
    // =========================================================================

    #[tokio::test]
    async fn test_health_check() {
        let app = create_test_app(1000);
        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }

    // =========================================================================
    // Section 2: Create Analysis
    // =========================================================================

    #[tokio::test]
    async fn test_create_analysis() {
        let app = create_test_app(1000);
        let response = app.oneshot(post_json("/api/analyses", sample_payload())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["success"], true);
        assert!(body["analysisId"].is_string());
        assert_eq!(body["totalItems"], 10);

        let items = body["processedItems"].as_array().unwrap();
        assert_eq!(items.len(), 10);
        let classes: Vec<&str> = items.iter().map(|i| i["Class"].as_str().unwrap()).collect();
        assert_eq!(classes.iter().filter(|c| **c == "A").count(), 2);
        assert_eq!(classes.iter().filter(|c| **c == "B").count(), 3);

        for key in ["Criticality_Agg", "Demand_Agg", "Supply_Agg", "Unit_cost", "Size_Score"] {
            assert!(body["crispWeights"][key].is_number(), "missing {}", key);
        }
        for key in ["Risk", "Fluctuation", "Stock", "Usage", "Cost", "LeadTime", "Consignment", "Size"] {
            assert!(body["fuzzyWeights"][key].is_number(), "missing {}", key);
        }
    }

    #[tokio::test]
    async fn test_default_thresholds_when_omitted() {
        let app = create_test_app(1000);
        let payload = json!({ "data": inventory_ranker::generate_sample_data(10) });
        let response = app.oneshot(post_json("/api/analyses", payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        let a_count = body["processedItems"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|i| i["Class"] == "A")
            .count();
        assert_eq!(a_count, 2);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let app = create_test_app(1000);
        let response = app.oneshot(post_json("/api/analyses", json!({ "data": [] }))).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["totalItems"], 0);
        assert_eq!(body["crispWeights"]["Unit_cost"], 0.0);
    }

    #[tokio::test]
    async fn test_invalid_thresholds_rejected() {
        let app = create_test_app(1000);
        let payload = json!({ "data": [], "thresholds": { "A": 60, "B": 50 } });
        let response = app.oneshot(post_json("/api/analyses", payload)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("greater than A"));
    }

    #[tokio::test]
    async fn test_oversized_batch_rejected() {
        let app = create_test_app(5);
        let response = app.oneshot(post_json("/api/analyses", sample_payload())).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_batch_larger_than_default_body_limit() {
        let app = create_test_app(100_000);
        let payload = json!({ "data": inventory_ranker::generate_sample_data(15_000) });
        let body = payload.to_string();
        assert!(body.len() > 2 * 1024 * 1024);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/analyses")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["totalItems"], 15_000);
    }

    #[tokio::test]
    async fn test_malformed_json_returns_error_body() {
        let app = create_test_app(1000);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/analyses")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"data\": ["))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_response(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_fractional_lead_time_returns_error_body() {
        let app = create_test_app(1000);
        let mut item = serde_json::to_value(&inventory_ranker::generate_sample_data(1)[0]).unwrap();
        item["Lead time"] = json!(7.5);
        let response = app
            .oneshot(post_json("/api/analyses", json!({ "data": [item] })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_response(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_error_body() {
        let app = create_test_app(1000);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/analyses")
            .body(Body::from(sample_payload().to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_response(response).await;
        assert!(body["error"].as_str().unwrap().contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_create_analysis_from_csv() {
        let app = create_test_app(1000);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/analyses/csv?a=10&b=40")
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from(SAMPLE_CSV))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_response(response).await;
        assert_eq!(body["totalItems"], 10);
        let a_count = body["processedItems"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|i| i["Class"] == "A")
            .count();
        assert_eq!(a_count, 1);
    }

    // =========================================================================
    // Section 3: Stored Analyses
    // =========================================================================

    #[tokio::test]
    async fn test_list_and_fetch_analysis() {
        let app = create_test_app(1000);

        let created = app
            .clone()
            .oneshot(post_json("/api/analyses", sample_payload()))
            .await
            .unwrap();
        let created = json_response(created).await;
        let id = created["analysisId"].as_str().unwrap().to_string();

        let listed = app.clone().oneshot(get("/api/analyses")).await.unwrap();
        assert_eq!(listed.status(), StatusCode::OK);
        let listed = json_response(listed).await;
        let analyses = listed["analyses"].as_array().unwrap();
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0]["id"], id.as_str());
        assert!(analyses[0].get("items").is_none());

        let fetched = app.clone().oneshot(get(&format!("/api/analyses/{}", id))).await.unwrap();
        assert_eq!(fetched.status(), StatusCode::OK);
        let fetched = json_response(fetched).await;
        assert_eq!(fetched["analysis"]["id"], id.as_str());
        assert_eq!(fetched["items"], created["processedItems"]);

        // Second fetch is served from the cache
        let again = app.oneshot(get(&format!("/api/analyses/{}", id))).await.unwrap();
        assert_eq!(json_response(again).await, fetched);
    }

    #[tokio::test]
    async fn test_unknown_analysis_returns_404() {
        let app = create_test_app(1000);
        let response = app
            .oneshot(get("/api/analyses/00000000-0000-0000-0000-000000000000"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_response(response).await;
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_analysis_id_returns_400() {
        let app = create_test_app(1000);
        let response = app.oneshot(get("/api/analyses/not-an-id")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
