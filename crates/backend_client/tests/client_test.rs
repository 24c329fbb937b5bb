//! Integration tests for BackendClient against a mock backend

use backend_client::{ApiError, BackendClient, BackendClientTrait, PromptRequest};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn workspace_json(id: &str, name: &str, file_count: u64, size: u64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "created_at": "2025-03-14T09:26:53",
        "file_count": file_count,
        "size": size
    })
}

#[tokio::test]
async fn list_workspaces_preserves_backend_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspace/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            workspace_json("ws-2", "notes", 4, 4096),
            workspace_json("ws-1", "scratch", 0, 0),
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(mock_server.uri());
    let workspaces = client.list_workspaces().await.unwrap();

    assert_eq!(workspaces.len(), 2);
    assert_eq!(workspaces[0].id, "ws-2");
    assert_eq!(workspaces[0].size_bytes, 4096);
    assert_eq!(workspaces[1].id, "ws-1");
}

#[tokio::test]
async fn create_workspace_posts_name_as_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/workspace/create"))
        .and(body_json(serde_json::json!({ "name": "demo" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "workspace_id": "ws-42",
            "message": "Workspace 'demo' created successfully"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(mock_server.uri());
    let created = client.create_workspace("demo").await.unwrap();

    assert_eq!(created.workspace_id, "ws-42");
}

#[tokio::test]
async fn non_2xx_response_carries_status_and_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prompt/process"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(mock_server.uri());
    let request = PromptRequest {
        workspace_id: "ws-1".to_string(),
        prompt: "create a.txt".to_string(),
    };

    let err = client.process_prompt(&request).await.unwrap_err();
    match &err {
        ApiError::Status { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "internal error");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("internal error"));
}

#[tokio::test]
async fn not_found_workspace_surfaces_as_generic_status_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/workspace/missing"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"detail": "Workspace not found"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(mock_server.uri());
    let err = client.get_workspace("missing").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.to_string().contains("Workspace not found"));
}

#[tokio::test]
async fn malformed_body_fails_closed() {
    let mock_server = MockServer::start().await;

    // An object where a workspace array is expected must not be coerced
    // into an empty list.
    Mock::given(method("GET"))
        .and(path("/workspace/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"unexpected": "shape"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(mock_server.uri());
    let err = client.list_workspaces().await.unwrap_err();

    assert!(matches!(err, ApiError::InvalidBody(_)));
}

#[tokio::test]
async fn semantic_prompt_failure_is_a_normal_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/prompt/process"))
        .and(body_json(serde_json::json!({
            "workspace_id": "ws-1",
            "prompt": "delete everything"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "operations": [],
            "errors": ["disk full"],
            "confidence": 0.9,
            "reasoning": "interpreted as wildcard delete",
            "method": "llm",
            "file_path": "",
            "success_message": "❌ Operation failed with 1 errors"
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(mock_server.uri());
    let request = PromptRequest {
        workspace_id: "ws-1".to_string(),
        prompt: "delete everything".to_string(),
    };

    let result = client.process_prompt(&request).await.unwrap();
    assert!(!result.success);
    assert_eq!(result.errors, vec!["disk full".to_string()]);
}

#[tokio::test]
async fn list_files_unwraps_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/operations/list/ws-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "files": [
                {"name": "a.txt", "path": "a.txt", "size": 12, "is_directory": false},
                {"name": "src", "path": "src", "size": null, "is_directory": true}
            ]
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(mock_server.uri());
    let files = client.list_files("ws-1").await.unwrap();

    assert_eq!(files.len(), 2);
    assert_eq!(files[0].name, "a.txt");
    assert_eq!(files[0].size, 12);
    assert!(files[1].is_directory);
    assert_eq!(files[1].size, 0);
}

#[tokio::test]
async fn health_probes_parse() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "service": "mcp-filesystem-server"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/prompt/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "healthy",
            "llm_available": true,
            "method": "llm_only"
        })))
        .mount(&mock_server)
        .await;

    let client = BackendClient::new(mock_server.uri());

    let health = client.check_health().await.unwrap();
    assert_eq!(health.status, "healthy");

    let prompt_health = client.check_prompt_health().await.unwrap();
    assert!(prompt_health.llm_available);
    assert_eq!(prompt_health.method, "llm_only");
}

#[tokio::test]
async fn request_deadline_resolves_hung_backend_as_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "healthy" }))
                .set_delay(std::time::Duration::from_secs(5)),
        )
        .mount(&mock_server)
        .await;

    let client =
        BackendClient::with_timeout(mock_server.uri(), std::time::Duration::from_millis(100));
    let err = client.check_health().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Nothing listens on the discard port.
    let client = BackendClient::new("http://127.0.0.1:1");
    let err = client.check_health().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}
