//! GraphQL Service Integration Tests
//!
//! Runs GraphQlService against a local axum endpoint.

#[cfg(test)]
mod tests {
    use std::convert::Infallible;
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::sse::{Event, Sse};
    use axum::response::{IntoResponse, Response};
    use axum::routing::post;
    use axum::{Json, Router};
    use futures::StreamExt;
    use serde_json::{json, Value};

    use crate::config::{AuthMode, ServiceConfig};
    use crate::domain::{ItemId, NewItem};
    use crate::error::RemoteError;
    use crate::remote::{GraphQlService, RemoteDataService};

    #[derive(Clone, Default)]
    struct Backend {
        /// (api key, authorization) per request
        credentials: Arc<Mutex<Vec<(Option<String>, Option<String>)>>>,
        bodies: Arc<Mutex<Vec<Value>>>,
    }

    fn header(headers: &HeaderMap, name: impl axum::http::header::AsHeaderName) -> Option<String> {
        headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_string)
    }

    async fn graphql(
        State(backend): State<Backend>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> Response {
        backend
            .credentials
            .lock()
            .unwrap()
            .push((header(&headers, "x-api-key"), header(&headers, AUTHORIZATION)));
        backend.bodies.lock().unwrap().push(body.clone());

        if header(&headers, ACCEPT).as_deref() == Some("text/event-stream") {
            let events = vec![
                Ok::<_, Infallible>(
                    Event::default()
                        .event("next")
                        .data(created_event("5", "E", None)),
                ),
                Ok(Event::default().event("next").data(r#"{"errors":[{"message":"boom"}]}"#)),
                Ok(Event::default().event("complete")),
                Ok(Event::default().event("next").data(created_event("6", "after", Some("")))),
            ];
            return Sse::new(futures::stream::iter(events)).into_response();
        }

        let query = body["query"].as_str().unwrap_or_default();
        let input = &body["variables"]["input"];
        if query.contains("listTodos") {
            Json(json!({"data": {"listTodos": {"items": [
                {"id": "1", "name": "A", "description": null},
                {"id": "2", "name": "B", "description": "b"}
            ]}}}))
            .into_response()
        } else if query.contains("createTodo") {
            Json(json!({"data": {"createTodo": {
                "id": "3",
                "name": input["name"],
                "description": input["description"]
            }}}))
            .into_response()
        } else if query.contains("deleteTodo") {
            if input["id"] == "locked" {
                Json(json!({
                    "data": {"deleteTodo": null},
                    "errors": [{"message": "The conditional request failed"}]
                }))
                .into_response()
            } else {
                Json(json!({"data": {"deleteTodo": {"id": input["id"]}}})).into_response()
            }
        } else {
            (StatusCode::BAD_REQUEST, "unknown operation").into_response()
        }
    }

    fn created_event(id: &str, name: &str, description: Option<&str>) -> String {
        json!({"data": {"onCreateTodo": {"id": id, "name": name, "description": description}}})
            .to_string()
    }

    /// Feed whose last frame is cut off before its blank line
    async fn unterminated_feed() -> Response {
        let body = format!("event: next\ndata: {}", created_event("8", "last", Some("x")));
        ([(CONTENT_TYPE, "text/event-stream")], body).into_response()
    }

    async fn broken() -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, "resolver exploded").into_response()
    }

    async fn spawn_backend() -> (String, Backend) {
        let backend = Backend::default();
        let app = Router::new()
            .route("/graphql", post(graphql))
            .route("/broken", post(broken))
            .route("/unterminated", post(unterminated_feed))
            .with_state(backend.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), backend)
    }

    fn api_key_config(endpoint: String) -> ServiceConfig {
        ServiceConfig {
            endpoint,
            api_key: Some("test-key".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_decodes_items_in_order() {
        let (base, backend) = spawn_backend().await;
        let service = GraphQlService::new(&api_key_config(format!("{}/graphql", base))).unwrap();

        let items = service.list(10).await.unwrap();

        let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(items[0].description, "");
        let bodies = backend.bodies.lock().unwrap();
        assert_eq!(bodies[0]["variables"]["limit"], 10);
        let credentials = backend.credentials.lock().unwrap();
        assert_eq!(credentials[0].0.as_deref(), Some("test-key"));
    }

    #[tokio::test]
    async fn test_create_returns_canonical_item() {
        let (base, _backend) = spawn_backend().await;
        let service = GraphQlService::new(&api_key_config(format!("{}/graphql", base))).unwrap();

        let item = service.create(&NewItem::new("C", "desc")).await.unwrap();

        assert_eq!(item.id, ItemId::new("3"));
        assert_eq!(item.name, "C");
        assert_eq!(item.description, "desc");
    }

    #[tokio::test]
    async fn test_delete_maps_graphql_errors() {
        let (base, _backend) = spawn_backend().await;
        let service = GraphQlService::new(&api_key_config(format!("{}/graphql", base))).unwrap();

        service.delete(&ItemId::new("1")).await.unwrap();
        let err = service.delete(&ItemId::new("locked")).await.unwrap_err();
        match err {
            RemoteError::GraphQl(messages) => {
                assert_eq!(messages, vec!["The conditional request failed"])
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_failure_is_status_error() {
        let (base, _backend) = spawn_backend().await;
        let service = GraphQlService::new(&api_key_config(format!("{}/broken", base))).unwrap();

        let err = service.list(10).await.unwrap_err();
        match err {
            RemoteError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "resolver exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_user_pool_token_header() {
        let (base, backend) = spawn_backend().await;
        let config = ServiceConfig {
            endpoint: format!("{}/graphql", base),
            auth_mode: AuthMode::UserPool,
            auth_token: Some("eyJ.token".to_string()),
            ..Default::default()
        };
        let service = GraphQlService::new(&config).unwrap();

        service.list(10).await.unwrap();

        let credentials = backend.credentials.lock().unwrap();
        assert_eq!(credentials[0], (None, Some("eyJ.token".to_string())));
    }

    #[tokio::test]
    async fn test_subscription_streams_until_complete() {
        let (base, _backend) = spawn_backend().await;
        let service = GraphQlService::new(&api_key_config(format!("{}/graphql", base))).unwrap();

        let subscription = service.subscribe_on_create().await.unwrap();
        let events: Vec<_> = subscription.collect().await;

        assert_eq!(events.len(), 2);
        let first = events[0].as_ref().unwrap();
        assert_eq!(first.id, ItemId::new("5"));
        assert_eq!(first.name, "E");
        assert!(matches!(
            &events[1],
            Err(RemoteError::GraphQl(messages)) if messages == &vec!["boom".to_string()]
        ));
    }

    #[tokio::test]
    async fn test_subscription_delivers_frame_cut_off_at_close() {
        let (base, _backend) = spawn_backend().await;
        let service =
            GraphQlService::new(&api_key_config(format!("{}/unterminated", base))).unwrap();

        let subscription = service.subscribe_on_create().await.unwrap();
        let events: Vec<_> = subscription.collect().await;

        assert_eq!(events.len(), 1);
        let item = events[0].as_ref().unwrap();
        assert_eq!(item.id, ItemId::new("8"));
        assert_eq!(item.description, "x");
    }

    #[test]
    fn test_new_rejects_incomplete_config() {
        let config = ServiceConfig {
            endpoint: "http://localhost:1/graphql".to_string(),
            ..Default::default()
        };
        assert!(GraphQlService::new(&config).is_err());
    }
}
