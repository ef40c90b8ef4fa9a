use std::sync::atomic::Ordering;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::info;
use uuid::Uuid;

use super::actions::{self, CAPABILITIES};
use super::types::{ActionRequest, AgentError, AgentServer, AgentState};
use crate::stats::{self, TaskStats};
use crate::tasks::types::Task;

impl AgentServer {
    pub fn new(state: AgentState, address: &str, port: u16) -> Self {
        Self {
            state,
            address: address.to_string(),
            port,
        }
    }

    pub fn router(state: AgentState) -> Router {
        Router::new()
            .route("/tasks", get(list_tasks).post(create_task))
            .route("/tasks/{id}", delete(delete_task))
            .route("/stats", get(get_stats))
            .route("/agent", get(agent_status).post(run_action))
            .route("/agent/start", post(start_agent))
            .route("/agent/pause", post(pause_agent))
            .with_state(state)
    }

    pub async fn start_server(self) -> Result<(), AgentError> {
        let addr = format!("{}:{}", self.address, self.port);
        info!(%addr, "starting agent server");

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| AgentError::Bind {
                addr: addr.clone(),
                source,
            })?;

        axum::serve(listener, Self::router(self.state))
            .await
            .map_err(AgentError::Serve)
    }
}

async fn list_tasks(State(state): State<AgentState>) -> Json<Vec<Task>> {
    Json(state.simulator.lock().await.list_tasks())
}

async fn create_task(State(state): State<AgentState>) -> impl IntoResponse {
    let task = state.simulator.lock().await.create_task(Utc::now());
    info!(id = %task.id, title = %task.title, platform = %task.platform, "task queued");
    (StatusCode::CREATED, Json(task))
}

async fn delete_task(State(state): State<AgentState>, Path(id): Path<Uuid>) -> StatusCode {
    // Absent ids are a silent no-op, so deletion always answers 204.
    state.simulator.lock().await.delete_task(id);
    StatusCode::NO_CONTENT
}

async fn get_stats(State(state): State<AgentState>) -> Json<TaskStats> {
    let tasks = state.simulator.lock().await.list_tasks();
    Json(stats::project(&tasks))
}

async fn agent_status(State(state): State<AgentState>) -> Json<Value> {
    Json(json!({
        "status": "online",
        "running": state.running.load(Ordering::SeqCst),
        "pending": state.pending.load(Ordering::SeqCst),
        "capabilities": CAPABILITIES,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn run_action(Json(request): Json<ActionRequest>) -> Json<Value> {
    Json(actions::dispatch(&request.action, request.platform.as_deref()))
}

async fn start_agent(State(state): State<AgentState>) -> StatusCode {
    state.running.store(true, Ordering::SeqCst);
    info!("agent started");
    StatusCode::NO_CONTENT
}

async fn pause_agent(State(state): State<AgentState>) -> StatusCode {
    state.running.store(false, Ordering::SeqCst);
    info!("agent paused");
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::types::Simulator;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_router() -> (Router, AgentState) {
        let state = AgentState::new(Simulator::with_seed(42), false);
        (AgentServer::router(state.clone()), state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn tasks_endpoint_lists_the_collection() {
        let (router, state) = test_router();
        state.simulator.lock().await.seed_tasks(Utc::now());

        let response = router
            .oneshot(Request::builder().uri("/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json.as_array().unwrap().len(), 5);
        assert_eq!(json[0]["status"], "pending");
    }

    #[tokio::test]
    async fn creating_a_task_returns_it_and_grows_the_collection() {
        let (router, state) = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/tasks")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert!(json["id"].as_str().is_some());
        assert_eq!(state.simulator.lock().await.task_count(), 1);
    }

    #[tokio::test]
    async fn deleting_an_unknown_id_is_a_noop() {
        let (router, state) = test_router();
        state.simulator.lock().await.seed_tasks(Utc::now());

        let response = router
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/tasks/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(state.simulator.lock().await.task_count(), 5);
    }

    #[tokio::test]
    async fn stats_endpoint_projects_the_collection() {
        let (router, state) = test_router();
        state.simulator.lock().await.seed_tasks(Utc::now());

        let response = router
            .oneshot(Request::builder().uri("/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["total"], 5);
        assert_eq!(json["pending"], 5);
        assert_eq!(json["completed"], 0);
    }

    #[tokio::test]
    async fn agent_status_reports_the_run_flag() {
        let (router, state) = test_router();
        state.running.store(true, Ordering::SeqCst);

        let response = router
            .oneshot(Request::builder().uri("/agent").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["status"], "online");
        assert_eq!(json["running"], true);
        assert_eq!(json["capabilities"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn start_and_pause_flip_the_run_flag() {
        let (router, state) = test_router();

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/agent/start")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(state.running.load(Ordering::SeqCst));

        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/agent/pause")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(!state.running.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn unknown_action_returns_a_structured_failure() {
        let (router, _) = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/agent")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"action":"teleport-audience"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Unknown action");
    }

    #[tokio::test]
    async fn schedule_post_action_echoes_the_platform() {
        let (router, _) = test_router();

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/agent")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"action":"schedule-post","platform":"LinkedIn","data":{}}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["scheduled"]["platform"], "LinkedIn");
    }
}
