use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize};

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::simulator::types::Simulator;

/// Shared state behind every route: the simulator, the run flag and the
/// pending gauge the tick loop reports into.
#[derive(Clone)]
pub struct AgentState {
    pub simulator: Arc<Mutex<Simulator>>,
    pub running: Arc<AtomicBool>,
    pub pending: Arc<AtomicUsize>,
}

impl AgentState {
    pub fn new(simulator: Simulator, running: bool) -> Self {
        Self {
            simulator: Arc::new(Mutex::new(simulator)),
            running: Arc::new(AtomicBool::new(running)),
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }
}

pub struct AgentServer {
    pub state: AgentState,
    pub address: String,
    pub port: u16,
}

/// Request body for the mock action endpoint. `data` is accepted for
/// compatibility with the dashboard client but never inspected.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    pub platform: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server stopped unexpectedly")]
    Serve(#[source] std::io::Error),
}
