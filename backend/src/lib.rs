//! Agent Service - delivery agent records over HTTP
//!
//! This library provides the models, services and HTTP handlers for the
//! agent service. The binary in `main.rs` wires them to a storage backend.

use actix_web::HttpResponse;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::{Config, StorageBackend};
pub use error::AppError;

pub use models::{
    Agent, AgentChanges, AgentStatus, CreateAgentRequest, NewAgent, UpdateAgentRequest,
    UpdateRatingRequest, UpdateStatusRequest,
};

pub use services::{
    AgentCodeSource, AgentFields, AgentLifecycleService, AgentServiceError, AgentStore,
    InMemoryAgentStore, PgAgentStore, RandomCodeGenerator, StoreError,
};

/// Application state shared across handlers
pub struct AppState {
    pub agents: AgentLifecycleService,
}

/// Health check endpoint
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "agent-service"
    }))
}
