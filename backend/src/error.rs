use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::services::{AgentServiceError, StoreError};

/// Application-level error type
#[derive(Debug)]
pub enum AppError {
    /// Database error
    Database(sqlx::Error),
    /// Validation error
    Validation(String),
    /// Not found error
    NotFound(String),
    /// Forbidden status change
    InvalidTransition(String),
    /// Internal server error
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
    meta: ErrorMeta,
}

#[derive(Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct ErrorMeta {
    request_id: String,
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Database(e) => write!(f, "Database error: {e}"),
            Self::Validation(msg) => write!(f, "Validation error: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::InvalidTransition(msg) => write!(f, "Invalid transition: {msg}"),
            Self::Internal(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse {
            error: ErrorBody {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details: None,
            },
            meta: ErrorMeta {
                request_id: uuid::Uuid::new_v4().to_string(),
            },
        };

        match self {
            Self::Database(_) | Self::Internal(_) => {
                HttpResponse::InternalServerError().json(error_response)
            }
            Self::Validation(_) | Self::InvalidTransition(_) => {
                HttpResponse::BadRequest().json(error_response)
            }
            Self::NotFound(_) => HttpResponse::NotFound().json(error_response),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err)
    }
}

impl From<AgentServiceError> for AppError {
    fn from(err: AgentServiceError) -> Self {
        match err {
            AgentServiceError::Validation(msg) => Self::Validation(msg),
            AgentServiceError::NotFound(id) => Self::NotFound(format!("Agent not found: {id}")),
            AgentServiceError::InvalidTransition(e) => Self::InvalidTransition(e.to_string()),
            AgentServiceError::CodeSpaceExhausted { attempts } => Self::Internal(format!(
                "No unused agent code found after {attempts} attempts"
            )),
            AgentServiceError::Store(StoreError::Database(e)) => Self::Database(e),
            AgentServiceError::Store(e) => Self::Internal(e.to_string()),
        }
    }
}
