//! Agent Lifecycle Service
//!
//! Validated create/read/update operations on agent records. Every
//! operation is a single read-check-write against one row and writes back
//! only the columns it owns, so updates to different column groups of the
//! same agent do not undo each other.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{Agent, AgentChanges, AgentStatus, CreateAgentRequest, NewAgent};
use crate::services::agent_code::{AgentCodeSource, RandomCodeGenerator};
use crate::services::agent_store::{AgentFields, AgentStore, StoreError};
use crate::services::status_rules::{check_transition, InvalidTransition};

/// Default cap on agent code generation attempts per create
pub const DEFAULT_MAX_CODE_ATTEMPTS: u32 = 32;

/// Errors that can occur during agent lifecycle operations
#[derive(Debug, Error)]
pub enum AgentServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("Agent not found: {0}")]
    NotFound(i32),

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("No unused agent code found after {attempts} attempts")]
    CodeSpaceExhausted { attempts: u32 },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Service for creating and updating agent records
#[derive(Clone)]
pub struct AgentLifecycleService {
    store: Arc<dyn AgentStore>,
    codes: Arc<dyn AgentCodeSource>,
    max_code_attempts: u32,
}

impl AgentLifecycleService {
    /// Service with an entropy-seeded code generator
    pub fn new(store: Arc<dyn AgentStore>) -> Self {
        Self::with_code_source(store, Arc::new(RandomCodeGenerator::from_entropy()))
    }

    pub fn with_code_source(store: Arc<dyn AgentStore>, codes: Arc<dyn AgentCodeSource>) -> Self {
        Self {
            store,
            codes,
            max_code_attempts: DEFAULT_MAX_CODE_ATTEMPTS,
        }
    }

    /// Override the code generation attempt cap (minimum 1)
    pub fn max_code_attempts(mut self, attempts: u32) -> Self {
        self.max_code_attempts = attempts.max(1);
        self
    }

    /// Create a new agent with a freshly generated, unused agent code
    pub async fn create(&self, request: CreateAgentRequest) -> Result<Agent, AgentServiceError> {
        validate_create(&request)?;

        for attempt in 1..=self.max_code_attempts {
            let code = self.codes.generate();

            if self.store.find_by_code(&code).await?.is_some() {
                debug!(attempt, code = %code, "Agent code already taken, regenerating");
                continue;
            }

            let candidate = NewAgent {
                name: request.name.clone(),
                phone_number: request.phone_number,
                account_number: request.account_number.clone(),
                agent_code: code,
                status: request.status.clone(),
                region: request.region.clone(),
                rating: request.rating,
                number_of_ratings: request.number_of_ratings,
            };

            match self.store.insert(candidate).await {
                Ok(agent) => {
                    info!(agent_id = agent.id, agent_code = %agent.agent_code, "Agent created");
                    return Ok(agent);
                }
                // Lost a race with a concurrent create between the check and the insert
                Err(StoreError::DuplicateAgentCode(code)) => {
                    warn!(attempt, code = %code, "Agent code claimed concurrently, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(attempts = self.max_code_attempts, "Agent code generation exhausted");
        Err(AgentServiceError::CodeSpaceExhausted {
            attempts: self.max_code_attempts,
        })
    }

    /// Get an agent by ID
    pub async fn fetch(&self, id: i32) -> Result<Agent, AgentServiceError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AgentServiceError::NotFound(id))
    }

    /// Every stored agent
    pub async fn list_all(&self) -> Result<Vec<Agent>, AgentServiceError> {
        Ok(self.store.list_all().await?)
    }

    /// Overwrite name, phone number, account number and region.
    ///
    /// No presence validation is applied here; empty values are stored as given.
    pub async fn update(&self, id: i32, changes: AgentChanges) -> Result<Agent, AgentServiceError> {
        let mut agent = self.fetch(id).await?;

        agent.name = changes.name;
        agent.phone_number = changes.phone_number;
        agent.account_number = changes.account_number;
        agent.region = changes.region;

        self.store.save(&agent, AgentFields::Contact).await?;
        debug!(agent_id = id, "Agent updated");

        Ok(agent)
    }

    /// Replace the rating snapshot. Both values are written in one statement.
    pub async fn update_rating(
        &self,
        id: i32,
        rating: f64,
        number_of_ratings: i32,
    ) -> Result<Agent, AgentServiceError> {
        let mut agent = self.fetch(id).await?;

        agent.rating = rating;
        agent.number_of_ratings = number_of_ratings;

        self.store.save(&agent, AgentFields::Rating).await?;
        debug!(agent_id = id, rating, number_of_ratings, "Agent rating updated");

        Ok(agent)
    }

    /// Change the status, subject to the transition rules
    pub async fn update_status(
        &self,
        id: i32,
        status: AgentStatus,
    ) -> Result<Agent, AgentServiceError> {
        let mut agent = self.fetch(id).await?;

        if let Err(e) = check_transition(&agent.status, &status) {
            warn!(agent_id = id, from = %e.from, to = %e.to, "Status transition rejected");
            return Err(e.into());
        }

        if !status.is_known() {
            debug!(agent_id = id, status = %status, "Accepting unrecognized agent status");
        }

        let previous = std::mem::replace(&mut agent.status, status);
        self.store.save(&agent, AgentFields::Status).await?;
        info!(agent_id = id, from = %previous, to = %agent.status, "Agent status changed");

        Ok(agent)
    }
}

/// Check the fields required at creation
fn validate_create(request: &CreateAgentRequest) -> Result<(), AgentServiceError> {
    let mut missing = Vec::new();

    if request.name.trim().is_empty() {
        missing.push("name");
    }
    if request.phone_number == 0 {
        missing.push("phoneNumber");
    }
    if request.region.trim().is_empty() {
        missing.push("region");
    }

    if !missing.is_empty() {
        return Err(AgentServiceError::Validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    Ok(())
}
