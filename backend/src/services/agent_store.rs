//! Agent Store
//!
//! Persistence boundary for agent records. The lifecycle service only talks
//! to [`AgentStore`]; the PostgreSQL adapter lives here and an in-memory
//! adapter lives in `memory_store`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use thiserror::Error;

use crate::models::{Agent, AgentStatus, NewAgent};

/// Name of the unique constraint on `agents.agent_code`
pub const AGENT_CODE_CONSTRAINT: &str = "agents_agent_code_key";

/// Errors raised by an agent store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Insert rejected because another agent already holds the code
    #[error("Agent code already in use: {0}")]
    DuplicateAgentCode(String),

    #[error("Agent row missing: {0}")]
    Missing(i32),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage interface for agent records
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// Find an agent by its numeric identifier
    async fn find_by_id(&self, id: i32) -> Result<Option<Agent>, StoreError>;

    /// Find an agent by its business code
    async fn find_by_code(&self, code: &str) -> Result<Option<Agent>, StoreError>;

    /// Insert a new agent and return it with its assigned identifier.
    ///
    /// Fails with [`StoreError::DuplicateAgentCode`] when the code is taken.
    async fn insert(&self, agent: NewAgent) -> Result<Agent, StoreError>;

    /// Every stored agent, ordered by identifier
    async fn list_all(&self) -> Result<Vec<Agent>, StoreError>;

    /// Persist one column group of an existing agent.
    ///
    /// Only the columns in `fields` are written; `id` and `agent_code` never are.
    async fn save(&self, agent: &Agent, fields: AgentFields) -> Result<(), StoreError>;
}

/// Column group owned by a single update operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentFields {
    /// `name`, `phone_number`, `account_number`, `region`
    Contact,
    /// `rating` and `number_of_ratings`
    Rating,
    Status,
}

/// PostgreSQL-backed agent store
#[derive(Debug, Clone)]
pub struct PgAgentStore {
    pool: PgPool,
}

impl PgAgentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn agent_from_row(row: &PgRow) -> Agent {
        Agent {
            id: row.get("id"),
            name: row.get("name"),
            phone_number: row.get("phone_number"),
            account_number: row.get("account_number"),
            agent_code: row.get("agent_code"),
            status: AgentStatus::from(row.get::<String, _>("status")),
            region: row.get("region"),
            rating: row.get("rating"),
            number_of_ratings: row.get("number_of_ratings"),
        }
    }
}

/// Whether `err` is a unique violation on the agent code constraint
fn is_duplicate_code(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.is_unique_violation() && db_err.constraint() == Some(AGENT_CODE_CONSTRAINT)
        }
        _ => false,
    }
}

#[async_trait]
impl AgentStore for PgAgentStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Agent>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, phone_number, account_number, agent_code,
                   status, region, rating, number_of_ratings
            FROM agents
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::agent_from_row))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Agent>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, phone_number, account_number, agent_code,
                   status, region, rating, number_of_ratings
            FROM agents
            WHERE agent_code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::agent_from_row))
    }

    async fn insert(&self, agent: NewAgent) -> Result<Agent, StoreError> {
        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO agents (name, phone_number, account_number, agent_code,
                                status, region, rating, number_of_ratings)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&agent.name)
        .bind(agent.phone_number)
        .bind(&agent.account_number)
        .bind(&agent.agent_code)
        .bind(agent.status.as_str())
        .bind(&agent.region)
        .bind(agent.rating)
        .bind(agent.number_of_ratings)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_duplicate_code(&e) {
                StoreError::DuplicateAgentCode(agent.agent_code.clone())
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(agent.with_id(id))
    }

    async fn list_all(&self) -> Result<Vec<Agent>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, phone_number, account_number, agent_code,
                   status, region, rating, number_of_ratings
            FROM agents
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(Self::agent_from_row).collect())
    }

    async fn save(&self, agent: &Agent, fields: AgentFields) -> Result<(), StoreError> {
        let result = match fields {
            AgentFields::Contact => {
                sqlx::query(
                    r#"
                    UPDATE agents
                    SET name = $2,
                        phone_number = $3,
                        account_number = $4,
                        region = $5
                    WHERE id = $1
                    "#,
                )
                .bind(agent.id)
                .bind(&agent.name)
                .bind(agent.phone_number)
                .bind(&agent.account_number)
                .bind(&agent.region)
                .execute(&self.pool)
                .await?
            }
            AgentFields::Rating => {
                sqlx::query(
                    r#"
                    UPDATE agents
                    SET rating = $2,
                        number_of_ratings = $3
                    WHERE id = $1
                    "#,
                )
                .bind(agent.id)
                .bind(agent.rating)
                .bind(agent.number_of_ratings)
                .execute(&self.pool)
                .await?
            }
            AgentFields::Status => {
                sqlx::query("UPDATE agents SET status = $2 WHERE id = $1")
                    .bind(agent.id)
                    .bind(agent.status.as_str())
                    .execute(&self.pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(agent.id));
        }

        Ok(())
    }
}
