use std::fmt;

use serde::{Deserialize, Serialize};

/// Delivery agent record as persisted in the `agents` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: i32,
    pub name: String,
    pub phone_number: i32,
    pub account_number: Option<String>,
    pub agent_code: String,
    pub status: AgentStatus,
    pub region: String,
    pub rating: f64,
    pub number_of_ratings: i32,
}

/// Agent record that has not been assigned an `id` yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewAgent {
    pub name: String,
    pub phone_number: i32,
    pub account_number: Option<String>,
    pub agent_code: String,
    pub status: AgentStatus,
    pub region: String,
    pub rating: f64,
    pub number_of_ratings: i32,
}

impl NewAgent {
    /// Attach the store-assigned identifier
    pub fn with_id(self, id: i32) -> Agent {
        Agent {
            id,
            name: self.name,
            phone_number: self.phone_number,
            account_number: self.account_number,
            agent_code: self.agent_code,
            status: self.status,
            region: self.region,
            rating: self.rating,
            number_of_ratings: self.number_of_ratings,
        }
    }
}

/// Agent status.
///
/// The three known states drive the transition rules; any other value is
/// carried through verbatim so that stored data is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentStatus {
    #[default]
    Active,
    Inactive,
    Delivering,
    Other(String),
}

impl AgentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Delivering => "Delivering",
            Self::Other(value) => value,
        }
    }

    /// Whether this is one of the states the service has rules for
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl From<String> for AgentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Active" => Self::Active,
            "Inactive" => Self::Inactive,
            "Delivering" => Self::Delivering,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for AgentStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<AgentStatus> for String {
    fn from(status: AgentStatus) -> Self {
        match status {
            AgentStatus::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload for agent creation.
///
/// Required fields default to empty values so that a missing field is
/// reported as a validation failure instead of a decode failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: i32,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub status: AgentStatus,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub number_of_ratings: i32,
}

/// Fields overwritten by a general update
#[derive(Debug, Clone, PartialEq)]
pub struct AgentChanges {
    pub name: String,
    pub phone_number: i32,
    pub account_number: Option<String>,
    pub region: String,
}

/// Request payload for a general agent update.
///
/// Status, rating and code are not part of this payload; if a caller sends
/// them they are dropped during deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgentRequest {
    pub id: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone_number: i32,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub region: String,
}

impl UpdateAgentRequest {
    pub fn into_parts(self) -> (i32, AgentChanges) {
        (
            self.id,
            AgentChanges {
                name: self.name,
                phone_number: self.phone_number,
                account_number: self.account_number,
                region: self.region,
            },
        )
    }
}

/// Request payload for replacing an agent's rating snapshot
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatingRequest {
    pub id: i32,
    pub rating: f64,
    pub number_of_ratings: i32,
}

/// Request payload for a status change
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub id: i32,
    pub status: AgentStatus,
}
