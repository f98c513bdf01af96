//! In-memory agent store.
//!
//! Used for local development (`STORAGE_BACKEND=memory`) and in tests.
//! Identifiers come from a counter that starts at 1 and is never rewound,
//! and agent codes are unique just as the database constraint enforces.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::models::{Agent, NewAgent};
use crate::services::agent_store::{AgentFields, AgentStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    agents: BTreeMap<i32, Agent>,
    last_id: i32,
}

/// Agent store held entirely in process memory.
///
/// Clones share the same underlying storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAgentStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored agents
    pub fn len(&self) -> usize {
        self.lock().agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl AgentStore for InMemoryAgentStore {
    async fn find_by_id(&self, id: i32) -> Result<Option<Agent>, StoreError> {
        Ok(self.lock().agents.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Agent>, StoreError> {
        Ok(self
            .lock()
            .agents
            .values()
            .find(|a| a.agent_code == code)
            .cloned())
    }

    async fn insert(&self, agent: NewAgent) -> Result<Agent, StoreError> {
        let mut inner = self.lock();

        if inner.agents.values().any(|a| a.agent_code == agent.agent_code) {
            return Err(StoreError::DuplicateAgentCode(agent.agent_code));
        }

        inner.last_id += 1;
        let agent = agent.with_id(inner.last_id);
        inner.agents.insert(agent.id, agent.clone());

        Ok(agent)
    }

    async fn list_all(&self) -> Result<Vec<Agent>, StoreError> {
        Ok(self.lock().agents.values().cloned().collect())
    }

    async fn save(&self, agent: &Agent, fields: AgentFields) -> Result<(), StoreError> {
        let mut inner = self.lock();

        let stored = inner
            .agents
            .get_mut(&agent.id)
            .ok_or(StoreError::Missing(agent.id))?;

        match fields {
            AgentFields::Contact => {
                stored.name = agent.name.clone();
                stored.phone_number = agent.phone_number;
                stored.account_number = agent.account_number.clone();
                stored.region = agent.region.clone();
            }
            AgentFields::Rating => {
                stored.rating = agent.rating;
                stored.number_of_ratings = agent.number_of_ratings;
            }
            AgentFields::Status => stored.status = agent.status.clone(),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AgentStatus;

    fn new_agent(code: &str) -> NewAgent {
        NewAgent {
            name: "Test Agent".to_string(),
            phone_number: 12345678,
            account_number: None,
            agent_code: code.to_string(),
            status: AgentStatus::Active,
            region: "Region1".to_string(),
            rating: 4.5,
            number_of_ratings: 10,
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = InMemoryAgentStore::new();

        let a = store.insert(new_agent("1111AAAA")).await.unwrap();
        let b = store.insert(new_agent("2222BBBB")).await.unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_code() {
        let store = InMemoryAgentStore::new();
        store.insert(new_agent("1111AAAA")).await.unwrap();

        let err = store.insert(new_agent("1111AAAA")).await.unwrap_err();

        assert!(matches!(err, StoreError::DuplicateAgentCode(code) if code == "1111AAAA"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn find_by_code_returns_matching_agent() {
        let store = InMemoryAgentStore::new();
        let inserted = store.insert(new_agent("1111AAAA")).await.unwrap();

        let found = store.find_by_code("1111AAAA").await.unwrap();
        assert_eq!(found, Some(inserted));
        assert!(store.find_by_code("9999ZZZZ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_keeps_stored_code() {
        let store = InMemoryAgentStore::new();
        let mut agent = store.insert(new_agent("1111AAAA")).await.unwrap();

        agent.name = "Renamed".to_string();
        agent.agent_code = "9999ZZZZ".to_string();
        store.save(&agent, AgentFields::Contact).await.unwrap();

        let stored = store.find_by_id(agent.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.agent_code, "1111AAAA");
    }

    #[tokio::test]
    async fn save_writes_only_requested_fields() {
        let store = InMemoryAgentStore::new();
        let original = store.insert(new_agent("1111AAAA")).await.unwrap();

        let mut stale = original.clone();
        stale.name = "Renamed".to_string();
        stale.status = AgentStatus::Inactive;
        stale.rating = 1.0;
        store.save(&stale, AgentFields::Contact).await.unwrap();

        let stored = store.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Renamed");
        assert_eq!(stored.status, AgentStatus::Active);
        assert_eq!(stored.rating, original.rating);

        store.save(&stale, AgentFields::Status).await.unwrap();
        let stored = store.find_by_id(original.id).await.unwrap().unwrap();
        assert_eq!(stored.status, AgentStatus::Inactive);
        assert_eq!(stored.rating, original.rating);
    }

    #[tokio::test]
    async fn save_unknown_agent_fails() {
        let store = InMemoryAgentStore::new();
        let agent = new_agent("1111AAAA").with_id(42);

        assert!(matches!(
            store.save(&agent, AgentFields::Status).await,
            Err(StoreError::Missing(42))
        ));
    }
}
