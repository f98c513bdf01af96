pub mod agent_code;
pub mod agent_lifecycle;
pub mod agent_store;
pub mod memory_store;
pub mod status_rules;


pub use agent_code::{AgentCodeSource, RandomCodeGenerator};
pub use agent_lifecycle::{AgentLifecycleService, AgentServiceError, DEFAULT_MAX_CODE_ATTEMPTS};
pub use agent_store::{AgentFields, AgentStore, PgAgentStore, StoreError};
pub use memory_store::InMemoryAgentStore;
pub use status_rules::{check_transition, InvalidTransition, FORBIDDEN_TRANSITIONS};
