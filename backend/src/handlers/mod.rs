pub mod agents;


pub use agents::configure_agent_routes;
