// Composition root: configuration, telemetry, shared state, the HTTP router
// and the GraphQL schema. `main.rs` wires concrete adapters into handlers.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
pub mod telemetry;
