// Module layout (Clean Architecture style)
// - bootstrap: configuration and startup
// - infrastructure: Postgres repositories, GitHub GraphQL client, token sealing
// - presentation: HTTP handlers and routing
// - application: ports, use cases and validation
// - domain: core models

pub mod application;
pub mod bootstrap;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
