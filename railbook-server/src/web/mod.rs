//! Web front controller: routes, templates, DTOs, shared state.

pub mod dto;
pub mod routes;
pub mod state;
pub mod templates;

pub use routes::create_router;
pub use state::AppState;
