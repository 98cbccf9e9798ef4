//! Web layer for the delay board.
//!
//! Serves the cached snapshot as an HTML page and as JSON.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
