//! # gate-api
//!
//! HTTP API layer for paygate-rs.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/checkout` | Create checkout session, returns `{ url }` |
//! | GET | `/api/download?session_id=...` | Download the file after payment verification |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
