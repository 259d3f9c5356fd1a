//! Embedded HTTP inspector for Chordata.
//!
//! Serves a browser dashboard over a live store:
//!
//! - `GET /` -- dashboard shell (HTML)
//! - `GET /app.js`, `GET /app.css` -- dashboard assets
//! - `GET /api/models` -- a freshly assembled snapshot as JSON
//! - `GET /api/health` -- liveness probe
//!
//! Every request is independent: each `/api/models` call assembles its own
//! snapshot and nothing is cached between requests.

pub mod assets;
pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;

pub use assets::{Asset, AssetBundle};
pub use config::{InspectorConfig, DEFAULT_PORT};
pub use error::{ServerError, ServerResult};
pub use handler::AppState;
pub use server::InspectorServer;
