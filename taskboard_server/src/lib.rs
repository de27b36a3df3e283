//! JSON-over-HTTP front end for [`taskboard`].
//!
//! The caller is identified by a header set by an authenticating proxy (see
//! [`HeaderIdentity`]); every route resolves it through the [`Caller`]
//! extractor before reading its path or body, and answers `401` when it is
//! missing. Malformed paths and bodies are `422` with the same JSON error
//! shape as validation failures.
//!
//! | method | path | operation |
//! |---|---|---|
//! | GET | `/collections` | list the caller's collections with tasks and progress |
//! | POST | `/collections` | create a collection |
//! | DELETE | `/collections/:id` | delete a collection and its tasks |
//! | POST | `/tasks` | create a task |
//! | POST | `/tasks/:id/done` | mark a task as done |

pub mod config;
pub mod identity;
pub mod response;
pub mod routes;

pub use config::{Config, ConfigError};
pub use identity::HeaderIdentity;
pub use response::ApiError;
pub use routes::{AppState, Caller, build_router};
