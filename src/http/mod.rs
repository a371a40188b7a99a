//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → dispatch.rs (pass-through | CONNECT rejection | rewrite-and-relay)
//!     → Send to client
//! ```

pub mod dispatch;
pub mod request;
pub mod server;

pub use request::{RequestIdExt, UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, BuildError, HttpServer};
