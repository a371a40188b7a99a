//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → UpstreamTarget built once, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload path
//! - All fields have defaults, which reproduce the compiled-in upstream
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ForwardingConfig;
pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::TimeoutConfig;
pub use schema::UpstreamConfig;
pub use validation::{validate_config, ValidationError};
