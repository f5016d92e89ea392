//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, loaded by the binary)
//!     → config file (TOML, optional)
//!     → loader.rs (parse, overlay BOT_TOKEN / CHAT_ID / WEBSITES)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the endpoint set is fixed at startup
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AlertConfig;
pub use schema::AlertMode;
pub use schema::MonitorConfig;
pub use schema::ProbeConfig;
pub use schema::ScheduleConfig;
pub use schema::TelegramConfig;
