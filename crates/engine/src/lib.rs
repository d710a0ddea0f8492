//! Hearthsheet Engine library.
//!
//! Everything around the pure domain: storage, text generation, autosave and
//! the sheet session.
//!
//! ## Structure
//!
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `use_cases/` - Sheet session, autosave and rules advisor
//! - `config` - Environment configuration
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
pub use config::{ConfigError, EngineConfig};
