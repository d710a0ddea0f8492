//! Use cases - User story orchestration.
//!
//! Each module covers one area of the sheet. Use cases talk to the outside
//! world only through the port traits in `infrastructure::ports`.

pub mod autosave;
pub mod rules_advisor;
pub mod session;

// Re-export main types
pub use autosave::{Autosave, AutosaveState, SaveStatus};
pub use rules_advisor::RulesAdvisor;
pub use session::{CheckResult, Explanation, SessionError, SheetSession};
