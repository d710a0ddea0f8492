//! Application state and composition.

use std::sync::Arc;

use hearthsheet_domain::{CharacterRecord, CharacterSheet};

use crate::config::EngineConfig;
use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    gemini::GeminiClient,
    persistence::SqliteCharacterStore,
    ports::{CharacterStore, ClockPort, RandomPort, RepoError, TextGenPort},
    usage::UsageTracker,
};
use crate::use_cases::{RulesAdvisor, SheetSession};

/// Main application state.
///
/// Holds the shared ports and hands out sheet sessions wired to them.
pub struct App {
    pub store: Arc<dyn CharacterStore>,
    pub advisor: Arc<RulesAdvisor>,
    pub usage: Arc<UsageTracker>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    autosave_window: chrono::Duration,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        store: Arc<dyn CharacterStore>,
        text_gen: Arc<dyn TextGenPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        autosave_window: chrono::Duration,
    ) -> Self {
        let usage = Arc::new(UsageTracker::new());
        let advisor = Arc::new(RulesAdvisor::new(text_gen, usage.clone()));
        Self {
            store,
            advisor,
            usage,
            clock,
            random,
            autosave_window,
        }
    }

    /// Open the SQLite store and the Gemini client described by `config`.
    pub async fn from_config(config: &EngineConfig) -> Result<Self, RepoError> {
        let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());
        let random: Arc<dyn RandomPort> = Arc::new(SystemRandom::new());

        let db_path = config.db_path.to_string_lossy();
        tracing::info!(db_path = %db_path, "Opening character store");
        let store = SqliteCharacterStore::new(&db_path, clock.clone(), random.clone()).await?;

        let gemini = GeminiClient::new(
            &config.gemini_base_url,
            &config.gemini_model,
            config.gemini_api_key.clone(),
            config.gemini_timeout_secs,
        );
        if gemini.has_api_key() {
            tracing::info!(model = gemini.model(), "Text generation enabled");
        } else {
            tracing::info!("No Gemini API key configured, text generation disabled");
        }

        Ok(Self::new(
            Arc::new(store),
            Arc::new(gemini),
            clock,
            random,
            config.autosave_window(),
        ))
    }

    /// A session on the given record, sharing this app's store and advisor
    pub fn open_session(&self, record: CharacterRecord) -> SheetSession {
        SheetSession::new(
            record,
            self.store.clone(),
            self.autosave_window,
            self.clock.clone(),
            self.random.clone(),
            self.advisor.clone(),
        )
    }

    /// A session on a fresh blank sheet
    pub fn blank_session(&self) -> SheetSession {
        self.open_session(CharacterRecord::Unsaved(CharacterSheet::blank()))
    }
}
