//! Sheet session - the one character currently open for editing.
//!
//! Edits are applied in memory first and reach the store through the
//! debounced autosave. The in-memory record stays the source of truth when a
//! write fails.

use std::sync::Arc;

use hearthsheet_domain::{
    rules_reference, CharacterId, CharacterRecord, CharacterSheet, Denomination, DiceError,
    DomainError, DualityRoll, GoldBreakdown, NormalizedGold, SavedCharacter, TraitType,
};
use serde::Serialize;

use crate::infrastructure::ports::{CharacterStore, ClockPort, RandomPort, RepoError};
use crate::use_cases::autosave::{Autosave, SaveStatus};
use crate::use_cases::rules_advisor::RulesAdvisor;

/// A resolved check plus its narration (empty when none is available)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub roll: DualityRoll,
    pub flavor: String,
}

/// Reference text for a sheet element
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub title: String,
    pub text: String,
    /// True when the text came from the text generator rather than the built-in reference
    pub generated: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Dice error: {0}")]
    Dice(#[from] DiceError),
}

pub struct SheetSession {
    record: CharacterRecord,
    store: Arc<dyn CharacterStore>,
    autosave: Autosave,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    advisor: Arc<RulesAdvisor>,
}

impl SheetSession {
    pub fn new(
        record: CharacterRecord,
        store: Arc<dyn CharacterStore>,
        autosave_window: chrono::Duration,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        advisor: Arc<RulesAdvisor>,
    ) -> Self {
        Self {
            record,
            store,
            autosave: Autosave::new(autosave_window),
            clock,
            random,
            advisor,
        }
    }

    pub fn sheet(&self) -> &CharacterSheet {
        self.record.sheet()
    }

    pub fn record(&self) -> &CharacterRecord {
        &self.record
    }

    pub fn save_status(&self) -> SaveStatus {
        self.autosave.status()
    }

    pub fn advisor(&self) -> &Arc<RulesAdvisor> {
        &self.advisor
    }

    /// Apply an in-memory change and schedule an autosave.
    pub fn edit<R>(&mut self, change: impl FnOnce(&mut CharacterSheet) -> R) -> R {
        let result = change(self.record.sheet_mut());
        self.autosave.note_edit(self.clock.now());
        result
    }

    /// Write the record if the debounce window has passed. Failures are
    /// logged and retried on the next cycle.
    pub async fn tick(&mut self) -> SaveStatus {
        if self.autosave.is_due(self.clock.now()) {
            // Already logged; the autosave state carries the failure.
            let _ = self.write().await;
        }
        self.autosave.status()
    }

    /// Write now, ignoring the debounce window.
    pub async fn flush(&mut self) -> Result<CharacterId, SessionError> {
        if !self.autosave.is_pending() {
            self.autosave.note_edit(self.clock.now());
        }
        Ok(self.write().await?)
    }

    async fn write(&mut self) -> Result<CharacterId, RepoError> {
        self.autosave.begin_write();
        let result = self.store.upsert(&self.record).await;
        let now = self.clock.now();

        match &result {
            Ok(id) => {
                if self.record.id() != Some(*id) {
                    tracing::info!(character_id = %id, "Character saved for the first time");
                    self.record.mark_saved(*id);
                }
                self.autosave.finish_write(true, now);
                tracing::debug!(character_id = %id, "Autosave complete");
            }
            Err(e) => {
                self.autosave.finish_write(false, now);
                tracing::warn!(error = %e, "Autosave failed, will retry");
            }
        }
        result
    }

    /// Write any pending edits before the open record is replaced
    async fn settle_pending(&mut self) {
        if self.autosave.is_pending() {
            let _ = self.write().await;
        }
    }

    /// Start a blank sheet. It is stored once the debounce window passes.
    pub async fn new_character(&mut self) {
        self.settle_pending().await;
        self.record = CharacterRecord::Unsaved(CharacterSheet::blank());
        self.autosave = Autosave::new(self.autosave.window());
        self.autosave.note_edit(self.clock.now());
    }

    pub async fn load(&mut self, id: CharacterId) -> Result<(), SessionError> {
        let saved = self
            .store
            .get(id)
            .await?
            .ok_or(SessionError::CharacterNotFound(id))?;
        self.settle_pending().await;
        self.record = saved.into();
        self.autosave = Autosave::new(self.autosave.window());
        tracing::info!(character_id = %id, "Loaded character");
        Ok(())
    }

    pub async fn saved_characters(&self) -> Result<Vec<SavedCharacter>, SessionError> {
        Ok(self.store.list_all().await?)
    }

    /// Delete a stored character and return the list as it is afterwards.
    ///
    /// Deleting the open character keeps it on screen as an unsaved draft.
    pub async fn delete_saved(
        &mut self,
        id: CharacterId,
    ) -> Result<Vec<SavedCharacter>, SessionError> {
        self.store.delete(id).await?;
        if self.record.id() == Some(id) {
            self.record.mark_unsaved();
            tracing::info!(character_id = %id, "Deleted the open character, keeping it as a draft");
        }
        Ok(self.store.list_all().await?)
    }

    /// Roll a check using the sheet's trait value as the modifier
    pub async fn roll(&self, trait_type: TraitType) -> Result<CheckResult, SessionError> {
        let modifier = self.sheet().trait_modifier(trait_type);
        self.roll_with_modifier(trait_type.name(), modifier).await
    }

    pub async fn roll_with_modifier(
        &self,
        label: &str,
        modifier: i32,
    ) -> Result<CheckResult, SessionError> {
        let roll = DualityRoll::roll(modifier, |min, max| self.random.gen_range(min, max))?;
        let verdict = roll.verdict();

        tracing::info!(
            label,
            hope = roll.hope_die(),
            fear = roll.fear_die(),
            total = roll.total(),
            verdict = %verdict,
            "Duality roll"
        );

        let flavor = self
            .advisor
            .narrative_flavor(
                &self.sheet().name,
                &format!("{} check", label),
                &format!("{} ({})", verdict.label(), roll.total()),
            )
            .await;

        Ok(CheckResult { roll, flavor })
    }

    /// Change class (subclass resets to its default). Unknown classes schedule nothing.
    pub fn set_class(&mut self, class_name: &str) -> Result<(), SessionError> {
        let mut sheet = self.sheet().clone();
        sheet.set_class(class_name)?;
        self.edit(|current| {
            current.class_name = sheet.class_name;
            current.subclass = sheet.subclass;
        });
        Ok(())
    }

    /// Replace the gold total
    pub fn set_gold(&mut self, total: u64) -> GoldBreakdown {
        self.edit(|sheet| sheet.gold = total);
        GoldBreakdown::from_total(total)
    }

    /// Set one tier directly (it may exceed 9) and settle the result
    pub fn set_gold_tier(
        &mut self,
        denomination: Denomination,
        value: u64,
    ) -> Result<NormalizedGold, SessionError> {
        let gold = self
            .gold_breakdown()
            .with(denomination, value)
            .normalize()?;
        self.edit(|sheet| sheet.gold = gold.total);
        Ok(gold)
    }

    /// Move one tier up or down. Going below zero stops at zero.
    pub fn step_gold_tier(
        &mut self,
        denomination: Denomination,
        delta: i64,
    ) -> Result<NormalizedGold, SessionError> {
        let current = self.gold_breakdown().get(denomination);
        let stepped = if delta >= 0 {
            current.saturating_add(delta.unsigned_abs())
        } else {
            current.saturating_sub(delta.unsigned_abs())
        };
        self.set_gold_tier(denomination, stepped)
    }

    pub fn gold_breakdown(&self) -> GoldBreakdown {
        self.sheet().gold_breakdown()
    }

    /// Built-in reference text when there is one, otherwise ask the advisor.
    pub async fn explain(&self, topic: &str, context: &str) -> Explanation {
        if let Some(entry) = rules_reference(topic) {
            return Explanation {
                title: entry.title.to_string(),
                text: entry.body.to_string(),
                generated: false,
            };
        }
        Explanation {
            title: topic.trim().to_string(),
            text: self.advisor.rules_insight(topic, context).await,
            generated: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use hearthsheet_domain::RollVerdict;

    use crate::infrastructure::clock::{ManualClock, ScriptedRandom};
    use crate::infrastructure::persistence::InMemoryCharacterStore;
    use crate::infrastructure::ports::{
        FinishReason, MockCharacterStore, MockTextGenPort, TextGenError, TextResponse,
    };
    use crate::infrastructure::usage::UsageTracker;
    use crate::use_cases::rules_advisor::INSIGHT_NO_KEY;

    const WINDOW_MS: i64 = 1000;

    struct Harness {
        session: SheetSession,
        clock: Arc<ManualClock>,
        store: Arc<InMemoryCharacterStore>,
    }

    fn silent_advisor() -> Arc<RulesAdvisor> {
        let mut text_gen = MockTextGenPort::new();
        text_gen
            .expect_generate()
            .returning(|_| Err(TextGenError::MissingApiKey));
        Arc::new(RulesAdvisor::new(
            Arc::new(text_gen),
            Arc::new(UsageTracker::new()),
        ))
    }

    fn harness_with(record: CharacterRecord, faces: &[i32], advisor: Arc<RulesAdvisor>) -> Harness {
        let clock = Arc::new(ManualClock::new(
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        ));
        let random: Arc<dyn RandomPort> = Arc::new(ScriptedRandom::new(faces.to_vec()));
        let store = Arc::new(InMemoryCharacterStore::new(random.clone()));
        let session = SheetSession::new(
            record,
            store.clone(),
            Duration::milliseconds(WINDOW_MS),
            clock.clone(),
            random,
            advisor,
        );
        Harness {
            session,
            clock,
            store,
        }
    }

    fn harness() -> Harness {
        harness_with(
            CharacterRecord::Unsaved(CharacterSheet::sample()),
            &[7],
            silent_advisor(),
        )
    }

    #[tokio::test]
    async fn edit_is_saved_only_after_window() {
        let mut h = harness();
        h.session.edit(|sheet| sheet.stress = 4);

        h.clock.advance(Duration::milliseconds(WINDOW_MS - 1));
        assert_eq!(h.session.tick().await, SaveStatus::Idle);
        assert!(h.store.is_empty().await);

        h.clock.advance(Duration::milliseconds(1));
        assert_eq!(h.session.tick().await, SaveStatus::Saved);
        assert_eq!(h.store.len().await, 1);
        assert!(h.session.record().is_saved());
    }

    #[tokio::test]
    async fn later_saves_overwrite_the_same_record() {
        let mut h = harness();
        let id = h.session.flush().await.unwrap();

        h.session.edit(|sheet| sheet.name = "Renamed".to_string());
        h.clock.advance(Duration::milliseconds(WINDOW_MS));
        h.session.tick().await;

        let all = h.session.saved_characters().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].sheet.name, "Renamed");
    }

    #[tokio::test]
    async fn failed_autosave_keeps_edits_and_retries() {
        let clock = Arc::new(ManualClock::new(
            Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
        ));
        let id = CharacterId::new();
        let mut store = MockCharacterStore::new();
        let mut calls = 0;
        store.expect_upsert().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(RepoError::database("upsert", "disk full"))
            } else {
                Ok(id)
            }
        });
        let mut session = SheetSession::new(
            CharacterRecord::Unsaved(CharacterSheet::blank()),
            Arc::new(store),
            Duration::milliseconds(WINDOW_MS),
            clock.clone(),
            Arc::new(ScriptedRandom::new(vec![1])),
            silent_advisor(),
        );

        session.edit(|sheet| sheet.hope = 2);
        clock.advance(Duration::milliseconds(WINDOW_MS));
        assert_eq!(session.tick().await, SaveStatus::Failed);
        assert_eq!(session.sheet().hope, 2);
        assert!(!session.record().is_saved());

        // Not retried until the next window passes
        assert_eq!(session.tick().await, SaveStatus::Failed);
        clock.advance(Duration::milliseconds(WINDOW_MS));
        assert_eq!(session.tick().await, SaveStatus::Saved);
        assert_eq!(session.record().id(), Some(id));
    }

    #[tokio::test]
    async fn roll_uses_trait_modifier_and_reports_critical() {
        // Sample sheet has Strength +2; both dice show 7
        let h = harness();
        let check = h.session.roll(TraitType::Strength).await.unwrap();
        assert_eq!(check.roll.total(), 16);
        assert_eq!(check.roll.verdict(), RollVerdict::Critical);
        assert_eq!(check.flavor, "");
    }

    #[tokio::test]
    async fn roll_with_modifier_asks_for_flavor() {
        let mut text_gen = MockTextGenPort::new();
        text_gen
            .expect_generate()
            .withf(|req| {
                req.prompt.contains("Kaelen Thorne")
                    && req.prompt.contains("Sneak check")
                    && req.prompt.contains("Success with Hope (12)")
            })
            .times(1)
            .returning(|_| {
                Ok(TextResponse {
                    text: "Kaelen melts into the shadows.".to_string(),
                    finish_reason: FinishReason::Stop,
                })
            });
        let advisor = Arc::new(RulesAdvisor::new(
            Arc::new(text_gen),
            Arc::new(UsageTracker::new()),
        ));
        let h = harness_with(
            CharacterRecord::Unsaved(CharacterSheet::sample()),
            &[9, 4],
            advisor,
        );

        let check = h.session.roll_with_modifier("Sneak", -1).await.unwrap();
        assert_eq!(check.roll.hope_die(), 9);
        assert_eq!(check.roll.fear_die(), 4);
        assert_eq!(check.roll.verdict(), RollVerdict::WithHope);
        assert_eq!(check.flavor, "Kaelen melts into the shadows.");
    }

    #[tokio::test]
    async fn broken_random_source_is_a_dice_error() {
        let h = harness_with(
            CharacterRecord::Unsaved(CharacterSheet::blank()),
            &[13],
            silent_advisor(),
        );
        let err = h.session.roll(TraitType::Agility).await.unwrap_err();
        assert!(matches!(err, SessionError::Dice(_)));
    }

    #[tokio::test]
    async fn gold_tier_edits_normalize_and_clamp() {
        let mut h = harness_with(
            CharacterRecord::Unsaved(CharacterSheet::blank()),
            &[1],
            silent_advisor(),
        );

        let gold = h.session.set_gold_tier(Denomination::Coins, 15).unwrap();
        assert_eq!(gold.breakdown, GoldBreakdown::new(5, 1, 0, 0));
        assert_eq!(h.session.sheet().gold, 15);

        let gold = h.session.step_gold_tier(Denomination::Coins, -8).unwrap();
        assert_eq!(gold.total, 10);

        let gold = h.session.step_gold_tier(Denomination::Handfuls, 9).unwrap();
        assert_eq!(gold.breakdown, GoldBreakdown::new(0, 0, 1, 0));
        assert_eq!(gold.total, 100);

        assert_eq!(
            h.session.set_gold(1085),
            GoldBreakdown::new(5, 8, 0, 1)
        );
        assert_eq!(h.session.gold_breakdown(), GoldBreakdown::new(5, 8, 0, 1));
    }

    #[tokio::test]
    async fn set_class_schedules_save_only_when_accepted() {
        let mut h = harness();

        let err = h.session.set_class("Paladin").unwrap_err();
        assert!(matches!(err, SessionError::Domain(DomainError::Validation(_))));
        assert!(!h.session.autosave.is_pending());

        h.session.set_class("rogue").unwrap();
        assert_eq!(h.session.sheet().class_name, "Rogue");
        assert_eq!(h.session.sheet().subclass, "Syndicate");
        assert!(h.session.autosave.is_pending());

        h.clock.advance(Duration::milliseconds(WINDOW_MS));
        h.session.tick().await;
        let stored = h.store.list_all().await.unwrap();
        assert_eq!(stored[0].sheet.class_name, "Rogue");
    }

    #[tokio::test]
    async fn delete_returns_refreshed_list_and_demotes_open_record() {
        let mut h = harness();
        let open_id = h.session.flush().await.unwrap();
        let other = h
            .store
            .upsert(&CharacterRecord::Unsaved(CharacterSheet::blank()))
            .await
            .unwrap();

        let remaining = h.session.delete_saved(open_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, other);
        assert!(!h.session.record().is_saved());
        assert_eq!(h.session.sheet().name, "Kaelen Thorne");
    }

    #[tokio::test]
    async fn load_replaces_record_and_missing_id_is_not_found() {
        let mut h = harness();
        let mut stored = CharacterSheet::blank();
        stored.name = "Aria".to_string();
        let id = h
            .store
            .upsert(&CharacterRecord::Unsaved(stored))
            .await
            .unwrap();

        h.session.load(id).await.unwrap();
        assert_eq!(h.session.record().id(), Some(id));
        assert_eq!(h.session.sheet().name, "Aria");
        assert_eq!(h.session.save_status(), SaveStatus::Idle);

        let missing = CharacterId::new();
        let err = h.session.load(missing).await.unwrap_err();
        assert!(matches!(err, SessionError::CharacterNotFound(id) if id == missing));
    }

    #[tokio::test]
    async fn new_character_saves_pending_edits_first() {
        let mut h = harness();
        h.session.edit(|sheet| sheet.armor = 2);
        h.session.new_character().await;

        assert_eq!(h.store.len().await, 1);
        assert_eq!(h.session.sheet().name, "New Hero");
        assert!(!h.session.record().is_saved());

        h.clock.advance(Duration::milliseconds(WINDOW_MS));
        h.session.tick().await;
        assert_eq!(h.store.len().await, 2);
    }

    #[tokio::test]
    async fn explain_prefers_builtin_reference() {
        let h = harness();
        let known = h.session.explain("Evasion", "Evasion: 8").await;
        assert_eq!(known.title, "Evasion Score");
        assert!(!known.generated);

        let unknown = h.session.explain("Battlefield Commander", "1 Hope").await;
        assert!(unknown.generated);
        assert_eq!(unknown.text, INSIGHT_NO_KEY);
    }
}
