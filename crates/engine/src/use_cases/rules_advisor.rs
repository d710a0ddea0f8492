//! Rules advisor use case.
//!
//! Wraps text generation for the sheet: rules explanations, one-line roll
//! flavor and free-form rules questions. Every operation returns a string;
//! failures are logged and replaced by a fixed fallback.

use std::sync::Arc;

use crate::infrastructure::ports::{TextGenError, TextGenPort, TextRequest};
use crate::infrastructure::usage::UsageTracker;

pub const INSIGHT_FAILED: &str = "The spirits are silent (Error fetching data).";
pub const INSIGHT_NO_KEY: &str = "API Key missing. Cannot fetch insights.";
pub const INSIGHT_EMPTY: &str = "No insight available.";

pub const ANSWER_FAILED: &str = "I cannot answer right now.";
pub const ANSWER_NO_KEY: &str = "API Key missing.";
pub const ANSWER_EMPTY: &str = "I am unsure.";

const RULES_REFERENCE_PROMPT: &str = "\
You are the official Rules Reference for the Daggerheart TTRPG (Open Beta).

Explain mechanics accurately based on these core systems:
1. Duality Dice: all checks use 2d12 (Hope Die and Fear Die). Hope >= Fear is a \
Success with Hope (gain 1 Hope). Fear > Hope is a Success with Fear (the GM gains \
Fear or complicates). Doubles on the dice are a Critical.
2. Damage Thresholds: damage is not subtracted from HP. Incoming damage is compared \
to the Minor, Major and Severe thresholds to decide how many HP (1-3) to mark.
3. Armor: spend an Armor Slot to reduce incoming damage by the Armor Score.
4. Stress: pays for abilities and costs. If Stress is full and you must take more, \
mark HP instead.";

const RULES_INSIGHT_INSTRUCTIONS: &str = "\
Instructions:
- Give a concise (2-3 sentence) mechanical explanation specific to Daggerheart.
- For a Trait, say what it is used for (Agility for sprinting and dodging, Strength for melee).
- For Damage or HP, explain the threshold comparison.
- End with a very short flavor sentence.
- Do not make things up. For a custom ability, explain how it likely interacts with \
the core rules based on its description.";

const ASK_RULES_INSTRUCTIONS: &str = "\
Instructions:
- Answer from the standard Daggerheart core rules and the character's ancestry, class, \
subclass and level when given.
- Check the order of ability checks, combat rules and dice rolling.
- Suggest the best next action if one is needed.
- Keep the answer under 200 tokens. Be friendly but concise.";

/// Which fixed strings stand in for a missing reply
struct Fallbacks {
    failed: &'static str,
    no_key: &'static str,
    empty: &'static str,
}

const INSIGHT: Fallbacks = Fallbacks {
    failed: INSIGHT_FAILED,
    no_key: INSIGHT_NO_KEY,
    empty: INSIGHT_EMPTY,
};

const FLAVOR: Fallbacks = Fallbacks {
    failed: "",
    no_key: "",
    empty: "",
};

const ANSWER: Fallbacks = Fallbacks {
    failed: ANSWER_FAILED,
    no_key: ANSWER_NO_KEY,
    empty: ANSWER_EMPTY,
};

pub struct RulesAdvisor {
    text_gen: Arc<dyn TextGenPort>,
    usage: Arc<UsageTracker>,
}

impl RulesAdvisor {
    pub fn new(text_gen: Arc<dyn TextGenPort>, usage: Arc<UsageTracker>) -> Self {
        Self { text_gen, usage }
    }

    pub fn usage(&self) -> &Arc<UsageTracker> {
        &self.usage
    }

    /// Short explanation of a sheet element the player clicked on.
    pub async fn rules_insight(&self, topic: &str, context: &str) -> String {
        let prompt = format!(
            "{RULES_REFERENCE_PROMPT}\n\nThe user has clicked on: \"{topic}\".\n\
             Context provided: \"{context}\".\n\n{RULES_INSIGHT_INSTRUCTIONS}"
        );
        let request = TextRequest::new(prompt).with_thinking_budget(0);
        self.generate_or(request, &INSIGHT, "rules_insight").await
    }

    /// One sentence of fantasy narration for a roll. Empty when unavailable.
    pub async fn narrative_flavor(
        &self,
        character_name: &str,
        action: &str,
        result: &str,
    ) -> String {
        let prompt = format!(
            "In one short sentence, describe {character_name} performing {action} \
             with a result of: {result}. High fantasy style."
        );
        self.generate_or(TextRequest::new(prompt), &FLAVOR, "narrative_flavor")
            .await
    }

    /// Free-form rules question
    pub async fn ask_rules(&self, query: &str) -> String {
        let prompt = format!(
            "You are a helpful rules assistant for the Daggerheart TTRPG.\n\
             User question: \"{query}\"\n\n{ASK_RULES_INSTRUCTIONS}"
        );
        self.generate_or(TextRequest::new(prompt), &ANSWER, "ask_rules")
            .await
    }

    async fn generate_or(
        &self,
        request: TextRequest,
        fallbacks: &Fallbacks,
        operation: &'static str,
    ) -> String {
        let prompt = request.prompt.clone();
        match self.text_gen.generate(request).await {
            Ok(response) => {
                let text = response.text.trim();
                let text = if text.is_empty() {
                    fallbacks.empty.to_string()
                } else {
                    text.to_string()
                };
                self.usage.record(&prompt, &text);
                text
            }
            Err(TextGenError::MissingApiKey) => {
                tracing::debug!(operation, "Text generation disabled, no API key");
                fallbacks.no_key.to_string()
            }
            Err(e) => {
                tracing::warn!(operation, error = %e, "Text generation failed, using fallback");
                fallbacks.failed.to_string()
            }
        }
    }
}
