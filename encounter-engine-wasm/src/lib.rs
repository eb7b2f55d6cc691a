//! WASM bindings for encounter-engine, used by the browser encounter UI.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use encounter_engine::core::engine::EncounterEngine;
use encounter_engine::core::resolver::ActionResult;
use encounter_engine::schema::action::SocialAction;
use encounter_engine::schema::encounter::Encounter;
use encounter_engine::schema::profile::PlayerStats;

// ---------------------------------------------------------------------------
// Embedded encounters, compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const BUNDLED: &[(&str, &str)] = &[
        (
            "angry_customer",
            include_str!("../../content/encounters/angry_customer.ron"),
        ),
        (
            "noisy_neighbor",
            include_str!("../../content/encounters/noisy_neighbor.ron"),
        ),
    ];
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfileInput {
    traits: Vec<String>,
    stats: PlayerStats,
}

#[derive(Serialize)]
struct StateInfo<'a> {
    id: &'a str,
    name: &'a str,
    dialogue: &'a str,
    mood: &'static str,
    actions: Vec<&'static str>,
}

fn js_err(context: &str, e: impl std::fmt::Display) -> JsError {
    JsError::new(&format!("{context}: {e}"))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| js_err("Serialization error", e))
}

fn parse_profile(profile_json: &str) -> Result<ProfileInput, JsError> {
    if profile_json.trim().is_empty() {
        return Ok(ProfileInput::default());
    }
    serde_json::from_str(profile_json).map_err(|e| js_err("Invalid profile JSON", e))
}

// ---------------------------------------------------------------------------
// EncounterSession, the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct EncounterSession {
    engine: EncounterEngine,
}

#[wasm_bindgen]
impl EncounterSession {
    /// Create a session from an encounter definition in JSON.
    ///
    /// Profile JSON shape (every field optional):
    /// ```json
    /// {
    ///   "traits": ["warm_smile"],
    ///   "stats": { "social": 3, "logic": 2, "focus": 1, "perception": 4 }
    /// }
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(
        encounter_json: &str,
        profile_json: &str,
        seed: u64,
    ) -> Result<EncounterSession, JsError> {
        let encounter: Encounter = serde_json::from_str(encounter_json)
            .map_err(|e| js_err("Invalid encounter JSON", e))?;
        Self::with_encounter(encounter, profile_json, seed)
    }

    /// Create a session for one of the encounters compiled into the binary.
    pub fn bundled(id: &str, profile_json: &str, seed: u64) -> Result<EncounterSession, JsError> {
        let source = data::BUNDLED
            .iter()
            .find(|(name, _)| *name == id)
            .map(|(_, src)| *src)
            .ok_or_else(|| JsError::new(&format!("Unknown encounter: {id}")))?;
        let encounter = Encounter::parse_ron(source).map_err(|e| js_err("Encounter error", e))?;
        Self::with_encounter(encounter, profile_json, seed)
    }

    pub fn start(&mut self) {
        self.engine.start();
    }

    /// Perform an action by name (`"show_proof"` or `"show-proof"`).
    /// Returns the `ActionResult` as JSON.
    pub fn perform_action(&mut self, name: &str) -> Result<String, JsError> {
        let action: SocialAction = name.parse().map_err(|e| js_err("Invalid action", e))?;
        let result: ActionResult = self.engine.perform_action(action);
        to_json(&result)
    }

    pub fn expire_timer(&mut self) -> Result<String, JsError> {
        let result = self.engine.expire_timer();
        to_json(&result)
    }

    /// The current state with any dialogue override applied.
    pub fn current_state(&self) -> Result<String, JsError> {
        let state = self.engine.current_state();
        let actions = self.engine.available_actions();
        to_json(&StateInfo {
            id: state.id.as_str(),
            name: &state.name,
            dialogue: &state.dialogue,
            mood: state.mood.tag(),
            actions: actions.iter().map(|a| a.name()).collect(),
        })
    }

    pub fn context(&self) -> Result<String, JsError> {
        to_json(self.engine.context())
    }

    /// JSON array of action names offered right now; empty once complete.
    pub fn available_actions(&self) -> Result<String, JsError> {
        let names: Vec<&str> = self
            .engine
            .available_actions()
            .iter()
            .map(|a| a.name())
            .collect();
        to_json(&names)
    }

    pub fn is_complete(&self) -> bool {
        self.engine.is_complete()
    }

    /// `"victory"`, `"defeat"`, or `null`, as JSON.
    pub fn outcome(&self) -> Result<String, JsError> {
        to_json(&self.engine.outcome())
    }

    /// `{"outcome": ..., "payload": ...}` once complete, otherwise `null`.
    pub fn rewards(&self) -> Result<String, JsError> {
        to_json(&self.engine.rewards())
    }

    /// JSON array of bundled encounter ids.
    pub fn bundled_encounters() -> String {
        let ids: Vec<&str> = data::BUNDLED.iter().map(|(id, _)| *id).collect();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// JSON array of every social action name.
    pub fn actions() -> String {
        let names: Vec<&str> = SocialAction::ALL.iter().map(|a| a.name()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }
}

// Private helpers
impl EncounterSession {
    fn with_encounter(
        encounter: Encounter,
        profile_json: &str,
        seed: u64,
    ) -> Result<EncounterSession, JsError> {
        let profile = parse_profile(profile_json)?;
        let engine = EncounterEngine::builder(encounter)
            .traits(profile.traits)
            .stats(profile.stats)
            .seed(seed)
            .build()
            .map_err(|e| js_err("Encounter error", e))?;
        Ok(EncounterSession { engine })
    }
}
