//! Game balance and phrase configuration
//!
//! Persisted in LocalStorage so the phrase and feel can be changed without a rebuild.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable gameplay values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player physics ===
    pub gravity: f32,
    pub jump_force: f32,
    pub ground_y: f32,
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,

    // === Obstacles ===
    pub game_speed: f32,
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Spawn gate lower bound (ms)
    pub spawn_interval_min: f64,
    /// Spawn gate upper bound (ms)
    pub spawn_interval_max: f64,
    pub hitbox_inset: f32,
    pub offscreen_margin: f32,

    // === Reveal ===
    /// Words revealed in order, one per cleared obstacle
    pub phrase: Vec<String>,
    pub proposal_delay_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            ground_y: GROUND_Y,
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,

            game_speed: GAME_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height: OBSTACLE_HEIGHT,
            spawn_interval_min: OBSTACLE_INTERVAL_MIN,
            spawn_interval_max: OBSTACLE_INTERVAL_MAX,
            hitbox_inset: HITBOX_INSET,
            offscreen_margin: OFFSCREEN_MARGIN,

            phrase: DEFAULT_PHRASE.iter().map(|w| w.to_string()).collect(),
            proposal_delay_ms: PROPOSAL_DELAY_MS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.phrase.is_empty() {
            bail!("phrase must contain at least one word");
        }
        if self.phrase.iter().any(|w| w.trim().is_empty()) {
            bail!("phrase words must not be blank");
        }
        if self.spawn_interval_min < 0.0 || self.spawn_interval_min > self.spawn_interval_max {
            bail!(
                "spawn interval must satisfy 0 <= min <= max (got {}..{})",
                self.spawn_interval_min,
                self.spawn_interval_max
            );
        }
        if self.game_speed <= 0.0 {
            bail!("game_speed must be positive");
        }
        if self.gravity <= 0.0 || self.jump_force >= 0.0 {
            bail!("gravity must pull down and jump_force must push up");
        }
        let sizes = [
            self.player_width,
            self.player_height,
            self.obstacle_width,
            self.obstacle_height,
        ];
        if sizes.iter().any(|s| *s <= 0.0) {
            bail!("entity sizes must be positive");
        }
        let placement = [
            ("ground_y", self.ground_y),
            ("hitbox_inset", self.hitbox_inset),
            ("offscreen_margin", self.offscreen_margin),
            ("proposal_delay_ms", self.proposal_delay_ms as f32),
        ];
        if let Some((name, value)) = placement.iter().find(|(_, v)| *v < 0.0) {
            bail!("{name} must not be negative (got {value})");
        }
        if self.hitbox_inset * 2.0 >= self.player_width {
            bail!("hitbox_inset leaves no player hitbox");
        }
        Ok(())
    }

    /// The phrase as displayed and compared (space-joined)
    pub fn phrase_text(&self) -> String {
        self.phrase.join(" ")
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dino_valentine_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {e:#}"),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
